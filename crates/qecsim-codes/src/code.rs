//! The supported codes and their per-block dimensions.

use std::fmt;
use std::str::FromStr;

use qecsim_state::StateError;
use serde::{Deserialize, Serialize};

use crate::error::{CodeError, CodeResult};
use crate::network::Network;
use crate::noise::Pauli;
use crate::{repetition, shor, steane};

/// A quantum error-correcting code protecting one logical qubit per block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Code {
    /// 3-qubit bit-flip repetition code.
    BitFlip,
    /// 3-qubit phase-flip repetition code.
    PhaseFlip,
    /// 9-qubit Shor code.
    Shor,
    /// 7-qubit [[7,1,3]] Steane code.
    Steane,
}

impl Code {
    /// Every supported code.
    pub const ALL: [Code; 4] = [Code::BitFlip, Code::PhaseFlip, Code::Shor, Code::Steane];

    /// Physical data qubits per logical qubit.
    pub fn block_size(self) -> usize {
        match self {
            Code::BitFlip | Code::PhaseFlip => 3,
            Code::Shor => 9,
            Code::Steane => 7,
        }
    }

    /// Syndrome ancillas appended per block by correction.
    pub fn ancillas_per_block(self) -> usize {
        match self {
            Code::BitFlip => 2,
            Code::PhaseFlip | Code::Shor => 0,
            Code::Steane => 6,
        }
    }

    /// Whether [`crate::correct`] supports this code.
    pub fn supports_correction(self) -> bool {
        !matches!(self, Code::PhaseFlip)
    }

    /// Single-qubit Pauli errors the correction procedure undoes.
    pub fn correctable_paulis(self) -> &'static [Pauli] {
        match self {
            Code::BitFlip => &[Pauli::I, Pauli::X],
            Code::PhaseFlip => &[],
            Code::Shor | Code::Steane => &Pauli::ALL,
        }
    }

    /// Stable lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Code::BitFlip => "bit-flip",
            Code::PhaseFlip => "phase-flip",
            Code::Shor => "shor",
            Code::Steane => "steane",
        }
    }

    /// Encoding network for one block on qubits `1..=block_size`.
    pub fn encoder(self) -> Network {
        match self {
            Code::BitFlip => repetition::bit_flip_encoder(),
            Code::PhaseFlip => repetition::phase_flip_encoder(),
            Code::Shor => shor::encoder(),
            Code::Steane => steane::encoder(),
        }
    }

    /// Inverse of [`Code::encoder`].
    pub fn decoder(self) -> Network {
        match self {
            Code::BitFlip => repetition::bit_flip_decoder(),
            Code::PhaseFlip => repetition::phase_flip_decoder(),
            Code::Shor => shor::decoder(),
            Code::Steane => steane::decoder(),
        }
    }

    /// Encoder for a known basis input: applied to an all-|0⟩ block it yields
    /// the same codeword as [`Code::encoder`] on |0⟩ or |1⟩.
    pub fn basis_encoder(self, one: bool) -> Network {
        if self == Code::Steane {
            return steane::basis_encoder(one);
        }
        let mut net = Network::new();
        if one {
            net.x(1);
        }
        net.extend(&self.encoder());
        net
    }

    /// Logical Pauli on the block at qubits `1..=block_size`.
    pub fn logical(self, pauli: Pauli) -> Network {
        match self {
            Code::BitFlip => repetition::bit_flip_logical(pauli),
            Code::PhaseFlip => repetition::phase_flip_logical(pauli),
            Code::Shor => shor::logical(pauli),
            Code::Steane => steane::logical(pauli),
        }
    }

    /// Logical Hadamard on the block at qubits `1..=block_size`. Only the
    /// Steane code has a transversal one.
    pub fn logical_h(self) -> CodeResult<Network> {
        match self {
            Code::Steane => Ok(steane::logical_h()),
            _ => Err(CodeError::LogicalGateUnsupported {
                code: self,
                gate: "H",
            }),
        }
    }

    /// Logical CNOT between the blocks whose data qubits follow `control`
    /// and `target`.
    pub fn logical_cx(self, control: usize, target: usize) -> CodeResult<Network> {
        if control == target {
            return Err(StateError::InvalidControlTarget {
                reason: format!("control and target are both the block at offset {control}"),
            }
            .into());
        }
        match self {
            Code::BitFlip | Code::Steane => {
                let mut net = Network::new();
                for q in 1..=self.block_size() {
                    net.cx(control + q, target + q);
                }
                Ok(net)
            }
            Code::Shor => Ok(shor::logical_cx(control, target)),
            Code::PhaseFlip => Err(CodeError::LogicalGateUnsupported {
                code: self,
                gate: "CX",
            }),
        }
    }

    /// Correction network for the block whose data qubits follow `data` and
    /// whose ancillas follow `ancilla`.
    pub fn corrector(self, data: usize, ancilla: usize) -> CodeResult<Network> {
        match self {
            Code::BitFlip => Ok(repetition::bit_flip_corrector(data, ancilla)),
            Code::PhaseFlip => Err(CodeError::CorrectionUnsupported(self)),
            Code::Shor => Ok(shor::corrector(data)),
            Code::Steane => Ok(steane::corrector(data, ancilla)),
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Code {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "bit-flip" | "bitflip" => Ok(Code::BitFlip),
            "phase-flip" | "phaseflip" => Ok(Code::PhaseFlip),
            "shor" => Ok(Code::Shor),
            "steane" => Ok(Code::Steane),
            _ => Err(CodeError::UnknownCode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_names() {
        for code in Code::ALL {
            assert_eq!(code.name().parse::<Code>().unwrap(), code);
        }
        assert_eq!("Bit_Flip".parse::<Code>().unwrap(), Code::BitFlip);
        assert!(matches!(
            "surface".parse::<Code>(),
            Err(CodeError::UnknownCode(name)) if name == "surface"
        ));
    }

    #[test]
    fn test_block_dimensions() {
        assert_eq!(Code::Shor.block_size(), 9);
        assert_eq!(Code::Steane.block_size(), 7);
        assert_eq!(Code::Steane.ancillas_per_block(), 6);
        assert!(!Code::PhaseFlip.supports_correction());
    }

    #[test]
    fn test_phase_flip_has_no_corrector() {
        assert_eq!(
            Code::PhaseFlip.corrector(0, 3),
            Err(CodeError::CorrectionUnsupported(Code::PhaseFlip))
        );
        assert!(Code::PhaseFlip.correctable_paulis().is_empty());
    }

    #[test]
    fn test_logical_gate_support() {
        assert!(Code::Steane.logical_h().is_ok());
        assert_eq!(
            Code::Shor.logical_h(),
            Err(CodeError::LogicalGateUnsupported {
                code: Code::Shor,
                gate: "H"
            })
        );
        assert!(matches!(
            Code::PhaseFlip.logical_cx(0, 3),
            Err(CodeError::LogicalGateUnsupported { gate: "CX", .. })
        ));
        assert!(matches!(
            Code::Steane.logical_cx(7, 7),
            Err(CodeError::State(StateError::InvalidControlTarget { .. }))
        ));
        assert_eq!(Code::BitFlip.logical_cx(0, 3).unwrap().counts().cx, 3);
    }

    #[test]
    fn test_basis_encoder_prepends_x_for_one() {
        let net = Code::BitFlip.basis_encoder(true);
        assert_eq!(net.steps()[0], crate::network::Step::X(1));
        assert_eq!(net.len(), 3);
        assert_eq!(Code::Shor.basis_encoder(false), Code::Shor.encoder());
    }
}
