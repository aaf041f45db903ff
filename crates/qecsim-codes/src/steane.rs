//! The [[7,1,3]] Steane code.
//!
//! Correction uses six ancillas per block: three hold the bit-flip syndrome
//! of the [7,4] Hamming parity checks, three hold the same checks evaluated
//! in the Hadamard basis. A nonzero syndrome `s` read as `(a1, a2, a3)` with
//! `a1` least significant names the faulty data qubit directly.
//!
//! X, Z and H are all transversal: the same gate on each of the seven data
//! qubits acts as the logical gate.

use crate::network::Network;
use crate::noise::Pauli;

/// Hamming parity checks. Row `r` drives syndrome bit `r`.
pub const PARITY_CHECKS: [[usize; 4]; 3] = [[1, 3, 5, 7], [2, 3, 6, 7], [4, 5, 6, 7]];

/// Encoder CNOTs as `(control, target)`, applied after H on qubits 5, 6, 7.
const ENCODER_CNOTS: [(usize, usize); 11] = [
    (1, 2),
    (1, 3),
    (5, 4),
    (5, 3),
    (5, 2),
    (6, 4),
    (6, 3),
    (6, 1),
    (7, 4),
    (7, 2),
    (7, 1),
];

/// Encode qubit 1 of a 7-qubit block whose qubits 2..=7 are |0⟩.
pub fn encoder() -> Network {
    let mut net = Network::new();
    for q in [5, 6, 7] {
        net.h(q);
    }
    for (control, target) in ENCODER_CNOTS {
        net.cx(control, target);
    }
    net
}

/// Inverse of [`encoder`]; performs no correction.
pub fn decoder() -> Network {
    encoder().reversed()
}

/// Encoder for a known basis input on an all-|0⟩ block.
///
/// Replaces the two CNOTs fanning out qubit 1 with X on qubits 1..=3 for
/// |1⟩, or with nothing for |0⟩. Produces the same codeword as [`encoder`].
pub fn basis_encoder(one: bool) -> Network {
    let mut net = Network::new();
    for q in [5, 6, 7] {
        net.h(q);
    }
    if one {
        net.x(1).x(2).x(3);
    }
    for &(control, target) in &ENCODER_CNOTS[2..] {
        net.cx(control, target);
    }
    net
}

/// Transversal logical Pauli. Y is realized as Z then X, equal to Y up to a
/// global phase.
pub fn logical(pauli: Pauli) -> Network {
    let mut net = Network::new();
    if matches!(pauli, Pauli::Z | Pauli::Y) {
        for q in 1..=7 {
            net.z(q);
        }
    }
    if matches!(pauli, Pauli::X | Pauli::Y) {
        for q in 1..=7 {
            net.x(q);
        }
    }
    net
}

/// Transversal logical Hadamard.
pub fn logical_h() -> Network {
    let mut net = Network::new();
    for q in 1..=7 {
        net.h(q);
    }
    net
}

/// Correction for the block on `data + 1..=data + 7` using ancillas
/// `ancilla + 1..=ancilla + 6`, all of which must start in |0⟩.
pub fn corrector(data: usize, ancilla: usize) -> Network {
    let mut net = Network::new();
    syndrome_round(&mut net, data, ancilla);
    for q in 1..=7 {
        net.h(data + q);
    }
    syndrome_round(&mut net, data, ancilla + 3);
    for q in 1..=7 {
        net.h(data + q);
    }
    net
}

/// Parity network into three ancillas, then one corrective X per nonzero
/// syndrome.
fn syndrome_round(net: &mut Network, data: usize, ancilla: usize) {
    for (bit, row) in PARITY_CHECKS.iter().enumerate() {
        for &q in row {
            net.cx(data + q, ancilla + 1 + bit);
        }
    }
    for position in 1..=7usize {
        let controls: Vec<(usize, bool)> = (0..3)
            .map(|bit| (ancilla + 1 + bit, (position >> bit) & 1 == 1))
            .collect();
        net.mcx(data + position, &controls);
    }
}
