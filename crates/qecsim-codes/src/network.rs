//! Fixed gate networks.
//!
//! Encoders, decoders and correctors are all straight-line sequences of
//! H, X, Z, CNOT and multi-controlled X. A [`Network`] records such a sequence
//! once, validates it against a state width before running it, and can be
//! shifted onto another block or reversed into its inverse.

use qecsim_state::gates::bit_position;
use qecsim_state::{StateError, StateResult, StateVector};
use serde::{Deserialize, Serialize};

/// One gate of a network. Qubit indices are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    /// Hadamard.
    H(usize),
    /// Pauli-X.
    X(usize),
    /// Pauli-Z.
    Z(usize),
    /// CNOT.
    Cx {
        /// Control qubit.
        control: usize,
        /// Target qubit.
        target: usize,
    },
    /// X on `target` when every control matches its state.
    Mcx {
        /// Target qubit.
        target: usize,
        /// Control qubits.
        controls: Vec<usize>,
        /// Required value of each control (`true` = |1⟩).
        states: Vec<bool>,
    },
}

impl Step {
    fn shifted(&self, offset: usize) -> Self {
        match self {
            Step::H(q) => Step::H(q + offset),
            Step::X(q) => Step::X(q + offset),
            Step::Z(q) => Step::Z(q + offset),
            Step::Cx { control, target } => Step::Cx {
                control: control + offset,
                target: target + offset,
            },
            Step::Mcx {
                target,
                controls,
                states,
            } => Step::Mcx {
                target: target + offset,
                controls: controls.iter().map(|c| c + offset).collect(),
                states: states.clone(),
            },
        }
    }

    fn check(&self, num_qubits: usize) -> StateResult<()> {
        match self {
            Step::H(q) | Step::X(q) | Step::Z(q) => bit_position(num_qubits, *q).map(|_| ()),
            Step::Cx { control, target } => {
                bit_position(num_qubits, *control)?;
                bit_position(num_qubits, *target)?;
                if control == target {
                    return Err(StateError::InvalidControlTarget {
                        reason: format!("control and target are both qubit {target}"),
                    });
                }
                Ok(())
            }
            Step::Mcx {
                target,
                controls,
                states,
            } => {
                bit_position(num_qubits, *target)?;
                if controls.len() != states.len() {
                    return Err(StateError::InvalidControlTarget {
                        reason: format!(
                            "{} controls but {} control states",
                            controls.len(),
                            states.len()
                        ),
                    });
                }
                for control in controls {
                    bit_position(num_qubits, *control)?;
                    if control == target {
                        return Err(StateError::InvalidControlTarget {
                            reason: format!("target qubit {target} is also a control"),
                        });
                    }
                }
                Ok(())
            }
        }
    }

    fn apply(&self, state: &mut StateVector) -> StateResult<()> {
        match self {
            Step::H(q) => state.apply_h(*q),
            Step::X(q) => state.apply_x(*q),
            Step::Z(q) => state.apply_z(*q),
            Step::Cx { control, target } => state.apply_cx(*control, *target),
            Step::Mcx {
                target,
                controls,
                states,
            } => state.apply_mcx(*target, controls, states),
        }
    }

    /// Highest qubit index the step touches.
    fn max_qubit(&self) -> usize {
        match self {
            Step::H(q) | Step::X(q) | Step::Z(q) => *q,
            Step::Cx { control, target } => (*control).max(*target),
            Step::Mcx {
                target, controls, ..
            } => controls.iter().copied().fold(*target, usize::max),
        }
    }
}

/// Per-kind gate tally of a network.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateCounts {
    pub h: usize,
    pub x: usize,
    pub z: usize,
    pub cx: usize,
    pub mcx: usize,
}

impl GateCounts {
    pub fn total(&self) -> usize {
        self.h + self.x + self.z + self.cx + self.mcx
    }
}

/// A straight-line sequence of gates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    steps: Vec<Step>,
}

impl Network {
    /// An empty network.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn h(&mut self, qubit: usize) -> &mut Self {
        self.steps.push(Step::H(qubit));
        self
    }

    pub fn x(&mut self, qubit: usize) -> &mut Self {
        self.steps.push(Step::X(qubit));
        self
    }

    pub fn z(&mut self, qubit: usize) -> &mut Self {
        self.steps.push(Step::Z(qubit));
        self
    }

    pub fn cx(&mut self, control: usize, target: usize) -> &mut Self {
        self.steps.push(Step::Cx { control, target });
        self
    }

    /// Multi-controlled X; `controls` pairs each control with its required value.
    pub fn mcx(&mut self, target: usize, controls: &[(usize, bool)]) -> &mut Self {
        self.steps.push(Step::Mcx {
            target,
            controls: controls.iter().map(|&(q, _)| q).collect(),
            states: controls.iter().map(|&(_, s)| s).collect(),
        });
        self
    }

    /// Append every step of `other`.
    pub fn extend(&mut self, other: &Network) -> &mut Self {
        self.steps.extend(other.steps.iter().cloned());
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Smallest state width the network fits in.
    pub fn width(&self) -> usize {
        self.steps.iter().map(Step::max_qubit).max().unwrap_or(0)
    }

    /// Tally the gates by kind.
    pub fn counts(&self) -> GateCounts {
        let mut counts = GateCounts::default();
        for step in &self.steps {
            match step {
                Step::H(_) => counts.h += 1,
                Step::X(_) => counts.x += 1,
                Step::Z(_) => counts.z += 1,
                Step::Cx { .. } => counts.cx += 1,
                Step::Mcx { .. } => counts.mcx += 1,
            }
        }
        counts
    }

    /// The same network with every qubit index moved up by `offset`.
    pub fn shifted(&self, offset: usize) -> Self {
        Self {
            steps: self.steps.iter().map(|s| s.shifted(offset)).collect(),
        }
    }

    /// The steps in reverse order.
    ///
    /// Every step kind is self-inverse, so this is the inverse network.
    pub fn reversed(&self) -> Self {
        Self {
            steps: self.steps.iter().rev().cloned().collect(),
        }
    }

    /// Check every step against a `num_qubits`-wide state.
    pub fn validate(&self, num_qubits: usize) -> StateResult<()> {
        self.steps.iter().try_for_each(|s| s.check(num_qubits))
    }

    /// Run the network on `state`.
    ///
    /// All steps are validated first; on error the state is untouched.
    pub fn apply(&self, state: &mut StateVector) -> StateResult<()> {
        self.validate(state.num_qubits())?;
        for step in &self.steps {
            step.apply(state)?;
        }
        Ok(())
    }
}
