//! Single-qubit error channels injected between encoding and correction.

use std::fmt;

use ndarray::Array2;
use num_complex::Complex64;
use qecsim_state::matrices::{self, UNITARY_TOLERANCE};
use qecsim_state::{StateResult, StateVector};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pauli {
    I,
    X,
    Y,
    Z,
}

impl Pauli {
    pub const ALL: [Pauli; 4] = [Pauli::I, Pauli::X, Pauli::Y, Pauli::Z];

    /// Apply to `qubit` using the engine's native kernels.
    pub fn apply(self, state: &mut StateVector, qubit: usize) -> StateResult<()> {
        match self {
            // Still range-checks the qubit.
            Pauli::I => state.apply_gate(&matrices::identity(), qubit),
            Pauli::X => state.apply_x(qubit),
            Pauli::Y => state.apply_y(qubit),
            Pauli::Z => state.apply_z(qubit),
        }
    }

    pub fn matrix(self) -> Array2<Complex64> {
        match self {
            Pauli::I => matrices::identity(),
            Pauli::X => matrices::pauli_x(),
            Pauli::Y => matrices::pauli_y(),
            Pauli::Z => matrices::pauli_z(),
        }
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Pauli::I => "I",
            Pauli::X => "X",
            Pauli::Y => "Y",
            Pauli::Z => "Z",
        };
        f.write_str(label)
    }
}

/// An error acting on one physical qubit.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorChannel {
    /// A Pauli error.
    Pauli(Pauli),
    /// An arbitrary 2×2 matrix, unitary or not.
    Matrix(Array2<Complex64>),
}

impl ErrorChannel {
    /// A random single-qubit unitary error.
    pub fn random_unitary<R: Rng + ?Sized>(rng: &mut R) -> Self {
        ErrorChannel::Matrix(matrices::random_unitary(rng))
    }

    pub fn is_unitary(&self) -> bool {
        match self {
            ErrorChannel::Pauli(_) => true,
            ErrorChannel::Matrix(m) => matrices::is_unitary(m.view(), UNITARY_TOLERANCE),
        }
    }

    /// Apply the error to `qubit`. Non-unitary matrices leave the state
    /// denormalized.
    pub fn apply(&self, state: &mut StateVector, qubit: usize) -> StateResult<()> {
        trace!(qubit, channel = %self, "injecting error");
        match self {
            ErrorChannel::Pauli(p) => p.apply(state, qubit),
            ErrorChannel::Matrix(m) => state.apply_gate(m, qubit),
        }
    }

    /// Apply the error and renormalize.
    ///
    /// The state is replaced only if both steps succeed.
    pub fn apply_normalized(&self, state: &mut StateVector, qubit: usize) -> StateResult<()> {
        let mut perturbed = state.clone();
        self.apply(&mut perturbed, qubit)?;
        perturbed.normalize()?;
        *state = perturbed;
        Ok(())
    }
}

impl From<Pauli> for ErrorChannel {
    fn from(p: Pauli) -> Self {
        ErrorChannel::Pauli(p)
    }
}

impl fmt::Display for ErrorChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorChannel::Pauli(p) => write!(f, "{p}"),
            ErrorChannel::Matrix(_) if self.is_unitary() => f.write_str("U"),
            ErrorChannel::Matrix(_) => f.write_str("M"),
        }
    }
}
