//! `qecsim-state`: dense statevector engine for error-correction simulation.
//!
//! An `n`-qubit state is a vector of `2^n` complex amplitudes. Qubits are
//! addressed 1-based with qubit 1 as the most significant bit of the basis
//! index, and every gate is applied through bit arithmetic on that index:
//!
//! - [`gates`] - slice kernels for single-qubit, CNOT and multi-controlled gates
//! - [`matrices`] - standard 2×2 gate matrices and random unitaries
//! - [`statevector`] - the [`StateVector`] type with typed gate methods
//! - [`density`] - density matrices, partial trace and fidelity
//!
//! # Quick start
//!
//! ```rust
//! use qecsim_state::{StateVector, density};
//!
//! let mut bell = StateVector::zero_state(2).unwrap();
//! bell.apply_h(1).unwrap();
//! bell.apply_cx(1, 2).unwrap();
//!
//! // Either half of a Bell pair is maximally mixed.
//! let rho = density::partial_trace(&bell, &[2]).unwrap();
//! assert!((density::purity(rho.view()).unwrap() - 0.5).abs() < 1e-12);
//! ```

pub mod density;
pub mod error;
pub mod gates;
pub mod matrices;
pub mod statevector;

pub use density::{
    DensityConfig, DensityMatrix, TraceInput, fidelity, partial_trace, purity, to_density_matrix,
    to_state_vector,
};
pub use error::{StateError, StateResult};
pub use gates::MAX_QUBITS;
pub use statevector::{AMPLITUDE_TOLERANCE, StateVector};
