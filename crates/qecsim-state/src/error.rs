//! Error types for the statevector engine.

use thiserror::Error;

/// Errors produced by gate application, state construction and the
/// density/trace utilities.
///
/// Every operation that returns one of these has left its input untouched.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum StateError {
    /// Amplitude vector (or matrix side) is not a non-zero power of two.
    #[error("dimension {len} is not a power of two")]
    DimensionMismatch {
        /// The offending length.
        len: usize,
    },

    /// A 1-based qubit index outside `[1, num_qubits]`.
    #[error("qubit {qubit} is out of range for a {num_qubits}-qubit state")]
    InvalidQubitIndex {
        /// The offending qubit index (1-based).
        qubit: usize,
        /// Number of qubits in the state.
        num_qubits: usize,
    },

    /// Control coincides with the target, or controls and control states
    /// have different lengths.
    #[error("invalid control/target combination: {reason}")]
    InvalidControlTarget {
        /// Human-readable description of what was wrong.
        reason: String,
    },

    /// Gate matrix is not 2×2.
    #[error("gate matrix must be 2x2, got {rows}x{cols}")]
    InvalidGateShape {
        /// Number of rows supplied.
        rows: usize,
        /// Number of columns supplied.
        cols: usize,
    },

    /// Matrix input is neither square nor a column vector.
    #[error("expected a square matrix or a column vector, got {rows}x{cols}")]
    NotSquare {
        /// Number of rows supplied.
        rows: usize,
        /// Number of columns supplied.
        cols: usize,
    },

    /// No eigenvalue of the density matrix lies within tolerance of 1.
    #[error("no eigenvalue within {tolerance} of 1 (largest found: {largest})")]
    NoDominantEigenvalue {
        /// Largest eigenvalue estimate.
        largest: f64,
        /// Tolerance that was applied.
        tolerance: f64,
    },

    /// Vector has zero norm and cannot be normalized.
    #[error("cannot normalize a zero vector")]
    ZeroNorm,

    /// Requested width exceeds the allocation guard.
    #[error("{requested} qubits requested but at most {max} are supported")]
    TooManyQubits {
        /// Requested qubit count.
        requested: usize,
        /// Supported maximum.
        max: usize,
    },

    /// Tolerance must be finite and strictly positive.
    #[error("tolerance must be finite and > 0, got {0}")]
    InvalidTolerance(f64),
}

impl StateError {
    pub(crate) fn control_target(reason: impl Into<String>) -> Self {
        Self::InvalidControlTarget {
            reason: reason.into(),
        }
    }
}

/// Result type for statevector operations.
pub type StateResult<T> = Result<T, StateError>;
