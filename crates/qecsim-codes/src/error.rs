//! Error types for the codes crate.

use qecsim_state::StateError;
use thiserror::Error;

use crate::code::Code;

/// Errors produced by encoding, decoding and correction.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum CodeError {
    /// State width is not a whole number of code blocks.
    #[error("{num_qubits} qubits is not a multiple of the {code} block size {block_size}")]
    BlockSizeMismatch {
        /// The code whose block size was violated.
        code: Code,
        /// Width of the supplied state.
        num_qubits: usize,
        /// Physical qubits per logical qubit.
        block_size: usize,
    },

    /// An encoder input is not a single-qubit amplitude pair.
    #[error("input {index} has {len} amplitudes, expected 2")]
    InvalidInputDimension {
        /// Position of the offending input.
        index: usize,
        /// Number of amplitudes it carried.
        len: usize,
    },

    /// Encoder called with no logical qubits.
    #[error("no logical qubits to encode")]
    EmptyInput,

    /// The code has no correction procedure.
    #[error("correction is not supported for the {0} code")]
    CorrectionUnsupported(Code),

    /// The code has no fixed network for this logical gate.
    #[error("logical {gate} is not supported for the {code} code")]
    LogicalGateUnsupported {
        /// The code asked for the gate.
        code: Code,
        /// Gate name.
        gate: &'static str,
    },

    /// A logical gate names a block the register does not have.
    #[error("block {block} is out of range for a register of {blocks} blocks")]
    InvalidBlock {
        /// Offending 0-based block index.
        block: usize,
        /// Blocks in the register.
        blocks: usize,
    },

    /// Unrecognised code name.
    #[error("unknown code '{0}' (expected bit-flip, phase-flip, shor or steane)")]
    UnknownCode(String),

    /// Statevector engine error.
    #[error("state error: {0}")]
    State(#[from] StateError),
}

/// Result type for code operations.
pub type CodeResult<T> = Result<T, CodeError>;
