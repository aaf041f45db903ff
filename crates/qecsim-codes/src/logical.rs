//! Logical gates on encoded registers.
//!
//! Blocks are addressed 0-based, in the order their inputs were passed to
//! [`crate::encode`].

use std::fmt;

use crate::code::Code;
use crate::error::{CodeError, CodeResult};
use crate::layout::Layout;
use crate::network::Network;
use crate::noise::Pauli;

/// A gate on logical qubits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalGate {
    /// Logical Pauli on one block.
    Pauli {
        /// Which Pauli.
        pauli: Pauli,
        /// Block index.
        block: usize,
    },
    /// Logical Hadamard on one block.
    H(usize),
    /// Logical CNOT between two blocks.
    Cx {
        /// Control block.
        control: usize,
        /// Target block.
        target: usize,
    },
}

impl LogicalGate {
    pub fn x(block: usize) -> Self {
        LogicalGate::Pauli {
            pauli: Pauli::X,
            block,
        }
    }

    pub fn y(block: usize) -> Self {
        LogicalGate::Pauli {
            pauli: Pauli::Y,
            block,
        }
    }

    pub fn z(block: usize) -> Self {
        LogicalGate::Pauli {
            pauli: Pauli::Z,
            block,
        }
    }

    /// Highest block index the gate touches.
    pub fn max_block(&self) -> usize {
        match *self {
            LogicalGate::Pauli { block, .. } | LogicalGate::H(block) => block,
            LogicalGate::Cx { control, target } => control.max(target),
        }
    }

    /// Physical network realizing the gate on `layout`'s data qubits.
    pub fn network(&self, layout: &Layout) -> CodeResult<Network> {
        let blocks = layout.blocks();
        let block = self.max_block();
        if block >= blocks {
            return Err(CodeError::InvalidBlock { block, blocks });
        }
        let code: Code = layout.code();
        match *self {
            LogicalGate::Pauli { pauli, block } => {
                Ok(code.logical(pauli).shifted(layout.data_offset(block)))
            }
            LogicalGate::H(block) => Ok(code.logical_h()?.shifted(layout.data_offset(block))),
            LogicalGate::Cx { control, target } => {
                code.logical_cx(layout.data_offset(control), layout.data_offset(target))
            }
        }
    }
}

impl fmt::Display for LogicalGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalGate::Pauli { pauli, block } => write!(f, "{pauli}_L[{block}]"),
            LogicalGate::H(block) => write!(f, "H_L[{block}]"),
            LogicalGate::Cx { control, target } => write!(f, "CX_L[{control}->{target}]"),
        }
    }
}
