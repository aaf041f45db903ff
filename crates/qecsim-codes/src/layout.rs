//! Physical qubit layout of encoded registers.
//!
//! Blocks are laid out left to right in input order: block `b` (0-based)
//! holds data qubits `b·k + 1 ..= b·k + k` for block size `k`. Correction
//! ancillas, when a code uses them, follow *all* data qubits, again one
//! contiguous run per block.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::code::Code;
use crate::error::{CodeError, CodeResult};

/// Data and ancilla placement for `blocks` logical qubits of one code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    code: Code,
    blocks: usize,
    ancillas_per_block: usize,
}

impl Layout {
    /// Layout of an encoded register with no ancillas.
    pub fn data_only(code: Code, blocks: usize) -> Self {
        Self {
            code,
            blocks,
            ancillas_per_block: 0,
        }
    }

    /// Layout after the code's correction ancillas have been appended.
    pub fn with_ancillas(code: Code, blocks: usize) -> Self {
        Self {
            code,
            blocks,
            ancillas_per_block: code.ancillas_per_block(),
        }
    }

    /// Infer the block count from a data-only register width.
    pub fn for_width(code: Code, num_qubits: usize) -> CodeResult<Self> {
        let block_size = code.block_size();
        if num_qubits == 0 || num_qubits % block_size != 0 {
            return Err(CodeError::BlockSizeMismatch {
                code,
                num_qubits,
                block_size,
            });
        }
        Ok(Self::data_only(code, num_qubits / block_size))
    }

    pub fn code(&self) -> Code {
        self.code
    }

    /// Number of logical qubits.
    pub fn blocks(&self) -> usize {
        self.blocks
    }

    pub fn ancillas_per_block(&self) -> usize {
        self.ancillas_per_block
    }

    /// Total data qubits.
    pub fn data_width(&self) -> usize {
        self.blocks * self.code.block_size()
    }

    /// Total ancilla qubits.
    pub fn ancilla_width(&self) -> usize {
        self.blocks * self.ancillas_per_block
    }

    /// Width of the whole register.
    pub fn total_width(&self) -> usize {
        self.data_width() + self.ancilla_width()
    }

    /// Offset added to block-local data indices of block `block`.
    pub fn data_offset(&self, block: usize) -> usize {
        block * self.code.block_size()
    }

    /// Offset added to block-local ancilla indices of block `block`.
    pub fn ancilla_offset(&self, block: usize) -> usize {
        self.data_width() + block * self.ancillas_per_block
    }

    /// Data qubits of block `block`.
    pub fn data_range(&self, block: usize) -> RangeInclusive<usize> {
        let offset = self.data_offset(block);
        offset + 1..=offset + self.code.block_size()
    }

    /// Every data qubit.
    pub fn data_qubits(&self) -> Vec<usize> {
        (1..=self.data_width()).collect()
    }

    /// Every ancilla qubit.
    pub fn ancilla_qubits(&self) -> Vec<usize> {
        (self.data_width() + 1..=self.total_width()).collect()
    }

    /// The qubit of each block that carries the logical state once the block
    /// has been decoded (its first data qubit).
    pub fn carriers(&self) -> Vec<usize> {
        (0..self.blocks).map(|b| self.data_offset(b) + 1).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steane_two_blocks() {
        let layout = Layout::with_ancillas(Code::Steane, 2);
        assert_eq!(layout.data_width(), 14);
        assert_eq!(layout.total_width(), 26);
        assert_eq!(layout.data_range(1), 8..=14);
        assert_eq!(layout.ancilla_offset(0), 14);
        assert_eq!(layout.ancilla_offset(1), 20);
        assert_eq!(layout.carriers(), vec![1, 8]);
        assert_eq!(layout.ancilla_qubits(), (15..=26).collect::<Vec<_>>());
    }

    #[test]
    fn test_width_must_be_whole_blocks() {
        assert_eq!(Layout::for_width(Code::Shor, 18).unwrap().blocks(), 2);
        assert_eq!(
            Layout::for_width(Code::Shor, 10),
            Err(CodeError::BlockSizeMismatch {
                code: Code::Shor,
                num_qubits: 10,
                block_size: 9
            })
        );
        assert!(Layout::for_width(Code::BitFlip, 0).is_err());
    }
}
