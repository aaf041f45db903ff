//! The result of running a correction procedure.

use qecsim_state::density::{DensityMatrix, partial_trace};
use qecsim_state::{StateResult, StateVector};
use tracing::trace;

use crate::code::Code;
use crate::error::CodeResult;
use crate::layout::Layout;
use crate::network::Network;

/// A corrected register whose syndrome ancillas have not been measured.
///
/// Correction is fully coherent: the syndrome stays in the ancillas (or, for
/// the Shor code, in the non-carrier data qubits). A clean logical state is
/// only available after tracing those qubits out, through
/// [`CorrectedState::discard_ancillas`] or [`CorrectedState::logical_density`].
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectedState {
    state: StateVector,
    layout: Layout,
}

impl CorrectedState {
    pub(crate) fn new(state: StateVector, layout: Layout) -> Self {
        Self { state, layout }
    }

    pub fn code(&self) -> Code {
        self.layout.code()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The full register, ancillas included.
    pub fn state(&self) -> &StateVector {
        &self.state
    }

    pub fn into_state(self) -> StateVector {
        self.state
    }

    pub fn data_qubits(&self) -> Vec<usize> {
        self.layout.data_qubits()
    }

    pub fn ancilla_qubits(&self) -> Vec<usize> {
        self.layout.ancilla_qubits()
    }

    /// Reduced density matrix of the data qubits.
    pub fn discard_ancillas(&self) -> StateResult<DensityMatrix> {
        partial_trace(&self.state, &self.layout.ancilla_qubits())
    }

    /// Reduced density matrix of the logical qubits, one per block in block
    /// order.
    ///
    /// Shor blocks already hold the logical state on their first qubit after
    /// correction; bit-flip and Steane blocks are decoded first.
    pub fn logical_density(&self) -> CodeResult<DensityMatrix> {
        let carriers = self.layout.carriers();
        let traced: Vec<usize> = (1..=self.layout.total_width())
            .filter(|q| !carriers.contains(q))
            .collect();

        let density = match self.code() {
            Code::Shor => partial_trace(&self.state, &traced)?,
            code => {
                let mut decoder = Network::new();
                for block in 0..self.layout.blocks() {
                    decoder.extend(&code.decoder().shifted(self.layout.data_offset(block)));
                }
                let mut decoded = self.state.clone();
                decoder.apply(&mut decoded)?;
                partial_trace(&decoded, &traced)?
            }
        };
        trace!(code = %self.code(), blocks = self.layout.blocks(), "reduced to logical qubits");
        Ok(density)
    }
}
