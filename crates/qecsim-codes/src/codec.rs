//! Register-level encode, decode, correct and logical gates.
//!
//! Every entry point checks its input shape first and builds one network for
//! the whole register, so a failure never leaves a half-processed state.

use num_complex::Complex64;
use qecsim_state::{MAX_QUBITS, StateError, StateVector};
use tracing::{debug, trace, warn};

use crate::code::Code;
use crate::corrected::CorrectedState;
use crate::error::{CodeError, CodeResult};
use crate::layout::Layout;
use crate::logical::LogicalGate;
use crate::network::Network;

/// Encode one logical qubit per input amplitude pair.
///
/// Blocks are combined by tensor product in input order, so input `i` lands
/// on data qubits `i·k + 1 ..= (i + 1)·k`.
pub fn encode<I: AsRef<[Complex64]>>(code: Code, inputs: &[I]) -> CodeResult<StateVector> {
    if inputs.is_empty() {
        return Err(CodeError::EmptyInput);
    }
    for (index, input) in inputs.iter().enumerate() {
        let len = input.as_ref().len();
        if len != 2 {
            return Err(CodeError::InvalidInputDimension { index, len });
        }
    }
    let layout = Layout::data_only(code, inputs.len());
    if layout.data_width() > MAX_QUBITS {
        return Err(StateError::TooManyQubits {
            requested: layout.data_width(),
            max: MAX_QUBITS,
        }
        .into());
    }

    let encoder = code.encoder();
    debug!(
        %code,
        blocks = layout.blocks(),
        qubits = layout.data_width(),
        steps = encoder.len(),
        "encoding"
    );

    let mut joint: Option<StateVector> = None;
    for input in inputs {
        let amps = input.as_ref();
        let mut block =
            StateVector::from_qubit(amps[0], amps[1]).append_zeros(code.block_size() - 1)?;
        encoder.apply(&mut block)?;
        joint = Some(match joint {
            None => block,
            Some(prev) => prev.tensor(&block)?,
        });
    }
    joint.ok_or(CodeError::EmptyInput)
}

/// Encode computational basis inputs, one block per bit, starting from an
/// all-|0⟩ register and using [`Code::basis_encoder`].
pub fn encode_basis(code: Code, bits: &[bool]) -> CodeResult<StateVector> {
    if bits.is_empty() {
        return Err(CodeError::EmptyInput);
    }
    let layout = Layout::data_only(code, bits.len());
    let mut network = Network::new();
    for (block, &one) in bits.iter().enumerate() {
        network.extend(&code.basis_encoder(one).shifted(layout.data_offset(block)));
    }
    debug!(%code, blocks = layout.blocks(), steps = network.len(), "encoding basis inputs");
    let mut state = StateVector::zero_state(layout.data_width())?;
    network.apply(&mut state)?;
    Ok(state)
}

/// Apply a logical gate to an encoded, data-only register in place.
pub fn apply_logical(code: Code, state: &mut StateVector, gate: LogicalGate) -> CodeResult<()> {
    let layout = Layout::for_width(code, state.num_qubits())?;
    let network = gate.network(&layout)?;
    debug!(%code, %gate, steps = network.len(), "applying logical gate");
    network.apply(state)?;
    Ok(())
}

/// Undo the encoding of every block in place. No correction is performed.
pub fn decode(code: Code, state: &mut StateVector) -> CodeResult<()> {
    let layout = Layout::for_width(code, state.num_qubits())?;
    let block_decoder = code.decoder();
    let mut network = Network::new();
    for block in 0..layout.blocks() {
        network.extend(&block_decoder.shifted(layout.data_offset(block)));
    }
    debug!(%code, blocks = layout.blocks(), steps = network.len(), "decoding");
    network.apply(state)?;
    Ok(())
}

/// Run the code's correction procedure on a data-only register.
///
/// The input is left untouched; the corrected register, including any
/// syndrome ancillas appended after the data, is returned as a
/// [`CorrectedState`].
pub fn correct(code: Code, state: &StateVector) -> CodeResult<CorrectedState> {
    let blocks = Layout::for_width(code, state.num_qubits())?.blocks();
    if !code.supports_correction() {
        warn!(%code, "correction requested for a code without a syndrome network");
        return Err(CodeError::CorrectionUnsupported(code));
    }

    let layout = Layout::with_ancillas(code, blocks);
    let mut network = Network::new();
    for block in 0..blocks {
        let (data, ancilla) = (layout.data_offset(block), layout.ancilla_offset(block));
        network.extend(&code.corrector(data, ancilla)?);
    }
    network.validate(layout.total_width())?;
    debug!(
        %code,
        blocks,
        ancillas = layout.ancilla_width(),
        steps = network.len(),
        "correcting"
    );

    let mut corrected = state.append_zeros(layout.ancilla_width())?;
    trace!(qubits = corrected.num_qubits(), "ancillas allocated");
    network.apply(&mut corrected)?;
    trace!("syndrome extracted and corrections applied");
    Ok(CorrectedState::new(corrected, layout))
}
