//! Gate kernels operating directly on amplitude slices.
//!
//! Every kernel here shares one indexing convention: qubits are 1-based, the
//! leftmost qubit is the most significant bit, and qubit `q` of an `n`-qubit
//! state lives at bit position `n - q` of the zero-based basis index.
//!
//! A single-qubit gate `G` mixes each amplitude pair `(a, b)` (basis indices
//! differing only in the target bit, `a` having it clear) as a row vector
//! multiplied on the right:
//!
//! ```text
//! a' = G00·a + G10·b
//! b' = G01·a + G11·b
//! ```
//!
//! Each kernel validates all of its preconditions before touching the slice,
//! so a returned error always means the amplitudes are unchanged.

use ndarray::ArrayView2;
use num_complex::Complex64;

use crate::error::{StateError, StateResult};
use crate::matrices;

/// Largest width the engine will allocate (2^30 amplitudes ≈ 16 GiB).
pub const MAX_QUBITS: usize = 30;

/// Number of qubits implied by an amplitude count.
pub fn qubit_count(len: usize) -> StateResult<usize> {
    if len == 0 || !len.is_power_of_two() {
        return Err(StateError::DimensionMismatch { len });
    }
    Ok(len.trailing_zeros() as usize)
}

/// Bit position of a 1-based qubit index within an `num_qubits`-wide basis index.
pub fn bit_position(num_qubits: usize, qubit: usize) -> StateResult<usize> {
    if qubit == 0 || qubit > num_qubits {
        return Err(StateError::InvalidQubitIndex { qubit, num_qubits });
    }
    Ok(num_qubits - qubit)
}

/// Iterate over every `(i, i | 2^pos)` pair with bit `pos` of `i` clear.
///
/// Only the lower half of each pair is enumerated, so each pair is visited
/// exactly once.
fn pairs(len: usize, pos: usize) -> impl Iterator<Item = (usize, usize)> {
    let mask = 1usize << pos;
    let low = mask - 1;
    (0..len / 2).map(move |k| {
        let i = ((k & !low) << 1) | (k & low);
        (i, i | mask)
    })
}

fn check_gate_shape(gate: &ArrayView2<'_, Complex64>) -> StateResult<()> {
    let (rows, cols) = gate.dim();
    if rows != 2 || cols != 2 {
        return Err(StateError::InvalidGateShape { rows, cols });
    }
    Ok(())
}

#[inline]
fn mix(amplitudes: &mut [Complex64], i: usize, j: usize, g: &[Complex64; 4]) {
    let a = amplitudes[i];
    let b = amplitudes[j];
    amplitudes[i] = g[0] * a + g[2] * b;
    amplitudes[j] = g[1] * a + g[3] * b;
}

fn entries(gate: &ArrayView2<'_, Complex64>) -> [Complex64; 4] {
    [gate[[0, 0]], gate[[0, 1]], gate[[1, 0]], gate[[1, 1]]]
}

/// Apply an arbitrary 2×2 matrix to `qubit`.
pub fn apply_gate(
    amplitudes: &mut [Complex64],
    gate: ArrayView2<'_, Complex64>,
    qubit: usize,
) -> StateResult<()> {
    let n = qubit_count(amplitudes.len())?;
    check_gate_shape(&gate)?;
    let pos = bit_position(n, qubit)?;

    let g = entries(&gate);
    for (i, j) in pairs(amplitudes.len(), pos) {
        mix(amplitudes, i, j, &g);
    }
    Ok(())
}

/// Pauli-X on `qubit`, realised as a plain swap of each amplitude pair.
pub fn apply_x(amplitudes: &mut [Complex64], qubit: usize) -> StateResult<()> {
    let n = qubit_count(amplitudes.len())?;
    let pos = bit_position(n, qubit)?;
    for (i, j) in pairs(amplitudes.len(), pos) {
        amplitudes.swap(i, j);
    }
    Ok(())
}

/// Pauli-Z on `qubit`.
pub fn apply_z(amplitudes: &mut [Complex64], qubit: usize) -> StateResult<()> {
    apply_gate(amplitudes, matrices::pauli_z().view(), qubit)
}

/// Hadamard on `qubit`.
pub fn apply_h(amplitudes: &mut [Complex64], qubit: usize) -> StateResult<()> {
    apply_gate(amplitudes, matrices::hadamard().view(), qubit)
}

/// Pauli-Y on `qubit`, composed as `i · X(Z(x))`.
///
/// Z is applied first, then X, then the whole vector is multiplied by the
/// imaginary unit. Composition tests depend on this exact phase convention.
pub fn apply_y(amplitudes: &mut [Complex64], qubit: usize) -> StateResult<()> {
    let n = qubit_count(amplitudes.len())?;
    bit_position(n, qubit)?;

    apply_z(amplitudes, qubit)?;
    apply_x(amplitudes, qubit)?;
    scale(amplitudes, Complex64::i());
    Ok(())
}

/// CNOT: swap the `target` pair wherever the `control` bit is 1.
pub fn apply_controlled(
    amplitudes: &mut [Complex64],
    control: usize,
    target: usize,
) -> StateResult<()> {
    let n = qubit_count(amplitudes.len())?;
    let ctrl_pos = bit_position(n, control)?;
    let tgt_pos = bit_position(n, target)?;
    if control == target {
        return Err(StateError::control_target(format!(
            "control and target are both qubit {control}"
        )));
    }

    let ctrl_mask = 1usize << ctrl_pos;
    for (i, j) in pairs(amplitudes.len(), tgt_pos) {
        if i & ctrl_mask != 0 {
            amplitudes.swap(i, j);
        }
    }
    Ok(())
}

/// Apply `gate` to `target` on the basis states where every control matches
/// its required value (`true` = |1⟩).
///
/// With no controls this is exactly [`apply_gate`]. A qubit listed twice with
/// contradictory required values can never be satisfied, so the gate acts on
/// nothing.
pub fn apply_multi_controlled(
    amplitudes: &mut [Complex64],
    gate: ArrayView2<'_, Complex64>,
    target: usize,
    controls: &[usize],
    states: &[bool],
) -> StateResult<()> {
    let n = qubit_count(amplitudes.len())?;
    check_gate_shape(&gate)?;
    let tgt_pos = bit_position(n, target)?;
    if controls.len() != states.len() {
        return Err(StateError::control_target(format!(
            "{} controls but {} control states",
            controls.len(),
            states.len()
        )));
    }

    let mut ctrl_mask = 0usize;
    let mut ctrl_value = 0usize;
    let mut contradictory = false;
    for (&control, &state) in controls.iter().zip(states) {
        let bit = 1usize << bit_position(n, control)?;
        if control == target {
            return Err(StateError::control_target(format!(
                "target qubit {target} is also a control"
            )));
        }
        if ctrl_mask & bit != 0 && (ctrl_value & bit != 0) != state {
            contradictory = true;
        }
        ctrl_mask |= bit;
        if state {
            ctrl_value |= bit;
        }
    }
    if contradictory {
        return Ok(());
    }

    let g = entries(&gate);
    for (i, j) in pairs(amplitudes.len(), tgt_pos) {
        if i & ctrl_mask == ctrl_value {
            mix(amplitudes, i, j, &g);
        }
    }
    Ok(())
}

/// Multiply every amplitude by `factor`.
pub fn scale(amplitudes: &mut [Complex64], factor: Complex64) {
    for amp in amplitudes.iter_mut() {
        *amp *= factor;
    }
}
