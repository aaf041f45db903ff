//! The amplitude-vector data model.

use std::fmt;

use ndarray::{ArrayBase, Data, Ix2};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{StateError, StateResult};
use crate::gates::{self, MAX_QUBITS};
use crate::matrices;

/// Default tolerance for amplitude comparisons.
pub const AMPLITUDE_TOLERANCE: f64 = 1e-10;

/// Norm drift beyond which [`StateVector::normalize`] logs a warning.
const NORM_DRIFT_WARN: f64 = 1e-6;

/// A dense statevector of `2^n` complex amplitudes.
///
/// The length is always a non-zero power of two. Normalization is not
/// enforced: non-unitary error matrices may leave the state denormalized until
/// the caller invokes [`StateVector::normalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Complex64>", into = "Vec<Complex64>")]
pub struct StateVector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl StateVector {
    /// Wrap an amplitude vector, checking that its length is a power of two.
    pub fn new(amplitudes: Vec<Complex64>) -> StateResult<Self> {
        let num_qubits = gates::qubit_count(amplitudes.len())?;
        if num_qubits > MAX_QUBITS {
            return Err(StateError::TooManyQubits {
                requested: num_qubits,
                max: MAX_QUBITS,
            });
        }
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Copy amplitudes out of a slice. The slice itself is never modified.
    pub fn from_slice(amplitudes: &[Complex64]) -> StateResult<Self> {
        gates::qubit_count(amplitudes.len())?;
        Self::new(amplitudes.to_vec())
    }

    /// The `n`-qubit state |0…0⟩.
    pub fn zero_state(num_qubits: usize) -> StateResult<Self> {
        Self::basis_state(num_qubits, 0)
    }

    /// The computational basis state with zero-based index `index`.
    pub fn basis_state(num_qubits: usize, index: usize) -> StateResult<Self> {
        check_width(num_qubits)?;
        let size = 1usize << num_qubits;
        if index >= size {
            return Err(StateError::DimensionMismatch {
                len: index.saturating_add(1),
            });
        }
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[index] = Complex64::new(1.0, 0.0);
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Single-qubit state `alpha|0⟩ + beta|1⟩`.
    pub fn from_qubit(alpha: Complex64, beta: Complex64) -> Self {
        Self {
            amplitudes: vec![alpha, beta],
            num_qubits: 1,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of amplitudes (`2^num_qubits`).
    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    /// Always false: a statevector holds at least one amplitude.
    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// Borrow the amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Amplitude of the basis state with zero-based index `index`.
    pub fn amplitude(&self, index: usize) -> Option<Complex64> {
        self.amplitudes.get(index).copied()
    }

    /// Consume the state and return its amplitudes.
    pub fn into_amplitudes(self) -> Vec<Complex64> {
        self.amplitudes
    }

    /// Σ |x_i|².
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    /// Rescale to unit norm.
    pub fn normalize(&mut self) -> StateResult<()> {
        let norm_sq = self.norm_sqr();
        if norm_sq <= f64::MIN_POSITIVE {
            return Err(StateError::ZeroNorm);
        }
        if (norm_sq - 1.0).abs() > NORM_DRIFT_WARN {
            warn!(norm_sq, "renormalizing statevector with significant norm drift");
        }
        let norm = norm_sq.sqrt();
        for amp in &mut self.amplitudes {
            *amp /= norm;
        }
        Ok(())
    }

    /// ⟨self|other⟩.
    pub fn inner(&self, other: &Self) -> StateResult<Complex64> {
        if self.len() != other.len() {
            return Err(StateError::DimensionMismatch { len: other.len() });
        }
        Ok(self
            .amplitudes
            .iter()
            .zip(&other.amplitudes)
            .map(|(a, b)| a.conj() * b)
            .sum())
    }

    /// Kronecker product `self ⊗ other`; `self` occupies the leading
    /// (most significant) qubits.
    pub fn tensor(&self, other: &Self) -> StateResult<Self> {
        let num_qubits = self.num_qubits + other.num_qubits;
        check_width(num_qubits)?;
        let mut amplitudes = Vec::with_capacity(self.len() * other.len());
        for a in &self.amplitudes {
            amplitudes.extend(other.amplitudes.iter().map(|b| a * b));
        }
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Append `count` fresh qubits in |0⟩ after the existing ones.
    pub fn append_zeros(&self, count: usize) -> StateResult<Self> {
        let num_qubits = self
            .num_qubits
            .checked_add(count)
            .ok_or(StateError::TooManyQubits {
                requested: usize::MAX,
                max: MAX_QUBITS,
            })?;
        check_width(num_qubits)?;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1usize << num_qubits];
        for (i, amp) in self.amplitudes.iter().enumerate() {
            amplitudes[i << count] = *amp;
        }
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Element-wise comparison within `tol`.
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        self.len() == other.len()
            && self
                .amplitudes
                .iter()
                .zip(&other.amplitudes)
                .all(|(a, b)| (a - b).norm() < tol)
    }

    // =========================================================================
    // Gate application
    // =========================================================================

    /// Apply an arbitrary 2×2 matrix to `qubit` (1-based).
    pub fn apply_gate<S>(&mut self, gate: &ArrayBase<S, Ix2>, qubit: usize) -> StateResult<()>
    where
        S: Data<Elem = Complex64>,
    {
        gates::apply_gate(&mut self.amplitudes, gate.view(), qubit)
    }

    /// Pauli-X.
    pub fn apply_x(&mut self, qubit: usize) -> StateResult<()> {
        gates::apply_x(&mut self.amplitudes, qubit)
    }

    /// Pauli-Y, as `i · X(Z(x))`.
    pub fn apply_y(&mut self, qubit: usize) -> StateResult<()> {
        gates::apply_y(&mut self.amplitudes, qubit)
    }

    /// Pauli-Z.
    pub fn apply_z(&mut self, qubit: usize) -> StateResult<()> {
        gates::apply_z(&mut self.amplitudes, qubit)
    }

    /// Hadamard.
    pub fn apply_h(&mut self, qubit: usize) -> StateResult<()> {
        gates::apply_h(&mut self.amplitudes, qubit)
    }

    /// S gate.
    pub fn apply_s(&mut self, qubit: usize) -> StateResult<()> {
        self.apply_gate(&matrices::s(), qubit)
    }

    /// T gate.
    pub fn apply_t(&mut self, qubit: usize) -> StateResult<()> {
        self.apply_gate(&matrices::t(), qubit)
    }

    /// CNOT.
    pub fn apply_cx(&mut self, control: usize, target: usize) -> StateResult<()> {
        gates::apply_controlled(&mut self.amplitudes, control, target)
    }

    /// Multi-controlled 2×2 gate.
    pub fn apply_mcg<S>(
        &mut self,
        gate: &ArrayBase<S, Ix2>,
        target: usize,
        controls: &[usize],
        states: &[bool],
    ) -> StateResult<()>
    where
        S: Data<Elem = Complex64>,
    {
        gates::apply_multi_controlled(&mut self.amplitudes, gate.view(), target, controls, states)
    }

    /// Multi-controlled X.
    pub fn apply_mcx(
        &mut self,
        target: usize,
        controls: &[usize],
        states: &[bool],
    ) -> StateResult<()> {
        self.apply_mcg(&matrices::pauli_x(), target, controls, states)
    }

    /// Multiply the whole vector by `factor` (global phase or rescale).
    pub fn scale(&mut self, factor: Complex64) {
        gates::scale(&mut self.amplitudes, factor);
    }

    /// Basis-state probabilities `|x_i|²`.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Render a basis index as a bitstring, qubit 1 first.
    pub fn basis_label(&self, index: usize) -> String {
        format!("{:0width$b}", index, width = self.num_qubits)
    }
}

fn check_width(num_qubits: usize) -> StateResult<()> {
    if num_qubits > MAX_QUBITS {
        return Err(StateError::TooManyQubits {
            requested: num_qubits,
            max: MAX_QUBITS,
        });
    }
    Ok(())
}

impl TryFrom<Vec<Complex64>> for StateVector {
    type Error = StateError;

    fn try_from(amplitudes: Vec<Complex64>) -> StateResult<Self> {
        Self::new(amplitudes)
    }
}

impl From<StateVector> for Vec<Complex64> {
    fn from(state: StateVector) -> Self {
        state.amplitudes
    }
}

impl AsRef<[Complex64]> for StateVector {
    fn as_ref(&self) -> &[Complex64] {
        &self.amplitudes
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            if amp.norm() < AMPLITUDE_TOLERANCE {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            first = false;
            write!(f, "({:.4}{:+.4}i)|{}⟩", amp.re, amp.im, self.basis_label(i))?;
        }
        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_initial_state() {
        let sv = StateVector::zero_state(2).unwrap();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(1.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(0.0, 0.0)));
    }

    #[test]
    fn test_hadamard() {
        let mut sv = StateVector::zero_state(1).unwrap();
        sv.apply_h(1).unwrap();

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_bell_state() {
        let mut sv = StateVector::zero_state(2).unwrap();
        sv.apply_h(1).unwrap();
        sv.apply_cx(1, 2).unwrap();

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_cx_respects_qubit_order() {
        // Control is qubit 2 (least significant): |01⟩ → |11⟩.
        let mut sv = StateVector::basis_state(2, 0b01).unwrap();
        sv.apply_cx(2, 1).unwrap();
        assert!(approx_eq(sv.amplitudes[0b11], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_new_rejects_bad_length() {
        let err = StateVector::new(vec![Complex64::new(1.0, 0.0); 6]).unwrap_err();
        assert_eq!(err, StateError::DimensionMismatch { len: 6 });
        assert!(StateVector::new(Vec::new()).is_err());
    }

    #[test]
    fn test_tensor_ordering() {
        let one = StateVector::from_qubit(Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0));
        let zero = StateVector::zero_state(1).unwrap();
        // |1⟩ ⊗ |0⟩ = |10⟩ = index 2.
        let joint = one.tensor(&zero).unwrap();
        assert!(approx_eq(joint.amplitudes[2], Complex64::new(1.0, 0.0)));
        let appended = one.append_zeros(1).unwrap();
        assert_eq!(joint, appended);
    }

    #[test]
    fn test_normalize() {
        let mut sv =
            StateVector::new(vec![Complex64::new(3.0, 0.0), Complex64::new(0.0, 4.0)]).unwrap();
        sv.normalize().unwrap();
        assert!((sv.norm_sqr() - 1.0).abs() < 1e-12);
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 0.8)));

        let mut zero = StateVector::new(vec![Complex64::new(0.0, 0.0); 2]).unwrap();
        assert_eq!(zero.normalize(), Err(StateError::ZeroNorm));
    }

    #[test]
    fn test_width_guard() {
        assert!(matches!(
            StateVector::zero_state(MAX_QUBITS + 1),
            Err(StateError::TooManyQubits { .. })
        ));
    }

    #[test]
    fn test_append_zeros_width_overflow() {
        let sv = StateVector::zero_state(1).unwrap();
        assert_eq!(
            sv.append_zeros(usize::MAX),
            Err(StateError::TooManyQubits {
                requested: usize::MAX,
                max: MAX_QUBITS
            })
        );
        assert!(matches!(
            sv.append_zeros(MAX_QUBITS),
            Err(StateError::TooManyQubits { requested, .. }) if requested == MAX_QUBITS + 1
        ));
    }

    #[test]
    fn test_basis_index_at_usize_max() {
        assert_eq!(
            StateVector::basis_state(2, usize::MAX),
            Err(StateError::DimensionMismatch { len: usize::MAX })
        );
    }

    #[test]
    fn test_display_skips_zero_amplitudes() {
        let sv = StateVector::basis_state(2, 0b10).unwrap();
        assert_eq!(sv.to_string(), "(1.0000+0.0000i)|10⟩");
    }
}
