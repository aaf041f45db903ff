//! Density matrices, partial trace and pure-state extraction.
//!
//! Density matrices use the same basis ordering as [`StateVector`]: row and
//! column `i` correspond to basis index `i`, qubit 1 most significant. The
//! reduced matrix produced by [`partial_trace`] keeps the surviving qubits in
//! their original relative order.

use ndarray::{Array2, ArrayView2};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{StateError, StateResult};
use crate::gates::{bit_position, qubit_count};
use crate::statevector::StateVector;

/// An `N×N` complex density matrix.
pub type DensityMatrix = Array2<Complex64>;

/// Default window around 1 for the dominant eigenvalue.
pub const DEFAULT_TOLERANCE: f64 = 1e-5;

/// Numeric settings for density → state conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityConfig {
    /// Accept an eigenvalue `λ` as dominant when `|λ - 1| < tolerance`.
    pub tolerance: f64,
    /// Power-iteration cap.
    pub max_iterations: usize,
    /// Stop iterating once successive eigenvector estimates differ by less
    /// than this (in 2-norm).
    pub convergence: f64,
}

impl Default for DensityConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: 500,
            convergence: 1e-12,
        }
    }
}

impl DensityConfig {
    /// Override the eigenvalue tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Check that tolerances are finite and positive.
    pub fn validate(&self) -> StateResult<()> {
        for tol in [self.tolerance, self.convergence] {
            if !tol.is_finite() || tol <= 0.0 {
                return Err(StateError::InvalidTolerance(tol));
            }
        }
        Ok(())
    }
}

/// ρ = x x†.
pub fn to_density_matrix(state: &StateVector) -> DensityMatrix {
    let x = state.amplitudes();
    Array2::from_shape_fn((x.len(), x.len()), |(i, j)| x[i] * x[j].conj())
}

/// Recover a pure state from `rho` using the default settings and the given
/// eigenvalue tolerance.
pub fn to_state_vector(rho: ArrayView2<'_, Complex64>, tolerance: f64) -> StateResult<StateVector> {
    to_state_vector_with(rho, &DensityConfig::default().with_tolerance(tolerance))
}

/// Recover a pure state from `rho`: the eigenvector of its dominant
/// eigenvalue, accepted only if that eigenvalue is within tolerance of 1.
///
/// Only the dominant eigenvalue is tested. The eigenvalues of a density
/// matrix lie in `[0, 1]`, so a near-unit eigenvalue is necessarily the
/// largest one. A malformed input with an eigenvalue above 1 is rejected
/// even if it also has a unit eigenvalue. Fails with
/// [`StateError::NoDominantEigenvalue`] for mixed or malformed inputs.
///
/// The returned vector is normalized and its largest-magnitude amplitude is
/// real and positive.
pub fn to_state_vector_with(
    rho: ArrayView2<'_, Complex64>,
    config: &DensityConfig,
) -> StateResult<StateVector> {
    config.validate()?;
    let dim = square_dimension(&rho)?;

    // Seed with the column of the largest diagonal entry: for a pure state
    // that column is already parallel to the eigenvector.
    let (seed, seed_weight) = (0..dim)
        .map(|j| (j, rho[[j, j]].re))
        .fold((0, f64::NEG_INFINITY), |best, cur| {
            if cur.1 > best.1 { cur } else { best }
        });
    if seed_weight <= 0.0 {
        return Err(StateError::NoDominantEigenvalue {
            largest: 0.0,
            tolerance: config.tolerance,
        });
    }

    let mut v: Vec<Complex64> = rho.column(seed).to_vec();
    if normalize_in_place(&mut v) == 0.0 {
        return Err(StateError::NoDominantEigenvalue {
            largest: 0.0,
            tolerance: config.tolerance,
        });
    }

    let mut iterations = 0;
    while iterations < config.max_iterations {
        iterations += 1;
        let mut w = mat_vec(&rho, &v);
        if normalize_in_place(&mut w) == 0.0 {
            break;
        }
        let delta: f64 = w
            .iter()
            .zip(&v)
            .map(|(a, b)| (a - b).norm_sqr())
            .sum::<f64>()
            .sqrt();
        v = w;
        if delta < config.convergence {
            break;
        }
    }

    let rv = mat_vec(&rho, &v);
    let largest: f64 = v.iter().zip(&rv).map(|(a, b)| (a.conj() * b).re).sum();
    trace!(iterations, largest, "power iteration finished");

    if (largest - 1.0).abs() >= config.tolerance {
        return Err(StateError::NoDominantEigenvalue {
            largest,
            tolerance: config.tolerance,
        });
    }

    fix_global_phase(&mut v);
    StateVector::new(v)
}

/// Input accepted by [`partial_trace`].
#[derive(Debug, Clone, Copy)]
pub enum TraceInput<'a> {
    /// A pure state, promoted to ρ = x x†.
    State(&'a StateVector),
    /// Raw amplitudes of a pure state.
    Amplitudes(&'a [Complex64]),
    /// Either a density matrix (`N×N`) or a column vector (`N×1`).
    Matrix(ArrayView2<'a, Complex64>),
}

impl<'a> From<&'a StateVector> for TraceInput<'a> {
    fn from(state: &'a StateVector) -> Self {
        Self::State(state)
    }
}

impl<'a> From<&'a [Complex64]> for TraceInput<'a> {
    fn from(amplitudes: &'a [Complex64]) -> Self {
        Self::Amplitudes(amplitudes)
    }
}

impl<'a> From<ArrayView2<'a, Complex64>> for TraceInput<'a> {
    fn from(matrix: ArrayView2<'a, Complex64>) -> Self {
        Self::Matrix(matrix)
    }
}

impl<'a> From<&'a DensityMatrix> for TraceInput<'a> {
    fn from(matrix: &'a DensityMatrix) -> Self {
        Self::Matrix(matrix.view())
    }
}

enum Resolved<'a> {
    Pure(std::borrow::Cow<'a, [Complex64]>),
    Mixed(ArrayView2<'a, Complex64>),
}

impl<'a> Resolved<'a> {
    fn resolve(input: TraceInput<'a>) -> StateResult<(Self, usize)> {
        match input {
            TraceInput::State(state) => Ok((
                Self::Pure(state.amplitudes().into()),
                state.num_qubits(),
            )),
            TraceInput::Amplitudes(amps) => {
                let n = qubit_count(amps.len())?;
                Ok((Self::Pure(amps.into()), n))
            }
            TraceInput::Matrix(m) => {
                let (rows, cols) = m.dim();
                if cols == 1 {
                    let n = qubit_count(rows)?;
                    Ok((Self::Pure(m.column(0).to_vec().into()), n))
                } else {
                    let dim = square_dimension(&m)?;
                    Ok((Self::Mixed(m), qubit_count(dim)?))
                }
            }
        }
    }
}

/// Trace out `traced` (1-based qubit indices; order and repeats are
/// irrelevant) and return the reduced density matrix over the remaining
/// qubits.
///
/// Tracing out nothing reproduces [`to_density_matrix`] exactly; tracing out
/// every qubit yields the 1×1 matrix holding the squared norm.
pub fn partial_trace<'a>(
    input: impl Into<TraceInput<'a>>,
    traced: &[usize],
) -> StateResult<DensityMatrix> {
    let (resolved, n) = Resolved::resolve(input.into())?;

    let mut traced_set = Vec::with_capacity(traced.len());
    for &q in traced {
        bit_position(n, q)?;
        traced_set.push(q);
    }
    traced_set.sort_unstable();
    traced_set.dedup();
    let kept: Vec<usize> = (1..=n).filter(|q| traced_set.binary_search(q).is_err()).collect();

    debug!(
        num_qubits = n,
        kept = kept.len(),
        traced = traced_set.len(),
        "computing partial trace"
    );

    let kept_offsets = scatter_table(n, &kept);
    let traced_offsets = scatter_table(n, &traced_set);
    let dim = kept_offsets.len();

    let reduced = match resolved {
        Resolved::Pure(x) => Array2::from_shape_fn((dim, dim), |(a, b)| {
            let (ra, rb) = (kept_offsets[a], kept_offsets[b]);
            traced_offsets
                .iter()
                .fold(Complex64::new(0.0, 0.0), |acc, &t| {
                    acc + x[ra | t] * x[rb | t].conj()
                })
        }),
        Resolved::Mixed(rho) => Array2::from_shape_fn((dim, dim), |(a, b)| {
            let (ra, rb) = (kept_offsets[a], kept_offsets[b]);
            traced_offsets
                .iter()
                .fold(Complex64::new(0.0, 0.0), |acc, &t| acc + rho[[ra | t, rb | t]])
        }),
    };
    Ok(reduced)
}

/// ⟨ψ|ρ|ψ⟩, the fidelity of a mixed state against a pure reference.
pub fn fidelity(reference: &StateVector, rho: ArrayView2<'_, Complex64>) -> StateResult<f64> {
    let dim = square_dimension(&rho)?;
    if dim != reference.len() {
        return Err(StateError::DimensionMismatch { len: dim });
    }
    let psi = reference.amplitudes();
    let rho_psi = mat_vec(&rho, psi);
    Ok(psi
        .iter()
        .zip(&rho_psi)
        .map(|(a, b)| a.conj() * b)
        .sum::<Complex64>()
        .re)
}

/// Tr(ρ²); 1 for pure states.
pub fn purity(rho: ArrayView2<'_, Complex64>) -> StateResult<f64> {
    square_dimension(&rho)?;
    Ok(rho.dot(&rho).diag().iter().map(|z| z.re).sum())
}

/// Tr(ρ).
pub fn trace_of(rho: ArrayView2<'_, Complex64>) -> StateResult<Complex64> {
    square_dimension(&rho)?;
    Ok(rho.diag().sum())
}

/// Element-wise comparison within `tol`.
pub fn matrices_approx_eq(
    a: ArrayView2<'_, Complex64>,
    b: ArrayView2<'_, Complex64>,
    tol: f64,
) -> bool {
    a.dim() == b.dim() && a.iter().zip(b.iter()).all(|(x, y)| (x - y).norm() < tol)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn square_dimension(m: &ArrayView2<'_, Complex64>) -> StateResult<usize> {
    let (rows, cols) = m.dim();
    if rows != cols {
        return Err(StateError::NotSquare { rows, cols });
    }
    qubit_count(rows)?;
    Ok(rows)
}

/// Full basis-index contribution of every assignment to `qubits`.
///
/// Entry `v` sets bit `j` of `v` (counted from the most significant of
/// `qubits.len()` bits) onto the bit position of `qubits[j]`.
fn scatter_table(num_qubits: usize, qubits: &[usize]) -> Vec<usize> {
    let width = qubits.len();
    let positions: Vec<usize> = qubits.iter().map(|&q| num_qubits - q).collect();
    (0..1usize << width)
        .map(|v| {
            positions
                .iter()
                .enumerate()
                .fold(0usize, |acc, (j, &pos)| {
                    acc | (((v >> (width - 1 - j)) & 1) << pos)
                })
        })
        .collect()
}

fn mat_vec(m: &ArrayView2<'_, Complex64>, v: &[Complex64]) -> Vec<Complex64> {
    m.rows()
        .into_iter()
        .map(|row| row.iter().zip(v).map(|(a, b)| a * b).sum())
        .collect()
}

/// Normalize `v` and return its previous norm (0 when `v` vanishes).
fn normalize_in_place(v: &mut [Complex64]) -> f64 {
    let norm = v.iter().map(Complex64::norm_sqr).sum::<f64>().sqrt();
    if norm > f64::MIN_POSITIVE {
        for z in v.iter_mut() {
            *z /= norm;
        }
        norm
    } else {
        0.0
    }
}

fn fix_global_phase(v: &mut [Complex64]) {
    let pivot = v
        .iter()
        .copied()
        .fold(Complex64::new(0.0, 0.0), |best, z| {
            if z.norm() > best.norm() { z } else { best }
        });
    let magnitude = pivot.norm();
    if magnitude > 0.0 {
        let phase = pivot.conj() / magnitude;
        for z in v.iter_mut() {
            *z *= phase;
        }
    }
}
