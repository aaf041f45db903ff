//! Standard 2×2 gate matrices and small matrix helpers.
//!
//! Matrices are written in the usual textbook orientation. Note that the
//! kernels in [`crate::gates`] multiply amplitude pairs as row vectors, so a
//! non-symmetric matrix acts as its transpose would under the column-vector
//! convention.

use std::f64::consts::PI;

use ndarray::{Array2, ArrayView2, array};
use num_complex::Complex64;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Tolerance used by [`is_unitary`] when none is supplied by the caller.
pub const UNITARY_TOLERANCE: f64 = 1e-10;

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

/// Identity.
pub fn identity() -> Array2<Complex64> {
    array![[c(1.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(1.0, 0.0)]]
}

/// Pauli-X.
pub fn pauli_x() -> Array2<Complex64> {
    array![[c(0.0, 0.0), c(1.0, 0.0)], [c(1.0, 0.0), c(0.0, 0.0)]]
}

/// Pauli-Y.
pub fn pauli_y() -> Array2<Complex64> {
    array![[c(0.0, 0.0), c(0.0, -1.0)], [c(0.0, 1.0), c(0.0, 0.0)]]
}

/// Pauli-Z.
pub fn pauli_z() -> Array2<Complex64> {
    array![[c(1.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(-1.0, 0.0)]]
}

/// Hadamard.
pub fn hadamard() -> Array2<Complex64> {
    let s = std::f64::consts::FRAC_1_SQRT_2;
    array![[c(s, 0.0), c(s, 0.0)], [c(s, 0.0), c(-s, 0.0)]]
}

/// Phase gate P(λ) = diag(1, e^{iλ}).
pub fn phase(lambda: f64) -> Array2<Complex64> {
    array![
        [c(1.0, 0.0), c(0.0, 0.0)],
        [c(0.0, 0.0), Complex64::from_polar(1.0, lambda)]
    ]
}

/// S gate (sqrt(Z)).
pub fn s() -> Array2<Complex64> {
    phase(PI / 2.0)
}

/// S-dagger.
pub fn sdg() -> Array2<Complex64> {
    phase(-PI / 2.0)
}

/// T gate (fourth root of Z).
pub fn t() -> Array2<Complex64> {
    phase(PI / 4.0)
}

/// T-dagger.
pub fn tdg() -> Array2<Complex64> {
    phase(-PI / 4.0)
}

/// RX rotation.
pub fn rx(theta: f64) -> Array2<Complex64> {
    let (s, co) = (theta / 2.0).sin_cos();
    array![[c(co, 0.0), c(0.0, -s)], [c(0.0, -s), c(co, 0.0)]]
}

/// RY rotation.
pub fn ry(theta: f64) -> Array2<Complex64> {
    let (s, co) = (theta / 2.0).sin_cos();
    array![[c(co, 0.0), c(-s, 0.0)], [c(s, 0.0), c(co, 0.0)]]
}

/// RZ rotation.
pub fn rz(theta: f64) -> Array2<Complex64> {
    array![
        [Complex64::from_polar(1.0, -theta / 2.0), c(0.0, 0.0)],
        [c(0.0, 0.0), Complex64::from_polar(1.0, theta / 2.0)]
    ]
}

/// General single-qubit gate U(θ, φ, λ).
pub fn u(theta: f64, phi: f64, lambda: f64) -> Array2<Complex64> {
    let (s, co) = (theta / 2.0).sin_cos();
    array![
        [c(co, 0.0), -Complex64::from_polar(s, lambda)],
        [
            Complex64::from_polar(s, phi),
            Complex64::from_polar(co, phi + lambda)
        ]
    ]
}

/// Conjugate transpose.
pub fn dagger(m: ArrayView2<'_, Complex64>) -> Array2<Complex64> {
    m.t().mapv(|z| z.conj())
}

/// Matrix product `a · b`.
pub fn matmul(a: ArrayView2<'_, Complex64>, b: ArrayView2<'_, Complex64>) -> Array2<Complex64> {
    a.dot(&b)
}

/// Whether `m` is square and `m · m†` is the identity within `tol`.
pub fn is_unitary(m: ArrayView2<'_, Complex64>, tol: f64) -> bool {
    let (rows, cols) = m.dim();
    if rows != cols {
        return false;
    }
    let product = m.dot(&dagger(m));
    product.indexed_iter().all(|((i, j), z)| {
        let expected = if i == j { c(1.0, 0.0) } else { c(0.0, 0.0) };
        (z - expected).norm() < tol
    })
}

/// Draw a random single-qubit unitary.
///
/// The SU(2) part is Haar distributed (a uniform point on the 3-sphere read
/// as a unit quaternion); a uniform global phase is applied on top.
pub fn random_unitary<R: Rng + ?Sized>(rng: &mut R) -> Array2<Complex64> {
    let q = loop {
        let v: [f64; 4] = std::array::from_fn(|_| StandardNormal.sample(&mut *rng));
        let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm > 1e-12 {
            break v.map(|x| x / norm);
        }
    };
    let global = Complex64::from_polar(1.0, rng.gen_range(0.0..2.0 * PI));
    let alpha = c(q[0], q[1]);
    let beta = c(q[2], q[3]);
    array![
        [global * alpha, global * beta],
        [-global * beta.conj(), global * alpha.conj()]
    ]
}
