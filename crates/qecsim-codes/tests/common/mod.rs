//! Fixtures shared by the code integration tests.

#![allow(dead_code)]

use ndarray::ArrayView2;
use num_complex::Complex64;
use qecsim_state::{StateVector, density};

pub const TOL: f64 = 1e-9;

pub fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

/// |0⟩, |1⟩, |+⟩, |−⟩ and one state off every axis.
pub fn inputs() -> Vec<(&'static str, StateVector)> {
    let s = std::f64::consts::FRAC_1_SQRT_2;
    vec![
        ("|0>", StateVector::from_qubit(c(1.0, 0.0), c(0.0, 0.0))),
        ("|1>", StateVector::from_qubit(c(0.0, 0.0), c(1.0, 0.0))),
        ("|+>", StateVector::from_qubit(c(s, 0.0), c(s, 0.0))),
        ("|->", StateVector::from_qubit(c(s, 0.0), c(-s, 0.0))),
        ("psi", StateVector::from_qubit(c(0.6, 0.0), c(0.48, 0.64))),
    ]
}

pub fn plus() -> StateVector {
    let s = std::f64::consts::FRAC_1_SQRT_2;
    StateVector::from_qubit(c(s, 0.0), c(s, 0.0))
}

pub fn assert_fidelity_one(reference: &StateVector, rho: ArrayView2<'_, Complex64>, context: &str) {
    let f = density::fidelity(reference, rho).unwrap();
    assert!((f - 1.0).abs() < TOL, "{context}: fidelity {f}");
}
