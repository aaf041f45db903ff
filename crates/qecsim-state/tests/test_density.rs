//! Tests for density-matrix conversion and partial trace.

use ndarray::{Array2, array};
use num_complex::Complex64;
use qecsim_state::density::{
    self, DensityConfig, matrices_approx_eq, partial_trace, to_density_matrix, to_state_vector,
};
use qecsim_state::{StateError, StateVector};

const TOL: f64 = 1e-10;

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

fn ghz(n: usize) -> StateVector {
    let mut sv = StateVector::zero_state(n).unwrap();
    sv.apply_h(1).unwrap();
    for q in 2..=n {
        sv.apply_cx(1, q).unwrap();
    }
    sv
}

// ----------------------------------------------------------------------
// State ↔ density conversion
// ----------------------------------------------------------------------

#[test]
fn test_density_of_plus_state() {
    let mut plus = StateVector::zero_state(1).unwrap();
    plus.apply_h(1).unwrap();
    let rho = to_density_matrix(&plus);
    let expected = array![[c(0.5, 0.0), c(0.5, 0.0)], [c(0.5, 0.0), c(0.5, 0.0)]];
    assert!(matrices_approx_eq(rho.view(), expected.view(), TOL));
}

#[test]
fn test_state_round_trip_up_to_phase() {
    let mut sv =
        StateVector::new(vec![c(0.0, 0.6), c(0.0, 0.0), c(0.8, 0.0), c(0.0, 0.0)]).unwrap();
    sv.apply_h(2).unwrap();
    let rho = to_density_matrix(&sv);
    let recovered = to_state_vector(rho.view(), 1e-5).unwrap();

    // Same projector, largest amplitude real and positive.
    assert!(matrices_approx_eq(to_density_matrix(&recovered).view(), rho.view(), 1e-9));
    let overlap = sv.inner(&recovered).unwrap();
    assert!((overlap.norm() - 1.0).abs() < 1e-9);
    let pivot = recovered
        .amplitudes()
        .iter()
        .copied()
        .max_by(|a, b| a.norm().total_cmp(&b.norm()))
        .unwrap();
    assert!(pivot.im.abs() < 1e-12 && pivot.re > 0.0);
}

#[test]
fn test_mixed_state_has_no_dominant_eigenvalue() {
    let rho = array![[c(0.5, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(0.5, 0.0)]];
    let err = to_state_vector(rho.view(), 1e-5).unwrap_err();
    match err {
        StateError::NoDominantEigenvalue { largest, tolerance } => {
            assert!((largest - 0.5).abs() < 1e-9);
            assert_eq!(tolerance, 1e-5);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_only_the_dominant_eigenvalue_is_tested() {
    // Has a unit eigenvalue, but 2 dominates.
    let rho = array![[c(2.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(1.0, 0.0)]];
    match to_state_vector(rho.view(), 1e-5) {
        Err(StateError::NoDominantEigenvalue { largest, .. }) => {
            assert!((largest - 2.0).abs() < 1e-9);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_to_state_vector_rejects_bad_shapes() {
    let rect = Array2::<Complex64>::zeros((2, 4));
    assert_eq!(
        to_state_vector(rect.view(), 1e-5),
        Err(StateError::NotSquare { rows: 2, cols: 4 })
    );
    let odd = Array2::<Complex64>::zeros((3, 3));
    assert_eq!(
        to_state_vector(odd.view(), 1e-5),
        Err(StateError::DimensionMismatch { len: 3 })
    );
    let zero = Array2::<Complex64>::zeros((2, 2));
    assert!(matches!(
        to_state_vector(zero.view(), 1e-5),
        Err(StateError::NoDominantEigenvalue { .. })
    ));
    let rho = to_density_matrix(&StateVector::zero_state(1).unwrap());
    assert_eq!(
        to_state_vector(rho.view(), -1.0),
        Err(StateError::InvalidTolerance(-1.0))
    );
}

#[test]
fn test_custom_config_is_honoured() {
    let rho = to_density_matrix(&ghz(3));
    let config = DensityConfig {
        max_iterations: 3,
        ..DensityConfig::default()
    };
    let sv = density::to_state_vector_with(rho.view(), &config).unwrap();
    assert!(sv.approx_eq(&ghz(3), 1e-9));
}

// ----------------------------------------------------------------------
// Partial trace
// ----------------------------------------------------------------------

#[test]
fn test_trace_nothing_equals_density_matrix() {
    let sv = ghz(3);
    let traced = partial_trace(&sv, &[]).unwrap();
    assert_eq!(traced, to_density_matrix(&sv));
}

#[test]
fn test_trace_everything_leaves_norm() {
    let sv = ghz(3);
    let traced = partial_trace(&sv, &[1, 2, 3]).unwrap();
    assert_eq!(traced.dim(), (1, 1));
    assert!((traced[[0, 0]] - c(1.0, 0.0)).norm() < TOL);
}

#[test]
fn test_product_state_trace_recovers_factor() {
    // |ψ⟩ ⊗ |1⟩ ⊗ |+⟩: tracing qubits 2 and 3 yields |ψ⟩⟨ψ|.
    let psi = StateVector::from_qubit(c(0.6, 0.0), c(0.0, 0.8));
    let one = StateVector::from_qubit(c(0.0, 0.0), c(1.0, 0.0));
    let mut plus = StateVector::zero_state(1).unwrap();
    plus.apply_h(1).unwrap();
    let joint = psi.tensor(&one).unwrap().tensor(&plus).unwrap();

    let reduced = partial_trace(&joint, &[3, 2]).unwrap();
    assert!(matrices_approx_eq(reduced.view(), to_density_matrix(&psi).view(), TOL));

    // Tracing a leading qubit keeps the others in order: |1⟩ ⊗ |+⟩.
    let reduced = partial_trace(&joint, &[1]).unwrap();
    let expected = to_density_matrix(&one.tensor(&plus).unwrap());
    assert!(matrices_approx_eq(reduced.view(), expected.view(), TOL));
}

#[test]
fn test_duplicate_traced_qubits_are_a_set() {
    let sv = ghz(3);
    let once = partial_trace(&sv, &[2, 3]).unwrap();
    let twice = partial_trace(&sv, &[3, 2, 3]).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_bell_half_is_maximally_mixed() {
    let reduced = partial_trace(&ghz(2), &[1]).unwrap();
    let expected = array![[c(0.5, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(0.5, 0.0)]];
    assert!(matrices_approx_eq(reduced.view(), expected.view(), TOL));
    assert!((density::purity(reduced.view()).unwrap() - 0.5).abs() < TOL);
}

#[test]
fn test_pure_and_density_inputs_agree() {
    let mut sv = ghz(3);
    sv.apply_gate(&qecsim_state::matrices::ry(0.7), 2).unwrap();
    let rho = to_density_matrix(&sv);
    let from_state = partial_trace(&sv, &[2]).unwrap();
    let from_rho = partial_trace(&rho, &[2]).unwrap();
    assert!(matrices_approx_eq(from_state.view(), from_rho.view(), TOL));

    let column = Array2::from_shape_vec((8, 1), sv.amplitudes().to_vec()).unwrap();
    let from_column = partial_trace(column.view(), &[2]).unwrap();
    assert!(matrices_approx_eq(from_state.view(), from_column.view(), TOL));

    let from_slice = partial_trace(sv.amplitudes(), &[2]).unwrap();
    assert_eq!(from_slice, from_state);
}

#[test]
fn test_partial_trace_errors() {
    let sv = ghz(2);
    assert_eq!(
        partial_trace(&sv, &[3]),
        Err(StateError::InvalidQubitIndex { qubit: 3, num_qubits: 2 })
    );
    assert_eq!(
        partial_trace(&sv, &[0]),
        Err(StateError::InvalidQubitIndex { qubit: 0, num_qubits: 2 })
    );
    let rect = Array2::<Complex64>::zeros((4, 2));
    assert_eq!(
        partial_trace(rect.view(), &[1]),
        Err(StateError::NotSquare { rows: 4, cols: 2 })
    );
    let amps = [c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0)];
    assert_eq!(
        partial_trace(&amps[..], &[1]),
        Err(StateError::DimensionMismatch { len: 3 })
    );
}

// ----------------------------------------------------------------------
// Fidelity and purity
// ----------------------------------------------------------------------

#[test]
fn test_fidelity() {
    let zero = StateVector::zero_state(1).unwrap();
    let mut plus = zero.clone();
    plus.apply_h(1).unwrap();

    let rho_zero = to_density_matrix(&zero);
    assert!((density::fidelity(&zero, rho_zero.view()).unwrap() - 1.0).abs() < TOL);
    assert!((density::fidelity(&plus, rho_zero.view()).unwrap() - 0.5).abs() < TOL);

    let rho_two = to_density_matrix(&ghz(2));
    assert_eq!(
        density::fidelity(&zero, rho_two.view()),
        Err(StateError::DimensionMismatch { len: 4 })
    );
}

#[test]
fn test_purity_and_trace_of_pure_state() {
    let rho = to_density_matrix(&ghz(3));
    assert!((density::purity(rho.view()).unwrap() - 1.0).abs() < TOL);
    assert!((density::trace_of(rho.view()).unwrap() - c(1.0, 0.0)).norm() < TOL);
}
