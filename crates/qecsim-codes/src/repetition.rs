//! 3-qubit repetition codes.
//!
//! Networks are written for a single block on qubits 1..=3; see
//! [`Network::shifted`] for placing them elsewhere.

use crate::network::Network;
use crate::noise::Pauli;

/// |ψ⟩|00⟩ → α|000⟩ + β|111⟩.
pub fn bit_flip_encoder() -> Network {
    let mut net = Network::new();
    net.cx(1, 2).cx(1, 3);
    net
}

/// Uncompute the bit-flip encoding. Performs no correction.
pub fn bit_flip_decoder() -> Network {
    bit_flip_encoder().reversed()
}

/// Syndrome extraction and correction for one bit-flip block.
///
/// Data qubits are `data + 1..=data + 3`, syndrome ancillas `ancilla + 1` and
/// `ancilla + 2`, which must start in |0⟩. The ancillas are left holding the
/// syndrome; nothing measures them.
pub fn bit_flip_corrector(data: usize, ancilla: usize) -> Network {
    let (q1, q2, q3) = (data + 1, data + 2, data + 3);
    let (a1, a2) = (ancilla + 1, ancilla + 2);

    let mut net = Network::new();
    // a1 = q1 ⊕ q2, a2 = q2 ⊕ q3
    net.cx(q1, a1).cx(q2, a1).cx(q2, a2).cx(q3, a2);
    net.mcx(q1, &[(a1, true), (a2, false)])
        .mcx(q2, &[(a1, true), (a2, true)])
        .mcx(q3, &[(a1, false), (a2, true)]);
    net
}

/// Logical Pauli for the bit-flip code: transversal X and transversal Z.
/// Y is realized as Z then X.
pub fn bit_flip_logical(pauli: Pauli) -> Network {
    let mut net = Network::new();
    if matches!(pauli, Pauli::Z | Pauli::Y) {
        net.z(1).z(2).z(3);
    }
    if matches!(pauli, Pauli::X | Pauli::Y) {
        net.x(1).x(2).x(3);
    }
    net
}

/// The bit-flip network followed by H on qubit 1 and two H on qubit 2.
///
/// The double Hadamard is kept as recorded so that gate counts line up with
/// reference traces; its net effect is the identity.
pub fn phase_flip_encoder() -> Network {
    let mut net = bit_flip_encoder();
    net.h(1).h(2).h(2);
    net
}

/// Inverse of [`phase_flip_encoder`].
pub fn phase_flip_decoder() -> Network {
    phase_flip_encoder().reversed()
}

/// Logical Pauli for the phase-flip code as encoded by
/// [`phase_flip_encoder`], whose codewords are |+00⟩ and |−11⟩.
///
/// Logical Z is X on qubit 1; logical X is Z on qubit 1 with X on qubits 2
/// and 3. Y is realized as Z then X.
pub fn phase_flip_logical(pauli: Pauli) -> Network {
    let mut net = Network::new();
    if matches!(pauli, Pauli::Z | Pauli::Y) {
        net.x(1);
    }
    if matches!(pauli, Pauli::X | Pauli::Y) {
        net.z(1).x(2).x(3);
    }
    net
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;
    use qecsim_state::StateVector;

    #[test]
    fn test_bit_flip_encodes_one() {
        let mut sv = StateVector::basis_state(3, 0b100).unwrap();
        bit_flip_encoder().apply(&mut sv).unwrap();
        assert_eq!(sv.amplitude(0b111), Some(Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_bit_flip_logical_x_maps_codewords() {
        let mut sv = StateVector::zero_state(3).unwrap();
        bit_flip_logical(Pauli::X).apply(&mut sv).unwrap();
        assert_eq!(sv.amplitude(0b111), Some(Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_phase_flip_logical_z_fixes_zero_codeword() {
        let mut sv = StateVector::zero_state(3).unwrap();
        phase_flip_encoder().apply(&mut sv).unwrap();
        let before = sv.clone();
        phase_flip_logical(Pauli::Z).apply(&mut sv).unwrap();
        assert!(sv.approx_eq(&before, 1e-12));
    }

    #[test]
    fn test_phase_flip_gate_counts() {
        let counts = phase_flip_encoder().counts();
        assert_eq!(counts.cx, 2);
        assert_eq!(counts.h, 3);
    }

    #[test]
    fn test_corrector_fixes_each_flip() {
        for flipped in 1..=3 {
            let mut sv = StateVector::basis_state(3, 0b111).unwrap();
            sv.apply_x(flipped).unwrap();
            let mut sv = sv.append_zeros(2).unwrap();
            bit_flip_corrector(0, 3).apply(&mut sv).unwrap();
            let data = sv
                .probabilities()
                .iter()
                .enumerate()
                .filter(|(_, p)| **p > 0.5)
                .map(|(i, _)| i >> 2)
                .collect::<Vec<_>>();
            assert_eq!(data, vec![0b111], "flip on qubit {flipped}");
        }
    }
}
