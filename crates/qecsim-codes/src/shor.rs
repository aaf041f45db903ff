//! The 9-qubit Shor code.
//!
//! An outer phase-flip code across the triple heads 1, 4, 7 with an inner
//! bit-flip code inside each triple. Correction runs in place on the data
//! qubits: each triple is decoded onto its head and majority-corrected by a
//! Toffoli, then the heads are rotated back with H and the same treatment is
//! applied across them. The logical state finishes on qubit 1 and the other
//! eight qubits hold the syndrome.
//!
//! The logical Paulis are transversal with the roles swapped: Z on every
//! qubit is logical X and X on every qubit is logical Z. Transversal CNOT is
//! logical CNOT in the opposite direction.

use crate::network::Network;
use crate::noise::Pauli;

/// Heads of the three inner triples.
pub const HEADS: [usize; 3] = [1, 4, 7];

/// Encode qubit 1 of a 9-qubit block whose qubits 2..=9 are |0⟩.
pub fn encoder() -> Network {
    let mut net = Network::new();
    net.cx(1, 4).cx(1, 7);
    for h in HEADS {
        net.h(h);
    }
    for h in HEADS {
        net.cx(h, h + 1).cx(h, h + 2);
    }
    net
}

/// Inverse of [`encoder`]; performs no correction.
pub fn decoder() -> Network {
    encoder().reversed()
}

/// Logical Pauli on qubits 1..=9. Y is realized as logical Z then logical X,
/// equal to Y up to a global phase.
pub fn logical(pauli: Pauli) -> Network {
    let mut net = Network::new();
    if matches!(pauli, Pauli::Z | Pauli::Y) {
        for q in 1..=9 {
            net.x(q);
        }
    }
    if matches!(pauli, Pauli::X | Pauli::Y) {
        for q in 1..=9 {
            net.z(q);
        }
    }
    net
}

/// Logical CNOT between the blocks starting after `control` and `target`.
pub fn logical_cx(control: usize, target: usize) -> Network {
    let mut net = Network::new();
    for q in 1..=9 {
        net.cx(target + q, control + q);
    }
    net
}

/// In-place correction for the block on qubits `data + 1..=data + 9`.
pub fn corrector(data: usize) -> Network {
    let mut net = Network::new();
    for h in HEADS.map(|h| h + data) {
        majority(&mut net, h, h + 1, h + 2);
    }
    for h in HEADS {
        net.h(h + data);
    }
    majority(&mut net, data + 1, data + 4, data + 7);
    net
}

/// Decode a 3-qubit repetition onto `head` and flip it when both siblings
/// report a disagreement.
fn majority(net: &mut Network, head: usize, first: usize, second: usize) {
    net.cx(head, second)
        .cx(head, first)
        .mcx(head, &[(first, true), (second, true)]);
}
