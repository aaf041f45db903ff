//! `qecsim-codes`: stabilizer code encoders, decoders and correctors.
//!
//! Four codes are supported on top of the `qecsim-state` engine:
//!
//! - **Bit-flip** and **phase-flip** 3-qubit repetition codes
//! - the 9-qubit **Shor** code
//! - the 7-qubit **Steane** code
//!
//! Each code is a set of fixed gate [`Network`]s per block. [`encode`] turns
//! single-qubit inputs into an encoded register, [`correct`] runs the
//! coherent syndrome-extraction procedure and returns a [`CorrectedState`]
//! whose ancillas still have to be traced out. [`apply_logical`] runs a
//! [`LogicalGate`] on encoded blocks.
//!
//! # Quick start
//!
//! ```rust
//! use num_complex::Complex64;
//! use qecsim_codes::{Code, Pauli, correct, encode};
//! use qecsim_state::{StateVector, density};
//!
//! let psi = StateVector::from_qubit(Complex64::new(0.6, 0.0), Complex64::new(0.0, 0.8));
//! let mut encoded = encode(Code::Steane, &[&psi]).unwrap();
//! Pauli::Y.apply(&mut encoded, 5).unwrap();
//!
//! let corrected = correct(Code::Steane, &encoded).unwrap();
//! let rho = corrected.logical_density().unwrap();
//! assert!((density::fidelity(&psi, rho.view()).unwrap() - 1.0).abs() < 1e-9);
//! ```

pub mod code;
pub mod codec;
pub mod corrected;
pub mod error;
pub mod layout;
pub mod logical;
pub mod network;
pub mod noise;
pub mod repetition;
pub mod shor;
pub mod steane;

pub use code::Code;
pub use codec::{apply_logical, correct, decode, encode, encode_basis};
pub use corrected::CorrectedState;
pub use error::{CodeError, CodeResult};
pub use layout::Layout;
pub use logical::LogicalGate;
pub use network::{GateCounts, Network, Step};
pub use noise::{ErrorChannel, Pauli};
