//! CLI command implementations.

pub mod info;
pub mod verify;
pub mod version;
