// Path: crates/crypto/src/error.rs
//! Local error types for the `abikit-crypto` crate.

// Re-export the canonical error type from the API crate.
pub use abikit_api::error::CryptoError;
