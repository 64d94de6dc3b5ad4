// Path: crates/crypto/src/lib.rs
//! # abikit Crypto Crate Lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free, and well-documented code. Panics are disallowed in non-test
//! code to promote robust error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::indexing_slicing
    )
)]
//! # abikit Cryptography
//!
//! secp256k1 recoverable signatures, the digests used around them, and the
//! in-memory keystore that signs transactions by public key.

pub mod algorithms;
pub mod error;
pub mod key_store;
pub mod sign;

pub use key_store::KeyStore;
pub use sign::k1::K1Signer;
