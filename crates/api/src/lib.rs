// Path: crates/api/src/lib.rs

//! # abikit API Crate Lints
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
        clippy::todo,
        clippy::unimplemented,
        clippy::indexing_slicing
    )
)]
#![deny(missing_docs)]
//! # abikit API
//!
//! The traits other crates program against. Concrete signing lives in
//! `abikit-crypto`; a network client lives outside this workspace and only
//! has to implement [`transport::ChainTransport`].

/// The signing and key-lookup capabilities.
pub mod crypto;
/// Re-exports all core error types from the central `abikit-types` crate.
pub mod error;
/// The boundary to a remote ledger node.
pub mod transport;

/// A curated set of the most commonly used traits and types.
pub mod prelude {
    pub use crate::crypto::{KeyProvider, Signer};
    pub use crate::error::{AbiError, CryptoError, ErrorCode, TransactionError};
    pub use crate::transport::ChainTransport;
}
