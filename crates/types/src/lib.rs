// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # abikit Types
//!
//! This crate is the foundational library for abikit, containing the wire
//! primitives, the ledger's domain value types, error types, and configuration
//! objects.
//!
//! ## Architectural Role
//!
//! As the base crate, `abikit-types` has minimal dependencies and is itself a
//! dependency for every other crate in the workspace. This structure prevents
//! circular dependencies and provides a single canonical definition for shared
//! types like `Name`, `Asset`, `PublicKey`, and the error enums.

/// The maximum number of bytes a single length prefix may announce when decoding.
pub const MAX_DECODE_LENGTH: usize = 32 * 1024 * 1024; // 32 MiB

/// A top-level, crate-wide `Result` type alias with a default error type.
pub type Result<T, E = crate::error::AbiError> = std::result::Result<T, E>;

/// Fixed-point currency amounts and their symbols.
pub mod asset;
/// The little-endian, varint-prefixed byte buffer codec shared by every wire format.
pub mod codec;
/// Client-side configuration (`ClientConfig`).
pub mod config;
/// A unified set of all error types used across the SDK.
pub mod error;
/// Navigation helpers for nested JSON documents.
pub mod json;
/// Public keys, private keys and signatures with their text encodings.
pub mod keys;
/// The compact 64-bit account name.
pub mod name;
/// The codec types and the error extension traits used across the workspace.
pub mod prelude;
/// Timestamp types and their ISO-8601 text forms.
pub mod time;
/// The closed, dynamically-typed input value consumed by the packer.
pub mod value;

pub use asset::{Asset, ExtendedAsset, Symbol, SymbolCode};
pub use name::Name;
pub use value::AbiValue;
