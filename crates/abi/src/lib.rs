// Path: crates/abi/src/lib.rs
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
#![deny(missing_docs)]

//! # abikit ABI
//!
//! Packs JSON arguments into the ledger's binary encoding, and back, driven
//! by a contract's interface schema that is only known at runtime.
//!
//! ## Layers
//!
//! - [`schema`]: the schema document and its resolved, validated form.
//! - [`scalar`]: the closed set of built-in type handlers.
//! - [`serializer`]: the recursive packer/unpacker walking a schema.
//! - [`binary`]: the schema document's own binary encoding.
//! - [`registry`]: an explicitly owned map from contract to schema.

/// The schema document's binary form.
pub mod binary;
/// Schemas shipped with the crate.
pub mod builtin;
/// The schema registry keyed by contract account.
pub mod registry;
/// Built-in scalar type handlers.
pub mod scalar;
/// The interface schema model.
pub mod schema;
/// The schema-driven value packer and unpacker.
pub mod serializer;

pub use abikit_types::error::AbiError;
pub use registry::SchemaRegistry;
pub use scalar::BuiltinType;
pub use schema::{AbiDef, Schema};
pub use serializer::AbiSerializer;
