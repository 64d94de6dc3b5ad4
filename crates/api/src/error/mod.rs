// Path: crates/api/src/error/mod.rs
// Re-export all core error types from the central types crate.
pub use abikit_types::error::{
    AbiError, CodecError, ConfigError, CryptoError, ErrorCode, TransactionError,
};
pub use abikit_types::Result;
