// Path: crates/types/src/prelude.rs

//! A curated set of commonly used traits and types.

use crate::error::AbiError;

pub use crate::codec::{Decoder, Encoder};
pub use crate::error::ErrorCode;

/// Annotates an `AbiError` with the location it surfaced at, without
/// changing its classification.
pub trait AbiResultExt<T> {
    /// Wraps the error, building the annotation lazily.
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T, AbiError>;
}

impl<T, E: Into<AbiError>> AbiResultExt<T> for Result<T, E> {
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T, AbiError> {
        self.map_err(|e| e.into().context(f()))
    }
}
