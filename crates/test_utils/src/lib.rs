// Path: crates/test_utils/src/lib.rs
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

//! # abikit Test Utilities
//!
//! Fixtures and assertions shared by the abikit test suites.

pub mod assertions;
pub mod fixtures;
pub mod randomness;

#[doc(hidden)]
pub use hex as __hex;
