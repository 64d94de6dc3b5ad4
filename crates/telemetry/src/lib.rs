// Path: crates/telemetry/src/lib.rs
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

//! # abikit Telemetry
//!
//! Installs the process-wide structured logger. The library crates only emit
//! `tracing` events (and `log` records, from the keystore); an application
//! calls [`init_tracing`] once at startup to see them.

/// The initialization routine for global structured logging.
pub mod init;

pub use init::{init_tracing, init_tracing_with_filter};
