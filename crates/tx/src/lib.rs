// Path: crates/tx/src/lib.rs
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

//! # abikit Transactions
//!
//! Assembles actions into transactions, binds them to a reference block and
//! a network id, signs their digest, and renders the packed body a node
//! accepts. Network I/O stays behind [`abikit_api::transport::ChainTransport`].

pub mod action;
pub mod chain_info;
pub mod packed;
pub mod submit;
pub mod transaction;

pub use action::{Action, PermissionLevel};
pub use chain_info::ChainInfo;
pub use packed::PackedTransaction;
pub use submit::ChainClient;
pub use transaction::{Transaction, TransactionExtension};
