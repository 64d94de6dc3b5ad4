// Path: crates/api/src/transport/mod.rs
//! The boundary to a remote ledger node.
//!
//! abikit never performs network I/O itself. A client implements this trait
//! over whatever HTTP stack it uses, owning timeouts and retries, and hands
//! it to the helpers in `abikit-tx` that build request bodies and interpret
//! responses.

use crate::error::TransactionError;
use serde_json::Value;

/// Calls into a node's chain API.
pub trait ChainTransport {
    /// `GET /v1/chain/get_info`.
    fn get_info(&self) -> Result<Value, TransactionError>;

    /// `POST /v1/chain/get_required_keys`: which of `available_keys` must
    /// sign the unsigned transaction in `body`.
    fn get_required_keys(&self, body: &Value) -> Result<Value, TransactionError>;

    /// `POST /v1/chain/push_transaction` with a packed, signed transaction body.
    fn push_transaction(&self, body: &Value) -> Result<Value, TransactionError>;
}
