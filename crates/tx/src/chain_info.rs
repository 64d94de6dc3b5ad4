// Path: crates/tx/src/chain_info.rs

//! The node status a transaction is built against.

use abikit_types::error::TransactionError;
use abikit_types::time::{TimePoint, TimePointSec};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A node's `get_info` response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChainInfo {
    /// Short build hash of the node software.
    #[serde(default)]
    pub server_version: String,
    /// The network id as hex.
    pub chain_id: String,
    /// The newest block the node has applied.
    pub head_block_num: u32,
    /// The newest block that can no longer be forked out.
    pub last_irreversible_block_num: u32,
    /// The id of that block; transactions reference it.
    pub last_irreversible_block_id: String,
    /// The id of the head block.
    #[serde(default)]
    pub head_block_id: String,
    /// When the head block was produced; the base for expirations.
    #[serde(default)]
    pub head_block_time: TimePoint,
    /// The producer of the head block.
    #[serde(default)]
    pub head_block_producer: String,
    /// Elastic CPU limit per block, in microseconds.
    #[serde(default)]
    pub virtual_block_cpu_limit: u64,
    /// Elastic net limit per block, in bytes.
    #[serde(default)]
    pub virtual_block_net_limit: u64,
    /// Hard CPU limit per block.
    #[serde(default)]
    pub block_cpu_limit: u64,
    /// Hard net limit per block.
    #[serde(default)]
    pub block_net_limit: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Release tag of the node software.
    pub server_version_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Head of the node's fork database.
    pub fork_db_head_block_num: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Id of the fork database head.
    pub fork_db_head_block_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Release tag with build metadata.
    pub server_full_version_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// When the last irreversible block was produced.
    pub last_irreversible_block_time: Option<TimePoint>,
}

impl ChainInfo {
    /// Parses a `get_info` response body.
    pub fn from_value(value: Value) -> Result<Self, TransactionError> {
        serde_json::from_value(value)
            .map_err(|e| TransactionError::Transport(format!("malformed get_info response: {e}")))
    }

    /// The block new transactions should reference: the last irreversible one.
    pub fn reference_block(&self) -> &str {
        &self.last_irreversible_block_id
    }

    /// The head block time in whole seconds, or `None` if the node did not
    /// report a usable one.
    pub fn head_block_time_sec(&self) -> Option<TimePointSec> {
        let secs = self.head_block_time.micros().div_euclid(1_000_000);
        u32::try_from(secs)
            .ok()
            .filter(|secs| *secs > 0)
            .map(TimePointSec::from_secs)
    }
}
