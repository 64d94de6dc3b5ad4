// Path: crates/tx/src/submit/mod.rs

//! Request bodies and response handling around a [`ChainTransport`].
//!
//! The flow for one action is: fetch chain info, reference the last
//! irreversible block, ask the node which of the held keys must sign, sign
//! with each, then push the packed body.

use crate::action::{Action, PermissionLevel};
use crate::chain_info::ChainInfo;
use crate::packed::PackedTransaction;
use crate::transaction::Transaction;
use abikit_abi::SchemaRegistry;
use abikit_api::crypto::KeyProvider;
use abikit_api::transport::ChainTransport;
use abikit_types::config::ClientConfig;
use abikit_types::error::TransactionError;
use abikit_types::json::deep_get;
use abikit_types::json_path;
use abikit_types::keys::PublicKey;
use abikit_types::time::TimePointSec;
use abikit_types::Name;
use serde_json::{json, Value};
use std::fmt;

/// Turns a node response carrying an `error` member into a
/// [`TransactionError::Transport`], preferring the first detail message.
pub fn check_response(response: Value) -> Result<Value, TransactionError> {
    let Some(error) = response.get("error") else {
        return Ok(response);
    };
    let message = deep_get(&response, json_path!["error", "details", 0usize, "message"])
        .or_else(|| error.get("what"))
        .and_then(Value::as_str)
        .map_or_else(|| response.to_string(), str::to_string);
    Err(TransactionError::Transport(message))
}

/// Assembles, signs and pushes transactions through a node.
pub struct ChainClient<'a> {
    transport: &'a dyn ChainTransport,
    registry: &'a SchemaRegistry,
    keys: &'a dyn KeyProvider,
    config: ClientConfig,
}

impl fmt::Debug for ChainClient<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainClient")
            .field("registry", self.registry)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<'a> ChainClient<'a> {
    /// Borrows the node, the schemas and the keys for the client's lifetime.
    pub fn new(
        transport: &'a dyn ChainTransport,
        registry: &'a SchemaRegistry,
        keys: &'a dyn KeyProvider,
        config: ClientConfig,
    ) -> Self {
        Self {
            transport,
            registry,
            keys,
            config,
        }
    }

    /// Fetches and parses the node's `get_info`.
    pub fn chain_info(&self) -> Result<ChainInfo, TransactionError> {
        ChainInfo::from_value(check_response(self.transport.get_info()?)?)
    }

    /// Builds an unsigned transaction around `actions`, referencing the last
    /// irreversible block and bound to the configured network id, or the
    /// node's when none is configured.
    pub fn prepare(&self, actions: Vec<Action>) -> Result<PackedTransaction, TransactionError> {
        let info = self.chain_info()?;
        let now = info.head_block_time_sec().unwrap_or_else(TimePointSec::now);
        let mut tx = Transaction::from_config(&self.config, now);
        tx.set_reference_block(info.reference_block())?;
        for action in actions {
            tx.add_action(action);
        }
        let mut packed = PackedTransaction::from_config(tx, &self.config)?;
        if packed.chain_id().is_none() {
            packed.set_chain_id(&info.chain_id)?;
        }
        Ok(packed)
    }

    /// The subset of the held keys the node says must sign `tx`.
    pub fn required_keys(&self, tx: &Transaction) -> Result<Vec<PublicKey>, TransactionError> {
        let available: Vec<String> = self
            .keys
            .public_keys()
            .iter()
            .map(PublicKey::to_legacy_string)
            .collect();
        let body = json!({ "transaction": tx, "available_keys": available });
        let response = check_response(self.transport.get_required_keys(&body)?)?;
        let keys = response
            .get("required_keys")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                TransactionError::Transport(format!("malformed get_required_keys response: {response}"))
            })?;
        keys.iter()
            .map(|key| {
                let text = key.as_str().unwrap_or_default();
                text.parse().map_err(TransactionError::from)
            })
            .collect()
    }

    /// Signs `packed` with every key the node requires.
    pub fn sign(&self, packed: &mut PackedTransaction) -> Result<(), TransactionError> {
        for key in self.required_keys(packed.transaction())? {
            packed.sign(self.keys, &key)?;
        }
        Ok(())
    }

    /// Pushes a signed transaction and returns the node's response.
    pub fn push(&self, packed: &mut PackedTransaction) -> Result<Value, TransactionError> {
        let body = packed.to_json()?;
        let id = packed.id()?;
        tracing::info!(
            target: "tx",
            %id,
            signatures = packed.signatures().len(),
            "Pushing transaction"
        );
        check_response(self.transport.push_transaction(&body)?)
    }

    /// Packs `args` for `account::action`, then prepares, signs and pushes a
    /// transaction carrying that single action.
    pub fn push_action(
        &self,
        account: Name,
        action: Name,
        args: &str,
        authorization: Vec<PermissionLevel>,
    ) -> Result<Value, TransactionError> {
        let action = Action::from_args(self.registry, account, action, authorization, args)?;
        let mut packed = self.prepare(vec![action])?;
        self.sign(&mut packed)?;
        self.push(&mut packed)
    }
}
