// Path: crates/tx/src/transaction/mod.rs

//! The unsigned transaction: a header, the actions, and extensions.
//!
//! The binary layout is fixed rather than schema-driven; it matches the
//! `transaction` struct of [`abikit_abi::builtin::TRANSACTION_ABI`] field for
//! field, so the JSON form of a [`Transaction`] packs to the same bytes
//! through either path.

use crate::action::Action;
use abikit_types::codec::hex_serde;
use abikit_types::config::ClientConfig;
use abikit_types::error::{CodecError, TransactionError};
use abikit_types::prelude::{Decoder, Encoder};
use abikit_types::time::TimePointSec;
use serde::{Deserialize, Serialize};

/// A typed extension payload attached to a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionExtension {
    /// The extension kind.
    #[serde(rename = "type")]
    pub ty: u16,
    /// The payload; hex in JSON.
    #[serde(with = "hex_serde")]
    pub data: Vec<u8>,
}

/// An unsigned transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// The time after which the transaction may no longer be included.
    pub expiration: TimePointSec,
    /// Low 16 bits of the reference block's number.
    pub ref_block_num: u16,
    /// Bytes 8..12 of the reference block's id, little-endian.
    pub ref_block_prefix: u32,
    /// Net bandwidth cap in 8-byte words; packed as a `varuint32`.
    pub max_net_usage_words: u32,
    /// CPU cap in milliseconds; zero means no cap beyond the account's.
    pub max_cpu_usage_ms: u8,
    /// Packed as a `varuint32`.
    pub delay_sec: u32,
    /// Actions that run without access to chain state.
    #[serde(default)]
    pub context_free_actions: Vec<Action>,
    /// The actions, in execution order.
    #[serde(default)]
    pub actions: Vec<Action>,
    /// Typed extensions; `transaction_extensions` in JSON.
    #[serde(default, rename = "transaction_extensions")]
    pub extensions: Vec<TransactionExtension>,
}

impl Transaction {
    /// An empty transaction expiring `expiration_secs` after `now`, with no
    /// reference block and no resource limits.
    pub fn new(expiration_secs: u32, now: TimePointSec) -> Self {
        Self {
            expiration: now.saturating_add(expiration_secs),
            ref_block_num: 0,
            ref_block_prefix: 0,
            max_net_usage_words: 0,
            max_cpu_usage_ms: 0,
            delay_sec: 0,
            context_free_actions: Vec::new(),
            actions: Vec::new(),
            extensions: Vec::new(),
        }
    }

    /// An empty transaction using the expiry window and limits from `config`.
    pub fn from_config(config: &ClientConfig, now: TimePointSec) -> Self {
        Self {
            max_net_usage_words: config.max_net_usage_words,
            max_cpu_usage_ms: config.max_cpu_usage_ms,
            delay_sec: config.delay_sec,
            ..Self::new(config.expiration_secs, now)
        }
    }

    /// Appends an action.
    pub fn add_action(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Appends a context-free action.
    pub fn add_context_free_action(&mut self, action: Action) {
        self.context_free_actions.push(action);
    }

    /// Appends an extension of kind `ty`.
    pub fn add_extension(&mut self, ty: u16, data: Vec<u8>) {
        self.extensions.push(TransactionExtension { ty, data });
    }

    /// Binds the transaction to a recent block given its 32-byte hex id.
    ///
    /// The block number is the id's first four bytes read big-endian,
    /// truncated to 16 bits. The prefix is bytes 8..12 read little-endian.
    pub fn set_reference_block(&mut self, block_id: &str) -> Result<(), TransactionError> {
        let invalid = || TransactionError::InvalidBlockId(block_id.to_string());
        let id = hex::decode(block_id).map_err(|_| invalid())?;
        if id.len() != 32 {
            return Err(invalid());
        }
        let mut dec = Decoder::new(&id);
        let num = u32::from_be_bytes(dec.read_array::<4>()?);
        dec.read_bytes(4)?;
        // Truncation to the low 16 bits is the wire definition.
        self.ref_block_num = (num & 0xffff) as u16;
        self.ref_block_prefix = dec.unpack_u32()?;
        Ok(())
    }

    /// The binary encoding.
    pub fn pack(&self) -> Result<Vec<u8>, CodecError> {
        let mut enc = Encoder::new();
        enc.pack_u32(self.expiration.secs());
        enc.pack_u16(self.ref_block_num);
        enc.pack_u32(self.ref_block_prefix);
        enc.pack_varuint32(self.max_net_usage_words);
        enc.pack_u8(self.max_cpu_usage_ms);
        enc.pack_varuint32(self.delay_sec);
        pack_actions(&mut enc, &self.context_free_actions)?;
        pack_actions(&mut enc, &self.actions)?;
        enc.pack_length(self.extensions.len())?;
        for ext in &self.extensions {
            enc.pack_u16(ext.ty);
            enc.pack_bytes(&ext.data)?;
        }
        Ok(enc.into_bytes())
    }

    /// Decodes a transaction from the start of `bytes`.
    pub fn unpack(bytes: &[u8]) -> Result<Self, CodecError> {
        let mut dec = Decoder::new(bytes);
        let expiration = TimePointSec::from_secs(dec.unpack_u32()?);
        let ref_block_num = dec.unpack_u16()?;
        let ref_block_prefix = dec.unpack_u32()?;
        let max_net_usage_words = dec.unpack_varuint32()?;
        let max_cpu_usage_ms = dec.unpack_u8()?;
        let delay_sec = dec.unpack_varuint32()?;
        let context_free_actions = unpack_actions(&mut dec)?;
        let actions = unpack_actions(&mut dec)?;
        let count = dec.unpack_length()?;
        let mut extensions = Vec::with_capacity(count.min(dec.remaining()));
        for _ in 0..count {
            extensions.push(TransactionExtension {
                ty: dec.unpack_u16()?,
                data: dec.unpack_bytes()?,
            });
        }
        Ok(Self {
            expiration,
            ref_block_num,
            ref_block_prefix,
            max_net_usage_words,
            max_cpu_usage_ms,
            delay_sec,
            context_free_actions,
            actions,
            extensions,
        })
    }
}

fn pack_actions(enc: &mut Encoder, actions: &[Action]) -> Result<(), CodecError> {
    enc.pack_length(actions.len())?;
    actions.iter().try_for_each(|action| action.pack(enc))
}

fn unpack_actions(dec: &mut Decoder<'_>) -> Result<Vec<Action>, CodecError> {
    let count = dec.unpack_length()?;
    let mut actions = Vec::with_capacity(count.min(dec.remaining()));
    for _ in 0..count {
        actions.push(Action::unpack(dec)?);
    }
    Ok(actions)
}

#[cfg(test)]
mod tests;
