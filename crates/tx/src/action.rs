// Path: crates/tx/src/action.rs

//! Contract actions and the authorizations attached to them.

use abikit_abi::SchemaRegistry;
use abikit_types::codec::hex_serde;
use abikit_types::error::{AbiError, CodecError};
use abikit_types::prelude::{Decoder, Encoder};
use abikit_types::{AbiValue, Name};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An `actor@permission` pair authorizing an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionLevel {
    /// The authorizing account.
    pub actor: Name,
    /// The named permission of `actor`, usually `active` or `owner`.
    pub permission: Name,
}

impl PermissionLevel {
    /// Pairs an actor with one of its permissions.
    pub fn new(actor: Name, permission: Name) -> Self {
        Self { actor, permission }
    }

    pub(crate) fn pack(&self, enc: &mut Encoder) {
        enc.pack_u64(self.actor.as_u64());
        enc.pack_u64(self.permission.as_u64());
    }

    pub(crate) fn unpack(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            actor: Name::from_u64(dec.unpack_u64()?),
            permission: Name::from_u64(dec.unpack_u64()?),
        })
    }
}

impl FromStr for PermissionLevel {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (actor, permission) = s
            .split_once('@')
            .ok_or_else(|| AbiError::malformed("permission_level", s, "expected actor@permission"))?;
        Ok(Self::new(actor.parse()?, permission.parse()?))
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.actor, self.permission)
    }
}

/// A call of `name` on contract `account`, with its arguments already packed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The contract account.
    pub account: Name,
    /// The action name within the contract.
    pub name: Name,
    /// The permissions that must sign.
    pub authorization: Vec<PermissionLevel>,
    /// Packed arguments; hex in JSON.
    #[serde(with = "hex_serde")]
    pub data: Vec<u8>,
}

impl Action {
    /// Builds an action from already-packed arguments.
    pub fn new(
        account: Name,
        name: Name,
        authorization: Vec<PermissionLevel>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            account,
            name,
            authorization,
            data,
        }
    }

    /// Builds an action whose arguments are given as hex.
    pub fn new_raw(
        account: Name,
        name: Name,
        authorization: Vec<PermissionLevel>,
        data_hex: &str,
    ) -> Result<Self, AbiError> {
        let data = hex::decode(data_hex)
            .map_err(|e| AbiError::malformed("bytes", data_hex, e.to_string()))?;
        Ok(Self::new(account, name, authorization, data))
    }

    /// Builds an action by packing JSON arguments against `account`'s
    /// registered schema.
    pub fn from_args(
        registry: &SchemaRegistry,
        account: Name,
        name: Name,
        authorization: Vec<PermissionLevel>,
        args: &str,
    ) -> Result<Self, AbiError> {
        let data = registry.pack_action_args(account, name, args)?;
        Ok(Self::new(account, name, authorization, data))
    }

    /// Like [`Action::from_args`] with an already-parsed value.
    pub fn from_value(
        registry: &SchemaRegistry,
        account: Name,
        name: Name,
        authorization: Vec<PermissionLevel>,
        args: &AbiValue,
    ) -> Result<Self, AbiError> {
        let data = registry.pack_action_value(account, name, args)?;
        Ok(Self::new(account, name, authorization, data))
    }

    /// Appends `actor@permission` to the authorization list.
    pub fn add_permission(&mut self, actor: Name, permission: Name) {
        self.authorization.push(PermissionLevel::new(actor, permission));
    }

    /// Decodes the packed arguments with `account`'s registered schema.
    pub fn unpack_args(&self, registry: &SchemaRegistry) -> Result<serde_json::Value, AbiError> {
        registry.unpack_action_args(self.account, self.name, &self.data)
    }

    pub(crate) fn pack(&self, enc: &mut Encoder) -> Result<(), CodecError> {
        enc.pack_u64(self.account.as_u64());
        enc.pack_u64(self.name.as_u64());
        enc.pack_length(self.authorization.len())?;
        for level in &self.authorization {
            level.pack(enc);
        }
        enc.pack_bytes(&self.data)
    }

    pub(crate) fn unpack(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        let account = Name::from_u64(dec.unpack_u64()?);
        let name = Name::from_u64(dec.unpack_u64()?);
        let count = dec.unpack_length()?;
        let mut authorization = Vec::with_capacity(count.min(dec.remaining()));
        for _ in 0..count {
            authorization.push(PermissionLevel::unpack(dec)?);
        }
        Ok(Self {
            account,
            name,
            authorization,
            data: dec.unpack_bytes()?,
        })
    }
}
