// Path: crates/abi/src/registry.rs

//! Contract schemas keyed by account, and action-argument packing through them.

use crate::binary;
use crate::builtin::{EOSIO_TOKEN, EOSIO_TOKEN_ABI};
use crate::schema::{AbiDef, Schema};
use crate::serializer::AbiSerializer;
use abikit_types::error::AbiError;
use abikit_types::{AbiValue, Name};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Maps contract accounts to their schemas.
///
/// The registry is an ordinary owned value: populate it through `&mut self`
/// registration calls, then share it read-only (for example behind an `Arc`)
/// with everything that packs or unpacks.
#[derive(Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<Name, Arc<Schema>>,
}

impl fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut contracts: Vec<String> = self.schemas.keys().map(Name::to_string).collect();
        contracts.sort();
        f.debug_struct("SchemaRegistry")
            .field("contracts", &contracts)
            .finish()
    }
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the system token schema already registered.
    pub fn with_builtin_schemas() -> Result<Self, AbiError> {
        let mut registry = Self::new();
        registry.set_contract_abi(EOSIO_TOKEN, EOSIO_TOKEN_ABI)?;
        Ok(registry)
    }

    /// Registers `contract`'s schema from its JSON document, replacing any
    /// previous one. An empty document removes the contract instead.
    pub fn set_contract_abi(&mut self, contract: Name, json: &str) -> Result<(), AbiError> {
        if json.trim().is_empty() {
            self.remove_contract_abi(contract);
            return Ok(());
        }
        self.set_contract_abi_def(contract, AbiDef::from_json(json)?)
    }

    /// Registers `contract`'s schema from its binary form.
    pub fn set_contract_abi_bin(&mut self, contract: Name, bytes: &[u8]) -> Result<(), AbiError> {
        if bytes.is_empty() {
            self.remove_contract_abi(contract);
            return Ok(());
        }
        self.set_contract_abi_def(contract, binary::unpack_abi_def(bytes)?)
    }

    /// Validates and registers a parsed schema document.
    pub fn set_contract_abi_def(&mut self, contract: Name, def: AbiDef) -> Result<(), AbiError> {
        let schema = Schema::from_def(def)?;
        tracing::info!(
            target: "abi",
            contract = %contract,
            version = schema.version(),
            structs = schema.def().structs.len(),
            actions = schema.def().actions.len(),
            "Registered contract schema"
        );
        self.schemas.insert(contract, Arc::new(schema));
        Ok(())
    }

    /// Removes `contract`'s schema, returning whether one was registered.
    pub fn remove_contract_abi(&mut self, contract: Name) -> bool {
        let removed = self.schemas.remove(&contract).is_some();
        if removed {
            tracing::info!(target: "abi", contract = %contract, "Removed contract schema");
        }
        removed
    }

    /// Whether a schema is registered for `contract`.
    pub fn contains(&self, contract: Name) -> bool {
        self.schemas.contains_key(&contract)
    }

    /// The schema registered for `contract`.
    pub fn schema(&self, contract: Name) -> Result<Arc<Schema>, AbiError> {
        self.schemas
            .get(&contract)
            .cloned()
            .ok_or_else(|| AbiError::UnknownContract(contract.to_string()))
    }

    fn action_type<'s>(
        schema: &'s Schema,
        contract: Name,
        action: Name,
    ) -> Result<&'s str, AbiError> {
        schema
            .action_type(action)
            .ok_or_else(|| AbiError::UnknownAction {
                contract: contract.to_string(),
                action: action.to_string(),
            })
    }

    /// Packs an action's JSON arguments.
    pub fn pack_action_args(
        &self,
        contract: Name,
        action: Name,
        args: &str,
    ) -> Result<Vec<u8>, AbiError> {
        self.pack_action_value(contract, action, &AbiValue::parse(args)?)
    }

    /// Packs an action's already-parsed arguments.
    pub fn pack_action_value(
        &self,
        contract: Name,
        action: Name,
        args: &AbiValue,
    ) -> Result<Vec<u8>, AbiError> {
        let schema = self.schema(contract)?;
        let ty = Self::action_type(&schema, contract, action)?;
        AbiSerializer::new(&schema).pack(ty, args)
    }

    /// Unpacks an action's binary arguments.
    pub fn unpack_action_args(
        &self,
        contract: Name,
        action: Name,
        bytes: &[u8],
    ) -> Result<Value, AbiError> {
        let schema = self.schema(contract)?;
        let ty = Self::action_type(&schema, contract, action)?;
        AbiSerializer::new(&schema).unpack(ty, bytes)
    }

    /// Packs a JSON value as any type in `contract`'s schema.
    pub fn pack_abi_type(&self, contract: Name, ty: &str, json: &str) -> Result<Vec<u8>, AbiError> {
        let schema = self.schema(contract)?;
        AbiSerializer::new(&schema).pack_json(ty, json)
    }

    /// Unpacks any type in `contract`'s schema.
    pub fn unpack_abi_type(&self, contract: Name, ty: &str, bytes: &[u8]) -> Result<Value, AbiError> {
        let schema = self.schema(contract)?;
        AbiSerializer::new(&schema).unpack(ty, bytes)
    }
}
