// Path: crates/abi/src/schema/mod.rs
//! The interface schema document and its resolved form.
//!
//! [`AbiDef`] mirrors the JSON document field for field. [`Schema`] wraps a
//! validated `AbiDef` with name indexes: struct and variant lookups, action
//! and table type mappings, and type aliases flattened to their final target
//! so the packer resolves any alias in a single step.

use abikit_types::error::AbiError;
use abikit_types::Name;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub mod descriptor;

pub use descriptor::{FieldType, Modifier};

/// A type alias: `new_type_name` is another name for `ty`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    /// The alias.
    pub new_type_name: String,
    /// The aliased type descriptor.
    #[serde(rename = "type")]
    pub ty: String,
}

/// One struct field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// The field name.
    pub name: String,
    /// The field's type descriptor.
    #[serde(rename = "type")]
    pub ty: String,
}

/// A named struct with an optional base struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructDef {
    /// The struct name.
    pub name: String,
    /// The base struct, or empty.
    #[serde(default)]
    pub base: String,
    /// Fields in wire order.
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

/// A tagged union of member types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantDef {
    /// The variant name.
    pub name: String,
    /// Member types; the wire tag is the member's position.
    #[serde(default)]
    pub types: Vec<String>,
}

/// An action and the struct its data is packed as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDef {
    /// The action name.
    pub name: Name,
    /// The struct type of the action data.
    #[serde(rename = "type")]
    pub ty: String,
    /// The action's Ricardian contract text.
    #[serde(default)]
    pub ricardian_contract: String,
}

/// A table descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDef {
    /// The table name.
    pub name: Name,
    /// The primary index type.
    #[serde(default)]
    pub index_type: String,
    /// Key column names.
    #[serde(default)]
    pub key_names: Vec<String>,
    /// Key column types.
    #[serde(default)]
    pub key_types: Vec<String>,
    /// The row struct type.
    #[serde(rename = "type")]
    pub ty: String,
}

/// A free-text Ricardian clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClausePair {
    /// The clause id.
    pub id: String,
    /// The clause body.
    pub body: String,
}

/// A contract error code and its message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    /// The numeric code raised by the contract.
    pub error_code: u64,
    /// The human-readable message.
    pub error_msg: String,
}

/// An opaque extension block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiExtension {
    /// The extension tag.
    #[serde(rename = "type")]
    pub ty: u16,
    /// The extension payload, hex encoded in JSON.
    #[serde(with = "abikit_types::codec::hex_serde")]
    pub data: Vec<u8>,
}

/// The interface schema document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AbiDef {
    /// The schema format version, such as `eosio::abi/1.1`.
    #[serde(default)]
    pub version: String,
    /// Type aliases.
    #[serde(default)]
    pub types: Vec<TypeDef>,
    /// Struct definitions.
    #[serde(default)]
    pub structs: Vec<StructDef>,
    /// Action to struct mappings.
    #[serde(default)]
    pub actions: Vec<ActionDef>,
    /// Table descriptors.
    #[serde(default)]
    pub tables: Vec<TableDef>,
    /// Ricardian clauses.
    #[serde(default)]
    pub ricardian_clauses: Vec<ClausePair>,
    /// Contract error messages.
    #[serde(default)]
    pub error_messages: Vec<ErrorMessage>,
    /// Extension blocks.
    #[serde(default)]
    pub abi_extensions: Vec<AbiExtension>,
    /// Tagged unions.
    #[serde(default)]
    pub variants: Vec<VariantDef>,
}

impl AbiDef {
    /// Parses the JSON document.
    pub fn from_json(json: &str) -> Result<Self, AbiError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Renders the JSON document.
    pub fn to_json(&self) -> Result<String, AbiError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A validated schema with lookup indexes.
#[derive(Debug, Clone)]
pub struct Schema {
    def: AbiDef,
    aliases: HashMap<String, String>,
    structs: HashMap<String, usize>,
    variants: HashMap<String, usize>,
    actions: HashMap<Name, usize>,
    tables: HashMap<Name, usize>,
}

impl Schema {
    /// Parses and validates a JSON schema document.
    pub fn from_json(json: &str) -> Result<Self, AbiError> {
        Self::from_def(AbiDef::from_json(json)?)
    }

    /// Validates a schema document and builds its indexes.
    ///
    /// Fails with `InvalidSchema` on duplicate struct or variant names, alias
    /// cycles, unresolvable or cyclic base structs, and binary extension
    /// fields that are followed by ordinary fields.
    pub fn from_def(def: AbiDef) -> Result<Self, AbiError> {
        let aliases = flatten_aliases(&def.types)?;

        let mut structs = HashMap::with_capacity(def.structs.len());
        for (i, s) in def.structs.iter().enumerate() {
            if structs.insert(s.name.clone(), i).is_some() {
                return Err(AbiError::InvalidSchema(format!(
                    "duplicate struct '{}'",
                    s.name
                )));
            }
        }

        let mut variants = HashMap::with_capacity(def.variants.len());
        for (i, v) in def.variants.iter().enumerate() {
            if variants.insert(v.name.clone(), i).is_some() {
                return Err(AbiError::InvalidSchema(format!(
                    "duplicate variant '{}'",
                    v.name
                )));
            }
            if v.types.len() > usize::from(u8::MAX) + 1 {
                return Err(AbiError::InvalidSchema(format!(
                    "variant '{}' has more than 256 members",
                    v.name
                )));
            }
        }

        let actions = def
            .actions
            .iter()
            .enumerate()
            .map(|(i, a)| (a.name, i))
            .collect();
        let tables = def
            .tables
            .iter()
            .enumerate()
            .map(|(i, t)| (t.name, i))
            .collect();

        let schema = Self {
            def,
            aliases,
            structs,
            variants,
            actions,
            tables,
        };
        for s in &schema.def.structs {
            schema.check_base_chain(s)?;
            check_extension_fields(s)?;
        }
        Ok(schema)
    }

    fn check_base_chain(&self, start: &StructDef) -> Result<(), AbiError> {
        let mut seen = HashSet::new();
        seen.insert(start.name.as_str());
        let mut current = start;
        while !current.base.is_empty() {
            let base_name = self.resolve_alias(&current.base);
            let base = self.get_struct(base_name).ok_or_else(|| {
                AbiError::InvalidSchema(format!(
                    "base '{}' of struct '{}' is not a struct",
                    current.base, current.name
                ))
            })?;
            if !seen.insert(base.name.as_str()) {
                return Err(AbiError::InvalidSchema(format!(
                    "circular base chain through struct '{}'",
                    start.name
                )));
            }
            current = base;
        }
        Ok(())
    }

    /// The underlying document.
    pub fn def(&self) -> &AbiDef {
        &self.def
    }

    /// Consumes the schema, returning the document.
    pub fn into_def(self) -> AbiDef {
        self.def
    }

    /// The schema format version.
    pub fn version(&self) -> &str {
        &self.def.version
    }

    /// The final target of `ty` if it is an alias, otherwise `ty` itself.
    pub fn resolve_alias<'a>(&'a self, ty: &'a str) -> &'a str {
        self.aliases.get(ty).map_or(ty, String::as_str)
    }

    /// Whether `ty` is a declared alias.
    pub fn is_alias(&self, ty: &str) -> bool {
        self.aliases.contains_key(ty)
    }

    /// Looks up a struct by exact name.
    pub fn get_struct(&self, name: &str) -> Option<&StructDef> {
        self.structs.get(name).and_then(|&i| self.def.structs.get(i))
    }

    /// Looks up a variant by exact name.
    pub fn get_variant(&self, name: &str) -> Option<&VariantDef> {
        self.variants.get(name).and_then(|&i| self.def.variants.get(i))
    }

    /// The struct type an action's data is packed as.
    pub fn action_type(&self, action: Name) -> Option<&str> {
        self.actions
            .get(&action)
            .and_then(|&i| self.def.actions.get(i))
            .map(|a| a.ty.as_str())
    }

    /// The row type of a table.
    pub fn table_type(&self, table: Name) -> Option<&str> {
        self.tables
            .get(&table)
            .and_then(|&i| self.def.tables.get(i))
            .map(|t| t.ty.as_str())
    }
}

/// Resolves every alias to its final non-alias target, rejecting cycles.
fn flatten_aliases(types: &[TypeDef]) -> Result<HashMap<String, String>, AbiError> {
    let direct: HashMap<&str, &str> = types
        .iter()
        .map(|t| (t.new_type_name.as_str(), t.ty.as_str()))
        .collect();
    if direct.len() != types.len() {
        return Err(AbiError::InvalidSchema("duplicate type alias".into()));
    }

    let mut flat = HashMap::with_capacity(direct.len());
    for (&alias, &target) in &direct {
        let mut chain = vec![alias];
        let mut current = target;
        while let Some(&next) = direct.get(current) {
            if chain.contains(&current) {
                chain.push(current);
                return Err(AbiError::InvalidSchema(format!(
                    "alias cycle: {}",
                    chain.join(" -> ")
                )));
            }
            chain.push(current);
            current = next;
        }
        flat.insert(alias.to_string(), current.to_string());
    }
    Ok(flat)
}

fn check_extension_fields(s: &StructDef) -> Result<(), AbiError> {
    let mut in_extensions = false;
    for field in &s.fields {
        let is_extension = FieldType::parse(&field.ty).modifier == Some(Modifier::Extension);
        if in_extensions && !is_extension {
            return Err(AbiError::InvalidSchema(format!(
                "field '{}' of struct '{}' follows a binary extension field",
                field.name, s.name
            )));
        }
        in_extensions |= is_extension;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
