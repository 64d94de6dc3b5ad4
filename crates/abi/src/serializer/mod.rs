// Path: crates/abi/src/serializer/mod.rs

//! The schema-driven packer and unpacker.
//!
//! A type name resolves, in order, to a built-in, an alias, a struct, a
//! variant, or an array of another type. Structs emit their base struct's
//! fields first. Errors are annotated with `Struct.field` as they propagate,
//! which never changes their classification.

use crate::scalar::BuiltinType;
use crate::schema::descriptor::array_element;
use crate::schema::{FieldType, Modifier, Schema, StructDef, VariantDef};
use abikit_types::error::AbiError;
use abikit_types::prelude::{AbiResultExt, Decoder, Encoder};
use abikit_types::AbiValue;
use serde_json::{Map, Value};

/// The deepest nesting of fields, variant members and array elements accepted.
pub const MAX_DEPTH: usize = 32;

/// Packs and unpacks values against one schema.
#[derive(Debug, Clone, Copy)]
pub struct AbiSerializer<'s> {
    schema: &'s Schema,
}

impl<'s> AbiSerializer<'s> {
    /// Creates a serializer over `schema`.
    pub fn new(schema: &'s Schema) -> Self {
        Self { schema }
    }

    /// The schema this serializer resolves types against.
    pub fn schema(&self) -> &'s Schema {
        self.schema
    }

    /// Packs `value` as type `ty` into a fresh buffer.
    pub fn pack(&self, ty: &str, value: &AbiValue) -> Result<Vec<u8>, AbiError> {
        let mut enc = Encoder::new();
        self.pack_type(&mut enc, ty, value, 0)?;
        Ok(enc.into_bytes())
    }

    /// Parses `json` and packs it as type `ty`.
    pub fn pack_json(&self, ty: &str, json: &str) -> Result<Vec<u8>, AbiError> {
        self.pack(ty, &AbiValue::parse(json)?)
    }

    /// Unpacks one value of type `ty` from the start of `bytes`.
    ///
    /// Bytes left over after the value are ignored.
    pub fn unpack(&self, ty: &str, bytes: &[u8]) -> Result<Value, AbiError> {
        let mut dec = Decoder::new(bytes);
        let value = self.unpack_type(&mut dec, ty, 0)?;
        if !dec.is_end() {
            tracing::debug!(
                target: "abi",
                ty,
                trailing = dec.remaining(),
                "Ignoring trailing bytes after unpacked value"
            );
        }
        Ok(value)
    }

    fn pack_type(
        &self,
        enc: &mut Encoder,
        ty: &str,
        value: &AbiValue,
        depth: usize,
    ) -> Result<(), AbiError> {
        check_depth(ty, depth)?;
        let field = FieldType::parse(ty);
        match field.modifier {
            Some(Modifier::Optional) if value.is_null() => {
                enc.pack_bool(false);
                Ok(())
            }
            Some(Modifier::Optional) => {
                enc.pack_bool(true);
                self.pack_base(enc, field.base, value, depth)
            }
            Some(Modifier::Extension) | None => self.pack_base(enc, field.base, value, depth),
        }
    }

    fn pack_base(
        &self,
        enc: &mut Encoder,
        ty: &str,
        value: &AbiValue,
        depth: usize,
    ) -> Result<(), AbiError> {
        if let Some(builtin) = BuiltinType::from_name(ty) {
            return builtin.pack(enc, value);
        }
        if self.schema.is_alias(ty) {
            return self.pack_type(enc, self.schema.resolve_alias(ty), value, depth + 1);
        }
        if let Some(def) = self.schema.get_struct(ty) {
            return self.pack_struct(enc, def, value, depth);
        }
        if let Some(def) = self.schema.get_variant(ty) {
            return self.pack_variant(enc, def, value, depth);
        }
        if let Some(element) = array_element(ty) {
            let AbiValue::Array(items) = value else {
                return Err(AbiError::malformed(
                    ty,
                    value.to_string(),
                    format!("expected an array, got {}", value.shape()),
                ));
            };
            enc.pack_length(items.len())?;
            for (i, item) in items.iter().enumerate() {
                self.pack_type(enc, element, item, depth + 1)
                    .with_context(|| format!("{ty}[{i}]"))?;
            }
            return Ok(());
        }
        Err(AbiError::UnknownType(ty.to_string()))
    }

    fn pack_struct(
        &self,
        enc: &mut Encoder,
        def: &StructDef,
        value: &AbiValue,
        depth: usize,
    ) -> Result<(), AbiError> {
        if !matches!(value, AbiValue::Object(_)) {
            return Err(AbiError::malformed(
                &def.name,
                value.to_string(),
                format!("expected an object, got {}", value.shape()),
            ));
        }
        if let Some(base) = self.base_of(def)? {
            self.pack_struct(enc, base, value, depth)?;
        }
        for field in &def.fields {
            let is_extension = FieldType::parse(&field.ty).modifier == Some(Modifier::Extension);
            match value.get(&field.name) {
                Some(v) => self
                    .pack_type(enc, &field.ty, v, depth + 1)
                    .with_context(|| format!("{}.{}", def.name, field.name))?,
                // Every later field is an extension too; none of them is written.
                None if is_extension => break,
                None => {
                    return Err(AbiError::MissingField {
                        structure: def.name.clone(),
                        field: field.name.clone(),
                    })
                }
            }
        }
        Ok(())
    }

    fn pack_variant(
        &self,
        enc: &mut Encoder,
        def: &VariantDef,
        value: &AbiValue,
        depth: usize,
    ) -> Result<(), AbiError> {
        let (tag, inner) = match value {
            AbiValue::Array(items) => match items.as_slice() {
                [tag, inner] => (tag, inner),
                _ => {
                    return Err(AbiError::malformed(
                        &def.name,
                        value.to_string(),
                        "expected [type_name, value]",
                    ))
                }
            },
            other => {
                return Err(AbiError::malformed(
                    &def.name,
                    other.to_string(),
                    "expected [type_name, value]",
                ))
            }
        };
        let member = tag.as_quoted(&def.name)?;
        let index = def
            .types
            .iter()
            .position(|t| *t == member)
            .and_then(|i| u8::try_from(i).ok())
            .ok_or_else(|| AbiError::InvalidVariantMember {
                variant: def.name.clone(),
                member: member.clone(),
            })?;
        enc.pack_u8(index);
        self.pack_type(enc, &member, inner, depth + 1)
            .with_context(|| format!("{}<{}>", def.name, member))
    }

    fn unpack_type(&self, dec: &mut Decoder<'_>, ty: &str, depth: usize) -> Result<Value, AbiError> {
        check_depth(ty, depth)?;
        let field = FieldType::parse(ty);
        match field.modifier {
            Some(Modifier::Optional) => {
                if dec.unpack_bool()? {
                    self.unpack_base(dec, field.base, depth)
                } else {
                    Ok(Value::Null)
                }
            }
            Some(Modifier::Extension) | None => self.unpack_base(dec, field.base, depth),
        }
    }

    fn unpack_base(&self, dec: &mut Decoder<'_>, ty: &str, depth: usize) -> Result<Value, AbiError> {
        if let Some(builtin) = BuiltinType::from_name(ty) {
            return builtin.unpack(dec);
        }
        if self.schema.is_alias(ty) {
            return self.unpack_type(dec, self.schema.resolve_alias(ty), depth + 1);
        }
        if let Some(def) = self.schema.get_struct(ty) {
            let mut map = Map::new();
            self.unpack_struct(dec, def, &mut map, depth)?;
            return Ok(Value::Object(map));
        }
        if let Some(def) = self.schema.get_variant(ty) {
            let index = dec.unpack_u8()?;
            let member = def.types.get(usize::from(index)).ok_or_else(|| {
                AbiError::InvalidVariantMember {
                    variant: def.name.clone(),
                    member: index.to_string(),
                }
            })?;
            let inner = self
                .unpack_type(dec, member, depth + 1)
                .with_context(|| format!("{}<{}>", def.name, member))?;
            return Ok(Value::Array(vec![Value::String(member.clone()), inner]));
        }
        if let Some(element) = array_element(ty) {
            let count = dec.unpack_length()?;
            let mut items = Vec::with_capacity(count.min(dec.remaining()));
            for i in 0..count {
                items.push(
                    self.unpack_type(dec, element, depth + 1)
                        .with_context(|| format!("{ty}[{i}]"))?,
                );
            }
            return Ok(Value::Array(items));
        }
        Err(AbiError::UnknownType(ty.to_string()))
    }

    fn unpack_struct(
        &self,
        dec: &mut Decoder<'_>,
        def: &StructDef,
        map: &mut Map<String, Value>,
        depth: usize,
    ) -> Result<(), AbiError> {
        if let Some(base) = self.base_of(def)? {
            self.unpack_struct(dec, base, map, depth)?;
        }
        for field in &def.fields {
            let is_extension = FieldType::parse(&field.ty).modifier == Some(Modifier::Extension);
            if is_extension && dec.is_end() {
                break;
            }
            let value = self
                .unpack_type(dec, &field.ty, depth + 1)
                .with_context(|| format!("{}.{}", def.name, field.name))?;
            map.insert(field.name.clone(), value);
        }
        Ok(())
    }

    fn base_of(&self, def: &StructDef) -> Result<Option<&'s StructDef>, AbiError> {
        if def.base.is_empty() {
            return Ok(None);
        }
        self.schema
            .get_struct(self.schema.resolve_alias(&def.base))
            .map(Some)
            .ok_or_else(|| AbiError::UnknownType(def.base.clone()))
    }
}

fn check_depth(ty: &str, depth: usize) -> Result<(), AbiError> {
    if depth > MAX_DEPTH {
        return Err(AbiError::malformed(ty, "", "maximum nesting depth exceeded"));
    }
    Ok(())
}

#[cfg(test)]
mod tests;
