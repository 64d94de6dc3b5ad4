// Path: crates/abi/src/binary.rs

//! The binary form of a schema document, as published on chain next to
//! contract code.
//!
//! Sections follow the JSON document's order, each as a length-prefixed list
//! of records built from the ordinary scalar encodings. The variant table is
//! a trailing extension: documents that end before it decode with no
//! variants.

use crate::schema::{
    AbiDef, AbiExtension, ActionDef, ClausePair, ErrorMessage, FieldDef, StructDef, TableDef,
    TypeDef, VariantDef,
};
use abikit_types::error::{AbiError, CodecError};
use abikit_types::prelude::{Decoder, Encoder};
use abikit_types::Name;

/// A record with a fixed binary layout inside the schema document.
trait BinaryForm: Sized {
    fn pack(&self, enc: &mut Encoder) -> Result<(), CodecError>;
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, AbiError>;
}

impl BinaryForm for String {
    fn pack(&self, enc: &mut Encoder) -> Result<(), CodecError> {
        enc.pack_string(self)
    }

    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, AbiError> {
        Ok(dec.unpack_string()?)
    }
}

impl BinaryForm for Name {
    fn pack(&self, enc: &mut Encoder) -> Result<(), CodecError> {
        enc.pack_u64(self.as_u64());
        Ok(())
    }

    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, AbiError> {
        Ok(Name::from_u64(dec.unpack_u64()?))
    }
}

impl<T: BinaryForm> BinaryForm for Vec<T> {
    fn pack(&self, enc: &mut Encoder) -> Result<(), CodecError> {
        enc.pack_length(self.len())?;
        self.iter().try_for_each(|item| item.pack(enc))
    }

    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, AbiError> {
        let count = dec.unpack_length()?;
        let mut items = Vec::with_capacity(count.min(dec.remaining()));
        for _ in 0..count {
            items.push(T::unpack(dec)?);
        }
        Ok(items)
    }
}

macro_rules! binary_record {
    ($ty:ident { $($field:ident: $fty:ty),* $(,)? }) => {
        impl BinaryForm for $ty {
            fn pack(&self, enc: &mut Encoder) -> Result<(), CodecError> {
                $( BinaryForm::pack(&self.$field, enc)?; )*
                Ok(())
            }

            fn unpack(dec: &mut Decoder<'_>) -> Result<Self, AbiError> {
                Ok(Self {
                    $( $field: <$fty as BinaryForm>::unpack(dec)?, )*
                })
            }
        }
    };
}

binary_record!(TypeDef { new_type_name: String, ty: String });
binary_record!(FieldDef { name: String, ty: String });
binary_record!(StructDef { name: String, base: String, fields: Vec<FieldDef> });
binary_record!(ActionDef { name: Name, ty: String, ricardian_contract: String });
binary_record!(TableDef {
    name: Name,
    index_type: String,
    key_names: Vec<String>,
    key_types: Vec<String>,
    ty: String,
});
binary_record!(ClausePair { id: String, body: String });
binary_record!(VariantDef { name: String, types: Vec<String> });

impl BinaryForm for ErrorMessage {
    fn pack(&self, enc: &mut Encoder) -> Result<(), CodecError> {
        enc.pack_u64(self.error_code);
        enc.pack_string(&self.error_msg)
    }

    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, AbiError> {
        Ok(Self {
            error_code: dec.unpack_u64()?,
            error_msg: dec.unpack_string()?,
        })
    }
}

impl BinaryForm for AbiExtension {
    fn pack(&self, enc: &mut Encoder) -> Result<(), CodecError> {
        enc.pack_u16(self.ty);
        enc.pack_bytes(&self.data)
    }

    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, AbiError> {
        Ok(Self {
            ty: dec.unpack_u16()?,
            data: dec.unpack_bytes()?,
        })
    }
}

/// Encodes a schema document.
pub fn pack_abi_def(def: &AbiDef) -> Result<Vec<u8>, AbiError> {
    let mut enc = Encoder::new();
    def.version.pack(&mut enc)?;
    def.types.pack(&mut enc)?;
    def.structs.pack(&mut enc)?;
    def.actions.pack(&mut enc)?;
    def.tables.pack(&mut enc)?;
    def.ricardian_clauses.pack(&mut enc)?;
    def.error_messages.pack(&mut enc)?;
    def.abi_extensions.pack(&mut enc)?;
    def.variants.pack(&mut enc)?;
    Ok(enc.into_bytes())
}

/// Decodes a schema document.
pub fn unpack_abi_def(bytes: &[u8]) -> Result<AbiDef, AbiError> {
    let mut dec = Decoder::new(bytes);
    let mut def = AbiDef {
        version: String::unpack(&mut dec)?,
        types: Vec::unpack(&mut dec)?,
        structs: Vec::unpack(&mut dec)?,
        actions: Vec::unpack(&mut dec)?,
        tables: Vec::unpack(&mut dec)?,
        ricardian_clauses: Vec::unpack(&mut dec)?,
        error_messages: Vec::unpack(&mut dec)?,
        abi_extensions: Vec::unpack(&mut dec)?,
        variants: Vec::new(),
    };
    if !dec.is_end() {
        def.variants = Vec::unpack(&mut dec)?;
    }
    Ok(def)
}

/// Encodes a JSON schema document.
pub fn pack_abi(json: &str) -> Result<Vec<u8>, AbiError> {
    pack_abi_def(&AbiDef::from_json(json)?)
}

/// Decodes a schema document and renders it as JSON.
pub fn unpack_abi(bytes: &[u8]) -> Result<String, AbiError> {
    unpack_abi_def(bytes)?.to_json()
}
