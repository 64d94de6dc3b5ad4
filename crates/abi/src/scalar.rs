// Path: crates/abi/src/scalar.rs

//! The built-in type handlers.
//!
//! Every built-in is a variant of [`BuiltinType`]. Packing validates the
//! input's range and text format before writing anything, and unpacking
//! renders the canonical JSON form that packing accepts back.

use abikit_types::asset::{Asset, ExtendedAsset, Symbol, SymbolCode};
use abikit_types::error::AbiError;
use abikit_types::keys::{PublicKey, Signature, KEY_TYPE_K1, PUBLIC_KEY_LEN, SIGNATURE_LEN};
use abikit_types::prelude::{Decoder, Encoder};
use abikit_types::time::{BlockTimestamp, TimePoint, TimePointSec};
use abikit_types::{AbiValue, Name};
use serde_json::{Map, Value};
use std::num::IntErrorKind;
use std::str::FromStr;

/// A built-in type with a fixed wire encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    /// `bool`: one byte, 0 or 1.
    Bool,
    /// `int8`
    Int8,
    /// `uint8`
    Uint8,
    /// `int16`
    Int16,
    /// `uint16`
    Uint16,
    /// `int32`
    Int32,
    /// `uint32`
    Uint32,
    /// `int64`
    Int64,
    /// `uint64`
    Uint64,
    /// `int128`: sixteen raw bytes, written as `0x`-prefixed hex.
    Int128,
    /// `uint128`: sixteen raw bytes, written as `0x`-prefixed hex.
    Uint128,
    /// `varint32`: zig-zag base-128.
    Varint32,
    /// `varuint32`: base-128.
    Varuint32,
    /// `float32`
    Float32,
    /// `float64`
    Float64,
    /// `float128`: sixteen raw bytes, written as `0x`-prefixed hex.
    Float128,
    /// `time_point`: microseconds since the Unix epoch.
    TimePoint,
    /// `time_point_sec`: seconds since the Unix epoch.
    TimePointSec,
    /// `block_timestamp_type`: half-second slots since 2000.
    BlockTimestamp,
    /// `name`: a compact 64-bit name.
    Name,
    /// `bytes`: length-prefixed raw bytes, written as hex.
    Bytes,
    /// `string`: length-prefixed UTF-8.
    String,
    /// `checksum160`: 20 raw bytes.
    Checksum160,
    /// `checksum256`: 32 raw bytes.
    Checksum256,
    /// `checksum512`: 64 raw bytes.
    Checksum512,
    /// `public_key`: curve tag plus a compressed point.
    PublicKey,
    /// `signature`: curve tag plus a recoverable signature.
    Signature,
    /// `symbol`: precision and code.
    Symbol,
    /// `symbol_code`
    SymbolCode,
    /// `asset`: amount followed by symbol.
    Asset,
    /// `extended_asset`: asset followed by the issuing contract.
    ExtendedAsset,
}

impl BuiltinType {
    /// Every built-in, in declaration order.
    pub const ALL: [BuiltinType; 31] = [
        Self::Bool,
        Self::Int8,
        Self::Uint8,
        Self::Int16,
        Self::Uint16,
        Self::Int32,
        Self::Uint32,
        Self::Int64,
        Self::Uint64,
        Self::Int128,
        Self::Uint128,
        Self::Varint32,
        Self::Varuint32,
        Self::Float32,
        Self::Float64,
        Self::Float128,
        Self::TimePoint,
        Self::TimePointSec,
        Self::BlockTimestamp,
        Self::Name,
        Self::Bytes,
        Self::String,
        Self::Checksum160,
        Self::Checksum256,
        Self::Checksum512,
        Self::PublicKey,
        Self::Signature,
        Self::Symbol,
        Self::SymbolCode,
        Self::Asset,
        Self::ExtendedAsset,
    ];

    /// The type name as it appears in schemas.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::Uint8 => "uint8",
            Self::Int16 => "int16",
            Self::Uint16 => "uint16",
            Self::Int32 => "int32",
            Self::Uint32 => "uint32",
            Self::Int64 => "int64",
            Self::Uint64 => "uint64",
            Self::Int128 => "int128",
            Self::Uint128 => "uint128",
            Self::Varint32 => "varint32",
            Self::Varuint32 => "varuint32",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Float128 => "float128",
            Self::TimePoint => "time_point",
            Self::TimePointSec => "time_point_sec",
            Self::BlockTimestamp => "block_timestamp_type",
            Self::Name => "name",
            Self::Bytes => "bytes",
            Self::String => "string",
            Self::Checksum160 => "checksum160",
            Self::Checksum256 => "checksum256",
            Self::Checksum512 => "checksum512",
            Self::PublicKey => "public_key",
            Self::Signature => "signature",
            Self::Symbol => "symbol",
            Self::SymbolCode => "symbol_code",
            Self::Asset => "asset",
            Self::ExtendedAsset => "extended_asset",
        }
    }

    /// Looks up a built-in by schema type name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.name() == name)
    }

    /// Validates `value` and writes its encoding.
    ///
    /// Nothing is written when validation fails.
    pub fn pack(self, enc: &mut Encoder, value: &AbiValue) -> Result<(), AbiError> {
        let ty = self.name();
        match self {
            Self::Bool => match value.as_text(ty)?.as_str() {
                "true" => enc.pack_bool(true),
                "false" => enc.pack_bool(false),
                other => return Err(AbiError::malformed(ty, other, "expected true or false")),
            },
            Self::Int8 => enc.pack_i8(parse_int(ty, value)?),
            Self::Uint8 => enc.pack_u8(parse_int(ty, value)?),
            Self::Int16 => enc.pack_i16(parse_int(ty, value)?),
            Self::Uint16 => enc.pack_u16(parse_int(ty, value)?),
            Self::Int32 => enc.pack_i32(parse_int(ty, value)?),
            Self::Uint32 => enc.pack_u32(parse_int(ty, value)?),
            Self::Int64 => enc.pack_i64(parse_int(ty, value)?),
            Self::Uint64 => enc.pack_u64(parse_int(ty, value)?),
            Self::Varint32 => enc.pack_varint32(parse_int(ty, value)?),
            Self::Varuint32 => enc.pack_varuint32(parse_int(ty, value)?),
            Self::Int128 | Self::Uint128 | Self::Float128 => {
                enc.write_bytes(&parse_wide_hex(ty, value)?)
            }
            Self::Float32 => {
                let text = value.as_text(ty)?;
                enc.pack_f32(parse_float::<f32>(ty, &text, f32::is_finite)?)
            }
            Self::Float64 => {
                let text = value.as_text(ty)?;
                enc.pack_f64(parse_float::<f64>(ty, &text, f64::is_finite)?)
            }
            Self::TimePoint => enc.pack_i64(value.as_quoted(ty)?.parse::<TimePoint>()?.micros()),
            Self::TimePointSec => {
                enc.pack_u32(value.as_quoted(ty)?.parse::<TimePointSec>()?.secs())
            }
            Self::BlockTimestamp => {
                enc.pack_u32(value.as_quoted(ty)?.parse::<BlockTimestamp>()?.slot())
            }
            Self::Name => enc.pack_u64(value.as_quoted(ty)?.parse::<Name>()?.as_u64()),
            Self::Bytes => enc.pack_bytes(&parse_hex(ty, value)?)?,
            Self::String => enc.pack_string(&value.as_quoted(ty)?)?,
            Self::Checksum160 => enc.write_bytes(&parse_fixed_hex(ty, value, 20)?),
            Self::Checksum256 => enc.write_bytes(&parse_fixed_hex(ty, value, 32)?),
            Self::Checksum512 => enc.write_bytes(&parse_fixed_hex(ty, value, 64)?),
            Self::PublicKey => {
                let text = value.as_quoted(ty)?;
                let key = PublicKey::from_str(&text)
                    .map_err(|e| AbiError::malformed(ty, text.as_str(), e.to_string()))?;
                enc.pack_u8(KEY_TYPE_K1);
                enc.write_bytes(key.as_bytes());
            }
            Self::Signature => {
                let text = value.as_quoted(ty)?;
                let sig = Signature::from_str(&text)
                    .map_err(|e| AbiError::malformed(ty, text.as_str(), e.to_string()))?;
                enc.pack_u8(KEY_TYPE_K1);
                enc.write_bytes(sig.as_bytes());
            }
            Self::Symbol => value.as_quoted(ty)?.parse::<Symbol>()?.pack(enc),
            Self::SymbolCode => value.as_quoted(ty)?.parse::<SymbolCode>()?.pack(enc),
            Self::Asset => value.as_quoted(ty)?.parse::<Asset>()?.pack(enc),
            Self::ExtendedAsset => parse_extended_asset(value)?.pack(enc),
        }
        Ok(())
    }

    /// Reads one value and renders its JSON form.
    pub fn unpack(self, dec: &mut Decoder<'_>) -> Result<Value, AbiError> {
        let ty = self.name();
        Ok(match self {
            Self::Bool => Value::Bool(dec.unpack_bool()?),
            Self::Int8 => Value::from(dec.unpack_i8()?),
            Self::Uint8 => Value::from(dec.unpack_u8()?),
            Self::Int16 => Value::from(dec.unpack_i16()?),
            Self::Uint16 => Value::from(dec.unpack_u16()?),
            Self::Int32 => Value::from(dec.unpack_i32()?),
            Self::Uint32 => Value::from(dec.unpack_u32()?),
            Self::Int64 => Value::from(dec.unpack_i64()?),
            Self::Uint64 => Value::from(dec.unpack_u64()?),
            Self::Varint32 => Value::from(dec.unpack_varint32()?),
            Self::Varuint32 => Value::from(dec.unpack_varuint32()?),
            Self::Int128 | Self::Uint128 | Self::Float128 => {
                Value::String(format!("0x{}", hex::encode(dec.read_bytes(16)?)))
            }
            Self::Float32 => {
                let v = dec.unpack_f32()?;
                float_value(ty, v.is_finite(), v.to_string())?
            }
            Self::Float64 => {
                let v = dec.unpack_f64()?;
                float_value(ty, v.is_finite(), v.to_string())?
            }
            Self::TimePoint => {
                Value::String(TimePoint::from_micros(dec.unpack_i64()?).to_string())
            }
            Self::TimePointSec => {
                Value::String(TimePointSec::from_secs(dec.unpack_u32()?).to_string())
            }
            Self::BlockTimestamp => {
                Value::String(BlockTimestamp::from_slot(dec.unpack_u32()?).to_string())
            }
            Self::Name => Value::String(Name::from_u64(dec.unpack_u64()?).to_string()),
            Self::Bytes => Value::String(hex::encode(dec.unpack_bytes()?)),
            Self::String => Value::String(dec.unpack_string()?),
            Self::Checksum160 => Value::String(hex::encode(dec.read_bytes(20)?)),
            Self::Checksum256 => Value::String(hex::encode(dec.read_bytes(32)?)),
            Self::Checksum512 => Value::String(hex::encode(dec.read_bytes(64)?)),
            Self::PublicKey => {
                expect_k1_tag(ty, dec)?;
                let bytes = dec.read_bytes(PUBLIC_KEY_LEN)?;
                let key = PublicKey::from_bytes(bytes)
                    .map_err(|e| AbiError::malformed(ty, hex::encode(bytes), e.to_string()))?;
                Value::String(key.to_string())
            }
            Self::Signature => {
                expect_k1_tag(ty, dec)?;
                let bytes = dec.read_bytes(SIGNATURE_LEN)?;
                let sig = Signature::from_bytes(bytes)
                    .map_err(|e| AbiError::malformed(ty, hex::encode(bytes), e.to_string()))?;
                Value::String(sig.to_string())
            }
            Self::Symbol => Value::String(Symbol::unpack(dec)?.to_string()),
            Self::SymbolCode => Value::String(SymbolCode::unpack(dec)?.to_string()),
            Self::Asset => Value::String(Asset::unpack(dec)?.to_string()),
            Self::ExtendedAsset => {
                let ext = ExtendedAsset::unpack(dec)?;
                let mut map = Map::new();
                map.insert("quantity".into(), Value::String(ext.quantity.to_string()));
                map.insert("contract".into(), Value::String(ext.contract.to_string()));
                Value::Object(map)
            }
        })
    }
}

/// Parses a JSON number or quoted decimal into an integer of the target width.
fn parse_int<T: TryFrom<i128>>(ty: &str, value: &AbiValue) -> Result<T, AbiError> {
    let text = value.as_text(ty)?;
    let wide = text.trim().parse::<i128>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            AbiError::overflow(ty, text.as_str())
        }
        _ => AbiError::malformed(ty, text.as_str(), "not a decimal integer"),
    })?;
    T::try_from(wide).map_err(|_| AbiError::overflow(ty, text.as_str()))
}

fn parse_float<T: FromStr + Copy>(
    ty: &str,
    text: &str,
    is_finite: fn(T) -> bool,
) -> Result<T, AbiError> {
    let v: T = text
        .trim()
        .parse()
        .map_err(|_| AbiError::malformed(ty, text, "not a decimal number"))?;
    if !is_finite(v) {
        return Err(AbiError::overflow(ty, text));
    }
    Ok(v)
}

fn float_value(ty: &str, finite: bool, text: String) -> Result<Value, AbiError> {
    if !finite {
        return Err(AbiError::malformed(ty, text, "non-finite float"));
    }
    serde_json::from_str(&text).map_err(|e| AbiError::malformed(ty, text, e.to_string()))
}

fn parse_hex(ty: &str, value: &AbiValue) -> Result<Vec<u8>, AbiError> {
    let text = value.as_quoted(ty)?;
    hex::decode(&text).map_err(|e| AbiError::malformed(ty, text, e.to_string()))
}

fn parse_fixed_hex(ty: &str, value: &AbiValue, len: usize) -> Result<Vec<u8>, AbiError> {
    let bytes = parse_hex(ty, value)?;
    if bytes.len() != len {
        return Err(AbiError::malformed(
            ty,
            hex::encode(&bytes),
            format!("expected {len} bytes, got {}", bytes.len()),
        ));
    }
    Ok(bytes)
}

fn parse_wide_hex(ty: &str, value: &AbiValue) -> Result<Vec<u8>, AbiError> {
    let text = value.as_quoted(ty)?;
    let digits = text
        .strip_prefix("0x")
        .ok_or_else(|| AbiError::malformed(ty, text.as_str(), "expected a 0x prefix"))?;
    if digits.len() != 32 {
        return Err(AbiError::malformed(ty, text.as_str(), "expected 32 hex digits"));
    }
    hex::decode(digits).map_err(|e| AbiError::malformed(ty, text.as_str(), e.to_string()))
}

fn parse_extended_asset(value: &AbiValue) -> Result<ExtendedAsset, AbiError> {
    let ty = BuiltinType::ExtendedAsset.name();
    let member = |field: &str| {
        value.get(field).ok_or_else(|| AbiError::MissingField {
            structure: ty.to_string(),
            field: field.to_string(),
        })
    };
    if !matches!(value, AbiValue::Object(_)) {
        return Err(AbiError::malformed(ty, value.to_string(), "expected an object"));
    }
    Ok(ExtendedAsset {
        quantity: member("quantity")?.as_quoted("asset")?.parse()?,
        contract: member("contract")?.as_quoted("name")?.parse()?,
    })
}

fn expect_k1_tag(ty: &str, dec: &mut Decoder<'_>) -> Result<(), AbiError> {
    match dec.unpack_u8()? {
        KEY_TYPE_K1 => Ok(()),
        other => Err(AbiError::malformed(
            ty,
            other.to_string(),
            "unsupported curve type tag",
        )),
    }
}

#[cfg(test)]
mod tests;
