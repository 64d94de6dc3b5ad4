// Path: crates/types/src/asset.rs

//! Fixed-point currency amounts.
//!
//! A symbol code is one to seven upper-case letters stored little-endian in
//! a `u64`. A symbol adds a decimal precision in the low byte. An asset is a
//! signed 64-bit amount with the decimal point removed, followed by its
//! symbol, so `"1.0000 EOS"` is amount `10000` at precision `4`.

use crate::codec::{Decoder, Encoder};
use crate::error::AbiError;
use crate::name::Name;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The largest precision a symbol may declare.
pub const MAX_PRECISION: u8 = 16;
/// The longest symbol code.
pub const MAX_SYMBOL_CODE_LEN: usize = 7;

/// One to seven upper-case ASCII letters, packed into eight bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SymbolCode(u64);

impl SymbolCode {
    /// Wraps a raw value after checking it holds a valid code.
    pub fn from_raw(raw: u64) -> Result<Self, AbiError> {
        let code = Self(raw);
        let text = code.to_string();
        validate_code(&text)
            .and_then(|()| {
                // Nothing may follow the first zero byte.
                (raw >> (8 * text.len()) == 0)
                    .then_some(())
                    .ok_or("symbol code has bytes after its terminator")
            })
            .map_err(|reason| AbiError::malformed("symbol_code", format!("{raw:#018x}"), reason))?;
        Ok(code)
    }

    /// The raw packed value.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Writes the eight-byte packed form.
    pub fn pack(&self, enc: &mut Encoder) {
        enc.pack_u64(self.0);
    }

    /// Reads the eight-byte packed form.
    pub fn unpack(dec: &mut Decoder<'_>) -> Result<Self, AbiError> {
        Self::from_raw(dec.unpack_u64()?)
    }
}

fn validate_code(code: &str) -> Result<(), &'static str> {
    if code.is_empty() || code.len() > MAX_SYMBOL_CODE_LEN {
        return Err("symbol code must be 1 to 7 characters");
    }
    if !code.bytes().all(|c| c.is_ascii_uppercase()) {
        return Err("symbol code must be upper-case letters");
    }
    Ok(())
}

impl FromStr for SymbolCode {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_code(s).map_err(|reason| AbiError::malformed("symbol_code", s, reason))?;
        let raw = s
            .bytes()
            .enumerate()
            .fold(0u64, |acc, (i, c)| acc | (u64::from(c) << (8 * i)));
        Ok(Self(raw))
    }
}

impl fmt::Display for SymbolCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.0.to_le_bytes();
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        let text = bytes.get(..end).unwrap_or_default();
        f.write_str(&String::from_utf8_lossy(text))
    }
}

impl fmt::Debug for SymbolCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolCode({self})")
    }
}

/// A symbol code with its decimal precision, written `"4,EOS"`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Symbol {
    precision: u8,
    code: SymbolCode,
}

impl Symbol {
    /// Builds a symbol, checking the precision bound.
    pub fn new(precision: u8, code: SymbolCode) -> Result<Self, AbiError> {
        if precision > MAX_PRECISION {
            return Err(AbiError::malformed(
                "symbol",
                format!("{precision},{code}"),
                "precision must be at most 16",
            ));
        }
        Ok(Self { precision, code })
    }

    /// Digits after the decimal point.
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// The symbol code.
    pub fn code(&self) -> SymbolCode {
        self.code
    }

    /// The packed value: precision in the low byte, code above it.
    pub fn raw(&self) -> u64 {
        (self.code.0 << 8) | u64::from(self.precision)
    }

    /// Decodes a packed value.
    pub fn from_raw(raw: u64) -> Result<Self, AbiError> {
        Self::new((raw & 0xff) as u8, SymbolCode::from_raw(raw >> 8)?)
    }

    /// Writes the precision byte followed by the seven-byte code.
    pub fn pack(&self, enc: &mut Encoder) {
        enc.pack_u64(self.raw());
    }

    /// Reads the eight-byte packed form.
    pub fn unpack(dec: &mut Decoder<'_>) -> Result<Self, AbiError> {
        Self::from_raw(dec.unpack_u64()?)
    }
}

impl FromStr for Symbol {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (precision, code) = s
            .split_once(',')
            .ok_or_else(|| AbiError::malformed("symbol", s, "expected '<precision>,<code>'"))?;
        let precision: u8 = precision
            .trim()
            .parse()
            .map_err(|_| AbiError::malformed("symbol", s, "precision is not a small integer"))?;
        let code: SymbolCode = code.trim().parse()?;
        Self::new(precision, code)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.precision, self.code)
    }
}

/// A signed fixed-point amount of a symbol, written `"1.0000 EOS"`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Asset {
    amount: i64,
    symbol: Symbol,
}

impl Asset {
    /// Builds an asset from its raw amount.
    pub fn new(amount: i64, symbol: Symbol) -> Self {
        Self { amount, symbol }
    }

    /// The amount with the decimal point removed.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// The asset's symbol.
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// Writes the amount followed by the symbol.
    pub fn pack(&self, enc: &mut Encoder) {
        enc.pack_i64(self.amount);
        self.symbol.pack(enc);
    }

    /// Reads an amount followed by a symbol.
    pub fn unpack(dec: &mut Decoder<'_>) -> Result<Self, AbiError> {
        let amount = dec.unpack_i64()?;
        let symbol = Symbol::unpack(dec)?;
        Ok(Self { amount, symbol })
    }
}

impl FromStr for Asset {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let (amount, code) = text
            .split_once(' ')
            .ok_or_else(|| AbiError::malformed("asset", s, "expected '<amount> <code>'"))?;
        let code: SymbolCode = code.trim().parse()?;

        let (negative, digits) = match amount.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, amount),
        };
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) if !f.is_empty() => (i, f),
            Some(_) => return Err(AbiError::malformed("asset", s, "missing digits after '.'")),
            None => (digits, ""),
        };
        if int_part.is_empty()
            || !int_part.bytes().all(|c| c.is_ascii_digit())
            || !frac_part.bytes().all(|c| c.is_ascii_digit())
        {
            return Err(AbiError::malformed("asset", s, "amount is not a decimal number"));
        }
        let precision = u8::try_from(frac_part.len())
            .map_err(|_| AbiError::malformed("asset", s, "precision must be at most 16"))?;
        let symbol = Symbol::new(precision, code).map_err(|_| {
            AbiError::malformed("asset", s, "precision must be at most 16")
        })?;

        let magnitude: i128 = format!("{int_part}{frac_part}")
            .parse()
            .map_err(|_| AbiError::overflow("asset", s))?;
        let signed = if negative { -magnitude } else { magnitude };
        let amount = i64::try_from(signed).map_err(|_| AbiError::overflow("asset", s))?;
        Ok(Self { amount, symbol })
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = usize::from(self.symbol.precision);
        let digits = format!("{:0>width$}", self.amount.unsigned_abs(), width = precision + 1);
        let split = digits.len() - precision;
        let sign = if self.amount < 0 { "-" } else { "" };
        match (digits.get(..split), digits.get(split..)) {
            (Some(int_part), Some(frac_part)) if precision > 0 => {
                write!(f, "{sign}{int_part}.{frac_part} {}", self.symbol.code)
            }
            _ => write!(f, "{sign}{digits} {}", self.symbol.code),
        }
    }
}

/// An asset qualified by the contract account that issues it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct ExtendedAsset {
    /// The amount and symbol.
    pub quantity: Asset,
    /// The issuing contract.
    pub contract: Name,
}

impl ExtendedAsset {
    /// Writes the asset followed by the contract name.
    pub fn pack(&self, enc: &mut Encoder) {
        self.quantity.pack(enc);
        enc.pack_u64(self.contract.as_u64());
    }

    /// Reads an asset followed by a contract name.
    pub fn unpack(dec: &mut Decoder<'_>) -> Result<Self, AbiError> {
        let quantity = Asset::unpack(dec)?;
        let contract = Name::from_u64(dec.unpack_u64()?);
        Ok(Self { quantity, contract })
    }
}

macro_rules! serde_via_string {
    ($($ty:ty),*) => {
        $(
            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.collect_str(self)
                }
            }

            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    let s = String::deserialize(deserializer)?;
                    s.parse().map_err(serde::de::Error::custom)
                }
            }
        )*
    };
}

serde_via_string!(SymbolCode, Symbol, Asset);
