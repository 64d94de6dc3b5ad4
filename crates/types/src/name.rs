// Path: crates/types/src/name.rs

//! The ledger's compact account name.
//!
//! A name is up to 13 characters drawn from `.12345abcdefghijklmnopqrstuvwxyz`
//! packed into a single `u64`: the first twelve characters take five bits each
//! from the most significant end, and an optional thirteenth character takes
//! the low four bits (so it is limited to `.1-5a-j`).

use crate::error::AbiError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const CHARMAP: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";

/// The maximum number of characters in a name.
pub const MAX_NAME_LEN: usize = 13;

/// A 64-bit compact account, action, table or permission name.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Name(u64);

fn char_to_symbol(c: u8) -> u64 {
    match c {
        b'a'..=b'z' => u64::from(c - b'a') + 6,
        b'1'..=b'5' => u64::from(c - b'1') + 1,
        _ => 0,
    }
}

impl Name {
    /// Wraps a raw 64-bit name value.
    pub const fn from_u64(value: u64) -> Self {
        Self(value)
    }

    /// The raw 64-bit value.
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Whether this is the empty name.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Encodes `s` without checking that it round-trips.
    ///
    /// Characters outside the alphabet collapse to `.` and anything past the
    /// thirteenth character is ignored. Use [`Name::from_str`] for input that
    /// must be rejected when it cannot be represented exactly.
    pub fn encode_lossy(s: &str) -> Self {
        let bytes = s.as_bytes();
        let mut value = 0u64;
        for i in 0..MAX_NAME_LEN {
            let c = bytes.get(i).map_or(0, |&c| char_to_symbol(c));
            if i < 12 {
                value |= (c & 0x1f) << (64 - 5 * (i + 1));
            } else {
                value |= c & 0x0f;
            }
        }
        Self(value)
    }

    fn decode(self) -> String {
        let mut out = [b'.'; MAX_NAME_LEN];
        let mut tmp = self.0;
        for i in 0..MAX_NAME_LEN {
            let (mask, shift) = if i == 0 { (0x0f, 4) } else { (0x1f, 5) };
            let c = CHARMAP.get((tmp & mask) as usize).copied().unwrap_or(b'.');
            if let Some(slot) = out.get_mut(MAX_NAME_LEN - 1 - i) {
                *slot = c;
            }
            tmp >>= shift;
        }
        let end = out.iter().rposition(|&c| c != b'.').map_or(0, |p| p + 1);
        out.get(..end)
            .map(|s| String::from_utf8_lossy(s).into_owned())
            .unwrap_or_default()
    }
}

impl FromStr for Name {
    type Err = AbiError;

    /// Parses a name, rejecting any text that does not survive an
    /// encode/decode round trip byte for byte.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() > MAX_NAME_LEN {
            return Err(AbiError::malformed("name", s, "longer than 13 characters"));
        }
        let name = Self::encode_lossy(s);
        if name.decode() != s {
            return Err(AbiError::malformed(
                "name",
                s,
                "not representable in the name alphabet",
            ));
        }
        Ok(name)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.decode())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.decode())
    }
}

impl From<Name> for u64 {
    fn from(name: Name) -> Self {
        name.0
    }
}

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.decode())
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_value() {
        let name: Name = "hello".parse().unwrap();
        assert_eq!(name.as_u64(), 0x6aa3_1a00_0000_0000);
        assert_eq!(
            name.as_u64().to_le_bytes(),
            [0x00, 0x00, 0x00, 0x00, 0x00, 0x1a, 0xa3, 0x6a]
        );
        assert_eq!(Name::from_u64(0x6aa3_1a00_0000_0000).to_string(), "hello");
    }

    #[test]
    fn test_round_trip_common_names() {
        for s in ["eosio", "eosio.token", "helloworld11", "a", "", "active", "zzzzzzzzzzzzj"] {
            let name: Name = s.parse().unwrap();
            assert_eq!(name.to_string(), s);
        }
    }

    #[test]
    fn test_rejects_unrepresentable() {
        for s in [
            "Hello",          // upper case
            "hello6",         // digit outside 1-5
            "abcdefghijklmn", // too long
            "zzzzzzzzzzzzz",  // 13th char outside .1-5a-j
            "hello.",         // trailing dot is lost on decode
            "hé",
        ] {
            let err = s.parse::<Name>().unwrap_err();
            assert!(
                matches!(err, AbiError::MalformedValue { ref ty, .. } if ty == "name"),
                "{s}: {err:?}"
            );
        }
    }

    #[test]
    fn test_lossy_encoding_matches_strict_for_valid_names() {
        assert_eq!(Name::encode_lossy("eosio.token"), "eosio.token".parse().unwrap());
        assert_eq!(Name::encode_lossy("HELLO"), Name::from_u64(0));
    }

    #[test]
    fn test_serde_as_string() {
        let name: Name = "alice".parse().unwrap();
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"alice\"");
        let back: Name = serde_json::from_str("\"alice\"").unwrap();
        assert_eq!(back, name);
        assert!(serde_json::from_str::<Name>("\"ALICE\"").is_err());
    }
}
