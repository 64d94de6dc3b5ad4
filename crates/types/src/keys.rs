// Path: crates/types/src/keys.rs

//! secp256k1 key and signature containers and their base58 text forms.
//!
//! These types only carry bytes and validate text encodings; curve
//! arithmetic lives behind the `Signer` capability in `abikit-api`.

use crate::error::CryptoError;
use ripemd::Ripemd160;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroizing;

/// The wire tag for the only curve handled here.
pub const KEY_TYPE_K1: u8 = 0;
/// The length of a compressed public key.
pub const PUBLIC_KEY_LEN: usize = 33;
/// The length of a private scalar.
pub const PRIVATE_KEY_LEN: usize = 32;
/// The length of a compact recoverable signature.
pub const SIGNATURE_LEN: usize = 65;

const LEGACY_PUBLIC_PREFIX: &str = "EOS";
const K1_PUBLIC_PREFIX: &str = "PUB_K1_";
const K1_PRIVATE_PREFIX: &str = "PVT_K1_";
const K1_SIGNATURE_PREFIX: &str = "SIG_K1_";
const WIF_VERSION: u8 = 0x80;
const CHECKSUM_LEN: usize = 4;

fn ripemd160_checksum(data: &[u8], suffix: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    hasher.update(suffix);
    truncate_checksum(&hasher.finalize())
}

fn double_sha256_checksum(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    truncate_checksum(&Sha256::digest(Sha256::digest(data)))
}

fn truncate_checksum(digest: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut out = [0u8; CHECKSUM_LEN];
    for (o, d) in out.iter_mut().zip(digest) {
        *o = *d;
    }
    out
}

fn encode_checked(payload: &[u8], checksum: [u8; CHECKSUM_LEN]) -> String {
    let mut raw = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
    raw.extend_from_slice(payload);
    raw.extend_from_slice(&checksum);
    bs58::encode(raw).into_string()
}

/// Decodes base58 text and splits off the trailing checksum.
fn decode_base58(text: &str, payload_len: usize) -> Result<(Vec<u8>, [u8; CHECKSUM_LEN]), CryptoError> {
    let raw = bs58::decode(text)
        .into_vec()
        .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
    if raw.len() != payload_len + CHECKSUM_LEN {
        return Err(CryptoError::InvalidKey(format!(
            "expected {} bytes, got {}",
            payload_len + CHECKSUM_LEN,
            raw.len()
        )));
    }
    let (payload, checksum) = raw.split_at(payload_len);
    let mut sum = [0u8; CHECKSUM_LEN];
    sum.copy_from_slice(checksum);
    Ok((payload.to_vec(), sum))
}

/// A compressed secp256k1 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKey([u8; PUBLIC_KEY_LEN]);

impl PublicKey {
    /// Wraps 33 compressed-point bytes. Only the SEC1 prefix byte is checked.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; PUBLIC_KEY_LEN] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidKey(format!("public key must be 33 bytes, got {}", bytes.len()))
        })?;
        if !matches!(arr.first(), Some(0x02) | Some(0x03)) {
            return Err(CryptoError::InvalidKey(
                "public key is not a compressed point".into(),
            ));
        }
        Ok(Self(arr))
    }

    /// The compressed point.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }

    /// The `PUB_K1_` text form.
    pub fn to_k1_string(&self) -> String {
        format!(
            "{K1_PUBLIC_PREFIX}{}",
            encode_checked(&self.0, ripemd160_checksum(&self.0, b"K1"))
        )
    }

    /// The legacy `EOS` text form.
    pub fn to_legacy_string(&self) -> String {
        format!(
            "{LEGACY_PUBLIC_PREFIX}{}",
            encode_checked(&self.0, ripemd160_checksum(&self.0, b""))
        )
    }
}

impl FromStr for PublicKey {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (body, suffix): (&str, &[u8]) = if let Some(body) = s.strip_prefix(K1_PUBLIC_PREFIX) {
            (body, b"K1")
        } else if let Some(body) = s.strip_prefix(LEGACY_PUBLIC_PREFIX) {
            (body, b"")
        } else if s.starts_with("PUB_") {
            return Err(CryptoError::UnsupportedKeyType(s.to_string()));
        } else {
            return Err(CryptoError::InvalidKey(format!("unrecognized public key prefix: {s}")));
        };
        let (payload, checksum) = decode_base58(body, PUBLIC_KEY_LEN)?;
        if ripemd160_checksum(&payload, suffix) != checksum {
            return Err(CryptoError::ChecksumMismatch);
        }
        Self::from_bytes(&payload)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_legacy_string())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_legacy_string())
    }
}

/// A secp256k1 private scalar. The bytes are wiped when dropped.
#[derive(Clone)]
pub struct PrivateKey(Zeroizing<[u8; PRIVATE_KEY_LEN]>);

impl PrivateKey {
    /// Wraps 32 scalar bytes. Range checking is left to the signer.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; PRIVATE_KEY_LEN] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidKey(format!("private key must be 32 bytes, got {}", bytes.len()))
        })?;
        Ok(Self(Zeroizing::new(arr)))
    }

    /// The raw scalar.
    pub fn as_bytes(&self) -> &[u8; PRIVATE_KEY_LEN] {
        &self.0
    }

    /// The wallet import format text.
    pub fn to_wif(&self) -> String {
        let mut payload = Zeroizing::new(Vec::with_capacity(1 + PRIVATE_KEY_LEN));
        payload.push(WIF_VERSION);
        payload.extend_from_slice(self.0.as_ref());
        encode_checked(&payload, double_sha256_checksum(&payload))
    }

    /// The `PVT_K1_` text form.
    pub fn to_k1_string(&self) -> String {
        format!(
            "{K1_PRIVATE_PREFIX}{}",
            encode_checked(self.0.as_ref(), ripemd160_checksum(self.0.as_ref(), b"K1"))
        )
    }

    fn from_wif(s: &str) -> Result<Self, CryptoError> {
        let raw = Zeroizing::new(
            bs58::decode(s)
                .into_vec()
                .map_err(|e| CryptoError::InvalidKey(e.to_string()))?,
        );
        // 37 bytes uncompressed, 38 with the trailing compression flag.
        let body_len = match raw.len() {
            37 => 33,
            38 => 34,
            n => return Err(CryptoError::InvalidKey(format!("bad WIF length {n}"))),
        };
        let (body, checksum) = raw.split_at(body_len);
        if double_sha256_checksum(body) != checksum {
            return Err(CryptoError::ChecksumMismatch);
        }
        match body.split_first() {
            Some((&WIF_VERSION, rest)) => Self::from_bytes(rest.get(..PRIVATE_KEY_LEN).unwrap_or(rest)),
            _ => Err(CryptoError::InvalidKey("bad WIF version byte".into())),
        }
    }
}

impl FromStr for PrivateKey {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(body) = s.strip_prefix(K1_PRIVATE_PREFIX) {
            let (payload, checksum) = decode_base58(body, PRIVATE_KEY_LEN)?;
            let payload = Zeroizing::new(payload);
            if ripemd160_checksum(&payload, b"K1") != checksum {
                return Err(CryptoError::ChecksumMismatch);
            }
            return Self::from_bytes(&payload);
        }
        if s.starts_with("PVT_") {
            return Err(CryptoError::UnsupportedKeyType(
                s.split('_').take(2).collect::<Vec<_>>().join("_"),
            ));
        }
        Self::from_wif(s)
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// A compact recoverable secp256k1 signature: header byte, then `r`, then `s`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; SIGNATURE_LEN]);

impl Signature {
    /// Offset added to the recovery id in the header byte (27 + 4 for compressed keys).
    pub const HEADER_OFFSET: u8 = 31;

    /// Wraps 65 signature bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; SIGNATURE_LEN] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidSignature(format!("signature must be 65 bytes, got {}", bytes.len()))
        })?;
        Ok(Self(arr))
    }

    /// Assembles a signature from a recovery id and the 64-byte `r ‖ s`.
    pub fn from_parts(recovery_id: u8, rs: &[u8; 64]) -> Self {
        let mut arr = [0u8; SIGNATURE_LEN];
        if let Some((header, body)) = arr.split_first_mut() {
            *header = recovery_id.wrapping_add(Self::HEADER_OFFSET);
            body.copy_from_slice(rs);
        }
        Self(arr)
    }

    /// The raw 65 bytes.
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    /// The recovery id embedded in the header byte.
    pub fn recovery_id(&self) -> Result<u8, CryptoError> {
        let header = self.0.first().copied().unwrap_or_default();
        match header.checked_sub(Self::HEADER_OFFSET) {
            Some(id) if id < 4 => Ok(id),
            _ => Err(CryptoError::InvalidSignature(format!("bad header byte {header}"))),
        }
    }

    /// The 64-byte `r ‖ s` body.
    pub fn rs(&self) -> &[u8] {
        self.0.get(1..).unwrap_or_default()
    }
}

impl FromStr for Signature {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s.strip_prefix(K1_SIGNATURE_PREFIX).ok_or_else(|| {
            if s.starts_with("SIG_") {
                CryptoError::UnsupportedKeyType(s.chars().take(6).collect())
            } else {
                CryptoError::InvalidSignature(format!("unrecognized signature prefix: {s}"))
            }
        })?;
        let (payload, checksum) = decode_base58(body, SIGNATURE_LEN)
            .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;
        if ripemd160_checksum(&payload, b"K1") != checksum {
            return Err(CryptoError::ChecksumMismatch);
        }
        Self::from_bytes(&payload)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{K1_SIGNATURE_PREFIX}{}",
            encode_checked(&self.0, ripemd160_checksum(&self.0, b"K1"))
        )
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({self})")
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

serde_via_string!(PublicKey, Signature);

#[cfg(test)]
mod tests;
