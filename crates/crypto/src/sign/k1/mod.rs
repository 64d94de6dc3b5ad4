// Path: crates/crypto/src/sign/k1/mod.rs
//! secp256k1 recoverable ECDSA using the RustCrypto `k256` crate.
//!
//! Nonces follow RFC 6979, so signing is deterministic, and `s` is always
//! normalized to the low half of the curve order.
//!
//! No nonce grinding is done for the legacy canonical form, which also
//! requires the top bit of `r` clear. Nodes that still enforce that check
//! will reject about half the signatures this signer produces.

use crate::error::CryptoError;
use abikit_api::crypto::{Digest, Signer};
use abikit_types::keys::{PrivateKey, PublicKey, Signature};
use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, SigningKey, VerifyingKey};
use rand::rngs::OsRng;

/// The secp256k1 `Signer`.
#[derive(Debug, Default, Clone, Copy)]
pub struct K1Signer;

impl K1Signer {
    /// Creates a signer.
    pub fn new() -> Self {
        Self
    }

    /// Generates a fresh private key from the operating system RNG.
    pub fn generate_key(&self) -> Result<PrivateKey, CryptoError> {
        let signing_key = SigningKey::random(&mut OsRng);
        PrivateKey::from_bytes(&signing_key.to_bytes())
    }
}

fn signing_key(key: &PrivateKey) -> Result<SigningKey, CryptoError> {
    SigningKey::from_slice(key.as_bytes()).map_err(|e| CryptoError::InvalidKey(e.to_string()))
}

fn encode_public(key: &VerifyingKey) -> Result<PublicKey, CryptoError> {
    PublicKey::from_bytes(key.to_encoded_point(true).as_bytes())
}

impl Signer for K1Signer {
    fn public_key(&self, key: &PrivateKey) -> Result<PublicKey, CryptoError> {
        encode_public(signing_key(key)?.verifying_key())
    }

    fn sign(&self, digest: &Digest, key: &PrivateKey) -> Result<Signature, CryptoError> {
        let (signature, recovery_id) = signing_key(key)?
            .sign_prehash_recoverable(digest)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
        let mut rs = [0u8; 64];
        rs.copy_from_slice(&signature.to_bytes());
        Ok(Signature::from_parts(recovery_id.to_byte(), &rs))
    }

    fn recover(&self, digest: &Digest, signature: &Signature) -> Result<PublicKey, CryptoError> {
        let recovery_id = RecoveryId::from_byte(signature.recovery_id()?).ok_or_else(|| {
            CryptoError::InvalidSignature("recovery id out of range".into())
        })?;
        let ecdsa = EcdsaSignature::from_slice(signature.rs())
            .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;
        let key = VerifyingKey::recover_from_prehash(digest, &ecdsa, recovery_id)
            .map_err(|e| CryptoError::RecoveryFailed(e.to_string()))?;
        encode_public(&key)
    }
}

#[cfg(test)]
mod tests;
