// Path: crates/api/src/crypto/mod.rs
//! Defines the signing capability and the key lookup used by transaction signing.

use crate::error::CryptoError;
use abikit_types::keys::{PrivateKey, PublicKey, Signature};

/// A 32-byte message digest.
pub type Digest = [u8; 32];

/// Recoverable-signature operations over a single curve.
///
/// Implementations sign pre-hashed digests; hashing is the caller's concern.
pub trait Signer: Send + Sync {
    /// Derives the public key for a private key.
    fn public_key(&self, key: &PrivateKey) -> Result<PublicKey, CryptoError>;

    /// Signs a digest.
    fn sign(&self, digest: &Digest, key: &PrivateKey) -> Result<Signature, CryptoError>;

    /// Recovers the public key that produced `signature` over `digest`.
    fn recover(&self, digest: &Digest, signature: &Signature) -> Result<PublicKey, CryptoError>;

    /// Checks that `signature` over `digest` was produced by `key`.
    fn verify(
        &self,
        digest: &Digest,
        signature: &Signature,
        key: &PublicKey,
    ) -> Result<(), CryptoError> {
        let recovered = self.recover(digest, signature)?;
        if &recovered == key {
            Ok(())
        } else {
            Err(CryptoError::InvalidSignature(format!(
                "signature recovers to {recovered}, expected {key}"
            )))
        }
    }
}

/// A holder of private keys that signs on behalf of their public keys.
pub trait KeyProvider {
    /// The public keys this provider can sign for.
    fn public_keys(&self) -> Vec<PublicKey>;

    /// Signs `digest` with the private key matching `key`.
    ///
    /// Returns `Ok(None)` when no such key is held.
    fn sign_digest(&self, digest: &Digest, key: &PublicKey)
        -> Result<Option<Signature>, CryptoError>;
}
