// Path: crates/crypto/src/key_store.rs
//! In-memory storage for private keys, indexed by public key.
//!
//! Keys never leave the process and are not persisted. A single mutex guards
//! insert, remove and lookup, so one store can be shared across threads that
//! import keys and sign concurrently. Removed keys are zeroized as they drop.

use crate::error::CryptoError;
use crate::sign::k1::K1Signer;
use abikit_api::crypto::{Digest, KeyProvider, Signer};
use abikit_types::keys::{PrivateKey, PublicKey, Signature};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A mutex-guarded map from public key to private key.
#[derive(Default)]
pub struct KeyStore {
    signer: K1Signer,
    keys: Mutex<BTreeMap<PublicKey, PrivateKey>>,
}

impl KeyStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, BTreeMap<PublicKey, PrivateKey>> {
        // A panic while holding the lock cannot leave the map half-updated.
        self.keys.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Imports a private key given as WIF or `PVT_K1_` text and returns its public key.
    pub fn import(&self, private_key: &str) -> Result<PublicKey, CryptoError> {
        self.import_key(private_key.parse()?)
    }

    /// Imports a decoded private key and returns its public key.
    ///
    /// Importing a key that is already present is a no-op.
    pub fn import_key(&self, private_key: PrivateKey) -> Result<PublicKey, CryptoError> {
        let public_key = self.signer.public_key(&private_key)?;
        let mut keys = self.entries();
        if keys.insert(public_key, private_key).is_none() {
            log::info!("Imported signing key {}", public_key);
        }
        Ok(public_key)
    }

    /// Removes the key for `public_key`, returning whether one was held.
    pub fn remove(&self, public_key: &PublicKey) -> bool {
        let removed = self.entries().remove(public_key).is_some();
        if removed {
            log::info!("Removed signing key {}", public_key);
        }
        removed
    }

    /// Whether a private key is held for `public_key`.
    pub fn contains(&self, public_key: &PublicKey) -> bool {
        self.entries().contains_key(public_key)
    }

    /// The number of held keys.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

impl KeyProvider for KeyStore {
    fn public_keys(&self) -> Vec<PublicKey> {
        self.entries().keys().copied().collect()
    }

    fn sign_digest(
        &self,
        digest: &Digest,
        key: &PublicKey,
    ) -> Result<Option<Signature>, CryptoError> {
        let keys = self.entries();
        match keys.get(key) {
            Some(private_key) => self.signer.sign(digest, private_key).map(Some),
            None => Ok(None),
        }
    }
}

impl std::fmt::Debug for KeyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyStore")
            .field("public_keys", &self.public_keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::hash::sha256;
    use abikit_test_utils::fixtures::{
        dev_key_pair, second_key_pair, DEV_PRIVATE_KEY, SECOND_PRIVATE_KEY,
    };
    use std::sync::Arc;

    #[test]
    fn test_import_returns_matching_public_key() {
        let store = KeyStore::new();
        let (_, public) = dev_key_pair();
        assert_eq!(store.import(DEV_PRIVATE_KEY).unwrap(), public);
        assert!(store.contains(&public));
        assert_eq!(store.public_keys(), vec![public]);

        // Re-import is idempotent.
        store.import(DEV_PRIVATE_KEY).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_import_rejects_garbage() {
        let store = KeyStore::new();
        assert!(store.import("not a key").is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_sign_digest_by_public_key() {
        let store = KeyStore::new();
        let public = store.import(DEV_PRIVATE_KEY).unwrap();
        let digest = sha256(b"digest");

        let signature = store.sign_digest(&digest, &public).unwrap().unwrap();
        assert_eq!(K1Signer.recover(&digest, &signature).unwrap(), public);

        let (_, absent) = second_key_pair();
        assert!(store.sign_digest(&digest, &absent).unwrap().is_none());
    }

    #[test]
    fn test_remove() {
        let store = KeyStore::new();
        let public = store.import(DEV_PRIVATE_KEY).unwrap();
        assert!(store.remove(&public));
        assert!(!store.remove(&public));
        assert!(store
            .sign_digest(&[0u8; 32], &public)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_shared_across_threads() {
        let store = Arc::new(KeyStore::new());
        let handles: Vec<_> = [DEV_PRIVATE_KEY, SECOND_PRIVATE_KEY]
            .into_iter()
            .map(|wif| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.import(wif).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        let (_, a) = dev_key_pair();
        let (_, b) = second_key_pair();
        let mut expected = vec![a, b];
        expected.sort();
        assert_eq!(store.public_keys(), expected);
    }
}
