// Path: crates/tx/src/packed.rs

//! A transaction bound to a network id, together with its signatures.

use crate::transaction::Transaction;
use abikit_api::crypto::{Digest, KeyProvider, Signer};
use abikit_crypto::algorithms::hash::{sha256, sha256_concat};
use abikit_types::config::ClientConfig;
use abikit_types::error::TransactionError;
use abikit_types::keys::{PrivateKey, PublicKey, Signature};
use serde_json::{json, Value};

/// The hash of the (always empty) context-free data section.
const CONTEXT_FREE_PLACEHOLDER: [u8; 32] = [0u8; 32];

/// A transaction ready for signing and submission.
///
/// The packed bytes are computed on first use and reused by every later
/// digest; the transaction cannot be mutated through this wrapper, so the
/// cache never goes stale.
#[derive(Debug, Clone)]
pub struct PackedTransaction {
    transaction: Transaction,
    chain_id: [u8; 32],
    signatures: Vec<Signature>,
    packed: Option<Vec<u8>>,
}

impl PackedTransaction {
    /// Wraps `transaction` with no network id and no signatures.
    pub fn new(transaction: Transaction) -> Self {
        Self {
            transaction,
            chain_id: [0u8; 32],
            signatures: Vec::new(),
            packed: None,
        }
    }

    /// Wraps `transaction`, binding the network id from `config` when set.
    pub fn from_config(
        transaction: Transaction,
        config: &ClientConfig,
    ) -> Result<Self, TransactionError> {
        let mut packed = Self::new(transaction);
        if let Some(chain_id) = &config.chain_id {
            packed.set_chain_id(chain_id)?;
        }
        Ok(packed)
    }

    /// The wrapped transaction.
    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    /// Unwraps the transaction, dropping the signatures.
    pub fn into_transaction(self) -> Transaction {
        self.transaction
    }

    /// Binds the transaction to a network given its 32-byte hex id.
    pub fn set_chain_id(&mut self, chain_id: &str) -> Result<(), TransactionError> {
        self.chain_id = parse_chain_id(chain_id)?;
        Ok(())
    }

    /// The bound network id, or `None` while unset.
    pub fn chain_id(&self) -> Option<&[u8; 32]> {
        (self.chain_id != [0u8; 32]).then_some(&self.chain_id)
    }

    /// The collected signatures, in signing order.
    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    /// The packed transaction bytes.
    pub fn packed_trx(&mut self) -> Result<&[u8], TransactionError> {
        let bytes = match self.packed.take() {
            Some(bytes) => bytes,
            None => self.transaction.pack()?,
        };
        Ok(self.packed.insert(bytes))
    }

    /// The transaction id: the hash of the packed bytes, as hex.
    pub fn id(&mut self) -> Result<String, TransactionError> {
        Ok(hex::encode(sha256(self.packed_trx()?)))
    }

    /// The digest signed for network `chain_id`.
    pub fn digest(&mut self, chain_id: &[u8; 32]) -> Result<Digest, TransactionError> {
        let packed = self.packed_trx()?;
        Ok(sha256_concat(&[
            chain_id.as_slice(),
            packed,
            CONTEXT_FREE_PLACEHOLDER.as_slice(),
        ]))
    }

    /// The digest signed for the bound network id.
    pub fn signing_digest(&mut self) -> Result<Digest, TransactionError> {
        let chain_id = *self.chain_id().ok_or(TransactionError::UnboundNetworkId)?;
        self.digest(&chain_id)
    }

    /// Signs with the private key `keys` holds for `public_key`, against the
    /// bound network id.
    ///
    /// Signing twice with the same key leaves one signature.
    pub fn sign(
        &mut self,
        keys: &dyn KeyProvider,
        public_key: &PublicKey,
    ) -> Result<Signature, TransactionError> {
        let digest = self.signing_digest()?;
        let signature = keys
            .sign_digest(&digest, public_key)?
            .ok_or_else(|| TransactionError::KeyNotFound(public_key.to_string()))?;
        self.add_signature(signature);
        tracing::debug!(
            target: "tx",
            %public_key,
            signatures = self.signatures.len(),
            "Signed transaction"
        );
        Ok(signature)
    }

    /// Signs with an explicit private key and network id, ignoring the bound
    /// network id.
    pub fn sign_by_private_key(
        &mut self,
        signer: &dyn Signer,
        private_key: &PrivateKey,
        chain_id: &str,
    ) -> Result<Signature, TransactionError> {
        let chain_id = parse_chain_id(chain_id)?;
        if chain_id == [0u8; 32] {
            return Err(TransactionError::UnboundNetworkId);
        }
        let digest = self.digest(&chain_id)?;
        let signature = signer.sign(&digest, private_key)?;
        self.add_signature(signature);
        Ok(signature)
    }

    /// Appends a signature unless an identical one is already present.
    /// Returns whether it was appended.
    pub fn add_signature(&mut self, signature: Signature) -> bool {
        if self.signatures.contains(&signature) {
            tracing::debug!(target: "tx", %signature, "Skipping duplicate signature");
            return false;
        }
        self.signatures.push(signature);
        true
    }

    /// Recovers the public key behind each signature, in order, against the
    /// bound network id.
    pub fn recover_keys(&mut self, signer: &dyn Signer) -> Result<Vec<PublicKey>, TransactionError> {
        let digest = self.signing_digest()?;
        self.signatures
            .iter()
            .map(|signature| signer.recover(&digest, signature).map_err(Into::into))
            .collect()
    }

    /// The body accepted by a node's `push_transaction` endpoint.
    pub fn to_json(&mut self) -> Result<Value, TransactionError> {
        let signatures: Vec<String> = self.signatures.iter().map(Signature::to_string).collect();
        let packed_trx = hex::encode(self.packed_trx()?);
        Ok(json!({
            "signatures": signatures,
            "compression": "none",
            "packed_context_free_data": "",
            "packed_trx": packed_trx,
        }))
    }
}

fn parse_chain_id(chain_id: &str) -> Result<[u8; 32], TransactionError> {
    hex::decode(chain_id)
        .ok()
        .and_then(|bytes| <[u8; 32]>::try_from(bytes).ok())
        .ok_or_else(|| TransactionError::InvalidChainId(chain_id.to_string()))
}
