// Path: crates/crypto/src/sign/k1/tests/mod.rs
use super::*;
use crate::algorithms::hash::sha256;
use abikit_test_utils::fixtures::{dev_key_pair, second_key_pair, DEV_PUBLIC_KEY};

#[test]
fn test_public_key_derivation() {
    let (private, public) = dev_key_pair();
    let derived = K1Signer.public_key(&private).unwrap();
    assert_eq!(derived, public);
    assert_eq!(derived.to_string(), DEV_PUBLIC_KEY);
}

#[test]
fn test_sign_then_recover() {
    let (private, public) = dev_key_pair();
    let digest = sha256(b"Test message");

    let signature = K1Signer.sign(&digest, &private).unwrap();
    assert!(signature.recovery_id().unwrap() < 4);

    let recovered = K1Signer.recover(&digest, &signature).unwrap();
    assert_eq!(recovered, public);
    assert!(K1Signer.verify(&digest, &signature, &public).is_ok());
}

#[test]
fn test_signing_is_deterministic() {
    let (private, _) = dev_key_pair();
    let digest = sha256(b"same digest");
    let a = K1Signer.sign(&digest, &private).unwrap();
    let b = K1Signer.sign(&digest, &private).unwrap();
    assert_eq!(a.to_string(), b.to_string());
}

#[test]
fn test_distinct_keys_distinct_signatures() {
    let (first, _) = dev_key_pair();
    let (second, second_public) = second_key_pair();
    let digest = sha256(b"payload");
    let a = K1Signer.sign(&digest, &first).unwrap();
    let b = K1Signer.sign(&digest, &second).unwrap();
    assert_ne!(a, b);
    assert!(K1Signer.verify(&digest, &a, &second_public).is_err());
}

#[test]
fn test_signature_survives_text_round_trip() {
    let (private, public) = dev_key_pair();
    let digest = sha256(b"text form");
    let signature = K1Signer.sign(&digest, &private).unwrap();
    let reparsed: Signature = signature.to_string().parse().unwrap();
    assert_eq!(K1Signer.recover(&digest, &reparsed).unwrap(), public);
}

#[test]
fn test_zero_scalar_rejected() {
    let zero = PrivateKey::from_bytes(&[0u8; 32]).unwrap();
    assert!(matches!(
        K1Signer.public_key(&zero),
        Err(CryptoError::InvalidKey(_))
    ));
    assert!(K1Signer.sign(&[1u8; 32], &zero).is_err());
}

#[test]
fn test_generated_key_signs() {
    let private = K1Signer.generate_key().unwrap();
    let public = K1Signer.public_key(&private).unwrap();
    let digest = sha256(b"fresh");
    let signature = K1Signer.sign(&digest, &private).unwrap();
    assert_eq!(K1Signer.recover(&digest, &signature).unwrap(), public);
}

#[test]
fn test_recovery_over_random_digests() {
    let (private, public) = dev_key_pair();
    let mut rng = abikit_test_utils::randomness::TestRng::default();
    for _ in 0..16 {
        let digest = rng.digest();
        let signature = K1Signer.sign(&digest, &private).unwrap();
        assert_eq!(K1Signer.recover(&digest, &signature).unwrap(), public);
    }
}
