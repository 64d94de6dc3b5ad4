// Path: crates/types/src/keys/tests.rs
use super::*;

const DEV_WIF: &str = "5KQwrPbwdL6PhXujxW37FSSQZ1JiwsST4cqQzDeyXtP79zkvFD3";
const DEV_PUB: &str = "EOS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV";
const DEV_PUB_K1: &str = "PUB_K1_6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5BoDq63";
const DEV_PVT_K1: &str = "PVT_K1_2bfGi9rYsXQSXXTvJbDAPhHLQUojjaNLomdm3cEJ1XTzMqUt3V";

#[test]
fn test_wif_decodes_to_scalar() {
    let key: PrivateKey = DEV_WIF.parse().unwrap();
    assert_eq!(
        hex::encode(key.as_bytes()),
        "d2653ff7cbb2d8ff129ac27ef5781ce68b2558c41a74af1f2ddca635cbeef07d"
    );
    assert_eq!(key.to_wif(), DEV_WIF);
    assert_eq!(key.to_k1_string(), DEV_PVT_K1);
}

#[test]
fn test_k1_private_form_matches_wif() {
    let a: PrivateKey = DEV_WIF.parse().unwrap();
    let b: PrivateKey = DEV_PVT_K1.parse().unwrap();
    assert_eq!(a, b);
    assert_eq!(format!("{a:?}"), "PrivateKey(<redacted>)");
}

#[test]
fn test_public_key_both_prefixes() {
    let legacy: PublicKey = DEV_PUB.parse().unwrap();
    let k1: PublicKey = DEV_PUB_K1.parse().unwrap();
    assert_eq!(legacy, k1);
    assert_eq!(
        hex::encode(legacy.as_bytes()),
        "02c0ded2bc1f1305fb0faac5e6c03ee3a1924234985427b6167ca569d13df435cf"
    );
    assert_eq!(legacy.to_string(), DEV_PUB);
    assert_eq!(legacy.to_k1_string(), DEV_PUB_K1);
}

#[test]
fn test_public_key_checksum_and_prefix_errors() {
    // Last character altered.
    let tampered = "EOS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CW";
    assert!(tampered.parse::<PublicKey>().is_err());
    // A legacy body with the K1 prefix fails the suffixed checksum.
    let swapped = DEV_PUB.replacen("EOS", "PUB_K1_", 1);
    assert_eq!(
        swapped.parse::<PublicKey>().unwrap_err(),
        CryptoError::ChecksumMismatch
    );
    assert!(matches!(
        "PUB_R1_6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5BoDq63".parse::<PublicKey>(),
        Err(CryptoError::UnsupportedKeyType(_))
    ));
    assert!(matches!(
        "XYZ6MRyAjQq8".parse::<PublicKey>(),
        Err(CryptoError::InvalidKey(_))
    ));
}

#[test]
fn test_signature_text_form() {
    let sig = Signature::from_parts(1, &[1u8; 64]);
    assert_eq!(sig.as_bytes()[0], 0x20);
    assert_eq!(sig.recovery_id().unwrap(), 1);
    let text = sig.to_string();
    assert_eq!(
        text,
        "SIG_K1_KUswCn6fiNCPUBXmQdy537LctZ5wJVr1KQrJ27F4mFG15DrTwQaDyxd9qroVpSk3MGB9SQsYMtXFV16tLG7UXPP7R6kEYY"
    );
    assert_eq!(text.parse::<Signature>().unwrap(), sig);
    assert!(matches!(
        "SIG_R1_abc".parse::<Signature>(),
        Err(CryptoError::UnsupportedKeyType(_))
    ));
}

#[test]
fn test_signature_bad_header() {
    let mut raw = [0u8; SIGNATURE_LEN];
    raw[0] = 27;
    let sig = Signature::from_bytes(&raw).unwrap();
    assert!(sig.recovery_id().is_err());
    assert!(Signature::from_bytes(&raw[..64]).is_err());
}

#[test]
fn test_serde_strings() {
    let key: PublicKey = DEV_PUB_K1.parse().unwrap();
    assert_eq!(serde_json::to_string(&key).unwrap(), format!("\"{DEV_PUB}\""));
}
