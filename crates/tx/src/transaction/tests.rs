use super::*;
use crate::action::PermissionLevel;
use abikit_abi::builtin::{EOSIO_TOKEN, TRANSACTION_ABI};
use abikit_abi::{AbiSerializer, Schema};
use abikit_test_utils::fixtures::{
    from_hex, BLOCK_ID, BLOCK_ID_REF_NUM, BLOCK_ID_REF_PREFIX, EXPIRATION_SECS, TRANSFER_HEX,
    TRANSFER_TRX_HEX, TRANSFER_TRX_REF_NUM, TRANSFER_TRX_REF_PREFIX,
};
use abikit_test_utils::{assert_err, assert_hex_eq, assert_ok};
use abikit_types::AbiValue;

fn transfer_trx() -> Transaction {
    let mut tx = Transaction::new(0, TimePointSec::from_secs(EXPIRATION_SECS));
    tx.ref_block_num = TRANSFER_TRX_REF_NUM;
    tx.ref_block_prefix = TRANSFER_TRX_REF_PREFIX;
    tx.add_action(Action::new(
        EOSIO_TOKEN,
        "transfer".parse().unwrap(),
        vec!["helloworld11@active".parse::<PermissionLevel>().unwrap()],
        from_hex(TRANSFER_HEX),
    ));
    tx
}

#[test]
fn test_pack_matches_known_transaction() {
    let tx = transfer_trx();
    let packed = assert_ok!(tx.pack());
    assert_hex_eq!(&packed, TRANSFER_TRX_HEX);
    assert_eq!(assert_ok!(Transaction::unpack(&packed)), tx);
}

#[test]
fn test_json_form_packs_identically_through_schema() {
    let tx = transfer_trx();
    let json = serde_json::to_value(&tx).unwrap();
    assert_eq!(json["expiration"], "2021-08-31T05:59:39");
    assert_eq!(json["actions"][0]["data"], TRANSFER_HEX);
    assert!(json["transaction_extensions"].as_array().unwrap().is_empty());

    let schema = Schema::from_json(TRANSACTION_ABI).unwrap();
    let serializer = AbiSerializer::new(&schema);
    let value = AbiValue::parse(&json.to_string()).unwrap();
    let packed = assert_ok!(serializer.pack("transaction", &value));
    assert_hex_eq!(&packed, TRANSFER_TRX_HEX);

    let unpacked = assert_ok!(serializer.unpack("transaction", &packed));
    let back: Transaction = serde_json::from_value(unpacked).unwrap();
    assert_eq!(back, tx);
}

#[test]
fn test_reference_block_derivation() {
    let mut tx = Transaction::new(60, TimePointSec::from_secs(EXPIRATION_SECS));
    assert_ok!(tx.set_reference_block(BLOCK_ID));
    assert_eq!(tx.ref_block_num, BLOCK_ID_REF_NUM);
    assert_eq!(tx.ref_block_prefix, BLOCK_ID_REF_PREFIX);
    assert_eq!(tx.expiration.secs(), EXPIRATION_SECS + 60);
}

#[test]
fn test_reference_block_rejects_bad_ids() {
    let mut tx = Transaction::new(60, TimePointSec::from_secs(0));
    for bad in ["", "0131a2f8", "zz", &BLOCK_ID[..62]] {
        let err = assert_err!(tx.set_reference_block(bad));
        assert!(matches!(err, TransactionError::InvalidBlockId(_)), "{bad}");
    }
    assert_eq!(tx.ref_block_num, 0);
}

#[test]
fn test_from_config_applies_limits() {
    let config = ClientConfig {
        expiration_secs: 120,
        max_net_usage_words: 300,
        max_cpu_usage_ms: 5,
        delay_sec: 2,
        ..ClientConfig::default()
    };
    let tx = Transaction::from_config(&config, TimePointSec::from_secs(1000));
    assert_eq!(tx.expiration.secs(), 1120);
    // varuint32 300 is ac02.
    assert_hex_eq!(
        assert_ok!(tx.pack()),
        concat!("60040000", "0000", "00000000", "ac02", "05", "02", "00", "00", "00")
    );
}

#[test]
fn test_extensions_and_context_free_actions() {
    let mut tx = transfer_trx();
    tx.add_context_free_action(Action::new(
        "hello".parse().unwrap(),
        "hi".parse().unwrap(),
        vec![],
        vec![],
    ));
    tx.add_extension(1, vec![0xab, 0xcd]);
    let packed = assert_ok!(tx.pack());
    assert!(hex::encode(&packed).ends_with("01010002abcd"));
    assert_eq!(assert_ok!(Transaction::unpack(&packed)), tx);

    let json = serde_json::to_value(&tx).unwrap();
    assert_eq!(json["transaction_extensions"][0]["type"], 1);
    assert_eq!(json["transaction_extensions"][0]["data"], "abcd");
}

#[test]
fn test_unpack_truncated_fails() {
    let bytes = from_hex(TRANSFER_TRX_HEX);
    let err = assert_err!(Transaction::unpack(&bytes[..bytes.len() - 1]));
    assert!(matches!(err, CodecError::UnexpectedEof { .. }));
}
