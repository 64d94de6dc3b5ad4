// Path: crates/abi/src/serializer/tests/mod.rs

use super::*;
use abikit_test_utils::fixtures::{TEST_ABI, TRANSFER_ARGS, TRANSFER_HEX};
use abikit_test_utils::{assert_err, assert_hex_eq, assert_ok};
use abikit_types::error::ErrorCode;
use serde_json::json;

fn schema() -> Schema {
    Schema::from_json(TEST_ABI).unwrap()
}

fn pack_hex(ty: &str, json: &str) -> Result<String, AbiError> {
    let schema = schema();
    AbiSerializer::new(&schema)
        .pack_json(ty, json)
        .map(hex::encode)
}

fn unpack_hex(ty: &str, hex_bytes: &str) -> Result<Value, AbiError> {
    let schema = schema();
    AbiSerializer::new(&schema).unpack(ty, &hex::decode(hex_bytes).unwrap())
}

#[test]
fn test_transfer_vector() {
    assert_eq!(assert_ok!(pack_hex("transfer", TRANSFER_ARGS)), TRANSFER_HEX);
    let value = assert_ok!(unpack_hex("transfer", TRANSFER_HEX));
    assert_eq!(value, serde_json::from_str::<Value>(TRANSFER_ARGS).unwrap());
    // Output keeps declaration order, not alphabetical order.
    let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["from", "to", "quantity", "memo"]);
}

#[test]
fn test_base_fields_come_first() {
    // Input order is irrelevant; base fields a, b precede c, d on the wire.
    let packed = assert_ok!(pack_hex(
        "derived",
        r#"{"d":"x","c":7,"b":513,"a":"hello"}"#
    ));
    assert_eq!(packed, "00000000001aa36a".to_string() + "0102" + "07" + "0178");

    let value = assert_ok!(unpack_hex("derived", &packed));
    let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["a", "b", "c", "d"]);
}

#[test]
fn test_optional_fields() {
    assert_eq!(
        assert_ok!(pack_hex("withopt", r#"{"a":"hi","b":null}"#)),
        "026869".to_string() + "00"
    );
    assert_eq!(
        assert_ok!(pack_hex("withopt", r#"{"a":"hi","b":"1.0000 EOS"}"#)),
        "026869".to_string() + "01" + "102700000000000004454f5300000000"
    );
    let value = assert_ok!(unpack_hex("withopt", "02686900"));
    assert_eq!(value, json!({"a": "hi", "b": null}));
    // An optional field still has to be present in the input.
    let err = assert_err!(pack_hex("withopt", r#"{"a":"hi"}"#));
    assert!(matches!(err, AbiError::MissingField { ref field, .. } if field == "b"));
}

#[test]
fn test_extension_fields() {
    let digest = "aa".repeat(32);
    let full = format!(r#"{{"a":"hello","b":"{digest}","c":"{digest}"}}"#);
    let expected = format!("0568656c6c6f01{digest}{digest}");
    assert_eq!(assert_ok!(pack_hex("testext", &full)), expected);
    assert_eq!(
        assert_ok!(unpack_hex("testext", &expected)),
        json!({"a": "hello", "b": digest, "c": digest})
    );

    // Omitted extension: nothing written, nothing read back.
    let packed = assert_ok!(pack_hex("testext", r#"{"a":"hello","b":null}"#));
    assert_eq!(packed, "0568656c6c6f00");
    assert_eq!(
        assert_ok!(unpack_hex("testext", &packed)),
        json!({"a": "hello", "b": null})
    );
}

#[test]
fn test_variants() {
    let digest = "01".repeat(32);
    let packed = assert_ok!(pack_hex(
        "varianttest",
        &format!(r#"["checksum256","{digest}"]"#)
    ));
    assert_eq!(packed, format!("02{digest}"));
    assert_eq!(
        assert_ok!(unpack_hex("varianttest", &packed)),
        json!(["checksum256", digest])
    );

    assert_eq!(assert_ok!(pack_hex("varholder", r#"{"v":["uint8",9]}"#)), "0009");

    let err = assert_err!(pack_hex("varianttest", r#"["uint16",1]"#));
    assert!(matches!(err, AbiError::InvalidVariantMember { ref member, .. } if member == "uint16"));
    let err = assert_err!(unpack_hex("varianttest", "0501"));
    assert_eq!(err.code(), "ABI_INVALID_VARIANT_MEMBER");
    let err = assert_err!(pack_hex("varianttest", r#"["uint8"]"#));
    assert_eq!(err.code(), "ABI_MALFORMED_VALUE");
}

#[test]
fn test_arrays_and_alias_chains() {
    let digest = "0f".repeat(32);
    let json = format!(r#"{{"owners":["alice","bob"],"hashes":["{digest}"]}}"#);
    let packed = assert_ok!(pack_hex("listholder", &json));
    assert_eq!(
        packed,
        format!("02{}{}01{digest}", "0000000000855c34", "0000000000000e3d")
    );
    assert_eq!(
        assert_ok!(unpack_hex("listholder", &packed)),
        serde_json::from_str::<Value>(&json).unwrap()
    );
    assert_hex_eq!(
        assert_ok!(AbiSerializer::new(&schema()).pack_json("owner_name", "\"bob\"")),
        "0000000000000e3d"
    );
}

#[test]
fn test_unknown_type() {
    let err = assert_err!(pack_hex("nosuchtype", "1"));
    assert_eq!(err, AbiError::UnknownType("nosuchtype".into()));
    let err = assert_err!(unpack_hex("nosuchtype[]", "01"));
    assert_eq!(err.root(), &AbiError::UnknownType("nosuchtype".into()));
}

#[test]
fn test_missing_field() {
    let err = assert_err!(pack_hex("transfer", r#"{"from":"alice","to":"bob","memo":""}"#));
    assert_eq!(
        err,
        AbiError::MissingField {
            structure: "transfer".into(),
            field: "quantity".into()
        }
    );
}

#[test]
fn test_nested_errors_carry_field_path() {
    let err = assert_err!(pack_hex(
        "transfer",
        r#"{"from":"alice","to":"bob","quantity":"1.0000 EOS","memo":12}"#
    ));
    assert_eq!(err.code(), "ABI_MALFORMED_VALUE");
    assert!(err.to_string().starts_with("transfer.memo: "), "{err}");

    let err = assert_err!(pack_hex("derived", r#"{"a":"hello","b":70000,"c":1,"d":""}"#));
    assert_eq!(err.code(), "ABI_OVERFLOW");
    assert!(err.to_string().starts_with("base.b: "), "{err}");
}

#[test]
fn test_truncated_input_is_eof() {
    let err = assert_err!(unpack_hex("transfer", &TRANSFER_HEX[..20]));
    assert!(matches!(err.root(), AbiError::UnexpectedEof { .. }));
}

#[test]
fn test_trailing_bytes_are_ignored() {
    let value = assert_ok!(unpack_hex("uint8", "0102"));
    assert_eq!(value, json!(1));
}

#[test]
fn test_recursion_is_bounded() {
    let schema = Schema::from_json(
        r#"{"structs":[{"name":"node","base":"","fields":[{"name":"next","type":"node?"}]}]}"#,
    )
    .unwrap();
    let serializer = AbiSerializer::new(&schema);
    assert_eq!(
        hex::encode(assert_ok!(serializer.pack_json("node", r#"{"next":{"next":null}}"#))),
        "0100"
    );

    let mut deep = String::from("null");
    for _ in 0..100 {
        deep = format!(r#"{{"next":{deep}}}"#);
    }
    let err = assert_err!(serializer.pack_json("node", &deep));
    assert_eq!(err.code(), "ABI_MALFORMED_VALUE");

    let err = assert_err!(serializer.unpack("node", &[1u8; 100]));
    assert_eq!(err.code(), "ABI_MALFORMED_VALUE");
}
