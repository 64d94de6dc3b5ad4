// Path: crates/abi/src/schema/tests/mod.rs

use super::*;
use abikit_test_utils::fixtures::TEST_ABI;
use abikit_test_utils::{assert_err, assert_ok};

fn with_structs(structs: &str) -> Result<Schema, AbiError> {
    Schema::from_json(&format!(r#"{{"version":"eosio::abi/1.1","structs":{structs}}}"#))
}

#[test]
fn test_parse_and_index() {
    let schema = assert_ok!(Schema::from_json(TEST_ABI));
    assert_eq!(schema.version(), "eosio::abi/1.1");
    assert_eq!(schema.get_struct("derived").unwrap().base, "base");
    assert_eq!(schema.get_variant("varianttest").unwrap().types.len(), 3);
    assert_eq!(schema.action_type("transfer".parse().unwrap()), Some("transfer"));
    assert_eq!(schema.action_type("issue".parse().unwrap()), None);
    assert_eq!(schema.table_type("accounts".parse().unwrap()), Some("withopt"));
    assert_eq!(schema.def().error_messages[0].error_code, 42);
}

#[test]
fn test_alias_chains_are_flattened() {
    let schema = assert_ok!(Schema::from_json(TEST_ABI));
    assert_eq!(schema.resolve_alias("owner_name"), "name");
    assert_eq!(schema.resolve_alias("account_name"), "name");
    assert_eq!(schema.resolve_alias("digests"), "checksum256[]");
    assert_eq!(schema.resolve_alias("uint8"), "uint8");
    assert!(schema.is_alias("owner_name"));
    assert!(!schema.is_alias("name"));
}

#[test]
fn test_alias_cycle_is_rejected() {
    let err = assert_err!(Schema::from_json(
        r#"{"types":[{"new_type_name":"a","type":"b"},{"new_type_name":"b","type":"c"},{"new_type_name":"c","type":"a"}]}"#
    ));
    assert!(matches!(err, AbiError::InvalidSchema(ref m) if m.starts_with("alias cycle")));

    let err = assert_err!(Schema::from_json(
        r#"{"types":[{"new_type_name":"a","type":"a"}]}"#
    ));
    assert!(matches!(err, AbiError::InvalidSchema(_)));
}

#[test]
fn test_duplicate_names_are_rejected() {
    let err = assert_err!(with_structs(
        r#"[{"name":"s","base":"","fields":[]},{"name":"s","base":"","fields":[]}]"#
    ));
    assert!(matches!(err, AbiError::InvalidSchema(_)));
}

#[test]
fn test_base_must_resolve_without_cycles() {
    let err = assert_err!(with_structs(r#"[{"name":"s","base":"missing","fields":[]}]"#));
    assert!(matches!(err, AbiError::InvalidSchema(_)));

    let err = assert_err!(with_structs(
        r#"[{"name":"a","base":"b","fields":[]},{"name":"b","base":"a","fields":[]}]"#
    ));
    assert!(matches!(err, AbiError::InvalidSchema(ref m) if m.contains("circular")));
}

#[test]
fn test_extension_fields_must_trail() {
    assert_ok!(with_structs(
        r#"[{"name":"s","base":"","fields":[{"name":"a","type":"uint8"},{"name":"b","type":"uint8$"},{"name":"c","type":"string$"}]}]"#
    ));
    let err = assert_err!(with_structs(
        r#"[{"name":"s","base":"","fields":[{"name":"a","type":"uint8$"},{"name":"b","type":"uint8"}]}]"#
    ));
    assert!(matches!(err, AbiError::InvalidSchema(_)));
}

#[test]
fn test_missing_sections_default() {
    let schema = assert_ok!(Schema::from_json("{}"));
    assert!(schema.def().structs.is_empty());
    assert_eq!(schema.version(), "");
}

#[test]
fn test_document_json_round_trip() {
    let def = assert_ok!(AbiDef::from_json(TEST_ABI));
    let again = assert_ok!(AbiDef::from_json(&assert_ok!(def.to_json())));
    assert_eq!(def, again);
    assert!(matches!(AbiDef::from_json("{"), Err(AbiError::Json(_))));
}
