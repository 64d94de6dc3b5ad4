use super::*;
use abikit_test_utils::fixtures::DEV_PUBLIC_KEY;
use abikit_types::error::ErrorCode;

fn pack(ty: &str, json: &str) -> Result<String, AbiError> {
    let builtin = BuiltinType::from_name(ty).unwrap();
    let mut enc = Encoder::new();
    builtin.pack(&mut enc, &AbiValue::parse(json).unwrap())?;
    Ok(hex::encode(enc.into_bytes()))
}

fn unpack(ty: &str, hex_bytes: &str) -> Value {
    let bytes = hex::decode(hex_bytes).unwrap();
    let mut dec = Decoder::new(&bytes);
    let v = BuiltinType::from_name(ty).unwrap().unpack(&mut dec).unwrap();
    assert!(dec.is_end(), "{ty} left trailing bytes");
    v
}

fn round_trip(ty: &str, json: &str) {
    let packed = pack(ty, json).unwrap();
    assert_eq!(unpack(ty, &packed), serde_json::from_str::<Value>(json).unwrap(), "{ty}");
}

#[test]
fn test_names_cover_every_builtin() {
    assert_eq!(BuiltinType::ALL.len(), 31);
    for t in BuiltinType::ALL {
        assert_eq!(BuiltinType::from_name(t.name()), Some(t));
    }
    assert_eq!(BuiltinType::from_name("uint256"), None);
}

#[test]
fn test_int8_range() {
    assert_eq!(pack("int8", "127").unwrap(), "7f");
    assert_eq!(pack("int8", "-1").unwrap(), "ff");
    assert_eq!(pack("int8", "0").unwrap(), "00");
    for bad in ["128", "255", "-129"] {
        let err = pack("int8", bad).unwrap_err();
        assert!(matches!(err, AbiError::Overflow { .. }), "{bad}: {err}");
    }
}

#[test]
fn test_integers_accept_quoted_decimal() {
    assert_eq!(pack("uint16", "\"513\"").unwrap(), "0102");
    assert_eq!(pack("uint64", "\"18446744073709551615\"").unwrap(), "ffffffffffffffff");
    assert_eq!(pack("uint64", "18446744073709551616").unwrap_err().code(), "ABI_OVERFLOW");
    assert_eq!(
        pack("int64", "\"999999999999999999999999999999999999999999\"").unwrap_err().code(),
        "ABI_OVERFLOW"
    );
    assert_eq!(pack("uint32", "-1").unwrap_err().code(), "ABI_OVERFLOW");
    assert_eq!(pack("uint32", "1.5").unwrap_err().code(), "ABI_MALFORMED_VALUE");
    assert_eq!(pack("uint32", "\"abc\"").unwrap_err().code(), "ABI_MALFORMED_VALUE");
    assert_eq!(pack("uint32", "[1]").unwrap_err().code(), "ABI_MALFORMED_VALUE");
}

#[test]
fn test_integer_round_trips() {
    for (ty, v) in [
        ("uint8", "255"),
        ("int16", "-32768"),
        ("uint32", "4294967295"),
        ("int64", "-9223372036854775808"),
        ("uint64", "18446744073709551615"),
        ("varint32", "-2147483648"),
        ("varuint32", "4294967295"),
    ] {
        round_trip(ty, v);
    }
}

#[test]
fn test_varints() {
    assert_eq!(pack("varuint32", "300").unwrap(), "ac02");
    assert_eq!(pack("varint32", "-1").unwrap(), "01");
    assert_eq!(pack("varint32", "1").unwrap(), "02");
}

#[test]
fn test_bool() {
    assert_eq!(pack("bool", "true").unwrap(), "01");
    assert_eq!(pack("bool", "false").unwrap(), "00");
    assert!(pack("bool", "1").is_err());
    round_trip("bool", "true");

    let mut dec = Decoder::new(&[2]);
    let err = BuiltinType::Bool.unpack(&mut dec).unwrap_err();
    assert_eq!(err.code(), "ABI_MALFORMED_VALUE");
}

#[test]
fn test_wide_types_are_verbatim_hex() {
    let v = "\"0x0102030405060708090a0b0c0d0e0f10\"";
    assert_eq!(pack("uint128", v).unwrap(), "0102030405060708090a0b0c0d0e0f10");
    round_trip("int128", v);
    round_trip("float128", v);
    assert!(pack("uint128", "\"0102030405060708090a0b0c0d0e0f10\"").is_err());
    assert!(pack("uint128", "\"0x0102\"").is_err());
    assert!(pack("uint128", "12").is_err());
}

#[test]
fn test_floats() {
    assert_eq!(pack("float32", "1.5").unwrap(), "0000c03f");
    assert_eq!(pack("float64", "\"-2\"").unwrap(), "00000000000000c0");
    round_trip("float64", "0.1");
    round_trip("float32", "0.25");
    assert_eq!(pack("float32", "1e39").unwrap_err().code(), "ABI_OVERFLOW");
    assert_eq!(pack("float64", "\"NaN\"").unwrap_err().code(), "ABI_OVERFLOW");
}

#[test]
fn test_name() {
    assert_eq!(pack("name", "\"hello\"").unwrap(), "00000000001aa36a");
    assert_eq!(unpack("name", "00000000001aa36a"), Value::String("hello".into()));
    round_trip("name", "\"eosio.token\"");
    // Characters outside the alphabet and over-long names must not be mangled silently.
    assert_eq!(pack("name", "\"Hello\"").unwrap_err().code(), "ABI_MALFORMED_VALUE");
    assert_eq!(pack("name", "\"abcdefghijklmn\"").unwrap_err().code(), "ABI_MALFORMED_VALUE");
    // Names must be quoted.
    assert!(pack("name", "12").is_err());
}

#[test]
fn test_bytes_and_string() {
    assert_eq!(pack("bytes", "\"ff8000\"").unwrap(), "03ff8000");
    round_trip("bytes", "\"ff8000\"");
    assert!(pack("bytes", "\"f\"").is_err());
    assert_eq!(pack("string", "\"hello\"").unwrap(), "0568656c6c6f");
    round_trip("string", "\"h\\u00e9\\\"llo\"");
}

#[test]
fn test_checksums_require_exact_length() {
    let d32 = format!("\"{}\"", "ab".repeat(32));
    assert_eq!(pack("checksum256", &d32).unwrap(), "ab".repeat(32));
    round_trip("checksum160", &format!("\"{}\"", "01".repeat(20)));
    round_trip("checksum512", &format!("\"{}\"", "02".repeat(64)));
    assert_eq!(pack("checksum160", &d32).unwrap_err().code(), "ABI_MALFORMED_VALUE");
}

#[test]
fn test_public_key_and_signature() {
    let packed = pack("public_key", &format!("\"{DEV_PUBLIC_KEY}\"")).unwrap();
    assert_eq!(
        packed,
        "0002c0ded2bc1f1305fb0faac5e6c03ee3a1924234985427b6167ca569d13df435cf"
    );
    assert_eq!(unpack("public_key", &packed), Value::String(DEV_PUBLIC_KEY.into()));
    let k1 = pack("public_key", "\"PUB_K1_6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5BoDq63\"");
    assert_eq!(k1.unwrap(), packed);

    let sig = Signature::from_parts(1, &[1u8; 64]).to_string();
    round_trip("signature", &format!("\"{sig}\""));
    assert!(pack("signature", "\"SIG_K1_nope\"").is_err());

    let mut dec_bytes = hex::decode(&packed).unwrap();
    dec_bytes[0] = 1;
    let err = BuiltinType::PublicKey
        .unpack(&mut Decoder::new(&dec_bytes))
        .unwrap_err();
    assert_eq!(err.code(), "ABI_MALFORMED_VALUE");
}

#[test]
fn test_asset_layout() {
    assert_eq!(
        pack("asset", "\"1.0000 EOS\"").unwrap(),
        "102700000000000004454f5300000000"
    );
    round_trip("asset", "\"-0.0005 SYS\"");
    round_trip("symbol", "\"4,EOS\"");
    round_trip("symbol_code", "\"EOS\"");
    assert!(pack("asset", "\"1.0000\"").is_err());
    assert!(pack("symbol", "\"17,EOS\"").is_err());
}

#[test]
fn test_extended_asset() {
    let json = r#"{"quantity":"1.0000 EOS","contract":"eosio.token"}"#;
    assert_eq!(
        pack("extended_asset", json).unwrap(),
        "102700000000000004454f530000000000a6823403ea3055"
    );
    round_trip("extended_asset", json);
    let err = pack("extended_asset", r#"{"quantity":"1.0000 EOS"}"#).unwrap_err();
    assert!(matches!(err, AbiError::MissingField { ref field, .. } if field == "contract"));
}

#[test]
fn test_time_types() {
    assert_eq!(pack("time_point_sec", "\"2021-08-31T05:59:39\"").unwrap(), "4bc52d61");
    round_trip("time_point_sec", "\"2021-08-31T05:59:39\"");
    round_trip("time_point", "\"2021-08-31T05:59:39.500\"");
    round_trip("block_timestamp_type", "\"2021-08-31T05:59:39.500\"");
    assert_eq!(pack("block_timestamp_type", "\"2000-01-01T00:00:01\"").unwrap(), "02000000");
    assert!(pack("time_point", "\"yesterday\"").is_err());
}

#[test]
fn test_short_input_is_eof() {
    let err = BuiltinType::Uint64
        .unpack(&mut Decoder::new(&[1, 2, 3]))
        .unwrap_err();
    assert_eq!(err, AbiError::UnexpectedEof { needed: 8, remaining: 3 });
}
