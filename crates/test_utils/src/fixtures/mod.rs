//! Test fixtures for reproducible tests

use abikit_types::keys::{PrivateKey, PublicKey};

/// The well-known development private key, in wallet import format.
pub const DEV_PRIVATE_KEY: &str = "5KQwrPbwdL6PhXujxW37FSSQZ1JiwsST4cqQzDeyXtP79zkvFD3";
/// The public key of [`DEV_PRIVATE_KEY`], legacy text form.
pub const DEV_PUBLIC_KEY: &str = "EOS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV";
/// The public key of [`DEV_PRIVATE_KEY`], `PUB_K1_` text form.
pub const DEV_PUBLIC_KEY_K1: &str = "PUB_K1_6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5BoDq63";
/// The `PVT_K1_` text form of [`DEV_PRIVATE_KEY`].
pub const DEV_PRIVATE_KEY_K1: &str = "PVT_K1_2bfGi9rYsXQSXXTvJbDAPhHLQUojjaNLomdm3cEJ1XTzMqUt3V";

/// A second private key, in wallet import format.
pub const SECOND_PRIVATE_KEY: &str = "5JRYimgLBrRLCBAcjHUWCYRv3asNedTYYzVgmiU4q2ZVxMBiJXL";
/// The public key of [`SECOND_PRIVATE_KEY`], legacy text form.
pub const SECOND_PUBLIC_KEY: &str = "EOS6AjF6hvF7GSuSd4sCgfPKq5uWaXvGM2aQtEUCwmEHygQaqxBSV";

/// The main network's chain id.
pub const CHAIN_ID: &str = "aca376f206b8fc25a6ed44dbdc66547c36c6c33e3a119ffbeaef943642f0e906";

/// A reference block id.
pub const BLOCK_ID: &str = "0131a2f8a7dbe3de4b1e0b7e4f60a0b7d62a9f3cb8c2e5f1a0b1c2d3e4f50617";
/// The reference block number derived from [`BLOCK_ID`].
pub const BLOCK_ID_REF_NUM: u16 = 41720;
/// The reference block prefix derived from [`BLOCK_ID`].
pub const BLOCK_ID_REF_PREFIX: u32 = 2_114_657_867;

/// `2021-08-31T05:59:39` as Unix seconds.
pub const EXPIRATION_SECS: u32 = 1_630_389_579;

/// A schema exercising inheritance, optional and extension fields, variants,
/// and alias chains, alongside a token-style `transfer` action.
pub const TEST_ABI: &str = r#"{
    "version": "eosio::abi/1.1",
    "types": [
        {"new_type_name": "account_name", "type": "name"},
        {"new_type_name": "owner_name", "type": "account_name"},
        {"new_type_name": "digests", "type": "checksum256[]"}
    ],
    "structs": [
        {"name": "base", "base": "", "fields": [
            {"name": "a", "type": "name"},
            {"name": "b", "type": "uint16"}
        ]},
        {"name": "derived", "base": "base", "fields": [
            {"name": "c", "type": "uint8"},
            {"name": "d", "type": "string"}
        ]},
        {"name": "withopt", "base": "", "fields": [
            {"name": "a", "type": "string"},
            {"name": "b", "type": "asset?"}
        ]},
        {"name": "testext", "base": "", "fields": [
            {"name": "a", "type": "string"},
            {"name": "b", "type": "checksum256?"},
            {"name": "c", "type": "checksum256$"}
        ]},
        {"name": "varholder", "base": "", "fields": [
            {"name": "v", "type": "varianttest"}
        ]},
        {"name": "listholder", "base": "", "fields": [
            {"name": "owners", "type": "owner_name[]"},
            {"name": "hashes", "type": "digests"}
        ]},
        {"name": "transfer", "base": "", "fields": [
            {"name": "from", "type": "account_name"},
            {"name": "to", "type": "account_name"},
            {"name": "quantity", "type": "asset"},
            {"name": "memo", "type": "string"}
        ]}
    ],
    "actions": [
        {"name": "transfer", "type": "transfer", "ricardian_contract": ""},
        {"name": "testext", "type": "testext", "ricardian_contract": ""}
    ],
    "tables": [
        {"name": "accounts", "index_type": "i64", "key_names": ["currency"], "key_types": ["uint64"], "type": "withopt"}
    ],
    "ricardian_clauses": [
        {"id": "terms", "body": "Be nice."}
    ],
    "error_messages": [
        {"error_code": 42, "error_msg": "insufficient funds"}
    ],
    "abi_extensions": [],
    "variants": [
        {"name": "varianttest", "types": ["uint8", "string", "checksum256"]}
    ]
}"#;

/// The packed `transfer` of `1.0000 EOS` from `helloworld11` to `bob`.
pub const TRANSFER_ARGS: &str = r#"{"from":"helloworld11","to":"bob","quantity":"1.0000 EOS","memo":"transfer from alice to bob"}"#;
/// The packed form of [`TRANSFER_ARGS`].
pub const TRANSFER_HEX: &str = "10428a97721aa36a0000000000000e3d102700000000000004454f53000000001a7472616e736665722066726f6d20616c69636520746f20626f62";

/// A transaction carrying one `eosio.token::transfer` of [`TRANSFER_HEX`]
/// authorized by `helloworld11@active`, expiring at [`EXPIRATION_SECS`].
pub const TRANSFER_TRX_HEX: &str = "4bc52d61a9dd120d4ade000000000100a6823403ea3055000000572d3ccdcd0110428a97721aa36a00000000a8ed32323b10428a97721aa36a0000000000000e3d102700000000000004454f53000000001a7472616e736665722066726f6d20616c69636520746f20626f6200";
/// The reference block number inside [`TRANSFER_TRX_HEX`].
pub const TRANSFER_TRX_REF_NUM: u16 = 56745;
/// The reference block prefix inside [`TRANSFER_TRX_HEX`].
pub const TRANSFER_TRX_REF_PREFIX: u32 = 3_729_394_962;
/// The signing digest of [`TRANSFER_TRX_HEX`] under [`CHAIN_ID`].
pub const TRANSFER_TRX_DIGEST: &str = "d2c5f9a4ee5a9a73af36d9d97b218b9435b8392a5da194ceecfa48f103eb836b";

/// The development key pair.
pub fn dev_key_pair() -> (PrivateKey, PublicKey) {
    key_pair(DEV_PRIVATE_KEY, DEV_PUBLIC_KEY)
}

/// The second key pair.
pub fn second_key_pair() -> (PrivateKey, PublicKey) {
    key_pair(SECOND_PRIVATE_KEY, SECOND_PUBLIC_KEY)
}

#[allow(clippy::expect_used)]
fn key_pair(private: &str, public: &str) -> (PrivateKey, PublicKey) {
    (
        private.parse().expect("fixture private key parses"),
        public.parse().expect("fixture public key parses"),
    )
}

/// The chain id as bytes.
#[allow(clippy::expect_used)]
pub fn chain_id_bytes() -> [u8; 32] {
    hex::decode(CHAIN_ID)
        .expect("fixture chain id is hex")
        .try_into()
        .expect("fixture chain id is 32 bytes")
}

/// Decodes fixture hex.
#[allow(clippy::expect_used)]
pub fn from_hex(s: &str) -> Vec<u8> {
    hex::decode(s).expect("fixture hex decodes")
}

/// Parses a fixture JSON document.
#[allow(clippy::expect_used)]
pub fn json(s: &str) -> serde_json::Value {
    serde_json::from_str(s).expect("fixture json parses")
}
