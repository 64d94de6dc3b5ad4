// Path: crates/abi/src/builtin.rs

//! Schemas every client needs without fetching them from a node.

use abikit_types::Name;

/// The account of the system token contract.
pub const EOSIO_TOKEN: Name = Name::from_u64(0x5530_ea03_3482_a600);

/// The system token contract's schema.
pub const EOSIO_TOKEN_ABI: &str = r#"
{
    "version": "eosio::abi/1.1",
    "types": [],
    "structs": [
        {"name": "account", "base": "", "fields": [{"name": "balance", "type": "asset"}]},
        {"name": "close", "base": "", "fields": [{"name": "owner", "type": "name"}, {"name": "symbol", "type": "symbol"}]},
        {"name": "create", "base": "", "fields": [{"name": "issuer", "type": "name"}, {"name": "maximum_supply", "type": "asset"}]},
        {"name": "currency_stats", "base": "", "fields": [{"name": "supply", "type": "asset"}, {"name": "max_supply", "type": "asset"}, {"name": "issuer", "type": "name"}]},
        {"name": "issue", "base": "", "fields": [{"name": "to", "type": "name"}, {"name": "quantity", "type": "asset"}, {"name": "memo", "type": "string"}]},
        {"name": "open", "base": "", "fields": [{"name": "owner", "type": "name"}, {"name": "symbol", "type": "symbol"}, {"name": "ram_payer", "type": "name"}]},
        {"name": "retire", "base": "", "fields": [{"name": "quantity", "type": "asset"}, {"name": "memo", "type": "string"}]},
        {"name": "transfer", "base": "", "fields": [{"name": "from", "type": "name"}, {"name": "to", "type": "name"}, {"name": "quantity", "type": "asset"}, {"name": "memo", "type": "string"}]}
    ],
    "actions": [
        {"name": "close", "type": "close", "ricardian_contract": ""},
        {"name": "create", "type": "create", "ricardian_contract": ""},
        {"name": "issue", "type": "issue", "ricardian_contract": ""},
        {"name": "open", "type": "open", "ricardian_contract": ""},
        {"name": "retire", "type": "retire", "ricardian_contract": ""},
        {"name": "transfer", "type": "transfer", "ricardian_contract": ""}
    ],
    "tables": [
        {"name": "accounts", "index_type": "i64", "key_names": [], "key_types": [], "type": "account"},
        {"name": "stat", "index_type": "i64", "key_names": [], "key_types": [], "type": "currency_stats"}
    ],
    "ricardian_clauses": [],
    "error_messages": [],
    "abi_extensions": [],
    "variants": []
}
"#;

/// The schema of the transaction envelope itself, for packing and
/// unpacking whole transactions through the generic serializer.
pub const TRANSACTION_ABI: &str = r#"
{
    "version": "eosio::abi/1.1",
    "types": [],
    "structs": [
        {"name": "permission_level", "base": "", "fields": [{"name": "actor", "type": "name"}, {"name": "permission", "type": "name"}]},
        {"name": "action", "base": "", "fields": [{"name": "account", "type": "name"}, {"name": "name", "type": "name"}, {"name": "authorization", "type": "permission_level[]"}, {"name": "data", "type": "bytes"}]},
        {"name": "extension", "base": "", "fields": [{"name": "type", "type": "uint16"}, {"name": "data", "type": "bytes"}]},
        {"name": "transaction_header", "base": "", "fields": [{"name": "expiration", "type": "time_point_sec"}, {"name": "ref_block_num", "type": "uint16"}, {"name": "ref_block_prefix", "type": "uint32"}, {"name": "max_net_usage_words", "type": "varuint32"}, {"name": "max_cpu_usage_ms", "type": "uint8"}, {"name": "delay_sec", "type": "varuint32"}]},
        {"name": "transaction", "base": "transaction_header", "fields": [{"name": "context_free_actions", "type": "action[]"}, {"name": "actions", "type": "action[]"}, {"name": "transaction_extensions", "type": "extension[]"}]}
    ],
    "actions": [],
    "tables": [],
    "ricardian_clauses": [],
    "error_messages": [],
    "abi_extensions": [],
    "variants": []
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Schema;

    #[test]
    fn test_builtin_schemas_are_valid() {
        let token = Schema::from_json(EOSIO_TOKEN_ABI).unwrap();
        assert_eq!(token.action_type("transfer".parse().unwrap()), Some("transfer"));
        assert_eq!(token.table_type("stat".parse().unwrap()), Some("currency_stats"));
        let trx = Schema::from_json(TRANSACTION_ABI).unwrap();
        assert_eq!(trx.get_struct("transaction").unwrap().base, "transaction_header");
    }

    #[test]
    fn test_token_account_name() {
        assert_eq!(EOSIO_TOKEN.to_string(), "eosio.token");
    }
}
