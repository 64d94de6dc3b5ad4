// Path: crates/types/src/value.rs

//! The dynamically-typed input the packer walks.
//!
//! JSON arguments are lowered into a closed three-case value before packing:
//! scalars keep their raw token text so each built-in handler can apply its
//! own parsing and quoting rules, objects are keyed by field name, and arrays
//! keep element order.

use crate::error::AbiError;
use serde_json::Value;
use std::collections::BTreeMap;

/// A JSON-shaped packer input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    /// A JSON scalar as raw token text: `"abc"` (quotes included), `12`, `true`, `null`.
    Scalar(String),
    /// A JSON object.
    Object(BTreeMap<String, AbiValue>),
    /// A JSON array.
    Array(Vec<AbiValue>),
}

impl AbiValue {
    /// Parses a JSON document.
    pub fn parse(json: &str) -> Result<Self, AbiError> {
        let value: Value = serde_json::from_str(json)?;
        Ok(value.into())
    }

    /// A quoted string scalar.
    pub fn string(s: &str) -> Self {
        Self::Scalar(Value::String(s.to_string()).to_string())
    }

    /// Whether this is the `null` scalar.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Scalar(raw) if raw == "null")
    }

    /// The raw token text of a scalar.
    pub fn raw(&self) -> Option<&str> {
        match self {
            Self::Scalar(raw) => Some(raw),
            _ => None,
        }
    }

    /// Looks up an object member.
    pub fn get(&self, key: &str) -> Option<&AbiValue> {
        match self {
            Self::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// A short name for the shape, used in error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Object(_) => "object",
            Self::Array(_) => "array",
        }
    }

    /// Requires a quoted JSON string and returns its unescaped contents.
    pub fn as_quoted(&self, ty: &str) -> Result<String, AbiError> {
        match self {
            Self::Scalar(raw) if raw.starts_with('"') => serde_json::from_str::<String>(raw)
                .map_err(|e| AbiError::malformed(ty, raw.as_str(), e.to_string())),
            Self::Scalar(raw) => Err(AbiError::malformed(ty, raw.as_str(), "expected a quoted string")),
            other => Err(AbiError::malformed(
                ty,
                other.to_string(),
                format!("expected a quoted string, got {}", other.shape()),
            )),
        }
    }

    /// Returns the scalar's text with surrounding quotes removed, accepting
    /// both `12` and `"12"`.
    pub fn as_text(&self, ty: &str) -> Result<String, AbiError> {
        match self {
            Self::Scalar(raw) if raw.starts_with('"') => self.as_quoted(ty),
            Self::Scalar(raw) => Ok(raw.clone()),
            other => Err(AbiError::malformed(
                ty,
                other.to_string(),
                format!("expected a scalar, got {}", other.shape()),
            )),
        }
    }
}

impl From<Value> for AbiValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
            Value::Array(items) => Self::Array(items.into_iter().map(Into::into).collect()),
            scalar => Self::Scalar(scalar.to_string()),
        }
    }
}

impl From<&AbiValue> for Value {
    fn from(value: &AbiValue) -> Self {
        match value {
            AbiValue::Scalar(raw) => serde_json::from_str(raw).unwrap_or(Value::Null),
            AbiValue::Object(map) => Value::Object(
                map.iter().map(|(k, v)| (k.clone(), Value::from(v))).collect(),
            ),
            AbiValue::Array(items) => Value::Array(items.iter().map(Value::from).collect()),
        }
    }
}

impl std::fmt::Display for AbiValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalar(raw) => f.write_str(raw),
            other => write!(f, "{}", Value::from(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars_keep_raw_tokens() {
        let v = AbiValue::parse(r#"{"a":"hi","b":12,"c":true,"d":null,"e":18446744073709551616}"#)
            .unwrap();
        assert_eq!(v.get("a").unwrap().raw(), Some("\"hi\""));
        assert_eq!(v.get("b").unwrap().raw(), Some("12"));
        assert_eq!(v.get("c").unwrap().raw(), Some("true"));
        assert!(v.get("d").unwrap().is_null());
        // Beyond u64, still exact thanks to arbitrary precision numbers.
        assert_eq!(v.get("e").unwrap().raw(), Some("18446744073709551616"));
    }

    #[test]
    fn test_quoting_rules() {
        let quoted = AbiValue::string("a\"b");
        assert_eq!(quoted.as_quoted("string").unwrap(), "a\"b");
        assert_eq!(AbiValue::Scalar("12".into()).as_text("int8").unwrap(), "12");
        assert_eq!(AbiValue::Scalar("\"12\"".into()).as_text("int8").unwrap(), "12");

        let err = AbiValue::Scalar("12".into()).as_quoted("name").unwrap_err();
        assert!(matches!(err, AbiError::MalformedValue { .. }));
        let err = AbiValue::Array(vec![]).as_text("int8").unwrap_err();
        assert!(matches!(err, AbiError::MalformedValue { .. }));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(AbiValue::parse("{"), Err(AbiError::Json(_))));
    }

    #[test]
    fn test_back_to_json() {
        let v = AbiValue::parse(r#"[1,{"x":"y"}]"#).unwrap();
        assert_eq!(Value::from(&v), serde_json::json!([1, {"x": "y"}]));
        assert_eq!(v.to_string(), r#"[1,{"x":"y"}]"#);
    }
}
