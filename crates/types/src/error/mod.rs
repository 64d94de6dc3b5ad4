// Path: crates/types/src/error/mod.rs
//! Core error types for abikit.

use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors raised by the raw byte buffer codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A read needed more bytes than remain in the buffer.
    #[error("Unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof {
        /// The number of bytes the read required.
        needed: usize,
        /// The number of bytes left in the buffer.
        remaining: usize,
    },
    /// A variable-length integer did not terminate within 32 bits.
    #[error("Variable-length integer overflows 32 bits")]
    VarintOverflow,
    /// A length prefix exceeds what the encoder or decoder accepts.
    #[error("Length {0} exceeds the maximum encodable length")]
    LengthOverflow(usize),
    /// A length-prefixed string was not valid UTF-8.
    #[error("Invalid UTF-8 in string: {0}")]
    InvalidUtf8(String),
    /// A boolean byte was neither 0 nor 1.
    #[error("Invalid boolean byte {0:#04x}")]
    InvalidBool(u8),
}

impl ErrorCode for CodecError {
    fn code(&self) -> &'static str {
        match self {
            Self::UnexpectedEof { .. } => "CODEC_UNEXPECTED_EOF",
            Self::VarintOverflow => "CODEC_VARINT_OVERFLOW",
            Self::LengthOverflow(_) => "CODEC_LENGTH_OVERFLOW",
            Self::InvalidUtf8(_) => "CODEC_INVALID_UTF8",
            Self::InvalidBool(_) => "CODEC_INVALID_BOOL",
        }
    }
}

/// Errors produced while resolving schemas or packing and unpacking values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AbiError {
    /// A type name resolved to nothing in the built-ins or the schema.
    #[error("Unknown type: {0}")]
    UnknownType(String),
    /// A required struct field was absent from the input object.
    #[error("Missing field '{field}' in struct '{structure}'")]
    MissingField {
        /// The struct being packed.
        structure: String,
        /// The absent field.
        field: String,
    },
    /// A numeric value does not fit the declared type.
    #[error("Value {value} overflows type {ty}")]
    Overflow {
        /// The declared type name.
        ty: String,
        /// The offending input text.
        value: String,
    },
    /// A value has the wrong shape or text format for its type.
    #[error("Malformed {ty} value {value}: {reason}")]
    MalformedValue {
        /// The declared type name.
        ty: String,
        /// The offending input text.
        value: String,
        /// What was wrong with it.
        reason: String,
    },
    /// The decoder ran out of bytes.
    #[error("Unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof {
        /// The number of bytes the read required.
        needed: usize,
        /// The number of bytes left in the buffer.
        remaining: usize,
    },
    /// A variant tag named a member that is not declared, or an index was out of range.
    #[error("Invalid member '{member}' for variant '{variant}'")]
    InvalidVariantMember {
        /// The variant type name.
        variant: String,
        /// The member name or index that failed to resolve.
        member: String,
    },
    /// The schema document itself is inconsistent.
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),
    /// No schema is registered for the contract.
    #[error("No schema registered for contract '{0}'")]
    UnknownContract(String),
    /// The contract's schema declares no such action.
    #[error("Action '{action}' is not declared by contract '{contract}'")]
    UnknownAction {
        /// The contract account.
        contract: String,
        /// The requested action name.
        action: String,
    },
    /// The input document is not valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(String),
    /// Another error annotated with the location where it occurred.
    #[error("{context}: {source}")]
    Context {
        /// A description of where the error occurred, such as a field path.
        context: String,
        /// The underlying error.
        #[source]
        source: Box<AbiError>,
    },
}

impl AbiError {
    /// Builds a `MalformedValue` error.
    pub fn malformed(ty: &str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedValue {
            ty: ty.to_string(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Builds an `Overflow` error.
    pub fn overflow(ty: &str, value: impl Into<String>) -> Self {
        Self::Overflow {
            ty: ty.to_string(),
            value: value.into(),
        }
    }

    /// Wraps this error with a description of where it occurred.
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, looking through any `Context` annotations.
    pub fn root(&self) -> &AbiError {
        let mut err = self;
        while let Self::Context { source, .. } = err {
            err = source;
        }
        err
    }
}

impl ErrorCode for AbiError {
    fn code(&self) -> &'static str {
        match self {
            Self::UnknownType(_) => "ABI_UNKNOWN_TYPE",
            Self::MissingField { .. } => "ABI_MISSING_FIELD",
            Self::Overflow { .. } => "ABI_OVERFLOW",
            Self::MalformedValue { .. } => "ABI_MALFORMED_VALUE",
            Self::UnexpectedEof { .. } => "ABI_UNEXPECTED_EOF",
            Self::InvalidVariantMember { .. } => "ABI_INVALID_VARIANT_MEMBER",
            Self::InvalidSchema(_) => "ABI_INVALID_SCHEMA",
            Self::UnknownContract(_) => "ABI_UNKNOWN_CONTRACT",
            Self::UnknownAction { .. } => "ABI_UNKNOWN_ACTION",
            Self::Json(_) => "ABI_INVALID_JSON",
            Self::Context { source, .. } => source.code(),
        }
    }
}

impl From<CodecError> for AbiError {
    fn from(e: CodecError) -> Self {
        match e {
            CodecError::UnexpectedEof { needed, remaining } => {
                Self::UnexpectedEof { needed, remaining }
            }
            CodecError::VarintOverflow => Self::malformed("varuint32", "", e.to_string()),
            CodecError::LengthOverflow(n) => Self::overflow("varuint32", n.to_string()),
            CodecError::InvalidUtf8(_) => Self::malformed("string", "", e.to_string()),
            CodecError::InvalidBool(b) => Self::malformed("bool", b.to_string(), e.to_string()),
        }
    }
}

impl From<CryptoError> for AbiError {
    fn from(e: CryptoError) -> Self {
        let ty = match e {
            CryptoError::InvalidSignature(_) => "signature",
            _ => "public_key",
        };
        Self::malformed(ty, "", e.to_string())
    }
}

impl From<serde_json::Error> for AbiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}

/// Errors related to keys, signatures and their text encodings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// A key could not be decoded or is not a valid curve point or scalar.
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    /// A signature could not be decoded.
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),
    /// The embedded checksum of a key or signature string did not match.
    #[error("Checksum mismatch")]
    ChecksumMismatch,
    /// The text prefix names a curve this crate does not handle.
    #[error("Unsupported key type: {0}")]
    UnsupportedKeyType(String),
    /// Public key recovery from a signature failed.
    #[error("Public key recovery failed: {0}")]
    RecoveryFailed(String),
    /// Producing a signature failed.
    #[error("Signing failed: {0}")]
    SigningFailed(String),
}

impl ErrorCode for CryptoError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidKey(_) => "CRYPTO_INVALID_KEY",
            Self::InvalidSignature(_) => "CRYPTO_INVALID_SIGNATURE",
            Self::ChecksumMismatch => "CRYPTO_CHECKSUM_MISMATCH",
            Self::UnsupportedKeyType(_) => "CRYPTO_UNSUPPORTED_KEY_TYPE",
            Self::RecoveryFailed(_) => "CRYPTO_RECOVERY_FAILED",
            Self::SigningFailed(_) => "CRYPTO_SIGNING_FAILED",
        }
    }
}

/// Errors related to transaction assembly, signing and submission.
#[derive(Error, Debug)]
pub enum TransactionError {
    /// No private key for the requested public key is held by the key provider.
    #[error("No signing key found for public key {0}")]
    KeyNotFound(String),
    /// Signing was attempted while the network id is unset or all zero.
    #[error("Transaction is not bound to a network id")]
    UnboundNetworkId,
    /// A reference block id was not 32 bytes of hex.
    #[error("Invalid reference block id: {0}")]
    InvalidBlockId(String),
    /// A network id was not 32 bytes of hex.
    #[error("Invalid network id: {0}")]
    InvalidChainId(String),
    /// A schema or value error.
    #[error("ABI error: {0}")]
    Abi(#[from] AbiError),
    /// A key or signature error.
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),
    /// A raw decoding error.
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
    /// The remote endpoint returned an error payload or could not be reached.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl ErrorCode for TransactionError {
    fn code(&self) -> &'static str {
        match self {
            Self::KeyNotFound(_) => "TX_KEY_NOT_FOUND",
            Self::UnboundNetworkId => "TX_UNBOUND_NETWORK_ID",
            Self::InvalidBlockId(_) => "TX_INVALID_BLOCK_ID",
            Self::InvalidChainId(_) => "TX_INVALID_CHAIN_ID",
            Self::Abi(e) => e.code(),
            Self::Crypto(e) => e.code(),
            Self::Codec(e) => e.code(),
            Self::Transport(_) => "TX_TRANSPORT_ERROR",
        }
    }
}

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration document is not valid TOML for the target structure.
    #[error("Failed to parse config: {0}")]
    Parse(String),
    /// A field holds a value outside its accepted domain.
    #[error("Invalid config value for '{field}': {reason}")]
    Invalid {
        /// The offending field.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "CONFIG_IO_ERROR",
            Self::Parse(_) => "CONFIG_PARSE_ERROR",
            Self::Invalid { .. } => "CONFIG_INVALID_VALUE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_preserves_classification() {
        let base = AbiError::overflow("int8", "128");
        let wrapped = base.clone().context("field 'a'").context("struct 'outer'");
        assert_eq!(wrapped.code(), "ABI_OVERFLOW");
        assert_eq!(wrapped.root(), &base);
        assert_eq!(
            wrapped.to_string(),
            "struct 'outer': field 'a': Value 128 overflows type int8"
        );
    }

    #[test]
    fn codec_eof_maps_to_abi_eof() {
        let err: AbiError = CodecError::UnexpectedEof {
            needed: 4,
            remaining: 1,
        }
        .into();
        assert_eq!(
            err,
            AbiError::UnexpectedEof {
                needed: 4,
                remaining: 1
            }
        );
    }

    #[test]
    fn transaction_error_codes_delegate() {
        let err = TransactionError::from(AbiError::UnknownType("foo".into()));
        assert_eq!(err.code(), "ABI_UNKNOWN_TYPE");
        assert_eq!(TransactionError::UnboundNetworkId.code(), "TX_UNBOUND_NETWORK_ID");
    }
}
