//! Codec error types

/// Failures while building calldata or reading a contract reply
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("ABI decoding failed: {0}")]
    AbiDecode(String),

    #[error("ABI encoding failed: {0}")]
    AbiEncode(String),

    #[error("Response too short: expected at least {expected} bytes, got {actual}")]
    ResponseTooShort { expected: usize, actual: usize },

    #[error("Unexpected token for field {field}")]
    UnexpectedToken { field: &'static str },

    #[error("Value overflow in field {field}: {value}")]
    ValueOverflow { field: &'static str, value: String },
}
