//! ABI definitions and the request/response codec contract
//!
//! Each contract read is one [`Codec`]: the canonical [`Function`] ABI, how a typed
//! request becomes argument tokens, and how the decoded output tokens become a typed
//! response. Encoding and decoding go through `ethabi`, so padding, tuple layout and
//! selector computation are never done by hand.

pub mod factory;
pub mod pool;
pub mod quoter;

use crate::error::CodecError;
use crate::selectors::to_hex_string;
use ethabi::{Function, Param, ParamType, StateMutability, Token};
use ethereum_types::{H160, U256};

/// Size of one ABI word in bytes
pub const WORD_SIZE: usize = 32;

const INT24_MIN: i32 = -(1 << 23);
const INT24_MAX: i32 = (1 << 23) - 1;

/// A typed contract call: calldata in, reply out
pub trait Codec {
    type Request;
    type Response;

    /// Minimum number of ABI words a well-formed reply carries
    const RESPONSE_WORDS: usize;

    /// Canonical function definition; the selector is derived from it
    fn function() -> Function;

    /// Argument tokens in declaration order
    fn request_tokens(request: &Self::Request) -> Result<Vec<Token>, CodecError>;

    /// Typed response from the decoded output tokens
    fn response_from_tokens(tokens: Vec<Token>) -> Result<Self::Response, CodecError>;

    /// Calldata: `selector || abi_encode(args)`
    fn encode_request(request: &Self::Request) -> Result<Vec<u8>, CodecError> {
        let tokens = Self::request_tokens(request)?;
        Self::function()
            .encode_input(&tokens)
            .map_err(|e| CodecError::AbiEncode(e.to_string()))
    }

    /// Decode a raw reply; short or malformed data is an error, never a panic
    fn decode_response(data: &[u8]) -> Result<Self::Response, CodecError> {
        let expected = Self::RESPONSE_WORDS * WORD_SIZE;
        if data.len() < expected {
            let function = Self::function();
            tracing::debug!(
                "{} ({}) reply too short: {} < {} bytes",
                function.name,
                to_hex_string(&function.short_signature()),
                data.len(),
                expected
            );
            return Err(CodecError::ResponseTooShort {
                expected,
                actual: data.len(),
            });
        }

        let tokens = Self::function()
            .decode_output(data)
            .map_err(|e| CodecError::AbiDecode(e.to_string()))?;
        Self::response_from_tokens(tokens)
    }
}

/// Read-only function definition
#[allow(deprecated)]
pub(crate) fn view_function(name: &str, inputs: Vec<Param>, outputs: Vec<Param>) -> Function {
    Function {
        name: name.to_string(),
        inputs,
        outputs,
        constant: None,
        state_mutability: StateMutability::View,
    }
}

pub(crate) fn param(name: &str, kind: ParamType) -> Param {
    Param {
        name: name.to_string(),
        kind,
        internal_type: None,
    }
}

/// 256-bit two's complement word for an `int24` argument
///
/// # Errors
/// `ValueOverflow` when `value` does not fit in 24 bits.
pub fn int24_word(value: i32) -> Result<U256, CodecError> {
    if !(INT24_MIN..=INT24_MAX).contains(&value) {
        return Err(CodecError::ValueOverflow {
            field: "int24",
            value: value.to_string(),
        });
    }
    let magnitude = U256::from(value.unsigned_abs());
    Ok(if value < 0 {
        magnitude.overflowing_neg().0
    } else {
        magnitude
    })
}

/// Inverse of [`int24_word`]; rejects words that are not a sign-extended `int24`
pub fn int24_from_word(word: U256) -> Result<i32, CodecError> {
    let overflow = || CodecError::ValueOverflow {
        field: "int24",
        value: format!("{:#x}", word),
    };

    let low = word.low_u64() as i64;
    let extended = if low < 0 {
        U256::from(low.unsigned_abs()).overflowing_neg().0
    } else {
        U256::from(low)
    };
    if extended != word {
        return Err(overflow());
    }

    let value = i32::try_from(low).map_err(|_| overflow())?;
    if !(INT24_MIN..=INT24_MAX).contains(&value) {
        return Err(overflow());
    }
    Ok(value)
}

pub(crate) fn take_uint(token: Option<Token>, field: &'static str) -> Result<U256, CodecError> {
    token
        .and_then(Token::into_uint)
        .ok_or(CodecError::UnexpectedToken { field })
}

pub(crate) fn take_int(token: Option<Token>, field: &'static str) -> Result<U256, CodecError> {
    token
        .and_then(Token::into_int)
        .ok_or(CodecError::UnexpectedToken { field })
}

pub(crate) fn take_address(token: Option<Token>, field: &'static str) -> Result<H160, CodecError> {
    token
        .and_then(Token::into_address)
        .ok_or(CodecError::UnexpectedToken { field })
}

/// Narrow a decoded `uint` to `u32`
pub(crate) fn uint_to_u32(value: U256, field: &'static str) -> Result<u32, CodecError> {
    if value > U256::from(u32::MAX) {
        return Err(CodecError::ValueOverflow {
            field,
            value: value.to_string(),
        });
    }
    Ok(value.low_u32())
}
