//! Pool state reads: `slot0` on concentrated-liquidity pools, `getReserves` on V2 pairs

use super::{int24_from_word, param, take_int, take_uint, view_function, Codec};
use crate::error::CodecError;
use ethabi::{Function, ParamType, Token};
use ethereum_types::U256;

/// Leading fields of `slot0`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot0Reply {
    pub sqrt_price_x96: U256,
    pub tick: i32,
}

/// `slot0()` returns `(uint160 sqrtPriceX96, int24 tick, ...)`
///
/// Only the first two words are read; observation and lock fields differ between
/// pool implementations and are ignored.
pub struct Slot0;

impl Codec for Slot0 {
    type Request = ();
    type Response = Slot0Reply;

    const RESPONSE_WORDS: usize = 2;

    fn function() -> Function {
        view_function(
            "slot0",
            vec![],
            vec![
                param("sqrtPriceX96", ParamType::Uint(160)),
                param("tick", ParamType::Int(24)),
            ],
        )
    }

    fn request_tokens(_request: &()) -> Result<Vec<Token>, CodecError> {
        Ok(vec![])
    }

    fn response_from_tokens(tokens: Vec<Token>) -> Result<Self::Response, CodecError> {
        let mut tokens = tokens.into_iter();
        let sqrt_price_x96 = take_uint(tokens.next(), "sqrtPriceX96")?;
        let tick = int24_from_word(take_int(tokens.next(), "tick")?)?;
        Ok(Slot0Reply {
            sqrt_price_x96,
            tick,
        })
    }
}

/// V2 pair reserves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reserves {
    pub reserve0: U256,
    pub reserve1: U256,
    pub block_timestamp_last: U256,
}

/// `getReserves()` returns `(uint256 reserve0, uint256 reserve1, uint256 blockTimestampLast)`
pub struct GetReserves;

impl Codec for GetReserves {
    type Request = ();
    type Response = Reserves;

    const RESPONSE_WORDS: usize = 3;

    fn function() -> Function {
        view_function(
            "getReserves",
            vec![],
            vec![
                param("reserve0", ParamType::Uint(256)),
                param("reserve1", ParamType::Uint(256)),
                param("blockTimestampLast", ParamType::Uint(256)),
            ],
        )
    }

    fn request_tokens(_request: &()) -> Result<Vec<Token>, CodecError> {
        Ok(vec![])
    }

    fn response_from_tokens(tokens: Vec<Token>) -> Result<Self::Response, CodecError> {
        let mut tokens = tokens.into_iter();
        Ok(Reserves {
            reserve0: take_uint(tokens.next(), "reserve0")?,
            reserve1: take_uint(tokens.next(), "reserve1")?,
            block_timestamp_last: take_uint(tokens.next(), "blockTimestampLast")?,
        })
    }
}
