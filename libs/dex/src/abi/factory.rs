//! Concentrated-liquidity factory ABI

use super::{int24_word, param, take_address, view_function, Codec};
use crate::error::CodecError;
use ethabi::{Function, ParamType, Token};
use ethereum_types::H160;

/// Arguments of `getPool`; the factory accepts either token order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetPoolParams {
    pub token_a: H160,
    pub token_b: H160,
    pub tick_spacing: i32,
}

/// `getPool(address,address,int24)` returns `address`
///
/// The zero address means no pool is deployed for that spacing, decoded as `None`.
pub struct GetPool;

impl Codec for GetPool {
    type Request = GetPoolParams;
    type Response = Option<H160>;

    const RESPONSE_WORDS: usize = 1;

    fn function() -> Function {
        view_function(
            "getPool",
            vec![
                param("tokenA", ParamType::Address),
                param("tokenB", ParamType::Address),
                param("tickSpacing", ParamType::Int(24)),
            ],
            vec![param("pool", ParamType::Address)],
        )
    }

    fn request_tokens(request: &Self::Request) -> Result<Vec<Token>, CodecError> {
        Ok(vec![
            Token::Address(request.token_a),
            Token::Address(request.token_b),
            Token::Int(int24_word(request.tick_spacing)?),
        ])
    }

    fn response_from_tokens(tokens: Vec<Token>) -> Result<Self::Response, CodecError> {
        let pool = take_address(tokens.into_iter().next(), "pool")?;
        Ok((!pool.is_zero()).then_some(pool))
    }
}
