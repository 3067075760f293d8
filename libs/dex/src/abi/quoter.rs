//! Concentrated-liquidity quoter ABI
//!
//! `quoteExactInputSingle` simulates a single-pool swap and reverts the state change,
//! so it is a pure read from the caller's point of view.

use super::{int24_word, param, take_uint, uint_to_u32, view_function, Codec};
use crate::error::CodecError;
use ethabi::{Function, ParamType, Token};
use ethereum_types::{H160, U256};

/// Arguments of `quoteExactInputSingle`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteExactInputSingleParams {
    pub token_in: H160,
    pub token_out: H160,
    pub amount_in: U256,
    pub tick_spacing: i32,
    /// Zero disables the price limit
    pub sqrt_price_limit_x96: U256,
}

/// Decoded quoter reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoterReply {
    pub amount_out: U256,
    pub sqrt_price_x96_after: U256,
    pub initialized_ticks_crossed: u32,
    pub gas_estimate: U256,
}

/// `quoteExactInputSingle((address,address,uint256,int24,uint160))`
/// returns `(uint256 amountOut, uint160 sqrtPriceX96After, uint32 initializedTicksCrossed, uint256 gasEstimate)`
pub struct QuoteExactInputSingle;

impl Codec for QuoteExactInputSingle {
    type Request = QuoteExactInputSingleParams;
    type Response = QuoterReply;

    const RESPONSE_WORDS: usize = 4;

    fn function() -> Function {
        view_function(
            "quoteExactInputSingle",
            vec![param(
                "params",
                ParamType::Tuple(vec![
                    ParamType::Address,
                    ParamType::Address,
                    ParamType::Uint(256),
                    ParamType::Int(24),
                    ParamType::Uint(160),
                ]),
            )],
            vec![
                param("amountOut", ParamType::Uint(256)),
                param("sqrtPriceX96After", ParamType::Uint(160)),
                param("initializedTicksCrossed", ParamType::Uint(32)),
                param("gasEstimate", ParamType::Uint(256)),
            ],
        )
    }

    fn request_tokens(request: &Self::Request) -> Result<Vec<Token>, CodecError> {
        Ok(vec![Token::Tuple(vec![
            Token::Address(request.token_in),
            Token::Address(request.token_out),
            Token::Uint(request.amount_in),
            Token::Int(int24_word(request.tick_spacing)?),
            Token::Uint(request.sqrt_price_limit_x96),
        ])])
    }

    fn response_from_tokens(tokens: Vec<Token>) -> Result<Self::Response, CodecError> {
        let mut tokens = tokens.into_iter();
        let amount_out = take_uint(tokens.next(), "amountOut")?;
        let sqrt_price_x96_after = take_uint(tokens.next(), "sqrtPriceX96After")?;
        let ticks = take_uint(tokens.next(), "initializedTicksCrossed")?;
        let gas_estimate = take_uint(tokens.next(), "gasEstimate")?;

        Ok(QuoterReply {
            amount_out,
            sqrt_price_x96_after,
            initialized_ticks_crossed: uint_to_u32(ticks, "initializedTicksCrossed")?,
            gas_estimate,
        })
    }
}

