//! Constant-function pool quoter (stable and volatile curves)

use super::SourceQuoter;
use crate::error::RouterError;
use crate::request::QuoteRequest;
use async_trait::async_trait;
use eddy_amm::{V2Math, V2PoolState};
use ethereum_types::H160;
use types::{Hop, MarketSnapshot, PoolKey, Quote, QuoteMetadata, SourceKind};

/// Quotes the single V2 pool of one curve type for the pair
pub struct V2Quoter {
    pub stable: bool,
    /// Applied when the snapshot carries no per-pool fee
    pub default_fee_bps: u16,
    pub wrapped_native: H160,
}

impl V2Quoter {
    pub fn volatile(default_fee_bps: u16, wrapped_native: H160) -> Self {
        Self {
            stable: false,
            default_fee_bps,
            wrapped_native,
        }
    }

    pub fn stable(default_fee_bps: u16, wrapped_native: H160) -> Self {
        Self {
            stable: true,
            default_fee_bps,
            wrapped_native,
        }
    }
}

#[async_trait]
impl SourceQuoter for V2Quoter {
    fn kind(&self) -> SourceKind {
        if self.stable {
            SourceKind::V2Stable
        } else {
            SourceKind::V2Volatile
        }
    }

    async fn quote(
        &self,
        request: &QuoteRequest,
        market: &MarketSnapshot,
    ) -> Result<Option<Quote>, RouterError> {
        let (token_in, token_out) = request.routing_addresses(self.wrapped_native);
        let pair = request.pair(self.wrapped_native);

        let Some(pool) = market.v2_pool(token_in, token_out, self.stable) else {
            return Ok(None);
        };
        if pool.reserve0.is_zero() || pool.reserve1.is_zero() {
            return Ok(None);
        }

        let (reserve_in, reserve_out) = if pair.zero_for_one {
            (pool.reserve0, pool.reserve1)
        } else {
            (pool.reserve1, pool.reserve0)
        };
        let state = V2PoolState {
            reserve_in,
            reserve_out,
            decimals_in: request.token_in.decimals,
            decimals_out: request.token_out.decimals,
            stable: self.stable,
            fee_bps: pool.fee_bps.unwrap_or(self.default_fee_bps),
        };

        let Some(amount_out) = V2Math::get_amount_out(request.amount_in, &state) else {
            return Ok(None);
        };
        if amount_out.is_zero() {
            return Ok(None);
        }

        Ok(Some(Quote {
            source: self.kind(),
            amount_in: request.amount_in,
            amount_out,
            out_decimals: request.token_out.decimals,
            hops: vec![Hop {
                token_in,
                token_out,
                pool: PoolKey::v2(token_in, token_out, self.stable),
            }],
            metadata: QuoteMetadata::default(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethereum_types::U256;
    use types::{pow10, Token, V2PoolSnapshot};

    fn weth() -> Token {
        Token::new(H160::from_low_u64_be(0x4200), 18, "WETH")
    }

    fn usdc() -> Token {
        Token::new(H160::from_low_u64_be(0x0833), 6, "USDC")
    }

    fn market_with(stable: bool, fee_bps: Option<u16>) -> MarketSnapshot {
        // token0 = USDC (lower address), token1 = WETH
        let mut market = MarketSnapshot::new();
        market.insert_v2(
            weth().address,
            usdc().address,
            V2PoolSnapshot {
                reserve0: U256::from(2000u64) * pow10(6).unwrap(),
                reserve1: U256::from(1000u64) * pow10(18).unwrap(),
                stable,
                fee_bps,
                address: None,
            },
        );
        market
    }

    #[tokio::test]
    async fn test_volatile_orients_reserves() {
        let market = market_with(false, None);
        let quoter = V2Quoter::volatile(30, H160::zero());
        let request = QuoteRequest::new(weth(), usdc(), pow10(18).unwrap());

        let quote = quoter.quote(&request, &market).await.unwrap().unwrap();
        assert_eq!(quote.amount_out, U256::from(1_992_013u64));
        assert_eq!(quote.source, SourceKind::V2Volatile);
        assert_eq!(quote.hops.len(), 1);
        assert_eq!(quote.hops[0].token_in, weth().address);
    }

    #[tokio::test]
    async fn test_snapshot_fee_overrides_default() {
        let market = market_with(false, Some(0));
        let quoter = V2Quoter::volatile(30, H160::zero());
        let request = QuoteRequest::new(weth(), usdc(), pow10(18).unwrap());

        let quote = quoter.quote(&request, &market).await.unwrap().unwrap();
        assert_eq!(quote.amount_out, U256::from(1_998_001u64));
    }

    #[tokio::test]
    async fn test_curve_type_must_match() {
        let market = market_with(false, None);
        let quoter = V2Quoter::stable(5, H160::zero());
        let request = QuoteRequest::new(weth(), usdc(), pow10(18).unwrap());
        assert_eq!(quoter.quote(&request, &market).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_empty_reserve_is_no_quote() {
        let mut market = MarketSnapshot::new();
        market.insert_v2(
            weth().address,
            usdc().address,
            V2PoolSnapshot {
                reserve0: U256::zero(),
                reserve1: U256::from(1000u64),
                stable: false,
                fee_bps: None,
                address: None,
            },
        );
        let quoter = V2Quoter::volatile(30, H160::zero());
        let request = QuoteRequest::new(weth(), usdc(), pow10(18).unwrap());
        assert_eq!(quoter.quote(&request, &market).await.unwrap(), None);
    }
}
