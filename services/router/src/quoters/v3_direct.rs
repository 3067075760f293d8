//! Concentrated-liquidity direct quoter
//!
//! Probes every configured tick spacing for the pair and keeps the best. Each spacing
//! is quoted either by simulating the swap on the quoter contract or, when no call
//! backend is available, from the snapshot's spot price.

use super::SourceQuoter;
use crate::backend::CallBackend;
use crate::error::RouterError;
use crate::request::QuoteRequest;
use async_trait::async_trait;
use dex::{Codec, QuoteExactInputSingle, QuoteExactInputSingleParams};
use eddy_amm::V3Math;
use ethereum_types::{H160, U256};
use futures::future::join_all;
use std::sync::Arc;
use types::{Hop, MarketSnapshot, PoolKey, Quote, QuoteMetadata, SourceKind, TokenPair};

/// Where V3 outputs come from
#[derive(Clone)]
pub enum V3QuoteSource {
    /// `quoteExactInputSingle` on the quoter contract
    Simulation {
        backend: Arc<dyn CallBackend>,
        quoter: H160,
    },
    /// Zero-slippage estimate from the snapshot's sqrt price
    Spot,
}

impl std::fmt::Debug for V3QuoteSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Simulation { quoter, .. } => {
                f.debug_struct("Simulation").field("quoter", quoter).finish()
            }
            Self::Spot => f.write_str("Spot"),
        }
    }
}

/// Best single-pool V3 quote across tick spacings
pub struct V3DirectQuoter {
    pub tick_spacings: Vec<i32>,
    pub source: V3QuoteSource,
    pub wrapped_native: H160,
}

impl V3DirectQuoter {
    pub fn new(tick_spacings: Vec<i32>, source: V3QuoteSource, wrapped_native: H160) -> Self {
        Self {
            tick_spacings,
            source,
            wrapped_native,
        }
    }

    /// Best quote for one `token_in -> token_out` leg over all configured spacings
    ///
    /// Spacings without a deployed pool are skipped; other per-spacing failures are
    /// logged and treated as no quote.
    pub async fn best_leg(
        &self,
        token_in: H160,
        token_out: H160,
        amount_in: U256,
        out_decimals: u8,
        market: &MarketSnapshot,
    ) -> Result<Option<Quote>, RouterError> {
        let attempts = self.tick_spacings.iter().map(|&tick_spacing| {
            self.quote_spacing(token_in, token_out, amount_in, out_decimals, tick_spacing, market)
        });

        let mut best: Option<Quote> = None;
        for (result, tick_spacing) in join_all(attempts).await.into_iter().zip(&self.tick_spacings) {
            match result {
                Ok(Some(quote)) => {
                    crate::log_search!(
                        "v3 spacing {} {:?} -> {:?}: {}",
                        tick_spacing,
                        token_in,
                        token_out,
                        quote.amount_out
                    );
                    if best.as_ref().map_or(true, |b| quote.amount_out > b.amount_out) {
                        best = Some(quote);
                    }
                }
                Ok(None) => {}
                Err(RouterError::NoPoolForTickSpacing { .. }) => {}
                Err(e) => {
                    crate::log_warning!("v3 spacing {} discarded: {}", tick_spacing, e);
                }
            }
        }
        Ok(best)
    }

    /// Quote the pool at one tick spacing
    pub async fn quote_spacing(
        &self,
        token_in: H160,
        token_out: H160,
        amount_in: U256,
        out_decimals: u8,
        tick_spacing: i32,
        market: &MarketSnapshot,
    ) -> Result<Option<Quote>, RouterError> {
        let pool = market
            .v3_pool(token_in, token_out, tick_spacing)
            .filter(|pool| pool.exists)
            .ok_or(RouterError::NoPoolForTickSpacing { tick_spacing })?;

        let mut metadata = QuoteMetadata {
            tick_spacing: Some(tick_spacing),
            ..QuoteMetadata::default()
        };

        let amount_out = match &self.source {
            V3QuoteSource::Simulation { backend, quoter } => {
                let params = QuoteExactInputSingleParams {
                    token_in,
                    token_out,
                    amount_in,
                    tick_spacing,
                    sqrt_price_limit_x96: U256::zero(),
                };
                let calldata = QuoteExactInputSingle::encode_request(&params)?;
                let reply = match backend.call(*quoter, calldata).await {
                    Ok(reply) => reply,
                    Err(e) => {
                        crate::log_search!("quoter call at spacing {} failed: {:#}", tick_spacing, e);
                        return Ok(None);
                    }
                };
                match QuoteExactInputSingle::decode_response(&reply) {
                    Ok(reply) => {
                        metadata.sqrt_price_x96_after = Some(reply.sqrt_price_x96_after);
                        metadata.initialized_ticks_crossed = Some(reply.initialized_ticks_crossed);
                        metadata.gas_estimate = Some(reply.gas_estimate);
                        reply.amount_out
                    }
                    Err(e) => {
                        crate::log_search!("malformed quoter reply at spacing {}: {}", tick_spacing, e);
                        return Ok(None);
                    }
                }
            }
            V3QuoteSource::Spot => {
                let zero_for_one = TokenPair::from_addresses(token_in, token_out).zero_for_one;
                match V3Math::spot_amount_out(amount_in, pool.sqrt_price_x96, zero_for_one) {
                    Some(amount_out) => amount_out,
                    None => return Ok(None),
                }
            }
        };

        if amount_out.is_zero() {
            return Ok(None);
        }

        Ok(Some(Quote {
            source: SourceKind::V3Direct,
            amount_in,
            amount_out,
            out_decimals,
            hops: vec![Hop {
                token_in,
                token_out,
                pool: PoolKey::v3(token_in, token_out, tick_spacing),
            }],
            metadata,
        }))
    }
}

#[async_trait]
impl SourceQuoter for V3DirectQuoter {
    fn kind(&self) -> SourceKind {
        SourceKind::V3Direct
    }

    async fn quote(
        &self,
        request: &QuoteRequest,
        market: &MarketSnapshot,
    ) -> Result<Option<Quote>, RouterError> {
        let (token_in, token_out) = request.routing_addresses(self.wrapped_native);
        self.best_leg(
            token_in,
            token_out,
            request.amount_in,
            request.token_out.decimals,
            market,
        )
        .await
    }
}
