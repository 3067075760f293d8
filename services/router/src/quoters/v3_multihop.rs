//! Two-leg concentrated-liquidity quoter through an intermediate token

use super::{snapshot_decimals, SourceQuoter, V3DirectQuoter};
use crate::error::RouterError;
use crate::request::QuoteRequest;
use async_trait::async_trait;
use ethereum_types::H160;
use futures::future::join_all;
use std::sync::Arc;
use types::{MarketSnapshot, Quote, QuoteMetadata, SourceKind};

/// `token_in -> intermediate -> token_out`, each leg at its best tick spacing
pub struct V3MultiHopQuoter {
    direct: Arc<V3DirectQuoter>,
    /// Used when the request names no intermediates of its own
    intermediates: Vec<H160>,
}

impl V3MultiHopQuoter {
    pub fn new(direct: Arc<V3DirectQuoter>, intermediates: Vec<H160>) -> Self {
        Self {
            direct,
            intermediates,
        }
    }

    async fn quote_via(
        &self,
        request: &QuoteRequest,
        token_in: H160,
        intermediate: H160,
        token_out: H160,
        market: &MarketSnapshot,
    ) -> Result<Option<Quote>, RouterError> {
        let mid_decimals = snapshot_decimals(market, &intermediate);
        let Some(first) = self
            .direct
            .best_leg(token_in, intermediate, request.amount_in, mid_decimals, market)
            .await?
        else {
            return Ok(None);
        };

        let Some(second) = self
            .direct
            .best_leg(
                intermediate,
                token_out,
                first.amount_out,
                request.token_out.decimals,
                market,
            )
            .await?
        else {
            return Ok(None);
        };

        let mut hops = first.hops;
        hops.extend(second.hops);

        Ok(Some(Quote {
            source: SourceKind::V3MultiHop,
            amount_in: request.amount_in,
            amount_out: second.amount_out,
            out_decimals: request.token_out.decimals,
            hops,
            metadata: QuoteMetadata {
                tick_spacing: first.metadata.tick_spacing,
                second_tick_spacing: second.metadata.tick_spacing,
                intermediate: Some(intermediate),
                ..QuoteMetadata::default()
            },
        }))
    }
}

#[async_trait]
impl SourceQuoter for V3MultiHopQuoter {
    fn kind(&self) -> SourceKind {
        SourceKind::V3MultiHop
    }

    async fn quote(
        &self,
        request: &QuoteRequest,
        market: &MarketSnapshot,
    ) -> Result<Option<Quote>, RouterError> {
        let (token_in, token_out) = request.routing_addresses(self.direct.wrapped_native);
        let candidates = if request.intermediates.is_empty() {
            &self.intermediates
        } else {
            &request.intermediates
        };

        let attempts = candidates
            .iter()
            .copied()
            .filter(|mid| *mid != token_in && *mid != token_out)
            .map(|mid| self.quote_via(request, token_in, mid, token_out, market));

        let mut best: Option<Quote> = None;
        for result in join_all(attempts).await {
            match result {
                Ok(Some(quote)) => {
                    if best.as_ref().map_or(true, |b| quote.amount_out > b.amount_out) {
                        best = Some(quote);
                    }
                }
                Ok(None) => {}
                Err(e) => crate::log_warning!("multi-hop candidate discarded: {}", e),
            }
        }
        Ok(best)
    }
}
