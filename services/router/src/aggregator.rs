//! # Route Aggregator - Best Execution Across Liquidity Sources
//!
//! ## Purpose
//!
//! Fans a quote request out to every [`SourceQuoter`] concurrently, discards sources
//! that fail or have nothing to offer, and picks a single best route. The winner is
//! the largest output in the output token's human units; equal outputs resolve by
//! source preference so the same inputs always produce the same route.
//!
//! ## Architecture Role
//!
//! ```text
//! QuoteRequest ─┬─> V2Quoter { stable: false } ─┐
//!               ├─> V2Quoter { stable: true }  ─┤
//!               ├─> V3DirectQuoter            ─┼─> select_best ─> Route ─> min_output ─> RoutePlan
//!               └─> V3MultiHopQuoter          ─┘
//! ```
//!
//! Tie-break order: V3 direct, V2 volatile, V2 stable, V3 multi-hop.

use crate::backend::CallBackend;
use crate::error::RouterError;
use crate::quoters::{SourceQuoter, V2Quoter, V3DirectQuoter, V3MultiHopQuoter, V3QuoteSource};
use crate::request::QuoteRequest;
use eddy_amm::min_output;
use eddy_config::{RouterConfig, V3QuoteMode};
use ethereum_types::H160;
use futures::future::join_all;
use std::cmp::Ordering;
use std::sync::Arc;
use types::{MarketSnapshot, Quote, Route, RoutePlan};

/// Concurrent best-route selection over a fixed set of quoters
pub struct RouteAggregator {
    quoters: Vec<Arc<dyn SourceQuoter>>,
    wrapped_native: H160,
    default_slippage_bps: u16,
}

impl RouteAggregator {
    pub fn new(
        quoters: Vec<Arc<dyn SourceQuoter>>,
        wrapped_native: H160,
        default_slippage_bps: u16,
    ) -> Self {
        Self {
            quoters,
            wrapped_native,
            default_slippage_bps,
        }
    }

    /// Standard quoter set: V2 volatile, V2 stable, V3 direct and V3 multi-hop
    ///
    /// V3 quotes are simulated when the config asks for it and both a backend and a
    /// quoter address are available; otherwise they use the spot estimate.
    pub fn from_config(
        config: &RouterConfig,
        backend: Option<Arc<dyn CallBackend>>,
    ) -> anyhow::Result<Self> {
        let wrapped_native = config.wrapped_native_address()?;

        let source = match (config.v3_quote_mode, backend, config.quoter()?) {
            (V3QuoteMode::Simulation, Some(backend), Some(quoter)) => {
                V3QuoteSource::Simulation { backend, quoter }
            }
            (V3QuoteMode::Simulation, _, _) => {
                crate::log_warning!("No call backend or quoter configured, V3 quotes use spot prices");
                V3QuoteSource::Spot
            }
            (V3QuoteMode::Spot, _, _) => V3QuoteSource::Spot,
        };

        let direct = Arc::new(V3DirectQuoter::new(
            config.tick_spacings.clone(),
            source,
            wrapped_native,
        ));
        let multihop = V3MultiHopQuoter::new(direct.clone(), config.intermediate_addresses()?);

        let quoters: Vec<Arc<dyn SourceQuoter>> = vec![
            Arc::new(V2Quoter::volatile(config.v2_volatile_fee_bps, wrapped_native)),
            Arc::new(V2Quoter::stable(config.v2_stable_fee_bps, wrapped_native)),
            direct,
            Arc::new(multihop),
        ];

        Ok(Self::new(quoters, wrapped_native, config.default_slippage_bps))
    }

    pub fn quoters(&self) -> &[Arc<dyn SourceQuoter>] {
        &self.quoters
    }

    pub fn wrapped_native(&self) -> H160 {
        self.wrapped_native
    }

    pub fn default_slippage_bps(&self) -> u16 {
        self.default_slippage_bps
    }

    /// Best route for the request, or `NoRouteFound` when no source can fill it
    pub async fn best_route(
        &self,
        request: &QuoteRequest,
        market: &MarketSnapshot,
    ) -> Result<Route, RouterError> {
        request.validate(self.wrapped_native)?;

        let results = join_all(
            self.quoters
                .iter()
                .map(|quoter| quoter.quote(request, market)),
        )
        .await;

        let mut quotes = Vec::with_capacity(results.len());
        for (quoter, result) in self.quoters.iter().zip(results) {
            match result {
                Ok(Some(quote)) => {
                    crate::log_search!(
                        "{}: {} out ({} hops)",
                        quoter.kind(),
                        quote.amount_out,
                        quote.hops.len()
                    );
                    quotes.push(quote);
                }
                Ok(None) => {
                    tracing::debug!("{}: no liquidity", quoter.kind());
                }
                Err(e) => {
                    crate::log_warning!("{} discarded: {}", quoter.kind(), e);
                }
            }
        }

        let (token_in, token_out) = request.routing_addresses(self.wrapped_native);
        let best = select_best(quotes).ok_or(RouterError::NoRouteFound {
            token_in,
            token_out,
        })?;

        let route = Route { quote: best };
        crate::log_route!(
            "{} -> {}: {}",
            request.token_in,
            request.token_out,
            route
        );
        Ok(route)
    }

    /// Best route plus the minimum output for the request's slippage tolerance
    pub async fn quote_with_slippage(
        &self,
        request: &QuoteRequest,
        market: &MarketSnapshot,
    ) -> Result<RoutePlan, RouterError> {
        let slippage_bps = request.slippage_bps.unwrap_or(self.default_slippage_bps);
        let route = self.best_route(request, market).await?;
        let min_output = min_output(route.amount_out(), slippage_bps)?;
        Ok(RoutePlan { route, min_output })
    }
}

/// Deterministic winner among candidate quotes
///
/// Highest normalized output wins; equal outputs go to the preferred source kind.
pub fn select_best(quotes: impl IntoIterator<Item = Quote>) -> Option<Quote> {
    quotes.into_iter().reduce(|best, candidate| {
        match compare_quotes(&candidate, &best) {
            Ordering::Greater => candidate,
            _ => best,
        }
    })
}

fn compare_quotes(a: &Quote, b: &Quote) -> Ordering {
    a.normalized_out()
        .cmp(&b.normalized_out())
        .then_with(|| b.source.tie_break_rank().cmp(&a.source.tie_break_rank()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethereum_types::U256;
    use proptest::prelude::*;
    use types::{QuoteMetadata, SourceKind};

    fn quote(source: SourceKind, amount_out: u64, out_decimals: u8) -> Quote {
        Quote {
            source,
            amount_in: U256::one(),
            amount_out: U256::from(amount_out),
            out_decimals,
            hops: vec![],
            metadata: QuoteMetadata::default(),
        }
    }

    #[test]
    fn test_tie_goes_to_v3_direct() {
        let quotes = vec![
            quote(SourceKind::V2Volatile, 100, 6),
            quote(SourceKind::V3Direct, 100, 6),
            quote(SourceKind::V2Stable, 99, 6),
        ];
        assert_eq!(select_best(quotes).unwrap().source, SourceKind::V3Direct);
    }

    #[test]
    fn test_full_tie_break_order() {
        let quotes = vec![
            quote(SourceKind::V3MultiHop, 7, 6),
            quote(SourceKind::V2Stable, 7, 6),
            quote(SourceKind::V2Volatile, 7, 6),
        ];
        assert_eq!(select_best(quotes).unwrap().source, SourceKind::V2Volatile);

        let quotes = vec![
            quote(SourceKind::V3MultiHop, 7, 6),
            quote(SourceKind::V2Stable, 7, 6),
        ];
        assert_eq!(select_best(quotes).unwrap().source, SourceKind::V2Stable);
    }

    #[test]
    fn test_strictly_greater_output_wins() {
        let quotes = vec![
            quote(SourceKind::V3Direct, 100, 6),
            quote(SourceKind::V3MultiHop, 101, 6),
        ];
        assert_eq!(select_best(quotes).unwrap().source, SourceKind::V3MultiHop);
    }

    #[test]
    fn test_compares_normalized_amounts() {
        // 1.0 at 6 decimals beats 0.9 at 18 decimals despite the smaller raw integer
        let quotes = vec![
            quote(SourceKind::V2Volatile, 900_000_000_000_000_000, 18),
            quote(SourceKind::V2Stable, 1_000_000, 6),
        ];
        assert_eq!(select_best(quotes).unwrap().source, SourceKind::V2Stable);
    }

    #[test]
    fn test_empty_is_none() {
        assert_eq!(select_best(Vec::new()), None);
    }

    fn any_kind() -> impl Strategy<Value = SourceKind> {
        prop_oneof![
            Just(SourceKind::V3Direct),
            Just(SourceKind::V2Volatile),
            Just(SourceKind::V2Stable),
            Just(SourceKind::V3MultiHop),
        ]
    }

    proptest! {
        #[test]
        fn prop_selection_ignores_input_order(
            entries in prop::collection::vec((any_kind(), 0u64..5), 1..8)
        ) {
            let quotes: Vec<Quote> = entries.iter().map(|(k, a)| quote(*k, *a, 6)).collect();
            let mut reversed = quotes.clone();
            reversed.reverse();

            let forward = select_best(quotes).unwrap();
            let backward = select_best(reversed).unwrap();
            prop_assert_eq!(forward.source, backward.source);
            prop_assert_eq!(forward.amount_out, backward.amount_out);
        }
    }
}
