//! Quotes, routes and execution bounds

use crate::amount::{format_units, NormalizedAmount};
use crate::pool::PoolKey;
use ethereum_types::{H160, U256};
use std::fmt;

/// Liquidity source family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    V3Direct,
    V2Volatile,
    V2Stable,
    V3MultiHop,
}

impl SourceKind {
    /// Preference among equal outputs; lower wins (simpler execution first)
    pub fn tie_break_rank(self) -> u8 {
        match self {
            Self::V3Direct => 0,
            Self::V2Volatile => 1,
            Self::V2Stable => 2,
            Self::V3MultiHop => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::V3Direct => "v3-direct",
            Self::V2Volatile => "v2-volatile",
            Self::V2Stable => "v2-stable",
            Self::V3MultiHop => "v3-multihop",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One pool trade in execution order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hop {
    pub token_in: H160,
    pub token_out: H160,
    pub pool: PoolKey,
}

/// Source-specific data the execution layer needs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteMetadata {
    /// Fee-tier tick spacing (V3 direct, first leg of multi-hop)
    pub tick_spacing: Option<i32>,
    /// Second-leg tick spacing (multi-hop)
    pub second_tick_spacing: Option<i32>,
    /// Intermediate token (multi-hop)
    pub intermediate: Option<H160>,
    /// Reported by the quoter simulation
    pub sqrt_price_x96_after: Option<U256>,
    pub initialized_ticks_crossed: Option<u32>,
    pub gas_estimate: Option<U256>,
}

/// Output of one source for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub source: SourceKind,
    pub amount_in: U256,
    pub amount_out: U256,
    /// Precision of the output token, needed for normalized comparison
    pub out_decimals: u8,
    pub hops: Vec<Hop>,
    pub metadata: QuoteMetadata,
}

impl Quote {
    pub fn normalized_out(&self) -> NormalizedAmount {
        NormalizedAmount::new(self.amount_out, self.out_decimals)
    }
}

/// The selected quote, ready for execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub quote: Quote,
}

impl Route {
    pub fn source(&self) -> SourceKind {
        self.quote.source
    }

    pub fn hops(&self) -> &[Hop] {
        &self.quote.hops
    }

    pub fn amount_out(&self) -> U256 {
        self.quote.amount_out
    }

    pub fn intermediate(&self) -> Option<H160> {
        self.quote.metadata.intermediate
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} hop{}) -> {}",
            self.quote.source,
            self.quote.hops.len(),
            if self.quote.hops.len() == 1 { "" } else { "s" },
            format_units(self.quote.amount_out, self.quote.out_decimals)
        )
    }
}

/// Slippage-bounded floor on the output, in the output token's smallest unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinimumOutput {
    pub amount_out_min: U256,
    pub slippage_bps: u16,
}

/// Route plus the bound handed to the execution layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePlan {
    pub route: Route,
    pub min_output: MinimumOutput,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tie_break_order() {
        let mut kinds = vec![
            SourceKind::V3MultiHop,
            SourceKind::V2Stable,
            SourceKind::V3Direct,
            SourceKind::V2Volatile,
        ];
        kinds.sort_by_key(|k| k.tie_break_rank());
        assert_eq!(
            kinds,
            vec![
                SourceKind::V3Direct,
                SourceKind::V2Volatile,
                SourceKind::V2Stable,
                SourceKind::V3MultiHop,
            ]
        );
    }

    #[test]
    fn test_route_display() {
        let a = H160::from_low_u64_be(1);
        let b = H160::from_low_u64_be(2);
        let route = Route {
            quote: Quote {
                source: SourceKind::V2Volatile,
                amount_in: U256::one(),
                amount_out: U256::from(1_992_013u64),
                out_decimals: 6,
                hops: vec![Hop {
                    token_in: a,
                    token_out: b,
                    pool: PoolKey::v2(a, b, false),
                }],
                metadata: QuoteMetadata::default(),
            },
        };
        assert_eq!(route.to_string(), "v2-volatile (1 hop) -> 1.992013");
    }
}
