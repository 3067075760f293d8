//! Liquidity-source quoters
//!
//! One [`SourceQuoter`] per source family. Each quoter reads the immutable
//! [`MarketSnapshot`] (and, for V3 simulation, a call backend) and answers with the
//! output it would deliver for the request, or `None` when it has no usable liquidity.
//!
//! | Quoter | Source | Pools touched |
//! |---|---|---|
//! | [`V2Quoter`] `{ stable: false }` | V2 volatile | `V2 { stable: false }` |
//! | [`V2Quoter`] `{ stable: true }` | V2 stable | `V2 { stable: true }` |
//! | [`V3DirectQuoter`] | V3 direct | best of the configured tick spacings |
//! | [`V3MultiHopQuoter`] | V3 multi-hop | two V3 legs through an intermediate |

pub mod v2;
pub mod v3_direct;
pub mod v3_multihop;

pub use v2::V2Quoter;
pub use v3_direct::{V3DirectQuoter, V3QuoteSource};
pub use v3_multihop::V3MultiHopQuoter;

use crate::error::RouterError;
use crate::request::QuoteRequest;
use async_trait::async_trait;
use types::{MarketSnapshot, Quote, SourceKind};

/// Quote provider for one liquidity-source family
#[async_trait]
pub trait SourceQuoter: Send + Sync {
    fn kind(&self) -> SourceKind;

    /// `Ok(None)` means the source has nothing to offer for this pair
    async fn quote(
        &self,
        request: &QuoteRequest,
        market: &MarketSnapshot,
    ) -> Result<Option<Quote>, RouterError>;
}

/// Output decimals for a token known only by address
///
/// Intermediate tokens are not part of the request; their precision comes from the
/// snapshot and defaults to 18.
pub(crate) fn snapshot_decimals(market: &MarketSnapshot, token: &ethereum_types::H160) -> u8 {
    market.token(token).map(|t| t.decimals).unwrap_or(18)
}
