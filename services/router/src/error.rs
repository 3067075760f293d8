//! Router error types

use dex::CodecError;
use eddy_amm::AmmError;
use ethereum_types::H160;
use types::AmountError;

/// Failures surfaced by quoting, aggregation and quote sessions
///
/// A single source without liquidity is not an error at aggregator level; it only
/// becomes [`RouterError::NoRouteFound`] once every source is exhausted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouterError {
    #[error("No pool deployed at tick spacing {tick_spacing}")]
    NoPoolForTickSpacing { tick_spacing: i32 },

    #[error("No route found from {token_in:?} to {token_out:?}")]
    NoRouteFound { token_in: H160, token_out: H160 },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Request generation {generation} superseded by a newer request")]
    Superseded { generation: u64 },

    #[error(transparent)]
    Amm(#[from] AmmError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Amount(#[from] AmountError),
}
