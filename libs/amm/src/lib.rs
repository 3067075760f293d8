//! # Eddy AMM Library - Quoting and Concentrated-Liquidity Math Engine
//!
//! ## Purpose
//!
//! Pure math for quoting swaps and sizing liquidity positions across a V2 pool family
//! (stable and volatile curves) and a V3 concentrated-liquidity pool family addressed
//! by tick spacing. Consumes pool-state snapshots, produces decision data; never
//! touches the network.
//!
//! ## Numeric Regimes
//!
//! - **Exact (`U256`)**: tick <-> sqrtPriceX96, V2 outputs, minimum-output bounds.
//!   These values end up in calldata and must agree with the contracts to the wei
//! - **Display (`f64`)**: human price <-> tick, suggested position amounts.
//!   Tolerant of rounding; never used for an execution bound
//!
//! The two are kept as distinct types on purpose and never unified.
//!
//! ## Components
//!
//! - [`tick_math`]: bit-exact `tick_to_sqrt_price_x96` and its inverse
//! - [`price_tick`]: human price <-> nearest usable tick
//! - [`range_liquidity`]: which tokens a range needs and the companion amount
//! - [`v2_math`]: stable/volatile `getAmountOut`
//! - [`v3_math`]: spot-price output estimate for route ranking
//! - [`slippage`]: minimum acceptable output

pub mod error;
pub mod full_math;
pub mod price_tick;
pub mod range_liquidity;
pub mod slippage;
pub mod tick_math;
pub mod v2_math;
pub mod v3_math;

pub use error::AmmError;
pub use price_tick::{
    max_usable_tick, min_usable_tick, nearest_usable_tick, price_to_tick, sqrt_price_x96_to_price,
    tick_to_price,
};
pub use range_liquidity::{
    amount0_from_amount1, amount1_from_amount0, optimal_amounts, required_tokens, PositionAmounts,
    PriceRange, RangePosition, RequiredTokens,
};
pub use slippage::{min_output, slippage_bps_from_percent};
pub use tick_math::{
    sqrt_price_x96_to_tick, tick_to_sqrt_price_x96, MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO,
    MIN_TICK,
};
pub use v2_math::{V2Math, V2PoolState};
pub use v3_math::V3Math;

/// Common types for AMM calculations
pub use ethereum_types::U256;
pub use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;
