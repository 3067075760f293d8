//! Router defaults
//!
//! Production values for every configurable parameter.

/// Slippage tolerance applied when the caller gives none (0.5%)
pub const DEFAULT_SLIPPAGE_BPS: u16 = 50;

/// Quiet period before an input change triggers re-aggregation
pub const DEBOUNCE_MS: u64 = 300;

/// Concentrated-liquidity fee tiers, by tick spacing
pub const TICK_SPACINGS: [i32; 5] = [1, 50, 100, 200, 2000];

/// Volatile-curve pool fee (0.30%)
pub const V2_VOLATILE_FEE_BPS: u16 = 30;

/// Stable-curve pool fee (0.05%)
pub const V2_STABLE_FEE_BPS: u16 = 5;

/// Upper bound on a single `eth_call`
pub const CALL_TIMEOUT_MS: u64 = 5_000;

pub const LOG_LEVEL: &str = "info";

/// Wrapped native token on OP-stack chains
pub const WRAPPED_NATIVE: &str = "0x4200000000000000000000000000000000000006";

/// Environment variable prefix for overrides (`EDDY_DEBOUNCE_MS=150`)
pub const ENV_PREFIX: &str = "EDDY";
