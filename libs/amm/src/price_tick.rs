//! Human price <-> tick conversion (display regime, `f64`)
//!
//! Prices here are what a user types into a range input: units of the quote token
//! per one base token. The exact integer regime lives in [`crate::tick_math`].

use crate::error::AmmError;
use crate::tick_math::{MAX_TICK, MIN_TICK};
use ethereum_types::U256;
use types::u256_to_f64;

/// Price ratio between adjacent ticks
pub const TICK_BASE: f64 = 1.0001;

const Q96: f64 = 79_228_162_514_264_337_593_543_950_336.0;

/// Nearest usable tick for a human price
///
/// Inverts the price when token1 is the base, rescales to the raw wei ratio,
/// floors `log_1.0001`, then rounds to the nearest multiple of `tick_spacing`.
pub fn price_to_tick(
    price: f64,
    token0_decimals: u8,
    token1_decimals: u8,
    tick_spacing: i32,
    is_token0_base: bool,
) -> Result<i32, AmmError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(AmmError::InvalidPrice { price });
    }
    if tick_spacing <= 0 {
        return Err(AmmError::InvalidTickSpacing { tick_spacing });
    }

    let base_price = if is_token0_base { price } else { 1.0 / price };
    let raw_price =
        base_price * 10f64.powi(token1_decimals as i32 - token0_decimals as i32);
    if !raw_price.is_finite() || raw_price <= 0.0 {
        return Err(AmmError::InvalidPrice { price });
    }

    let tick = (raw_price.ln() / TICK_BASE.ln())
        .floor()
        .clamp(MIN_TICK as f64, MAX_TICK as f64) as i32;

    nearest_usable_tick(tick, tick_spacing)
}

/// Human price at `tick`, inverse of [`price_to_tick`]
pub fn tick_to_price(
    tick: i32,
    token0_decimals: u8,
    token1_decimals: u8,
    is_token0_base: bool,
) -> f64 {
    let raw_price = TICK_BASE.powi(tick);
    let price = raw_price * 10f64.powi(token0_decimals as i32 - token1_decimals as i32);
    if is_token0_base {
        price
    } else {
        1.0 / price
    }
}

/// Human price (token1 per token0) of a pool's current sqrt price
pub fn sqrt_price_x96_to_price(sqrt_price_x96: U256, token0_decimals: u8, token1_decimals: u8) -> f64 {
    let sqrt_price = u256_to_f64(sqrt_price_x96) / Q96;
    sqrt_price * sqrt_price * 10f64.powi(token0_decimals as i32 - token1_decimals as i32)
}

/// Round to the nearest multiple of `tick_spacing` (halves toward +inf), kept in bounds
pub fn nearest_usable_tick(tick: i32, tick_spacing: i32) -> Result<i32, AmmError> {
    let (min, max) = usable_tick_bounds(tick_spacing)?;
    let spacing = tick_spacing as i64;
    let rounded = (tick as i64 + spacing / 2).div_euclid(spacing) * spacing;
    Ok(rounded.clamp(min as i64, max as i64) as i32)
}

pub fn min_usable_tick(tick_spacing: i32) -> Result<i32, AmmError> {
    usable_tick_bounds(tick_spacing).map(|(min, _)| min)
}

pub fn max_usable_tick(tick_spacing: i32) -> Result<i32, AmmError> {
    usable_tick_bounds(tick_spacing).map(|(_, max)| max)
}

fn usable_tick_bounds(tick_spacing: i32) -> Result<(i32, i32), AmmError> {
    if tick_spacing <= 0 {
        return Err(AmmError::InvalidTickSpacing { tick_spacing });
    }
    Ok((
        (MIN_TICK / tick_spacing) * tick_spacing,
        (MAX_TICK / tick_spacing) * tick_spacing,
    ))
}
