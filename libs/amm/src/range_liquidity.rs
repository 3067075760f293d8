//! Liquidity position sizing over a price range
//!
//! Suggests the companion deposit for a single-sided input using the standard
//! concentrated-liquidity invariant. Everything is `f64`: the output only sizes a
//! suggested deposit, the enforced bounds come from [`crate::slippage`].

use crate::error::AmmError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Human-readable price bounds, always `lower <= upper` after construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub lower: f64,
    pub upper: f64,
}

impl PriceRange {
    /// Build a range, swapping out-of-order bounds
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { lower: a, upper: b }
        } else {
            Self { lower: b, upper: a }
        }
    }

    /// `(0, ∞)`
    pub fn full() -> Self {
        Self {
            lower: 0.0,
            upper: f64::INFINITY,
        }
    }

    pub fn validate(&self) -> Result<(), AmmError> {
        let ordered = self.lower < self.upper;
        if self.lower.is_nan() || self.upper.is_nan() || self.lower < 0.0 || !ordered {
            return Err(AmmError::DegenerateRange {
                lower: self.lower,
                upper: self.upper,
            });
        }
        Ok(())
    }
}

/// Current price and the range a position will cover
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangePosition {
    pub current_price: f64,
    pub range: PriceRange,
}

impl RangePosition {
    pub fn new(current_price: f64, lower: f64, upper: f64) -> Self {
        Self {
            current_price,
            range: PriceRange::new(lower, upper),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredTokens {
    pub needs_token0: bool,
    pub needs_token1: bool,
    pub single_sided: bool,
}

/// Suggested deposit in human units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PositionAmounts {
    pub amount0: f64,
    pub amount1: f64,
}

/// Which tokens a position over `[lower, upper]` holds at `current_price`
///
/// At or below `lower` the position is all token0, waiting for the price to rise;
/// at or above `upper` it is all token1.
pub fn required_tokens(current_price: f64, lower: f64, upper: f64) -> RequiredTokens {
    let range = PriceRange::new(lower, upper);
    if current_price <= range.lower {
        RequiredTokens {
            needs_token0: true,
            needs_token1: false,
            single_sided: true,
        }
    } else if current_price >= range.upper {
        RequiredTokens {
            needs_token0: false,
            needs_token1: true,
            single_sided: true,
        }
    } else {
        RequiredTokens {
            needs_token0: true,
            needs_token1: true,
            single_sided: false,
        }
    }
}

fn check_inputs(amount: f64, current_price: f64, range: &PriceRange) -> Result<(), AmmError> {
    range.validate()?;
    if !current_price.is_finite() || current_price <= 0.0 {
        return Err(AmmError::InvalidPrice {
            price: current_price,
        });
    }
    if !amount.is_finite() || amount < 0.0 {
        return Err(AmmError::InvalidAmount { amount });
    }
    Ok(())
}

/// token1 needed alongside `amount0`
///
/// `L = amount0 · √P · √Pb / (√Pb − √P)`, `amount1 = L · (√P − √Pa)`.
/// `L` is evaluated as `amount0 · √P / (1 − √P/√Pb)` so an infinite upper bound
/// yields the full-range limit. Returns 0 when `P <= Pa` (token0 only) or
/// `P > Pb` (no token0 is deposited).
pub fn amount1_from_amount0(
    amount0: f64,
    current_price: f64,
    lower: f64,
    upper: f64,
) -> Result<f64, AmmError> {
    let range = PriceRange::new(lower, upper);
    check_inputs(amount0, current_price, &range)?;

    if current_price <= range.lower || current_price > range.upper {
        return Ok(0.0);
    }

    let sqrt_p = current_price.sqrt();
    let sqrt_pa = range.lower.sqrt();
    let sqrt_pb = range.upper.sqrt();
    if sqrt_pb == sqrt_p {
        return Err(AmmError::DivisionByZero { bound: range.upper });
    }

    let liquidity = amount0 * sqrt_p / (1.0 - sqrt_p / sqrt_pb);
    Ok(liquidity * (sqrt_p - sqrt_pa))
}

/// token0 needed alongside `amount1`
///
/// `L = amount1 / (√P − √Pa)`, `amount0 = L · (1/√P − 1/√Pb)`.
/// Returns 0 when `P >= Pb` (token1 only) or `P < Pa` (no token1 is deposited).
pub fn amount0_from_amount1(
    amount1: f64,
    current_price: f64,
    lower: f64,
    upper: f64,
) -> Result<f64, AmmError> {
    let range = PriceRange::new(lower, upper);
    check_inputs(amount1, current_price, &range)?;

    if current_price >= range.upper || current_price < range.lower {
        return Ok(0.0);
    }

    let sqrt_p = current_price.sqrt();
    let sqrt_pa = range.lower.sqrt();
    let sqrt_pb = range.upper.sqrt();
    if sqrt_p == sqrt_pa {
        return Err(AmmError::DivisionByZero { bound: range.lower });
    }

    let liquidity = amount1 / (sqrt_p - sqrt_pa);
    Ok(liquidity * (1.0 / sqrt_p - 1.0 / sqrt_pb))
}

/// Deposit suggestion for a one-sided user input
///
/// Single-sided ranges short-circuit without square roots: the input is used as-is
/// when it is the needed token, and nothing is suggested when it is not.
pub fn optimal_amounts(
    input_amount: f64,
    input_is_token0: bool,
    position: &RangePosition,
) -> Result<PositionAmounts, AmmError> {
    let range = position.range;
    check_inputs(input_amount, position.current_price, &range)?;

    let required = required_tokens(position.current_price, range.lower, range.upper);
    if required.single_sided {
        let usable = input_is_token0 == required.needs_token0;
        if !usable {
            debug!(
                "Range [{}, {}] at price {} does not take the input token",
                range.lower, range.upper, position.current_price
            );
        }
        let amount = if usable { input_amount } else { 0.0 };
        return Ok(if required.needs_token0 {
            PositionAmounts {
                amount0: amount,
                amount1: 0.0,
            }
        } else {
            PositionAmounts {
                amount0: 0.0,
                amount1: amount,
            }
        });
    }

    if input_is_token0 {
        Ok(PositionAmounts {
            amount0: input_amount,
            amount1: amount1_from_amount0(
                input_amount,
                position.current_price,
                range.lower,
                range.upper,
            )?,
        })
    } else {
        Ok(PositionAmounts {
            amount0: amount0_from_amount1(
                input_amount,
                position.current_price,
                range.lower,
                range.upper,
            )?,
            amount1: input_amount,
        })
    }
}
