//! Concentrated-liquidity spot math
//!
//! Zero-slippage estimate at the pool's current sqrt price. Only used to rank
//! routes when no quoter simulation is available; exact outputs come from the
//! on-chain quoter.

use crate::full_math::mul_div;
use ethereum_types::U256;

/// V3 spot-price helpers
pub struct V3Math;

impl V3Math {
    /// `2^96`
    pub fn q96() -> U256 {
        U256::one() << 96
    }

    /// Output at the current price, ignoring depth and fees
    ///
    /// token0 -> token1: `amount_in · √P² / 2^192`;
    /// token1 -> token0: `amount_in · 2^192 / √P²`.
    pub fn spot_amount_out(amount_in: U256, sqrt_price_x96: U256, zero_for_one: bool) -> Option<U256> {
        if sqrt_price_x96.is_zero() {
            return None;
        }
        let q96 = Self::q96();
        if zero_for_one {
            let partial = mul_div(amount_in, sqrt_price_x96, q96)?;
            mul_div(partial, sqrt_price_x96, q96)
        } else {
            let partial = mul_div(amount_in, q96, sqrt_price_x96)?;
            mul_div(partial, q96, sqrt_price_x96)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tick_math::{tick_to_sqrt_price_x96, MAX_SQRT_RATIO, MIN_SQRT_RATIO};

    #[test]
    fn test_unit_price() {
        let sqrt_price = tick_to_sqrt_price_x96(0).unwrap();
        let amount = U256::from(1_000_000u64);
        assert_eq!(V3Math::spot_amount_out(amount, sqrt_price, true), Some(amount));
        assert_eq!(V3Math::spot_amount_out(amount, sqrt_price, false), Some(amount));
    }

    #[test]
    fn test_price_four() {
        // √P = 2 -> P = 4 token1 per token0
        let sqrt_price = U256::one() << 97;
        let amount = U256::from(1000u64);
        assert_eq!(V3Math::spot_amount_out(amount, sqrt_price, true), Some(U256::from(4000u64)));
        assert_eq!(V3Math::spot_amount_out(amount, sqrt_price, false), Some(U256::from(250u64)));
    }

    #[test]
    fn test_extreme_prices_do_not_panic() {
        let amount = U256::from(10u64).pow(U256::from(30u64));
        assert!(V3Math::spot_amount_out(amount, MAX_SQRT_RATIO, true).is_some());
        assert!(V3Math::spot_amount_out(amount, MIN_SQRT_RATIO, false).is_some());
        assert_eq!(V3Math::spot_amount_out(U256::MAX, MAX_SQRT_RATIO, true), None);
        assert_eq!(V3Math::spot_amount_out(amount, U256::zero(), true), None);
    }
}
