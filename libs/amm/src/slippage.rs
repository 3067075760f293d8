//! Slippage guard: the minimum output handed to the execution layer
//!
//! Integer-only; the result is floored so the bound never under-protects.

use crate::error::AmmError;
use ethereum_types::U256;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use types::MinimumOutput;

pub const BPS_DENOMINATOR: u16 = 10_000;

/// `amount_out * (10000 - slippage_bps) / 10000`
///
/// # Errors
/// `InvalidSlippage` when `slippage_bps >= 10000`.
pub fn min_output(amount_out: U256, slippage_bps: u16) -> Result<MinimumOutput, AmmError> {
    if slippage_bps >= BPS_DENOMINATOR {
        return Err(AmmError::InvalidSlippage {
            bps: slippage_bps as u32,
        });
    }

    // The 512-bit product cannot overflow and the quotient is <= amount_out
    let kept = U256::from(BPS_DENOMINATOR - slippage_bps);
    let amount_out_min = crate::full_math::mul_div(amount_out, kept, U256::from(BPS_DENOMINATOR))
        .ok_or(AmmError::Overflow {
            context: "min_output",
        })?;

    Ok(MinimumOutput {
        amount_out_min,
        slippage_bps,
    })
}

/// Parse a user-facing percentage (`0.5` = 0.5%) into basis points
///
/// Fractions of a basis point are dropped, which tightens the bound.
pub fn slippage_bps_from_percent(percent: Decimal) -> Result<u16, AmmError> {
    let invalid = |bps: Decimal| AmmError::InvalidSlippage {
        bps: bps.abs().to_u32().unwrap_or(u32::MAX),
    };
    let bps = percent
        .checked_mul(dec!(100))
        .ok_or_else(|| invalid(Decimal::MAX))?
        .trunc();
    if percent.is_sign_negative() || bps >= Decimal::from(BPS_DENOMINATOR) {
        return Err(invalid(bps));
    }
    bps.to_u16().ok_or(AmmError::Overflow {
        context: "slippage_bps_from_percent",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_percent() {
        let bound = min_output(U256::from(1_000_000u64), 500).unwrap();
        assert_eq!(bound.amount_out_min, U256::from(950_000u64));
        assert_eq!(bound.slippage_bps, 500);
    }

    #[test]
    fn test_rounds_down() {
        // 999 * 9950 / 10000 = 994.005
        let bound = min_output(U256::from(999u64), 50).unwrap();
        assert_eq!(bound.amount_out_min, U256::from(994u64));
    }

    #[test]
    fn test_zero_slippage_is_identity() {
        let amount = U256::MAX;
        assert_eq!(min_output(amount, 0).unwrap().amount_out_min, amount);
    }

    #[test]
    fn test_full_slippage_rejected() {
        assert_eq!(
            min_output(U256::from(1u64), 10_000),
            Err(AmmError::InvalidSlippage { bps: 10_000 })
        );
        assert!(min_output(U256::from(1u64), u16::MAX).is_err());
        assert_eq!(min_output(U256::from(10_000u64), 9_999).unwrap().amount_out_min, U256::one());
    }

    #[test]
    fn test_percent_parsing() {
        assert_eq!(slippage_bps_from_percent(dec!(0.5)).unwrap(), 50);
        assert_eq!(slippage_bps_from_percent(dec!(5)).unwrap(), 500);
        assert_eq!(slippage_bps_from_percent(dec!(0.125)).unwrap(), 12);
        assert_eq!(slippage_bps_from_percent(dec!(0)).unwrap(), 0);
        assert!(slippage_bps_from_percent(dec!(100)).is_err());
        assert!(slippage_bps_from_percent(dec!(-1)).is_err());
    }

    #[test]
    fn test_percent_out_of_decimal_range() {
        assert_eq!(
            slippage_bps_from_percent(Decimal::MAX),
            Err(AmmError::InvalidSlippage { bps: u32::MAX })
        );
        assert!(slippage_bps_from_percent(Decimal::MIN).is_err());
        assert!(slippage_bps_from_percent(Decimal::from_i128_with_scale(10i128.pow(27), 0)).is_err());
    }
}
