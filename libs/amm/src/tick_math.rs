//! Exact tick <-> sqrtPriceX96 conversion
//!
//! Bit-for-bit reproduction of the on-chain `TickMath` library. The result feeds
//! execution parameters, so it is computed with 256-bit integers only.

use crate::error::AmmError;
use ethereum_types::U256;

/// V3 tick math constants
pub const MIN_TICK: i32 = -887272;
pub const MAX_TICK: i32 = -MIN_TICK;

/// `tick_to_sqrt_price_x96(MIN_TICK)`
pub const MIN_SQRT_RATIO: U256 = U256([4295128739, 0, 0, 0]);
/// `tick_to_sqrt_price_x96(MAX_TICK)`
pub const MAX_SQRT_RATIO: U256 = U256([6743328256752651558, 17280870778742802505, 4294805859, 0]);

/// `1 / sqrt(1.0001)^(2^i)` in Q128.128, keyed by the bit of `|tick|` it applies to
const RATIO_MULTIPLIERS: [(u32, u128); 19] = [
    (0x2, 0xfff97272373d413259a46990580e213a),
    (0x4, 0xfff2e50f5f656932ef12357cf3c7fdcc),
    (0x8, 0xffe5caca7e10e4e61c3624eaa0941cd0),
    (0x10, 0xffcb9843d60f6159c9db58835c926644),
    (0x20, 0xff973b41fa98c081472e6896dfb254c0),
    (0x40, 0xff2ea16466c96a3843ec78b326b52861),
    (0x80, 0xfe5dee046a99a2a811c461f1969c3053),
    (0x100, 0xfcbe86c7900a88aedcffc83b479aa3a4),
    (0x200, 0xf987a7253ac413176f2b074cf7815e54),
    (0x400, 0xf3392b0822b70005940c7a398e4b70f3),
    (0x800, 0xe7159475a2c29b7443b29c7fa6e889d9),
    (0x1000, 0xd097f3bdfd2022b8845ad8f792aa5825),
    (0x2000, 0xa9f746462d870fdf8a65dc1f90e061e5),
    (0x4000, 0x70d869a156d2a1b890bb3df62baf32f7),
    (0x8000, 0x31be135f97d08fd981231505542fcfa6),
    (0x10000, 0x9aa508b5b7a84e1c677de54f3e99bc9),
    (0x20000, 0x5d6af8dedb81196699c329225ee604),
    (0x40000, 0x2216e584f5fa1ea926041bedfe98),
    (0x80000, 0x48a170391f7dc42444e8fa2),
];

const BIT0_RATIO: u128 = 0xfffcb933bd6fad37aa2d162d1a594001;

/// Q64.96 square root price at `tick`
///
/// # Errors
/// `TickOutOfBounds` when `|tick| > MAX_TICK`.
pub fn tick_to_sqrt_price_x96(tick: i32) -> Result<U256, AmmError> {
    let abs_tick = tick.unsigned_abs();
    if abs_tick > MAX_TICK as u32 {
        return Err(AmmError::TickOutOfBounds { tick });
    }

    let mut ratio = if abs_tick & 0x1 != 0 {
        U256::from(BIT0_RATIO)
    } else {
        U256::one() << 128
    };

    // ratio < 2^129 and every multiplier < 2^128, so the product fits in 256 bits
    for &(bit, multiplier) in RATIO_MULTIPLIERS.iter() {
        if abs_tick & bit != 0 {
            ratio = (ratio * U256::from(multiplier)) >> 128;
        }
    }

    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128.128 -> Q64.96, rounding up so the result never understates the price
    let remainder = ratio & U256::from(u32::MAX);
    let shifted = ratio >> 32;
    if remainder.is_zero() {
        Ok(shifted)
    } else {
        Ok(shifted + U256::one())
    }
}

/// Greatest tick whose sqrt ratio is `<= sqrt_price_x96`
///
/// Binary search over the exact forward function, so it always agrees with
/// [`tick_to_sqrt_price_x96`] on grid points.
pub fn sqrt_price_x96_to_tick(sqrt_price_x96: U256) -> Result<i32, AmmError> {
    if sqrt_price_x96 < MIN_SQRT_RATIO || sqrt_price_x96 >= MAX_SQRT_RATIO {
        return Err(AmmError::SqrtPriceOutOfBounds {
            value: sqrt_price_x96.to_string(),
        });
    }

    let (mut lo, mut hi) = (MIN_TICK, MAX_TICK);
    while lo < hi {
        let mid = lo + (hi - lo + 1) / 2;
        if tick_to_sqrt_price_x96(mid)? <= sqrt_price_x96 {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    Ok(lo)
}
