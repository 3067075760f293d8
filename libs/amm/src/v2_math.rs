//! Constant-function V2 math with exact integer calculations
//!
//! Two curves share one pool family: volatile (`x·y = k`) and stable
//! (`x³y + y³x = k`). Outputs match the pair contract's `getAmountOut` to the wei,
//! so every step uses the same 256-bit integer truncation the contract does.

use ethereum_types::U256;
use types::pow10;

/// Pool reserves oriented for one trade direction
#[derive(Debug, Clone)]
pub struct V2PoolState {
    pub reserve_in: U256,
    pub reserve_out: U256,
    pub decimals_in: u8,
    pub decimals_out: u8,
    pub stable: bool,
    pub fee_bps: u16, // Fee in basis points (30 = 0.3%)
}

/// V2 AMM math functions
pub struct V2Math;

const NEWTON_ROUNDS: usize = 255;

fn wad() -> U256 {
    U256::from(1_000_000_000_000_000_000u64)
}

impl V2Math {
    /// Exact output amount after the pool fee
    ///
    /// `None` when either reserve is empty, the fee is not below 100%, or an
    /// intermediate value overflows.
    pub fn get_amount_out(amount_in: U256, pool: &V2PoolState) -> Option<U256> {
        if pool.reserve_in.is_zero() || pool.reserve_out.is_zero() || pool.fee_bps >= 10_000 {
            return None;
        }

        let fee = amount_in.checked_mul(U256::from(pool.fee_bps))? / U256::from(10_000u64);
        let amount_in = amount_in - fee;

        if pool.stable {
            Self::stable_amount_out(amount_in, pool)
        } else {
            Self::volatile_amount_out(amount_in, pool.reserve_in, pool.reserve_out)
        }
    }

    /// `amount_in * reserve_out / (reserve_in + amount_in)`
    pub fn volatile_amount_out(amount_in: U256, reserve_in: U256, reserve_out: U256) -> Option<U256> {
        let numerator = amount_in.checked_mul(reserve_out)?;
        let denominator = reserve_in.checked_add(amount_in)?;
        if denominator.is_zero() {
            return None;
        }
        Some(numerator / denominator)
    }

    /// Stable-curve output; reserves and input are normalized to 18 decimals first
    ///
    /// A precision whose unit does not fit in 256 bits has no quote.
    fn stable_amount_out(amount_in: U256, pool: &V2PoolState) -> Option<U256> {
        let scale_in = pow10(pool.decimals_in)?;
        let scale_out = pow10(pool.decimals_out)?;

        let xy = Self::stable_k(pool.reserve_in, pool.reserve_out, scale_in, scale_out)?;

        let reserve_in = pool.reserve_in.checked_mul(wad())? / scale_in;
        let reserve_out = pool.reserve_out.checked_mul(wad())? / scale_out;
        let amount_in = amount_in.checked_mul(wad())? / scale_in;

        let y = Self::get_y(amount_in.checked_add(reserve_in)?, xy, reserve_out)?;
        let out = reserve_out.checked_sub(y)?;
        Some(out.checked_mul(scale_out)? / wad())
    }

    /// Curve invariant `x·y·(x² + y²)` on 18-decimal normalized reserves
    pub fn stable_k(x: U256, y: U256, scale_x: U256, scale_y: U256) -> Option<U256> {
        let x = x.checked_mul(wad())? / scale_x;
        let y = y.checked_mul(wad())? / scale_y;
        Self::f(x, y)
    }

    fn f(x0: U256, y: U256) -> Option<U256> {
        let a = x0.checked_mul(y)? / wad();
        let b = x0.checked_mul(x0)? / wad() + y.checked_mul(y)? / wad();
        Some(a.checked_mul(b)? / wad())
    }

    /// `∂f/∂y`
    fn d(x0: U256, y: U256) -> Option<U256> {
        let three_x0 = x0.checked_mul(U256::from(3u64))?;
        let lhs = three_x0.checked_mul(y.checked_mul(y)? / wad())? / wad();
        let rhs = (x0.checked_mul(x0)? / wad()).checked_mul(x0)? / wad();
        lhs.checked_add(rhs)
    }

    /// Newton iteration for the post-trade reserve `y` with `f(x0, y) == xy`
    fn get_y(x0: U256, xy: U256, mut y: U256) -> Option<U256> {
        for _ in 0..NEWTON_ROUNDS {
            let k = Self::f(x0, y)?;
            let derivative = Self::d(x0, y)?;
            if derivative.is_zero() {
                return None;
            }

            if k < xy {
                let mut dy = (xy - k).checked_mul(wad())? / derivative;
                if dy.is_zero() {
                    if k == xy {
                        return Some(y);
                    }
                    if Self::f(x0, y.checked_add(U256::one())?)? > xy {
                        return Some(y + U256::one());
                    }
                    dy = U256::one();
                }
                y = y.checked_add(dy)?;
            } else {
                let mut dy = (k - xy).checked_mul(wad())? / derivative;
                if dy.is_zero() {
                    if k == xy || Self::f(x0, y.checked_sub(U256::one())?)? < xy {
                        return Some(y);
                    }
                    dy = U256::one();
                }
                y = y.checked_sub(dy)?;
            }
        }
        None
    }
}
