//! Liquidity position planning against a live pool
//!
//! Turns a human price range (quote per base) into usable ticks for one tick spacing
//! and suggests the companion deposit at the pool's current price. Amounts are in
//! human units; nothing here produces an execution bound.

use crate::error::RouterError;
use eddy_amm::{
    max_usable_tick, min_usable_tick, optimal_amounts, price_to_tick, sqrt_price_x96_to_price,
    tick_to_price, AmmError, PositionAmounts, RangePosition,
};
use ethereum_types::H160;
use types::{MarketSnapshot, Token, TokenPair};

/// Range and deposit input for one concentrated-liquidity position
#[derive(Debug, Clone, PartialEq)]
pub struct PositionRequest {
    /// Prices are units of `quote` per one `base`
    pub base: Token,
    pub quote: Token,
    pub tick_spacing: i32,
    /// `None` extends the range to the lowest usable tick
    pub lower_price: Option<f64>,
    /// `None` extends the range to the highest usable tick
    pub upper_price: Option<f64>,
    pub input_token: H160,
    pub input_amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionPlan {
    pub token0: H160,
    pub token1: H160,
    pub tick_spacing: i32,
    pub lower_tick: i32,
    pub upper_tick: i32,
    /// token1 per token0 at the pool's current sqrt price
    pub current_price: f64,
    pub amounts: PositionAmounts,
}

impl PositionPlan {
    /// Suggested deposit of `token`, `None` if it is not part of the pool
    pub fn amount_of(&self, token: H160) -> Option<f64> {
        if token == self.token0 {
            Some(self.amounts.amount0)
        } else if token == self.token1 {
            Some(self.amounts.amount1)
        } else {
            None
        }
    }
}

pub fn plan_position(
    request: &PositionRequest,
    market: &MarketSnapshot,
    wrapped_native: H160,
) -> Result<PositionPlan, RouterError> {
    let base = request.base.routing_address(wrapped_native);
    let quote = request.quote.routing_address(wrapped_native);
    if base == quote {
        return Err(RouterError::InvalidRequest(
            "position tokens resolve to the same address".to_string(),
        ));
    }
    if request.tick_spacing <= 0 {
        return Err(AmmError::InvalidTickSpacing {
            tick_spacing: request.tick_spacing,
        }
        .into());
    }

    let pair = TokenPair::from_addresses(base, quote);
    let base_is_token0 = pair.zero_for_one;
    let (decimals0, decimals1) = if base_is_token0 {
        (request.base.decimals, request.quote.decimals)
    } else {
        (request.quote.decimals, request.base.decimals)
    };

    let input = if request.input_token == request.base.address {
        base
    } else if request.input_token == request.quote.address {
        quote
    } else {
        request.input_token
    };
    if input != pair.token0 && input != pair.token1 {
        return Err(RouterError::InvalidRequest(format!(
            "input token {:?} is not part of the position",
            request.input_token
        )));
    }

    let pool = market
        .v3_pool(base, quote, request.tick_spacing)
        .filter(|pool| pool.exists)
        .ok_or(RouterError::NoPoolForTickSpacing {
            tick_spacing: request.tick_spacing,
        })?;
    let current_price = sqrt_price_x96_to_price(pool.sqrt_price_x96, decimals0, decimals1);

    let to_tick = |price: Option<f64>, open_end: i32| -> Result<i32, AmmError> {
        match price {
            Some(price) => price_to_tick(price, decimals0, decimals1, request.tick_spacing, base_is_token0),
            None => Ok(open_end),
        }
    };
    let min_tick = min_usable_tick(request.tick_spacing)?;
    let max_tick = max_usable_tick(request.tick_spacing)?;
    // with token1 as base, a higher human price is a lower tick
    let (low_end, high_end) = if base_is_token0 {
        (min_tick, max_tick)
    } else {
        (max_tick, min_tick)
    };
    let tick_a = to_tick(request.lower_price, low_end)?;
    let tick_b = to_tick(request.upper_price, high_end)?;
    let (lower_tick, upper_tick) = (tick_a.min(tick_b), tick_a.max(tick_b));

    if lower_tick == upper_tick {
        return Err(AmmError::DegenerateRange {
            lower: tick_to_price(lower_tick, decimals0, decimals1, true),
            upper: tick_to_price(upper_tick, decimals0, decimals1, true),
        }
        .into());
    }

    let full_low = lower_tick == min_tick;
    let full_high = upper_tick == max_tick;
    let lower = if full_low {
        0.0
    } else {
        tick_to_price(lower_tick, decimals0, decimals1, true)
    };
    let upper = if full_high {
        f64::INFINITY
    } else {
        tick_to_price(upper_tick, decimals0, decimals1, true)
    };

    let position = RangePosition::new(current_price, lower, upper);
    let amounts = optimal_amounts(request.input_amount, input == pair.token0, &position)?;

    tracing::debug!(
        "Position [{}, {}] at spacing {}: {} token0 / {} token1",
        lower_tick,
        upper_tick,
        request.tick_spacing,
        amounts.amount0,
        amounts.amount1
    );

    Ok(PositionPlan {
        token0: pair.token0,
        token1: pair.token1,
        tick_spacing: request.tick_spacing,
        lower_tick,
        upper_tick,
        current_price,
        amounts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use eddy_amm::{amount1_from_amount0, tick_to_sqrt_price_x96};
    use types::V3PoolSnapshot;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    fn token(n: u64, symbol: &str) -> Token {
        Token::new(H160::from_low_u64_be(n), 18, symbol)
    }

    fn market_at(tick: i32, spacing: i32) -> MarketSnapshot {
        let mut market = MarketSnapshot::new();
        market.insert_v3(
            H160::from_low_u64_be(1),
            H160::from_low_u64_be(2),
            V3PoolSnapshot {
                sqrt_price_x96: tick_to_sqrt_price_x96(tick).unwrap(),
                current_tick: tick,
                tick_spacing: spacing,
                exists: true,
                address: None,
            },
        );
        market
    }

    fn request(base: Token, quote: Token, lower: Option<f64>, upper: Option<f64>, input: H160) -> PositionRequest {
        PositionRequest {
            base,
            quote,
            tick_spacing: 50,
            lower_price: lower,
            upper_price: upper,
            input_token: input,
            input_amount: 1.0,
        }
    }

    #[test]
    fn test_in_range_companion_amount() {
        let (t0, t1) = (token(1, "AAA"), token(2, "BBB"));
        let market = market_at(0, 50);
        let req = request(t0.clone(), t1, Some(0.5), Some(2.0), t0.address);

        let plan = plan_position(&req, &market, H160::zero()).unwrap();
        assert_eq!(plan.lower_tick % 50, 0);
        assert_eq!(plan.upper_tick % 50, 0);
        assert!(plan.lower_tick < 0 && plan.upper_tick > 0);
        assert!(close(plan.current_price, 1.0));

        let expected = amount1_from_amount0(
            1.0,
            plan.current_price,
            tick_to_price(plan.lower_tick, 18, 18, true),
            tick_to_price(plan.upper_tick, 18, 18, true),
        )
        .unwrap();
        assert_eq!(plan.amounts.amount0, 1.0);
        assert!(close(plan.amounts.amount1, expected));
        assert_eq!(plan.amount_of(t0.address), Some(1.0));
    }

    #[test]
    fn test_token1_base_orders_ticks() {
        let (t0, t1) = (token(1, "AAA"), token(2, "BBB"));
        let market = market_at(0, 50);
        // t0 per t1 from 0.5 to 2.0 is the same band seen from the other side
        let req = request(t1, t0.clone(), Some(0.5), Some(2.0), t0.address);

        let plan = plan_position(&req, &market, H160::zero()).unwrap();
        assert!(plan.lower_tick < plan.upper_tick);
        assert!(plan.lower_tick < 0 && plan.upper_tick > 0);
        assert_eq!(plan.amounts.amount0, 1.0);
    }

    #[test]
    fn test_single_sided_range_ignores_wrong_input() {
        let (t0, t1) = (token(1, "AAA"), token(2, "BBB"));
        let market = market_at(0, 50);
        // range above the current price holds only token0
        let req = request(t0, t1.clone(), Some(2.0), Some(4.0), t1.address);

        let plan = plan_position(&req, &market, H160::zero()).unwrap();
        assert_eq!(plan.amounts, PositionAmounts::default());
    }

    #[test]
    fn test_full_range_symmetry() {
        let (t0, t1) = (token(1, "AAA"), token(2, "BBB"));
        let market = market_at(0, 50);
        let req = request(t0.clone(), t1, None, None, t0.address);

        let plan = plan_position(&req, &market, H160::zero()).unwrap();
        assert_eq!(Ok(plan.lower_tick), min_usable_tick(50));
        assert_eq!(Ok(plan.upper_tick), max_usable_tick(50));
        assert!(close(plan.amounts.amount1, plan.current_price));
    }

    #[test]
    fn test_missing_pool() {
        let (t0, t1) = (token(1, "AAA"), token(2, "BBB"));
        let market = market_at(0, 50);
        let mut req = request(t0.clone(), t1, Some(0.5), Some(2.0), t0.address);
        req.tick_spacing = 200;

        assert_eq!(
            plan_position(&req, &market, H160::zero()),
            Err(RouterError::NoPoolForTickSpacing { tick_spacing: 200 })
        );
    }

    #[test]
    fn test_foreign_input_token_rejected() {
        let (t0, t1) = (token(1, "AAA"), token(2, "BBB"));
        let market = market_at(0, 50);
        let req = request(t0, t1, Some(0.5), Some(2.0), H160::from_low_u64_be(9));

        assert!(matches!(
            plan_position(&req, &market, H160::zero()),
            Err(RouterError::InvalidRequest(_))
        ));
    }
}
