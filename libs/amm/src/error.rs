//! Typed failures of the math engine. All are recoverable and returned to the caller.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AmmError {
    #[error("Tick {tick} outside [{min}, {max}]", min = crate::tick_math::MIN_TICK, max = crate::tick_math::MAX_TICK)]
    TickOutOfBounds { tick: i32 },

    #[error("sqrtPriceX96 {value} outside the representable price range")]
    SqrtPriceOutOfBounds { value: String },

    #[error("Price must be finite and positive, got {price}")]
    InvalidPrice { price: f64 },

    #[error("Tick spacing must be positive, got {tick_spacing}")]
    InvalidTickSpacing { tick_spacing: i32 },

    #[error("Degenerate price range: lower {lower} must be below upper {upper}")]
    DegenerateRange { lower: f64, upper: f64 },

    #[error("Division by zero: current price sits on the range bound {bound}")]
    DivisionByZero { bound: f64 },

    #[error("Amount must be finite and non-negative, got {amount}")]
    InvalidAmount { amount: f64 },

    #[error("Slippage {bps} bps must be below 10000")]
    InvalidSlippage { bps: u32 },

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: &'static str },
}
