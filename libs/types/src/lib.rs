//! # Eddy Shared Types
//!
//! Value types passed between the math engine, the ABI codecs and the router.
//!
//! ## Design Philosophy
//!
//! - **Two numeric regimes**: protocol-exact values are `U256` integers in the token's
//!   smallest unit; human-facing values (prices, suggested deposits) are `f64`
//! - **Immutable snapshots**: pool state is supplied by the caller and never mutated
//! - **Canonical ordering**: pools are addressed by `(token0, token1)` with `token0 < token1`
//!
//! ## Quick Start
//!
//! ```rust
//! use types::{parse_units, format_units, Token, TokenPair};
//! use types::H160;
//!
//! let weth = Token::new(H160::from_low_u64_be(2), 18, "WETH");
//! let usdc = Token::new(H160::from_low_u64_be(1), 6, "USDC");
//!
//! let pair = TokenPair::new(&weth, &usdc);
//! assert_eq!(pair.token0, usdc.address);
//! assert!(!pair.zero_for_one);
//!
//! let amount = parse_units("1.5", weth.decimals).unwrap();
//! assert_eq!(format_units(amount, weth.decimals), "1.5");
//! ```

pub mod amount;
pub mod pool;
pub mod route;
pub mod token;

pub use amount::{
    format_units, parse_units, pow10, u256_to_f64, AmountError, NormalizedAmount, MAX_POW10_EXP,
};
pub use pool::{MarketSnapshot, PoolKey, PoolStateSnapshot, V2PoolSnapshot, V3PoolSnapshot};
pub use route::{Hop, MinimumOutput, Quote, QuoteMetadata, Route, RoutePlan, SourceKind};
pub use token::{parse_address, sort_tokens, AddressError, Token, TokenPair};

pub use ethereum_types::{H160, U256, U512};

/// On-chain address
pub type Address = H160;
