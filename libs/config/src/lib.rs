//! # Eddy Router Configuration
//!
//! Loads the router's runtime parameters from a TOML file with `EDDY_`-prefixed
//! environment overrides, and holds the defaults every field falls back to.
//!
//! ## Usage
//!
//! ```rust
//! use eddy_config::{RouterConfig, V3QuoteMode};
//!
//! let config = RouterConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.tick_spacings, vec![1, 50, 100, 200, 2000]);
//! assert_eq!(config.v3_quote_mode, V3QuoteMode::Simulation);
//! ```

pub mod defaults;
pub mod router_config;

pub use router_config::{load_config, RouterConfig, V3QuoteMode};
