//! # Eddy Router - Best Execution Across V2 and Concentrated-Liquidity Pools
//!
//! ## Purpose
//!
//! Quotes a swap against every liquidity source of one DEX deployment and picks the
//! best route: V2 volatile and stable pools, V3 pools at each configured tick spacing,
//! and V3 two-hop routes through intermediate tokens. The chosen route carries a
//! slippage-bounded minimum output for the execution layer.
//!
//! ## Integration Points
//!
//! - **Input**: [`QuoteRequest`] plus an immutable [`types::MarketSnapshot`], loaded from
//!   JSON by [`snapshot_loader`] or refreshed on chain by [`chain_reader`]
//! - **Chain access**: read-only `eth_call` through a [`CallBackend`]
//! - **Output**: [`types::RoutePlan`] for swaps, [`position::PositionPlan`] for ranges
//!
//! ## Architecture Role
//!
//! ```text
//! QuoteSession (debounce + generation tracking)
//!      │
//!      ▼
//! RouteAggregator ──join_all──> SourceQuoter × 4 ──> eddy_amm math / dex codecs
//!      │                                                   │
//!      ▼                                                   ▼
//! select_best -> min_output                         CallBackend (web3)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use eddy_config::RouterConfig;
//! use eddy_router::{snapshot_loader, QuoteRequest, RouteAggregator};
//! use std::path::Path;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = RouterConfig::default();
//! let market = snapshot_loader::load_market_snapshot(Path::new("market.json"))?;
//! let weth = snapshot_loader::find_token(&market, "WETH")?;
//! let usdc = snapshot_loader::find_token(&market, "USDC")?;
//!
//! let aggregator = RouteAggregator::from_config(&config, None)?;
//! let request = QuoteRequest::from_human(weth, usdc, "1.0")?;
//! let plan = aggregator.quote_with_slippage(&request, &market).await?;
//! println!("{} (min {})", plan.route, plan.min_output.amount_out_min);
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod backend;
pub mod chain_reader;
pub mod error;
pub mod logging;
pub mod position;
pub mod quoters;
pub mod request;
pub mod session;
pub mod snapshot_loader;

pub use aggregator::{select_best, RouteAggregator};
pub use backend::{call_typed, CallBackend, Web3CallBackend};
pub use chain_reader::ChainReader;
pub use error::RouterError;
pub use position::{plan_position, PositionPlan, PositionRequest};
pub use quoters::{SourceQuoter, V2Quoter, V3DirectQuoter, V3MultiHopQuoter, V3QuoteSource};
pub use request::QuoteRequest;
pub use session::{QuoteSession, RequestGeneration, RequestTicket, SessionUpdate};
