//! Market snapshot loading from JSON
//!
//! File layout:
//!
//! ```json
//! {
//!   "tokens": [{ "address": "0x…", "decimals": 18, "symbol": "WETH" }],
//!   "v2_pools": [{ "token_a": "0x…", "token_b": "0x…", "reserve0": "1000000000",
//!                  "reserve1": "500000000000000000", "stable": false }],
//!   "v3_pools": [{ "token_a": "0x…", "token_b": "0x…", "tick_spacing": 100,
//!                  "current_tick": -200000 }]
//! }
//! ```
//!
//! Amounts are raw integers in the token's smallest unit, as decimal or `0x` hex
//! strings. Reserves follow canonical order (`reserve0` belongs to the lower address).
//! A V3 entry needs `sqrt_price_x96`, `current_tick` or both; the missing one is
//! derived with the exact tick math.

use anyhow::{bail, Context, Result};
use eddy_amm::{sqrt_price_x96_to_tick, tick_to_sqrt_price_x96};
use ethereum_types::{H160, U256};
use serde::Deserialize;
use std::path::Path;
use types::{
    parse_address, MarketSnapshot, Token, V2PoolSnapshot, V3PoolSnapshot, MAX_POW10_EXP as MAX_DECIMALS,
};

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    tokens: Vec<TokenEntry>,
    #[serde(default)]
    v2_pools: Vec<V2PoolEntry>,
    #[serde(default)]
    v3_pools: Vec<V3PoolEntry>,
}

#[derive(Debug, Deserialize)]
struct TokenEntry {
    address: String,
    decimals: u8,
    #[serde(default)]
    symbol: String,
    #[serde(default)]
    is_native: bool,
}

#[derive(Debug, Deserialize)]
struct V2PoolEntry {
    token_a: String,
    token_b: String,
    reserve0: String,
    reserve1: String,
    stable: bool,
    fee_bps: Option<u16>,
    address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct V3PoolEntry {
    token_a: String,
    token_b: String,
    tick_spacing: i32,
    sqrt_price_x96: Option<String>,
    current_tick: Option<i32>,
    #[serde(default = "default_exists")]
    exists: bool,
    address: Option<String>,
}

fn default_exists() -> bool {
    true
}

/// Read and validate a snapshot file
pub fn load_market_snapshot(path: &Path) -> Result<MarketSnapshot> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {:?}", path))?;
    let market = parse_market_snapshot(&contents)
        .with_context(|| format!("Invalid snapshot {:?}", path))?;
    crate::log_pool!(
        "Loaded {} pools and {} tokens from {:?}",
        market.pool_count(),
        market.tokens().count(),
        path
    );
    Ok(market)
}

/// Build a snapshot from JSON text
pub fn parse_market_snapshot(json: &str) -> Result<MarketSnapshot> {
    let file: SnapshotFile = serde_json::from_str(json).context("Malformed snapshot JSON")?;
    let mut market = MarketSnapshot::new();

    for entry in file.tokens {
        let address = parse_address(&entry.address)?;
        if entry.decimals > MAX_DECIMALS {
            bail!("Token {:?} has {} decimals, at most {} supported", address, entry.decimals, MAX_DECIMALS);
        }
        market.add_token(Token {
            address,
            decimals: entry.decimals,
            is_native: entry.is_native,
            symbol: entry.symbol,
        });
    }

    for entry in file.v2_pools {
        let (token_a, token_b) = pool_tokens(&market, &entry.token_a, &entry.token_b)?;
        market.insert_v2(
            token_a,
            token_b,
            V2PoolSnapshot {
                reserve0: parse_amount(&entry.reserve0).context("reserve0")?,
                reserve1: parse_amount(&entry.reserve1).context("reserve1")?,
                stable: entry.stable,
                fee_bps: entry.fee_bps,
                address: entry.address.as_deref().map(parse_address).transpose()?,
            },
        );
    }

    for entry in file.v3_pools {
        let (token_a, token_b) = pool_tokens(&market, &entry.token_a, &entry.token_b)?;
        if entry.tick_spacing <= 0 {
            bail!("tick_spacing must be positive, got {}", entry.tick_spacing);
        }

        let (sqrt_price_x96, current_tick) = match (&entry.sqrt_price_x96, entry.current_tick) {
            (Some(sqrt_price), Some(tick)) => (parse_amount(sqrt_price)?, tick),
            (Some(sqrt_price), None) => {
                let sqrt_price = parse_amount(sqrt_price)?;
                (sqrt_price, sqrt_price_x96_to_tick(sqrt_price)?)
            }
            (None, Some(tick)) => (tick_to_sqrt_price_x96(tick)?, tick),
            (None, None) => bail!(
                "V3 pool at spacing {} needs sqrt_price_x96 or current_tick",
                entry.tick_spacing
            ),
        };

        market.insert_v3(
            token_a,
            token_b,
            V3PoolSnapshot {
                sqrt_price_x96,
                current_tick,
                tick_spacing: entry.tick_spacing,
                exists: entry.exists,
                address: entry.address.as_deref().map(parse_address).transpose()?,
            },
        );
    }

    Ok(market)
}

/// Look a token up by symbol (case-insensitive) or address
pub fn find_token(market: &MarketSnapshot, query: &str) -> Result<Token> {
    if let Ok(address) = parse_address(query) {
        if let Some(token) = market.token(&address) {
            return Ok(token.clone());
        }
    }
    market
        .tokens()
        .find(|token| token.symbol.eq_ignore_ascii_case(query))
        .cloned()
        .with_context(|| format!("Unknown token {:?}", query))
}

fn pool_tokens(market: &MarketSnapshot, a: &str, b: &str) -> Result<(H160, H160)> {
    let token_a = parse_address(a)?;
    let token_b = parse_address(b)?;
    if token_a == token_b {
        bail!("Pool tokens must differ: {:?}", token_a);
    }
    for token in [token_a, token_b] {
        if market.token(&token).is_none() {
            bail!("Pool references undeclared token {:?}", token);
        }
    }
    Ok((token_a, token_b))
}

fn parse_amount(value: &str) -> Result<U256> {
    let value = value.trim();
    match value.strip_prefix("0x") {
        Some(hex) => U256::from_str_radix(hex, 16).with_context(|| format!("Invalid hex amount {:?}", value)),
        None => U256::from_dec_str(value).with_context(|| format!("Invalid amount {:?}", value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const WETH: &str = "0x4200000000000000000000000000000000000006";
    const USDC: &str = "0x833589fcd6edb6e08f4c7c32d4f71b54bda02913";

    fn sample() -> String {
        format!(
            r#"{{
              "tokens": [
                {{ "address": "{WETH}", "decimals": 18, "symbol": "WETH" }},
                {{ "address": "{USDC}", "decimals": 6, "symbol": "USDC" }}
              ],
              "v2_pools": [
                {{ "token_a": "{WETH}", "token_b": "{USDC}", "reserve0": "0x3b9aca00",
                   "reserve1": "500000000000000000000", "stable": false, "fee_bps": 30 }}
              ],
              "v3_pools": [
                {{ "token_a": "{USDC}", "token_b": "{WETH}", "tick_spacing": 100, "current_tick": -200000 }},
                {{ "token_a": "{USDC}", "token_b": "{WETH}", "tick_spacing": 200,
                   "sqrt_price_x96": "79228162514264337593543950336", "exists": false }}
              ]
            }}"#
        )
    }

    #[test]
    fn test_parse_sample() {
        let market = parse_market_snapshot(&sample()).unwrap();
        assert_eq!(market.pool_count(), 3);

        let weth = parse_address(WETH).unwrap();
        let usdc = parse_address(USDC).unwrap();

        let v2 = market.v2_pool(usdc, weth, false).unwrap();
        assert_eq!(v2.reserve0, U256::from(1_000_000_000u64));
        assert_eq!(v2.fee_bps, Some(30));

        let v3 = market.v3_pool(weth, usdc, 100).unwrap();
        assert_eq!(
            v3.sqrt_price_x96,
            U256::from_dec_str("3598751819609688046946419").unwrap()
        );
        assert!(v3.exists);

        let unit = market.v3_pool(weth, usdc, 200).unwrap();
        assert_eq!(unit.current_tick, 0);
        assert!(!unit.exists);
        assert_eq!(market.v3_spacings(weth, usdc), vec![100, 200]);
    }

    #[test]
    fn test_find_token() {
        let market = parse_market_snapshot(&sample()).unwrap();
        assert_eq!(find_token(&market, "weth").unwrap().decimals, 18);
        assert_eq!(find_token(&market, USDC).unwrap().symbol, "USDC");
        assert!(find_token(&market, "DAI").is_err());
    }

    #[test]
    fn test_undeclared_token_rejected() {
        let json = format!(
            r#"{{ "v2_pools": [{{ "token_a": "{WETH}", "token_b": "{USDC}",
                  "reserve0": "1", "reserve1": "1", "stable": true }}] }}"#
        );
        assert!(parse_market_snapshot(&json).is_err());
    }

    #[test]
    fn test_v3_needs_price_or_tick() {
        let json = format!(
            r#"{{
              "tokens": [
                {{ "address": "{WETH}", "decimals": 18 }},
                {{ "address": "{USDC}", "decimals": 6 }}
              ],
              "v3_pools": [{{ "token_a": "{WETH}", "token_b": "{USDC}", "tick_spacing": 100 }}]
            }}"#
        );
        assert!(parse_market_snapshot(&json).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(sample().as_bytes()).unwrap();
        let market = load_market_snapshot(file.path()).unwrap();
        assert_eq!(market.pool_count(), 3);

        assert!(load_market_snapshot(Path::new("/nonexistent/snapshot.json")).is_err());
    }
}
