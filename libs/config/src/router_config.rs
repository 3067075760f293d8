//! Router Configuration Module
//!
//! Loads [`RouterConfig`] from an optional TOML file, then applies `EDDY_`-prefixed
//! environment variable overrides. Every field has a production default, so an empty
//! file (or no file at all) yields a usable configuration.
//!
//! Environment keys use a single `_` after the prefix and the field name verbatim:
//! `EDDY_DEBOUNCE_MS=150`, `EDDY_TICK_SPACINGS=1,100,200`.

use crate::defaults;
use anyhow::{Context, Result};
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};
use types::{parse_address, H160};

/// Largest tick spacing a concentrated-liquidity factory accepts
const MAX_TICK_SPACING: i32 = 16_383;

/// How the V3-direct source produces its quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum V3QuoteMode {
    /// Exact output from the on-chain quoter contract
    #[default]
    Simulation,
    /// Zero-slippage estimate from the snapshot's sqrt price
    Spot,
}

/// Complete router configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Slippage tolerance in basis points when the request carries none (50 = 0.5%)
    pub default_slippage_bps: u16,
    /// Input debounce before a quote session re-aggregates
    pub debounce_ms: u64,
    /// Concentrated-liquidity fee tiers to probe, by tick spacing
    pub tick_spacings: Vec<i32>,
    /// Candidate intermediate tokens for two-hop routes
    pub intermediate_tokens: Vec<String>,
    /// Wrapped native token used in place of the chain's native currency
    pub wrapped_native: String,
    pub v2_volatile_fee_bps: u16,
    pub v2_stable_fee_bps: u16,
    /// Quoter contract for `quoteExactInputSingle`
    pub quoter_address: Option<String>,
    /// Concentrated-liquidity factory for `getPool`
    pub factory_address: Option<String>,
    pub v3_quote_mode: V3QuoteMode,
    /// JSON-RPC endpoint; without one, V3 quotes fall back to the spot estimate
    pub rpc_url: Option<String>,
    pub call_timeout_ms: u64,
    pub log_level: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            default_slippage_bps: defaults::DEFAULT_SLIPPAGE_BPS,
            debounce_ms: defaults::DEBOUNCE_MS,
            tick_spacings: defaults::TICK_SPACINGS.to_vec(),
            intermediate_tokens: Vec::new(),
            wrapped_native: defaults::WRAPPED_NATIVE.to_string(),
            v2_volatile_fee_bps: defaults::V2_VOLATILE_FEE_BPS,
            v2_stable_fee_bps: defaults::V2_STABLE_FEE_BPS,
            quoter_address: None,
            factory_address: None,
            v3_quote_mode: V3QuoteMode::Simulation,
            rpc_url: None,
            call_timeout_ms: defaults::CALL_TIMEOUT_MS,
            log_level: defaults::LOG_LEVEL.to_string(),
        }
    }
}

impl RouterConfig {
    /// Load from an optional TOML file with process-environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Load with an explicit environment map instead of the process environment
    pub fn load_with_env(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            info!("Loading router config: {:?}", path);
            builder = builder.add_source(File::from(path).required(true));
        } else {
            debug!("No config file given, using defaults");
        }

        // Override with environment variables (EDDY_ prefix)
        builder = builder.add_source(
            Environment::with_prefix(defaults::ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("tick_spacings")
                .with_list_parse_key("intermediate_tokens")
                .try_parsing(true)
                .source(env),
        );

        let config = builder
            .build()
            .context("Failed to build configuration")?;

        let config: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write configuration to {:?}", path))?;
        Ok(())
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.default_slippage_bps >= 10_000 {
            anyhow::bail!("default_slippage_bps must be < 10000 (100%)");
        }

        if self.tick_spacings.is_empty() {
            anyhow::bail!("tick_spacings must not be empty");
        }
        let mut seen = HashSet::new();
        for &spacing in &self.tick_spacings {
            if spacing <= 0 || spacing > MAX_TICK_SPACING {
                anyhow::bail!("tick spacing {} outside 1..={}", spacing, MAX_TICK_SPACING);
            }
            if !seen.insert(spacing) {
                anyhow::bail!("duplicate tick spacing {}", spacing);
            }
        }

        if self.v2_volatile_fee_bps >= 10_000 || self.v2_stable_fee_bps >= 10_000 {
            anyhow::bail!("V2 pool fees must be < 10000 bps");
        }

        if self.call_timeout_ms == 0 {
            anyhow::bail!("call_timeout_ms must be positive");
        }

        if self.log_level.trim().is_empty() {
            anyhow::bail!("log_level must not be empty");
        }

        self.wrapped_native_address()?;
        self.intermediate_addresses()?;
        self.quoter()?;
        self.factory()?;

        if self.v3_quote_mode == V3QuoteMode::Simulation
            && self.rpc_url.is_some()
            && self.quoter_address.is_none()
        {
            anyhow::bail!("simulation mode with an rpc_url requires quoter_address");
        }

        Ok(())
    }

    pub fn wrapped_native_address(&self) -> Result<H160> {
        parse_address(&self.wrapped_native).context("Invalid wrapped_native address")
    }

    pub fn intermediate_addresses(&self) -> Result<Vec<H160>> {
        self.intermediate_tokens
            .iter()
            .map(|token| {
                parse_address(token)
                    .with_context(|| format!("Invalid intermediate token {:?}", token))
            })
            .collect()
    }

    pub fn quoter(&self) -> Result<Option<H160>> {
        self.quoter_address
            .as_deref()
            .map(parse_address)
            .transpose()
            .context("Invalid quoter_address")
    }

    pub fn factory(&self) -> Result<Option<H160>> {
        self.factory_address
            .as_deref()
            .map(parse_address)
            .transpose()
            .context("Invalid factory_address")
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }
}

/// Convenience function to load configuration from an optional file path
pub fn load_config(path: Option<&Path>) -> Result<RouterConfig> {
    RouterConfig::load(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_default_config_validation() {
        let config = RouterConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert_eq!(config.v2_volatile_fee_bps, 30);
        assert_eq!(config.v2_stable_fee_bps, 5);
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = RouterConfig::load_with_env(None, env(&[])).unwrap();
        assert_eq!(config, RouterConfig::default());
    }

    #[test]
    fn test_load_toml_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("router.toml");

        let config_content = r#"
default_slippage_bps = 100
tick_spacings = [1, 100]
intermediate_tokens = ["0x4200000000000000000000000000000000000006"]
v3_quote_mode = "spot"
log_level = "debug"
"#;
        fs::write(&config_path, config_content).unwrap();

        let config = RouterConfig::load_with_env(Some(&config_path), env(&[])).unwrap();
        assert_eq!(config.default_slippage_bps, 100);
        assert_eq!(config.tick_spacings, vec![1, 100]);
        assert_eq!(config.v3_quote_mode, V3QuoteMode::Spot);
        assert_eq!(config.log_level, "debug");
        assert_eq!(
            config.intermediate_addresses().unwrap(),
            vec![config.wrapped_native_address().unwrap()]
        );
        // Untouched fields keep defaults
        assert_eq!(config.debounce_ms, 300);
    }

    #[test]
    fn test_environment_override() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("router.toml");
        fs::write(&config_path, "debounce_ms = 500\n").unwrap();

        let config = RouterConfig::load_with_env(
            Some(&config_path),
            env(&[
                ("EDDY_DEBOUNCE_MS", "150"),
                ("EDDY_TICK_SPACINGS", "50,200"),
                ("EDDY_V3_QUOTE_MODE", "spot"),
            ]),
        )
        .unwrap();

        assert_eq!(config.debounce_ms, 150);
        assert_eq!(config.tick_spacings, vec![50, 200]);
        assert_eq!(config.v3_quote_mode, V3QuoteMode::Spot);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(RouterConfig::load_with_env(Some(&missing), env(&[])).is_err());
    }

    #[test]
    fn test_validation_failures() {
        let mut config = RouterConfig::default();
        config.default_slippage_bps = 10_000;
        assert!(config.validate().is_err());

        let mut config = RouterConfig::default();
        config.tick_spacings = vec![];
        assert!(config.validate().is_err());

        let mut config = RouterConfig::default();
        config.tick_spacings = vec![100, 0];
        assert!(config.validate().is_err());

        let mut config = RouterConfig::default();
        config.tick_spacings = vec![100, 100];
        assert!(config.validate().is_err());

        let mut config = RouterConfig::default();
        config.intermediate_tokens = vec!["0x1234".to_string()];
        assert!(config.validate().is_err());

        let mut config = RouterConfig::default();
        config.rpc_url = Some("http://localhost:8545".to_string());
        assert!(config.validate().is_err());
        config.quoter_address = Some("0x254cF9E1E6e233aa1AC962CB9B05b2cfeAaE15b0".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("saved.toml");

        let mut config = RouterConfig::default();
        config.quoter_address = Some("0x254cF9E1E6e233aa1AC962CB9B05b2cfeAaE15b0".to_string());
        config.save_to_file(&path).unwrap();

        let reloaded = RouterConfig::load_with_env(Some(&path), env(&[])).unwrap();
        assert_eq!(reloaded, config);
    }
}
