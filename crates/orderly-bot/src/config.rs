//! Application configuration.

use crate::error::{AppError, AppResult};
use orderly_mm::MakerConfig;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level bot configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub maker: MakerConfig,

    /// Simulated venue seed values.
    #[serde(default)]
    pub sim: SimConfig,

    /// Optional run bounds.
    #[serde(default)]
    pub run: RunConfig,
}

/// Seed state for the simulated venue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default = "default_sim_mid")]
    pub mid: Decimal,

    #[serde(default = "default_sim_spread_bps")]
    pub spread_bps: Decimal,

    #[serde(default = "default_sim_collateral")]
    pub collateral: Decimal,
}

/// Bounds for a run; unbounded when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub duration_secs: Option<u64>,

    #[serde(default)]
    pub max_cycles: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            mid: default_sim_mid(),
            spread_bps: default_sim_spread_bps(),
            collateral: default_sim_collateral(),
        }
    }
}

fn default_sim_mid() -> Decimal {
    Decimal::new(2000, 0)
}
fn default_sim_spread_bps() -> Decimal {
    Decimal::new(4, 0)
}
fn default_sim_collateral() -> Decimal {
    Decimal::new(1000, 0)
}

impl AppConfig {
    /// Load from an explicit path, or from `config/default.toml` when it
    /// exists, or fall back to defaults.
    pub fn load(path: Option<&str>) -> AppResult<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => {
                let default_path = "config/default.toml";
                if Path::new(default_path).exists() {
                    Self::from_file(default_path)
                } else {
                    tracing::warn!("no config file found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("failed to read config {path}: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("failed to parse config {path}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.sim.mid, dec!(2000));
        assert_eq!(config.sim.collateral, dec!(1000));
        assert!(config.run.duration_secs.is_none());
        assert!(config.maker.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml_str = r#"
[maker]
symbol = "PERP_BTC_USDC"

[maker.spread]
base_spread_bps = 20

[sim]
mid = 64000

[run]
max_cycles = 10
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.maker.symbol, "PERP_BTC_USDC");
        assert_eq!(config.maker.spread.base_spread_bps, dec!(20));
        assert_eq!(config.sim.mid, dec!(64000));
        assert_eq!(config.run.max_cycles, Some(10));
        assert!(config.maker.validate().is_ok());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = AppConfig::from_file("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
