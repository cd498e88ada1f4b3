//! Market making configuration.
//!
//! Every field has a serde default so a partial TOML file is enough to
//! run. Invariants are enforced by [`MakerConfig::validate`], called once
//! at engine construction; a violation is fatal, never coerced.

use crate::error::{MmError, MmResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Market making configuration for a single symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MakerConfig {
    /// Symbol to quote, e.g. "PERP_ETH_USDC".
    #[serde(default = "default_symbol")]
    pub symbol: String,

    #[serde(default)]
    pub spread: SpreadConfig,

    #[serde(default)]
    pub sizing: SizingConfig,

    #[serde(default)]
    pub skew: SkewConfig,

    #[serde(default)]
    pub volatility: VolatilityConfig,

    #[serde(default)]
    pub risk: RiskConfig,

    #[serde(default)]
    pub execution: ExecutionConfig,

    #[serde(default)]
    pub flags: FlagsConfig,
}

/// Spread parameters in basis points of mid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpreadConfig {
    /// Quoted spread under calm conditions.
    #[serde(default = "default_base_spread_bps")]
    pub base_spread_bps: Decimal,

    /// Hard floor: quotes are never tighter than this.
    #[serde(default = "default_min_spread_bps")]
    pub min_spread_bps: Decimal,

    /// Hard cap after volatility widening.
    #[serde(default = "default_max_spread_bps")]
    pub max_spread_bps: Decimal,
}

/// Order sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizingConfig {
    /// Target notional per order in USD.
    #[serde(default = "default_order_size_usd")]
    pub order_size_usd: Decimal,

    /// Inventory notional at which skew saturates.
    #[serde(default = "default_max_inventory_usd")]
    pub max_inventory_usd: Decimal,

    /// Price levels per side. Only single-level quoting is placed today.
    #[serde(default = "default_levels")]
    pub levels: u32,
}

/// Inventory skew.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkewConfig {
    /// Basis points of skew per 100 USD of inventory.
    /// Long inventory shifts both quotes down to favour selling.
    #[serde(default = "default_skew_bps_per_100_usd")]
    pub bps_per_100_usd: Decimal,
}

/// Volatility tracking and reactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolatilityConfig {
    /// Disable to quote the base spread regardless of volatility.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Mid prices kept in the rolling window.
    #[serde(default = "default_lookback")]
    pub lookback: usize,

    /// Samples required before the range metric is meaningful.
    #[serde(default = "default_min_samples")]
    pub min_samples: usize,

    /// Above this range percentage, the spread is widened.
    #[serde(default = "default_widen_threshold_pct")]
    pub widen_threshold_pct: Decimal,

    /// Above this range percentage, quoting pauses entirely.
    #[serde(default = "default_pause_threshold_pct")]
    pub pause_threshold_pct: Decimal,

    /// Spread multiplier applied when widening.
    #[serde(default = "default_spread_multiplier")]
    pub spread_multiplier: Decimal,
}

/// Risk limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Absolute inventory notional that stops all quoting.
    /// At 80% of this, the accumulating side is suppressed.
    #[serde(default = "default_max_position_usd")]
    pub max_position_usd: Decimal,

    /// Unrealized loss percentage that force-closes the position.
    #[serde(default = "default_stop_loss_pct")]
    pub stop_loss_pct: Decimal,

    /// Unrealized gain percentage that takes profit.
    #[serde(default = "default_take_profit_pct")]
    pub take_profit_pct: Decimal,

    /// Session collateral drawdown (USD) that halts the run.
    #[serde(default = "default_daily_loss_limit_usd")]
    pub daily_loss_limit_usd: Decimal,
}

/// Order entry behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Maker-only orders.
    #[serde(default = "default_true")]
    pub post_only: bool,

    /// Seconds between quoting cycles.
    #[serde(default = "default_requote_interval_secs")]
    pub requote_interval_secs: u64,

    /// Minimum edge per side in basis points; folded into the spread floor.
    #[serde(default = "default_min_edge_bps")]
    pub min_edge_bps: Decimal,

    /// Decimal places prices are rounded to before submission.
    #[serde(default = "default_price_decimals")]
    pub price_decimals: u32,

    /// Minimum order size increment in base units.
    #[serde(default = "default_lot_size")]
    pub lot_size: Decimal,
}

/// Operational flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlagsConfig {
    /// Compute quotes but never place orders.
    #[serde(default = "default_true")]
    pub dry_run: bool,

    /// Log each computed quote.
    #[serde(default = "default_true")]
    pub log_quotes: bool,
}

impl MakerConfig {
    /// Check configuration invariants. Any violation is fatal at startup.
    pub fn validate(&self) -> MmResult<()> {
        if self.symbol.is_empty() {
            return Err(MmError::InvalidConfig("symbol must not be empty".into()));
        }
        let s = &self.spread;
        if s.min_spread_bps > s.base_spread_bps || s.base_spread_bps > s.max_spread_bps {
            return Err(MmError::InvalidConfig(format!(
                "spread ordering violated: min {} <= base {} <= max {} required",
                s.min_spread_bps, s.base_spread_bps, s.max_spread_bps
            )));
        }
        if s.min_spread_bps.is_sign_negative() {
            return Err(MmError::InvalidConfig(
                "min_spread_bps must be non-negative".into(),
            ));
        }
        if self.sizing.order_size_usd <= Decimal::ZERO {
            return Err(MmError::InvalidConfig(
                "order_size_usd must be positive".into(),
            ));
        }
        if self.sizing.max_inventory_usd <= Decimal::ZERO {
            return Err(MmError::InvalidConfig(
                "max_inventory_usd must be positive".into(),
            ));
        }
        if self.sizing.levels == 0 {
            return Err(MmError::InvalidConfig("levels must be at least 1".into()));
        }
        if self.volatility.lookback < 2 {
            return Err(MmError::InvalidConfig(
                "volatility lookback must be at least 2".into(),
            ));
        }
        if self.volatility.min_samples < 2 {
            return Err(MmError::InvalidConfig(
                "volatility min_samples must be at least 2".into(),
            ));
        }
        if self.volatility.spread_multiplier < Decimal::ONE {
            return Err(MmError::InvalidConfig(
                "spread_multiplier must be at least 1".into(),
            ));
        }
        if self.volatility.widen_threshold_pct > self.volatility.pause_threshold_pct {
            return Err(MmError::InvalidConfig(format!(
                "widen_threshold_pct {} exceeds pause_threshold_pct {}",
                self.volatility.widen_threshold_pct, self.volatility.pause_threshold_pct
            )));
        }
        if self.risk.max_position_usd <= Decimal::ZERO {
            return Err(MmError::InvalidConfig(
                "max_position_usd must be positive".into(),
            ));
        }
        if self.risk.daily_loss_limit_usd <= Decimal::ZERO {
            return Err(MmError::InvalidConfig(
                "daily_loss_limit_usd must be positive".into(),
            ));
        }
        if self.execution.requote_interval_secs == 0 {
            return Err(MmError::InvalidConfig(
                "requote_interval_secs must be positive".into(),
            ));
        }
        if self.execution.min_edge_bps * Decimal::TWO > s.max_spread_bps {
            return Err(MmError::InvalidConfig(format!(
                "min_edge_bps {} implies a floor above max_spread_bps {}",
                self.execution.min_edge_bps, s.max_spread_bps
            )));
        }
        if self.execution.lot_size <= Decimal::ZERO {
            return Err(MmError::InvalidConfig("lot_size must be positive".into()));
        }
        if self.execution.price_decimals > 28 {
            return Err(MmError::InvalidConfig(
                "price_decimals exceeds decimal precision".into(),
            ));
        }
        Ok(())
    }
}

impl Default for MakerConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            spread: SpreadConfig::default(),
            sizing: SizingConfig::default(),
            skew: SkewConfig::default(),
            volatility: VolatilityConfig::default(),
            risk: RiskConfig::default(),
            execution: ExecutionConfig::default(),
            flags: FlagsConfig::default(),
        }
    }
}

impl Default for SpreadConfig {
    fn default() -> Self {
        Self {
            base_spread_bps: default_base_spread_bps(),
            min_spread_bps: default_min_spread_bps(),
            max_spread_bps: default_max_spread_bps(),
        }
    }
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            order_size_usd: default_order_size_usd(),
            max_inventory_usd: default_max_inventory_usd(),
            levels: default_levels(),
        }
    }
}

impl Default for SkewConfig {
    fn default() -> Self {
        Self {
            bps_per_100_usd: default_skew_bps_per_100_usd(),
        }
    }
}

impl Default for VolatilityConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            lookback: default_lookback(),
            min_samples: default_min_samples(),
            widen_threshold_pct: default_widen_threshold_pct(),
            pause_threshold_pct: default_pause_threshold_pct(),
            spread_multiplier: default_spread_multiplier(),
        }
    }
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            max_position_usd: default_max_position_usd(),
            stop_loss_pct: default_stop_loss_pct(),
            take_profit_pct: default_take_profit_pct(),
            daily_loss_limit_usd: default_daily_loss_limit_usd(),
        }
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            post_only: true,
            requote_interval_secs: default_requote_interval_secs(),
            min_edge_bps: default_min_edge_bps(),
            price_decimals: default_price_decimals(),
            lot_size: default_lot_size(),
        }
    }
}

impl Default for FlagsConfig {
    fn default() -> Self {
        Self {
            dry_run: true,
            log_quotes: true,
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_symbol() -> String {
    "PERP_ETH_USDC".to_string()
}
fn default_base_spread_bps() -> Decimal {
    Decimal::new(30, 0) // 30 bps
}
fn default_min_spread_bps() -> Decimal {
    Decimal::new(15, 0) // 15 bps
}
fn default_max_spread_bps() -> Decimal {
    Decimal::new(100, 0) // 100 bps
}
fn default_order_size_usd() -> Decimal {
    Decimal::new(50, 0) // $50 per order
}
fn default_max_inventory_usd() -> Decimal {
    Decimal::new(300, 0) // $300 skew saturation
}
fn default_levels() -> u32 {
    1
}
fn default_skew_bps_per_100_usd() -> Decimal {
    Decimal::new(5, 0) // 5 bps per $100 of inventory
}
fn default_lookback() -> usize {
    30 // last 30 mids
}
fn default_min_samples() -> usize {
    2
}
fn default_widen_threshold_pct() -> Decimal {
    Decimal::new(15, 1) // 1.5%
}
fn default_pause_threshold_pct() -> Decimal {
    Decimal::new(5, 0) // 5%
}
fn default_spread_multiplier() -> Decimal {
    Decimal::TWO
}
fn default_max_position_usd() -> Decimal {
    Decimal::new(500, 0) // $500 hard cap
}
fn default_stop_loss_pct() -> Decimal {
    Decimal::new(5, 0) // -5% unrealized
}
fn default_take_profit_pct() -> Decimal {
    Decimal::new(100, 0) // +100% unrealized
}
fn default_daily_loss_limit_usd() -> Decimal {
    Decimal::new(50, 0) // $50 session drawdown
}
fn default_requote_interval_secs() -> u64 {
    30
}
fn default_min_edge_bps() -> Decimal {
    Decimal::new(5, 0) // 5 bps per side
}
fn default_price_decimals() -> u32 {
    5
}
fn default_lot_size() -> Decimal {
    Decimal::ONE
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config() {
        let config = MakerConfig::default();
        assert_eq!(config.symbol, "PERP_ETH_USDC");
        assert_eq!(config.spread.base_spread_bps, dec!(30));
        assert_eq!(config.spread.min_spread_bps, dec!(15));
        assert_eq!(config.spread.max_spread_bps, dec!(100));
        assert_eq!(config.sizing.order_size_usd, dec!(50));
        assert_eq!(config.sizing.max_inventory_usd, dec!(300));
        assert_eq!(config.sizing.levels, 1);
        assert_eq!(config.skew.bps_per_100_usd, dec!(5));
        assert!(config.volatility.enabled);
        assert_eq!(config.volatility.lookback, 30);
        assert_eq!(config.volatility.widen_threshold_pct, dec!(1.5));
        assert_eq!(config.volatility.pause_threshold_pct, dec!(5));
        assert_eq!(config.volatility.spread_multiplier, dec!(2));
        assert_eq!(config.risk.max_position_usd, dec!(500));
        assert_eq!(config.risk.stop_loss_pct, dec!(5));
        assert_eq!(config.risk.take_profit_pct, dec!(100));
        assert_eq!(config.risk.daily_loss_limit_usd, dec!(50));
        assert!(config.execution.post_only);
        assert_eq!(config.execution.requote_interval_secs, 30);
        assert_eq!(config.execution.min_edge_bps, dec!(5));
        assert_eq!(config.execution.price_decimals, 5);
        assert_eq!(config.execution.lot_size, dec!(1));
        assert!(config.flags.dry_run);
        assert!(config.flags.log_quotes);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serde_defaults() {
        let toml_str = r#"
symbol = "PERP_BTC_USDC"

[spread]
base_spread_bps = 40

[flags]
dry_run = false
"#;
        let config: MakerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.symbol, "PERP_BTC_USDC");
        assert_eq!(config.spread.base_spread_bps, dec!(40));
        assert_eq!(config.spread.min_spread_bps, dec!(15));
        assert!(!config.flags.dry_run);
        assert!(config.flags.log_quotes);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_spread_ordering() {
        let mut config = MakerConfig::default();
        config.spread.min_spread_bps = dec!(40);
        assert!(config.validate().is_err());

        let mut config = MakerConfig::default();
        config.spread.base_spread_bps = dec!(200);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_thresholds() {
        let mut config = MakerConfig::default();
        config.volatility.widen_threshold_pct = dec!(10);
        assert!(config.validate().is_err());

        let mut config = MakerConfig::default();
        config.volatility.lookback = 1;
        assert!(config.validate().is_err());

        let mut config = MakerConfig::default();
        config.volatility.spread_multiplier = dec!(0.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_sizes_and_limits() {
        let mut config = MakerConfig::default();
        config.sizing.order_size_usd = dec!(0);
        assert!(config.validate().is_err());

        let mut config = MakerConfig::default();
        config.risk.daily_loss_limit_usd = dec!(-1);
        assert!(config.validate().is_err());

        let mut config = MakerConfig::default();
        config.execution.lot_size = dec!(0);
        assert!(config.validate().is_err());

        let mut config = MakerConfig::default();
        config.execution.min_edge_bps = dec!(60);
        assert!(config.validate().is_err());
    }
}
