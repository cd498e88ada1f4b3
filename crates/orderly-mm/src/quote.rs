//! Pure quote calculation.
//!
//! `compute` maps (mid, inventory, volatility) to a two-sided quote with
//! no side effects; the same inputs always give the same quote. The
//! caller guarantees a positive mid.

use crate::config::MakerConfig;
use orderly_core::{Price, Size};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const BPS: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// A two-sided quote, recomputed from scratch every cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub bid: Price,
    pub ask: Price,
    pub size: Size,
    /// Realized spread after rounding, in basis points of mid.
    pub spread_bps: Decimal,
    /// Inventory skew applied, in basis points.
    pub skew_bps: Decimal,
}

/// Compute the quote for one cycle.
///
/// Spread selection: base, widened by `spread_multiplier` when volatility
/// exceeds the widen threshold, capped at max, then floored at
/// max(min_spread, 2 * min_edge). The floor is applied last so it always
/// wins. Positive inventory shifts both prices down; skew saturates at
/// `max_inventory_usd`.
pub fn compute(
    mid: Price,
    inventory_usd: Decimal,
    volatility_pct: Decimal,
    config: &MakerConfig,
) -> Quote {
    let mid_px = mid.inner();

    let mut effective_bps = config.spread.base_spread_bps;
    if config.volatility.enabled && volatility_pct > config.volatility.widen_threshold_pct {
        effective_bps *= config.volatility.spread_multiplier;
    }
    effective_bps = effective_bps.min(config.spread.max_spread_bps);
    let floor_bps = config
        .spread
        .min_spread_bps
        .max(config.execution.min_edge_bps * Decimal::TWO);
    effective_bps = effective_bps.max(floor_bps);

    let capped_inventory = inventory_usd
        .max(-config.sizing.max_inventory_usd)
        .min(config.sizing.max_inventory_usd);
    let skew_bps = capped_inventory / Decimal::ONE_HUNDRED * config.skew.bps_per_100_usd;

    let half_spread = effective_bps / BPS * mid_px / Decimal::TWO;
    let skew_amount = skew_bps / BPS * mid_px;

    let mut bid = mid_px - half_spread - skew_amount;
    let mut ask = mid_px + half_spread - skew_amount;

    // Guard: never quote tighter than the configured floor.
    let min_width = config.spread.min_spread_bps / BPS * mid_px;
    let width = ask - bid;
    if width < min_width {
        let pad = (min_width - width) / Decimal::TWO;
        bid -= pad;
        ask += pad;
    }

    let decimals = config.execution.price_decimals;
    let bid = Price::new(bid).round_dp(decimals);
    let ask = Price::new(ask).round_dp(decimals);

    let size = Size::new(config.sizing.order_size_usd / mid_px)
        .round_to_lot_min_one(Size::new(config.execution.lot_size));

    let spread_bps = (ask.inner() - bid.inner()) / mid_px * BPS;

    Quote {
        bid,
        ask,
        size,
        spread_bps,
        skew_bps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn config() -> MakerConfig {
        MakerConfig::default()
    }

    #[test]
    fn test_symmetric_at_zero_inventory() {
        // 30 bps of 2000 = 6.00 total width, centred on mid
        let q = compute(Price::new(dec!(2000)), dec!(0), dec!(0), &config());
        assert_eq!(q.bid.inner(), dec!(1997.00000));
        assert_eq!(q.ask.inner(), dec!(2003.00000));
        assert_eq!(q.skew_bps, dec!(0));
        assert_eq!(q.spread_bps, dec!(30));
        // $50 of a $2000 asset rounds to zero lots, floored to one
        assert_eq!(q.size.inner(), dec!(1));
    }

    #[test]
    fn test_long_inventory_shifts_down() {
        // 100 USD long -> 5 bps skew -> 1.00 shift on a 2000 mid
        let q = compute(Price::new(dec!(2000)), dec!(100), dec!(0), &config());
        assert_eq!(q.skew_bps, dec!(5));
        assert_eq!(q.bid.inner(), dec!(1996.00000));
        assert_eq!(q.ask.inner(), dec!(2002.00000));
        // width unchanged by skew
        assert_eq!(q.spread_bps, dec!(30));
    }

    #[test]
    fn test_short_inventory_shifts_up() {
        let q = compute(Price::new(dec!(2000)), dec!(-100), dec!(0), &config());
        assert_eq!(q.skew_bps, dec!(-5));
        assert_eq!(q.bid.inner(), dec!(1998.00000));
        assert_eq!(q.ask.inner(), dec!(2004.00000));
    }

    #[test]
    fn test_skew_saturates_at_max_inventory() {
        let cfg = config();
        let at_cap = compute(Price::new(dec!(2000)), dec!(300), dec!(0), &cfg);
        let beyond = compute(Price::new(dec!(2000)), dec!(450), dec!(0), &cfg);
        assert_eq!(at_cap.skew_bps, beyond.skew_bps);
        assert_eq!(at_cap.bid, beyond.bid);
    }

    #[test]
    fn test_volatility_widens_spread() {
        // 2% volatility > 1.5% widen threshold -> 30 bps doubled to 60
        let q = compute(Price::new(dec!(2000)), dec!(0), dec!(2), &config());
        assert_eq!(q.spread_bps, dec!(60));
    }

    #[test]
    fn test_widened_spread_capped_at_max() {
        let mut cfg = config();
        cfg.spread.base_spread_bps = dec!(80);
        // 80 * 2 = 160, capped at 100
        let q = compute(Price::new(dec!(2000)), dec!(0), dec!(2), &cfg);
        assert_eq!(q.spread_bps, dec!(100));
    }

    #[test]
    fn test_widening_disabled() {
        let mut cfg = config();
        cfg.volatility.enabled = false;
        let q = compute(Price::new(dec!(2000)), dec!(0), dec!(2), &cfg);
        assert_eq!(q.spread_bps, dec!(30));
    }

    #[test]
    fn test_min_edge_raises_floor() {
        let mut cfg = config();
        cfg.spread.base_spread_bps = dec!(15);
        cfg.spread.min_spread_bps = dec!(10);
        cfg.execution.min_edge_bps = dec!(10);
        // floor = max(10, 2 * 10) = 20 > base 15
        let q = compute(Price::new(dec!(2000)), dec!(0), dec!(0), &cfg);
        assert_eq!(q.spread_bps, dec!(20));
    }

    #[test]
    fn test_ask_never_below_bid() {
        let cfg = config();
        for inv in [dec!(-450), dec!(-100), dec!(0), dec!(100), dec!(450)] {
            for vol in [dec!(0), dec!(1), dec!(3), dec!(10)] {
                let q = compute(Price::new(dec!(1234.56789)), inv, vol, &cfg);
                assert!(q.ask >= q.bid, "inverted quote at inv={inv} vol={vol}");
                assert!(
                    q.spread_bps >= cfg.spread.min_spread_bps - dec!(0.01),
                    "spread {} below floor at inv={inv} vol={vol}",
                    q.spread_bps
                );
            }
        }
    }

    #[test]
    fn test_size_rounds_to_nearest_lot() {
        let mut cfg = config();
        cfg.sizing.order_size_usd = dec!(700);
        // 700 / 2 = 350 units
        let q = compute(Price::new(dec!(2)), dec!(0), dec!(0), &cfg);
        assert_eq!(q.size.inner(), dec!(350));
    }

    #[test]
    fn test_deterministic() {
        let cfg = config();
        let a = compute(Price::new(dec!(2000.12345)), dec!(42), dec!(1.7), &cfg);
        let b = compute(Price::new(dec!(2000.12345)), dec!(42), dec!(1.7), &cfg);
        assert_eq!(a, b);
    }
}
