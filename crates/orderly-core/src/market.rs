//! Market data snapshot types.

use crate::decimal::Price;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Point-in-time view of the market: mid price and observed spread.
///
/// Fetched fresh every cycle and never cached across cycles. A snapshot
/// with a non-positive mid is unusable and the cycle that fetched it
/// must be aborted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MidSpread {
    /// Midpoint between best bid and best ask.
    pub mid: Price,
    /// Observed bid/ask spread in basis points.
    pub spread_bps: Decimal,
}

impl MidSpread {
    pub fn new(mid: Price, spread_bps: Decimal) -> Self {
        Self { mid, spread_bps }
    }

    /// A snapshot is usable only with a strictly positive mid.
    pub fn is_usable(&self) -> bool {
        self.mid.is_positive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_usable_requires_positive_mid() {
        let good = MidSpread::new(Price::new(dec!(2000)), dec!(4.2));
        assert!(good.is_usable());

        let zero = MidSpread::new(Price::ZERO, dec!(4.2));
        assert!(!zero.is_usable());

        let negative = MidSpread::new(Price::new(dec!(-1)), dec!(4.2));
        assert!(!negative.is_usable());
    }
}
