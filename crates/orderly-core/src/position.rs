//! Position and inventory types.

use crate::decimal::{Price, Size};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of an open position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PositionSide {
    Long,
    Short,
}

impl PositionSide {
    /// Returns 1 for long, -1 for short.
    pub fn sign(&self) -> i8 {
        match self {
            Self::Long => 1,
            Self::Short => -1,
        }
    }
}

impl fmt::Display for PositionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Long => write!(f, "LONG"),
            Self::Short => write!(f, "SHORT"),
        }
    }
}

/// An open position as reported by the venue.
///
/// `size` is always non-negative; direction lives in `side`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub side: PositionSide,
    pub size: Size,
    pub entry_price: Price,
    pub mark_price: Price,
    pub unrealized_pnl: Decimal,
}

impl Position {
    /// Unrealized PnL as a percentage of entry notional.
    ///
    /// Zero when entry notional is zero (flat or still filling), so the
    /// percentage thresholds downstream never divide by zero.
    pub fn pnl_percent(&self) -> Decimal {
        let entry_notional = self.size.notional(self.entry_price);
        if entry_notional.is_zero() {
            return Decimal::ZERO;
        }
        self.unrealized_pnl / entry_notional * Decimal::from(100)
    }

    /// Signed notional in USD at the given mid: positive long, negative short.
    pub fn signed_notional(&self, mid: Price) -> Decimal {
        self.size.notional(mid) * Decimal::from(self.side.sign())
    }

    /// True when there is nothing to close.
    pub fn is_flat(&self) -> bool {
        self.size.is_zero()
    }
}
