//! Precision-safe decimal types for quoting.
//!
//! Uses `rust_decimal` for exact decimal arithmetic; floating point
//! never touches the pricing path.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// Price with exact decimal precision.
///
/// Wraps `Decimal` so prices cannot be mixed with sizes in calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(pub Decimal);

impl Price {
    pub const ZERO: Self = Self(Decimal::ZERO);

    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Round to a fixed number of decimal places.
    ///
    /// Uses banker's rounding, matching `Decimal::round_dp` defaults.
    #[inline]
    pub fn round_dp(&self, decimals: u32) -> Self {
        Self(self.0.round_dp(decimals))
    }

    /// Basis points of `self` relative to a reference price.
    ///
    /// `None` when the reference is zero.
    #[inline]
    pub fn bps_from(&self, reference: Price) -> Option<Decimal> {
        if reference.is_zero() {
            return None;
        }
        Some((self.0 - reference.0) / reference.0 * Decimal::from(10_000))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<Decimal> for Price {
    fn from(d: Decimal) -> Self {
        Self(d)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Price {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

/// Size/quantity with exact decimal precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Size(pub Decimal);

impl Size {
    pub const ZERO: Self = Self(Decimal::ZERO);
    pub const ONE: Self = Self(Decimal::ONE);

    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Round to the nearest whole lot, never below one lot.
    ///
    /// Mirrors the sizing rule `max(1 lot, round(usd / mid))`: a configured
    /// notional below one lot's worth still quotes a single lot.
    #[inline]
    pub fn round_to_lot_min_one(&self, lot_size: Size) -> Self {
        if lot_size.is_zero() {
            return *self;
        }
        let lots = (self.0 / lot_size.0).round();
        let lots = lots.max(Decimal::ONE);
        Self(lots * lot_size.0)
    }

    /// Notional value: size * price.
    #[inline]
    pub fn notional(&self, price: Price) -> Decimal {
        self.0 * price.0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Size {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<Decimal> for Size {
    fn from(d: Decimal) -> Self {
        Self(d)
    }
}

impl Add for Size {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Size {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_bps() {
        let p1 = Price::new(dec!(100));
        let p2 = Price::new(dec!(101));

        let bps = p2.bps_from(p1).unwrap();
        assert_eq!(bps, dec!(100)); // 1% = 100 bps
    }

    #[test]
    fn test_price_bps_zero_reference() {
        let p = Price::new(dec!(100));
        assert!(p.bps_from(Price::ZERO).is_none());
    }

    #[test]
    fn test_price_round_dp() {
        let price = Price::new(dec!(1998.4999995));
        assert_eq!(price.round_dp(5).inner(), dec!(1998.50000));
    }

    #[test]
    fn test_size_round_to_lot_min_one() {
        // 50 USD of a 2000 USD asset rounds to 0 lots, floored to 1
        let size = Size::new(dec!(0.025));
        assert_eq!(size.round_to_lot_min_one(Size::ONE).inner(), dec!(1));

        let size = Size::new(dec!(3.6));
        assert_eq!(size.round_to_lot_min_one(Size::ONE).inner(), dec!(4));
    }

    #[test]
    fn test_notional_calculation() {
        let size = Size::new(dec!(0.5));
        let price = Price::new(dec!(50000));
        assert_eq!(size.notional(price), dec!(25000));
    }
}
