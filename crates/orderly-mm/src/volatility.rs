//! Rolling-window volatility tracking.
//!
//! Deliberately crude: the metric is the high/low range of the last K
//! mids as a percentage of the most recent one. It reacts to any large
//! move inside the window and needs no tick-level data.

use rust_decimal::Decimal;
use std::collections::VecDeque;

/// Bounded window of recent mid prices with a range-based metric.
#[derive(Debug, Clone)]
pub struct VolatilityTracker {
    window: VecDeque<Decimal>,
    capacity: usize,
    min_samples: usize,
}

impl VolatilityTracker {
    pub fn new(capacity: usize, min_samples: usize) -> Self {
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            min_samples: min_samples.max(2),
        }
    }

    /// Record a mid price, evicting the oldest once full.
    pub fn observe(&mut self, mid: Decimal) {
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(mid);
    }

    /// (max - min) / most_recent * 100 over the window.
    ///
    /// Zero until `min_samples` mids have been observed, and zero if the
    /// most recent mid is zero.
    pub fn volatility_pct(&self) -> Decimal {
        if self.window.len() < self.min_samples {
            return Decimal::ZERO;
        }
        // window is non-empty here, min_samples >= 2
        let mut max = self.window[0];
        let mut min = self.window[0];
        for &mid in self.window.iter().skip(1) {
            if mid > max {
                max = mid;
            }
            if mid < min {
                min = mid;
            }
        }
        let last = self.window[self.window.len() - 1];
        if last.is_zero() {
            return Decimal::ZERO;
        }
        (max - min) / last * Decimal::from(100)
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn tracker_with(mids: &[Decimal]) -> VolatilityTracker {
        let mut t = VolatilityTracker::new(30, 2);
        for &m in mids {
            t.observe(m);
        }
        t
    }

    #[test]
    fn test_zero_below_min_samples() {
        let t = tracker_with(&[]);
        assert_eq!(t.volatility_pct(), dec!(0));

        let t = tracker_with(&[dec!(100)]);
        assert_eq!(t.volatility_pct(), dec!(0));
    }

    #[test]
    fn test_range_metric() {
        // (102 - 98) / 98 * 100 = 4.0816...
        let t = tracker_with(&[dec!(100), dec!(101), dec!(99), dec!(102), dec!(98)]);
        let vol = t.volatility_pct();
        assert!(vol > dec!(4.08) && vol < dec!(4.09), "vol = {vol}");
    }

    #[test]
    fn test_flat_window_is_zero() {
        let t = tracker_with(&[dec!(100), dec!(100), dec!(100)]);
        assert_eq!(t.volatility_pct(), dec!(0));
    }

    #[test]
    fn test_eviction_at_capacity() {
        let mut t = VolatilityTracker::new(3, 2);
        for m in [dec!(50), dec!(100), dec!(101), dec!(102)] {
            t.observe(m);
        }
        assert_eq!(t.len(), 3);
        // The 50 print fell out of the window; range is 100..102.
        let vol = t.volatility_pct();
        assert!(vol < dec!(2), "vol = {vol}");
    }

    #[test]
    fn test_zero_last_mid() {
        let t = tracker_with(&[dec!(100), dec!(0)]);
        assert_eq!(t.volatility_pct(), dec!(0));
    }
}
