//! Per-pass limits on the parameter space
//!
//! A candidate is eligible when `|1 - d / ideal| * 100 <= tolerance`, where
//! `d` is its divisor and `ideal = base_clock / target_freq`. That confines
//! `d` to `[ideal * (1 - tol/100), ideal * (1 + tol/100)]`, which in turn
//! confines the reload values worth testing for a given prescaler. The
//! windows below are widened by one register step on each side so float
//! rounding can never push an eligible reload outside them; the exact
//! eligibility test is still applied to every value inside.

use std::ops::RangeInclusive;

use crate::config::SearchConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DivisorBounds {
    lo: f64,
    hi: f64,
}

impl DivisorBounds {
    pub fn new(config: &SearchConfig, tolerance: f64) -> Self {
        let ideal = config.ideal_divisor();
        let ratio = tolerance / 100.0;
        Self {
            lo: ideal * (1.0 - ratio),
            hi: ideal * (1.0 + ratio),
        }
    }

    /// True once `prescaler + 1` alone is above every eligible divisor.
    /// Holds for all larger prescalers too.
    pub fn exceeded_by(&self, prescaler: u32) -> bool {
        prescaler as f64 + 1.0 > self.hi + 1.0
    }

    /// Reload values that may hold an eligible candidate for `prescaler`
    pub fn reload_window(&self, prescaler: u32, max_reload: u32) -> Option<RangeInclusive<u32>> {
        let p = prescaler as f64 + 1.0;
        let lo = (self.lo / p).floor() - 2.0;
        let hi = (self.hi / p).ceil();
        if hi < 0.0 || lo > max_reload as f64 {
            return None;
        }
        let start = lo.max(0.0) as u32;
        let end = hi.min(max_reload as f64) as u32;
        (start <= end).then_some(start..=end)
    }
}

/// Exact-divisibility prefilter on the prescaler.
///
/// Accepts `prescaler` only when `prescaler + 1` divides the base clock and
/// the reload needed to hit the target from there, `base / (target * (psc + 1)) - 1`,
/// fits the reload register. This can discard the true optimum.
pub(crate) fn prefilter_accepts(config: &SearchConfig, prescaler: u32) -> bool {
    let p = prescaler as u64 + 1;
    if config.base_clock % p != 0 {
        return false;
    }
    let x = config.base_clock as f64 / (config.target_freq as f64 * p as f64) - 1.0;
    x <= config.max_reload as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_clock: u64, target_freq: u64) -> SearchConfig {
        SearchConfig::new(base_clock, target_freq).unwrap()
    }

    #[test]
    fn test_window_contains_exact_reload() {
        let cfg = config(84_000_000, 168);
        let bounds = DivisorBounds::new(&cfg, 0.0);
        // 8 * 62_500 = 500_000
        let window = bounds.reload_window(7, 65535).unwrap();
        assert!(window.contains(&62_499));
        assert!(window.end() - window.start() <= 4);
    }

    #[test]
    fn test_window_clamped_to_register() {
        let cfg = config(84_000_000, 168);
        let bounds = DivisorBounds::new(&cfg, 0.01);
        // psc 0 would need ARR ~ 500_000
        assert_eq!(bounds.reload_window(0, 65535), None);
        let window = bounds.reload_window(9, 65535).unwrap();
        assert!(window.contains(&49_999));
    }

    #[test]
    fn test_window_large_tolerance_starts_at_zero() {
        let cfg = config(1000, 10);
        let bounds = DivisorBounds::new(&cfg, 150.0);
        assert_eq!(bounds.reload_window(0, 99), Some(0..=99));
    }

    #[test]
    fn test_exceeded_by() {
        let cfg = config(1000, 10);
        let bounds = DivisorBounds::new(&cfg, 1.0);
        // Eligible divisors lie in [99, 101]
        assert!(!bounds.exceeded_by(100));
        assert!(!bounds.exceeded_by(101));
        assert!(bounds.exceeded_by(102));
    }

    #[test]
    fn test_prefilter() {
        let cfg = SearchConfig::builder(1000, 7)
            .max_prescaler(99)
            .max_reload(99)
            .build()
            .unwrap();
        // 1000 / 7 - 1 > 99
        assert!(!prefilter_accepts(&cfg, 0));
        assert!(prefilter_accepts(&cfg, 1));
        // 3 does not divide 1000
        assert!(!prefilter_accepts(&cfg, 2));
        assert!(prefilter_accepts(&cfg, 9));
    }
}
