//! A single (prescaler, reload) trial and the frequency it produces

use crate::config::SearchConfig;
use crate::error::{Error, Result};

/// One evaluated prescaler/reload pair.
///
/// The timer output is `base_clock / ((prescaler + 1) * (reload + 1))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// PSC register value
    pub prescaler: u32,
    /// ARR register value
    pub reload: u32,
    /// `(prescaler + 1) * (reload + 1)`, always >= 1
    pub divisor: u128,
    /// Output frequency in Hz
    pub achieved_freq: f64,
    /// `|1 - target / achieved| * 100`
    pub percent_error: f64,
    /// `|target - achieved|` in Hz
    pub abs_delta: f64,
}

impl Candidate {
    pub fn evaluate(config: &SearchConfig, prescaler: u32, reload: u32) -> Self {
        // (u32::MAX + 1)^2 does not fit in u64
        let divisor = (prescaler as u128 + 1) * (reload as u128 + 1);
        let target = config.target_freq as f64;
        let achieved_freq = config.base_clock as f64 / divisor as f64;
        Self {
            prescaler,
            reload,
            divisor,
            achieved_freq,
            percent_error: (1.0 - target / achieved_freq).abs() * 100.0,
            abs_delta: (target - achieved_freq).abs(),
        }
    }

    /// `target - achieved` (positive when the timer runs slow)
    pub fn signed_delta(&self, target_freq: u64) -> f64 {
        target_freq as f64 - self.achieved_freq
    }

    /// Compare (CCR) value giving `duty_pct` percent high time.
    pub fn compare_value(&self, duty_pct: f64) -> Result<u64> {
        validate_duty(duty_pct)?;
        let period = self.reload as u64 + 1;
        let ccr = (period as f64 * duty_pct / 100.0).round() as u64;
        Ok(ccr.min(period))
    }
}

/// Check a duty cycle percentage before any search runs
pub fn validate_duty(duty_pct: f64) -> Result<()> {
    if !(0.0..=100.0).contains(&duty_pct) {
        return Err(Error::invalid(
            "duty",
            format!("must be between 0 and 100, got {}", duty_pct),
        ));
    }
    Ok(())
}
