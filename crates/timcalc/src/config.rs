//! Search configuration
//!
//! `SearchConfig` is immutable once built. Use [`SearchConfig::new`] for the
//! common case (16-bit registers, default tolerances) or
//! [`SearchConfig::builder`] to override individual limits. Both paths run
//! [`SearchConfig::validate`], so a config obtained from them is always
//! searchable. Configs deserialized with serde must be validated explicitly.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::error::{Error, Result};

/// Built-in defaults
pub mod defaults {
    /// Max PSC/ARR value for a 16-bit timer
    pub const MAX_FACTOR: u32 = 65535;
    /// Starting error margin (percent)
    pub const INITIAL_ERROR_PCT: f64 = 0.01;
    /// Error margin added after each pass without a result (percent)
    pub const ERROR_INCREASE_STEP: f64 = 0.002;
    /// Upper bound on relaxation passes
    pub const MAX_PASSES: u32 = 100_000;
}

/// How the prescaler dimension is walked
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ScanMode {
    /// Every prescaler value is considered
    #[default]
    Exhaustive,
    /// Only prescalers that divide the base clock exactly and leave a
    /// reachable reload value are considered
    Prefiltered,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Timer input clock (Hz)
    pub base_clock: u64,
    /// Requested output frequency (Hz)
    pub target_freq: u64,
    #[serde(default = "default_max_factor", alias = "max_factor_a")]
    pub max_prescaler: u32,
    #[serde(default = "default_max_factor", alias = "max_factor_b")]
    pub max_reload: u32,
    #[serde(default = "default_initial_error_pct")]
    pub initial_error_pct: f64,
    #[serde(default = "default_error_increase_step")]
    pub error_increase_step: f64,
    #[serde(default = "default_max_passes")]
    pub max_passes: u32,
    #[serde(default)]
    pub scan_mode: ScanMode,
}

fn default_max_factor() -> u32 {
    defaults::MAX_FACTOR
}

fn default_initial_error_pct() -> f64 {
    defaults::INITIAL_ERROR_PCT
}

fn default_error_increase_step() -> f64 {
    defaults::ERROR_INCREASE_STEP
}

fn default_max_passes() -> u32 {
    defaults::MAX_PASSES
}

impl SearchConfig {
    /// Create a validated config with default limits
    pub fn new(base_clock: u64, target_freq: u64) -> Result<Self> {
        Self::builder(base_clock, target_freq).build()
    }

    /// Create a new configuration builder
    pub fn builder(base_clock: u64, target_freq: u64) -> SearchConfigBuilder {
        SearchConfigBuilder {
            base_clock,
            target_freq,
            ..Default::default()
        }
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<()> {
        if self.base_clock == 0 {
            return Err(Error::invalid("base_clock", "must be greater than zero"));
        }
        if self.target_freq == 0 {
            return Err(Error::invalid("target_freq", "must be greater than zero"));
        }
        if self.target_freq > self.base_clock {
            return Err(Error::invalid(
                "target_freq",
                format!(
                    "({} Hz) exceeds base_clock ({} Hz)",
                    self.target_freq, self.base_clock
                ),
            ));
        }
        if !self.initial_error_pct.is_finite() || self.initial_error_pct < 0.0 {
            return Err(Error::invalid(
                "initial_error_pct",
                format!("must be a non-negative number, got {}", self.initial_error_pct),
            ));
        }
        if !self.error_increase_step.is_finite() || self.error_increase_step <= 0.0 {
            return Err(Error::invalid(
                "error_increase_step",
                format!("must be a positive number, got {}", self.error_increase_step),
            ));
        }
        if self.max_passes == 0 {
            return Err(Error::invalid("max_passes", "must be at least 1"));
        }
        Ok(())
    }

    /// Exact clock-to-target ratio, i.e. the ideal combined divisor
    pub fn ideal_divisor(&self) -> f64 {
        self.base_clock as f64 / self.target_freq as f64
    }
}

/// Builder for SearchConfig
#[derive(Debug, Clone, Default)]
pub struct SearchConfigBuilder {
    base_clock: u64,
    target_freq: u64,
    max_prescaler: Option<u32>,
    max_reload: Option<u32>,
    initial_error_pct: Option<f64>,
    error_increase_step: Option<f64>,
    max_passes: Option<u32>,
    scan_mode: Option<ScanMode>,
}

impl SearchConfigBuilder {
    /// Set the largest prescaler (PSC) register value
    pub fn max_prescaler(mut self, max: u32) -> Self {
        self.max_prescaler = Some(max);
        self
    }

    /// Set the largest reload (ARR) register value
    pub fn max_reload(mut self, max: u32) -> Self {
        self.max_reload = Some(max);
        self
    }

    pub fn initial_error_pct(mut self, pct: f64) -> Self {
        self.initial_error_pct = Some(pct);
        self
    }

    pub fn error_increase_step(mut self, pct: f64) -> Self {
        self.error_increase_step = Some(pct);
        self
    }

    pub fn max_passes(mut self, passes: u32) -> Self {
        self.max_passes = Some(passes);
        self
    }

    pub fn scan_mode(mut self, mode: ScanMode) -> Self {
        self.scan_mode = Some(mode);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<SearchConfig> {
        let config = SearchConfig {
            base_clock: self.base_clock,
            target_freq: self.target_freq,
            max_prescaler: self.max_prescaler.unwrap_or(defaults::MAX_FACTOR),
            max_reload: self.max_reload.unwrap_or(defaults::MAX_FACTOR),
            initial_error_pct: self
                .initial_error_pct
                .unwrap_or(defaults::INITIAL_ERROR_PCT),
            error_increase_step: self
                .error_increase_step
                .unwrap_or(defaults::ERROR_INCREASE_STEP),
            max_passes: self.max_passes.unwrap_or(defaults::MAX_PASSES),
            scan_mode: self.scan_mode.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_defaults() {
        let config = SearchConfig::new(84_000_000, 168).unwrap();
        assert_eq!(config.max_prescaler, 65535);
        assert_eq!(config.max_reload, 65535);
        assert_eq!(config.initial_error_pct, 0.01);
        assert_eq!(config.error_increase_step, 0.002);
        assert_eq!(config.max_passes, defaults::MAX_PASSES);
        assert_eq!(config.scan_mode, ScanMode::Exhaustive);
    }

    #[test]
    fn test_builder_overrides() {
        let config = SearchConfig::builder(1_000_000, 50)
            .max_prescaler(255)
            .max_reload(1023)
            .initial_error_pct(0.5)
            .error_increase_step(0.1)
            .max_passes(10)
            .scan_mode(ScanMode::Prefiltered)
            .build()
            .unwrap();
        assert_eq!(config.max_prescaler, 255);
        assert_eq!(config.max_reload, 1023);
        assert_eq!(config.initial_error_pct, 0.5);
        assert_eq!(config.error_increase_step, 0.1);
        assert_eq!(config.max_passes, 10);
        assert_eq!(config.scan_mode, ScanMode::Prefiltered);
    }

    #[test]
    fn test_zero_target_rejected() {
        let err = SearchConfig::new(84_000_000, 0).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfig {
                field: "target_freq",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_clock_rejected() {
        let err = SearchConfig::new(0, 0).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfig {
                field: "base_clock",
                ..
            }
        ));
    }

    #[test]
    fn test_target_above_clock_rejected() {
        let err = SearchConfig::new(1000, 1001).unwrap_err();
        assert!(err.is_invalid_config());
        // Equal is fine: divisor 1 hits it exactly
        assert!(SearchConfig::new(1000, 1000).is_ok());
    }

    #[test]
    fn test_bad_tolerances_rejected() {
        let step_zero = SearchConfig::builder(1000, 10)
            .error_increase_step(0.0)
            .build();
        assert!(step_zero.unwrap_err().is_invalid_config());

        let step_nan = SearchConfig::builder(1000, 10)
            .error_increase_step(f64::NAN)
            .build();
        assert!(step_nan.unwrap_err().is_invalid_config());

        let negative_error = SearchConfig::builder(1000, 10)
            .initial_error_pct(-0.1)
            .build();
        assert!(negative_error.unwrap_err().is_invalid_config());

        // Zero is a valid starting margin (exact matches only)
        assert!(
            SearchConfig::builder(1000, 10)
                .initial_error_pct(0.0)
                .build()
                .is_ok()
        );
    }

    #[test]
    fn test_zero_passes_rejected() {
        let err = SearchConfig::builder(1000, 10).max_passes(0).build();
        assert!(err.unwrap_err().is_invalid_config());
    }

    #[test]
    fn test_deserialize_with_aliases_and_defaults() {
        let json = r#"{
            "base_clock": 72000000,
            "target_freq": 1000,
            "max_factor_a": 255,
            "scan_mode": "prefiltered"
        }"#;
        let config: SearchConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.max_prescaler, 255);
        assert_eq!(config.max_reload, 65535);
        assert_eq!(config.initial_error_pct, 0.01);
        assert_eq!(config.scan_mode, ScanMode::Prefiltered);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_scan_mode_strings() {
        assert_eq!(ScanMode::Exhaustive.to_string(), "exhaustive");
        let name: &'static str = ScanMode::Prefiltered.into();
        assert_eq!(name, "prefiltered");
        assert_eq!(
            "prefiltered".parse::<ScanMode>().unwrap(),
            ScanMode::Prefiltered
        );
    }

    #[test]
    fn test_ideal_divisor() {
        let config = SearchConfig::new(84_000_000, 168).unwrap();
        assert_eq!(config.ideal_divisor(), 500_000.0);
    }
}
