//! Shared search arguments and config layering.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use timcalc::{ScanMode, SearchConfig};

use crate::settings::FileConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    /// Relaxation notices go to stderr so stdout stays parseable
    pub fn notices_on_stderr(&self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct SearchArgs {
    /// Timer input clock in Hz
    #[arg(long, env = "TIMCALC_CLOCK")]
    pub clock: Option<u64>,

    /// Target output frequency in Hz
    #[arg(long, env = "TIMCALC_TARGET")]
    pub target: Option<u64>,

    /// Largest prescaler (PSC) value [default: 65535]
    #[arg(long)]
    pub max_prescaler: Option<u32>,

    /// Largest reload (ARR) value [default: 65535]
    #[arg(long)]
    pub max_reload: Option<u32>,

    /// Initial error margin in percent [default: 0.01]
    #[arg(long = "error")]
    pub initial_error: Option<f64>,

    /// Error margin increase per empty pass, in percent [default: 0.002]
    #[arg(long)]
    pub step: Option<f64>,

    /// Give up after this many passes [default: 100000]
    #[arg(long)]
    pub max_passes: Option<u32>,

    /// Only try prescalers that divide the clock exactly
    #[arg(long)]
    pub prefilter: bool,

    /// TOML file with search settings (command-line values take precedence)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl SearchArgs {
    pub fn load_file(&self) -> Result<FileConfig> {
        match &self.config {
            Some(path) => FileConfig::load(path),
            None => Ok(FileConfig::default()),
        }
    }

    /// Merge command line over `file` over built-in defaults.
    pub fn resolve(&self, file: &FileConfig) -> Result<SearchConfig> {
        let base_clock = self
            .clock
            .or(file.base_clock)
            .context("No base clock given (use --clock or base_clock in the config file)")?;
        let target_freq = self
            .target
            .or(file.target_freq)
            .context("No target frequency given (use --target or target_freq in the config file)")?;

        let mut builder = SearchConfig::builder(base_clock, target_freq);
        if let Some(max) = self.max_prescaler.or(file.max_prescaler) {
            builder = builder.max_prescaler(max);
        }
        if let Some(max) = self.max_reload.or(file.max_reload) {
            builder = builder.max_reload(max);
        }
        if let Some(pct) = self.initial_error.or(file.initial_error_pct) {
            builder = builder.initial_error_pct(pct);
        }
        if let Some(pct) = self.step.or(file.error_increase_step) {
            builder = builder.error_increase_step(pct);
        }
        if let Some(passes) = self.max_passes.or(file.max_passes) {
            builder = builder.max_passes(passes);
        }
        let scan_mode = if self.prefilter {
            ScanMode::Prefiltered
        } else {
            file.scan_mode.unwrap_or_default()
        };

        Ok(builder.scan_mode(scan_mode).build()?)
    }
}
