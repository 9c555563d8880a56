//! Divider search engine
//!
//! # Search Strategy
//!
//! Each pass walks prescaler values in ascending order and, for each one,
//! the reload values in ascending order. A candidate is eligible when its
//! percent error is within the pass tolerance; the eligible candidate with
//! the smallest absolute frequency delta wins, and the first one found wins
//! ties. If a pass finds nothing, the tolerance grows by
//! `error_increase_step` and the pass is repeated, up to `max_passes`.
//!
//! Reload values that cannot be eligible at the current tolerance are not
//! evaluated (see [`bounds`]); the winner is the same as with a plain
//! `0..=max` double loop.

mod bounds;
mod observer;

use tracing::{debug, info};

use crate::candidate::Candidate;
use crate::config::{ScanMode, SearchConfig};
use crate::error::{Error, Result};

use bounds::{DivisorBounds, prefilter_accepts};
pub use observer::{NoopObserver, PassObserver};
#[cfg(test)]
pub(crate) use observer::RecordingObserver;

/// Winning candidate and how it was reached
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub candidate: Candidate,
    /// Tolerance (percent) of the pass that produced the candidate
    pub tolerance: f64,
    /// Number of passes run, 1 when the initial tolerance was enough
    pub passes: u32,
}

impl SearchResult {
    /// Number of times the tolerance had to be relaxed
    pub fn relaxations(&self) -> u32 {
        self.passes - 1
    }
}

pub struct DividerSearch<'a> {
    config: &'a SearchConfig,
}

impl<'a> DividerSearch<'a> {
    /// Validate `config` and prepare a search over it
    pub fn new(config: &'a SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn run(&self) -> Result<SearchResult> {
        self.run_with(&mut NoopObserver)
    }

    /// Run passes with growing tolerance until one yields a candidate.
    ///
    /// Returns [`Error::PassLimitReached`] after `max_passes` empty passes.
    pub fn run_with<O: PassObserver>(&self, observer: &mut O) -> Result<SearchResult> {
        let config = self.config;
        let mut tolerance = config.initial_error_pct;
        let mut passes = 0u32;

        debug!(
            "Searching {} Hz -> {} Hz (psc <= {}, arr <= {}, mode: {})",
            config.base_clock,
            config.target_freq,
            config.max_prescaler,
            config.max_reload,
            config.scan_mode
        );

        loop {
            passes += 1;

            if let Some(candidate) = self.scan_pass(tolerance) {
                info!(
                    "Found psc={} arr={} ({} Hz, error {:.6}%) after {} pass(es)",
                    candidate.prescaler,
                    candidate.reload,
                    candidate.achieved_freq,
                    candidate.percent_error,
                    passes
                );
                return Ok(SearchResult {
                    candidate,
                    tolerance,
                    passes,
                });
            }

            if passes >= config.max_passes {
                return Err(Error::PassLimitReached { passes, tolerance });
            }

            tolerance += config.error_increase_step;
            debug!("Pass {} empty, tolerance now {:.6}%", passes, tolerance);
            observer.on_relaxed(passes, tolerance);
        }
    }

    /// One pass at a fixed tolerance.
    ///
    /// `None` when no candidate is within `tolerance`.
    pub fn scan_pass(&self, tolerance: f64) -> Option<Candidate> {
        let config = self.config;
        let bounds = DivisorBounds::new(config, tolerance);
        let mut best: Option<Candidate> = None;

        for prescaler in 0..=config.max_prescaler {
            if bounds.exceeded_by(prescaler) {
                break;
            }
            if config.scan_mode == ScanMode::Prefiltered && !prefilter_accepts(config, prescaler)
            {
                continue;
            }
            let Some(window) = bounds.reload_window(prescaler, config.max_reload) else {
                continue;
            };

            for reload in window {
                let candidate = Candidate::evaluate(config, prescaler, reload);
                if candidate.percent_error <= tolerance
                    && best.is_none_or(|b| candidate.abs_delta < b.abs_delta)
                {
                    best = Some(candidate);
                }
            }
        }

        best
    }
}

/// Search with the default (silent) observer
pub fn search(config: &SearchConfig) -> Result<SearchResult> {
    DividerSearch::new(config)?.run()
}

/// Search, reporting each tolerance relaxation to `observer`
pub fn search_with<O: PassObserver>(
    config: &SearchConfig,
    observer: &mut O,
) -> Result<SearchResult> {
    DividerSearch::new(config)?.run_with(observer)
}
