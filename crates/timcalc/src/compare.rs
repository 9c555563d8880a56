//! Prefilter verification
//!
//! The prefiltered scan mode skips prescalers that do not divide the base
//! clock. That is fast but can miss the best pair, so before relying on it
//! for a given clock/target this runs both modes and compares the winners.

use strum::{Display, IntoStaticStr};
use tracing::{debug, warn};

use crate::config::{ScanMode, SearchConfig};
use crate::error::{Error, Result};
use crate::search::{SearchResult, search};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
pub enum PrefilterVerdict {
    /// Both modes picked the same pair
    #[strum(serialize = "identical")]
    Identical,
    /// Different pair, no further from the target
    #[strum(serialize = "equivalent")]
    Equivalent,
    /// Prefiltered pair is further from the target
    #[strum(serialize = "worse")]
    Worse,
    /// Prefiltered search hit the pass limit
    #[strum(serialize = "not found")]
    NotFound,
}

impl PrefilterVerdict {
    /// Whether the prefilter can be used for this config without loss
    pub fn is_safe(&self) -> bool {
        matches!(self, Self::Identical | Self::Equivalent)
    }
}

#[derive(Debug, Clone)]
pub struct PrefilterCheck {
    pub exhaustive: SearchResult,
    pub prefiltered: Option<SearchResult>,
    pub verdict: PrefilterVerdict,
}

/// Run `config` in both scan modes and compare the results.
///
/// The `scan_mode` field of `config` is ignored.
pub fn check_prefilter(config: &SearchConfig) -> Result<PrefilterCheck> {
    let exhaustive = search(&SearchConfig {
        scan_mode: ScanMode::Exhaustive,
        ..config.clone()
    })?;

    let prefiltered = match search(&SearchConfig {
        scan_mode: ScanMode::Prefiltered,
        ..config.clone()
    }) {
        Ok(result) => Some(result),
        Err(Error::PassLimitReached { passes, tolerance }) => {
            debug!(
                "Prefiltered search gave up after {} passes ({:.6}%)",
                passes, tolerance
            );
            None
        }
        Err(e) => return Err(e),
    };

    let verdict = match &prefiltered {
        None => PrefilterVerdict::NotFound,
        Some(p) => {
            let (e, p) = (&exhaustive.candidate, &p.candidate);
            if (e.prescaler, e.reload) == (p.prescaler, p.reload) {
                PrefilterVerdict::Identical
            } else if p.abs_delta <= e.abs_delta {
                PrefilterVerdict::Equivalent
            } else {
                PrefilterVerdict::Worse
            }
        }
    };

    if !verdict.is_safe() {
        warn!(
            "Prefilter loses the optimum for {} Hz -> {} Hz ({})",
            config.base_clock, config.target_freq, verdict
        );
    }

    Ok(PrefilterCheck {
        exhaustive,
        prefiltered,
        verdict,
    })
}
