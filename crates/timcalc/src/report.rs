//! Result reports (text lines and JSON)

use serde::Serialize;

use crate::error::Result;
use crate::search::SearchResult;

/// Flattened search outcome ready for output
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub reload: u32,
    pub prescaler: u32,
    pub divisor: u128,
    pub target_freq: u64,
    pub achieved_freq: f64,
    /// `target - achieved`
    pub delta: f64,
    pub percent_error: f64,
    pub tolerance: f64,
    pub passes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_value: Option<u64>,
}

impl Report {
    /// Build a report, computing the compare value when `duty` is given.
    pub fn new(result: &SearchResult, target_freq: u64, duty: Option<f64>) -> Result<Self> {
        let c = &result.candidate;
        let compare_value = duty.map(|d| c.compare_value(d)).transpose()?;
        Ok(Self {
            reload: c.reload,
            prescaler: c.prescaler,
            divisor: c.divisor,
            target_freq,
            achieved_freq: c.achieved_freq,
            delta: c.signed_delta(target_freq),
            percent_error: c.percent_error,
            tolerance: result.tolerance,
            passes: result.passes,
            duty,
            compare_value,
        })
    }
}

/// Output format for a [`Report`]
pub trait ReportFormat {
    fn format(&self, report: &Report) -> Result<String>;
}

/// Register-style text, one field per line
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReport;

impl ReportFormat for TextReport {
    fn format(&self, report: &Report) -> Result<String> {
        let mut out = format!(
            "arr: {}\npsc: {}\nwanted freq:{}Hz\nfreq: {:.6}Hz\nDelta: {:.6}Hz\n",
            report.reload,
            report.prescaler,
            report.target_freq,
            report.achieved_freq,
            report.delta
        );
        if let Some(ccr) = report.compare_value {
            out.push_str(&format!("ccr: {}\n", ccr));
        }
        Ok(out)
    }
}

/// Pretty-printed JSON object
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReport;

impl ReportFormat for JsonReport {
    fn format(&self, report: &Report) -> Result<String> {
        let mut out = serde_json::to_string_pretty(report)?;
        out.push('\n');
        Ok(out)
    }
}

/// Notice shown when a pass finds nothing, with the tolerance of the next pass
pub fn relaxation_notice(tolerance: f64) -> String {
    format!(
        "No results. The margin of error is increased.\nError margin= %{:.6}\n",
        tolerance
    )
}
