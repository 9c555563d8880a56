//! TOML config file support.
//!
//! Every key is optional; anything left out falls back to the command line
//! and then to the built-in defaults.
//!
//! ```toml
//! base_clock = 84000000
//! target_freq = 168
//! max_prescaler = 65535
//! max_reload = 65535
//! initial_error_pct = 0.01
//! error_increase_step = 0.002
//! scan_mode = "exhaustive"
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use timcalc::ScanMode;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub base_clock: Option<u64>,
    pub target_freq: Option<u64>,
    #[serde(alias = "max_factor_a")]
    pub max_prescaler: Option<u32>,
    #[serde(alias = "max_factor_b")]
    pub max_reload: Option<u32>,
    pub initial_error_pct: Option<f64>,
    pub error_increase_step: Option<f64>,
    pub max_passes: Option<u32>,
    pub scan_mode: Option<ScanMode>,
    pub duty: Option<f64>,
}

impl FileConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: FileConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_full_file() {
        let file = write_config(
            r#"
base_clock = 84000000
target_freq = 168
max_prescaler = 255
max_reload = 65535
initial_error_pct = 0.05
error_increase_step = 0.01
max_passes = 500
scan_mode = "prefiltered"
duty = 50.0
"#,
        );
        let config = FileConfig::load(file.path()).unwrap();
        assert_eq!(config.base_clock, Some(84_000_000));
        assert_eq!(config.target_freq, Some(168));
        assert_eq!(config.max_prescaler, Some(255));
        assert_eq!(config.initial_error_pct, Some(0.05));
        assert_eq!(config.max_passes, Some(500));
        assert_eq!(config.scan_mode, Some(ScanMode::Prefiltered));
        assert_eq!(config.duty, Some(50.0));
    }

    #[test]
    fn test_load_partial_file_with_aliases() {
        let file = write_config("max_factor_a = 1023\nmax_factor_b = 4095\n");
        let config = FileConfig::load(file.path()).unwrap();
        assert_eq!(config.max_prescaler, Some(1023));
        assert_eq!(config.max_reload, Some(4095));
        assert_eq!(config.base_clock, None);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let file = write_config("base_clok = 1000\n");
        let err = FileConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
