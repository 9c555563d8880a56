use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid config: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("No candidate found after {passes} passes (tolerance reached {tolerance:.6}%)")]
    PassLimitReached { passes: u32, tolerance: f64 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }

    /// Check if this error was raised by config validation
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, Error::InvalidConfig { .. })
    }
}
