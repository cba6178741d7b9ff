//! Domain error types.
//!
//! Normalization-level problems (short windows, zero variance) never reach
//! this type: they are absorbed as `Invalid` samples or skipped steps.
//! Only structural problems the caller must act on are surfaced here.

/// Top-level error type for rotator.
#[derive(Debug, thiserror::Error)]
pub enum RotatorError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data source error: {reason}")]
    Data { reason: String },

    #[error("no data for {id}")]
    NoData { id: String },

    #[error("insufficient data for {id}: have {have} observations, need {need}")]
    InsufficientData { id: String, have: usize, need: usize },

    #[error("{instrument} and benchmark {benchmark} share no common dates")]
    InsufficientOverlap {
        instrument: String,
        benchmark: String,
    },

    #[error("backtest unavailable: regime driver {id} has no data")]
    MissingDriver { id: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RotatorError {
    pub(crate) fn invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        RotatorError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn missing(section: &str, key: &str) -> Self {
        RotatorError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        }
    }
}

impl From<&RotatorError> for std::process::ExitCode {
    fn from(err: &RotatorError) -> Self {
        let code: u8 = match err {
            RotatorError::Io(_) => 1,
            RotatorError::ConfigParse { .. }
            | RotatorError::ConfigMissing { .. }
            | RotatorError::ConfigInvalid { .. } => 2,
            RotatorError::Data { .. } => 3,
            RotatorError::NoData { .. }
            | RotatorError::InsufficientData { .. }
            | RotatorError::InsufficientOverlap { .. }
            | RotatorError::MissingDriver { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
