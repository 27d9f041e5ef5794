//! Crate error type.
//!
//! The simulation core is total; errors only come from the edges
//! (configuration loading and report export).

#[derive(Debug, thiserror::Error)]
pub enum TickbotError {
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

    #[error("export error: {reason}")]
    Export { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TickbotError {
    pub fn invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        TickbotError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<csv::Error> for TickbotError {
    fn from(err: csv::Error) -> Self {
        TickbotError::Export {
            reason: err.to_string(),
        }
    }
}

impl From<&TickbotError> for std::process::ExitCode {
    fn from(err: &TickbotError) -> Self {
        let code: u8 = match err {
            TickbotError::Io(_) | TickbotError::Export { .. } => 1,
            TickbotError::ConfigParse { .. }
            | TickbotError::ConfigMissing { .. }
            | TickbotError::ConfigInvalid { .. } => 2,
        };
        std::process::ExitCode::from(code)
    }
}
