use std::path::PathBuf;
use thiserror::Error;

/// Exit code for validation failures (bad path, bad format, bad value).
pub const EXIT_VALIDATION: i32 = 2;
/// Exit code for engine failures and anything unexpected.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("could not determine output format from extension, please specify an output format")]
    FormatUndetermined,

    #[error("unsupported output format: {format}. Supported formats: {supported}")]
    UnsupportedFormat { format: String, supported: String },

    #[error("conversion engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("{0}")]
    EngineError(String),

    #[error("failed to prepare {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ConvertError {
    /// True for failures caused by what the user asked for rather than by the engine.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InputNotFound { .. } | Self::FormatUndetermined | Self::UnsupportedFormat { .. }
        )
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_validation() {
            EXIT_VALIDATION
        } else {
            EXIT_FAILURE
        }
    }
}
