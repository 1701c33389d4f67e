use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProjectionError {
    #[error("invalid parameter: {message}")]
    InvalidParameter {
        message: String,
    },

    #[error("export failed for {}: {source}", path.display())]
    ExportFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("export cancelled")]
    Cancelled,

    #[error("export task failed: {message}")]
    TaskFailed {
        message: String,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ProjectionError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ProjectionError::InvalidParameter {
            message: message.into(),
        }
    }

    /// true when the failure came from cooperative cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ProjectionError::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, ProjectionError>;
