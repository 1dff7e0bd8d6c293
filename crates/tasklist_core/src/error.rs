use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid task index.")]
    InvalidIndex { index: isize, len: usize },

    #[error("{0}")]
    InvalidInput(String),

    #[error("invalid task data in {path}: {source}")]
    InvalidData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("console I/O failed: {0}")]
    Console(#[source] std::io::Error),

    #[error("{0}")]
    Config(String),
}

impl AppError {
    pub fn invalid_input<M: Into<String>>(message: M) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_data(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::InvalidData {
            path: path.into(),
            source,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn console(source: std::io::Error) -> Self {
        Self::Console(source)
    }

    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::Config(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidIndex { .. } => "invalid_index",
            Self::InvalidInput(_) => "invalid_input",
            Self::InvalidData { .. } => "invalid_data",
            Self::Io { .. } | Self::Console(_) => "io_error",
            Self::Config(_) => "invalid_config",
        }
    }

    /// Only a bad index leaves the session usable; everything else ends it.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidIndex { .. })
    }
}
