//! Error types and exit codes for semdiff

use std::process::ExitCode;
use thiserror::Error;

/// Main error type for semdiff operations
///
/// Formatter failures are deliberately absent: normalization falls back to
/// the raw text instead of failing (see [`crate::normalize::Normalization`]).
#[derive(Error, Debug)]
pub enum SemdiffError {
    #[error("{message}")]
    Usage { message: String },

    #[error("Unsupported extension: {extension}")]
    UnsupportedLanguage { extension: String },

    #[error("Could not retrieve {path} from {revision}: {message}")]
    Retrieval {
        revision: String,
        path: String,
        message: String,
    },

    #[error("Failed to parse file: {message}")]
    ParseFailure { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SemdiffError {
    /// Convert error to the process exit code:
    /// - 0: Success (never produced here)
    /// - 1: IO error
    /// - 2: Usage error
    /// - 3: Unsupported file kind
    /// - 4: Revision could not be retrieved
    /// - 5: Grammar/parser failure
    /// - 6: Bad configuration file
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Io(_) => ExitCode::from(1),
            Self::Usage { .. } => ExitCode::from(2),
            Self::UnsupportedLanguage { .. } => ExitCode::from(3),
            Self::Retrieval { .. } => ExitCode::from(4),
            Self::ParseFailure { .. } => ExitCode::from(5),
            Self::Config { .. } => ExitCode::from(6),
        }
    }
}

/// Result type alias for semdiff operations
pub type Result<T> = std::result::Result<T, SemdiffError>;
