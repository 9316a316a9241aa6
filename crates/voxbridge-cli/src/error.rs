//! CLI-specific error types and mappings.
//!
//! This module maps failures to exit codes and user-facing messages.

use thiserror::Error;
use voxbridge_gradio::GradioError;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Synthesis ran but produced no audio.
    #[error("No audio produced: {0}")]
    Synthesis(String),

    /// The Applio server did not answer.
    #[error("Applio is not reachable at {0}")]
    Unreachable(String),

    /// Argument validation error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The HTTP front-end failed to start or stopped with an error.
    #[error("Server error: {0:#}")]
    Server(#[from] anyhow::Error),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error (no audio, upstream unreachable)
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Synthesis(_) | Self::Unreachable(_) => 1,
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
            Self::Server(_) => 71,   // EX_OSERR
        }
    }
}

impl From<GradioError> for CliError {
    fn from(err: GradioError) -> Self {
        match err {
            GradioError::InvalidConfig { .. }
            | GradioError::Template { .. }
            | GradioError::InvalidUrl(_) => Self::Config(err.to_string()),
            GradioError::Io(e) => Self::Io(e.to_string()),
            other => Self::Synthesis(other.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
