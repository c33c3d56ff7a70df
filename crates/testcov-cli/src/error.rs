//! CLI error types

use thiserror::Error;

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Report generation error
    #[error("Report generation failed: {message}")]
    Report {
        /// Error message
        message: String,
    },

    /// Coverage analysis error
    #[error("Coverage error: {0}")]
    Coverage(#[from] testcov::CoverageError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Create configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create report generation error
    #[must_use]
    pub fn report_generation(message: impl Into<String>) -> Self {
        Self::Report {
            message: message.into(),
        }
    }
}
