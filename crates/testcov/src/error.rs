//! Result and error types for the coverage engine.

use thiserror::Error;

/// Result type for coverage operations
pub type CoverageResult<T> = Result<T, CoverageError>;

/// Errors that can occur while analyzing coverage
#[derive(Debug, Error)]
pub enum CoverageError {
    /// A coverage profile data line did not match the expected format
    #[error("Malformed profile line {line:?}: {message}")]
    ProfileSyntax {
        /// The offending profile line
        line: String,
        /// What failed to parse
        message: String,
    },

    /// A per-file untested-sections declaration could not be parsed
    #[error("Unparseable untested sections configuration {value:?} in {path}")]
    ThresholdSyntax {
        /// File containing the declaration
        path: String,
        /// The configured value
        value: String,
    },

    /// A source file referenced by the profile could not be read
    #[error("Failed to read {path}: {message}")]
    SourceRead {
        /// File path that failed
        path: String,
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
