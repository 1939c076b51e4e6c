// logveil-core/src/errors.rs
//! Custom error types for the logveil-core library.
//!
//! License: MIT OR Apache-2.0

use thiserror::Error;

/// This enum represents all possible error types in the `logveil-core` library.
///
/// `#[non_exhaustive]` signals to consumers that new variants may be added in
/// future versions, so exhaustive matching would be a breaking hazard.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LogveilError {
    /// A field's custom detection pattern failed to compile. The error is
    /// scoped to the named field; `configure` excludes that field and keeps
    /// the rest of the configuration active.
    #[error("failed to compile custom pattern for field '{0}': {1}")]
    FieldPatternError(String, regex::Error),

    /// A field's custom pattern exceeds the maximum allowed length.
    #[error("field '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    /// Aggregate of per-field configuration errors produced by one
    /// `configure` call. The snapshot without the offending fields is still
    /// installed; this error reports what was dropped.
    #[error("{0} sensitive field(s) excluded from configuration:\n{1}")]
    InvalidFields(usize, String),

    /// A category's built-in detection pattern failed to compile.
    #[error("failed to compile detection pattern for data type '{0}': {1}")]
    TypePatternError(String, regex::Error),

    /// Configuration file validation failure.
    #[error("configuration validation failed:\n{0}")]
    ValidationError(String),

    #[error("an unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("a critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),
}

impl LogveilError {
    /// Folds a batch of per-field errors into a single [`LogveilError::InvalidFields`].
    pub(crate) fn from_field_errors(errors: Vec<LogveilError>) -> LogveilError {
        let joined = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        LogveilError::InvalidFields(errors.len(), joined)
    }
}
