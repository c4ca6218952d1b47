use thiserror::Error;

/// Result type for source lookups
pub type Result<T> = std::result::Result<T, SourceError>;

/// Errors raised by the source collaborators. Any of these aborts the
/// pipeline run; there is no retry logic in the core.
#[derive(Error, Debug)]
pub enum SourceError {
    /// IO error while reading a dump file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// A JSON dump could not be decoded
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A tab-delimited dump row did not match the expected layout
    #[error("Malformed dump row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },
}
