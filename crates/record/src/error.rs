use thiserror::Error;

/// Result type for record operations
pub type Result<T> = std::result::Result<T, RecordError>;

/// Errors that can occur while parsing a gene list
#[derive(Error, Debug)]
pub enum RecordError {
    /// The input ended while still consuming leading comments
    #[error("No header line found: input exhausted inside leading comments")]
    MissingHeader,
}
