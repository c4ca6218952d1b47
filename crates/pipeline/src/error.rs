use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Fatal pipeline conditions. Anything here aborts the run; detected
/// value disagreements are logged, never raised.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Malformed input structure
    #[error(transparent)]
    Record(#[from] genelist_record::RecordError),

    /// An external source failed
    #[error(transparent)]
    Source(#[from] genelist_sources::SourceError),
}
