//! # Genelist Pipeline
//!
//! The record-reconciliation engine: the per-run diagnostic context, the
//! field-level merge rules, the enrichment stages that pull identifiers
//! and annotations from the sources, and the [`Annotator`] driver that
//! runs a gene list through the whole chain.
//!
//! A record travels the chain as a flat-map: most stages map one record
//! to one record, but an ambiguous coordinate lookup fans a record out
//! into one output per match, and every downstream stage handles each
//! child independently.

pub mod annotate;
pub mod enrich;
pub mod error;
pub mod merge;
pub mod run;
pub mod stage;

pub use annotate::{AnnotateOptions, Annotator};
pub use error::{PipelineError, Result};
pub use merge::merge;
pub use run::{LogEntry, PipelineRun, Severity, Verbosity};
pub use stage::{apply_stage, Stage};
