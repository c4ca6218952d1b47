//! # Genelist Sanity
//!
//! Independent validation of finished gene lists: structural checks,
//! mandatory value shapes, inheritance-model syntax, coordinate sanity
//! and duplicate detection. The validator never aborts on a bad list; it
//! collects every finding and the caller turns the aggregate into an
//! exit code.

pub mod report;
pub mod validate;

pub use report::{Finding, Report};
pub use validate::{validate_file, validate_lines};
