//! # Genelist Record
//!
//! The canonical gene-list schema and its text representation: the
//! ordered Field Registry, the [`Record`] and [`Fragment`] value types,
//! the tab-delimited stream parser, the cleanup rules, and the output
//! formatter. Everything else in the workspace is built on these types.

pub mod error;
pub mod format;
pub mod normalize;
pub mod parse;
pub mod record;
pub mod registry;

pub use error::{RecordError, Result};
pub use parse::{parse_lines, Sheet};
pub use record::{Fragment, Record};
pub use registry::Field;
