//! Rendering records and metadata back into tab-delimited output.

use crate::record::Record;
use crate::registry::Field;
use std::collections::BTreeSet;

/// The column header line: `#` followed by the registry columns
#[must_use]
pub fn header_line() -> String {
    let names: Vec<&str> = Field::ALL.iter().map(|f| f.as_str()).collect();
    format!("#{}", names.join("\t"))
}

/// One data line: every registry column, tab-separated, in registry order
#[must_use]
pub fn format_line(record: &Record) -> String {
    let values: Vec<&str> = Field::ALL.iter().map(|f| record.get(*f)).collect();
    values.join("\t")
}

/// The contig metadata lines, numeric chromosomes first (by integer
/// value), then non-numeric ones in lexicographic order.
#[must_use]
pub fn contig_lines(contigs: &BTreeSet<String>) -> Vec<String> {
    let mut ordered: Vec<&String> = contigs.iter().collect();
    ordered.sort_by_key(|contig| match contig.parse::<u64>() {
        Ok(n) => (0, n, String::new()),
        Err(_) => (1, 0, (*contig).clone()),
    });
    ordered
        .into_iter()
        .map(|contig| format!("##contig=<ID={contig}>"))
        .collect()
}
