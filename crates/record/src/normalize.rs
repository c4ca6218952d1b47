//! Cleanup rules applied before and after enrichment.

use crate::record::Record;
use crate::registry::Field;
use once_cell::sync::Lazy;
use regex::Regex;

/// Cell values that stand for "no value" in input
const EMPTY_SENTINELS: [&str; 2] = ["#NA", "NA"];

static DELIMITER_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*[,;]\s*").unwrap());
static COMMA_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r",+").unwrap());
static SYMBOL_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^:]*:").unwrap());

/// Canonicalize one cell value: collapse the empty-value sentinel, trim,
/// turn comma/semicolon runs into a single comma, strip trailing commas.
#[must_use]
pub fn clean_value(value: &str) -> String {
    if EMPTY_SENTINELS.contains(&value) {
        return String::new();
    }
    let cleaned = DELIMITER_RUN.replace_all(value.trim(), ",");
    let cleaned = COMMA_RUN.replace_all(&cleaned, ",");
    cleaned.trim_end_matches(',').to_string()
}

/// Strip the `symbol:` prefix convention from a value
#[must_use]
pub fn strip_prefix(value: &str) -> String {
    SYMBOL_PREFIX.replace(value, "").into_owned()
}

/// Clean every column of a record and remove the symbol prefix from the
/// prefixed columns, guaranteeing canonical (unprefixed) form before any
/// value is reused as a lookup key.
pub fn cleanup_record(record: &mut Record) {
    for field in Field::ALL {
        record.set(field, clean_value(record.get(field)));
    }
    for field in Field::PREFIXED {
        record.set(field, strip_prefix(record.get(field)));
    }
}

/// Rewrite the prefixed columns as `symbol:value`. Inverse of the prefix
/// strip performed by [`cleanup_record`].
pub fn prepend_prefix(record: &mut Record) {
    let symbol = record.symbol().to_string();
    for field in Field::PREFIXED {
        if record.has(field) {
            record.set(field, format!("{symbol}:{}", record.get(field)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{clean_value, cleanup_record, prepend_prefix, strip_prefix};
    use crate::record::Record;
    use crate::registry::Field;
    use pretty_assertions::assert_eq;

    #[test]
    fn sentinels_become_empty() {
        assert_eq!(clean_value("#NA"), "");
        assert_eq!(clean_value("NA"), "");
        // only the exact cell value is a sentinel
        assert_eq!(clean_value("NADK"), "NADK");
    }

    #[test]
    fn delimiter_runs_collapse() {
        assert_eq!(clean_value("  a , b ;; c,,d,  "), "a,b,c,d");
        assert_eq!(clean_value("a;b"), "a,b");
        assert_eq!(clean_value("trailing,,,"), "trailing");
    }

    #[test]
    fn prefix_then_strip_is_identity() {
        let mut record = Record::new();
        record.set(Field::HgncSymbol, "SCN1A");
        record.set(Field::OmimMorbid, "182389");
        record.set(Field::PhenotypicDiseaseModel, "604403>AD");
        let before = record.clone();

        prepend_prefix(&mut record);
        assert_eq!(record.get(Field::OmimMorbid), "SCN1A:182389");
        assert_eq!(record.get(Field::PhenotypicDiseaseModel), "SCN1A:604403>AD");

        cleanup_record(&mut record);
        assert_eq!(record, before);
    }

    #[test]
    fn strip_prefix_only_eats_up_to_first_colon() {
        assert_eq!(strip_prefix("SCN1A:604403>AD|182389"), "604403>AD|182389");
        assert_eq!(strip_prefix("no_prefix_here"), "no_prefix_here");
    }

    #[test]
    fn empty_prefixed_fields_stay_empty() {
        let mut record = Record::new();
        record.set(Field::HgncSymbol, "BRAF");
        prepend_prefix(&mut record);
        assert_eq!(record.get(Field::GeneDescription), "");
    }
}
