//! The merge/conflict engine: the one primitive every enrichment stage
//! uses to fold a freshly fetched fragment into an existing record.

use crate::run::PipelineRun;
use genelist_record::{Fragment, Record};

/// Merge a source fragment into an existing record.
///
/// The fragment takes field-level precedence: every field it defines ends
/// up with the fragment's value, all other fields keep the record's. A
/// usable (non-empty) fragment value that disagrees with the record is
/// reported at warn level; the coordinate pair is never considered a
/// reportable conflict.
#[must_use]
pub fn merge(run: &mut PipelineRun, fragment: &Fragment, existing: &Record) -> Record {
    let mut merged = existing.clone();
    for (field, new_value) in fragment.iter() {
        if !field.is_coordinate() && !new_value.is_empty() {
            let old_value = existing.get(field);
            if old_value != new_value {
                run.warn_conflict(
                    existing.has(field),
                    format!(
                        "{}: line '{new_value}' differs from client '{old_value}'",
                        field.as_str()
                    ),
                );
            }
        }
        merged.set(field, new_value);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::merge;
    use crate::run::{PipelineRun, Verbosity};
    use genelist_record::{Field, Fragment, Record};
    use pretty_assertions::assert_eq;

    fn warn_run() -> PipelineRun {
        PipelineRun::new(Verbosity {
            warn: true,
            report_empty: true,
            ..Verbosity::default()
        })
    }

    #[test]
    fn fragment_wins_for_defined_fields_only() {
        let mut run = warn_run();
        let mut existing = Record::new();
        existing.set(Field::HgncSymbol, "SCN1");
        existing.set(Field::Curator, "AW");

        let fragment = Fragment::new().with(Field::HgncSymbol, "SCN1A");
        let merged = merge(&mut run, &fragment, &existing);

        assert_eq!(merged.get(Field::HgncSymbol), "SCN1A");
        assert_eq!(merged.get(Field::Curator), "AW");
        assert_eq!(run.entries().len(), 1);
    }

    #[test]
    fn coordinate_mismatches_are_never_reported() {
        let mut run = warn_run();
        let mut existing = Record::new();
        existing.set(Field::GeneStart, "100");
        existing.set(Field::GeneStop, "200");

        let fragment = Fragment::new()
            .with(Field::GeneStart, "150")
            .with(Field::GeneStop, "250");
        let merged = merge(&mut run, &fragment, &existing);

        assert_eq!(merged.get(Field::GeneStart), "150");
        assert_eq!(merged.get(Field::GeneStop), "250");
        assert!(run.entries().is_empty());
    }

    #[test]
    fn identical_values_are_silent() {
        let mut run = warn_run();
        let mut existing = Record::new();
        existing.set(Field::Chromosome, "2");
        let fragment = Fragment::new().with(Field::Chromosome, "2");
        let merged = merge(&mut run, &fragment, &existing);
        assert_eq!(merged.get(Field::Chromosome), "2");
        assert!(run.entries().is_empty());
    }

    #[test]
    fn empty_field_conflicts_are_gated() {
        let mut run = PipelineRun::new(Verbosity {
            warn: true,
            ..Verbosity::default()
        });
        let existing = Record::new();
        let fragment = Fragment::new().with(Field::Chromosome, "2");
        let merged = merge(&mut run, &fragment, &existing);
        // the value is adopted, but filling an empty field is not a conflict
        assert_eq!(merged.get(Field::Chromosome), "2");
        assert!(run.entries().is_empty());
    }
}
