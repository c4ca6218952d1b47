//! The stage operator the enrichment chain is composed of.

use crate::error::Result;
use crate::run::PipelineRun;
use genelist_record::Record;

/// One transformation stage of the pipeline.
///
/// A stage maps one input record to zero or more output records: a
/// flat-map, not a 1:1 map, because ambiguous resolution fans a record
/// out into one output per candidate match. Most stages return exactly
/// one record.
pub trait Stage {
    fn apply(&mut self, run: &mut PipelineRun, record: Record) -> Result<Vec<Record>>;
}

/// Run every record of a batch through one stage, flattening the results
/// in order.
pub fn apply_stage(
    run: &mut PipelineRun,
    records: Vec<Record>,
    stage: &mut dyn Stage,
) -> Result<Vec<Record>> {
    let mut out = Vec::with_capacity(records.len());
    for record in records {
        out.extend(stage.apply(run, record)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{apply_stage, Stage};
    use crate::error::Result;
    use crate::run::{PipelineRun, Verbosity};
    use genelist_record::{Field, Record};
    use pretty_assertions::assert_eq;

    struct Duplicate;

    impl Stage for Duplicate {
        fn apply(&mut self, _run: &mut PipelineRun, record: Record) -> Result<Vec<Record>> {
            Ok(vec![record.clone(), record])
        }
    }

    #[test]
    fn stages_flat_map() {
        let mut run = PipelineRun::new(Verbosity::default());
        let mut record = Record::new();
        record.set(Field::HgncSymbol, "BRAF");
        let out = apply_stage(&mut run, vec![record], &mut Duplicate).unwrap();
        assert_eq!(out.len(), 2);
    }
}
