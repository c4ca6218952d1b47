//! The annotation driver: parses a gene list, pulls every record through
//! the enrichment chain and assembles the final output lines.

use crate::enrich::{
    munge_coordinates, redpen_to_symbol, AddPhenotypes, AddRefseq, AddTranscripts, AddUniprot,
    OfficialSymbol, ResolveCoordinates, SymbolTableFill,
};
use crate::error::Result;
use crate::run::{PipelineRun, Verbosity};
use crate::stage::apply_stage;
use genelist_record::format::{contig_lines, format_line, header_line};
use genelist_record::normalize::{cleanup_record, prepend_prefix};
use genelist_record::{parse_lines, Field, Sheet};
use genelist_sources::{
    CoordinateSource, Nomenclature, PhenotypeCatalog, ProteinAnnotations, SymbolTable,
};

/// Per-run knobs
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotateOptions {
    pub verbosity: Verbosity,
    /// Abort candidate iteration on the first empty coordinate lookup
    pub stop_on_first_empty: bool,
}

/// Ties the sources together for one annotation run. The sources are
/// borrowed mutably so dump-backed implementations may cache lookups.
pub struct Annotator<'a> {
    pub coordinates: &'a mut dyn CoordinateSource,
    pub phenotypes: &'a mut dyn PhenotypeCatalog,
    pub nomenclature: &'a mut dyn Nomenclature,
    pub proteins: &'a mut dyn ProteinAnnotations,
    pub symbol_table: &'a SymbolTable,
}

impl Annotator<'_> {
    /// Run the full chain over raw input lines and return the output
    /// lines: buffered diagnostics (when any verbosity flag is set),
    /// retained comments, regenerated contigs, header, then one line per
    /// surviving record in input order (fan-out children adjacent).
    pub fn annotate<I, S>(&mut self, lines: I, options: AnnotateOptions) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sheet = parse_lines(lines)?;
        let mut run = PipelineRun::new(options.verbosity);
        run.set_line_nr(sheet.header_line_nr);

        let header_fields = sheet.header_fields();
        let mut output = Vec::with_capacity(sheet.rows.len());
        for row in &sheet.rows {
            let mut record = Sheet::record_from_row(&header_fields, row);
            run.advance(&record);
            cleanup_record(&mut record);

            let mut records = apply_stage(
                &mut run,
                vec![record],
                &mut SymbolTableFill {
                    table: self.symbol_table,
                },
            )?;
            records = apply_stage(
                &mut run,
                records,
                &mut OfficialSymbol {
                    source: &mut *self.nomenclature,
                },
            )?;
            records = apply_stage(
                &mut run,
                records,
                &mut AddUniprot {
                    nomenclature: &mut *self.nomenclature,
                    proteins: &mut *self.proteins,
                },
            )?;
            records = apply_stage(
                &mut run,
                records,
                &mut AddRefseq {
                    source: &mut *self.nomenclature,
                },
            )?;
            records = apply_stage(
                &mut run,
                records,
                &mut ResolveCoordinates {
                    source: &mut *self.coordinates,
                    stop_on_first_empty: options.stop_on_first_empty,
                },
            )?;
            records = apply_stage(
                &mut run,
                records,
                &mut AddTranscripts {
                    source: &mut *self.coordinates,
                },
            )?;
            records = apply_stage(
                &mut run,
                records,
                &mut AddPhenotypes {
                    catalog: &mut *self.phenotypes,
                },
            )?;

            for record in &mut records {
                redpen_to_symbol(record);
                munge_coordinates(record);
                cleanup_record(record);
                prepend_prefix(record);
                run.add_contig(record.get(Field::Chromosome));
            }
            output.extend(records);
        }

        let mut lines = Vec::new();
        if run.verbosity().any() {
            lines.extend(run.buffered_lines());
        }
        lines.extend(sheet.comments.iter().cloned());
        lines.extend(contig_lines(run.contigs()));
        lines.push(header_line());
        lines.extend(output.iter().map(format_line));
        Ok(lines)
    }
}
