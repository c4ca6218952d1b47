//! The validation checks, run line by line over a finished gene list.

use crate::report::Report;
use genelist_record::parse::COMMENT_MARKER;
use genelist_record::Field;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Columns every list must carry, with the shape their values must have
static MANDATORY: Lazy<[(Field, Regex); 6]> = Lazy::new(|| {
    [
        (Field::Chromosome, Regex::new(r"^([\dXY]|MT)+$").unwrap()),
        (Field::GeneStart, Regex::new(r"^\d+$").unwrap()),
        (Field::GeneStop, Regex::new(r"^\d+$").unwrap()),
        (Field::HgncSymbol, Regex::new(r"^\S+$").unwrap()),
        (Field::EnsemblGeneId, Regex::new(r"^ENSG\d{11}$").unwrap()),
        (Field::ClinicalDbGeneAnnotation, Regex::new(r"^.+$").unwrap()),
    ]
});

/// Shapes a phenotypic disease model must never contain: empty models,
/// dangling separators, empty phenotype ids.
static MALFORMED_MODEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(:>|>$|:\d+>\||\|>)").unwrap());

/// Per-list duplicate tracking. A value repeated on the very next data
/// line is a legitimate multi-match expansion; a repeat further away is a
/// curation mistake.
#[derive(Debug, Default)]
struct SeenAt {
    lines: HashMap<String, usize>,
}

impl SeenAt {
    fn check(&mut self, report: &mut Report, line_nr: usize, value: &str) {
        if value.is_empty() {
            return;
        }
        if let Some(&previous) = self.lines.get(value) {
            if previous + 1 != line_nr {
                report.add(line_nr, format!("'{value}' already listed at #{previous}"));
            }
        }
        self.lines.insert(value.to_string(), line_nr);
    }
}

/// Validate a gene list on disk. An unreadable file is itself a finding,
/// not a crash.
#[must_use]
pub fn validate_file(path: &Path) -> Report {
    match fs::read_to_string(path) {
        Ok(content) => validate_lines(content.lines()),
        Err(err) => {
            let mut report = Report::default();
            report.add(0, format!("cannot read {}: {err}", path.display()));
            report
        }
    }
}

/// Validate a gene list given as raw lines.
pub fn validate_lines<I, S>(lines: I) -> Report
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut report = Report::default();
    let mut header: Option<Vec<String>> = None;
    let mut symbols = SeenAt::default();
    let mut gene_ids = SeenAt::default();
    let mut coordinates = SeenAt::default();

    for (idx, line) in lines.into_iter().enumerate() {
        let line_nr = idx + 1;
        let line = line.as_ref().trim_end_matches(['\r', '\n']);
        if line.starts_with(COMMENT_MARKER) {
            continue;
        }

        let Some(header) = &header else {
            header = Some(check_header(&mut report, line_nr, line));
            continue;
        };

        let cells: Vec<&str> = line.split('\t').collect();
        if cells.len() != header.len() {
            report.add(
                line_nr,
                format!("expected {} fields, got {}", header.len(), cells.len()),
            );
        }
        let value = |field: Field| {
            header
                .iter()
                .position(|name| name == field.as_str())
                .and_then(|i| cells.get(i).copied())
                .unwrap_or_default()
        };

        for (name, cell) in header.iter().zip(&cells) {
            if cell.trim() != *cell {
                report.add(
                    line_nr,
                    format!("{name} '{cell}' has leading or trailing whitespace"),
                );
            }
            if cell.contains(", ") {
                report.add(line_nr, format!("{name} '{cell}' has a space after a comma"));
            }
        }

        for (field, pattern) in MANDATORY.iter() {
            let cell = value(*field);
            if !pattern.is_match(cell) {
                report.add(
                    line_nr,
                    format!("'{cell}' is not a valid {}", field.as_str()),
                );
            }
        }

        let model = value(Field::PhenotypicDiseaseModel);
        if MALFORMED_MODEL.is_match(model) {
            report.add(line_nr, format!("malformed inheritance models '{model}'"));
        }

        let start = value(Field::GeneStart).parse::<u64>();
        let stop = value(Field::GeneStop).parse::<u64>();
        // zero-length spans are just as wrong as reversed ones
        if let (Ok(start), Ok(stop)) = (&start, &stop) {
            if start >= stop {
                report.add(line_nr, format!("Gene_start {start} beyond Gene_stop {stop}"));
            }
        }

        let chromosome = value(Field::Chromosome);
        let locus = value(Field::GeneLocus);
        if !chromosome.is_empty() && !locus.is_empty() {
            let arm = locus.find(['p', 'q']).unwrap_or(locus.len());
            if &locus[..arm] != chromosome {
                report.add(
                    line_nr,
                    format!("chromosome {chromosome} conflicts with locus {locus}"),
                );
            }
        }

        symbols.check(&mut report, line_nr, value(Field::HgncSymbol));
        gene_ids.check(&mut report, line_nr, value(Field::EnsemblGeneId));
        if let (Ok(start), Ok(stop)) = (start, stop) {
            coordinates.check(
                &mut report,
                line_nr,
                &format!("{chromosome}:{start}-{stop}"),
            );
        }
    }

    if header.is_none() {
        report.add(0, "no header line found");
    }
    report
}

/// Check the header line itself and return its column names
fn check_header(report: &mut Report, line_nr: usize, line: &str) -> Vec<String> {
    let mut names: Vec<String> = line.split('\t').map(str::to_string).collect();
    match names.first_mut() {
        Some(first) if first.starts_with('#') => {
            *first = first.trim_start_matches('#').to_string();
        }
        _ => report.add(line_nr, "header line missing the # marker"),
    }

    for name in &names {
        if name.trim() != name {
            report.add(
                line_nr,
                format!("column name '{name}' has leading or trailing whitespace"),
            );
        }
    }
    for (field, _) in MANDATORY.iter() {
        if !names.iter().any(|name| name == field.as_str()) {
            report.add(line_nr, format!("missing mandatory column {}", field.as_str()));
        }
    }
    names
}
