//! Stream parser for tab-delimited gene lists.

use crate::error::{RecordError, Result};
use crate::record::Record;
use crate::registry::Field;

/// Lines whose first field starts with this marker are metadata
pub const COMMENT_MARKER: &str = "##";
/// Contig comments are discarded outright; they are regenerated from data
pub const CONTIG_MARKER: &str = "##contig";
/// The header line starts with this marker
pub const HEADER_MARKER: char = '#';

/// A parsed gene list: retained comments, the column header and the raw
/// data rows, still in input order.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    /// Comment lines retained verbatim for re-emission
    pub comments: Vec<String>,
    /// Header cell names, with the leading marker stripped
    pub header: Vec<String>,
    /// Raw tab-split data rows
    pub rows: Vec<Vec<String>>,
    /// Physical line number of the header line. Counts every leading
    /// comment, including discarded contig comments, so diagnostics
    /// stay on input line numbers.
    pub header_line_nr: usize,
}

impl Sheet {
    /// Map each header cell to its canonical field, `None` for unknown
    /// column names.
    #[must_use]
    pub fn header_fields(&self) -> Vec<Option<Field>> {
        self.header
            .iter()
            .map(|name| {
                let field = Field::from_name(name);
                if field.is_none() {
                    log::debug!("Ignoring unknown column '{name}'");
                }
                field
            })
            .collect()
    }

    /// Zip one raw row against the header into a record. Cells under
    /// unknown columns are skipped; cells beyond the header are dropped.
    #[must_use]
    pub fn record_from_row(header_fields: &[Option<Field>], row: &[String]) -> Record {
        let mut record = Record::new();
        for (field, cell) in header_fields.iter().zip(row.iter()) {
            if let Some(field) = field {
                record.set(*field, cell.clone());
            }
        }
        record
    }

    /// All data rows as records, in input order
    #[must_use]
    pub fn records(&self) -> Vec<Record> {
        let header_fields = self.header_fields();
        self.rows
            .iter()
            .map(|row| Self::record_from_row(&header_fields, row))
            .collect()
    }
}

/// Parse raw text lines into a [`Sheet`].
///
/// Comment lines (`##`) before the header are retained verbatim, except
/// contig comments which are dropped. The first non-comment line is the
/// header; a leading `#` on its first cell is stripped. Fails when the
/// input is exhausted while still consuming leading comments.
pub fn parse_lines<I, S>(lines: I) -> Result<Sheet>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut sheet = Sheet::default();
    let mut lines = lines.into_iter();

    // leading comments, then the header
    let header_line = loop {
        let line = match lines.next() {
            Some(line) => line.as_ref().trim_end_matches(['\r', '\n']).to_string(),
            None => return Err(RecordError::MissingHeader),
        };
        sheet.header_line_nr += 1;
        if line.starts_with(COMMENT_MARKER) {
            if !line.starts_with(CONTIG_MARKER) {
                sheet.comments.push(line);
            }
        } else {
            break line;
        }
    };

    let mut header: Vec<String> = header_line.split('\t').map(str::to_string).collect();
    if let Some(first) = header.first_mut() {
        if first.starts_with(HEADER_MARKER) {
            *first = first.trim_start_matches(HEADER_MARKER).to_string();
        }
    }
    sheet.header = header;

    for line in lines {
        let line = line.as_ref().trim_end_matches(['\r', '\n']);
        sheet
            .rows
            .push(line.split('\t').map(str::to_string).collect());
    }

    Ok(sheet)
}

#[cfg(test)]
mod tests {
    use super::parse_lines;
    use crate::error::RecordError;
    use crate::registry::Field;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_comments_header_and_rows() {
        let sheet = parse_lines([
            "##Database=<ID=CMMS>",
            "##contig=<ID=1>",
            "#Chromosome\tGene_start\tGene_stop\tHGNC_symbol",
            "1\t100\t200\tSCN1A",
        ])
        .unwrap();

        assert_eq!(sheet.comments, vec!["##Database=<ID=CMMS>"]);
        assert_eq!(sheet.header[0], "Chromosome");
        assert_eq!(sheet.header_line_nr, 3);

        let records = sheet.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get(Field::HgncSymbol), "SCN1A");
        assert_eq!(records[0].get(Field::GeneStart), "100");
    }

    #[test]
    fn contig_comments_are_discarded_but_still_counted() {
        let sheet = parse_lines([
            "##contig=<ID=X>",
            "##contig=<ID=Y>",
            "#Chromosome\tHGNC_symbol",
        ])
        .unwrap();
        assert!(sheet.comments.is_empty());
        assert_eq!(sheet.header_line_nr, 3);
    }

    #[test]
    fn unknown_columns_are_skipped() {
        let sheet = parse_lines(["#Chromosome\tBogus_column\tHGNC_symbol", "7\tx\tBRAF"]).unwrap();
        let records = sheet.records();
        assert_eq!(records[0].get(Field::Chromosome), "7");
        assert_eq!(records[0].get(Field::HgncSymbol), "BRAF");
    }

    #[test]
    fn missing_header_is_a_structural_error() {
        let err = parse_lines(["##only", "##comments"]).unwrap_err();
        assert!(matches!(err, RecordError::MissingHeader));
    }
}
