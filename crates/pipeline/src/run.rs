//! Per-run pipeline state: context, contig set and diagnostic buffer.

use genelist_record::Record;
use std::collections::BTreeSet;

/// Non-fatal diagnostic severities. All three are only ever logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational progress
    Info,
    /// Detected value disagreement between a source and the record
    Warn,
    /// Failure to resolve a mandatory identifier
    Error,
}

/// One buffered diagnostic, keyed by the record context it was raised in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub severity: Severity,
    pub line_nr: usize,
    pub symbol: String,
    pub message: String,
}

impl LogEntry {
    /// The buffered-emission form: `#<line> [<symbol>] <message>`
    #[must_use]
    pub fn render(&self) -> String {
        format!("#{} [{}] {}", self.line_nr, self.symbol, self.message)
    }
}

/// Which diagnostics a run emits
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbosity {
    pub info: bool,
    pub warn: bool,
    pub error: bool,
    /// Also report disagreements against fields that were still empty
    pub report_empty: bool,
}

impl Verbosity {
    /// Whether any diagnostics were requested at all; gates the buffered
    /// log block in the output.
    #[must_use]
    pub fn any(&self) -> bool {
        self.info || self.warn || self.error || self.report_empty
    }
}

/// State owned by exactly one pipeline run: the record context (line
/// number and current symbol), the contig set, and the diagnostic
/// buffer. A fresh run starts from a fresh `PipelineRun`; nothing
/// carries over between invocations.
///
/// Every diagnostic goes to two sinks: the `log` crate immediately, and
/// the in-memory buffer for inline emission at the end of the run.
#[derive(Debug, Default)]
pub struct PipelineRun {
    verbosity: Verbosity,
    line_nr: usize,
    current_symbol: String,
    contigs: BTreeSet<String>,
    buffer: Vec<LogEntry>,
}

impl PipelineRun {
    #[must_use]
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Current line number (1-based over the raw input)
    #[must_use]
    pub fn line_nr(&self) -> usize {
        self.line_nr
    }

    /// Position the line counter, e.g. on the header line after parsing
    pub fn set_line_nr(&mut self, line_nr: usize) {
        self.line_nr = line_nr;
    }

    /// Advance the context onto the next record: increment the line
    /// number and adopt the record's symbol for diagnostics.
    pub fn advance(&mut self, record: &Record) {
        self.line_nr += 1;
        self.current_symbol = record.symbol().to_string();
    }

    fn push(&mut self, severity: Severity, message: String) {
        let entry = LogEntry {
            severity,
            line_nr: self.line_nr,
            symbol: self.current_symbol.clone(),
            message,
        };
        match severity {
            Severity::Info => log::info!("{}", entry.render()),
            Severity::Warn => log::warn!("{}", entry.render()),
            Severity::Error => log::error!("{}", entry.render()),
        }
        self.buffer.push(entry);
    }

    /// Informational progress, emitted only when requested
    pub fn info(&mut self, message: impl Into<String>) {
        if self.verbosity.info {
            self.push(Severity::Info, message.into());
        }
    }

    /// A detected disagreement
    pub fn warn(&mut self, message: impl Into<String>) {
        if self.verbosity.warn {
            self.push(Severity::Warn, message.into());
        }
    }

    /// A disagreement against a specific field: suppressed when the field
    /// was still empty, unless the run reports empty fields too.
    pub fn warn_conflict(&mut self, field_had_value: bool, message: impl Into<String>) {
        if self.verbosity.warn && (self.verbosity.report_empty || field_had_value) {
            self.push(Severity::Warn, message.into());
        }
    }

    /// Failure to resolve a mandatory identifier
    pub fn error(&mut self, message: impl Into<String>) {
        if self.verbosity.error {
            self.push(Severity::Error, message.into());
        }
    }

    /// Remember the chromosome of a finished record
    pub fn add_contig(&mut self, contig: impl Into<String>) {
        let contig = contig.into();
        if !contig.is_empty() {
            self.contigs.insert(contig);
        }
    }

    /// The distinct chromosome set seen so far; only meaningful once the
    /// whole stream has been consumed.
    #[must_use]
    pub fn contigs(&self) -> &BTreeSet<String> {
        &self.contigs
    }

    /// The buffered diagnostics, rendered for inline emission
    #[must_use]
    pub fn buffered_lines(&self) -> Vec<String> {
        self.buffer.iter().map(LogEntry::render).collect()
    }

    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::{PipelineRun, Severity, Verbosity};
    use genelist_record::{Field, Record};
    use pretty_assertions::assert_eq;

    fn run_with(verbosity: Verbosity) -> PipelineRun {
        let mut run = PipelineRun::new(verbosity);
        let mut record = Record::new();
        record.set(Field::HgncSymbol, "SCN1A");
        run.set_line_nr(4);
        run.advance(&record);
        run
    }

    #[test]
    fn entries_carry_context() {
        let mut run = run_with(Verbosity {
            warn: true,
            ..Verbosity::default()
        });
        run.warn("value differs");
        assert_eq!(run.buffered_lines(), vec!["#5 [SCN1A] value differs"]);
    }

    #[test]
    fn severities_are_gated_independently() {
        let mut run = run_with(Verbosity {
            error: true,
            ..Verbosity::default()
        });
        run.info("ignored");
        run.warn("ignored");
        run.error("kept");
        assert_eq!(run.entries().len(), 1);
        assert_eq!(run.entries()[0].severity, Severity::Error);
    }

    #[test]
    fn empty_field_conflicts_need_report_empty() {
        let mut run = run_with(Verbosity {
            warn: true,
            ..Verbosity::default()
        });
        run.warn_conflict(false, "suppressed");
        assert!(run.entries().is_empty());

        let mut run = run_with(Verbosity {
            warn: true,
            report_empty: true,
            ..Verbosity::default()
        });
        run.warn_conflict(false, "reported");
        assert_eq!(run.entries().len(), 1);
    }

    #[test]
    fn empty_contigs_are_not_collected() {
        let mut run = run_with(Verbosity::default());
        run.add_contig("");
        run.add_contig("X");
        assert_eq!(run.contigs().len(), 1);
    }
}
