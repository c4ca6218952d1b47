//! Collected validation findings.

/// One validation finding, anchored to a physical line of the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// 1-based physical line number; 0 for file-level findings
    pub line_nr: usize,
    pub message: String,
}

impl Finding {
    #[must_use]
    pub fn render(&self) -> String {
        format!("#{} {}", self.line_nr, self.message)
    }
}

/// The outcome of validating one list. Findings never abort the run; a
/// list either passes clean or collects every problem in one go.
#[derive(Debug, Default)]
pub struct Report {
    findings: Vec<Finding>,
}

impl Report {
    pub fn add(&mut self, line_nr: usize, message: impl Into<String>) {
        let finding = Finding {
            line_nr,
            message: message.into(),
        };
        log::warn!("{}", finding.render());
        self.findings.push(finding);
    }

    /// Whether the list passed without a single finding
    #[must_use]
    pub fn passed(&self) -> bool {
        self.findings.is_empty()
    }

    #[must_use]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Every finding rendered as an output line
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.findings.iter().map(Finding::render).collect()
    }
}
