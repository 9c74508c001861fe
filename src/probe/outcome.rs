//! Per-check outcomes and the ordered report they fold into.

/// Result of a single named check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    /// Check name as printed in the summary
    pub name: String,
    /// Whether the check passed
    pub passed: bool,
    /// Captured error text (error chain or panic message plus backtrace)
    pub error: Option<String>,
}

impl CheckOutcome {
    /// A passing outcome
    pub fn pass(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            error: None,
        }
    }

    /// A failing outcome, with or without captured error text
    pub fn fail(name: impl Into<String>, error: Option<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            error,
        }
    }
}

/// Outcomes in the order the checks ran.
#[derive(Debug, Clone, Default)]
pub struct Report {
    outcomes: Vec<CheckOutcome>,
}

impl Report {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an outcome
    pub fn record(&mut self, outcome: CheckOutcome) {
        self.outcomes.push(outcome);
    }

    /// Recorded outcomes
    pub fn outcomes(&self) -> &[CheckOutcome] {
        &self.outcomes
    }

    /// Number of passing checks
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    /// Number of failing checks
    pub fn failures(&self) -> usize {
        self.total() - self.passed()
    }

    /// Number of recorded checks
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// True when nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Final summary: one line per check, then the totals.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .outcomes
            .iter()
            .map(|o| {
                let verdict = if o.passed { "PASSED" } else { "FAILED" };
                format!("{} {}", o.name, verdict)
            })
            .collect();
        lines.push(format!(
            "Total tests: {}, Failures: {}",
            self.total(),
            self.failures()
        ));
        lines
    }

    /// Log the summary at `info`.
    pub fn log_summary(&self) {
        tracing::info!("--- FINAL RESULTS ---");
        for line in self.summary_lines() {
            tracing::info!("{line}");
        }
    }
}

impl Extend<CheckOutcome> for Report {
    fn extend<I: IntoIterator<Item = CheckOutcome>>(&mut self, iter: I) {
        self.outcomes.extend(iter);
    }
}
