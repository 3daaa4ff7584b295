//! Findings accumulated by the checkers and the human-readable report.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Severity {
    #[default]
    Error, // Fails the run
    Warning, // Reported, never fails the run
    Info,    // Remediation hints and skip notices
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Info => write!(f, "INFO"),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Ordered findings of one checker run.
///
/// Every check function returns its own `Report`; callers combine them with
/// [`Report::merge`] so counts are never shared between checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    findings: Vec<Finding>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, msg: impl Into<String>) {
        self.push(Severity::Error, msg);
    }

    pub fn warn(&mut self, msg: impl Into<String>) {
        self.push(Severity::Warning, msg);
    }

    pub fn info(&mut self, msg: impl Into<String>) {
        self.push(Severity::Info, msg);
    }

    fn push(&mut self, severity: Severity, msg: impl Into<String>) {
        self.findings.push(Finding {
            severity,
            message: msg.into(),
        });
    }

    pub fn merge(&mut self, other: Report) {
        self.findings.extend(other.findings);
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.with_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.with_severity(Severity::Warning)
    }

    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.severity == severity)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Print findings in order: errors and warnings on stderr, info on stdout.
    pub fn print(&self) {
        for finding in &self.findings {
            match finding.severity {
                Severity::Error | Severity::Warning => eprintln!("{}", finding),
                Severity::Info => println!("{}", finding),
            }
        }
    }

    /// Summary line for validators that track warnings.
    pub fn summary(&self) -> String {
        format!(
            "Validation complete: {} error(s), {} warning(s)",
            self.error_count(),
            self.warning_count()
        )
    }
}
