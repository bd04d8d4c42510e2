//! Check verdicts and the diagnostics sink they are reported through.
//!
//! Every rule category produces exactly one [`Verdict`]. Sub-checks build a
//! [`Findings`] value and return it; callers merge those and turn the result
//! into a verdict once the category is complete.

use serde::Serialize;
use std::fmt;

/// Severity of a single finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    /// Manual review needed; does not fail the check.
    Warning,
    /// Policy violation.
    Error,
    /// Structural problem (malformed input, missing certificate).
    Fatal,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        }
    }

    pub fn is_failure(self) -> bool {
        matches!(self, Self::Error | Self::Fatal)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

/// Ordered accumulator of findings for one check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Findings {
    entries: Vec<Finding>,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, severity: Severity, message: impl Into<String>) {
        self.entries.push(Finding {
            severity,
            message: message.into(),
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Severity::Info, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Severity::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Severity::Error, message);
    }

    pub fn fatal(&mut self, message: impl Into<String>) {
        self.push(Severity::Fatal, message);
    }

    /// Append all of `other`, keeping order.
    pub fn merge(&mut self, other: Findings) {
        self.entries.extend(other.entries);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Finding> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.entries.iter().filter(|f| f.severity == severity).count()
    }

    pub fn has_failures(&self) -> bool {
        self.entries.iter().any(|f| f.severity.is_failure())
    }

    pub fn into_verdict(self, check: &str, title: &str) -> Verdict {
        Verdict::new(check, title, self)
    }
}

impl FromIterator<Finding> for Findings {
    fn from_iter<I: IntoIterator<Item = Finding>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Outcome of one check category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// Check identifier, e.g. `TLS_ICS_04`.
    pub check: String,
    pub title: String,
    /// True iff no error or fatal finding was recorded.
    pub passed: bool,
    pub warnings: usize,
    pub errors: usize,
    pub fatal_errors: usize,
    pub findings: Vec<Finding>,
}

impl Verdict {
    pub fn new(check: &str, title: &str, findings: Findings) -> Self {
        Self {
            check: check.to_string(),
            title: title.to_string(),
            passed: !findings.has_failures(),
            warnings: findings.count(Severity::Warning),
            errors: findings.count(Severity::Error),
            fatal_errors: findings.count(Severity::Fatal),
            findings: findings.entries,
        }
    }

    /// Diagnostic lines in recording order.
    pub fn messages(&self) -> Vec<&str> {
        self.findings.iter().map(|f| f.message.as_str()).collect()
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings > 0
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: [check], [PASS/FAIL], [title], [counts], then one finding per line
        write!(
            f,
            "{}, {}, {}",
            self.check,
            if self.passed { "PASS" } else { "FAIL" },
            self.title
        )?;
        if self.warnings + self.errors + self.fatal_errors > 0 {
            write!(
                f,
                " ({} warnings, {} errors, {} fatal)",
                self.warnings, self.errors, self.fatal_errors
            )?;
        }
        for finding in &self.findings {
            write!(f, "\n  [{}] {}", finding.severity.as_str(), finding.message)?;
        }
        Ok(())
    }
}

/// Receives every verdict produced by a verification run.
pub trait DiagnosticSink {
    fn record(&mut self, verdict: &Verdict);
}

/// Forwards verdicts to `tracing`, one event per finding.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&mut self, verdict: &Verdict) {
        for finding in &verdict.findings {
            match finding.severity {
                Severity::Info => {
                    tracing::info!(check = %verdict.check, "{}", finding.message)
                }
                Severity::Warning => {
                    tracing::warn!(check = %verdict.check, "{}", finding.message)
                }
                Severity::Error | Severity::Fatal => tracing::error!(
                    check = %verdict.check,
                    severity = finding.severity.as_str(),
                    "{}",
                    finding.message
                ),
            }
        }
        if verdict.passed {
            tracing::info!(check = %verdict.check, warnings = verdict.warnings, "check passed");
        } else {
            tracing::error!(
                check = %verdict.check,
                errors = verdict.errors,
                fatal = verdict.fatal_errors,
                "check failed"
            );
        }
    }
}

/// Keeps a copy of every verdict.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub verdicts: Vec<Verdict>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, check: &str) -> Option<&Verdict> {
        self.verdicts.iter().find(|v| v.check == check)
    }
}

impl DiagnosticSink for MemorySink {
    fn record(&mut self, verdict: &Verdict) {
        self.verdicts.push(verdict.clone());
    }
}

/// Serialize verdicts as pretty-printed JSON.
pub fn to_json(verdicts: &[Verdict]) -> Result<String, crate::ConformanceError> {
    Ok(serde_json::to_string_pretty(verdicts)?)
}
