//! Core types for analysis findings and scan reports.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::asset::AssetRef;

/// Severity level for analysis findings.
///
/// Totally ordered: `Info < Warning < Error < Critical`. Rules that evaluate
/// several sub-conditions against one asset use the ordering to report the
/// single worst finding instead of a flood of near-duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational finding, no action required.
    Info,
    /// Finding that should be addressed.
    Warning,
    /// Finding that must be fixed.
    Error,
    /// Finding that blocks the content pipeline.
    Critical,
}

impl Severity {
    /// Parses a severity from a profile parameter string.
    ///
    /// Parameter values are free-form strings edited by hand, so parsing is
    /// lenient: matching is case-insensitive and anything unrecognized yields
    /// `fallback` rather than an error.
    #[must_use]
    pub fn parse_param(value: &str, fallback: Self) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "info" => Self::Info,
            "warning" => Self::Warning,
            "error" => Self::Error,
            "critical" => Self::Critical,
            _ => fallback,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Errors produced by applying a fix action.
#[derive(Debug, thiserror::Error)]
pub enum FixError {
    /// Rewriting the asset descriptor on disk failed.
    #[error("failed to rewrite asset descriptor {path}: {source}")]
    Io {
        /// Descriptor path the fix attempted to rewrite.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Serializing the modified descriptor failed.
    #[error("failed to serialize asset descriptor {path}: {message}")]
    Serialize {
        /// Descriptor path the fix attempted to rewrite.
        path: PathBuf,
        /// Serialization error message.
        message: String,
    },

    /// The asset changed since the finding was produced.
    #[error("fix is no longer applicable: {0}")]
    Stale(String),
}

type FixFn = Box<dyn FnOnce() -> Result<(), FixError> + Send>;

/// A deferred remediation action attached to a finding.
///
/// The closure is invoked at most once, explicitly, by whoever consumes the
/// report ("check finds problems, fix resolves them" - the two never
/// interleave). It owns everything it needs by value; nothing borrowed from
/// check-time state survives into the action.
pub struct FixAction {
    label: String,
    apply: FixFn,
}

impl FixAction {
    /// Creates a fix action with a human-readable label.
    pub fn new<F>(label: impl Into<String>, apply: F) -> Self
    where
        F: FnOnce() -> Result<(), FixError> + Send + 'static,
    {
        Self {
            label: label.into(),
            apply: Box::new(apply),
        }
    }

    /// Returns the human-readable label describing what the fix will do.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Consumes the action and applies it.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying asset could not be rewritten. The
    /// engine only logs fix outcomes; it never retries.
    pub fn apply(self) -> Result<(), FixError> {
        (self.apply)()
    }
}

impl std::fmt::Debug for FixAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixAction")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// One reported finding: which asset, how bad, which rule, and optionally
/// how to remediate it.
///
/// Immutable once placed in a result collection, except that the fix action
/// can be taken out exactly once for application.
#[derive(Debug, Serialize)]
pub struct AnalysisResult {
    /// The asset the finding is about.
    pub asset: AssetRef,
    /// Severity of the finding.
    pub severity: Severity,
    /// Stable identifier of the rule that produced the finding.
    pub rule_id: String,
    /// Human-readable description.
    pub description: String,
    #[serde(skip)]
    fix: Option<FixAction>,
}

impl AnalysisResult {
    /// Creates a finding without a fix action.
    #[must_use]
    pub fn new(
        asset: AssetRef,
        severity: Severity,
        rule_id: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            asset,
            severity,
            rule_id: rule_id.into(),
            description: description.into(),
            fix: None,
        }
    }

    /// Attaches a fix action to this finding.
    #[must_use]
    pub fn with_fix(mut self, fix: FixAction) -> Self {
        self.fix = Some(fix);
        self
    }

    /// Returns true if a fix action is attached.
    #[must_use]
    pub fn has_fix(&self) -> bool {
        self.fix.is_some()
    }

    /// Returns the label of the attached fix action, if any.
    #[must_use]
    pub fn fix_label(&self) -> Option<&str> {
        self.fix.as_ref().map(FixAction::label)
    }

    /// Takes the fix action out of the finding for application.
    pub fn take_fix(&mut self) -> Option<FixAction> {
        self.fix.take()
    }
}

/// Result of one completed (or cancelled) scan.
#[derive(Debug, Default, Serialize)]
pub struct ScanReport {
    /// All findings, in asset-discovery order.
    pub results: Vec<AnalysisResult>,
    /// How many assets were actually analyzed.
    pub analyzed: usize,
    /// How many assets discovery produced.
    pub total: usize,
    /// Status message describing how the scan ended.
    pub message: String,
}

impl ScanReport {
    /// Creates an empty report carrying only a status message.
    #[must_use]
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Returns true when every discovered asset was analyzed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.analyzed == self.total
    }

    /// Counts findings per severity as `(critical, errors, warnings, infos)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize, usize) {
        let mut counts = (0, 0, 0, 0);
        for result in &self.results {
            match result.severity {
                Severity::Critical => counts.0 += 1,
                Severity::Error => counts.1 += 1,
                Severity::Warning => counts.2 += 1,
                Severity::Info => counts.3 += 1,
            }
        }
        counts
    }

    /// Returns the worst severity present, or `None` for a clean report.
    #[must_use]
    pub fn worst_severity(&self) -> Option<Severity> {
        self.results.iter().map(|r| r.severity).max()
    }

    /// Checks whether any finding is at or above the given severity.
    #[must_use]
    pub fn has_findings_at(&self, severity: Severity) -> bool {
        self.results.iter().any(|r| r.severity >= severity)
    }

    /// Returns how many findings carry a fix action.
    #[must_use]
    pub fn fixable_count(&self) -> usize {
        self.results.iter().filter(|r| r.has_fix()).count()
    }
}
