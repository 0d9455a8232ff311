use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const PROTOCOL_SCHEMA_VERSION: u32 = 1;

/// Maximum number of clarification questions returned by a scan.
pub const MAX_QUESTIONS: usize = 5;

/// Maximum number of findings returned by an analysis run.
pub const MAX_FINDINGS: usize = 50;

/// Names of the consistency passes, in execution order.
pub mod passes {
    pub const DUPLICATION: &str = "duplication";
    pub const AMBIGUITY: &str = "ambiguity";
    pub const UNDERSPECIFICATION: &str = "underspecification";
    pub const CONSTITUTION: &str = "constitution";
    pub const COVERAGE: &str = "coverage";
    pub const INCONSISTENCY: &str = "inconsistency";

    pub const ALL: [&str; 6] = [
        DUPLICATION,
        AMBIGUITY,
        UNDERSPECIFICATION,
        CONSTITUTION,
        COVERAGE,
        INCONSISTENCY,
    ];
}

/// Finding severity. Variant order is rank order: sorting severities sorts
/// findings from most to least severe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub const fn rank(self) -> u8 {
        self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
        }
    }
}

/// One reported issue from a consistency pass. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Finding {
    pub severity: Severity,
    pub pass: String,
    pub message: String,
}

impl Finding {
    pub fn new(severity: Severity, pass: &str, message: impl Into<String>) -> Self {
        Self {
            severity,
            pass: pass.to_string(),
            message: message.into(),
        }
    }
}

/// Result of scanning one specification document for ambiguities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScanOutcome {
    /// Candidate ambiguities were found; `questions` holds at most
    /// [`MAX_QUESTIONS`] rendered entries, `candidate_count` the
    /// deduplicated total before the cap.
    Questions {
        candidate_count: usize,
        taxonomy: Vec<String>,
        questions: Vec<String>,
    },
    /// No ambiguities detected. A distinct outcome, not an empty list.
    WellSpecified { taxonomy: Vec<String> },
}

/// Where an answer landed in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AppliedAt {
    Inline,
    Appended,
}

impl AppliedAt {
    pub const fn as_str(self) -> &'static str {
        match self {
            AppliedAt::Inline => "inline",
            AppliedAt::Appended => "appended",
        }
    }
}

/// Result of applying one answer to a specification document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AnswerOutcome {
    pub document: String,
    pub applied_at: AppliedAt,
}

/// Checkbox completion state extracted from the tasks document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TaskProgress {
    pub completed: usize,
    pub total: usize,
    pub percent: u8,
}

impl TaskProgress {
    pub fn from_counts(completed: usize, total: usize) -> Option<Self> {
        if total == 0 {
            return None;
        }
        Some(Self {
            completed,
            total,
            percent: (completed * 100 / total) as u8,
        })
    }
}

/// Findings sharing one severity, in stable pass order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SeverityGroup {
    pub severity: Severity,
    pub findings: Vec<Finding>,
}

/// Overall verdict of an analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// No issues found across all passes.
    Clean,
    Issues,
}

/// Full response of the analyze operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AnalyzeReport {
    pub verdict: Verdict,
    /// Presence of each canonical artifact key plus any extra supplied keys.
    pub inventory: BTreeMap<String, bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_progress: Option<TaskProgress>,
    /// Severity-grouped findings, capped at [`MAX_FINDINGS`] in total.
    pub findings: Vec<SeverityGroup>,
    /// True finding count before the cap.
    pub total_finding_count: usize,
    pub passes_run: Vec<String>,
}

impl AnalyzeReport {
    pub fn returned_finding_count(&self) -> usize {
        self.findings.iter().map(|g| g.findings.len()).sum()
    }
}

/// Structured error surfaced to callers instead of a crash.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_severity_rank_order() {
        assert!(Severity::Critical < Severity::High);
        assert!(Severity::High < Severity::Medium);
        assert!(Severity::Medium < Severity::Low);
        assert_eq!(Severity::Critical.rank(), 0);
        assert_eq!(Severity::Low.rank(), 3);
    }

    #[test]
    fn test_severity_serializes_uppercase() {
        let json = serde_json::to_string(&Severity::High).unwrap();
        assert_eq!(json, "\"HIGH\"");
    }

    #[test]
    fn test_scan_outcome_tagging() {
        let outcome = ScanOutcome::WellSpecified { taxonomy: vec![] };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "well_specified");
    }

    #[test]
    fn test_task_progress_percent() {
        let progress = TaskProgress::from_counts(3, 8).unwrap();
        assert_eq!(progress.percent, 37);
        assert!(TaskProgress::from_counts(0, 0).is_none());
    }

    #[test]
    fn test_pass_order_is_fixed() {
        assert_eq!(passes::ALL.len(), 6);
        assert_eq!(passes::ALL[0], passes::DUPLICATION);
        assert_eq!(passes::ALL[5], passes::INCONSISTENCY);
    }
}
