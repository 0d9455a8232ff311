use crate::corpus::{keys, Corpus};
use once_cell::sync::Lazy;
use regex::Regex;
use speclens_protocol::{passes, Finding, Severity};
use speclens_scanner::Lexicon;

static REQUIREMENTS_HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mi)^#{1,6}[^\n]{0,100}requirements").expect("heading pattern"));

const ACCEPTANCE_INDICATORS: [&str; 3] = ["acceptance criteria", "acceptance scenario", "given"];

/// Structural completeness of the core artifact trio.
pub(crate) fn run(corpus: &Corpus, _lexicon: &Lexicon) -> Vec<Finding> {
    let mut findings = Vec::new();

    match corpus.get(keys::SPEC) {
        None => findings.push(Finding::new(
            Severity::Critical,
            passes::UNDERSPECIFICATION,
            "specification document is missing",
        )),
        Some(spec) => {
            let spec_lower = spec.to_lowercase();
            if !ACCEPTANCE_INDICATORS
                .iter()
                .any(|marker| spec_lower.contains(marker))
            {
                findings.push(Finding::new(
                    Severity::High,
                    passes::UNDERSPECIFICATION,
                    "specification has no acceptance criteria",
                ));
            }
            if !REQUIREMENTS_HEADING_RE.is_match(spec) {
                findings.push(Finding::new(
                    Severity::High,
                    passes::UNDERSPECIFICATION,
                    "specification has no requirements section",
                ));
            }
        }
    }

    if !corpus.contains(keys::PLAN) {
        findings.push(Finding::new(
            Severity::Medium,
            passes::UNDERSPECIFICATION,
            "plan document is missing",
        ));
    }
    if !corpus.contains(keys::TASKS) {
        findings.push(Finding::new(
            Severity::Medium,
            passes::UNDERSPECIFICATION,
            "tasks document is missing",
        ));
    }

    findings
}
