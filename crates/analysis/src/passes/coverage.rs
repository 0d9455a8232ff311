use crate::corpus::{keys, Corpus};
use once_cell::sync::Lazy;
use regex::Regex;
use speclens_protocol::{passes, Finding, Severity};
use speclens_scanner::Lexicon;

/// `FR-001` / `NFR-012` requirement identifiers.
static REQUIREMENT_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:FR|NFR)-\d{1,4}\b").expect("requirement id pattern"));

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#{1,6}\s+([^\n]{1,120})").expect("heading pattern"));

const MAX_LISTED_IDS: usize = 5;
const MAX_LISTED_HEADINGS: usize = 3;

/// Spec requirement IDs must appear in the plan; plan sections must be
/// reflected in the task list.
pub(crate) fn run(corpus: &Corpus, _lexicon: &Lexicon) -> Vec<Finding> {
    let mut findings = Vec::new();

    if let (Some(spec), Some(plan)) = (corpus.get(keys::SPEC), corpus.get(keys::PLAN)) {
        let missing: Vec<&str> = dedup_ids(spec)
            .into_iter()
            .filter(|id| !plan.contains(id))
            .collect();
        if !missing.is_empty() {
            findings.push(Finding::new(
                Severity::High,
                passes::COVERAGE,
                format!(
                    "requirement(s) not covered by the plan: {}",
                    truncated_list(&missing, MAX_LISTED_IDS)
                ),
            ));
        }
    }

    if let (Some(plan), Some(tasks)) = (corpus.get(keys::PLAN), corpus.get(keys::TASKS)) {
        let tasks_lower = tasks.to_lowercase();
        let missing: Vec<&str> = HEADING_RE
            .captures_iter(plan)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().trim())
            .filter(|heading| !heading.is_empty())
            .filter(|heading| !tasks_lower.contains(heading.to_lowercase().as_str()))
            .collect();
        if !missing.is_empty() {
            findings.push(Finding::new(
                Severity::Medium,
                passes::COVERAGE,
                format!(
                    "plan section(s) not reflected in tasks: {}",
                    truncated_list(&missing, MAX_LISTED_HEADINGS)
                ),
            ));
        }
    }

    findings
}

/// First occurrence order, duplicates dropped.
fn dedup_ids(text: &str) -> Vec<&str> {
    let mut seen = Vec::new();
    for m in REQUIREMENT_ID_RE.find_iter(text) {
        if !seen.contains(&m.as_str()) {
            seen.push(m.as_str());
        }
    }
    seen
}

fn truncated_list(items: &[&str], max: usize) -> String {
    let shown = items.iter().take(max).copied().collect::<Vec<_>>().join(", ");
    if items.len() > max {
        format!("{shown} (and {} more)", items.len() - max)
    } else {
        shown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_uncovered_requirement_is_high() {
        let mut corpus = Corpus::new();
        corpus.insert(keys::SPEC, "- FR-001 login\n- FR-002 logout\n");
        corpus.insert(keys::PLAN, "implements FR-001 only\n");
        let findings = run(&corpus, &Lexicon::default());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::High);
        assert!(findings[0].message.contains("FR-002"));
        assert!(!findings[0].message.contains("FR-001"));
    }

    #[test]
    fn test_id_list_display_truncates_past_five() {
        let mut corpus = Corpus::new();
        let spec: String = (1..=8).map(|i| format!("- FR-00{i} item\n")).collect();
        corpus.insert(keys::SPEC, spec);
        corpus.insert(keys::PLAN, "no ids at all\n");
        let findings = run(&corpus, &Lexicon::default());
        assert!(findings[0].message.contains("(and 3 more)"));
    }

    #[test]
    fn test_plan_heading_missing_from_tasks_is_medium() {
        let mut corpus = Corpus::new();
        corpus.insert(keys::PLAN, "## Data Migration\n## Rollout\n");
        corpus.insert(keys::TASKS, "- [ ] prepare data migration scripts\n");
        let findings = run(&corpus, &Lexicon::default());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Medium);
        assert!(findings[0].message.contains("Rollout"));
    }

    #[test]
    fn test_missing_plan_disables_both_checks() {
        let mut corpus = Corpus::new();
        corpus.insert(keys::SPEC, "- FR-001 login\n");
        corpus.insert(keys::TASKS, "- [ ] anything\n");
        assert!(run(&corpus, &Lexicon::default()).is_empty());
    }
}
