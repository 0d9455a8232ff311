use crate::aggregate::aggregate;
use crate::corpus::Corpus;
use crate::passes::REGISTRY;
use speclens_protocol::{AnalyzeReport, Finding, Verdict};
use speclens_scanner::Lexicon;

/// Runs every consistency pass over a corpus snapshot and assembles the
/// analyze report. Pure per invocation: the same corpus always yields the
/// same report.
pub struct Analyzer {
    lexicon: Lexicon,
}

impl Analyzer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn analyze(&self, corpus: &Corpus) -> AnalyzeReport {
        let inventory = corpus.inventory();
        let task_progress = corpus.task_progress();

        let mut findings: Vec<Finding> = Vec::new();
        let mut passes_run = Vec::with_capacity(REGISTRY.len());
        for (name, pass) in REGISTRY {
            let emitted = pass(corpus, &self.lexicon);
            log::debug!("pass {name}: {} finding(s)", emitted.len());
            findings.extend(emitted);
            passes_run.push(name.to_string());
        }

        let (groups, total_finding_count) = aggregate(findings);
        let verdict = if total_finding_count == 0 {
            Verdict::Clean
        } else {
            Verdict::Issues
        };
        log::info!("analysis complete: {total_finding_count} finding(s), verdict {verdict:?}");

        AnalyzeReport {
            verdict,
            inventory,
            task_progress,
            findings: groups,
            total_finding_count,
            passes_run,
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(Lexicon::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::keys;
    use pretty_assertions::assert_eq;

    fn solid_corpus() -> Corpus {
        let mut corpus = Corpus::new();
        corpus.insert(
            keys::SPEC,
            "## Requirements\n- FR-001 handles login errors gracefully\n\n\
             ## Acceptance Criteria\nGiven a user When login fails Then an error shows\n\
             p95 latency stays under 200ms\n",
        );
        corpus.insert(
            keys::PLAN,
            "## Delivery\ncovers FR-001 with retries, latency budget 200ms\n",
        );
        corpus.insert(keys::TASKS, "## Delivery\n- [x] wire login error path\n");
        corpus
    }

    #[test]
    fn test_clean_corpus_reports_clean_verdict() {
        let report = Analyzer::default().analyze(&solid_corpus());
        assert_eq!(report.total_finding_count, 0, "{:#?}", report.findings);
        assert_eq!(report.verdict, Verdict::Clean);
        assert!(report.findings.is_empty());
    }

    #[test]
    fn test_all_six_passes_always_run() {
        let report = Analyzer::default().analyze(&Corpus::new());
        assert_eq!(report.passes_run, speclens_protocol::passes::ALL.to_vec());
    }

    #[test]
    fn test_task_progress_included_when_parsable() {
        let report = Analyzer::default().analyze(&solid_corpus());
        let progress = report.task_progress.unwrap();
        assert_eq!((progress.completed, progress.total), (1, 1));
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let corpus = solid_corpus();
        let analyzer = Analyzer::default();
        assert_eq!(analyzer.analyze(&corpus), analyzer.analyze(&corpus));
    }
}
