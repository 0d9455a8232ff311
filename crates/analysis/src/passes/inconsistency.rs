use crate::corpus::Corpus;
use once_cell::sync::Lazy;
use regex::Regex;
use speclens_protocol::{passes, Finding, Severity};
use speclens_scanner::Lexicon;
use std::collections::BTreeMap;

/// Number followed by a letter run or `%`. The letter run is bounded; the
/// unit whitelist from the lexicon decides what actually counts.
static VALUE_UNIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d+(?:\.\d+)?)\s*([A-Za-z]{1,8}|%)").expect("value-unit pattern"));

/// Cross-artifact numeric drift: the same unit carrying different values in
/// different documents. Units are bucketed by raw lowercased string; `s`
/// and `ms` are never compared.
pub(crate) fn run(corpus: &Corpus, lexicon: &Lexicon) -> Vec<Finding> {
    // unit -> value -> artifacts, all BTree for deterministic output
    let mut buckets: BTreeMap<String, BTreeMap<String, Vec<String>>> = BTreeMap::new();

    for (key, text) in corpus.iter() {
        for capture in VALUE_UNIT_RE.captures_iter(text) {
            let unit = capture[2].to_lowercase();
            if !lexicon.units.contains(&unit) {
                continue;
            }
            let artifacts = buckets
                .entry(unit)
                .or_default()
                .entry(capture[1].to_string())
                .or_default();
            if !artifacts.contains(&key.to_string()) {
                artifacts.push(key.to_string());
            }
        }
    }

    let mut findings = Vec::new();
    for (unit, values) in buckets {
        if values.len() < 2 {
            continue;
        }
        let distinct_artifacts: usize = {
            let mut all: Vec<&String> = values.values().flatten().collect();
            all.sort();
            all.dedup();
            all.len()
        };
        if distinct_artifacts < 2 {
            continue;
        }
        let listing = values
            .iter()
            .map(|(value, artifacts)| format!("{value}{unit} ({})", artifacts.join(", ")))
            .collect::<Vec<_>>()
            .join(", ");
        findings.push(Finding::new(
            Severity::Medium,
            passes::INCONSISTENCY,
            format!("conflicting '{unit}' values across artifacts: {listing}"),
        ));
    }
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::keys;

    #[test]
    fn test_conflicting_latency_values_flagged() {
        let mut corpus = Corpus::new();
        corpus.insert(keys::SPEC, "responses arrive under 200ms\n");
        corpus.insert(keys::PLAN, "we target 500ms end to end\n");
        let findings = run(&corpus, &Lexicon::default());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Medium);
        assert!(findings[0].message.contains("200ms (spec)"));
        assert!(findings[0].message.contains("500ms (plan)"));
    }

    #[test]
    fn test_same_value_everywhere_is_quiet() {
        let mut corpus = Corpus::new();
        corpus.insert(keys::SPEC, "under 200ms\n");
        corpus.insert(keys::PLAN, "also 200ms\n");
        assert!(run(&corpus, &Lexicon::default()).is_empty());
    }

    #[test]
    fn test_two_values_in_one_artifact_is_quiet() {
        let mut corpus = Corpus::new();
        corpus.insert(keys::SPEC, "cold start 500ms, warm path 200ms\n");
        assert!(run(&corpus, &Lexicon::default()).is_empty());
    }

    #[test]
    fn test_units_never_cross_compared() {
        let mut corpus = Corpus::new();
        corpus.insert(keys::SPEC, "timeout 2s\n");
        corpus.insert(keys::PLAN, "timeout 2000ms\n");
        assert!(run(&corpus, &Lexicon::default()).is_empty());
    }

    #[test]
    fn test_unlisted_units_ignored() {
        let mut corpus = Corpus::new();
        corpus.insert(keys::SPEC, "about 3 widgets\n");
        corpus.insert(keys::PLAN, "about 5 widgets\n");
        assert!(run(&corpus, &Lexicon::default()).is_empty());
    }
}
