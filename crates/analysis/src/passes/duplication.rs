use crate::corpus::Corpus;
use speclens_protocol::{passes, Finding, Severity};
use speclens_scanner::Lexicon;
use std::collections::HashSet;

/// List items shorter than this carry too little signal to call duplicates.
const MIN_REQUIREMENT_CHARS: usize = 12;

/// Flags requirement-like list lines shared verbatim (after normalization)
/// between any two present artifacts.
pub(crate) fn run(corpus: &Corpus, _lexicon: &Lexicon) -> Vec<Finding> {
    let extracted: Vec<(&str, HashSet<String>)> = corpus
        .iter()
        .map(|(key, text)| (key, requirement_lines(text)))
        .collect();

    let mut findings = Vec::new();
    for (i, (left_key, left_lines)) in extracted.iter().enumerate() {
        for (right_key, right_lines) in extracted.iter().skip(i + 1) {
            let shared = left_lines.intersection(right_lines).count();
            if shared > 0 {
                findings.push(Finding::new(
                    Severity::Medium,
                    passes::DUPLICATION,
                    format!(
                        "artifacts '{left_key}' and '{right_key}' share {shared} duplicated \
                         requirement line(s)"
                    ),
                ));
            }
        }
    }
    findings
}

/// List-item lines above the minimum length, trimmed and lowercased.
fn requirement_lines(text: &str) -> HashSet<String> {
    text.lines()
        .filter_map(|line| {
            let trimmed = line.trim_start();
            let body = trimmed
                .strip_prefix("- ")
                .or_else(|| trimmed.strip_prefix("* "))?;
            let normalized = body.trim().to_lowercase();
            (normalized.len() >= MIN_REQUIREMENT_CHARS).then_some(normalized)
        })
        .collect()
}
