use crate::corpus::Corpus;
use regex::Regex;
use speclens_protocol::{passes, Finding, Severity};
use speclens_scanner::{marker_count, Lexicon};

/// Ordinary prose uses vague words too; only counts above this flood
/// threshold are worth a finding.
const VAGUE_FLOOD_THRESHOLD: usize = 3;

/// Per-artifact counts of unresolved markers, broader placeholder tokens,
/// and vague quantifiers.
pub(crate) fn run(corpus: &Corpus, lexicon: &Lexicon) -> Vec<Finding> {
    let vague_re = lexicon.vague_regex();
    let (word_re, symbol_tokens) = placeholder_matchers(lexicon);

    let mut findings = Vec::new();
    for (key, text) in corpus.iter() {
        let markers = marker_count(text);
        if markers > 0 {
            findings.push(Finding::new(
                Severity::High,
                passes::AMBIGUITY,
                format!(
                    "artifact '{key}' contains {markers} unresolved [NEEDS CLARIFICATION] \
                     marker(s)"
                ),
            ));
        }

        let placeholders = word_re
            .as_ref()
            .map(|re| re.find_iter(text).count())
            .unwrap_or(0)
            + symbol_tokens
                .iter()
                .map(|token| text.matches(token.as_str()).count())
                .sum::<usize>();
        if placeholders > 0 {
            findings.push(Finding::new(
                Severity::Medium,
                passes::AMBIGUITY,
                format!("artifact '{key}' contains {placeholders} placeholder token(s)"),
            ));
        }

        let vague = vague_re.find_iter(text).count();
        if vague > VAGUE_FLOOD_THRESHOLD {
            findings.push(Finding::new(
                Severity::Low,
                passes::AMBIGUITY,
                format!("artifact '{key}' uses {vague} vague quantifier(s)"),
            ));
        }
    }
    findings
}

/// Word tokens get boundary-anchored matching; pure-symbol tokens such as
/// `???` cannot sit behind `\b` and are counted literally.
fn placeholder_matchers(lexicon: &Lexicon) -> (Option<Regex>, Vec<String>) {
    let (words, symbols): (Vec<&String>, Vec<&String>) = lexicon
        .placeholder_tokens
        .iter()
        .partition(|t| t.chars().all(|c| c.is_ascii_alphanumeric()));
    let word_re = (!words.is_empty()).then(|| {
        let alternation = words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"\b(?:{alternation})\b")).expect("placeholder pattern")
    });
    (word_re, symbols.into_iter().cloned().collect())
}
