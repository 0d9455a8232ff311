use crate::corpus::{keys, Corpus};
use once_cell::sync::Lazy;
use regex::Regex;
use speclens_protocol::{passes, Finding, Severity};
use speclens_scanner::{marker_count, Lexicon};

/// `Language: Rust` or `- **Storage**: PostgreSQL` style declarations.
static DECLARATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?mi)^[\s*-]*(?:\*\*)?(language|framework|storage|testing)(?:\*\*)?\s*:\s*([^\n]{1,120})")
        .expect("declaration pattern")
});

static PLACEHOLDER_VALUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:tbd|todo|n/a|none|-)$").expect("placeholder value pattern"));

/// Technology choices declared in the constitution must be visible in the
/// specification; the constitution itself must carry no open markers.
pub(crate) fn run(corpus: &Corpus, _lexicon: &Lexicon) -> Vec<Finding> {
    let Some(constitution) = corpus.get(keys::CONSTITUTION) else {
        return Vec::new();
    };

    let mut findings = Vec::new();

    if let Some(spec) = corpus.get(keys::SPEC) {
        for capture in DECLARATION_RE.captures_iter(constitution) {
            let key = capture[1].to_lowercase();
            let value = capture[2].trim().trim_matches('*').trim();
            if value.is_empty()
                || PLACEHOLDER_VALUE_RE.is_match(value)
                || value.contains("[NEEDS CLARIFICATION")
            {
                continue;
            }
            // Verbatim means a case-sensitive substring of the spec.
            if !spec.contains(value) {
                findings.push(Finding::new(
                    Severity::Critical,
                    passes::CONSTITUTION,
                    format!(
                        "constitution declares {key} '{value}' but the specification never \
                         mentions it"
                    ),
                ));
            }
        }
    }

    let markers = marker_count(constitution);
    if markers > 0 {
        findings.push(Finding::new(
            Severity::High,
            passes::CONSTITUTION,
            format!("constitution contains {markers} unresolved marker(s)"),
        ));
    }

    findings
}
