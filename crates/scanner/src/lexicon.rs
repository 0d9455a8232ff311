use crate::error::{Result, ScanError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Unresolved-decision marker. The body is bounded so adversarial input
/// cannot drag the match across lines or very long spans.
pub static MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[NEEDS CLARIFICATION(?::[^\]\n]{0,200})?\]").expect("marker pattern")
});

/// The nine ambiguity categories, in fixed priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    MissingAcceptanceCriteria,
    MissingErrorHandling,
    MissingNonFunctional,
    UndefinedTerms,
    VagueQuantifiers,
    AmbiguousActors,
    UnboundedLists,
    ConflictingRequirements,
    OpenDecisions,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::MissingAcceptanceCriteria,
        Category::MissingErrorHandling,
        Category::MissingNonFunctional,
        Category::UndefinedTerms,
        Category::VagueQuantifiers,
        Category::AmbiguousActors,
        Category::UnboundedLists,
        Category::ConflictingRequirements,
        Category::OpenDecisions,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Category::MissingAcceptanceCriteria => "Missing acceptance criteria",
            Category::MissingErrorHandling => "Missing error handling",
            Category::MissingNonFunctional => "Missing non-functional requirements",
            Category::UndefinedTerms => "Undefined terms",
            Category::VagueQuantifiers => "Vague quantifiers",
            Category::AmbiguousActors => "Ambiguous actors",
            Category::UnboundedLists => "Unbounded lists",
            Category::ConflictingRequirements => "Conflicting requirements",
            Category::OpenDecisions => "Open decisions",
        }
    }

    /// Position in the fixed taxonomy order; lower sorts first.
    pub const fn priority(self) -> usize {
        self as usize
    }

    pub fn labels() -> Vec<String> {
        Self::ALL.iter().map(|c| c.as_str().to_string()).collect()
    }
}

/// Immutable word lists driving the detectors. Built once and passed into
/// the engine; the CLI may replace individual lists from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    /// Words that quantify without committing to anything testable.
    pub vague_words: Vec<String>,
    /// Hand-maintained acronyms the undefined-term detector must not flag.
    /// Domain acronyms outside this list will false-positive; accepted.
    pub acronym_skiplist: Vec<String>,
    /// Presence of any of these anywhere means the document addresses
    /// error/failure handling.
    pub error_keywords: Vec<String>,
    /// Presence of any of these means non-functional requirements exist.
    pub nfr_keywords: Vec<String>,
    /// Placeholder tokens counted by the ambiguity consistency pass.
    pub placeholder_tokens: Vec<String>,
    /// Measurement units recognized by the inconsistency pass.
    pub units: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            vague_words: to_strings(&[
                "some",
                "several",
                "many",
                "few",
                "various",
                "often",
                "usually",
                "typically",
                "approximately",
                "roughly",
                "might",
                "could",
                "possibly",
                "appropriate",
                "reasonable",
                "sufficient",
                "etc",
            ]),
            acronym_skiplist: to_strings(&[
                "API", "CLI", "CPU", "CRUD", "CSS", "CSV", "DNS", "FAQ", "FIXME", "GDPR", "GPU",
                "HTML", "HTTP", "HTTPS", "IDE", "JSON", "JWT", "MVP", "PDF", "RAM", "REST", "SDK",
                "SLA", "SQL", "SSH", "SSO", "TBD", "TCP", "TLS", "TODO", "URI", "URL", "UTF",
                "UUID", "XML", "XXX", "YAML",
            ]),
            error_keywords: to_strings(&[
                "error",
                "failure",
                "fail",
                "exception",
                "invalid",
                "edge case",
                "fallback",
            ]),
            nfr_keywords: to_strings(&[
                "performance",
                "latency",
                "throughput",
                "availability",
                "reliability",
                "scalability",
                "security",
                "response time",
            ]),
            placeholder_tokens: to_strings(&["TODO", "TBD", "FIXME", "XXX", "???"]),
            units: to_strings(&[
                "ms", "s", "sec", "seconds", "minutes", "hours", "kb", "mb", "gb", "tb", "rps",
                "qps", "%",
            ]),
        }
    }
}

impl Lexicon {
    /// Parse a TOML override. Absent keys keep their defaults.
    pub fn from_toml(raw: &str) -> Result<Self> {
        let lexicon: Lexicon = toml::from_str(raw)?;
        if lexicon.vague_words.is_empty() {
            return Err(ScanError::InvalidLexicon("empty vague_words list".into()));
        }
        Ok(lexicon)
    }

    /// Word-boundary alternation over the vague-word list, case-insensitive.
    pub fn vague_regex(&self) -> Regex {
        let alternation = self
            .vague_words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"(?i)\b({alternation})\b")).expect("vague-word pattern")
    }
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_has_nine_labels_in_priority_order() {
        let labels = Category::labels();
        assert_eq!(labels.len(), 9);
        assert_eq!(labels[0], "Missing acceptance criteria");
        assert_eq!(labels[8], "Open decisions");
        assert_eq!(Category::VagueQuantifiers.priority(), 4);
    }

    #[test]
    fn test_marker_regex_matches_both_forms() {
        assert!(MARKER_RE.is_match("[NEEDS CLARIFICATION]"));
        assert!(MARKER_RE.is_match("[NEEDS CLARIFICATION: which auth method?]"));
        assert!(!MARKER_RE.is_match("[NEEDS CLARIFICATION: spans\nlines]"));
    }

    #[test]
    fn test_lexicon_toml_override_keeps_defaults() {
        let lexicon = Lexicon::from_toml("vague_words = [\"handwavy\"]").unwrap();
        assert_eq!(lexicon.vague_words, vec!["handwavy"]);
        assert!(lexicon.acronym_skiplist.contains(&"API".to_string()));
    }

    #[test]
    fn test_lexicon_rejects_empty_vague_list() {
        assert!(Lexicon::from_toml("vague_words = []").is_err());
    }
}
