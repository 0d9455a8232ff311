use crate::detectors;
use crate::lexicon::{Category, Lexicon};
use regex::Regex;
use speclens_protocol::{ScanOutcome, MAX_QUESTIONS};
use std::collections::HashSet;

const MAX_EXCERPT_CHARS: usize = 80;

/// One candidate ambiguity. `line` is 1-based; 0 means document-level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguityCandidate {
    pub line: usize,
    pub category: Category,
    pub excerpt: String,
}

/// Scans a single specification document for ambiguities and renders a
/// prioritized, capped question list. Scanning is a pure function of the
/// text: identical input yields identical output.
pub struct Scanner {
    lexicon: Lexicon,
    vague_re: Regex,
}

impl Scanner {
    pub fn new(lexicon: Lexicon) -> Self {
        let vague_re = lexicon.vague_regex();
        Self { lexicon, vague_re }
    }

    pub fn scan(&self, text: &str) -> ScanOutcome {
        let candidates = self.collect_candidates(text);
        log::debug!("scan: {} candidates after dedup", candidates.len());

        if candidates.is_empty() {
            return ScanOutcome::WellSpecified {
                taxonomy: Category::labels(),
            };
        }

        let candidate_count = candidates.len();
        let questions = render_questions(&candidates);
        ScanOutcome::Questions {
            candidate_count,
            taxonomy: Category::labels(),
            questions,
        }
    }

    /// Runs all detectors, dedupes by (category, excerpt) preserving
    /// first-seen order, then stable-sorts by taxonomy priority.
    pub fn collect_candidates(&self, text: &str) -> Vec<AmbiguityCandidate> {
        let mut candidates = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            if detectors::has_unresolved_marker(line) {
                candidates.push(candidate(line_no, Category::MissingAcceptanceCriteria, line));
            }
            if self.vague_re.is_match(line) {
                candidates.push(candidate(line_no, Category::VagueQuantifiers, line));
            }
            // Marker text is ALLCAPS itself; drop it before term detection.
            let stripped = crate::lexicon::MARKER_RE.replace_all(line, "");
            for term in detectors::undefined_terms(&stripped, &self.lexicon.acronym_skiplist) {
                candidates.push(candidate(line_no, Category::UndefinedTerms, term));
            }
            if detectors::given_when_without_then(line) {
                candidates.push(candidate(line_no, Category::MissingAcceptanceCriteria, line));
            }
        }

        let text_lower = text.to_lowercase();
        if detectors::lacks_keywords(&text_lower, &self.lexicon.error_keywords) {
            candidates.push(candidate(
                0,
                Category::MissingErrorHandling,
                "no error or failure handling language found",
            ));
        }
        if detectors::lacks_keywords(&text_lower, &self.lexicon.nfr_keywords) {
            candidates.push(candidate(
                0,
                Category::MissingNonFunctional,
                "no non-functional requirements language found",
            ));
        }

        let mut seen: HashSet<(Category, String)> = HashSet::new();
        candidates.retain(|c| seen.insert((c.category, c.excerpt.clone())));
        candidates.sort_by_key(|c| c.category.priority());
        candidates
    }
}

fn candidate(line: usize, category: Category, excerpt: &str) -> AmbiguityCandidate {
    AmbiguityCandidate {
        line,
        category,
        excerpt: clip_excerpt(excerpt),
    }
}

fn clip_excerpt(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut cut = trimmed.len();
    for (seen, (idx, _)) in trimmed.char_indices().enumerate() {
        if seen == MAX_EXCERPT_CHARS {
            cut = idx;
            break;
        }
    }
    trimmed[..cut].to_string()
}

fn render_questions(candidates: &[AmbiguityCandidate]) -> Vec<String> {
    candidates
        .iter()
        .take(MAX_QUESTIONS)
        .enumerate()
        .map(|(i, c)| {
            let n = i + 1;
            let category = c.category.as_str();
            if c.line == 0 {
                format!(
                    "Q{n} [{category}]: Regarding \"{}\" — please clarify",
                    c.excerpt
                )
            } else {
                format!(
                    "Q{n} [{category}] (line {}): Regarding \"{}\" — please clarify",
                    c.line, c.excerpt
                )
            }
        })
        .collect()
}
