//! Line and document level ambiguity detectors. Each detector is a total,
//! pure function over arbitrary text; patterns are anchored to a single
//! line and bounded to avoid runaway matching.

use crate::lexicon::MARKER_RE;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

/// Bare TODO/TBD tokens outside a full clarification marker.
static BARE_TODO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:TODO|TBD)\b").expect("todo pattern"));

/// ALLCAPS runs of 3+ letters, candidate undefined terms.
static ALLCAPS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z]{3,}\b").expect("allcaps pattern"));

/// `Given … When` on one line; the Then check is separate.
static GIVEN_WHEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bgiven\b[^\n]{0,300}?\bwhen\b").expect("given-when pattern"));

static THEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bthen\b").expect("then pattern"));

/// Byte ranges of every unresolved marker, in document order. The order is
/// stable under repeated scans of unchanged text.
pub fn marker_ranges(text: &str) -> Vec<Range<usize>> {
    MARKER_RE.find_iter(text).map(|m| m.range()).collect()
}

pub fn marker_count(text: &str) -> usize {
    MARKER_RE.find_iter(text).count()
}

/// Detector 1: explicit unresolved marker or a bare TODO/TBD token.
pub(crate) fn has_unresolved_marker(line: &str) -> bool {
    MARKER_RE.is_match(line) || BARE_TODO_RE.is_match(line)
}

/// Detector 3: ALLCAPS tokens not covered by the acronym skip-list.
/// Heading lines are exempt; headings shout by convention.
pub(crate) fn undefined_terms<'a>(line: &'a str, skiplist: &[String]) -> Vec<&'a str> {
    if is_heading(line) {
        return Vec::new();
    }
    ALLCAPS_RE
        .find_iter(line)
        .map(|m| m.as_str())
        .filter(|token| !skiplist.iter().any(|known| known == token))
        .collect()
}

/// Detector 4: a Given/When construct with no Then on the same line.
pub(crate) fn given_when_without_then(line: &str) -> bool {
    match GIVEN_WHEN_RE.find(line) {
        Some(m) => !THEN_RE.is_match(&line[m.end()..]),
        None => false,
    }
}

/// Whole-document check: none of `keywords` appears in the lowercased text.
pub(crate) fn lacks_keywords(text_lower: &str, keywords: &[String]) -> bool {
    !keywords
        .iter()
        .any(|k| text_lower.contains(k.to_lowercase().as_str()))
}

pub(crate) fn is_heading(line: &str) -> bool {
    line.trim_start().starts_with('#')
}
