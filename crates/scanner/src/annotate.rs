use crate::detectors::marker_ranges;
use crate::error::{Result, ScanError};
use speclens_protocol::{AnswerOutcome, AppliedAt};

/// Resolve one unresolved marker by zero-based occurrence index.
///
/// In range: the addressed occurrence is replaced with a `[CLARIFIED: …]`
/// annotation and every other byte of the document is unchanged. Out of
/// range: the original text gains a dated clarifications section at the end
/// and the outcome reports `appended` instead of failing. `date` is a
/// caller-supplied `YYYY-MM-DD` stamp so the transformation stays pure.
pub fn apply_answer(
    text: &str,
    marker_index: usize,
    answer: &str,
    date: &str,
) -> Result<AnswerOutcome> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Err(ScanError::EmptyAnswer);
    }

    let ranges = marker_ranges(text);
    match ranges.get(marker_index) {
        Some(range) => {
            let mut document = String::with_capacity(text.len() + answer.len());
            document.push_str(&text[..range.start]);
            document.push_str("[CLARIFIED: ");
            document.push_str(answer);
            document.push(']');
            document.push_str(&text[range.end..]);
            log::debug!(
                "answer applied inline at marker {marker_index} (byte {})",
                range.start
            );
            Ok(AnswerOutcome {
                document,
                applied_at: AppliedAt::Inline,
            })
        }
        None => {
            log::debug!(
                "marker index {marker_index} beyond {} occurrences, appending",
                ranges.len()
            );
            let mut document = text.to_string();
            if !document.is_empty() && !document.ends_with('\n') {
                document.push('\n');
            }
            document.push_str(&format!("\n## Clarifications ({date})\n\n- {answer}\n"));
            Ok(AnswerOutcome {
                document,
                applied_at: AppliedAt::Appended,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DOC: &str = "intro [NEEDS CLARIFICATION: a]\nmid [NEEDS CLARIFICATION: b]\nend\n";

    #[test]
    fn test_inline_replaces_only_addressed_marker() {
        let outcome = apply_answer(DOC, 1, "use OAuth", "2026-08-27").unwrap();
        assert_eq!(outcome.applied_at, AppliedAt::Inline);
        assert_eq!(
            outcome.document,
            "intro [NEEDS CLARIFICATION: a]\nmid [CLARIFIED: use OAuth]\nend\n"
        );
    }

    #[test]
    fn test_out_of_range_appends_dated_section() {
        let outcome = apply_answer(DOC, 9, "late answer", "2026-08-27").unwrap();
        assert_eq!(outcome.applied_at, AppliedAt::Appended);
        assert!(outcome.document.starts_with(DOC));
        assert!(outcome
            .document
            .ends_with("\n## Clarifications (2026-08-27)\n\n- late answer\n"));
    }

    #[test]
    fn test_repeated_answers_never_disturb_prior_resolutions() {
        let first = apply_answer(DOC, 0, "first", "2026-08-27").unwrap();
        let second = apply_answer(&first.document, 0, "second", "2026-08-27").unwrap();
        assert!(second.document.contains("[CLARIFIED: first]"));
        assert!(second.document.contains("[CLARIFIED: second]"));
        assert!(!second.document.contains("NEEDS CLARIFICATION"));
    }

    #[test]
    fn test_empty_answer_rejected_without_mutation() {
        assert!(apply_answer(DOC, 0, "   ", "2026-08-27").is_err());
    }

    #[test]
    fn test_append_on_document_without_trailing_newline() {
        let outcome = apply_answer("no markers here", 0, "x", "2026-08-27").unwrap();
        assert_eq!(outcome.applied_at, AppliedAt::Appended);
        assert!(outcome
            .document
            .starts_with("no markers here\n\n## Clarifications"));
    }
}
