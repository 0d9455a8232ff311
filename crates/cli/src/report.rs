use speclens_protocol::{AnalyzeReport, AnswerOutcome, ScanOutcome, Verdict};
use std::fmt::Write;

pub(crate) fn render_scan(outcome: &ScanOutcome) -> String {
    match outcome {
        ScanOutcome::WellSpecified { .. } => {
            "Well-specified: no ambiguities detected.\n".to_string()
        }
        ScanOutcome::Questions {
            candidate_count,
            questions,
            ..
        } => {
            let mut out = String::new();
            let _ = writeln!(
                out,
                "{candidate_count} candidate ambiguit{} found, showing {}:",
                if *candidate_count == 1 { "y" } else { "ies" },
                questions.len()
            );
            for question in questions {
                let _ = writeln!(out, "  {question}");
            }
            out
        }
    }
}

pub(crate) fn render_answer(outcome: &AnswerOutcome) -> String {
    format!("answer applied: {}\n", outcome.applied_at.as_str())
}

pub(crate) fn render_analysis(report: &AnalyzeReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Artifacts:");
    for (key, present) in &report.inventory {
        let _ = writeln!(out, "  {key}: {}", if *present { "present" } else { "absent" });
    }

    if let Some(progress) = report.task_progress {
        let _ = writeln!(
            out,
            "Tasks: {}/{} complete ({}%)",
            progress.completed, progress.total, progress.percent
        );
    }

    match report.verdict {
        Verdict::Clean => {
            let _ = writeln!(out, "No issues found.");
        }
        Verdict::Issues => {
            for group in &report.findings {
                let _ = writeln!(out, "{}:", group.severity.as_str());
                for finding in &group.findings {
                    let _ = writeln!(out, "  [{}] {}", finding.pass, finding.message);
                }
            }
            let returned = report.returned_finding_count();
            if report.total_finding_count > returned {
                let _ = writeln!(
                    out,
                    "Showing {returned} of {} findings.",
                    report.total_finding_count
                );
            } else {
                let _ = writeln!(out, "{returned} finding(s).");
            }
        }
    }

    let _ = writeln!(out, "Passes: {}", report.passes_run.join(", "));
    out
}
