use speclens_protocol::{Finding, SeverityGroup, MAX_FINDINGS};

/// Stable-sorts findings by severity rank (ties keep pass order), caps the
/// list at [`MAX_FINDINGS`] while reporting the true total, and groups the
/// survivors by severity for presentation.
pub fn aggregate(mut findings: Vec<Finding>) -> (Vec<SeverityGroup>, usize) {
    let total = findings.len();
    findings.sort_by_key(|f| f.severity.rank());
    findings.truncate(MAX_FINDINGS);

    let mut groups: Vec<SeverityGroup> = Vec::new();
    for finding in findings {
        match groups.last_mut() {
            Some(group) if group.severity == finding.severity => group.findings.push(finding),
            _ => groups.push(SeverityGroup {
                severity: finding.severity,
                findings: vec![finding],
            }),
        }
    }
    (groups, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use speclens_protocol::Severity;

    fn finding(severity: Severity, message: &str) -> Finding {
        Finding::new(severity, "test", message)
    }

    #[test]
    fn test_sorted_by_rank_with_stable_ties() {
        let (groups, total) = aggregate(vec![
            finding(Severity::Low, "l1"),
            finding(Severity::Critical, "c1"),
            finding(Severity::Low, "l2"),
            finding(Severity::High, "h1"),
        ]);
        assert_eq!(total, 4);
        let severities: Vec<_> = groups.iter().map(|g| g.severity).collect();
        assert_eq!(
            severities,
            vec![Severity::Critical, Severity::High, Severity::Low]
        );
        let low = &groups[2].findings;
        assert_eq!(low[0].message, "l1");
        assert_eq!(low[1].message, "l2");
    }

    #[test]
    fn test_capped_at_fifty_with_true_total() {
        let findings: Vec<_> = (0..80)
            .map(|i| finding(Severity::Medium, &format!("m{i}")))
            .collect();
        let (groups, total) = aggregate(findings);
        assert_eq!(total, 80);
        let returned: usize = groups.iter().map(|g| g.findings.len()).sum();
        assert_eq!(returned, MAX_FINDINGS);
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        let (groups, total) = aggregate(Vec::new());
        assert!(groups.is_empty());
        assert_eq!(total, 0);
    }
}
