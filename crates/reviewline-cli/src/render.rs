//! Human-readable rendering of an aggregated result for `--format summary`.

use core::fmt;

use chrono::DateTime;
use reviewline_aggregator::status::{status, summarize};
use reviewline_types::{AggregatedResult, ReviewerStatus, RevisionSummary};

/// Displays a result as an indented revision/reviewer tree.
pub struct SummaryView<'a>(pub &'a AggregatedResult);

impl fmt::Display for SummaryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        let manuscript = &result.manuscript;

        let title = if manuscript.title.is_empty() {
            "(untitled manuscript)"
        } else {
            manuscript.title.as_str()
        };
        match &manuscript.manuscript_id {
            Some(id) => writeln!(f, "{title} [{id}]")?,
            None => writeln!(f, "{title}")?,
        }
        writeln!(
            f,
            "  author: {}  journal: {}",
            or_dash(&manuscript.author),
            or_dash(&manuscript.journal)
        )?;
        writeln!(
            f,
            "  submitted: {}  updated: {}",
            date(manuscript.submitted_at),
            date(manuscript.last_updated_at)
        )?;

        if result.revisions.is_empty() {
            return writeln!(f, "  no review activity");
        }

        for (group, summary) in result.revisions.iter().zip(summarize(result)) {
            writeln!(f)?;
            writeln!(
                f,
                "Revision {} ({})",
                group.revision_number,
                describe_counts(&summary)
            )?;
            for reviewer in &group.reviewers {
                writeln!(
                    f,
                    "  reviewer {:<8} {:<10} invited {:<16}  accepted {:<16}  completed {}",
                    reviewer.reviewer_id.to_string(),
                    status(reviewer).label(),
                    date(reviewer.invited_at),
                    date(reviewer.accepted_at),
                    date(reviewer.completed_at),
                )?;
            }
        }
        Ok(())
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

/// Format a Unix timestamp as `YYYY-MM-DD HH:MM` UTC, `-` when unset.
fn date(timestamp: Option<i64>) -> String {
    timestamp.map_or_else(
        || "-".to_owned(),
        |secs| {
            DateTime::from_timestamp(secs, 0)
                .map_or_else(|| secs.to_string(), |dt| dt.format("%Y-%m-%d %H:%M").to_string())
        },
    )
}

fn describe_counts(summary: &RevisionSummary) -> String {
    let counts = ReviewerStatus::ALL.into_iter().filter_map(|s| {
        let count = match s {
            ReviewerStatus::Invited => summary.invited,
            ReviewerStatus::Accepted => summary.accepted,
            ReviewerStatus::Completed => summary.completed,
            ReviewerStatus::Unknown => summary.unknown,
        };
        (count > 0).then(|| format!("{count} {}", s.label()))
    });
    counts.collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use reviewline_aggregator::aggregate;
    use reviewline_types::{EventKind, ManuscriptMeta, ReviewEvent, ReviewerId, RevisionNumber};

    use super::*;

    #[test]
    fn renders_tree_in_result_order() {
        let result = aggregate(
            ManuscriptMeta {
                manuscript_id: Some("MS-9".to_owned()),
                title: "Tidal Locking".to_owned(),
                author: "P. Nakamura".to_owned(),
                journal: "Orbital Letters".to_owned(),
                submitted_at: Some(0),
                last_updated_at: None,
            },
            &[
                ReviewEvent {
                    timestamp: 86_400,
                    kind: EventKind::Invited,
                    revision_number: RevisionNumber(1),
                    reviewer_id: ReviewerId(11),
                },
                ReviewEvent {
                    timestamp: 172_800,
                    kind: EventKind::Completed,
                    revision_number: RevisionNumber(1),
                    reviewer_id: ReviewerId(12),
                },
            ],
        );

        let text = SummaryView(&result).to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.first().copied(), Some("Tidal Locking [MS-9]"));
        assert!(text.contains("submitted: 1970-01-01 00:00  updated: -"));
        assert!(text.contains("Revision 1 (1 invited, 1 completed)"));

        let eleven = lines.iter().position(|l| l.contains("reviewer 11"));
        let twelve = lines.iter().position(|l| l.contains("reviewer 12"));
        assert!(eleven < twelve);
        assert!(text.contains("invited 1970-01-02 00:00"));
    }

    #[test]
    fn empty_result_says_so() {
        let result = aggregate(ManuscriptMeta::default(), &[]);
        let text = SummaryView(&result).to_string();
        assert!(text.starts_with("(untitled manuscript)"));
        assert!(text.contains("no review activity"));
    }
}
