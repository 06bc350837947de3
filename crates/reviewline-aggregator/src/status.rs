//! Derived reviewer status and per-revision summaries.
//!
//! Status is a strict precedence chain over which lifecycle timestamps are
//! set: `Completed`, then `Accepted`, then `Invited`, else `Unknown`. The
//! timestamps themselves are never compared, so a completed reviewer reports
//! `Completed` even if its acceptance timestamp is later than its completion.

use reviewline_types::{AggregatedResult, ReviewerState, ReviewerStatus, RevisionSummary};

/// Derive the display status of a reviewer.
pub const fn status(reviewer: &ReviewerState) -> ReviewerStatus {
    if reviewer.completed_at.is_some() {
        ReviewerStatus::Completed
    } else if reviewer.accepted_at.is_some() {
        ReviewerStatus::Accepted
    } else if reviewer.invited_at.is_some() {
        ReviewerStatus::Invited
    } else {
        ReviewerStatus::Unknown
    }
}

/// Count reviewers per derived status for every revision, in result order.
pub fn summarize(result: &AggregatedResult) -> Vec<RevisionSummary> {
    result
        .revisions
        .iter()
        .map(|group| {
            let mut summary = RevisionSummary {
                revision_number: group.revision_number,
                ..RevisionSummary::default()
            };
            for reviewer in &group.reviewers {
                let counter = match status(reviewer) {
                    ReviewerStatus::Invited => &mut summary.invited,
                    ReviewerStatus::Accepted => &mut summary.accepted,
                    ReviewerStatus::Completed => &mut summary.completed,
                    ReviewerStatus::Unknown => &mut summary.unknown,
                };
                *counter = counter.saturating_add(1);
            }
            summary
        })
        .collect()
}
