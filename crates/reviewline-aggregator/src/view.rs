//! Expand/collapse state for a rendered timeline.
//!
//! Presentation state is keyed by the same identifiers as the aggregated
//! result but lives beside it: a [`ViewState`] never reads from or writes to
//! an [`AggregatedResult`] except to drop keys that no longer exist.

use std::collections::BTreeSet;

use reviewline_types::{AggregatedResult, ReviewerId, RevisionNumber};

/// Which revisions and reviewer rows are expanded.
///
/// Everything starts collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    revisions: BTreeSet<RevisionNumber>,
    reviewers: BTreeSet<(RevisionNumber, ReviewerId)>,
}

impl ViewState {
    /// Create a view with everything collapsed.
    pub const fn new() -> Self {
        Self {
            revisions: BTreeSet::new(),
            reviewers: BTreeSet::new(),
        }
    }

    /// Flip a revision between expanded and collapsed. Returns the new state.
    pub fn toggle_revision(&mut self, revision: RevisionNumber) -> bool {
        toggle(&mut self.revisions, revision)
    }

    /// Flip a reviewer row between expanded and collapsed. Returns the new state.
    pub fn toggle_reviewer(&mut self, revision: RevisionNumber, reviewer: ReviewerId) -> bool {
        toggle(&mut self.reviewers, (revision, reviewer))
    }

    /// Whether a revision is expanded.
    pub fn is_revision_expanded(&self, revision: RevisionNumber) -> bool {
        self.revisions.contains(&revision)
    }

    /// Whether a reviewer row is expanded.
    pub fn is_reviewer_expanded(&self, revision: RevisionNumber, reviewer: ReviewerId) -> bool {
        self.reviewers.contains(&(revision, reviewer))
    }

    /// Drop keys that do not appear in `result`, e.g. after a refetch.
    pub fn retain_present(&mut self, result: &AggregatedResult) {
        let revisions: BTreeSet<RevisionNumber> =
            result.revisions.iter().map(|g| g.revision_number).collect();
        let reviewers: BTreeSet<(RevisionNumber, ReviewerId)> = result
            .revisions
            .iter()
            .flat_map(|g| g.reviewers.iter().map(|r| (g.revision_number, r.reviewer_id)))
            .collect();

        self.revisions.retain(|revision| revisions.contains(revision));
        self.reviewers.retain(|key| reviewers.contains(key));
    }
}

fn toggle<K: Ord>(set: &mut BTreeSet<K>, key: K) -> bool {
    if set.remove(&key) {
        false
    } else {
        set.insert(key)
    }
}
