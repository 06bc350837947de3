//! Ordering and uniqueness checks over an aggregated result.
//!
//! [`aggregate`](crate::aggregate::aggregate) upholds these by construction.
//! The checks exist for results that arrive from elsewhere (a cached copy, a
//! hand-edited fixture, another implementation) and for tests.
//!
//! For every result:
//!
//! ```text
//! revisions[i].revision_number < revisions[i + 1].revision_number
//! reviewers[j].last_updated_at <= reviewers[j + 1].last_updated_at
//! each reviewer_id appears at most once per revision
//! last_updated_at >= every set lifecycle timestamp
//! ```

use std::collections::BTreeSet;

use reviewline_types::{AggregatedResult, ReviewerId, RevisionNumber};

/// A single broken invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A revision is not strictly greater than the one before it.
    RevisionOrder {
        /// The earlier revision in output order.
        previous: RevisionNumber,
        /// The revision that follows it.
        next: RevisionNumber,
    },
    /// The same revision number appears in more than one group.
    DuplicateRevision(RevisionNumber),
    /// The same reviewer appears twice in one revision.
    DuplicateReviewer {
        /// The revision holding the duplicate.
        revision: RevisionNumber,
        /// The duplicated reviewer.
        reviewer: ReviewerId,
    },
    /// A reviewer's `lastUpdatedAt` is lower than the one before it.
    ReviewerOrder {
        /// The revision holding the reviewers.
        revision: RevisionNumber,
        /// The reviewer that sorts too late.
        reviewer: ReviewerId,
    },
    /// `lastUpdatedAt` is below one of the reviewer's own lifecycle timestamps.
    StaleLastUpdated {
        /// The revision holding the reviewer.
        revision: RevisionNumber,
        /// The affected reviewer.
        reviewer: ReviewerId,
    },
}

impl core::fmt::Display for Violation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::RevisionOrder { previous, next } => {
                write!(f, "revision {next} follows revision {previous}")
            }
            Self::DuplicateRevision(revision) => {
                write!(f, "revision {revision} appears more than once")
            }
            Self::DuplicateReviewer { revision, reviewer } => {
                write!(f, "reviewer {reviewer} appears twice in revision {revision}")
            }
            Self::ReviewerOrder { revision, reviewer } => write!(
                f,
                "reviewer {reviewer} in revision {revision} is out of lastUpdatedAt order"
            ),
            Self::StaleLastUpdated { revision, reviewer } => write!(
                f,
                "reviewer {reviewer} in revision {revision} has lastUpdatedAt below a lifecycle timestamp"
            ),
        }
    }
}

/// The outcome of [`verify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantReport {
    /// Every invariant holds.
    Holds,
    /// One or more invariants are broken, in discovery order.
    Violated(Vec<Violation>),
}

impl InvariantReport {
    /// Returns `true` if no invariant is broken.
    pub const fn holds(&self) -> bool {
        matches!(self, Self::Holds)
    }
}

/// Check every ordering and uniqueness invariant of `result`.
pub fn verify(result: &AggregatedResult) -> InvariantReport {
    let mut violations = Vec::new();
    let mut seen_revisions: BTreeSet<RevisionNumber> = BTreeSet::new();
    let mut previous_revision: Option<RevisionNumber> = None;

    for group in &result.revisions {
        let revision = group.revision_number;

        if !seen_revisions.insert(revision) {
            violations.push(Violation::DuplicateRevision(revision));
        }
        if let Some(previous) = previous_revision.filter(|previous| *previous >= revision) {
            violations.push(Violation::RevisionOrder {
                previous,
                next: revision,
            });
        }
        previous_revision = Some(revision);

        let mut seen_reviewers: BTreeSet<ReviewerId> = BTreeSet::new();
        let mut previous_update: Option<i64> = None;

        for reviewer in &group.reviewers {
            if !seen_reviewers.insert(reviewer.reviewer_id) {
                violations.push(Violation::DuplicateReviewer {
                    revision,
                    reviewer: reviewer.reviewer_id,
                });
            }
            if previous_update.is_some_and(|previous| previous > reviewer.last_updated_at) {
                violations.push(Violation::ReviewerOrder {
                    revision,
                    reviewer: reviewer.reviewer_id,
                });
            }
            previous_update = Some(reviewer.last_updated_at);

            let lifecycle = [reviewer.invited_at, reviewer.accepted_at, reviewer.completed_at];
            if lifecycle
                .into_iter()
                .flatten()
                .any(|timestamp| timestamp > reviewer.last_updated_at)
            {
                violations.push(Violation::StaleLastUpdated {
                    revision,
                    reviewer: reviewer.reviewer_id,
                });
            }
        }
    }

    if violations.is_empty() {
        InvariantReport::Holds
    } else {
        InvariantReport::Violated(violations)
    }
}

#[cfg(test)]
mod tests {
    use reviewline_types::{ManuscriptMeta, ReviewerState, RevisionGroup};

    use super::*;

    fn reviewer(id: i64, last_updated_at: i64) -> ReviewerState {
        ReviewerState {
            reviewer_id: ReviewerId(id),
            invited_at: Some(last_updated_at),
            accepted_at: None,
            completed_at: None,
            last_updated_at,
        }
    }

    fn group(revision: u32, reviewers: Vec<ReviewerState>) -> RevisionGroup {
        RevisionGroup {
            revision_number: RevisionNumber(revision),
            reviewers,
        }
    }

    fn result(revisions: Vec<RevisionGroup>) -> AggregatedResult {
        AggregatedResult {
            manuscript: ManuscriptMeta::default(),
            revisions,
        }
    }

    #[test]
    fn well_ordered_result_holds() {
        let report = verify(&result(vec![
            group(0, vec![reviewer(1, 10), reviewer(2, 10), reviewer(3, 20)]),
            group(2, vec![reviewer(1, 5)]),
        ]));
        assert!(report.holds());
    }

    #[test]
    fn empty_result_holds() {
        assert_eq!(verify(&result(Vec::new())), InvariantReport::Holds);
    }

    #[test]
    fn detects_revision_disorder_and_duplicates() {
        let report = verify(&result(vec![
            group(2, vec![]),
            group(1, vec![]),
            group(1, vec![]),
        ]));

        assert_eq!(
            report,
            InvariantReport::Violated(vec![
                Violation::RevisionOrder {
                    previous: RevisionNumber(2),
                    next: RevisionNumber(1),
                },
                Violation::DuplicateRevision(RevisionNumber(1)),
                Violation::RevisionOrder {
                    previous: RevisionNumber(1),
                    next: RevisionNumber(1),
                },
            ])
        );
    }

    #[test]
    fn detects_reviewer_disorder_and_duplicates() {
        let report = verify(&result(vec![group(
            0,
            vec![reviewer(1, 30), reviewer(2, 10), reviewer(1, 40)],
        )]));

        assert_eq!(
            report,
            InvariantReport::Violated(vec![
                Violation::ReviewerOrder {
                    revision: RevisionNumber(0),
                    reviewer: ReviewerId(2),
                },
                Violation::DuplicateReviewer {
                    revision: RevisionNumber(0),
                    reviewer: ReviewerId(1),
                },
            ])
        );
    }

    #[test]
    fn detects_stale_last_updated() {
        let mut stale = reviewer(9, 10);
        stale.completed_at = Some(99);
        let report = verify(&result(vec![group(0, vec![stale])]));

        assert_eq!(
            report,
            InvariantReport::Violated(vec![Violation::StaleLastUpdated {
                revision: RevisionNumber(0),
                reviewer: ReviewerId(9),
            }])
        );
    }

    #[test]
    fn violations_render_readably() {
        let violation = Violation::DuplicateReviewer {
            revision: RevisionNumber(2),
            reviewer: ReviewerId(7),
        };
        assert_eq!(violation.to_string(), "reviewer 7 appears twice in revision 2");
    }
}
