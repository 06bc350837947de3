//! The fold pass and deterministic ordering.
//!
//! Aggregation runs in one linear pass over the events in input order,
//! folding each event into the reviewer state for its
//! `(revision, reviewer)` key. States are owned by their revision bucket;
//! there are no back references. Once every event is folded the buckets are
//! drained in ascending revision order and each bucket's reviewers are
//! sorted by `lastUpdatedAt`.
//!
//! Two rules apply to every folded event and they are independent:
//!
//! - The lifecycle field matching the event kind is overwritten according to
//!   the [`FoldPolicy`]. Under the default `InputOrder` policy the event that
//!   comes later in the sequence wins even if its timestamp is earlier.
//! - `lastUpdatedAt` only ever moves up: it is raised when the event's
//!   timestamp is strictly greater than the current value.

use std::collections::BTreeMap;

use tracing::debug;

use reviewline_types::{
    AggregatedResult, FoldPolicy, ManuscriptMeta, ReviewEvent, ReviewerId, ReviewerState,
    RevisionGroup, RevisionNumber,
};

/// A reviewer state plus the position at which its key first appeared.
#[derive(Debug)]
struct Folded {
    first_seen: usize,
    state: ReviewerState,
}

/// All reviewer states for one revision, keyed by reviewer.
#[derive(Debug, Default)]
struct RevisionBucket {
    reviewers: BTreeMap<ReviewerId, Folded>,
}

impl RevisionBucket {
    /// Locate or create the state for `event`'s reviewer and fold the event in.
    fn fold(&mut self, event: &ReviewEvent, policy: FoldPolicy) {
        let first_seen = self.reviewers.len();
        let folded = self
            .reviewers
            .entry(event.reviewer_id)
            .or_insert_with(|| Folded {
                first_seen,
                state: ReviewerState::new(event.reviewer_id, event.timestamp),
            });
        fold_event(&mut folded.state, event, policy);
    }

    /// Drain into reviewers ordered by `lastUpdatedAt`, then first appearance.
    fn into_reviewers(self) -> Vec<ReviewerState> {
        let mut folded: Vec<Folded> = self.reviewers.into_values().collect();
        folded.sort_by_key(|f| (f.state.last_updated_at, f.first_seen));
        folded.into_iter().map(|f| f.state).collect()
    }
}

/// Fold a single event into a reviewer state.
///
/// The lifecycle field is written per `policy`; `last_updated_at` is raised
/// to the event timestamp only if strictly greater. No event clears a field.
pub fn fold_event(state: &mut ReviewerState, event: &ReviewEvent, policy: FoldPolicy) {
    let field = state.field_mut(event.kind);
    let overwrite = match policy {
        FoldPolicy::InputOrder => true,
        FoldPolicy::LatestTimestamp => field.is_none_or(|stored| event.timestamp >= stored),
    };
    if overwrite {
        *field = Some(event.timestamp);
    }

    if event.timestamp > state.last_updated_at {
        state.last_updated_at = event.timestamp;
    }
}

/// Aggregate events into revisions using the default [`FoldPolicy::InputOrder`].
///
/// See [`aggregate_with`].
pub fn aggregate(manuscript: ManuscriptMeta, events: &[ReviewEvent]) -> AggregatedResult {
    aggregate_with(manuscript, events, FoldPolicy::InputOrder)
}

/// Aggregate events into revisions under an explicit fold policy.
///
/// Produces one [`RevisionGroup`] per distinct revision number, ascending,
/// and one [`ReviewerState`] per distinct `(revision, reviewer)` key. An
/// empty event slice yields zero revisions with the metadata untouched.
pub fn aggregate_with(
    manuscript: ManuscriptMeta,
    events: &[ReviewEvent],
    policy: FoldPolicy,
) -> AggregatedResult {
    let mut buckets: BTreeMap<RevisionNumber, RevisionBucket> = BTreeMap::new();

    for event in events {
        buckets
            .entry(event.revision_number)
            .or_default()
            .fold(event, policy);
    }

    let revisions: Vec<RevisionGroup> = buckets
        .into_iter()
        .map(|(revision_number, bucket)| RevisionGroup {
            revision_number,
            reviewers: bucket.into_reviewers(),
        })
        .collect();

    let result = AggregatedResult {
        manuscript,
        revisions,
    };

    debug!(
        events = events.len(),
        revisions = result.revisions.len(),
        reviewers = result.reviewer_count(),
        %policy,
        "Aggregated review events"
    );

    result
}
