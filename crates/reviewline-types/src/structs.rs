//! Wire structs for review events, manuscript metadata, and the aggregated
//! revision/reviewer hierarchy.
//!
//! All field names are camelCase on the wire. Timestamps are integer seconds
//! since the Unix epoch; a lifecycle timestamp that is `None` (serialized as
//! `null`) means that stage has not happened.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::EventKind;
use crate::ids::{ReviewerId, RevisionNumber};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single peer-review lifecycle event.
///
/// Events are immutable and supplied in no particular order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ReviewEvent {
    /// When the event happened, in seconds since the Unix epoch.
    #[ts(type = "number")]
    pub timestamp: i64,
    /// Which lifecycle stage the event records.
    pub kind: EventKind,
    /// The revision the event belongs to.
    pub revision_number: RevisionNumber,
    /// The reviewer the event is about.
    pub reviewer_id: ReviewerId,
}

impl ReviewEvent {
    /// The aggregation key: one reviewer state exists per key.
    pub const fn key(&self) -> (RevisionNumber, ReviewerId) {
        (self.revision_number, self.reviewer_id)
    }
}

/// Static descriptive fields of a manuscript, passed through aggregation
/// unchanged.
///
/// Every field is optional on input so a sparse metadata block still yields a
/// well-formed result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "bindings/")]
pub struct ManuscriptMeta {
    /// Identifier of the manuscript in the upstream system.
    pub manuscript_id: Option<String>,
    /// Manuscript title.
    pub title: String,
    /// Corresponding author.
    pub author: String,
    /// Journal the manuscript was submitted to.
    pub journal: String,
    /// Submission time in seconds since the Unix epoch.
    #[ts(type = "number | null")]
    pub submitted_at: Option<i64>,
    /// Last time the manuscript record changed, in seconds since the Unix epoch.
    #[ts(type = "number | null")]
    pub last_updated_at: Option<i64>,
}

/// The input document: manuscript metadata at the top level plus the raw
/// event list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ReviewDocument {
    /// Pass-through manuscript metadata.
    #[serde(flatten)]
    pub manuscript: ManuscriptMeta,
    /// Lifecycle events in arbitrary order.
    pub events: Vec<ReviewEvent>,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Folded lifecycle state for one reviewer within one revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ReviewerState {
    /// The reviewer this state describes.
    pub reviewer_id: ReviewerId,
    /// When the reviewer was invited.
    #[ts(type = "number | null")]
    pub invited_at: Option<i64>,
    /// When the reviewer accepted.
    #[ts(type = "number | null")]
    pub accepted_at: Option<i64>,
    /// When the reviewer completed their report.
    #[ts(type = "number | null")]
    pub completed_at: Option<i64>,
    /// Maximum timestamp of any event folded into this state.
    #[ts(type = "number")]
    pub last_updated_at: i64,
}

impl ReviewerState {
    /// Create an empty state for a reviewer whose first event happened at
    /// `first_seen`.
    pub const fn new(reviewer_id: ReviewerId, first_seen: i64) -> Self {
        Self {
            reviewer_id,
            invited_at: None,
            accepted_at: None,
            completed_at: None,
            last_updated_at: first_seen,
        }
    }

    /// The lifecycle field an event of `kind` writes to.
    pub const fn field_mut(&mut self, kind: EventKind) -> &mut Option<i64> {
        match kind {
            EventKind::Invited => &mut self.invited_at,
            EventKind::Accepted => &mut self.accepted_at,
            EventKind::Completed => &mut self.completed_at,
        }
    }

    /// The lifecycle field an event of `kind` writes to, read-only.
    pub const fn field(&self, kind: EventKind) -> Option<i64> {
        match kind {
            EventKind::Invited => self.invited_at,
            EventKind::Accepted => self.accepted_at,
            EventKind::Completed => self.completed_at,
        }
    }
}

/// All reviewers active during one revision, ordered by `lastUpdatedAt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct RevisionGroup {
    /// The revision these reviewers belong to.
    pub revision_number: RevisionNumber,
    /// Reviewer states, ascending by `lastUpdatedAt`.
    pub reviewers: Vec<ReviewerState>,
}

/// Manuscript metadata plus revisions in ascending revision order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AggregatedResult {
    /// Pass-through manuscript metadata.
    #[serde(flatten)]
    pub manuscript: ManuscriptMeta,
    /// Revision groups, ascending by revision number.
    pub revisions: Vec<RevisionGroup>,
}

impl AggregatedResult {
    /// Total number of reviewer states across all revisions.
    pub fn reviewer_count(&self) -> usize {
        self.revisions.iter().map(|group| group.reviewers.len()).sum()
    }

    /// Look up a revision group by number.
    pub fn revision(&self, revision: RevisionNumber) -> Option<&RevisionGroup> {
        self.revisions
            .iter()
            .find(|group| group.revision_number == revision)
    }
}

/// Per-revision reviewer counts by derived status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct RevisionSummary {
    /// The summarized revision.
    pub revision_number: RevisionNumber,
    /// Reviewers whose latest stage is `Invited`.
    pub invited: u32,
    /// Reviewers whose latest stage is `Accepted`.
    pub accepted: u32,
    /// Reviewers whose latest stage is `Completed`.
    pub completed: u32,
    /// Reviewers with no lifecycle timestamp set.
    pub unknown: u32,
}
