//! Event aggregation for the Reviewline peer-review timeline.
//!
//! Takes a flat, unordered list of reviewer lifecycle events and folds it
//! into revisions, each holding the reviewers active during that revision.
//! Aggregation is a pure function: no I/O, no shared state, and the same
//! input always yields the same output.
//!
//! # Architecture
//!
//! - [`aggregate`] -- The fold pass and deterministic ordering.
//! - [`status`] -- Derived reviewer status and per-revision summaries.
//! - [`document`] -- Parsing the JSON input document with per-record
//!   validation.
//! - [`invariants`] -- Ordering and uniqueness checks over a result.
//! - [`view`] -- Expand/collapse presentation state kept apart from results.
//!
//! # Ordering
//!
//! Revisions come out ascending by revision number. Within a revision,
//! reviewers come out ascending by `lastUpdatedAt`, ties broken by the order
//! in which each reviewer first appeared in the input.
//!
//! # Usage
//!
//! ```
//! use reviewline_aggregator::aggregate;
//! use reviewline_aggregator::status::status;
//! use reviewline_types::{
//!     EventKind, ManuscriptMeta, ReviewEvent, ReviewerId, ReviewerStatus, RevisionNumber,
//! };
//!
//! let event = |timestamp, kind, reviewer| ReviewEvent {
//!     timestamp,
//!     kind,
//!     revision_number: RevisionNumber(1),
//!     reviewer_id: ReviewerId(reviewer),
//! };
//!
//! let result = aggregate(
//!     ManuscriptMeta::default(),
//!     &[
//!         event(100, EventKind::Invited, 1),
//!         event(200, EventKind::Accepted, 1),
//!         event(50, EventKind::Invited, 2),
//!     ],
//! );
//!
//! let reviewers = &result.revisions[0].reviewers;
//! assert_eq!(reviewers[0].reviewer_id, ReviewerId(2));
//! assert_eq!(status(&reviewers[1]), ReviewerStatus::Accepted);
//! ```

pub mod aggregate;
pub mod document;
pub mod invariants;
pub mod status;
pub mod view;

// Re-export primary entry points at crate root.
pub use aggregate::{aggregate, aggregate_with};
pub use document::{aggregate_json, aggregate_json_with, parse_document, parse_document_slice};
pub use invariants::{InvariantReport, Violation, verify};
pub use view::ViewState;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur while aggregating review events.
///
/// Only malformed input is an error. Empty event lists, partial reviewer
/// lifecycles and out-of-order revisions all produce a well-formed result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AggregateError {
    /// The input is not a well-formed document or event sequence.
    #[error("invalid input{}: {reason}", describe_index(*.index))]
    InvalidInput {
        /// Zero-based position of the offending event record, when the
        /// failure is specific to one record.
        index: Option<usize>,
        /// What was wrong with the input.
        reason: String,
    },
}

impl AggregateError {
    /// Invalid input not tied to a single event record.
    pub fn document(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            index: None,
            reason: reason.into(),
        }
    }

    /// Invalid input in the event record at `index`.
    pub fn event(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            index: Some(index),
            reason: reason.into(),
        }
    }
}

fn describe_index(index: Option<usize>) -> String {
    index.map_or_else(String::new, |i| format!(" at event {i}"))
}
