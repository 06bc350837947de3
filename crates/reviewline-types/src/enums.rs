//! Enumeration types for review events and derived reviewer state.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Event kinds
// ---------------------------------------------------------------------------

/// The lifecycle stage a review event records.
///
/// Stages are ordered `Invited -> Accepted -> Completed`, although events
/// arrive in no particular order and any stage may be the latest one seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum EventKind {
    /// The reviewer was invited to review the revision.
    Invited,
    /// The reviewer accepted the invitation.
    Accepted,
    /// The reviewer submitted their report.
    Completed,
}

// ---------------------------------------------------------------------------
// Derived status
// ---------------------------------------------------------------------------

/// Status shown for a reviewer, derived from which lifecycle timestamps are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ReviewerStatus {
    /// Invited, no response recorded yet.
    Invited,
    /// Accepted, report not yet submitted.
    Accepted,
    /// Report submitted.
    Completed,
    /// No lifecycle timestamp is set.
    Unknown,
}

impl ReviewerStatus {
    /// All statuses in display order.
    pub const ALL: [Self; 4] = [Self::Invited, Self::Accepted, Self::Completed, Self::Unknown];

    /// Short lowercase label used in text output.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Invited => "invited",
            Self::Accepted => "accepted",
            Self::Completed => "completed",
            Self::Unknown => "unknown",
        }
    }
}

// ---------------------------------------------------------------------------
// Fold policy
// ---------------------------------------------------------------------------

/// How a repeated event of the same kind for the same reviewer is folded.
///
/// `lastUpdatedAt` always tracks the maximum timestamp regardless of policy;
/// the policy only decides which value a lifecycle field ends up holding.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum FoldPolicy {
    /// The event that comes later in the input sequence wins, whatever its
    /// timestamp.
    #[default]
    InputOrder,
    /// The event with the greater timestamp wins; equal timestamps fall back
    /// to input order.
    LatestTimestamp,
}

impl FoldPolicy {
    /// Canonical name as accepted by [`FromStr`] and serde.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InputOrder => "input_order",
            Self::LatestTimestamp => "latest_timestamp",
        }
    }
}

impl core::fmt::Display for FoldPolicy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a fold policy name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown fold policy `{0}` (expected input_order or latest_timestamp)")]
pub struct UnknownFoldPolicy(pub String);

impl FromStr for FoldPolicy {
    type Err = UnknownFoldPolicy;

    /// Accepts both `snake_case` and `kebab-case` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace('-', "_").as_str() {
            "input_order" => Ok(Self::InputOrder),
            "latest_timestamp" => Ok(Self::LatestTimestamp),
            _ => Err(UnknownFoldPolicy(s.to_owned())),
        }
    }
}
