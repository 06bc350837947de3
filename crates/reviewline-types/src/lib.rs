//! Shared type definitions for the Reviewline peer-review timeline.
//!
//! This crate is the single source of truth for the wire shapes exchanged
//! between the aggregator, the HTTP API, and the presentation layer. Types
//! flow downstream to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Integer newtypes for reviewer IDs and revision numbers
//! - [`enums`] -- Event kinds, derived reviewer status, fold policy
//! - [`structs`] -- Events, manuscript metadata, and the aggregated hierarchy

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{EventKind, FoldPolicy, ReviewerStatus, UnknownFoldPolicy};
pub use ids::{ReviewerId, RevisionNumber};
pub use structs::{
    AggregatedResult, ManuscriptMeta, ReviewDocument, ReviewEvent, ReviewerState, RevisionGroup,
    RevisionSummary,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for the presentation layer.

    #[test]
    fn export_bindings() {
        // ts-rs writes bindings to `bindings/` relative to the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::ReviewerId::export_all();
        let _ = crate::ids::RevisionNumber::export_all();

        // Enums
        let _ = crate::enums::EventKind::export_all();
        let _ = crate::enums::ReviewerStatus::export_all();
        let _ = crate::enums::FoldPolicy::export_all();

        // Structs
        let _ = crate::structs::ReviewEvent::export_all();
        let _ = crate::structs::ManuscriptMeta::export_all();
        let _ = crate::structs::ReviewDocument::export_all();
        let _ = crate::structs::ReviewerState::export_all();
        let _ = crate::structs::RevisionGroup::export_all();
        let _ = crate::structs::AggregatedResult::export_all();
        let _ = crate::structs::RevisionSummary::export_all();
    }
}
