//! Type-safe identifier wrappers for the integer keys used by review events.
//!
//! Reviewer identifiers and revision numbers are both plain integers on the
//! wire. Wrapping them keeps a reviewer ID from being passed where a revision
//! number is expected, which is the one mix-up the aggregation key invites.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a transparent newtype wrapper around an integer with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident($inner:ty)
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
        )]
        #[serde(transparent)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(#[ts(type = "number")] pub $inner);

        impl $name {
            /// Return the inner integer value.
            pub const fn into_inner(self) -> $inner {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $inner {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Identifier of a reviewer as assigned by the manuscript system.
    ReviewerId(i64)
}

define_id! {
    /// A numbered round of manuscript review. The initial submission is
    /// revision 0; the type is unsigned so a negative revision cannot exist.
    RevisionNumber(u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_bare_integers() {
        let json = serde_json::to_string(&ReviewerId(42)).ok();
        assert_eq!(json.as_deref(), Some("42"));

        let revision: Result<RevisionNumber, _> = serde_json::from_str("3");
        assert_eq!(revision.ok(), Some(RevisionNumber(3)));
    }

    #[test]
    fn default_ids_are_zero() {
        assert_eq!(RevisionNumber::default(), RevisionNumber(0));
        assert_eq!(ReviewerId::default().into_inner(), 0);
    }

    #[test]
    fn negative_revision_is_rejected() {
        let revision: Result<RevisionNumber, _> = serde_json::from_str("-1");
        assert!(revision.is_err());
    }

    #[test]
    fn id_display_matches_inner() {
        let id = ReviewerId::from(-7);
        assert_eq!(id.to_string(), "-7");
        assert_eq!(i64::from(id), -7);
    }
}
