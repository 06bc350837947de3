//! Shared application state for the aggregation API.
//!
//! Aggregation itself is stateless; [`AppState`] only carries the default
//! fold policy and request counters surfaced by the health endpoint.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use reviewline_types::FoldPolicy;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor. Counters are relaxed atomics; they are informational only.
#[derive(Debug)]
pub struct AppState {
    /// Policy used when a request does not name one.
    pub default_policy: FoldPolicy,
    /// When the state was created.
    pub started_at: DateTime<Utc>,
    aggregations: AtomicU64,
    rejections: AtomicU64,
}

impl AppState {
    /// Create state with the default fold policy.
    pub fn new() -> Self {
        Self::with_policy(FoldPolicy::default())
    }

    /// Create state that falls back to `default_policy`.
    pub fn with_policy(default_policy: FoldPolicy) -> Self {
        Self {
            default_policy,
            started_at: Utc::now(),
            aggregations: AtomicU64::new(0),
            rejections: AtomicU64::new(0),
        }
    }

    /// Record a successful aggregation.
    pub fn record_aggregation(&self) {
        self.aggregations.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a request rejected for a bad query or document.
    pub fn record_rejection(&self) {
        self.rejections.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of successful aggregations served.
    pub fn aggregations(&self) -> u64 {
        self.aggregations.load(Ordering::Relaxed)
    }

    /// Number of requests rejected for a bad query or document.
    pub fn rejections(&self) -> u64 {
        self.rejections.load(Ordering::Relaxed)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
