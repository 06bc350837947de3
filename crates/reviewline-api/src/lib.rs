//! HTTP aggregation API for the Reviewline peer-review timeline.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **Aggregation endpoints** that take a review document (manuscript
//!   metadata plus raw lifecycle events) and return revisions with their
//!   reviewers, or per-revision status counts
//! - **Health endpoint** with request counters
//! - **Minimal HTML status page** (`GET /`)
//!
//! # Architecture
//!
//! Every request is aggregated from scratch; the server keeps no manuscript
//! state between requests. Fetching events from the upstream manuscript
//! system and rendering the timeline are left to callers.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
