//! REST endpoint handlers for the aggregation API.
//!
//! Handlers take the request body as raw bytes and hand it to
//! [`reviewline_aggregator::parse_document_slice`] so malformed input, bad
//! UTF-8 included, surfaces as
//! [`AggregateError::InvalidInput`](reviewline_aggregator::AggregateError)
//! with the offending record index rather than as a generic extractor
//! rejection.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/health` | Liveness and request counters |
//! | `POST` | `/api/aggregate` | Aggregate a review document |
//! | `POST` | `/api/aggregate/summary` | Per-revision status counts |

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};
use reviewline_aggregator::status::summarize;
use reviewline_aggregator::{aggregate_with, parse_document_slice};
use reviewline_types::{AggregatedResult, FoldPolicy, ManuscriptMeta, RevisionSummary};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter and response structs
// ---------------------------------------------------------------------------

/// Query parameters for the aggregation endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct AggregateQuery {
    /// Fold policy name: `input_order` or `latest_timestamp`.
    pub policy: Option<String>,
}

/// Response body of `POST /api/aggregate/summary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// Pass-through manuscript metadata.
    #[serde(flatten)]
    pub manuscript: ManuscriptMeta,
    /// Status counts, ascending by revision number.
    pub revisions: Vec<RevisionSummary>,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing server status and API routes.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let aggregations = state.aggregations();
    let rejections = state.rejections();
    let policy = state.default_policy;
    let started_at = state.started_at.format("%Y-%m-%d %H:%M:%S UTC");

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Reviewline</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        code {{ color: #7ee787; }}
    </style>
</head>
<body>
    <h1>Reviewline</h1>
    <p class="subtitle">Peer-review timeline aggregation, up since {started_at}</p>

    <div>
        <div class="metric">
            <div class="label">Aggregations</div>
            <div class="value">{aggregations}</div>
        </div>
        <div class="metric">
            <div class="label">Rejected</div>
            <div class="value">{rejections}</div>
        </div>
        <div class="metric">
            <div class="label">Default policy</div>
            <div class="value">{policy}</div>
        </div>
    </div>

    <h2>API Endpoints</h2>
    <ul>
        <li><code>GET /api/health</code> -- Liveness and counters</li>
        <li><code>POST /api/aggregate</code> -- Aggregate a review document (?policy=...)</li>
        <li><code>POST /api/aggregate/summary</code> -- Status counts per revision</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// GET /api/health
// ---------------------------------------------------------------------------

/// Report liveness plus request counters.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "aggregations": state.aggregations(),
        "rejections": state.rejections(),
        "defaultPolicy": state.default_policy,
    }))
}

// ---------------------------------------------------------------------------
// POST /api/aggregate
// ---------------------------------------------------------------------------

/// Aggregate the review document in the request body.
pub async fn aggregate(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AggregateQuery>,
    body: Bytes,
) -> Result<Json<AggregatedResult>, ApiError> {
    run_aggregation(&state, &params, &body).map(Json)
}

// ---------------------------------------------------------------------------
// POST /api/aggregate/summary
// ---------------------------------------------------------------------------

/// Aggregate the review document and return per-revision status counts.
pub async fn aggregate_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AggregateQuery>,
    body: Bytes,
) -> Result<Json<SummaryResponse>, ApiError> {
    let result = run_aggregation(&state, &params, &body)?;
    let revisions = summarize(&result);
    Ok(Json(SummaryResponse {
        manuscript: result.manuscript,
        revisions,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve the fold policy, parse the body, aggregate, and count the outcome.
///
/// Every failed request counts as a rejection, whether the query or the
/// document was at fault.
fn run_aggregation(
    state: &AppState,
    params: &AggregateQuery,
    body: &[u8],
) -> Result<AggregatedResult, ApiError> {
    let outcome = resolve_policy(params, state.default_policy).and_then(|policy| {
        let document = parse_document_slice(body)?;
        Ok(aggregate_with(document.manuscript, &document.events, policy))
    });

    match outcome {
        Ok(result) => {
            state.record_aggregation();
            debug!(
                manuscript_id = result.manuscript.manuscript_id.as_deref().unwrap_or("-"),
                revisions = result.revisions.len(),
                "Served aggregation"
            );
            Ok(result)
        }
        Err(e) => {
            state.record_rejection();
            warn!(error = %e, "Rejected aggregation request");
            Err(e)
        }
    }
}

fn resolve_policy(params: &AggregateQuery, fallback: FoldPolicy) -> Result<FoldPolicy, ApiError> {
    params.policy.as_deref().map_or(Ok(fallback), |name| {
        name.parse()
            .map_err(|e: reviewline_types::UnknownFoldPolicy| ApiError::InvalidQuery(e.to_string()))
    })
}
