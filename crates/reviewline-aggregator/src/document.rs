//! Parsing of the JSON input document.
//!
//! The document carries manuscript metadata at the top level and an `events`
//! array. Metadata is decoded as a whole. Each event record is decoded on its
//! own so a malformed record is reported with its zero-based index. Any
//! failure is [`AggregateError::InvalidInput`] and no partial result is
//! produced.

use serde::Deserialize;
use serde_json::Value;

use reviewline_types::{AggregatedResult, FoldPolicy, ManuscriptMeta, ReviewDocument, ReviewEvent};

use crate::AggregateError;
use crate::aggregate::aggregate_with;

/// The document shape before event records are validated.
#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(flatten)]
    manuscript: ManuscriptMeta,
    events: Vec<Value>,
}

/// Parse and validate an input document.
///
/// # Errors
///
/// Returns [`AggregateError::InvalidInput`] if the text is not a JSON object,
/// lacks an `events` array, has a metadata field of the wrong type, or if any
/// event record is missing a field, carries a non-integer timestamp, an
/// unknown kind, or a negative revision number.
pub fn parse_document(json: &str) -> Result<ReviewDocument, AggregateError> {
    parse_document_slice(json.as_bytes())
}

/// Parse and validate an input document from raw bytes.
///
/// Bytes that are not valid UTF-8 are rejected like any other malformed
/// document.
///
/// # Errors
///
/// Returns [`AggregateError::InvalidInput`] under the same conditions as
/// [`parse_document`], and when the bytes are not valid UTF-8.
pub fn parse_document_slice(bytes: &[u8]) -> Result<ReviewDocument, AggregateError> {
    let raw: RawDocument =
        serde_json::from_slice(bytes).map_err(|e| AggregateError::document(e.to_string()))?;

    let events = raw
        .events
        .into_iter()
        .enumerate()
        .map(|(index, record)| decode_event(index, record))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ReviewDocument {
        manuscript: raw.manuscript,
        events,
    })
}

/// Decode one event record, naming `index` in any error.
fn decode_event(index: usize, record: Value) -> Result<ReviewEvent, AggregateError> {
    // serde's own message for this case ("expected u32") hides the rule.
    if let Some(revision) = record
        .get("revisionNumber")
        .and_then(Value::as_i64)
        .filter(|revision| *revision < 0)
    {
        return Err(AggregateError::event(
            index,
            format!("revisionNumber must be non-negative, got {revision}"),
        ));
    }

    serde_json::from_value(record).map_err(|e| AggregateError::event(index, e.to_string()))
}

/// Parse a document and aggregate it with the default fold policy.
///
/// # Errors
///
/// Returns [`AggregateError::InvalidInput`] under the same conditions as
/// [`parse_document`].
pub fn aggregate_json(json: &str) -> Result<AggregatedResult, AggregateError> {
    aggregate_json_with(json, FoldPolicy::InputOrder)
}

/// Parse a document and aggregate it under `policy`.
///
/// # Errors
///
/// Returns [`AggregateError::InvalidInput`] under the same conditions as
/// [`parse_document`].
pub fn aggregate_json_with(
    json: &str,
    policy: FoldPolicy,
) -> Result<AggregatedResult, AggregateError> {
    let document = parse_document(json)?;
    Ok(aggregate_with(document.manuscript, &document.events, policy))
}
