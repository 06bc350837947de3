//! End-to-end aggregation scenarios driven through the JSON document format.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use reviewline_aggregator::status::{status, summarize};
use reviewline_aggregator::{AggregateError, aggregate_json, parse_document};
use reviewline_types::{ReviewerId, ReviewerStatus, RevisionNumber};
use serde_json::{Value, json};

fn document(events: &Value) -> String {
    json!({
        "manuscriptId": "JOT-2023-0412",
        "title": "Reconstructing Review Timelines",
        "author": "M. Adeyemi",
        "journal": "Journal of Timelines",
        "submittedAt": 1_690_000_000,
        "lastUpdatedAt": 1_695_000_000,
        "events": events,
    })
    .to_string()
}

#[test]
fn two_reviewers_in_one_revision() {
    let json = document(&json!([
        {"timestamp": 100, "kind": "Invited", "revisionNumber": 1, "reviewerId": 1},
        {"timestamp": 200, "kind": "Accepted", "revisionNumber": 1, "reviewerId": 1},
        {"timestamp": 50, "kind": "Invited", "revisionNumber": 1, "reviewerId": 2},
    ]));

    let result = aggregate_json(&json).unwrap();
    assert_eq!(result.revisions.len(), 1);

    let group = &result.revisions[0];
    assert_eq!(group.revision_number, RevisionNumber(1));
    assert_eq!(group.reviewers.len(), 2);

    let first = &group.reviewers[0];
    assert_eq!(first.reviewer_id, ReviewerId(2));
    assert_eq!(first.last_updated_at, 50);

    let second = &group.reviewers[1];
    assert_eq!(second.reviewer_id, ReviewerId(1));
    assert_eq!(second.invited_at, Some(100));
    assert_eq!(second.accepted_at, Some(200));
    assert_eq!(second.completed_at, None);
    assert_eq!(second.last_updated_at, 200);
    assert_eq!(status(second), ReviewerStatus::Accepted);
}

#[test]
fn empty_events_keep_metadata() {
    let json = document(&json!([]));
    let result = aggregate_json(&json).unwrap();

    assert!(result.revisions.is_empty());
    assert_eq!(result.manuscript.manuscript_id.as_deref(), Some("JOT-2023-0412"));
    assert_eq!(result.manuscript.title, "Reconstructing Review Timelines");
    assert_eq!(result.manuscript.author, "M. Adeyemi");
    assert_eq!(result.manuscript.journal, "Journal of Timelines");
    assert_eq!(result.manuscript.submitted_at, Some(1_690_000_000));
    assert_eq!(result.manuscript.last_updated_at, Some(1_695_000_000));
}

#[test]
fn field_follows_fold_order_while_last_updated_follows_max() {
    let json = document(&json!([
        {"timestamp": 10, "kind": "Invited", "revisionNumber": 1, "reviewerId": 1},
        {"timestamp": 5, "kind": "Invited", "revisionNumber": 1, "reviewerId": 1},
    ]));

    let result = aggregate_json(&json).unwrap();
    let state = &result.revisions[0].reviewers[0];
    assert_eq!(state.invited_at, Some(5));
    assert_eq!(state.last_updated_at, 10);
}

#[test]
fn output_document_shape() {
    let json = document(&json!([
        {"timestamp": 300, "kind": "Completed", "revisionNumber": 2, "reviewerId": 8},
        {"timestamp": 100, "kind": "Invited", "revisionNumber": 0, "reviewerId": 8},
    ]));

    let result = aggregate_json(&json).unwrap();
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["title"], json!("Reconstructing Review Timelines"));
    assert_eq!(
        value["revisions"],
        json!([
            {
                "revisionNumber": 0,
                "reviewers": [{
                    "reviewerId": 8,
                    "invitedAt": 100,
                    "acceptedAt": null,
                    "completedAt": null,
                    "lastUpdatedAt": 100,
                }],
            },
            {
                "revisionNumber": 2,
                "reviewers": [{
                    "reviewerId": 8,
                    "invitedAt": null,
                    "acceptedAt": null,
                    "completedAt": 300,
                    "lastUpdatedAt": 300,
                }],
            },
        ])
    );
}

#[test]
fn partial_lifecycles_are_not_errors() {
    let json = document(&json!([
        {"timestamp": 100, "kind": "Invited", "revisionNumber": 0, "reviewerId": 1},
        {"timestamp": 110, "kind": "Invited", "revisionNumber": 0, "reviewerId": 2},
        {"timestamp": 120, "kind": "Accepted", "revisionNumber": 0, "reviewerId": 2},
    ]));

    let result = aggregate_json(&json).unwrap();
    let summary = summarize(&result);
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].invited, 1);
    assert_eq!(summary[0].accepted, 1);
    assert_eq!(summary[0].completed, 0);
}

#[test]
fn malformed_record_fails_whole_call() {
    let json = document(&json!([
        {"timestamp": 100, "kind": "Invited", "revisionNumber": 0, "reviewerId": 1},
        {"timestamp": 100, "kind": "Invited", "revisionNumber": -1, "reviewerId": 2},
    ]));

    let err = aggregate_json(&json).unwrap_err();
    assert!(matches!(err, AggregateError::InvalidInput { index: Some(1), .. }));
    assert!(parse_document(&json).is_err());
}
