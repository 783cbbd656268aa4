//! HTTP-level tests for `/api/v1/automation-rules` body validation.
//!
//! Rule bodies are validated through the core rule contract before any
//! write, so these paths run without a live Postgres.

mod common;

use common::{assert_validation_error, build_test_app, post_json, put_json};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: rule name is required
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_requires_name() {
    let app = build_test_app();
    let response = post_json(
        app,
        "/api/v1/automation-rules",
        json!({
            "name": " ",
            "rule_type": "auto_notify"
        }),
    )
    .await;
    assert_validation_error(response).await;
}

// ---------------------------------------------------------------------------
// Test: auto_assign requires an assignment target
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_auto_assign_without_target_is_rejected() {
    let app = build_test_app();
    let response = post_json(
        app,
        "/api/v1/automation-rules",
        json!({
            "name": "assign critical tickets",
            "rule_type": "auto_assign",
            "conditions": { "priority": "critical" },
            "actions": { "round_robin": true }
        }),
    )
    .await;
    assert_validation_error(response).await;
}

// ---------------------------------------------------------------------------
// Test: two populated assignment targets violate the exclusion group
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_two_assignment_targets_are_rejected() {
    let app = build_test_app();
    let response = post_json(
        app,
        "/api/v1/automation-rules",
        json!({
            "name": "conflicting targets",
            "rule_type": "auto_assign",
            "actions": {
                "assign_to_user_id": 4,
                "assign_to_role": "supervisor"
            }
        }),
    )
    .await;
    assert_validation_error(response).await;
}

// ---------------------------------------------------------------------------
// Test: action keys must be legal for the rule type
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_illegal_action_key_is_rejected() {
    let app = build_test_app();
    let response = post_json(
        app,
        "/api/v1/automation-rules",
        json!({
            "name": "close stale",
            "rule_type": "auto_close",
            "actions": { "assign_to_user_id": 2 }
        }),
    )
    .await;
    assert_validation_error(response).await;
}

// ---------------------------------------------------------------------------
// Test: close_after_hours must be a positive integer
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_close_after_hours_must_be_positive() {
    let app = build_test_app();
    let response = post_json(
        app,
        "/api/v1/automation-rules",
        json!({
            "name": "close immediately",
            "rule_type": "auto_close",
            "actions": { "close_after_hours": 0 }
        }),
    )
    .await;
    assert_validation_error(response).await;
}

// ---------------------------------------------------------------------------
// Test: PUT bodies are validated before the row is looked up
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_update_validates_before_lookup() {
    let app = build_test_app();
    let response = put_json(
        app,
        "/api/v1/automation-rules/42",
        json!({
            "name": "renamed rule",
            "priority": 10,
            "is_active": true,
            "rule_type": "auto_assign",
            "actions": {}
        }),
    )
    .await;
    assert_validation_error(response).await;
}

// ---------------------------------------------------------------------------
// Test: unknown rule_type tags are rejected at deserialization
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_unknown_rule_type_is_rejected() {
    let app = build_test_app();
    let response = post_json(
        app,
        "/api/v1/automation-rules",
        json!({
            "name": "future rule",
            "rule_type": "auto_archive",
            "actions": {}
        }),
    )
    .await;
    assert!(
        response.status().is_client_error(),
        "unknown rule_type should be rejected, got {}",
        response.status()
    );
}
