//! Bookmark integration tests.
//!
//! Covers pair uniqueness, referent existence checks, the enriched listing
//! (ordering and dangling-cafe handling), and both deletion paths.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use serde_json::json;
use spotbook_core::{BookmarkId, CafeId, UserId};

// ============================================================================
// Creation
// ============================================================================

#[tokio::test]
async fn create_bookmark_success() {
    let harness = TestHarness::new();
    let user_id = harness.create_user("alice").await;
    let cafe_id = harness.create_cafe("The Coffee Corner").await;

    let response = harness
        .server
        .post("/bookmarks/")
        .json(&json!({ "user_id": user_id, "cafe_id": cafe_id }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["user_id"], user_id);
    assert_eq!(body["cafe_id"], cafe_id);
    assert!(body["bookmarked_at"].as_str().is_some());

    // The pair now exists.
    let response = harness
        .server
        .get(&format!("/users/{user_id}/bookmarks/{cafe_id}/exists"))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["exists"], true);
}

#[tokio::test]
async fn duplicate_bookmark_conflicts_and_leaves_one_record() {
    let harness = TestHarness::new();
    let user_id = harness.create_user("alice").await;
    let cafe_id = harness.create_cafe("The Coffee Corner").await;

    harness.create_bookmark(&user_id, &cafe_id).await;

    let response = harness
        .server
        .post("/bookmarks/")
        .json(&json!({ "user_id": user_id, "cafe_id": cafe_id }))
        .await;
    response.assert_status(StatusCode::CONFLICT);

    // Exactly one bookmark remains retrievable.
    let response = harness
        .server
        .get(&format!("/users/{user_id}/bookmarks"))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn create_bookmark_unknown_cafe_fails_without_side_effects() {
    let harness = TestHarness::new();
    let user_id = harness.create_user("alice").await;
    let missing_cafe = CafeId::generate().to_string();

    let response = harness
        .server
        .post("/bookmarks/")
        .json(&json!({ "user_id": user_id, "cafe_id": missing_cafe }))
        .await;
    response.assert_status_not_found();

    // No bookmark was created.
    let response = harness
        .server
        .get(&format!("/users/{user_id}/bookmarks/{missing_cafe}/exists"))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["exists"], false);
}

#[tokio::test]
async fn create_bookmark_unknown_user_fails() {
    let harness = TestHarness::new();
    let cafe_id = harness.create_cafe("The Coffee Corner").await;
    let missing_user = UserId::generate().to_string();

    let response = harness
        .server
        .post("/bookmarks/")
        .json(&json!({ "user_id": missing_user, "cafe_id": cafe_id }))
        .await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn create_bookmark_malformed_id_is_bad_request() {
    let harness = TestHarness::new();
    let cafe_id = harness.create_cafe("The Coffee Corner").await;

    let response = harness
        .server
        .post("/bookmarks/")
        .json(&json!({ "user_id": "not-a-ulid", "cafe_id": cafe_id }))
        .await;
    response.assert_status_bad_request();
}

// ============================================================================
// Get
// ============================================================================

#[tokio::test]
async fn get_bookmark_success() {
    let harness = TestHarness::new();
    let user_id = harness.create_user("alice").await;
    let cafe_id = harness.create_cafe("The Coffee Corner").await;
    let bookmark_id = harness.create_bookmark(&user_id, &cafe_id).await;

    let response = harness.server.get(&format!("/bookmarks/{bookmark_id}")).await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["id"], bookmark_id);
    assert_eq!(body["cafe_id"], cafe_id);
    // The plain bookmark shape carries no cafe detail.
    assert!(body.get("cafe").is_none());
}

#[tokio::test]
async fn get_unknown_bookmark_not_found() {
    let harness = TestHarness::new();
    let missing = BookmarkId::generate().to_string();

    let response = harness.server.get(&format!("/bookmarks/{missing}")).await;

    response.assert_status_not_found();
}

// ============================================================================
// Enriched listing
// ============================================================================

#[tokio::test]
async fn list_user_bookmarks_is_enriched_and_creation_ordered() {
    let harness = TestHarness::new();
    let user_id = harness.create_user("alice").await;

    let mut cafe_ids = Vec::new();
    for name in ["Spot A", "Spot B", "Spot C"] {
        let cafe_id = harness.create_cafe(name).await;
        harness.create_bookmark(&user_id, &cafe_id).await;
        cafe_ids.push(cafe_id);
    }

    let response = harness
        .server
        .get(&format!("/users/{user_id}/bookmarks"))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 3);

    // Ordered by bookmarked_at ascending (creation order).
    let listed: Vec<_> = entries
        .iter()
        .map(|e| e["cafe_id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(listed, cafe_ids);

    // Each entry carries the full cafe record.
    assert_eq!(entries[0]["cafe"]["name"], "Spot A");
    assert_eq!(entries[2]["cafe"]["name"], "Spot C");
    assert_eq!(entries[0]["cafe"]["address"]["city"], "Madison");
}

#[tokio::test]
async fn list_user_bookmarks_skips_dangling_cafe() {
    let harness = TestHarness::new();
    let user_id = harness.create_user("alice").await;
    let kept_cafe = harness.create_cafe("Kept").await;
    let deleted_cafe = harness.create_cafe("Doomed").await;
    harness.create_bookmark(&user_id, &kept_cafe).await;
    harness.create_bookmark(&user_id, &deleted_cafe).await;

    harness
        .server
        .delete(&format!("/cafes/{deleted_cafe}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    // The listing still succeeds and omits the stale entry.
    let response = harness
        .server
        .get(&format!("/users/{user_id}/bookmarks"))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["cafe_id"], kept_cafe);
}

#[tokio::test]
async fn list_bookmarks_unknown_user_not_found() {
    let harness = TestHarness::new();
    let missing = UserId::generate().to_string();

    let response = harness
        .server
        .get(&format!("/users/{missing}/bookmarks"))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn list_bookmarks_only_returns_that_users_bookmarks() {
    let harness = TestHarness::new();
    let alice = harness.create_user("alice").await;
    let bob = harness.create_user("bob").await;
    let cafe_id = harness.create_cafe("Shared Spot").await;
    harness.create_bookmark(&alice, &cafe_id).await;
    harness.create_bookmark(&bob, &cafe_id).await;

    let response = harness.server.get(&format!("/users/{alice}/bookmarks")).await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["user_id"], alice);
}

// ============================================================================
// Deletion
// ============================================================================

#[tokio::test]
async fn delete_bookmark_by_id() {
    let harness = TestHarness::new();
    let user_id = harness.create_user("alice").await;
    let cafe_id = harness.create_cafe("The Coffee Corner").await;
    let bookmark_id = harness.create_bookmark(&user_id, &cafe_id).await;

    let response = harness
        .server
        .delete(&format!("/bookmarks/{bookmark_id}"))
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    harness
        .server
        .get(&format!("/bookmarks/{bookmark_id}"))
        .await
        .assert_status_not_found();

    // Repeat delete reports NotFound.
    harness
        .server
        .delete(&format!("/bookmarks/{bookmark_id}"))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn delete_bookmark_by_pair_then_repeat_fails() {
    let harness = TestHarness::new();
    let user_id = harness.create_user("alice").await;
    let cafe_id = harness.create_cafe("The Coffee Corner").await;
    harness.create_bookmark(&user_id, &cafe_id).await;

    let response = harness
        .server
        .delete(&format!("/users/{user_id}/bookmarks/{cafe_id}"))
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    // Repeating the delete reports NotFound rather than silently succeeding.
    harness
        .server
        .delete(&format!("/users/{user_id}/bookmarks/{cafe_id}"))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn pair_is_reusable_after_deletion() {
    let harness = TestHarness::new();
    let user_id = harness.create_user("alice").await;
    let cafe_id = harness.create_cafe("The Coffee Corner").await;
    harness.create_bookmark(&user_id, &cafe_id).await;

    harness
        .server
        .delete(&format!("/users/{user_id}/bookmarks/{cafe_id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    // The pair is free again.
    let response = harness
        .server
        .post("/bookmarks/")
        .json(&json!({ "user_id": user_id, "cafe_id": cafe_id }))
        .await;
    response.assert_status(StatusCode::CREATED);
}

// ============================================================================
// Existence check
// ============================================================================

async fn pair_exists(harness: &TestHarness, user_id: &str, cafe_id: &str) -> bool {
    let response = harness
        .server
        .get(&format!("/users/{user_id}/bookmarks/{cafe_id}/exists"))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    body["exists"].as_bool().unwrap()
}

#[tokio::test]
async fn exists_tracks_pair_lifecycle() {
    let harness = TestHarness::new();
    let user_id = harness.create_user("alice").await;
    let cafe_id = harness.create_cafe("The Coffee Corner").await;

    assert!(!pair_exists(&harness, &user_id, &cafe_id).await);

    harness.create_bookmark(&user_id, &cafe_id).await;
    assert!(pair_exists(&harness, &user_id, &cafe_id).await);

    harness
        .server
        .delete(&format!("/users/{user_id}/bookmarks/{cafe_id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert!(!pair_exists(&harness, &user_id, &cafe_id).await);
}

#[tokio::test]
async fn exists_never_fails_for_unknown_pair() {
    let harness = TestHarness::new();
    let user_id = UserId::generate();
    let cafe_id = CafeId::generate();

    let response = harness
        .server
        .get(&format!("/users/{user_id}/bookmarks/{cafe_id}/exists"))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["exists"], false);
}
