//! Moderation API integration tests
//!
//! Exercises the authenticated surface: the access gate in both failure
//! modes, listing with pagination, statistics, mark-read and delete.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use common::{TestApp, ADMIN_TOKEN};
use pretty_assertions::assert_eq;

/// GET an admin path with the valid token attached.
async fn admin_get(server: &TestServer, path: &str) -> axum_test::TestResponse {
    server.get(path).add_header("x-admin-token", ADMIN_TOKEN).await
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = TestApp::spawn().await;

    let response = app.server.get("/api/admin/feedback").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Authentication required");
}

#[tokio::test]
async fn test_wrong_token_is_forbidden() {
    let app = TestApp::spawn().await;

    let response = app
        .server
        .get("/api/admin/feedback")
        .add_header("x-admin-token", "not-the-token")
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Invalid authentication token");
}

#[tokio::test]
async fn test_token_accepted_via_query_parameter() {
    let app = TestApp::spawn().await;

    let response = app
        .server
        .get(&format!("/api/admin/statistics?token={ADMIN_TOKEN}"))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_list_pagination() {
    let app = TestApp::spawn().await;
    for i in 0..120 {
        app.store
            .create(&format!("seeded feedback entry {i}"), "general")
            .await
            .unwrap();
    }

    let response = admin_get(&app.server, "/api/admin/feedback?limit=50&offset=0").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["feedback"].as_array().unwrap().len(), 50);
    assert_eq!(body["data"]["pagination"]["total"], 120);
    assert_eq!(body["data"]["pagination"]["limit"], 50);
    assert_eq!(body["data"]["pagination"]["offset"], 0);
    assert_eq!(body["data"]["pagination"]["hasMore"], true);

    // Newest first across the page.
    let timestamps: Vec<i64> = body["data"]["feedback"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["created_at"].as_i64().unwrap())
        .collect();
    assert!(timestamps.windows(2).all(|pair| pair[0] >= pair[1]));

    let response = admin_get(&app.server, "/api/admin/feedback?limit=50&offset=100").await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"]["feedback"].as_array().unwrap().len(), 20);
    assert_eq!(body["data"]["pagination"]["hasMore"], false);
}

#[tokio::test]
async fn test_list_defaults() {
    let app = TestApp::spawn().await;
    app.store.create("a single record", "other").await.unwrap();

    let response = admin_get(&app.server, "/api/admin/feedback").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["data"]["pagination"]["limit"], 50);
    assert_eq!(body["data"]["pagination"]["offset"], 0);
    assert_eq!(body["data"]["feedback"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_rejects_bad_pagination() {
    let app = TestApp::spawn().await;

    for path in [
        "/api/admin/feedback?limit=0",
        "/api/admin/feedback?limit=201",
    ] {
        let response = admin_get(&app.server, path).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Limit must be between 1 and 200");
    }

    let response = admin_get(&app.server, "/api/admin/feedback?offset=-1").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Offset must be non-negative");
}

#[tokio::test]
async fn test_statistics_stay_consistent() {
    let app = TestApp::spawn().await;

    let first = app.store.create("general entry one", "general").await.unwrap();
    app.store.create("general entry two", "general").await.unwrap();
    let doomed = app.store.create("complaint entry", "complaint").await.unwrap();
    app.store.create("praise entry here", "praise").await.unwrap();
    app.store.mark_read(first.id).await.unwrap();
    app.store.delete(doomed.id).await.unwrap();

    let response = admin_get(&app.server, "/api/admin/statistics").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    let data = &body["data"];
    assert_eq!(data["total"], 3);
    assert_eq!(data["unread"], 2);

    let by_category = data["byCategory"].as_array().unwrap();
    let sum: i64 = by_category
        .iter()
        .map(|c| c["count"].as_i64().unwrap())
        .sum();
    assert_eq!(sum, data["total"].as_i64().unwrap());
    assert!(!by_category
        .iter()
        .any(|c| c["category"] == "complaint"));
}

#[tokio::test]
async fn test_mark_read_then_repeat_is_not_found() {
    let app = TestApp::spawn().await;
    let created = app.store.create("please review this", "general").await.unwrap();

    let response = app
        .server
        .patch(&format!("/api/admin/feedback/{}/read", created.id))
        .add_header("x-admin-token", ADMIN_TOKEN)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Feedback marked as read");

    // Marking twice leaves the record read; the second call reports the
    // same not-found outcome as a missing id.
    let response = app
        .server
        .patch(&format!("/api/admin/feedback/{}/read", created.id))
        .add_header("x-admin-token", ADMIN_TOKEN)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Feedback not found");

    let records = app.store.list(10, 0).await.unwrap();
    assert_eq!(records[0].status, echobox::store::FeedbackStatus::Read);
}

#[tokio::test]
async fn test_mark_read_missing_and_invalid_ids() {
    let app = TestApp::spawn().await;

    let response = app
        .server
        .patch("/api/admin/feedback/999/read")
        .add_header("x-admin-token", ADMIN_TOKEN)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = app
        .server
        .patch("/api/admin/feedback/0/read")
        .add_header("x-admin-token", ADMIN_TOKEN)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Invalid feedback ID");
}

#[tokio::test]
async fn test_delete_is_permanent_and_ids_are_not_reused() {
    let app = TestApp::spawn().await;
    let created = app.store.create("about to be removed", "other").await.unwrap();

    let response = app
        .server
        .delete(&format!("/api/admin/feedback/{}", created.id))
        .add_header("x-admin-token", ADMIN_TOKEN)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Feedback deleted");

    let response = app
        .server
        .delete(&format!("/api/admin/feedback/{}", created.id))
        .add_header("x-admin-token", ADMIN_TOKEN)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let replacement = app.store.create("takes a fresh id", "other").await.unwrap();
    assert!(replacement.id > created.id);
}

#[tokio::test]
async fn test_admin_routes_require_token_individually() {
    let app = TestApp::spawn().await;

    let response = app.server.get("/api/admin/statistics").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = app.server.patch("/api/admin/feedback/1/read").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = app.server.delete("/api/admin/feedback/1").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
