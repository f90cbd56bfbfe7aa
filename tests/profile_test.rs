mod common;

use axum::http::StatusCode;
use portfolio_api::entity::profile::Entity as ProfileEntity;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;

use common::{admin_header, TestApp};

#[tokio::test]
async fn test_get_profile_unset() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/profile").await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert!(body["data"]["profileImage"].is_null());
}

#[tokio::test]
async fn test_set_profile_image() {
    let app = TestApp::new().await;

    let response = app
        .server
        .put("/api/profile")
        .json(&json!({ "profileImage": "https://example.com/me.jpg" }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["data"]["profileImage"], "https://example.com/me.jpg");
    assert!(body["data"]["updatedAt"].is_string());

    let body: serde_json::Value = app.server.get("/api/profile").await.json();
    assert_eq!(body["data"]["profileImage"], "https://example.com/me.jpg");
}

#[tokio::test]
async fn test_set_profile_image_is_idempotent() {
    let app = TestApp::new().await;

    for _ in 0..2 {
        app.server
            .put("/api/profile")
            .json(&json!({ "profileImage": "https://example.com/me.jpg" }))
            .await
            .assert_status(StatusCode::OK);
    }

    let rows = ProfileEntity::find().all(app.db().await).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].profile_image.as_deref(),
        Some("https://example.com/me.jpg")
    );
}

#[tokio::test]
async fn test_set_profile_image_replaces_and_clears() {
    let app = TestApp::new().await;

    app.server
        .put("/api/profile")
        .json(&json!({ "profileImage": "https://example.com/old.jpg" }))
        .await
        .assert_status(StatusCode::OK);

    let body: serde_json::Value = app
        .server
        .put("/api/profile")
        .json(&json!({ "profileImage": "https://example.com/new.jpg" }))
        .await
        .json();
    assert_eq!(body["data"]["profileImage"], "https://example.com/new.jpg");

    let body: serde_json::Value = app
        .server
        .put("/api/profile")
        .json(&json!({ "profileImage": null }))
        .await
        .json();
    assert!(body["data"]["profileImage"].is_null());

    let count = ProfileEntity::find().count(app.db().await).await.unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_set_profile_requires_admin_token_when_configured() {
    let app = TestApp::with_admin_token().await;

    app.server
        .put("/api/profile")
        .json(&json!({ "profileImage": "https://example.com/me.jpg" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    app.server
        .put("/api/profile")
        .add_header("Authorization", admin_header())
        .json(&json!({ "profileImage": "https://example.com/me.jpg" }))
        .await
        .assert_status(StatusCode::OK);

    app.server
        .get("/api/profile")
        .await
        .assert_status(StatusCode::OK);
}
