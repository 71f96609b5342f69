mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_register_login_and_access_protected_route() {
    let app = TestApp::spawn().await;

    let response = app.register("test", "test@example.com", "password").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "message": "Register success" }));

    let token = app.login("test@example.com", "password").await;
    assert!(!token.is_empty());

    let response = app
        .get_authenticated("/api/v1/users", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    let users = body["data"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["name"], "test");
    assert_eq!(users[0]["email"], "test@example.com");
    assert!(users[0].get("password").is_none());
}

#[tokio::test]
async fn test_protected_route_rejects_missing_and_garbled_tokens() {
    let app = TestApp::spawn().await;
    app.register("test", "test@example.com", "password").await;

    let response = app
        .get("/api/v1/users")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "error": "Unauthorized." }));

    let response = app
        .get_authenticated("/api/v1/users", "garbled.token.value")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = TestApp::spawn_with_ttl(chrono::Duration::seconds(-1)).await;
    app.register("test", "test@example.com", "password").await;

    let token = app.login("test@example.com", "password").await;

    let response = app
        .get_authenticated("/api/v1/users", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "error": "Token is expired" }));
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let app = TestApp::spawn().await;

    let first = app.register("test", "test@example.com", "password").await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = app.register("other", "TEST@example.com", "password").await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body: Value = second.json().await.expect("Failed to parse response");
    assert!(body["error"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn test_register_validation() {
    let app = TestApp::spawn().await;

    let response = app.register("test", "invalid email", "password").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid email format"));

    let response = app.register("test", "test@example.com", "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "error": "password is required" }));

    let response = app
        .register("test", "test@example.com", &"a".repeat(104))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_failures() {
    let app = TestApp::spawn().await;
    app.register("test", "test@example.com", "password").await;

    let response = app
        .post("/api/v1/login")
        .json(&json!({ "email": "test@example.com", "password": "wrong" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "error": "Password is invalid." }));

    let response = app
        .post("/api/v1/login")
        .json(&json!({ "email": "nobody@example.com", "password": "password" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .post("/api/v1/login")
        .json(&json!({ "email": "invalid email", "password": "password" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_update_and_delete_user() {
    let app = TestApp::spawn().await;
    let (user_id, token) = app.signed_in_user("test", "test@example.com").await;
    let path = format!("/api/v1/users/{}", user_id);

    let response = app
        .get_authenticated(&path, &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["id"], user_id.as_str());
    assert_eq!(body["name"], "test");
    assert!(body["created_at"].is_string());

    let response = app
        .patch_authenticated(&path, &token)
        .json(&json!({ "name": "renamed" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "message": "Update success" }));

    let response = app
        .get_authenticated("/api/v1/users?name=renamed", &token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let response = app
        .delete_authenticated(&path, &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "message": "Delete success" }));

    let response = app
        .get_authenticated(&path, &token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["deleted_at"].is_string());

    let response = app
        .post("/api/v1/login")
        .json(&json!({ "email": "test@example.com", "password": "password" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_and_unknown_ids() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_in_user("test", "test@example.com").await;

    let response = app
        .get_authenticated("/api/v1/users/not-an-object-id", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .get_authenticated("/api/v1/users/64b7f0c2a1e4d5f6a7b8c9d0", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "error": "user not found" }));
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/v1/health")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "status": "ok" }));
}
