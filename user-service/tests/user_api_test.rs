mod common;

use axum::http::StatusCode;
use common::{get, post_json, post_raw, send, test_router};
use serde_json::json;

#[tokio::test]
async fn register_then_fetch_profile() {
    let app = test_router();

    let (status, created) = send(
        &app,
        post_json(
            "/api/users/register",
            &json!({
                "email": "runner@example.com",
                "keycloakId": "kc-runner",
                "password": "s3cret-pass",
                "firstName": "Ada",
                "lastName": "Lovelace"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["email"], "runner@example.com");
    assert_eq!(created["keycloakId"], "kc-runner");
    assert_eq!(created["firstName"], "Ada");
    assert_eq!(created["role"], "USER");
    assert!(created.get("password").is_none());
    assert!(created.get("passwordHash").is_none());

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = send(&app, get(&format!("/api/users/{}", id))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn duplicate_email_returns_conflict() {
    let app = test_router();
    let first = json!({ "email": "dup@example.com", "keycloakId": "kc-1" });
    let second = json!({ "email": "dup@example.com", "keycloakId": "kc-2" });

    let (status, _) = send(&app, post_json("/api/users/register", &first)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, post_json("/api/users/register", &second)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Email already registered");

    // The losing registration left nothing behind.
    let (_, exists) = send(&app, get("/api/users/kc-2/validate")).await;
    assert_eq!(exists, json!(false));
}

#[tokio::test]
async fn duplicate_subject_id_returns_conflict() {
    let app = test_router();

    send(
        &app,
        post_json(
            "/api/users/register",
            &json!({ "email": "a@example.com", "keycloakId": "kc-1" }),
        ),
    )
    .await;
    let (status, body) = send(
        &app,
        post_json(
            "/api/users/register",
            &json!({ "email": "b@example.com", "keycloakId": "kc-1" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "keycloakId already registered");
}

#[tokio::test]
async fn invalid_email_is_rejected_without_creating_user() {
    let app = test_router();

    let (status, body) = send(
        &app,
        post_json(
            "/api/users/register",
            &json!({ "email": "not-an-email", "keycloakId": "kc-bad" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation error");
    assert!(body["details"].as_str().unwrap().contains("email"));

    let (_, exists) = send(&app, get("/api/users/kc-bad/validate")).await;
    assert_eq!(exists, json!(false));
}

#[tokio::test]
async fn blank_email_is_rejected() {
    let app = test_router();
    let (status, _) = send(
        &app,
        post_json(
            "/api/users/register",
            &json!({ "email": "", "keycloakId": "kc-1" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_or_incomplete_json_is_bad_request() {
    let app = test_router();

    let (status, body) = send(&app, post_raw("/api/users/register", "{\"email\":")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Json parse error"));

    let (status, _) = send(
        &app,
        post_raw("/api/users/register", r#"{"email":"a@example.com"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_profile_is_not_found() {
    let app = test_router();
    let (status, body) = send(&app, get("/api/users/does-not-exist")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn validate_looks_up_by_subject_id() {
    let app = test_router();

    let (_, created) = send(
        &app,
        post_json(
            "/api/users/register",
            &json!({ "email": "sub@example.com", "keycloakId": "kc-sub" }),
        ),
    )
    .await;

    let (status, exists) = send(&app, get("/api/users/kc-sub/validate")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(exists, json!(true));

    // The internal id is not a subject id.
    let internal_id = created["id"].as_str().unwrap();
    let (status, exists) = send(
        &app,
        get(&format!("/api/users/{}/validate", internal_id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(exists, json!(false));
}

#[tokio::test]
async fn validate_unknown_subject_is_false() {
    let app = test_router();
    let (status, exists) = send(&app, get("/api/users/kc-nobody/validate")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(exists, json!(false));
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = test_router();
    let response = tower::util::ServiceExt::oneshot(app, get("/health"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
}

#[tokio::test]
async fn oversized_subject_id_is_rejected_before_store() {
    let app = test_router();
    let keycloak_id = "k".repeat(300);

    let (status, body) = send(
        &app,
        post_json(
            "/api/users/register",
            &json!({ "email": "long@example.com", "keycloakId": keycloak_id }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation error");

    let (_, exists) = send(&app, get(&format!("/api/users/{}/validate", keycloak_id))).await;
    assert_eq!(exists, json!(false));
}

#[tokio::test]
async fn email_is_trimmed_and_lowercased() {
    let app = test_router();

    let (status, created) = send(
        &app,
        post_json(
            "/api/users/register",
            &json!({ "email": "  Runner@Example.com ", "keycloakId": "kc-trim" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["email"], "runner@example.com");
}
