//! Endpoint tests for the channel authorization relay.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use hmac::{Hmac, Mac};
use http_body_util::BodyExt;
use serde_json::Value;
use sha2::Sha256;
use tower::ServiceExt;

use server::config::{AppState, RelayConfig};
use server::core::router;
use server::core::session::{Identity, SessionStore};

fn test_config() -> RelayConfig {
    RelayConfig {
        app_id: "1001".to_string(),
        key: "app-key".to_string(),
        secret: "app-secret".to_string(),
        cluster: "us2".to_string(),
        port: 0,
    }
}

struct TestContext {
    sessions: Arc<SessionStore>,
    app: Router,
}

impl TestContext {
    fn new() -> Self {
        let sessions = Arc::new(SessionStore::new());
        let state = AppState::new(test_config(), sessions.clone());
        Self {
            sessions,
            app: router(state),
        }
    }

    async fn session_for(&self, id: &str, name: Option<&str>, email: &str) -> String {
        self.sessions
            .issue(Identity::new(id, name.map(str::to_string), email))
            .await
    }

    async fn post_auth(&self, token: Option<&str>, body: &str) -> Response {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/pusher/auth")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();
        self.app.clone().oneshot(request).await.unwrap()
    }
}

async fn json_body(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn signature(secret: &str, message: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[tokio::test]
async fn missing_session_is_unauthorized() {
    let ctx = TestContext::new();

    let response = ctx
        .post_auth(None, "socket_id=123.456&channel_name=presence-note-42")
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await, serde_json::json!({"error": "Unauthorized"}));
}

#[tokio::test]
async fn unknown_token_is_unauthorized() {
    let ctx = TestContext::new();

    let response = ctx
        .post_auth(
            Some("not-a-session"),
            "socket_id=123.456&channel_name=presence-note-42",
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_bearer_scheme_is_unauthorized() {
    let ctx = TestContext::new();
    let token = ctx.session_for("u1", Some("Ana"), "ana@example.com").await;

    let request = Request::builder()
        .method("POST")
        .uri("/pusher/auth")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::AUTHORIZATION, format!("Basic {token}"))
        .body(Body::from(
            "socket_id=123.456&channel_name=presence-note-42".to_string(),
        ))
        .unwrap();
    let response = ctx.app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn missing_socket_id_is_bad_request() {
    let ctx = TestContext::new();
    let token = ctx.session_for("u1", Some("Ana"), "ana@example.com").await;

    let response = ctx
        .post_auth(Some(&token), "channel_name=presence-note-42")
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({"error": "Missing parameters"})
    );
}

#[tokio::test]
async fn empty_channel_name_is_bad_request() {
    let ctx = TestContext::new();
    let token = ctx.session_for("u1", Some("Ana"), "ana@example.com").await;

    let response = ctx
        .post_auth(Some(&token), "socket_id=123.456&channel_name=")
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn presence_channel_auth_embeds_identity() {
    let ctx = TestContext::new();
    let token = ctx.session_for("u1", Some("Ana"), "ana@example.com").await;

    let response = ctx
        .post_auth(
            Some(&token),
            "socket_id=123.456&channel_name=presence-note-42",
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    let channel_data = body["channel_data"].as_str().unwrap();
    let member: Value = serde_json::from_str(channel_data).unwrap();
    assert_eq!(member["user_id"], "u1");
    assert_eq!(member["user_info"]["name"], "Ana");
    assert_eq!(member["user_info"]["email"], "ana@example.com");

    let expected = signature(
        "app-secret",
        &format!("123.456:presence-note-42:{channel_data}"),
    );
    assert_eq!(body["auth"], format!("app-key:{expected}"));
}

#[tokio::test]
async fn display_name_falls_back_to_email() {
    let ctx = TestContext::new();
    let token = ctx.session_for("u2", None, "sam@example.com").await;

    let response = ctx
        .post_auth(Some(&token), "socket_id=1.2&channel_name=presence-note-7")
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let member: Value = serde_json::from_str(body["channel_data"].as_str().unwrap()).unwrap();
    assert_eq!(member["user_info"]["name"], "sam@example.com");
}

#[tokio::test]
async fn private_channel_auth_has_no_channel_data() {
    let ctx = TestContext::new();
    let token = ctx.session_for("u1", Some("Ana"), "ana@example.com").await;

    let response = ctx
        .post_auth(Some(&token), "socket_id=1.2&channel_name=private-note-42")
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body.get("channel_data").is_none());

    let expected = signature("app-secret", "1.2:private-note-42");
    assert_eq!(body["auth"], format!("app-key:{expected}"));
}

#[tokio::test]
async fn signing_failure_is_internal_error_with_message() {
    let ctx = TestContext::new();
    let token = ctx.session_for("u1", Some("Ana"), "ana@example.com").await;

    // A public channel never needs authorization, so signing it fails
    let response = ctx
        .post_auth(Some(&token), "socket_id=123.456&channel_name=note-42")
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("note-42"));
}

#[tokio::test]
async fn malformed_socket_id_is_internal_error() {
    let ctx = TestContext::new();
    let token = ctx.session_for("u1", Some("Ana"), "ana@example.com").await;

    let response = ctx
        .post_auth(
            Some(&token),
            "socket_id=not-a-socket&channel_name=presence-note-42",
        )
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn repeated_requests_yield_identical_tokens() {
    let ctx = TestContext::new();
    let token = ctx.session_for("u1", Some("Ana"), "ana@example.com").await;
    let body = "socket_id=123.456&channel_name=presence-note-42";

    let first = json_body(ctx.post_auth(Some(&token), body).await).await;
    let second = json_body(ctx.post_auth(Some(&token), body).await).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn health_check_needs_no_session() {
    let ctx = TestContext::new();

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = ctx.app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
