//! Router integration tests.
//!
//! These exercise routing, middleware, and auth guards only. The pool is
//! lazy and every asserted path rejects before touching the database, so
//! no PostgreSQL instance is needed.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use hirelist_api::auth::create_token;
use hirelist_api::{create_router, ApiConfig, AppState};

fn test_app() -> (Router, ApiConfig) {
    let config = ApiConfig::default();
    let state = AppState::new(config.clone()).expect("state");
    (create_router(state), config)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn health_endpoint_is_open() {
    let (app, _) = test_app();
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn responses_carry_security_and_request_id_headers() {
    let (app, _) = test_app();
    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(
        response.headers().get("X-Content-Type-Options").unwrap(),
        "nosniff"
    );
    assert!(response.headers().contains_key("X-Request-ID"));
}

#[tokio::test]
async fn incoming_request_id_is_echoed() {
    let (app, _) = test_app();
    let request = Request::builder()
        .uri("/health")
        .header("X-Request-ID", "req-123")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.headers().get("X-Request-ID").unwrap(), "req-123");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (app, _) = test_app();
    let response = app.oneshot(get("/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn register_with_invalid_email_is_rejected() {
    let (app, _) = test_app();
    let response = app
        .oneshot(post_json(
            "/auth/register",
            None,
            r#"{"username": "u1", "password": "password1", "firstName": "U",
                "lastName": "One", "email": "not-an-email"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["detail"].as_str().unwrap().contains("email"));
}

#[tokio::test]
async fn create_company_requires_auth() {
    let (app, _) = test_app();
    let response = app
        .oneshot(post_json(
            "/companies",
            None,
            r#"{"handle": "acme", "name": "Acme"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_bearer_header_is_unauthorized() {
    let (app, _) = test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/companies")
        .header("Content-Type", "application/json")
        .header("Authorization", "Token abc")
        .body(Body::from(r#"{"handle": "acme", "name": "Acme"}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_job_requires_admin() {
    let (app, config) = test_app();
    let token = create_token("plain-user", false, &config.secret_key).unwrap();
    let response = app
        .oneshot(post_json(
            "/jobs",
            Some(&token),
            r#"{"title": "Engineer", "companyHandle": "acme"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn list_users_requires_admin() {
    let (app, config) = test_app();
    let token = create_token("plain-user", false, &config.secret_key).unwrap();
    let request = Request::builder()
        .uri("/users")
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn get_other_user_is_forbidden_for_non_admin() {
    let (app, config) = test_app();
    let token = create_token("u1", false, &config.secret_key).unwrap();
    let request = Request::builder()
        .uri("/users/u2")
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn token_from_other_secret_is_rejected() {
    let (app, _) = test_app();
    let token = create_token("u1", true, "some-other-secret").unwrap();
    let request = Request::builder()
        .uri("/users")
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
