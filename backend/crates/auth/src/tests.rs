//! Router-level tests against the in-memory store.

use std::time::{Duration as StdDuration, Instant};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode, header};
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::domain::value_object::user_id::UserId;
use crate::{AuthConfig, MemoryAuthRepository, auth_router_generic};

const SECRET: &str = "router-test-secret";
const EMAIL: &str = "ada@example.com";
const PASSWORD: &str = "CorrectHorse42";

fn config() -> AuthConfig {
    AuthConfig::new(SECRET, "example.com").unwrap()
}

fn app(repo: &MemoryAuthRepository) -> Router {
    Router::new().nest("/api/auth", auth_router_generic(repo.clone(), config()))
}

struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Value,
}

impl TestResponse {
    fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    fn data_str(&self, field: &str) -> String {
        self.body["data"][field].as_str().unwrap().to_string()
    }
}

async fn send(app: &Router, req: Request<Body>) -> TestResponse {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let headers = res.headers().clone();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_with_header(uri: &str, name: header::HeaderName, value: &str) -> Request<Body> {
    Request::post(uri)
        .header(name, value)
        .body(Body::empty())
        .unwrap()
}

fn get_with_header(uri: &str, name: header::HeaderName, value: &str) -> Request<Body> {
    Request::get(uri)
        .header(name, value)
        .body(Body::empty())
        .unwrap()
}

async fn register(app: &Router, email: &str) -> TestResponse {
    send(
        app,
        post_json(
            "/api/auth/register",
            json!({ "name": "Ada", "email": email, "password": PASSWORD }),
        ),
    )
    .await
}

async fn login(app: &Router, email: &str, password: &str) -> TestResponse {
    send(
        app,
        post_json(
            "/api/auth/login",
            json!({ "email": email, "password": password }),
        ),
    )
    .await
}

// ============================================================================
// Register / Login
// ============================================================================

#[tokio::test]
async fn register_then_login_issues_tokens() {
    let repo = MemoryAuthRepository::new();
    let app = app(&repo);

    let res = register(&app, EMAIL).await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body, json!({ "message": "Register success" }));
    assert_eq!(repo.user_count(), 1);

    let res = login(&app, EMAIL, PASSWORD).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "Login success");

    let access_token = res.data_str("access_token");
    let refresh_token = res.data_str("refresh_token");
    assert!(!access_token.is_empty());
    assert_eq!(refresh_token.len(), 64);
    assert!(refresh_token.chars().all(|c| c.is_ascii_hexdigit()));

    let stored = repo.find_refresh_token(&refresh_token).unwrap();
    let ttl = stored.expires_at - Utc::now();
    assert!(ttl > Duration::days(29) && ttl <= Duration::days(30));
}

#[tokio::test]
async fn login_sets_both_cookies() {
    let repo = MemoryAuthRepository::new();
    let app = app(&repo);
    register(&app, EMAIL).await;

    let res = login(&app, EMAIL, PASSWORD).await;
    let cookies = res.set_cookies();
    assert_eq!(cookies.len(), 2);

    let access = cookies
        .iter()
        .find(|c| c.starts_with("access_token="))
        .unwrap();
    assert!(access.starts_with(&format!("access_token={}", res.data_str("access_token"))));
    assert!(access.contains("Max-Age=900"));

    let refresh = cookies
        .iter()
        .find(|c| c.starts_with("refresh_token="))
        .unwrap();
    assert!(refresh.contains("Max-Age=2592000"));

    for cookie in &cookies {
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Domain=example.com"));
    }
}

#[tokio::test]
async fn duplicate_email_is_conflict() {
    let repo = MemoryAuthRepository::new();
    let app = app(&repo);

    assert_eq!(register(&app, EMAIL).await.status, StatusCode::CREATED);

    let res = register(&app, "ADA@example.com").await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(repo.user_count(), 1);
}

#[tokio::test]
async fn invalid_register_bodies_are_bad_request() {
    let repo = MemoryAuthRepository::new();
    let app = app(&repo);

    let malformed = Request::post("/api/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    assert_eq!(send(&app, malformed).await.status, StatusCode::BAD_REQUEST);

    let cases = [
        json!({ "email": EMAIL, "password": PASSWORD }),
        json!({ "name": "Ada", "email": "not-an-email", "password": PASSWORD }),
        json!({ "name": "   ", "email": EMAIL, "password": PASSWORD }),
        json!({ "name": "Ada", "email": EMAIL, "password": "short" }),
    ];

    for body in cases {
        let res = send(&app, post_json("/api/auth/register", body.clone())).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "body: {}", body);
        assert!(res.body["message"].is_string());
    }

    assert_eq!(repo.user_count(), 0);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_identical() {
    let repo = MemoryAuthRepository::new();
    let app = app(&repo);
    register(&app, EMAIL).await;

    let wrong_password = login(&app, EMAIL, "WrongHorse42").await;
    let unknown_email = login(&app, "nobody@example.com", PASSWORD).await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_email.body);
    assert_eq!(
        wrong_password.body,
        json!({ "message": "Invalid email or password" })
    );
    assert!(wrong_password.set_cookies().is_empty());
    assert_eq!(repo.refresh_token_count(), 0);
}

#[tokio::test]
async fn concurrent_logins_are_independent() {
    let repo = MemoryAuthRepository::new();
    let app = app(&repo);
    register(&app, EMAIL).await;

    let (first, second) = tokio::join!(
        login(&app, EMAIL, PASSWORD),
        login(&app, EMAIL, PASSWORD)
    );
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK);
    let (first, second) = (first.data_str("refresh_token"), second.data_str("refresh_token"));
    assert_ne!(first, second);
    assert_eq!(repo.refresh_token_count(), 2);

    let res = send(
        &app,
        post_with_header(
            "/api/auth/logout",
            header::COOKIE,
            &format!("refresh_token={}", first),
        ),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(repo.find_refresh_token(&first).is_none());
    assert!(repo.find_refresh_token(&second).is_some());

    let res = send(
        &app,
        post_with_header(
            "/api/auth/logout",
            header::AUTHORIZATION,
            &format!("Bearer {}", second),
        ),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(repo.refresh_token_count(), 0);
}

#[tokio::test]
async fn login_accepts_json_without_content_type() {
    let repo = MemoryAuthRepository::new();
    let app = app(&repo);
    register(&app, EMAIL).await;

    let req = Request::post("/api/auth/login")
        .body(Body::from(
            json!({ "email": EMAIL, "password": PASSWORD }).to_string(),
        ))
        .unwrap();
    let res = send(&app, req).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.set_cookies().len(), 2);
}

/// Fastest of three wrong-password logins for `email`.
async fn fastest_failed_login(app: &Router, email: &str) -> StdDuration {
    let mut fastest = StdDuration::MAX;
    for _ in 0..3 {
        let started = Instant::now();
        let res = login(app, email, "WrongHorse42").await;
        fastest = fastest.min(started.elapsed());
        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    }
    fastest
}

#[tokio::test]
async fn unknown_email_takes_as_long_as_wrong_password() {
    let repo = MemoryAuthRepository::new();
    let app = app(&repo);
    register(&app, EMAIL).await;

    let known = fastest_failed_login(&app, EMAIL).await;
    let unknown = fastest_failed_login(&app, "nobody@example.com").await;

    // Both paths run one Argon2 verification; skipping it is orders faster
    assert!(
        unknown * 4 >= known,
        "unknown email {:?} vs wrong password {:?}",
        unknown,
        known
    );
}

#[tokio::test]
async fn login_issues_nothing_when_refresh_token_cannot_be_stored() {
    let repo = MemoryAuthRepository::new();
    let app = app(&repo);
    register(&app, EMAIL).await;

    repo.set_fail_writes(true);
    let res = login(&app, EMAIL, PASSWORD).await;

    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body, json!({ "message": "Internal server error" }));
    assert!(res.set_cookies().is_empty());
    assert_eq!(repo.refresh_token_count(), 0);
}

#[tokio::test]
async fn register_store_failure_is_internal_error() {
    let repo = MemoryAuthRepository::new();
    let app = app(&repo);

    repo.set_fail_writes(true);
    let res = register(&app, EMAIL).await;

    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body, json!({ "message": "Internal server error" }));
    assert_eq!(repo.user_count(), 0);
}

// ============================================================================
// Logout
// ============================================================================

#[tokio::test]
async fn logout_clears_cookies_and_is_idempotent() {
    let repo = MemoryAuthRepository::new();
    let app = app(&repo);
    register(&app, EMAIL).await;
    let refresh_token = login(&app, EMAIL, PASSWORD).await.data_str("refresh_token");

    let cookie = format!("refresh_token={}", refresh_token);

    let res = send(
        &app,
        post_with_header("/api/auth/logout", header::COOKIE, &cookie),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!({ "message": "Logout success" }));
    assert_eq!(repo.refresh_token_count(), 0);

    let cookies = res.set_cookies();
    assert_eq!(cookies.len(), 2);
    assert!(cookies.iter().any(|c| c.starts_with("access_token=;")));
    assert!(cookies.iter().any(|c| c.starts_with("refresh_token=;")));
    assert!(cookies.iter().all(|c| c.contains("Max-Age=0")));

    let res = send(
        &app,
        post_with_header("/api/auth/logout", header::COOKIE, &cookie),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
}

#[tokio::test]
async fn logout_without_token_is_unauthorized() {
    let repo = MemoryAuthRepository::new();
    let app = app(&repo);

    let req = Request::post("/api/auth/logout")
        .body(Body::empty())
        .unwrap();
    let res = send(&app, req).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body, json!({ "message": "invalid token" }));

    let res = send(
        &app,
        post_with_header("/api/auth/logout", header::AUTHORIZATION, "Token abc"),
    )
    .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Access gate
// ============================================================================

#[tokio::test]
async fn gate_accepts_login_access_token() {
    let repo = MemoryAuthRepository::new();
    let app = app(&repo);
    register(&app, EMAIL).await;
    let access_token = login(&app, EMAIL, PASSWORD).await.data_str("access_token");

    let res = send(
        &app,
        get_with_header(
            "/api/auth/me",
            header::AUTHORIZATION,
            &format!("Bearer {}", access_token),
        ),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "Authenticated");
    assert!(res.data_str("user_id").parse::<UserId>().is_ok());

    let res = send(
        &app,
        get_with_header(
            "/api/auth/me",
            header::COOKIE,
            &format!("access_token={}", access_token),
        ),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
}

#[tokio::test]
async fn gate_without_token() {
    let app = app(&MemoryAuthRepository::new());

    let req = Request::get("/api/auth/me").body(Body::empty()).unwrap();
    let res = send(&app, req).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body, json!({ "message": "Authentication required" }));

    // Wrong case on the scheme is not a bearer token
    let res = send(
        &app,
        get_with_header("/api/auth/me", header::AUTHORIZATION, "bearer abc"),
    )
    .await;
    assert_eq!(res.body, json!({ "message": "Authentication required" }));
}

#[tokio::test]
async fn gate_hides_why_a_token_failed() {
    let app = app(&MemoryAuthRepository::new());
    let user_id = UserId::new();

    let expired = config()
        .tokens
        .issue_access_at(user_id, Utc::now() - Duration::minutes(6))
        .unwrap();
    let forged = AuthConfig::new("another-secret", "example.com")
        .unwrap()
        .tokens
        .issue_access(user_id)
        .unwrap();

    let mut bodies = Vec::new();
    for token in [expired.as_str(), forged.as_str(), "garbage"] {
        let res = send(
            &app,
            get_with_header(
                "/api/auth/me",
                header::AUTHORIZATION,
                &format!("Bearer {}", token),
            ),
        )
        .await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
        bodies.push(res.body);
    }

    assert!(bodies.iter().all(|b| *b == json!({ "message": "invalid token" })));
}

#[tokio::test]
async fn gate_prefers_cookie_over_header() {
    let app = app(&MemoryAuthRepository::new());
    let valid = config().tokens.issue_access(UserId::new()).unwrap();

    let req = Request::get("/api/auth/me")
        .header(header::COOKIE, format!("access_token={}", valid))
        .header(header::AUTHORIZATION, "Bearer garbage")
        .body(Body::empty())
        .unwrap();
    assert_eq!(send(&app, req).await.status, StatusCode::OK);

    let req = Request::get("/api/auth/me")
        .header(header::COOKIE, "access_token=garbage")
        .header(header::AUTHORIZATION, format!("Bearer {}", valid))
        .body(Body::empty())
        .unwrap();
    assert_eq!(send(&app, req).await.status, StatusCode::UNAUTHORIZED);
}
