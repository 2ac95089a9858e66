//! The demo host router end to end: access middleware + /api/v1 handlers.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use openbook_oauth::api::v1::dto::me::MeResponse;
use openbook_oauth::app::build_router;
use openbook_oauth::config::{HttpConfig, OAuthConfig};
use openbook_oauth::oauth::{RequestAuthenticator, RestAccessTokenClient};
use openbook_oauth::state::AppState;

async fn token_service() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/access-token/gen/abc123"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "abc123", "user_id": 42, "client_id": 7})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/access-token/gen/expired"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"status": 404, "message": "not found"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/access-token/gen/bad"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"status": 500, "message": "boom"})),
        )
        .mount(&server)
        .await;

    server
}

fn app(server: &MockServer) -> Router {
    app_for(&server.uri())
}

fn app_for(base_url: &str) -> Router {
    let config = OAuthConfig::new(Url::parse(base_url).unwrap(), Duration::from_millis(200));
    let client = RestAccessTokenClient::new(&config).unwrap();
    let state = AppState::new(RequestAuthenticator::new(Arc::new(client)));

    build_router(state, &HttpConfig::default())
}

async fn get(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn me(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("X-User-Id", "1")
        .header("X-Client", "1")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn health_needs_no_token() {
    let server = token_service().await;
    let req = Request::builder()
        .uri("/api/v1/health")
        .body(Body::empty())
        .unwrap();

    let (status, body) = get(app(&server), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn health_ignores_token_and_unreachable_token_service() {
    // bind then drop to get a port nobody listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let app = app_for(&format!("http://{addr}"));
    let req = Request::builder()
        .uri("/api/v1/health?access_token=abc")
        .body(Body::empty())
        .unwrap();

    let (status, body) = get(app.clone(), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    // the same token on a protected route does reach the (dead) service
    let (status, body) = get(app, me("/api/v1/me?access_token=abc")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "invalid client to login user");
}

#[tokio::test]
async fn me_reports_resolved_identity() {
    let server = token_service().await;
    let (status, body) = get(app(&server), me("/api/v1/me?access_token=abc123")).await;

    assert_eq!(status, StatusCode::OK);
    let me: MeResponse = serde_json::from_value(body).unwrap();
    assert_eq!(
        me,
        MeResponse {
            caller_id: 42,
            client_id: 7,
            authenticated: true
        }
    );
}

#[tokio::test]
async fn forged_identity_without_token_is_dropped() {
    let server = token_service().await;
    let (status, body) = get(app(&server), me("/api/v1/me")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"caller_id": 0, "client_id": 0, "authenticated": false})
    );
}

#[tokio::test]
async fn forged_identity_on_public_request_is_dropped() {
    let server = token_service().await;
    let req = Request::builder()
        .uri("/api/v1/me?access_token=abc123")
        .header("X-Public", "true")
        .header("X-User-Id", "1")
        .body(Body::empty())
        .unwrap();

    let (status, body) = get(app(&server), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["authenticated"], false);
    assert_eq!(body["caller_id"], 0);
}

#[tokio::test]
async fn not_found_token_is_anonymous() {
    let server = token_service().await;
    let (status, body) = get(app(&server), me("/api/v1/me?access_token=expired")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["authenticated"], false);
}

#[tokio::test]
async fn remote_error_becomes_error_response() {
    let server = token_service().await;
    let (status, body) = get(app(&server), me("/api/v1/me?access_token=bad")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], 500);
    assert_eq!(body["message"], "boom");
}

#[tokio::test]
async fn unknown_token_shape_becomes_internal_error_response() {
    let server = token_service().await;
    // no mock for this token → wiremock answers 404 with an empty body
    let (status, body) = get(app(&server), me("/api/v1/me?access_token=other")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "invalid error interface at login user");
    assert_eq!(body["error"], "internal_server_error");
}

#[tokio::test]
async fn request_id_is_propagated() {
    let server = token_service().await;
    let resp = app(&server)
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(resp.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn remote_error_with_success_status_is_not_answered_as_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/access-token/gen/odd"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"status": 200, "message": "x"})),
        )
        .mount(&server)
        .await;

    let (status, body) = get(app(&server), me("/api/v1/me?access_token=odd")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "x");
}
