use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use connectbox_core::config::{ClientIdSource, Config};
use connectbox_server::app::build_app;
use connectbox_server::state::AppState;

/// Build a test [`Config`] with sensible defaults for integration tests.
///
/// Uses `XForwardedFor` as the client-id source so tests can address
/// distinct simulated clients without a real TCP `ConnectInfo` extension —
/// `oneshot`-driven requests never carry one.
pub fn test_config() -> Config {
    Config {
        bind_address: "127.0.0.1:0".to_string(),
        log_dir: "-".to_string(),
        local_url: "http://go".to_string(),
        max_session_secs: 300,
        max_absence_secs: 86_400,
        client_id_source: ClientIdSource::XForwardedFor,
        static_dir: "static".to_string(),
    }
}

pub fn app() -> axum::Router {
    let state = Arc::new(AppState::new(test_config()));
    build_app(state)
}

pub fn probe(method: &str, path: &str, client_ip: &str, user_agent: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header("x-forwarded-for", client_ip)
        .header("user-agent", user_agent)
        .body(Body::empty())
        .expect("build request")
}

pub async fn send(app: &axum::Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.expect("request")
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

pub fn delete_authorised_clients(client_ip: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri("/_authorised_clients")
        .header("x-forwarded-for", client_ip)
        .body(Body::empty())
        .expect("build request")
}

#[allow(dead_code)]
pub const STATUS_NO_CONTENT: StatusCode = StatusCode::NO_CONTENT;
