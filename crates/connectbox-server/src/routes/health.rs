use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// `GET /health` — liveness check. Ambient endpoint, not part of the
/// captive-portal choreography: there is no backing store to go degraded,
/// so this always reports `200 ok` once the process is up.
pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}
