use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};

use crate::client_id;
use crate::routes::common::MaybeConnectInfo;
use crate::state::AppState;

/// `DELETE /_authorised_clients` — admin/test reset for the caller's
/// `ClientId`. Forgets the entry and responds 204. Used by tests and to
/// reset a client on demand.
pub async fn handler(
    State(state): State<Arc<AppState>>,
    maybe_connect_info: MaybeConnectInfo,
    headers: HeaderMap,
) -> StatusCode {
    let id = client_id::extract(
        state.config.client_id_source,
        &headers,
        maybe_connect_info.0,
    );
    state.registry.forget(&id);
    StatusCode::NO_CONTENT
}
