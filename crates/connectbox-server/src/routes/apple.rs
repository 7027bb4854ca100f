use std::sync::Arc;

use axum::extract::{OriginalUri, State};
use axum::http::HeaderMap;
use axum::response::Response;

use connectbox_core::agent::AgentProfile;
use connectbox_core::policy::decide_apple;

use crate::client_id;
use crate::error::AppError;
use crate::routes::common::{respond, user_agent, MaybeConnectInfo};
use crate::state::AppState;

/// `GET|POST /success.html`, `/library/test/success.html`,
/// `/hotspot-detect.html` — Apple family probe endpoints.
#[tracing::instrument(skip(state, headers))]
pub async fn handler(
    State(state): State<Arc<AppState>>,
    maybe_connect_info: MaybeConnectInfo,
    headers: HeaderMap,
    OriginalUri(uri): OriginalUri,
) -> Result<Response, AppError> {
    let id = client_id::extract(
        state.config.client_id_source,
        &headers,
        maybe_connect_info.0,
    );
    let now = state.now();
    let profile = AgentProfile::classify(&user_agent(&headers), state.ua_parser.as_ref());
    let client_state = state.registry.get(&id);

    let decision = decide_apple(
        &profile,
        client_state,
        now,
        state.policy_timing(),
        &state.config.local_url,
    );

    respond(&state.registry, &id, now, decision, uri.path())
}
