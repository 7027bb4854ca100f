use std::sync::Arc;

use axum::extract::{OriginalUri, State};
use axum::http::HeaderMap;
use axum::response::Response;

use connectbox_core::agent::AgentProfile;
use connectbox_core::policy::decide_other;

use crate::client_id;
use crate::error::AppError;
use crate::routes::common::{respond, user_agent, MaybeConnectInfo};
use crate::state::AppState;

/// `GET|POST /ncsi.txt` (Windows) and `/kindle-wifi/wifistub.html` (Kindle):
/// touch the registry, then render the landing page unconditionally.
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

    let decision = decide_other(&profile, &state.config.local_url);

    respond(&state.registry, &id, now, decision, uri.path())
}
