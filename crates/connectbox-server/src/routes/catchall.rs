use std::sync::Arc;

use axum::extract::{OriginalUri, State};
use axum::http::HeaderMap;
use axum::response::Response;

use connectbox_core::agent::AgentProfile;
use connectbox_core::policy::decide_catchall;

use crate::error::AppError;
use crate::routes::common::{respond, user_agent};
use crate::state::AppState;

/// Any unrecognised path, including `/`: renders the landing page
/// unconditionally, without touching the registry. Registered as the
/// Axum router's fallback.
pub async fn handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    OriginalUri(uri): OriginalUri,
) -> Result<Response, AppError> {
    let profile = AgentProfile::classify(&user_agent(&headers), state.ua_parser.as_ref());
    let decision = decide_catchall(&profile, &state.config.local_url);

    // The catchall never touches the registry, so client identity and
    // "now" are irrelevant here — use a throwaway id/time that `respond`
    // will not act on since `decision.effects` is all-false.
    let id = connectbox_core::client::ClientId::new("unused");
    respond(&state.registry, &id, 0, decision, uri.path())
}
