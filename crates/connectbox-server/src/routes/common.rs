use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use connectbox_core::policy::{Decision, ResponseAction};

use crate::error::AppError;
use crate::render::{render_connected, APPLE_SUCCESS_BODY};

/// Mirrors `sparklytics-server::routes::collect::MaybeConnectInfo`: the
/// socket address is absent in unit/integration tests built without
/// `into_make_service_with_connect_info`, so this extractor never rejects.
#[derive(Debug)]
pub struct MaybeConnectInfo(pub Option<SocketAddr>);

impl<S> FromRequestParts<S> for MaybeConnectInfo
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|info| info.0),
        ))
    }
}

pub fn user_agent(headers: &HeaderMap) -> String {
    headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

/// Apply a [`Decision`]'s effects to the registry, then emit the HTTP
/// response for its [`ResponseAction`].
pub fn respond(
    registry: &crate::registry::ClientRegistry,
    client_id: &connectbox_core::client::ClientId,
    now: connectbox_core::client::Seconds,
    decision: Decision,
    request_path: &str,
) -> Result<Response, AppError> {
    registry.apply(
        client_id,
        now,
        decision.effects.forget,
        decision.effects.touch,
        decision.effects.set_acknowledged,
    );

    let response = match decision.action {
        ResponseAction::Send204 => StatusCode::NO_CONTENT.into_response(),
        ResponseAction::SendSuccessBody => {
            (StatusCode::OK, APPLE_SUCCESS_BODY).into_response()
        }
        ResponseAction::SendLanding(opts) => {
            let body = render_connected(&opts, request_path)
                .map_err(|e| AppError::RenderFailed(e.to_string()))?;
            (
                StatusCode::OK,
                [(axum::http::header::CONTENT_TYPE, "text/html; charset=utf-8")],
                body,
            )
                .into_response()
        }
    };

    Ok(response)
}
