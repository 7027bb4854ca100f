//! Client identity extraction. The identifying token is derived from the
//! request under the assumption that a reverse proxy may sit in front of
//! this service, so the source is configurable rather than hardcoded to
//! the TCP peer address.

use std::net::SocketAddr;

use axum::http::HeaderMap;
use connectbox_core::client::ClientId;
use connectbox_core::config::ClientIdSource;

/// Derive the [`ClientId`] for a request per the configured strategy.
///
/// Falls back to `"unknown"` only when the configured source has nothing to
/// offer (e.g. `PeerAddr` requested but no `ConnectInfo` extension present,
/// which only happens in a handler built without
/// `into_make_service_with_connect_info`).
pub fn extract(
    source: ClientIdSource,
    headers: &HeaderMap,
    peer_addr: Option<SocketAddr>,
) -> ClientId {
    let raw = match source {
        ClientIdSource::PeerAddr => peer_addr
            .map(|addr| addr.ip().to_string())
            .or_else(|| host_header(headers))
            .unwrap_or_else(|| "unknown".to_string()),
        ClientIdSource::HostHeader => host_header(headers)
            .or_else(|| peer_addr.map(|addr| addr.ip().to_string()))
            .unwrap_or_else(|| "unknown".to_string()),
        ClientIdSource::XForwardedFor => forwarded_for(headers)
            .or_else(|| peer_addr.map(|addr| addr.ip().to_string()))
            .unwrap_or_else(|| "unknown".to_string()),
    };
    ClientId::new(raw)
}

fn host_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
}
