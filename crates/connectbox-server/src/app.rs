use std::sync::Arc;

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{routes, state::AppState};

/// Construct the Axum [`Router`] with all routes and middleware attached.
///
/// Middleware is applied in outer-to-inner order (outermost runs first on
/// request, last on response):
///
/// 1. `TraceLayer` — structured request/response logging via `tracing`.
/// 2. `CorsLayer` — permissive CORS, matching how a captive-portal browser
///    may load `/static/*` assets cross-origin before DNS has settled.
///
/// `/static/*` serves the landing page's animation GIFs from
/// `config.static_dir` via `ServeDir`. The fallback handler is the
/// catch-all landing page: every other path not explicitly bound below,
/// `/` included, falls through to it.
pub fn build_app(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/health", get(routes::health::health))
        .route(
            "/success.html",
            get(routes::apple::handler).post(routes::apple::handler),
        )
        .route(
            "/library/test/success.html",
            get(routes::apple::handler).post(routes::apple::handler),
        )
        .route(
            "/hotspot-detect.html",
            get(routes::apple::handler).post(routes::apple::handler),
        )
        .route(
            "/generate_204",
            get(routes::android::handler).post(routes::android::handler),
        )
        .route(
            "/gen_204",
            get(routes::android::handler).post(routes::android::handler),
        )
        .route(
            "/ncsi.txt",
            get(routes::other::handler).post(routes::other::handler),
        )
        .route(
            "/kindle-wifi/wifistub.html",
            get(routes::other::handler).post(routes::other::handler),
        )
        .route("/_authorised_clients", delete(routes::admin::handler))
        .nest_service("/static", static_files)
        .fallback(routes::catchall::handler)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
