use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

mod app;
mod client_id;
mod error;
mod registry;
mod render;
mod routes;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise structured JSON logging. Level controlled via RUST_LOG env var.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("connectbox=info".parse()?),
        )
        .json()
        .init();

    let cfg = connectbox_core::config::Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    let bind_address = cfg.bind_address.clone();
    let state = Arc::new(AppState::new(cfg));

    // Spawn background opportunistic eviction task.
    {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            state.run_eviction_loop().await;
        });
    }

    let app = app::build_app(Arc::clone(&state));

    info!(bind_address = %bind_address, "ConnectBox captive portal responder listening");

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
