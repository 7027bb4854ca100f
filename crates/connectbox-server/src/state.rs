use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use connectbox_core::agent::{HeuristicUaParser, UserAgentParser};
use connectbox_core::client::Seconds;
use connectbox_core::config::Config;
use connectbox_core::policy::PolicyTiming;

use crate::registry::ClientRegistry;

/// Shared application state injected into every Axum handler via
/// [`axum::extract::State`].
///
/// All fields are safe to clone cheaply — heavy resources are wrapped in
/// `Arc`, mirroring how `sparklytics-server::state::AppState` wraps its
/// DuckDB backend and buffer.
pub struct AppState {
    pub config: Arc<Config>,
    pub registry: Arc<ClientRegistry>,
    pub ua_parser: Arc<dyn UserAgentParser>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(ClientRegistry::new()),
            ua_parser: Arc::new(HeuristicUaParser),
        }
    }

    pub fn policy_timing(&self) -> PolicyTiming {
        PolicyTiming {
            max_session_secs: self.config.max_session_secs,
            max_absence_secs: self.config.max_absence_secs,
        }
    }

    /// Seconds since the Unix epoch. The registry lives only as long as
    /// this process does, so wall-clock precision beyond a second is
    /// unnecessary.
    pub fn now(&self) -> Seconds {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    /// Background loop: opportunistically evict registry entries already
    /// past `max_absence_secs`, mirroring
    /// `sparklytics-server::AppState::run_buffer_flush_loop`'s
    /// spawn-a-ticker shape. Purely a memory-bound tidy-up — an entry left
    /// behind is already indistinguishable from a new session.
    pub async fn run_eviction_loop(self: Arc<Self>) {
        let mut ticker = tokio::time::interval(std::time::Duration::from_secs(3600));
        loop {
            ticker.tick().await;
            self.registry
                .evict_stale(self.now(), self.config.max_absence_secs);
        }
    }
}
