use std::time::Duration;

/// Default advertised local content URL.
pub const DEFAULT_LOCAL_URL: &str = "http://go";

/// The boundary between "still in session" and "rejoining".
pub const DEFAULT_MAX_SESSION_SECS: u64 = 300;

/// The boundary between "rejoining" and "new session".
pub const DEFAULT_MAX_ABSENCE_SECS: u64 = 86_400;

/// Default directory `/static/*` assets (the landing page's animation
/// GIFs) are served from.
pub const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientIdSource {
    /// Use the TCP peer address (post-`ConnectInfo`). Safe without any
    /// reverse-proxy trust configuration; the default.
    PeerAddr,
    /// Use the HTTP `Host` header. Not a stable per-client key behind most
    /// proxies — opt-in only.
    HostHeader,
    /// Use the first address in `X-Forwarded-For`. Only safe when a trusted
    /// reverse proxy always sets it.
    XForwardedFor,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub log_dir: String,
    pub local_url: String,
    pub max_session_secs: u64,
    pub max_absence_secs: u64,
    pub client_id_source: ClientIdSource,
    pub static_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            bind_address: std::env::var("CONNECTBOX_BIND_ADDRESS")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            log_dir: std::env::var("CONNECTBOX_LOG_DIR").unwrap_or_else(|_| "-".to_string()),
            local_url: std::env::var("CONNECTBOX_LOCAL_URL")
                .unwrap_or_else(|_| DEFAULT_LOCAL_URL.to_string()),
            max_session_secs: std::env::var("CONNECTBOX_MAX_SESSION_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_SESSION_SECS),
            max_absence_secs: std::env::var("CONNECTBOX_MAX_ABSENCE_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_ABSENCE_SECS),
            client_id_source: {
                let raw = std::env::var("CONNECTBOX_CLIENT_ID_SOURCE")
                    .unwrap_or_else(|_| "peer_addr".to_string());
                match raw.as_str() {
                    "host_header" => ClientIdSource::HostHeader,
                    "x_forwarded_for" => ClientIdSource::XForwardedFor,
                    _ => ClientIdSource::PeerAddr,
                }
            },
            static_dir: std::env::var("CONNECTBOX_STATIC_DIR")
                .unwrap_or_else(|_| DEFAULT_STATIC_DIR.to_string()),
        })
    }

    pub fn max_session(&self) -> Duration {
        Duration::from_secs(self.max_session_secs)
    }

    pub fn max_absence(&self) -> Duration {
        Duration::from_secs(self.max_absence_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_with_no_environment_set() {
        // SAFETY: single-threaded test, no other test mutates these keys.
        for key in [
            "CONNECTBOX_BIND_ADDRESS",
            "CONNECTBOX_LOG_DIR",
            "CONNECTBOX_LOCAL_URL",
            "CONNECTBOX_MAX_SESSION_SECS",
            "CONNECTBOX_MAX_ABSENCE_SECS",
            "CONNECTBOX_CLIENT_ID_SOURCE",
            "CONNECTBOX_STATIC_DIR",
        ] {
            std::env::remove_var(key);
        }
        let cfg = Config::from_env().expect("config loads with no env set");
        assert_eq!(cfg.local_url, "http://go");
        assert_eq!(cfg.max_session_secs, 300);
        assert_eq!(cfg.max_absence_secs, 86_400);
        assert_eq!(cfg.client_id_source, ClientIdSource::PeerAddr);
        assert_eq!(cfg.static_dir, "static");
    }
}
