//! Client identity and recency/acknowledgement state.

/// Seconds on some monotonic clock. The server is the only caller that
/// knows what that clock actually is (wall-clock epoch seconds in
/// production, an arbitrary counter in tests) — this module only ever
/// compares two `Seconds` values against each other.
pub type Seconds = u64;

/// A stable per-client token used for registry lookup.
///
/// Derivation of this token is left to configuration; this type is just
/// the opaque key the rest of the core operates on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(pub String);

impl ClientId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-client recency/acknowledgement state.
///
/// A missing registry entry is equivalent to `ClientState::default()`
/// (`last_seen_at = None`, `android_ok_acknowledged = false`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientState {
    pub last_seen_at: Option<Seconds>,
    pub android_ok_acknowledged: bool,
}

impl ClientState {
    /// Seconds elapsed since `last_seen_at`, treating an absent entry as
    /// "last seen at time zero".
    pub fn delta(&self, now: Seconds) -> Seconds {
        now.saturating_sub(self.last_seen_at.unwrap_or(0))
    }

    /// `is_new_session(s) := Δ > MAX_TIME_WITHOUT_SHOWING_CP_SECS`.
    pub fn is_new_session(&self, now: Seconds, max_absence_secs: Seconds) -> bool {
        self.delta(now) > max_absence_secs
    }

    /// `is_rejoining(s) := MAX_ASSUMED_CP_SESSION_TIME_SECS < Δ <= MAX_TIME_WITHOUT_SHOWING_CP_SECS`.
    pub fn is_rejoining(
        &self,
        now: Seconds,
        max_session_secs: Seconds,
        max_absence_secs: Seconds,
    ) -> bool {
        let delta = self.delta(now);
        delta > max_session_secs && delta <= max_absence_secs
    }

    /// `is_in_session(s) := Δ <= MAX_ASSUMED_CP_SESSION_TIME_SECS`.
    pub fn is_in_session(&self, now: Seconds, max_session_secs: Seconds) -> bool {
        self.delta(now) <= max_session_secs
    }
}
