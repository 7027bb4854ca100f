//! Client Registry — process-wide mapping from client identity to
//! recency/acknowledgement state.
//!
//! A single [`std::sync::Mutex`] around the whole map is sufficient: the
//! per-client policy step that reads and writes this state never awaits
//! anything while holding the lock, since template rendering is
//! synchronous.

use std::collections::HashMap;
use std::sync::Mutex;

use connectbox_core::client::{ClientId, ClientState, Seconds};

#[derive(Default)]
pub struct ClientRegistry {
    clients: Mutex<HashMap<ClientId, ClientState>>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `last_seen_at = now`, creating the entry if absent.
    pub fn touch(&self, id: &ClientId, now: Seconds) {
        let mut clients = self.clients.lock().expect("registry mutex poisoned");
        clients.entry(id.clone()).or_default().last_seen_at = Some(now);
    }

    /// Returns the default zero state when absent. Never inserts.
    pub fn get(&self, id: &ClientId) -> ClientState {
        let clients = self.clients.lock().expect("registry mutex poisoned");
        clients.get(id).copied().unwrap_or_default()
    }

    pub fn set_acknowledged(&self, id: &ClientId, acknowledged: bool) {
        let mut clients = self.clients.lock().expect("registry mutex poisoned");
        clients.entry(id.clone()).or_default().android_ok_acknowledged = acknowledged;
    }

    /// Remove the entry entirely. Idempotent.
    pub fn forget(&self, id: &ClientId) {
        let mut clients = self.clients.lock().expect("registry mutex poisoned");
        clients.remove(id);
    }

    /// Apply `forget`, `touch`, `set_acknowledged` in that fixed order as
    /// a single atomic step under one lock acquisition.
    pub fn apply(
        &self,
        id: &ClientId,
        now: Seconds,
        forget: bool,
        touch: bool,
        set_acknowledged: Option<bool>,
    ) -> ClientState {
        let mut clients = self.clients.lock().expect("registry mutex poisoned");
        if forget {
            clients.remove(id);
        }
        if touch {
            clients.entry(id.clone()).or_default().last_seen_at = Some(now);
        }
        if let Some(ack) = set_acknowledged {
            clients.entry(id.clone()).or_default().android_ok_acknowledged = ack;
        }
        clients.get(id).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.clients.lock().expect("registry mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Opportunistic eviction of entries already treated as `is_new_session`.
    /// Purely a memory bound: leaving such an entry in place changes no
    /// policy decision, since it already reads as a brand new session.
    pub fn evict_stale(&self, now: Seconds, max_absence_secs: Seconds) {
        let mut clients = self.clients.lock().expect("registry mutex poisoned");
        clients.retain(|_, state| !state.is_new_session(now, max_absence_secs));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_never_inserts() {
        let registry = ClientRegistry::new();
        let id = ClientId::new("1.2.3.4");
        let _ = registry.get(&id);
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn forget_is_idempotent() {
        let registry = ClientRegistry::new();
        let id = ClientId::new("1.2.3.4");
        registry.touch(&id, 10);
        registry.forget(&id);
        registry.forget(&id);
        assert_eq!(registry.get(&id), ClientState::default());
    }

    #[test]
    fn touch_then_ack_round_trips() {
        let registry = ClientRegistry::new();
        let id = ClientId::new("1.2.3.4");
        registry.touch(&id, 10);
        registry.set_acknowledged(&id, true);
        let state = registry.get(&id);
        assert_eq!(state.last_seen_at, Some(10));
        assert!(state.android_ok_acknowledged);
    }

    #[test]
    fn evict_stale_removes_only_absent_clients() {
        let registry = ClientRegistry::new();
        let fresh = ClientId::new("fresh");
        let stale = ClientId::new("stale");
        registry.touch(&fresh, 100_000);
        registry.touch(&stale, 0);
        registry.evict_stale(100_000, 86_400);
        assert_eq!(registry.get(&fresh).last_seen_at, Some(100_000));
        assert_eq!(registry.get(&stale), ClientState::default());
    }
}
