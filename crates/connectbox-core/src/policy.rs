//! Policy Engine — decides the response for a
//! `(Endpoint, AgentProfile, ClientState, Method)` tuple.
//!
//! Kept pure and HTTP-free: registry writes are returned as data
//! ([`RegistryEffects`]) rather than performed here, so the dispatcher is
//! the only layer that touches both the registry and the wire.

use crate::agent::{AgentProfile, LinkType};
use crate::client::{ClientState, Seconds};

/// The HTTP method of the inbound probe. Kept local to this crate so the
/// Policy Engine has no dependency on an HTTP framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Options passed through to the Landing Renderer Adapter.
#[derive(Debug, Clone)]
pub struct LandingOpts {
    pub link_type: LinkType,
    pub show_ok: bool,
    pub icon: &'static str,
    pub local_url: String,
}

/// The Policy Engine's decision — a sum type, never a direct HTTP write.
#[derive(Debug, Clone)]
pub enum ResponseAction {
    Send204,
    SendSuccessBody,
    SendLanding(LandingOpts),
}

/// Registry side effects the Dispatcher must apply, in this order:
/// `forget`, then `touch`, then `set_acknowledged`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistryEffects {
    pub forget: bool,
    pub touch: bool,
    pub set_acknowledged: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct Decision {
    pub effects: RegistryEffects,
    pub action: ResponseAction,
}

/// Timing configuration the Policy Engine needs; callers pass the
/// configured values rather than the engine reading global config, keeping
/// it a pure function of its arguments.
#[derive(Debug, Clone, Copy)]
pub struct PolicyTiming {
    pub max_session_secs: Seconds,
    pub max_absence_secs: Seconds,
}

fn landing_opts(profile: &AgentProfile, local_url: &str) -> LandingOpts {
    LandingOpts {
        link_type: profile.link_type(),
        show_ok: profile.requires_ok_press(),
        icon: profile.icon_variant(),
        local_url: local_url.to_string(),
    }
}

/// Apple family: `/success.html`, `/library/test/success.html`,
/// `/hotspot-detect.html`.
pub fn decide_apple(
    profile: &AgentProfile,
    state: ClientState,
    now: Seconds,
    timing: PolicyTiming,
    local_url: &str,
) -> Decision {
    if state.is_rejoining(now, timing.max_session_secs, timing.max_absence_secs) {
        return Decision {
            effects: RegistryEffects {
                touch: true,
                ..Default::default()
            },
            action: ResponseAction::SendSuccessBody,
        };
    }

    if state.is_new_session(now, timing.max_absence_secs) {
        return Decision {
            effects: RegistryEffects {
                touch: true,
                ..Default::default()
            },
            action: ResponseAction::SendLanding(landing_opts(profile, local_url)),
        };
    }

    // Mid-session.
    let action = if profile.raw_ua.contains("CaptiveNetworkSupport") {
        ResponseAction::SendSuccessBody
    } else {
        ResponseAction::SendLanding(landing_opts(profile, local_url))
    };
    Decision {
        effects: RegistryEffects::default(),
        action,
    }
}

/// Android family: `/generate_204`, `/gen_204`.
pub fn decide_android(
    profile: &AgentProfile,
    state: ClientState,
    now: Seconds,
    timing: PolicyTiming,
    method: Method,
    local_url: &str,
) -> Decision {
    let is_new_session = state.is_new_session(now, timing.max_absence_secs);

    // Effects are applied by the Dispatcher in order: forget, touch,
    // set_acknowledged. A `forget` clears `android_ok_acknowledged`, so the
    // post-effect acknowledgement state used below models that ordering
    // explicitly rather than relying on the caller to reapply `state`.
    let acknowledged_after_forget = if is_new_session {
        false
    } else {
        state.android_ok_acknowledged
    };
    let acknowledged = if method == Method::Post {
        true
    } else {
        acknowledged_after_forget
    };

    let effects = RegistryEffects {
        forget: is_new_session,
        touch: true,
        set_acknowledged: if method == Method::Post {
            Some(true)
        } else {
            None
        },
    };

    // Dalvik CPA or Android WebView CPB.
    let action = if profile.raw_ua.contains("Android") {
        if profile.raw_ua.contains("Dalvik") {
            if acknowledged {
                ResponseAction::Send204
            } else {
                ResponseAction::SendLanding(landing_opts(profile, local_url))
            }
        } else {
            // WebView CPB: always the landing page.
            ResponseAction::SendLanding(landing_opts(profile, local_url))
        }
    } else {
        // X11 CPA (Android 7.1+).
        if acknowledged {
            ResponseAction::Send204
        } else {
            ResponseAction::SendLanding(landing_opts(profile, local_url))
        }
    };

    Decision { effects, action }
}

/// Other probe endpoints: `/ncsi.txt` (Windows), `/kindle-wifi/wifistub.html`
/// (Kindle). Always `touch` then `SendLanding` unconditionally.
pub fn decide_other(profile: &AgentProfile, local_url: &str) -> Decision {
    Decision {
        effects: RegistryEffects {
            touch: true,
            ..Default::default()
        },
        action: ResponseAction::SendLanding(landing_opts(profile, local_url)),
    }
}

/// Default/catch-all: any unknown path. `SendLanding` unconditionally,
/// without touching the registry.
pub fn decide_catchall(profile: &AgentProfile, local_url: &str) -> Decision {
    Decision {
        effects: RegistryEffects::default(),
        action: ResponseAction::SendLanding(landing_opts(profile, local_url)),
    }
}
