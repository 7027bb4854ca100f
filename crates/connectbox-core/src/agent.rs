//! Agent Classifier — pure function from a `User-Agent` string to an
//! [`AgentProfile`], plus the derived predicates the policy engine reads
//! off it.

use once_cell::sync::Lazy;
use regex::Regex;

/// Platform family, as classified by the ordered rules in [`AgentProfile::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    IOS,
    MacOSX,
    AndroidDalvik,
    AndroidWebView,
    AndroidX11,
    Windows,
    Kindle,
    /// The Apple `CaptiveNetworkSupport` wispr probe. Treated as Apple for
    /// success-body decisions, but kept distinct from `IOS`/`MacOSX` since
    /// its UA string carries no usable OS version.
    AppleCaptiveHelper,
    Other,
}

/// The result of the external UA-parsing seam — a pure function wrapped
/// behind a trait so a deployment can swap in a different UA database.
#[derive(Debug, Clone, Default)]
pub struct ParsedUa {
    pub family: String,
    pub major: String,
    pub minor: String,
}

/// Wraps whatever UA database backs platform/version extraction.
pub trait UserAgentParser: Send + Sync {
    fn parse(&self, raw_ua: &str) -> ParsedUa;
}

static IOS_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"CPU (?:iPhone )?OS (\d+)_(\d+)").expect("valid regex"));
static MACOSX_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Mac OS X (\d+)[_.](\d+)").expect("valid regex"));
static ANDROID_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Android (\d+)(?:\.(\d+))?").expect("valid regex"));

/// A minimal heuristic UA parser covering the platform families this
/// responder needs to distinguish. Swappable via [`UserAgentParser`] — a
/// deployment with access to a full UA database (e.g. `ua-parser` compiled
/// from the public regex file) can implement the trait with that instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicUaParser;

impl UserAgentParser for HeuristicUaParser {
    fn parse(&self, raw_ua: &str) -> ParsedUa {
        if raw_ua.contains("iPhone") || raw_ua.contains("iPad") || raw_ua.contains("iPod") {
            if let Some(caps) = IOS_VERSION.captures(raw_ua) {
                return ParsedUa {
                    family: "iOS".to_string(),
                    major: caps[1].to_string(),
                    minor: caps[2].to_string(),
                };
            }
            return ParsedUa {
                family: "iOS".to_string(),
                ..Default::default()
            };
        }

        if raw_ua.contains("Mac OS X") {
            if let Some(caps) = MACOSX_VERSION.captures(raw_ua) {
                return ParsedUa {
                    family: "MacOSX".to_string(),
                    major: caps[1].to_string(),
                    minor: caps[2].to_string(),
                };
            }
            return ParsedUa {
                family: "MacOSX".to_string(),
                ..Default::default()
            };
        }

        if raw_ua.contains("Android") {
            if let Some(caps) = ANDROID_VERSION.captures(raw_ua) {
                return ParsedUa {
                    family: "Android".to_string(),
                    major: caps[1].to_string(),
                    minor: caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default(),
                };
            }
            return ParsedUa {
                family: "Android".to_string(),
                ..Default::default()
            };
        }

        if raw_ua.contains("Windows") {
            return ParsedUa {
                family: "Windows".to_string(),
                ..Default::default()
            };
        }

        if raw_ua.contains("Kindle") || raw_ua.contains("Silk") {
            return ParsedUa {
                family: "Kindle".to_string(),
                ..Default::default()
            };
        }

        ParsedUa::default()
    }
}

/// Platform/agent classification derived from a single `User-Agent` header
/// value.
#[derive(Debug, Clone)]
pub struct AgentProfile {
    pub family: Family,
    /// String, possibly empty/non-numeric — never assume parseable except
    /// where explicitly noted (`requires_ok_press`).
    pub major: String,
    pub minor: String,
    pub raw_ua: String,
}

impl AgentProfile {
    /// Classify a raw `User-Agent` string. Pure and side-effect-free.
    ///
    /// Rules applied in order, first match wins:
    /// 1. contains `"CaptiveNetworkSupport"` → Apple CPA (wispr).
    /// 2. contains `"Dalvik"` → Android Dalvik CPA.
    /// 3. contains `"Android"` (not `"Dalvik"`) → Android WebView CPB.
    /// 4. contains `"X11"` and not `"Android"` → Android 7.1+ X11 CPA.
    /// 5. otherwise, parse via the external UA parser.
    pub fn classify(raw_ua: &str, parser: &dyn UserAgentParser) -> Self {
        let parsed = parser.parse(raw_ua);

        let family = if raw_ua.contains("CaptiveNetworkSupport") {
            Family::AppleCaptiveHelper
        } else if raw_ua.contains("Dalvik") {
            Family::AndroidDalvik
        } else if raw_ua.contains("Android") {
            Family::AndroidWebView
        } else if raw_ua.contains("X11") {
            Family::AndroidX11
        } else {
            match parsed.family.as_str() {
                "iOS" => Family::IOS,
                "MacOSX" => Family::MacOSX,
                "Windows" => Family::Windows,
                "Kindle" => Family::Kindle,
                _ => Family::Other,
            }
        };

        Self {
            family,
            major: parsed.major,
            minor: parsed.minor,
            raw_ua: raw_ua.to_string(),
        }
    }

    pub fn is_apple(&self) -> bool {
        matches!(
            self.family,
            Family::IOS | Family::MacOSX | Family::AppleCaptiveHelper
        )
    }

    pub fn is_android_any(&self) -> bool {
        matches!(
            self.family,
            Family::AndroidDalvik | Family::AndroidWebView | Family::AndroidX11
        )
    }

    pub fn is_android_cpa(&self) -> bool {
        matches!(self.family, Family::AndroidDalvik | Family::AndroidX11)
    }

    pub fn is_android_cpb(&self) -> bool {
        matches!(self.family, Family::AndroidWebView)
    }

    /// `requires_ok_press(profile) := "Android" in raw_ua AND int(major) >= 6`.
    /// Integer parse failures are swallowed and yield `false` — this is the
    /// one predicate in the system allowed to integer-parse a version field.
    pub fn requires_ok_press(&self) -> bool {
        if !self.raw_ua.contains("Android") {
            return false;
        }
        self.major.parse::<i64>().map(|v| v >= 6).unwrap_or(false)
    }

    /// `link_type(profile)` — `Href` for the narrow set of OS/version
    /// combinations that can open links from the captive portal browser in
    /// the system browser; `Text` otherwise.
    pub fn link_type(&self) -> LinkType {
        if self.family == Family::IOS && matches!(self.major.as_str(), "9" | "11") {
            return LinkType::Href;
        }
        if self.family == Family::MacOSX
            && self.major == "10"
            && matches!(self.minor.as_str(), "12" | "13")
        {
            return LinkType::Href;
        }
        LinkType::Text
    }

    /// `icon_variant(profile) := "safari" if is_apple else "chrome"`.
    pub fn icon_variant(&self) -> &'static str {
        if self.is_apple() {
            "safari"
        } else {
            "chrome"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkType {
    Href,
    Text,
}

impl LinkType {
    /// `link_ops_enum = {TEXT:"text", HREF:"href"}` — the string passed to
    /// the template.
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkType::Href => "href",
            LinkType::Text => "text",
        }
    }
}
