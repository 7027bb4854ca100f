//! Landing Renderer Adapter — translates policy decision options into
//! template parameters and renders HTML.
//!
//! This is the one implementation of `render(template_name, params) ->
//! bytes`, inlining the small `connected.html` template rather than
//! pulling in a templating engine for a single page.

use connectbox_core::agent::LinkType;
use connectbox_core::policy::LandingOpts;
use thiserror::Error;

/// The bit-exact Apple success body. Must contain `<BODY>\nSuccess\n</BODY>`
/// so Apple's captive portal agent accepts it.
pub const APPLE_SUCCESS_BODY: &str =
    "<HTML><HEAD><TITLE>Success</TITLE></HEAD><BODY>\nSuccess\n</BODY></HTML>";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template render failure: {0}")]
    Failed(String),
}

/// Render `connected.html` for the given [`LandingOpts`].
///
/// Contract:
/// - literal `<TITLE>Connected to ConnectBox Wifi</TITLE>`.
/// - `link_type=Href` → contains `<a href='{local_url}'`.
/// - `link_type=Text` → contains the bare URL, never `href=`.
/// - `show_ok=true` → contains `OK</button></form>` in a POST form to the
///   calling endpoint.
pub fn render_connected(opts: &LandingOpts, request_path: &str) -> Result<Vec<u8>, RenderError> {
    let icon_gif = format!("/static/go-animation-{}.gif", opts.icon);

    let link_html = match opts.link_type {
        LinkType::Href => format!("<a href='{}'>{}</a>", opts.local_url, opts.local_url),
        LinkType::Text => opts.local_url.clone(),
    };

    let ok_form = if opts.show_ok {
        format!(
            "<form method='post' action='{path}'><button type='submit'>OK</button></form>",
            path = request_path
        )
    } else {
        String::new()
    };

    let html = format!(
        "<!DOCTYPE html>\n\
         <HTML><HEAD><TITLE>Connected to ConnectBox Wifi</TITLE></HEAD>\n\
         <BODY>\n\
         <img src='{icon_gif}' alt='connected'>\n\
         <p>You are connected. Visit {link_html} for local content.</p>\n\
         {ok_form}\n\
         </BODY></HTML>",
    );

    Ok(html.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(link_type: LinkType, show_ok: bool) -> LandingOpts {
        LandingOpts {
            link_type,
            show_ok,
            icon: "safari",
            local_url: "http://go".to_string(),
        }
    }

    #[test]
    fn href_variant_contains_anchor() {
        let bytes = render_connected(&opts(LinkType::Href, false), "/hotspot-detect.html")
            .expect("render ok");
        let html = String::from_utf8(bytes).expect("utf8");
        assert!(html.contains("<a href='http://go'"));
        assert!(html.contains("<TITLE>Connected to ConnectBox Wifi</TITLE>"));
    }

    #[test]
    fn text_variant_never_contains_href() {
        let bytes = render_connected(&opts(LinkType::Text, false), "/hotspot-detect.html")
            .expect("render ok");
        let html = String::from_utf8(bytes).expect("utf8");
        assert!(!html.contains("href="));
        assert!(html.contains("http://go"));
    }

    #[test]
    fn show_ok_renders_post_form() {
        let bytes =
            render_connected(&opts(LinkType::Text, true), "/generate_204").expect("render ok");
        let html = String::from_utf8(bytes).expect("utf8");
        assert!(html.contains("OK</button></form>"));
        assert!(html.contains("method='post'"));
    }
}
