mod common;

use axum::http::StatusCode;

const WISPR_UA: &str = "CaptiveNetworkSupport-325.10.1 wispr";
const IOS9_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 9_1 like Mac OS X) AppleWebKit/601.1";
const IOS10_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 10_3 like Mac OS X) AppleWebKit/602.1";
const MACOS_SIERRA_UA: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_12_6) AppleWebKit/603.1";

const SUCCESS_MARKER: &str = "<BODY>\nSuccess\n</BODY>";

async fn run_flow(client: &str, browser_ua: &str) -> (String, String) {
    let app = common::app();
    common::send(&app, common::delete_authorised_clients(client)).await;

    // (a) wispr CPA probe immediately after reset: new session, forces landing.
    let resp_a = common::send(
        &app,
        common::probe("GET", "/hotspot-detect.html", client, WISPR_UA),
    )
    .await;
    assert_eq!(resp_a.status(), StatusCode::OK);
    let body_a = common::body_string(resp_a).await;
    assert!(!body_a.contains(SUCCESS_MARKER));

    // (b) browser probe, same session: mid-session branch, non-wispr UA -> landing.
    let resp_b = common::send(
        &app,
        common::probe("GET", "/hotspot-detect.html", client, browser_ua),
    )
    .await;
    assert_eq!(resp_b.status(), StatusCode::OK);
    let body_b = common::body_string(resp_b).await;

    // (c) wispr CPA probe again, same session: mid-session branch, wispr UA -> success body.
    let resp_c = common::send(
        &app,
        common::probe("GET", "/hotspot-detect.html", client, WISPR_UA),
    )
    .await;
    assert_eq!(resp_c.status(), StatusCode::OK);
    let body_c = common::body_string(resp_c).await;
    assert!(body_c.contains(SUCCESS_MARKER));

    (body_b, body_c)
}

#[tokio::test]
async fn ios9_flow_gets_href_link() {
    let (body_b, _) = run_flow("192.0.2.1", IOS9_UA).await;
    assert!(body_b.contains("<a href='http://go'"));
}

#[tokio::test]
async fn ios10_flow_gets_text_only_link() {
    let (body_b, _) = run_flow("192.0.2.2", IOS10_UA).await;
    assert!(body_b.contains("http://go"));
    assert!(!body_b.contains("href="));
}

#[tokio::test]
async fn macos_sierra_behaves_like_ios9() {
    let (body_b, _) = run_flow("192.0.2.3", MACOS_SIERRA_UA).await;
    assert!(body_b.contains("<a href='http://go'"));
}

#[tokio::test]
async fn success_html_and_library_test_paths_share_apple_policy() {
    let app = common::app();
    let client = "192.0.2.4";
    common::send(&app, common::delete_authorised_clients(client)).await;
    common::send(
        &app,
        common::probe("GET", "/success.html", client, WISPR_UA),
    )
    .await;

    let resp = common::send(
        &app,
        common::probe("GET", "/library/test/success.html", client, WISPR_UA),
    )
    .await;
    let body = common::body_string(resp).await;
    assert!(body.contains(SUCCESS_MARKER));
}
