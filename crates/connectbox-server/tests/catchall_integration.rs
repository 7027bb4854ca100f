mod common;

use axum::http::StatusCode;

const IOS9_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 9_1 like Mac OS X) AppleWebKit/601.1";

#[tokio::test]
async fn unrecognised_path_renders_landing_instead_of_404() {
    let app = common::app();
    let resp = common::send(
        &app,
        common::probe("GET", "/some/random/path", "198.18.0.1", IOS9_UA),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = common::body_string(resp).await;
    assert!(body.contains("<TITLE>Connected to ConnectBox Wifi</TITLE>"));
}

#[tokio::test]
async fn root_path_also_falls_through_to_landing() {
    let app = common::app();
    let resp = common::send(&app, common::probe("GET", "/", "198.18.0.2", IOS9_UA)).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn catchall_never_touches_registry_state() {
    let app = common::app();
    let client = "198.18.0.3";
    common::send(&app, common::delete_authorised_clients(client)).await;

    // A stray path probe must not register the client as having been seen,
    // so a follow-up Apple probe still behaves like a brand new session.
    common::send(&app, common::probe("GET", "/whatever", client, IOS9_UA)).await;

    let resp = common::send(
        &app,
        common::probe("GET", "/hotspot-detect.html", client, IOS9_UA),
    )
    .await;
    let body = common::body_string(resp).await;
    assert!(!body.contains("<BODY>\nSuccess\n</BODY>"));
}
