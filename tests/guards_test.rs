// Integration tests for the per-route guards (wallet_required / wallet_optional)

use axum::{
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    response::IntoResponse,
    routing::get as route_get,
    Json, Router,
};
use diaryvault_gate::{
    middleware::{wallet_optional, wallet_required, PathRules, WalletGate, WalletStatus},
    routes::UrlRegistry,
};
use serde_json::json;

use test_helpers::*;

fn gate() -> WalletGate {
    WalletGate::new(PathRules::default(), UrlRegistry::with_defaults("/signup/"))
}

async fn fixed_response() -> impl IntoResponse {
    (
        StatusCode::ACCEPTED,
        [("x-handler", "ran")],
        Json(json!({"rendered": true})),
    )
}

#[tokio::test]
async fn test_strict_guard_ajax_without_wallet_gets_json_401() {
    let response = send(
        test_app(),
        request("POST", "/journal/compile/", &[("x-requested-with", "XMLHttpRequest")]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Wallet connection required", "redirect": "/signup/"})
    );
}

#[tokio::test]
async fn test_strict_guard_plain_request_without_wallet_redirects() {
    let response = send(test_app(), request("POST", "/journal/compile/", &[])).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), Some("/signup/"));
}

#[tokio::test]
async fn test_strict_guard_ignores_api_prefix_for_mode() {
    // Under /api/ but not AJAX: the guard still redirects.
    let app = Router::new()
        .route("/api/private/", route_get(fixed_response))
        .route_layer(from_fn_with_state(gate(), wallet_required));

    let response = get(app, "/api/private/", &[]).await;
    assert_eq!(response.status(), StatusCode::FOUND);
}

#[tokio::test]
async fn test_strict_guard_passes_handler_response_through() {
    let app = Router::new()
        .route("/compose/", route_get(fixed_response))
        .route_layer(from_fn_with_state(gate(), wallet_required));

    for headers in [
        vec![("x-wallet-address", "0xabc")],
        vec![("authorization", "Wallet token")],
    ] {
        let response = get(app.clone(), "/compose/", &headers).await;
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(response.headers()["x-handler"], "ran");
        assert_eq!(body_json(response).await, json!({"rendered": true}));
    }
}

#[tokio::test]
async fn test_strict_guard_accepts_session_wallet() {
    let (app, sessions) = test_app_with_sessions();
    seed_session(&sessions, &[("wallet_connected", json!(true))]).await;

    let cookie = session_cookie();
    let response = send(
        app,
        request("POST", "/journal/compile/", &[("cookie", cookie.as_str())]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"status": "queued"}));
}

#[tokio::test]
async fn test_soft_guard_annotates_address_header() {
    let response = get(test_app(), "/api/wallet/status", &[("x-wallet-address", "0xdead")]).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"wallet_connected": true, "wallet_address": "0xdead"})
    );
}

#[tokio::test]
async fn test_soft_guard_connected_without_identity() {
    let response = get(test_app(), "/api/wallet/status", &[("authorization", "Wallet t0k")]).await;

    assert_eq!(
        body_json(response).await,
        json!({"wallet_connected": true, "wallet_address": null})
    );
}

#[tokio::test]
async fn test_soft_guard_never_denies() {
    let response = get(test_app(), "/api/wallet/status", &[]).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"wallet_connected": false, "wallet_address": null})
    );
}

#[tokio::test]
async fn test_soft_guard_prefers_session_address() {
    let (app, sessions) = test_app_with_sessions();
    seed_session(
        &sessions,
        &[
            ("wallet_connected", json!(true)),
            ("wallet_address", json!("0xsession")),
        ],
    )
    .await;

    let cookie = session_cookie();
    let response = get(
        app,
        "/api/wallet/status",
        &[("cookie", cookie.as_str()), ("x-wallet-address", "0xheader")],
    )
    .await;

    assert_eq!(
        body_json(response).await,
        json!({"wallet_connected": true, "wallet_address": "0xsession"})
    );
}

#[tokio::test]
async fn test_soft_guard_does_not_alter_response() {
    let bare = Router::new().route("/page/", route_get(fixed_response));
    let wrapped = Router::new()
        .route("/page/", route_get(fixed_response))
        .route_layer(from_fn(wallet_optional));

    for headers in [vec![], vec![("x-wallet-address", "0xdead")]] {
        let expected = get(bare.clone(), "/page/", &headers).await;
        let actual = get(wrapped.clone(), "/page/", &headers).await;

        assert_eq!(actual.status(), expected.status());
        assert_eq!(actual.headers(), expected.headers());
        assert_eq!(body_bytes(actual).await, body_bytes(expected).await);
    }
}

#[tokio::test]
async fn test_soft_guard_status_reaches_handler() {
    async fn show(status: WalletStatus) -> String {
        format!("{}:{}", status.wallet_connected, status.wallet_address.unwrap_or_default())
    }

    let app = Router::new()
        .route("/home/", route_get(show))
        .route_layer(from_fn(wallet_optional));

    let response = get(app, "/home/", &[("x-wallet-address", "0xdead")]).await;
    assert_eq!(body_bytes(response).await, b"true:0xdead".to_vec());
}

#[tokio::test]
async fn test_landing_page_shows_banner_until_connected() {
    let anon = get(test_app(), "/", &[]).await;
    let html = String::from_utf8(body_bytes(anon).await).unwrap();
    assert!(html.contains("connect-wallet-banner"));

    let connected = get(test_app(), "/", &[("x-wallet-address", "0xdead")]).await;
    let html = String::from_utf8(body_bytes(connected).await).unwrap();
    assert!(html.contains("Connected as 0xdead"));
}
