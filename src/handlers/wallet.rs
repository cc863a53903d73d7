use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::middleware::credential::{WALLET_ADDRESS_KEY, WALLET_CONNECTED_KEY};
use crate::middleware::guards::WalletStatus;
use crate::middleware::session::{SessionData, SESSION_COOKIE};
use crate::AppState;

/// Base mainnet.
pub const DEFAULT_CHAIN_ID: u64 = 8453;
const CHAIN_ID_KEY: &str = "chain_id";

#[derive(Deserialize)]
pub struct ConnectWalletRequest {
    pub wallet_address: String,
    pub chain_id: Option<u64>,
}

#[derive(Serialize)]
pub struct ConnectWalletResponse {
    pub wallet_connected: bool,
    pub wallet_address: Option<String>,
}

/// `0x` followed by 40 hex digits. Checksums are not verified.
pub fn is_valid_wallet_address(address: &str) -> bool {
    address.len() == 42
        && address.starts_with("0x")
        && address[2..].chars().all(|c| c.is_ascii_hexdigit())
}

fn session_cookie(id: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

// Mark the caller's session as wallet-connected
pub async fn connect_wallet(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<ConnectWalletRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<ConnectWalletResponse>), (StatusCode, Json<serde_json::Value>)> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::debug!("Rejected wallet connect body: {}", rejection.body_text());
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Invalid request body"})),
        )
    })?;

    let address = payload.wallet_address.trim();
    if !is_valid_wallet_address(address) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Invalid wallet address format"})),
        ));
    }
    let address = address.to_lowercase();

    // Always rotate the id; a live session's data moves to the new one.
    let mut data = match jar.get(SESSION_COOKIE) {
        Some(cookie) => {
            let old_id = cookie.value();
            let data = state.sessions.load(old_id).await;
            state.sessions.remove(old_id).await;
            data.unwrap_or_default()
        }
        None => SessionData::new(),
    };
    let session_id = Uuid::new_v4().to_string();

    data.insert(WALLET_CONNECTED_KEY, true);
    data.insert(WALLET_ADDRESS_KEY, address.clone());
    data.insert(CHAIN_ID_KEY, payload.chain_id.unwrap_or(DEFAULT_CHAIN_ID));
    state.sessions.save(&session_id, data).await;

    tracing::info!("Wallet connected: {}", address);

    Ok((
        jar.add(session_cookie(session_id)),
        Json(ConnectWalletResponse {
            wallet_connected: true,
            wallet_address: Some(address),
        }),
    ))
}

// Forget the wallet; the session itself is dropped once nothing else is in it
pub async fn disconnect_wallet(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<ConnectWalletResponse>) {
    let response = Json(ConnectWalletResponse {
        wallet_connected: false,
        wallet_address: None,
    });

    let Some(session_id) = jar.get(SESSION_COOKIE).map(|c| c.value().to_string()) else {
        return (jar, response);
    };

    let jar = match state.sessions.load(&session_id).await {
        Some(mut data) => {
            data.remove(WALLET_CONNECTED_KEY);
            data.remove(WALLET_ADDRESS_KEY);
            data.remove(CHAIN_ID_KEY);
            if data.is_empty() {
                state.sessions.remove(&session_id).await;
                jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
            } else {
                state.sessions.save(&session_id, data).await;
                jar
            }
        }
        None => jar,
    };

    tracing::info!("Wallet disconnected");
    (jar, response)
}

pub async fn wallet_status(status: WalletStatus) -> Json<WalletStatus> {
    Json(status)
}
