// Per-route wallet guards, applied with `from_fn_with_state` on individual
// routes rather than globally.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use serde::Serialize;

use crate::error::GateError;
use super::credential::{has_credential, wallet_address};
use super::session::SessionData;
use super::wallet_gate::{deny, DenialMode, WalletGate};

pub const REQUESTED_WITH_HEADER: &str = "x-requested-with";
pub const XML_HTTP_REQUEST: &str = "XMLHttpRequest";

/// Wallet presence as seen by `wallet_optional`. `connected` can be true with
/// no `address` when only an `Authorization: Wallet` token was sent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WalletStatus {
    pub wallet_connected: bool,
    pub wallet_address: Option<String>,
}

impl WalletStatus {
    pub fn from_request(req: &Request) -> Self {
        let session = req.extensions().get::<SessionData>();
        Self {
            wallet_connected: has_credential(req.headers(), session),
            wallet_address: wallet_address(req.headers(), session),
        }
    }
}

pub fn is_ajax(headers: &HeaderMap) -> bool {
    headers
        .get(REQUESTED_WITH_HEADER)
        .is_some_and(|v| v == XML_HTTP_REQUEST)
}

/// Strict guard: the wrapped handler only runs for callers with a wallet
/// credential. AJAX callers get the JSON 401, everyone else a redirect.
pub async fn wallet_required(
    State(gate): State<WalletGate>,
    req: Request,
    next: Next,
) -> Result<Response, GateError> {
    let session = req.extensions().get::<SessionData>();
    if has_credential(req.headers(), session) {
        return Ok(next.run(req).await);
    }

    let mode = if is_ajax(req.headers()) {
        DenialMode::Json
    } else {
        DenialMode::Redirect
    };
    deny(mode, gate.urls())
}

/// Soft guard: never denies, only records `WalletStatus` for the handler.
pub async fn wallet_optional(mut req: Request, next: Next) -> Response {
    let status = WalletStatus::from_request(&req);
    req.extensions_mut().insert(status);
    next.run(req).await
}

#[async_trait]
impl<S> FromRequestParts<S> for WalletStatus
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Only present on routes wrapped in `wallet_optional`.
        parts.extensions.get::<WalletStatus>().cloned().ok_or_else(|| {
            tracing::error!("WalletStatus requested on a route without wallet_optional");
            StatusCode::INTERNAL_SERVER_ERROR
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde_json::json;

    fn request(headers: &[(&str, &str)]) -> Request {
        let mut builder = axum::http::Request::builder().uri("/anything/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn ajax_marker_is_exact() {
        assert!(is_ajax(request(&[("x-requested-with", "XMLHttpRequest")]).headers()));
        assert!(!is_ajax(request(&[("x-requested-with", "xmlhttprequest")]).headers()));
        assert!(!is_ajax(request(&[]).headers()));
    }

    #[test]
    fn status_for_token_only_has_no_address() {
        let status = WalletStatus::from_request(&request(&[("authorization", "Wallet abc")]));
        assert_eq!(
            status,
            WalletStatus {
                wallet_connected: true,
                wallet_address: None,
            }
        );
    }

    #[test]
    fn status_uses_session_address() {
        let mut req = request(&[("x-wallet-address", "0xhdr")]);
        let session: SessionData = [
            ("wallet_connected", json!(true)),
            ("wallet_address", json!("0xsess")),
        ]
        .into_iter()
        .collect();
        req.extensions_mut().insert(session);

        let status = WalletStatus::from_request(&req);
        assert!(status.wallet_connected);
        assert_eq!(status.wallet_address.as_deref(), Some("0xsess"));
    }

    #[test]
    fn status_without_credentials() {
        assert_eq!(WalletStatus::from_request(&request(&[])), WalletStatus::default());
    }
}
