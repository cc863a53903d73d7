//! Wallet credential detection shared by the global gate and the per-route
//! guards.
//!
//! A credential is evidence that the caller connected a wallet. It is taken
//! at face value: addresses and tokens are never validated here.

use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderName};

use super::session::SessionView;

pub const WALLET_CONNECTED_KEY: &str = "wallet_connected";
pub const WALLET_ADDRESS_KEY: &str = "wallet_address";
pub const WALLET_ADDRESS_HEADER: HeaderName = HeaderName::from_static("x-wallet-address");
pub const WALLET_AUTH_SCHEME: &str = "Wallet ";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalletCredential {
    /// `wallet_connected` is truthy in the session. The address is whatever
    /// the session stored alongside it, if anything.
    Session { address: Option<String> },
    /// Non-empty `X-Wallet-Address` header.
    AddressHeader(String),
    /// `Authorization: Wallet <token>`; the token is opaque.
    AuthorizationToken(String),
}

impl WalletCredential {
    /// Probes session flag, address header, then authorization header, and
    /// returns the first source present.
    pub fn detect<S>(headers: &HeaderMap, session: Option<&S>) -> Option<Self>
    where
        S: SessionView + ?Sized,
    {
        if let Some(session) = session {
            if session.is_truthy(WALLET_CONNECTED_KEY) {
                return Some(Self::Session {
                    address: session_address(session).map(str::to_string),
                });
            }
        }

        if let Some(value) = headers.get(&WALLET_ADDRESS_HEADER) {
            if !value.as_bytes().is_empty() {
                let address = String::from_utf8_lossy(value.as_bytes()).into_owned();
                return Some(Self::AddressHeader(address));
            }
        }

        headers
            .get(AUTHORIZATION)
            .and_then(|value| value.as_bytes().strip_prefix(WALLET_AUTH_SCHEME.as_bytes()))
            .map(|token| Self::AuthorizationToken(String::from_utf8_lossy(token).into_owned()))
    }

    pub fn address(&self) -> Option<&str> {
        match self {
            Self::Session { address } => address.as_deref(),
            Self::AddressHeader(address) => Some(address),
            Self::AuthorizationToken(_) => None,
        }
    }
}

pub fn has_credential<S>(headers: &HeaderMap, session: Option<&S>) -> bool
where
    S: SessionView + ?Sized,
{
    WalletCredential::detect(headers, session).is_some()
}

/// Best known wallet address: the session's stored address, else the
/// `X-Wallet-Address` header. Independent of which source proved presence.
pub fn wallet_address<S>(headers: &HeaderMap, session: Option<&S>) -> Option<String>
where
    S: SessionView + ?Sized,
{
    session
        .and_then(session_address)
        .map(str::to_string)
        .or_else(|| {
            headers
                .get(&WALLET_ADDRESS_HEADER)
                .and_then(|h| h.to_str().ok())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
}

fn session_address<S: SessionView + ?Sized>(session: &S) -> Option<&str> {
    session.get_str(WALLET_ADDRESS_KEY).filter(|s| !s.is_empty())
}
