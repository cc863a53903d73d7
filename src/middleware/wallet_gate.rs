use axum::{
    extract::{Request, State},
    http::{header::LOCATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::error::GateError;
use crate::routes::{UrlRegistry, ACCOUNT_SIGNUP};
use super::credential::has_credential;
use super::session::SessionData;

pub const WALLET_REQUIRED_MESSAGE: &str = "Wallet connection required";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathPattern {
    /// Matches the path verbatim.
    Exact(String),
    /// Literal prefix match on the raw path, no normalization.
    Prefix(String),
}

impl PathPattern {
    pub fn prefix(path: &str) -> Self {
        Self::Prefix(path.to_string())
    }

    pub fn exact(path: &str) -> Self {
        Self::Exact(path.to_string())
    }

    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(p) => path == p,
            Self::Prefix(p) => path.starts_with(p.as_str()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathClass {
    Public,
    Protected,
    Unrestricted,
}

impl PathClass {
    pub fn requires_wallet(self) -> bool {
        self == Self::Protected
    }
}

/// Which paths need a wallet. Public patterns are checked before protected
/// ones; anything matching neither is unrestricted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathRules {
    public: Vec<PathPattern>,
    protected: Vec<PathPattern>,
    api_prefix: String,
}

impl Default for PathRules {
    fn default() -> Self {
        Self {
            // Bare "/" is the landing page only; as a prefix it would match everything.
            public: vec![
                PathPattern::exact("/"),
                PathPattern::prefix("/signup/"),
                PathPattern::prefix("/login/"),
                PathPattern::prefix("/privacy-policy/"),
                PathPattern::prefix("/static/"),
                PathPattern::prefix("/media/"),
                PathPattern::prefix("/api/wallet/"),
            ],
            protected: vec![
                PathPattern::prefix("/dashboard/"),
                PathPattern::prefix("/library/"),
                PathPattern::prefix("/insights/"),
                PathPattern::prefix("/new-entry/"),
                PathPattern::prefix("/account/settings/"),
                PathPattern::prefix("/api/entries/"),
                PathPattern::prefix("/api/insights/"),
            ],
            api_prefix: "/api/".to_string(),
        }
    }
}

impl PathRules {
    pub fn new(
        public: Vec<PathPattern>,
        protected: Vec<PathPattern>,
        api_prefix: impl Into<String>,
    ) -> Self {
        Self {
            public,
            protected,
            api_prefix: api_prefix.into(),
        }
    }

    pub fn public(&self) -> &[PathPattern] {
        &self.public
    }

    pub fn protected(&self) -> &[PathPattern] {
        &self.protected
    }

    pub fn api_prefix(&self) -> &str {
        &self.api_prefix
    }

    pub fn classify(&self, path: &str) -> PathClass {
        if self.public.iter().any(|p| p.matches(path)) {
            PathClass::Public
        } else if self.protected.iter().any(|p| p.matches(path)) {
            PathClass::Protected
        } else {
            PathClass::Unrestricted
        }
    }

    pub fn requires_wallet(&self, path: &str) -> bool {
        self.classify(path).requires_wallet()
    }

    pub fn is_api(&self, path: &str) -> bool {
        path.starts_with(self.api_prefix.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DenialMode {
    /// 302 to the sign-up page.
    Redirect,
    /// 401 with a JSON body pointing at the sign-up page.
    Json,
}

/// Builds the denial response for a caller without a wallet.
pub fn deny(mode: DenialMode, urls: &UrlRegistry) -> Result<Response, GateError> {
    let signup_url = urls.resolve(ACCOUNT_SIGNUP)?;
    let response = match mode {
        DenialMode::Json => {
            let body = serde_json::json!({
                "error": WALLET_REQUIRED_MESSAGE,
                "redirect": signup_url,
            });
            (StatusCode::UNAUTHORIZED, Json(body)).into_response()
        }
        DenialMode::Redirect => {
            (StatusCode::FOUND, [(LOCATION, signup_url.to_string())]).into_response()
        }
    };
    Ok(response)
}

/// Shared state for the gate and the per-route guards. Immutable after
/// startup, so clones are cheap and safe across requests.
#[derive(Clone, Debug)]
pub struct WalletGate {
    rules: Arc<PathRules>,
    urls: Arc<UrlRegistry>,
}

impl WalletGate {
    pub fn new(rules: PathRules, urls: UrlRegistry) -> Self {
        Self {
            rules: Arc::new(rules),
            urls: Arc::new(urls),
        }
    }

    pub fn rules(&self) -> &PathRules {
        &self.rules
    }

    pub fn urls(&self) -> &UrlRegistry {
        &self.urls
    }

    /// `None` lets the request through, `Some` carries the denial.
    pub fn check(&self, req: &Request) -> Result<Option<Response>, GateError> {
        let path = req.uri().path();
        if !self.rules.requires_wallet(path) {
            return Ok(None);
        }

        let session = req.extensions().get::<SessionData>();
        if has_credential(req.headers(), session) {
            return Ok(None);
        }

        let mode = if self.rules.is_api(path) {
            DenialMode::Json
        } else {
            DenialMode::Redirect
        };
        deny(mode, &self.urls).map(Some)
    }
}

/// Global interceptor: callers hitting a protected path without a wallet
/// credential are redirected to sign-up (pages) or get a 401 (API).
pub async fn wallet_gate_middleware(
    State(gate): State<WalletGate>,
    req: Request,
    next: Next,
) -> Result<Response, GateError> {
    if let Some(denial) = gate.check(&req)? {
        return Ok(denial);
    }

    Ok(next.run(req).await)
}
