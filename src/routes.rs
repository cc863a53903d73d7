// Named-route registry used for reverse lookups (e.g. where to send callers
// that still need to connect a wallet).

use std::collections::HashMap;

use crate::error::GateError;

pub const ACCOUNT_SIGNUP: &str = "account_signup";

#[derive(Clone, Debug, Default)]
pub struct UrlRegistry {
    routes: HashMap<String, String>,
}

impl UrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the application's own pages, sign-up pointing at `signup_url`.
    pub fn with_defaults(signup_url: impl Into<String>) -> Self {
        Self::new()
            .register(ACCOUNT_SIGNUP, signup_url)
            .register("home", "/")
            .register("login", "/login/")
            .register("privacy_policy", "/privacy-policy/")
            .register("dashboard", "/dashboard/")
    }

    pub fn register(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.routes.insert(name.into(), url.into());
        self
    }

    pub fn resolve(&self, name: &str) -> Result<&str, GateError> {
        self.routes
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| GateError::UnknownRoute(name.to_string()))
    }
}
