// Library root - exports for the binary and tests

pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::build_router;
pub use config::Config;
pub use error::GateError;

use middleware::{SessionStore, WalletGate};
use routes::UrlRegistry;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub gate: WalletGate,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let gate = WalletGate::new(
            config.path_rules.clone(),
            UrlRegistry::with_defaults(config.signup_url.clone()),
        );
        let sessions = SessionStore::new(config.session_ttl_secs);
        Self {
            config: Arc::new(config),
            gate,
            sessions,
        }
    }
}
