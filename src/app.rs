use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::handlers::{self, pages};
use crate::middleware::{
    guards::{wallet_optional, wallet_required},
    session::session_middleware,
    wallet_gate::wallet_gate_middleware,
};
use crate::AppState;

/// Builds the application router. Layer order, outermost first: tracing,
/// session loading, wallet gate, then any per-route guard.
pub fn build_router(state: AppState) -> Router {
    let gate = state.gate.clone();
    let sessions = state.sessions.clone();
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/", get(pages::home).layer(from_fn(wallet_optional)))
        .route("/health", get(health_check))
        .route("/signup/", get(pages::signup))
        .route("/login/", get(pages::login))
        .route("/privacy-policy/", get(pages::privacy_policy))
        .route("/dashboard/", get(pages::dashboard))
        .route("/dashboard/:section", get(pages::dashboard_section))
        .route("/library/", get(pages::library))
        .route("/insights/", get(pages::insights))
        .route("/new-entry/", get(pages::new_entry).post(pages::create_entry))
        .route("/account/settings/", get(pages::account_settings))
        .route(
            "/journal/compile/",
            post(pages::compile_journal).layer(from_fn_with_state(gate.clone(), wallet_required)),
        )
        .route("/api/entries/", get(handlers::list_entries))
        .route("/api/entries/:id", get(handlers::get_entry))
        .route("/api/insights/", get(handlers::list_insights))
        .route("/api/wallet/connect", post(handlers::connect_wallet))
        .route("/api/wallet/disconnect", post(handlers::disconnect_wallet))
        .route(
            "/api/wallet/status",
            get(handlers::wallet_status).layer(from_fn(wallet_optional)),
        )
        .nest_service("/static", static_files)
        .layer(from_fn_with_state(gate, wallet_gate_middleware))
        .layer(from_fn_with_state(sessions, session_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
