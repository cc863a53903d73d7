use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GateError {
    /// A named route is missing from the registry. This is a deployment bug,
    /// not something a caller can fix.
    #[error("no route registered under the name {0:?}")]
    UnknownRoute(String),
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        tracing::error!("Wallet gate misconfigured: {}", self);
        let body = serde_json::json!({"error": "Internal server error"});
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
