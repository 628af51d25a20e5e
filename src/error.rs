use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// GateError
///
/// The error taxonomy of the gate. Every identity failure collapses into
/// `Unauthorized`; the carried reason is only ever logged, never shown to the
/// browser.
#[derive(Debug, Error)]
pub enum GateError {
    /// Missing token, rejected token, network failure or malformed `/me` body.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Navigation kept bouncing between redirects.
    #[error("redirect loop while navigating to {path} ({hops} hops)")]
    RedirectLoop { path: String, hops: usize },

    /// The route table breaks one of its invariants.
    #[error("invalid route table: {0}")]
    InvalidRouteTable(String),

    /// A path or cookie could not be written into a response header.
    #[error("invalid header value: {0}")]
    InvalidHeader(String),

    /// The outbound HTTP client could not be built.
    #[error("http client error: {0}")]
    Client(#[from] reqwest::Error),
}

impl GateError {
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized(reason.into())
    }
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        let status = match self {
            GateError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            GateError::RedirectLoop { .. }
            | GateError::InvalidRouteTable(_)
            | GateError::InvalidHeader(_)
            | GateError::Client(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        tracing::error!(error = %self, "navigation failed");

        // Unauthorized details stay server-side.
        let message = match status {
            StatusCode::UNAUTHORIZED => "unauthorized".to_string(),
            _ => self.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
