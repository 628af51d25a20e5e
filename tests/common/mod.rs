#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use tokio::net::TcpListener;

// --- Tokens understood by the mock `/me` endpoint ---

pub const ADMIN_TOKEN: &str = "admin-token";
pub const USER_TOKEN: &str = "user-token";
pub const NO_ROLES_FIELD_TOKEN: &str = "no-roles-field-token";
pub const NULL_ROLES_TOKEN: &str = "null-roles-token";
pub const STRING_ID_ADMIN_TOKEN: &str = "string-id-admin-token";
pub const GARBAGE_BODY_TOKEN: &str = "garbage-body-token";
pub const SERVER_ERROR_TOKEN: &str = "server-error-token";
pub const REVOKED_TOKEN: &str = "revoked-token";

/// A running mock of the quiz API.
pub struct MockApi {
    pub address: String,
    hits: Arc<AtomicUsize>,
}

impl MockApi {
    /// Number of `GET /me` calls received so far.
    pub fn me_hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn mock_me(State(hits): State<Arc<AtomicUsize>>, headers: HeaderMap) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);

    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match token {
        Some(ADMIN_TOKEN) => Json(json!({
            "id": 1,
            "email": "admin@quiz.local",
            "fullname": "Quiz Admin",
            "roles": ["admin"],
        }))
        .into_response(),
        Some(USER_TOKEN) => Json(json!({
            "id": 2,
            "email": "student@quiz.local",
            "fullname": "Student",
            "roles": [],
        }))
        .into_response(),
        Some(NO_ROLES_FIELD_TOKEN) => Json(json!({ "id": 3 })).into_response(),
        Some(NULL_ROLES_TOKEN) => Json(json!({ "id": 1, "roles": null })).into_response(),
        Some(STRING_ID_ADMIN_TOKEN) => Json(json!({
            "id": "u-1",
            "email": null,
            "roles": ["admin"],
        }))
        .into_response(),
        Some(GARBAGE_BODY_TOKEN) => (StatusCode::OK, "definitely not json").into_response(),
        Some(SERVER_ERROR_TOKEN) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response()
        }
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "msg": "Token has been revoked" })),
        )
            .into_response(),
    }
}

/// Echoes back the Authorization header it received (empty when absent).
async fn echo_auth(headers: HeaderMap) -> String {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Spawns the mock quiz API on an ephemeral port.
pub async fn spawn_mock_api() -> MockApi {
    let hits = Arc::new(AtomicUsize::new(0));

    let router = Router::new()
        .route("/me", get(mock_me))
        .route("/echo-auth", get(echo_auth))
        .with_state(hits.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    MockApi {
        address: format!("http://127.0.0.1:{}", port),
        hits,
    }
}

/// An address nothing listens on: bind, note the port, drop the listener.
pub async fn unreachable_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
