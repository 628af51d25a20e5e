use axum::{
    Router,
    extract::FromRef,
    http::HeaderName,
    routing::get,
};

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Navigation core: route table, guard and the navigator tying them together.
pub mod routes;
pub mod guard;
pub mod navigator;

// Session context and the identity service it is checked against.
pub mod session;
pub mod identity;

// Shared types, errors and configuration.
pub mod models;
pub mod error;
pub mod config;

// HTTP surface of the gate server.
pub mod handlers;

// --- Public Re-exports ---

pub use config::AppConfig;
pub use error::GateError;
pub use guard::{Decision, NavigationGuard};
pub use identity::{HttpIdentityClient, IdentityState, MockIdentityService};
pub use navigator::{Landing, Navigator};
pub use routes::RouteTable;
pub use session::Session;

/// AppState
///
/// Shared, immutable state of the gate server. Sessions are not part of it:
/// each request builds its own from the token cookie.
#[derive(Clone)]
pub struct AppState {
    /// The static route table.
    pub table: RouteTable,
    /// Identity service behind `GET /me`.
    pub identity: IdentityState,
    /// The loaded configuration.
    pub config: AppConfig,
}

impl FromRef<AppState> for IdentityState {
    fn from_ref(app_state: &AppState) -> IdentityState {
        app_state.identity.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the gate server: a health probe plus a catch-all page route that
/// runs every path through the navigator, wrapped in the request-id, tracing
/// and CORS layers.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS: the SPA may be served from another origin than the gate.
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for Request Correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Page routes. `/healthz` is the only path the guard never sees.
    let base_router = Router::new()
        .route("/healthz", get(handlers::health))
        // Every page path, root included, goes through the guard.
        .route("/", get(handlers::navigate_page))
        .route("/{*path}", get(handlers::navigate_page))
        .with_state(state);

    // 3. Correlation and tracing, outermost first
    base_router
        .layer(
            ServiceBuilder::new()
                // 3a. Fresh UUID in `x-request-id` for every request.
                .layer(SetRequestIdLayer::new(
                    x_request_id.clone(),
                    MakeRequestUuid,
                ))
                // 3b. One span per navigation, latency logged in millis.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // 3c. Echo the id back so the browser can quote it.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS last, around everything else.
        .layer(cors)
}

/// trace_span_logger
///
/// Opens the per-request span, tagged with the `x-request-id` so every log
/// line of one navigation can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
