use quiz_portal_gate::{
    AppState,
    config::{AppConfig, Env},
    create_router,
    identity::{HttpIdentityClient, IdentityState},
    routes::RouteTable,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Entry point of the gate server: configuration, logging, route table,
/// identity client, then the HTTP listener.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Configuration (fail-fast on missing production settings)
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging, filtered by RUST_LOG when set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "quiz_portal_gate=debug,tower_http=info".into());

    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Gate starting in {:?} mode", config.env);

    // 3. Route table, checked before serving anything
    let table = RouteTable::quiz_portal();
    table.validate()?;

    // 4. Identity client for `GET /me`
    let identity = Arc::new(HttpIdentityClient::new(
        &config.api_base_url,
        config.identity_timeout,
    )?) as IdentityState;

    tracing::info!(api = %config.api_base_url, "identity checks go to /me");

    let bind_addr = config.bind_addr.clone();
    let app = create_router(AppState {
        table,
        identity,
        config,
    });

    // 5. Server
    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("Listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
