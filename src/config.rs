use std::{env, time::Duration};

/// AppConfig
///
/// Immutable configuration of the gate server, loaded once at startup and
/// shared through `AppState`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Origin of the quiz API that serves `GET /me`.
    pub api_base_url: String,
    // Address the gate server binds to.
    pub bind_addr: String,
    // Name of the cookie holding the session token.
    pub token_cookie: String,
    // Upper bound on a single identity check.
    pub identity_timeout: Duration,
    // Runtime environment marker. Selects log format and config strictness.
    pub env: Env,
}

/// Env
///
/// Runtime context: local development or production.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TOKEN_COOKIE: &str = "token";
const DEFAULT_IDENTITY_TIMEOUT_SECS: u64 = 10;

impl Default for AppConfig {
    /// Local defaults, usable without any environment variables (tests).
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            token_cookie: DEFAULT_TOKEN_COOKIE.to_string(),
            identity_timeout: Duration::from_secs(DEFAULT_IDENTITY_TIMEOUT_SECS),
            env: Env::Local,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables.
    ///
    /// # Panics
    /// Panics in production when `QUIZ_API_URL` is unset, or in any
    /// environment when `IDENTITY_TIMEOUT_SECS` is not a whole number of
    /// seconds. The server must not start half-configured.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let api_base_url = match env {
            Env::Production => {
                env::var("QUIZ_API_URL").expect("FATAL: QUIZ_API_URL must be set in production.")
            }
            Env::Local => {
                env::var("QUIZ_API_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string())
            }
        };

        let identity_timeout = env::var("IDENTITY_TIMEOUT_SECS")
            .map(|raw| {
                raw.parse::<u64>()
                    .expect("FATAL: IDENTITY_TIMEOUT_SECS must be a whole number of seconds")
            })
            .unwrap_or(DEFAULT_IDENTITY_TIMEOUT_SECS);

        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            token_cookie: env::var("TOKEN_COOKIE")
                .unwrap_or_else(|_| DEFAULT_TOKEN_COOKIE.to_string()),
            identity_timeout: Duration::from_secs(identity_timeout),
            env,
        }
    }
}
