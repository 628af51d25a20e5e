use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::GateError;

/// Storage key of the session token.
pub const TOKEN_KEY: &str = "token";

// 1. TokenStore Contract
/// TokenStore
///
/// Persistent client-side storage for the session token. The browser keeps it
/// in local storage; the gate server seeds one per request from a cookie.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn load(&self, key: &str) -> Option<String>;

    async fn store(&self, key: &str, value: String);

    async fn remove(&self, key: &str);
}

// 2. In-memory implementation
/// MemoryTokenStore
///
/// Holds at most one value per key in process memory. Used for per-request
/// sessions and in tests.
#[derive(Default)]
pub struct MemoryTokenStore {
    entries: Mutex<Vec<(String, String)>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: impl Into<String>) -> Self {
        Self {
            entries: Mutex::new(vec![(key.to_string(), value.into())]),
        }
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, Vec<(String, String)>> {
        // A poisoned lock only means a panicking writer; the data is still a Vec.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self, key: &str) -> Option<String> {
        self.entries()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    async fn store(&self, key: &str, value: String) {
        let mut entries = self.entries();
        entries.retain(|(k, _)| k != key);
        entries.push((key.to_string(), value));
    }

    async fn remove(&self, key: &str) {
        self.entries().retain(|(k, _)| k != key);
    }
}

/// Session
///
/// The explicitly passed session context. Everything that needs the token
/// (the guard, the outbound API client) receives a `Session` instead of
/// reading ambient storage.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
}

impl Session {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    pub fn anonymous() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()))
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self::new(Arc::new(MemoryTokenStore::with_entry(TOKEN_KEY, token)))
    }

    /// The stored token, if any. An empty string counts as no token.
    pub async fn token(&self) -> Option<String> {
        self.store
            .load(TOKEN_KEY)
            .await
            .filter(|token| !token.is_empty())
    }

    pub async fn is_anonymous(&self) -> bool {
        self.token().await.is_none()
    }

    pub async fn sign_in(&self, token: impl Into<String>) {
        self.store.store(TOKEN_KEY, token.into()).await;
    }

    pub async fn sign_out(&self) {
        self.store.remove(TOKEN_KEY).await;
    }
}

/// Builds the `Authorization: Bearer <token>` header value.
pub fn bearer_value(token: &str) -> Result<HeaderValue, GateError> {
    HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|_| GateError::unauthorized("token is not a valid header value"))
}

/// authorized_client
///
/// Reads the session token once and builds an API client that sends it as
/// a bearer credential on every request. Anonymous sessions get a client
/// without the header. Later token changes do not affect the returned client.
pub async fn authorized_client(
    session: &Session,
    timeout: Duration,
) -> Result<reqwest::Client, GateError> {
    let mut headers = HeaderMap::new();

    if let Some(token) = session.token().await {
        let mut value = bearer_value(&token)?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    let client = reqwest::Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .build()?;

    Ok(client)
}
