use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use std::sync::Arc;
use std::time::Duration;

use crate::{error::GateError, models::UserProfile, session::bearer_value};

// 1. IdentityService Contract
/// IdentityService
///
/// Resolves a bearer token to the profile of its owner. Implementations must
/// report every failure (rejected token, transport error, unreadable body) as
/// `GateError::Unauthorized`.
#[async_trait]
pub trait IdentityService: Send + Sync {
    async fn fetch_profile(&self, token: &str) -> Result<UserProfile, GateError>;
}

/// IdentityState
///
/// The shared handle to the identity service held by guards and app state.
pub type IdentityState = Arc<dyn IdentityService>;

// 2. The Real Implementation (quiz API `/me`)
/// HttpIdentityClient
///
/// Calls `GET {base_url}/me` with the token as a bearer credential. The
/// underlying `reqwest::Client` is pooled and cheap to clone.
#[derive(Clone)]
pub struct HttpIdentityClient {
    client: reqwest::Client,
    me_url: String,
}

impl HttpIdentityClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GateError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            me_url: format!("{}/me", base_url.trim_end_matches('/')),
        }
    }

    pub fn me_url(&self) -> &str {
        &self.me_url
    }
}

#[async_trait]
impl IdentityService for HttpIdentityClient {
    async fn fetch_profile(&self, token: &str) -> Result<UserProfile, GateError> {
        let response = self
            .client
            .get(&self.me_url)
            .header(AUTHORIZATION, bearer_value(token)?)
            .send()
            .await
            .map_err(|e| GateError::unauthorized(format!("identity request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GateError::unauthorized(format!(
                "identity endpoint answered {status}"
            )));
        }

        response
            .json::<UserProfile>()
            .await
            .map_err(|e| GateError::unauthorized(format!("unreadable identity body: {e}")))
    }
}

// 3. The Mock Implementation (For Tests)
/// MockIdentityService
///
/// Answers every token with a fixed role list, or fails every call.
#[derive(Clone, Default)]
pub struct MockIdentityService {
    pub roles: Vec<String>,
    /// When true, all lookups fail as unauthorized.
    pub should_fail: bool,
}

impl MockIdentityService {
    pub fn with_roles(roles: &[&str]) -> Self {
        Self {
            roles: roles.iter().map(|r| r.to_string()).collect(),
            should_fail: false,
        }
    }

    pub fn new_failing() -> Self {
        Self {
            roles: Vec::new(),
            should_fail: true,
        }
    }
}

#[async_trait]
impl IdentityService for MockIdentityService {
    async fn fetch_profile(&self, _token: &str) -> Result<UserProfile, GateError> {
        if self.should_fail {
            return Err(GateError::unauthorized("mock identity rejection"));
        }

        Ok(UserProfile {
            roles: self.roles.clone(),
            ..UserProfile::default()
        })
    }
}
