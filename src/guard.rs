use serde::Serialize;

use crate::{
    identity::IdentityState,
    models::Role,
    routes::{FALLBACK_REDIRECT, ResolvedRoute, admin::ADMIN_ROOT, public::PUBLIC_PATHS},
    session::Session,
};

/// Decision
///
/// What the guard does with one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "to", rename_all = "lowercase")]
pub enum Decision {
    Admit,
    Redirect(String),
}

impl Decision {
    pub fn to_root() -> Self {
        Decision::Redirect(FALLBACK_REDIRECT.to_string())
    }

    pub fn to_admin() -> Self {
        Decision::Redirect(ADMIN_ROOT.to_string())
    }
}

/// GuardOutcome
///
/// A decision plus whether the guard wiped the stored token on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardOutcome {
    pub decision: Decision,
    pub token_cleared: bool,
}

impl GuardOutcome {
    fn kept(decision: Decision) -> Self {
        Self {
            decision,
            token_cleared: false,
        }
    }
}

/// Exact match against the allow-list: `/login/` or `/Login` is not public.
pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

/// decide_for_roles
///
/// The role check applied once the identity endpoint has vouched for the
/// token. Admin pages need the admin role; user pages are off limits to
/// admins, who are sent to the admin root instead.
pub fn decide_for_roles(required: Option<Role>, roles: &[String]) -> Decision {
    let is_admin = roles.iter().any(|r| r == Role::Admin.as_str());

    match required {
        Some(Role::Admin) if !is_admin => Decision::to_root(),
        Some(Role::User) if is_admin => Decision::to_admin(),
        _ => Decision::Admit,
    }
}

/// NavigationGuard
///
/// Runs before every navigation. Fails closed: anything other than a clean
/// `/me` answer clears the session token and sends the visitor to `/`.
#[derive(Clone)]
pub struct NavigationGuard {
    session: Session,
    identity: IdentityState,
}

impl NavigationGuard {
    pub fn new(session: Session, identity: IdentityState) -> Self {
        Self { session, identity }
    }

    /// before_each
    ///
    /// Decides one navigation. Issues at most one identity call; nothing is
    /// cached between calls.
    pub async fn before_each(&self, target: &ResolvedRoute) -> GuardOutcome {
        if is_public_path(&target.requested_path) {
            return GuardOutcome::kept(Decision::Admit);
        }

        let Some(token) = self.session.token().await else {
            tracing::debug!(path = %target.path, "no session token, redirecting to root");
            return GuardOutcome::kept(Decision::to_root());
        };

        match self.identity.fetch_profile(&token).await {
            Ok(profile) => {
                let required = target.descriptor.meta.map(|meta| meta.role);
                let decision = decide_for_roles(required, &profile.roles);

                tracing::debug!(
                    path = %target.path,
                    roles = ?profile.roles,
                    decision = ?decision,
                    "identity check passed"
                );

                GuardOutcome::kept(decision)
            }
            Err(e) => {
                tracing::warn!(path = %target.path, error = %e, "identity check failed, clearing token");
                self.session.sign_out().await;

                GuardOutcome {
                    decision: Decision::to_root(),
                    token_cleared: true,
                }
            }
        }
    }
}
