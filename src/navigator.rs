use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{
    error::GateError,
    guard::{Decision, NavigationGuard},
    models::View,
    routes::{Resolution, RouteTable},
};

/// Upper bound on redirects followed by a single navigation.
pub const MAX_REDIRECTS: usize = 10;

/// Landing
///
/// Where a navigation ended up after every redirect was followed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Landing {
    pub path: String,
    pub view: View,
    pub params: BTreeMap<String, String>,
    /// Paths passed through on the way, in order, excluding the landing.
    pub redirected_from: Vec<String>,
    pub token_cleared: bool,
}

/// Navigator
///
/// Ties the route table to the guard: resolve, guard, and repeat for each
/// redirect until a route is admitted.
#[derive(Clone)]
pub struct Navigator {
    table: RouteTable,
    guard: NavigationGuard,
}

impl Navigator {
    pub fn new(table: RouteTable, guard: NavigationGuard) -> Self {
        Self { table, guard }
    }

    /// navigate
    ///
    /// Follows catch-all and guard redirects alike. Each guarded hop may
    /// cost one identity call.
    pub async fn navigate(&self, path: &str) -> Result<Landing, GateError> {
        let mut current = path.to_string();
        let mut redirected_from = Vec::new();
        let mut token_cleared = false;

        loop {
            if redirected_from.len() > MAX_REDIRECTS {
                return Err(GateError::RedirectLoop {
                    path: path.to_string(),
                    hops: redirected_from.len(),
                });
            }

            let route = match self.table.resolve(&current) {
                Resolution::Matched(route) => route,
                Resolution::Redirect(target) => {
                    tracing::debug!(from = %current, to = target, "no route matched");
                    redirected_from.push(std::mem::replace(&mut current, target.to_string()));
                    continue;
                }
            };

            let outcome = self.guard.before_each(&route).await;
            token_cleared |= outcome.token_cleared;

            match outcome.decision {
                Decision::Admit => {
                    return Ok(Landing {
                        path: route.path,
                        view: route.descriptor.view,
                        params: route.params,
                        redirected_from,
                        token_cleared,
                    });
                }
                Decision::Redirect(target) => {
                    redirected_from.push(route.path);
                    current = target;
                }
            }
        }
    }
}
