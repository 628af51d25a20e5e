//! Route Table Module
//!
//! The static route table of the quiz front-end, split by access level the
//! same way the screens are: public pages, pages for signed-in users, and the
//! admin area. Anything that matches none of them falls back to a redirect.

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use crate::{
    error::GateError,
    models::{RouteMeta, View},
};

/// Pages anyone may open, signed in or not.
pub mod public;

/// Pages for regular signed-in users.
pub mod user;

/// Pages restricted to the 'admin' role.
pub mod admin;

/// Where unmatched paths are sent.
pub const FALLBACK_REDIRECT: &str = "/";

/// RouteDescriptor
///
/// One row of the table: a path pattern (`:name` segments capture), the view
/// it renders, and its access metadata. `meta == None` means public.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteDescriptor {
    pub pattern: &'static str,
    pub view: View,
    pub meta: Option<RouteMeta>,
}

impl RouteDescriptor {
    pub const fn public(pattern: &'static str, view: View) -> Self {
        Self {
            pattern,
            view,
            meta: None,
        }
    }

    pub const fn protected(pattern: &'static str, view: View, meta: RouteMeta) -> Self {
        Self {
            pattern,
            view,
            meta: Some(meta),
        }
    }

    /// Matches a normalized path, returning the captured `:params`. Static
    /// segments compare ASCII case-insensitively; captures keep their case.
    fn matches(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let mut params = BTreeMap::new();
        let mut pattern_segments = segments(self.pattern);
        let mut path_segments = segments(path);

        loop {
            match (pattern_segments.next(), path_segments.next()) {
                (None, None) => return Some(params),
                (Some(expected), Some(actual)) => {
                    if let Some(name) = expected.strip_prefix(':') {
                        params.insert(name.to_string(), actual.to_string());
                    } else if !expected.eq_ignore_ascii_case(actual) {
                        return None;
                    }
                }
                _ => return None,
            }
        }
    }
}

/// ResolvedRoute
///
/// A path that matched a descriptor. `path` is the normalized form used for
/// landing; `requested_path` is the path as asked for, minus query and
/// fragment, which is what the public allow-list is checked against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRoute {
    pub path: String,
    pub requested_path: String,
    pub descriptor: RouteDescriptor,
    pub params: BTreeMap<String, String>,
}

/// Resolution
///
/// Outcome of looking a path up in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Matched(ResolvedRoute),
    /// Catch-all hit: navigate to this path instead.
    Redirect(&'static str),
}

/// RouteTable
///
/// Built once at startup and never mutated. Lookup is first-match in
/// declaration order.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
    fallback: &'static str,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteDescriptor>, fallback: &'static str) -> Self {
        Self { routes, fallback }
    }

    /// quiz_portal
    ///
    /// The quiz platform's table: public, user and admin pages, then the
    /// catch-all redirect to the public root.
    pub fn quiz_portal() -> Self {
        let routes = public::public_routes()
            .into_iter()
            .chain(user::user_routes())
            .chain(admin::admin_routes())
            .collect();

        Self::new(routes, FALLBACK_REDIRECT)
    }

    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    /// resolve
    ///
    /// Looks a path up. Query strings and fragments are ignored, a trailing
    /// slash is tolerated and static segments match regardless of case.
    pub fn resolve(&self, raw_path: &str) -> Resolution {
        let requested_path = strip_query(raw_path);
        let path = normalize_path(raw_path);

        self.routes
            .iter()
            .find_map(|descriptor| {
                descriptor.matches(&path).map(|params| ResolvedRoute {
                    path: path.clone(),
                    requested_path: requested_path.clone(),
                    descriptor: *descriptor,
                    params,
                })
            })
            .map(Resolution::Matched)
            .unwrap_or(Resolution::Redirect(self.fallback))
    }

    /// validate
    ///
    /// Checks the table's invariants: well-formed unique patterns, every
    /// protected route requiring auth, and a fallback that lands on a public
    /// route.
    pub fn validate(&self) -> Result<(), GateError> {
        let mut seen = HashSet::new();

        for descriptor in &self.routes {
            if !descriptor.pattern.starts_with('/') {
                return Err(GateError::InvalidRouteTable(format!(
                    "pattern {:?} must start with '/'",
                    descriptor.pattern
                )));
            }
            if !seen.insert(descriptor.pattern) {
                return Err(GateError::InvalidRouteTable(format!(
                    "pattern {:?} declared twice",
                    descriptor.pattern
                )));
            }
            if let Some(meta) = descriptor.meta {
                if !meta.requires_auth {
                    return Err(GateError::InvalidRouteTable(format!(
                        "route {:?} declares role {} without requiring auth",
                        descriptor.pattern, meta.role
                    )));
                }
            }
        }

        match self.resolve(self.fallback) {
            Resolution::Matched(route) if route.descriptor.meta.is_none() => Ok(()),
            Resolution::Matched(_) => Err(GateError::InvalidRouteTable(format!(
                "fallback {:?} points at a protected route",
                self.fallback
            ))),
            Resolution::Redirect(_) => Err(GateError::InvalidRouteTable(format!(
                "fallback {:?} matches no route",
                self.fallback
            ))),
        }
    }
}

/// Strips query and fragment, forces a leading slash and drops trailing ones.
pub fn normalize_path(raw_path: &str) -> String {
    let trimmed = strip_query(raw_path);
    format!("/{}", trimmed.trim_matches('/'))
}

/// Strips query and fragment and forces a leading slash. Trailing slashes and
/// case are left as given.
pub fn strip_query(raw_path: &str) -> String {
    let without_suffix = raw_path
        .split(['?', '#'])
        .next()
        .unwrap_or_default();

    if without_suffix.starts_with('/') {
        without_suffix.to_string()
    } else {
        format!("/{without_suffix}")
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}
