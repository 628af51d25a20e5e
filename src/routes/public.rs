use super::RouteDescriptor;
use crate::models::View;

/// Paths admitted without any identity check.
pub const PUBLIC_PATHS: [&str; 3] = ["/", "/register", "/login"];

/// Public Routes
///
/// Pages reachable by anyone, including anonymous visitors. These are also the
/// guard's allow-list, and `/` doubles as the target of every fail-closed
/// redirect.
pub fn public_routes() -> Vec<RouteDescriptor> {
    vec![
        // Landing page.
        RouteDescriptor::public("/", View::Home),
        // Account creation.
        RouteDescriptor::public("/register", View::Register),
        // Sign-in form; the token it obtains is what the guard later checks.
        RouteDescriptor::public("/login", View::Login),
    ]
}
