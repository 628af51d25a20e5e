use super::RouteDescriptor;
use crate::models::{RouteMeta, View};

/// Root of the admin area, where admins land when they open a user page.
pub const ADMIN_ROOT: &str = "/admin";

/// Admin Routes
///
/// The moderation and content-management area. Every page requires the
/// 'admin' role; anyone else is sent back to the public root.
pub fn admin_routes() -> Vec<RouteDescriptor> {
    vec![
        RouteDescriptor::protected(ADMIN_ROOT, View::AdminDashboard, RouteMeta::admin()),
        // Platform-wide statistics.
        RouteDescriptor::protected("/admin/summary", View::AdminSummary, RouteMeta::admin()),
        // --- Content management ---
        RouteDescriptor::protected("/admin/chapters", View::ManageChapters, RouteMeta::admin()),
        RouteDescriptor::protected(
            "/admin/questions",
            View::ManageQuestions,
            RouteMeta::admin(),
        ),
        RouteDescriptor::protected("/admin/quizzes", View::ManageQuizzes, RouteMeta::admin()),
        RouteDescriptor::protected("/admin/subjects", View::ManageSubjects, RouteMeta::admin()),
        // Account listing and export.
        RouteDescriptor::protected("/admin/users", View::ManageUsers, RouteMeta::admin()),
    ]
}
