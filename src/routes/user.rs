use super::RouteDescriptor;
use crate::models::{RouteMeta, View};

/// User Routes
///
/// Pages for a signed-in regular user. An admin opening any of these is sent
/// to the admin dashboard instead.
pub fn user_routes() -> Vec<RouteDescriptor> {
    vec![
        // Subject overview and entry point after sign-in.
        RouteDescriptor::protected("/dashboard", View::Dashboard, RouteMeta::user()),
        // Attempting a single quiz; `:id` is the quiz id.
        RouteDescriptor::protected("/quiz/:id", View::QuizView, RouteMeta::user()),
        // Scores across past attempts.
        RouteDescriptor::protected("/summary", View::Summary, RouteMeta::user()),
        RouteDescriptor::protected("/quizlist", View::QuizList, RouteMeta::user()),
    ]
}
