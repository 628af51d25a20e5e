use quiz_portal_gate::{
    GateError,
    models::{Role, RouteMeta, UserProfile, View},
    routes::{RouteDescriptor, RouteTable, Resolution, normalize_path, strip_query},
};

fn matched(table: &RouteTable, path: &str) -> quiz_portal_gate::routes::ResolvedRoute {
    match table.resolve(path) {
        Resolution::Matched(route) => route,
        Resolution::Redirect(to) => panic!("{path} fell back to {to}"),
    }
}

#[test]
fn test_public_routes_resolve_without_meta() {
    let table = RouteTable::quiz_portal();

    for (path, view) in [
        ("/", View::Home),
        ("/register", View::Register),
        ("/login", View::Login),
    ] {
        let route = matched(&table, path);
        assert_eq!(route.descriptor.view, view);
        assert!(route.descriptor.meta.is_none(), "{path} should be public");
    }
}

#[test]
fn test_every_protected_route_declares_its_role() {
    let table = RouteTable::quiz_portal();

    let user_paths = ["/dashboard", "/quiz/:id", "/summary", "/quizlist"];
    let admin_paths = [
        "/admin",
        "/admin/summary",
        "/admin/chapters",
        "/admin/questions",
        "/admin/quizzes",
        "/admin/subjects",
        "/admin/users",
    ];

    for descriptor in table.routes() {
        match descriptor.meta {
            Some(meta) if user_paths.contains(&descriptor.pattern) => {
                assert_eq!(meta, RouteMeta::user())
            }
            Some(meta) if admin_paths.contains(&descriptor.pattern) => {
                assert_eq!(meta, RouteMeta::admin())
            }
            Some(_) => panic!("unexpected protected route {}", descriptor.pattern),
            None => assert!(["/", "/register", "/login"].contains(&descriptor.pattern)),
        }
    }

    assert_eq!(table.routes().len(), 14);
}

#[test]
fn test_quiz_route_captures_id() {
    let table = RouteTable::quiz_portal();
    let route = matched(&table, "/quiz/42");

    assert_eq!(route.descriptor.view, View::QuizView);
    assert_eq!(route.params.get("id").map(String::as_str), Some("42"));
}

#[test]
fn test_quiz_route_needs_exactly_one_segment() {
    let table = RouteTable::quiz_portal();

    assert_eq!(table.resolve("/quiz"), Resolution::Redirect("/"));
    assert_eq!(table.resolve("/quiz/1/extra"), Resolution::Redirect("/"));
}

#[test]
fn test_unknown_paths_fall_back_to_root() {
    let table = RouteTable::quiz_portal();

    assert_eq!(table.resolve("/does-not-exist"), Resolution::Redirect("/"));
    assert_eq!(table.resolve("/admin/unknown"), Resolution::Redirect("/"));
}

#[test]
fn test_static_segments_match_any_case() {
    let table = RouteTable::quiz_portal();

    let route = matched(&table, "/Dashboard");
    assert_eq!(route.descriptor.view, View::Dashboard);
    assert_eq!(route.descriptor.meta, Some(RouteMeta::user()));
    assert_eq!(route.path, "/Dashboard");

    let route = matched(&table, "/ADMIN/users");
    assert_eq!(route.descriptor.view, View::ManageUsers);
    assert_eq!(route.descriptor.meta, Some(RouteMeta::admin()));

    // Captures keep the case they were given.
    let route = matched(&table, "/QUIZ/AbC");
    assert_eq!(route.params.get("id").map(String::as_str), Some("AbC"));
}

#[test]
fn test_query_fragment_and_trailing_slash_are_ignored() {
    let table = RouteTable::quiz_portal();

    let route = matched(&table, "/dashboard/?tab=recent#top");
    assert_eq!(route.path, "/dashboard");
    assert_eq!(route.descriptor.view, View::Dashboard);

    assert_eq!(normalize_path(""), "/");
    assert_eq!(normalize_path("admin/users/"), "/admin/users");
    assert_eq!(normalize_path("/?next=/admin"), "/");
}

#[test]
fn test_requested_path_keeps_trailing_slash() {
    let table = RouteTable::quiz_portal();

    let route = matched(&table, "/login/?next=/dashboard");
    assert_eq!(route.path, "/login");
    assert_eq!(route.requested_path, "/login/");

    assert_eq!(strip_query("summary#top"), "/summary");
}

#[test]
fn test_quiz_portal_table_is_valid() {
    assert!(RouteTable::quiz_portal().validate().is_ok());
}

#[test]
fn test_validate_rejects_fallback_without_route() {
    let table = RouteTable::new(
        vec![RouteDescriptor::protected(
            "/admin",
            View::AdminDashboard,
            RouteMeta::admin(),
        )],
        "/",
    );

    assert!(matches!(
        table.validate(),
        Err(GateError::InvalidRouteTable(_))
    ));
}

#[test]
fn test_validate_rejects_protected_fallback_and_duplicates() {
    let protected_fallback = RouteTable::new(
        vec![RouteDescriptor::protected(
            "/dashboard",
            View::Dashboard,
            RouteMeta::user(),
        )],
        "/dashboard",
    );
    assert!(protected_fallback.validate().is_err());

    let duplicated = RouteTable::new(
        vec![
            RouteDescriptor::public("/", View::Home),
            RouteDescriptor::public("/", View::Login),
        ],
        "/",
    );
    assert!(duplicated.validate().is_err());

    let role_without_auth = RouteTable::new(
        vec![
            RouteDescriptor::public("/", View::Home),
            RouteDescriptor::protected(
                "/summary",
                View::Summary,
                RouteMeta {
                    requires_auth: false,
                    role: Role::User,
                },
            ),
        ],
        "/",
    );
    assert!(role_without_auth.validate().is_err());
}

#[test]
fn test_profile_without_roles_reads_as_empty() {
    let profile: UserProfile = serde_json::from_str(r#"{"id": 7, "email": "a@b.c"}"#).unwrap();

    assert_eq!(profile.id, Some(serde_json::json!(7)));
    assert!(profile.roles.is_empty());
    assert!(!profile.has_role(Role::Admin));
}

#[test]
fn test_profile_with_null_roles_and_odd_fields() {
    let profile: UserProfile =
        serde_json::from_str(r#"{"id": "u-1", "fullname": 42, "roles": null}"#).unwrap();

    assert!(profile.roles.is_empty());
    assert_eq!(profile.id, Some(serde_json::json!("u-1")));
}

#[test]
fn test_profile_ignores_unknown_fields_and_labels() {
    let profile: UserProfile = serde_json::from_str(
        r#"{"id": 1, "fullname": "Admin", "roles": ["admin", "auditor"], "extra": true}"#,
    )
    .unwrap();

    assert!(profile.has_role(Role::Admin));
    assert!(!profile.has_role(Role::User));
}

#[test]
fn test_role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""admin""#);
    assert_eq!(
        serde_json::from_str::<Role>(r#""user""#).unwrap(),
        Role::User
    );
}
