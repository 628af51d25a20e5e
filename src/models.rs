use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Role
///
/// The role a route demands. The identity endpoint reports roles as free-form
/// labels; only these two carry meaning for navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// RouteMeta
///
/// Per-route access metadata. A route with metadata is protected and must
/// name the role it is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub role: Role,
}

impl RouteMeta {
    pub const fn user() -> Self {
        Self {
            requires_auth: true,
            role: Role::User,
        }
    }

    pub const fn admin() -> Self {
        Self {
            requires_auth: true,
            role: Role::Admin,
        }
    }
}

/// View
///
/// Every screen of the quiz front-end a route can land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    Home,
    Register,
    Login,
    Dashboard,
    QuizView,
    Summary,
    QuizList,
    AdminDashboard,
    AdminSummary,
    ManageChapters,
    ManageQuestions,
    ManageQuizzes,
    ManageSubjects,
    ManageUsers,
}

/// UserProfile
///
/// Body of a successful `GET /me`. Only `roles` drives navigation; a missing
/// or null `roles` reads as "no roles". The other fields are kept as raw JSON
/// so their shape can never fail the check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub fullname: Option<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub roles: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl UserProfile {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.iter().any(|r| r == role.as_str())
    }
}
