use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::users::model::User;

/// Dashboard role resolved once at login and embedded in the token.
///
/// Views never probe for linked profiles; the claim is the single source
/// of truth for the permission gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Teacher,
    Registrar,
    Coordinator,
    Administrator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Registrar => "registrar",
            Role::Coordinator => "coordinator",
            Role::Administrator => "administrator",
        }
    }
}

/// Landing view selected by the role resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Landing {
    AdminDashboard,
    StudentDashboard,
    TeacherDashboard,
    RegistrarDashboard,
    CoordinatorDashboard,
    Home,
}

impl Landing {
    pub fn as_path(&self) -> &'static str {
        match self {
            Landing::AdminDashboard => "/admin/",
            Landing::StudentDashboard => "/dashboard/aluno/",
            Landing::TeacherDashboard => "/dashboard/professor/",
            Landing::RegistrarDashboard => "/dashboard/secretaria/",
            Landing::CoordinatorDashboard => "/dashboard/coordenacao/",
            Landing::Home => "/",
        }
    }
}

// JWT claims. `role` is None for principals that resolved to the generic
// home page; the gate denies them everywhere.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub role: Option<Role>,
    /// Path of the dashboard the client should navigate to.
    pub landing: String,
    pub user: User,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&Role::Administrator).unwrap(),
            r#""administrator""#
        );
        assert_eq!(serde_json::to_string(&Role::Student).unwrap(), r#""student""#);
    }

    #[test]
    fn landing_paths_match_url_namespaces() {
        assert_eq!(Landing::StudentDashboard.as_path(), "/dashboard/aluno/");
        assert_eq!(Landing::RegistrarDashboard.as_path(), "/dashboard/secretaria/");
        assert_eq!(Landing::Home.as_path(), "/");
    }
}
