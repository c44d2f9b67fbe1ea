//! Account models and the well-known permission groups.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::pagination::{PaginationMeta, PaginationParams};

/// A login account. Dashboard roles are not stored here: student/teacher
/// come from linked profile records, registrar/coordination from group
/// membership, administrator from `is_superuser`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub is_superuser: bool,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(length(min = 3))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[serde(default)]
    pub is_superuser: bool,
    /// Group names to assign (`registrar`, `coordination`).
    #[serde(default)]
    pub groups: Vec<String>,
    /// Link the new account to an existing student record.
    pub student_id: Option<Uuid>,
    /// Link the new account to an existing teacher record.
    pub teacher_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AssignGroupsDto {
    pub groups: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UserFilterParams {
    pub username: Option<String>,
    pub email: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedUsersResponse {
    pub data: Vec<User>,
    pub meta: PaginationMeta,
}

/// System-wide counters for the administrator dashboard.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminDashboard {
    pub total_users: i64,
    pub total_students: i64,
    pub total_teachers: i64,
    pub total_classes: i64,
    pub total_active_enrollments: i64,
}

/// Well-known permission groups with fixed ids (must match migration).
pub mod groups {
    use uuid::Uuid;

    pub const REGISTRAR: Uuid = Uuid::from_u128(0x00000000_0000_0000_0000_000000000001);
    pub const COORDINATION: Uuid = Uuid::from_u128(0x00000000_0000_0000_0000_000000000002);

    pub mod names {
        pub const REGISTRAR: &str = "registrar";
        pub const COORDINATION: &str = "coordination";
    }

    pub fn id_by_name(name: &str) -> Option<Uuid> {
        match name {
            names::REGISTRAR => Some(REGISTRAR),
            names::COORDINATION => Some(COORDINATION),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_ids_match_migration() {
        assert_eq!(
            groups::REGISTRAR.to_string(),
            "00000000-0000-0000-0000-000000000001"
        );
        assert_eq!(
            groups::COORDINATION.to_string(),
            "00000000-0000-0000-0000-000000000002"
        );
    }

    #[test]
    fn unknown_group_name_resolves_to_none() {
        assert_eq!(groups::id_by_name("registrar"), Some(groups::REGISTRAR));
        assert_eq!(groups::id_by_name("janitors"), None);
    }
}
