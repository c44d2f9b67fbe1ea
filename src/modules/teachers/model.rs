use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::modules::students::model::ProvisionAccountDto;
use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Teacher {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub specialty: Option<String>,
    pub hired_on: Option<chrono::NaiveDate>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTeacherDto {
    #[validate(length(min = 1))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub specialty: Option<String>,
    pub hired_on: Option<chrono::NaiveDate>,
    #[validate(nested)]
    pub account: Option<ProvisionAccountDto>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateTeacherDto {
    #[validate(length(min = 1))]
    pub full_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialty: Option<String>,
    pub hired_on: Option<chrono::NaiveDate>,
}

/// Replaces the teacher's subject and class assignments.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AssignTeacherDto {
    #[serde(default)]
    pub subject_ids: Vec<Uuid>,
    #[serde(default)]
    pub class_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TeacherFilterParams {
    pub name: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedTeachersResponse {
    pub data: Vec<Teacher>,
    pub meta: PaginationMeta,
}
