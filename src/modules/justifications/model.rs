use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A student's request to excuse an absence, reviewed by the registrar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AbsenceJustification {
    pub id: Uuid,
    pub enrollment_id: Uuid,
    pub subject_id: Uuid,
    pub class_date: chrono::NaiveDate,
    pub reason: String,
    pub status: String,
    pub reviewed_by: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub reviewed_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SubmitJustificationDto {
    pub subject_id: Uuid,
    pub class_date: chrono::NaiveDate,
    #[validate(length(min = 1))]
    pub reason: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct JustificationListParams {
    pub status: Option<String>,
}
