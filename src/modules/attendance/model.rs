use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Attendance {
    pub id: Uuid,
    pub enrollment_id: Uuid,
    pub subject_id: Uuid,
    pub class_date: chrono::NaiveDate,
    pub present: bool,
    pub justification: Option<String>,
}

/// One student's mark on the attendance sheet.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AttendanceEntryDto {
    pub enrollment_id: Uuid,
    pub present: bool,
}

/// The attendance sheet a teacher submits for one lesson.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AttendanceBatchDto {
    pub subject_id: Uuid,
    pub class_date: chrono::NaiveDate,
    #[validate(nested)]
    pub entries: Vec<AttendanceEntryDto>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AttendanceListParams {
    pub enrollment_id: Option<Uuid>,
    pub subject_id: Option<Uuid>,
}
