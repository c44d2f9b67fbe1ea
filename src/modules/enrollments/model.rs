use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Valid enrollment lifecycle states.
pub const STATUSES: &[&str] = &["active", "suspended", "completed"];

pub fn validate_status(status: &str) -> Result<(), ValidationError> {
    if STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(ValidationError::new("status")
            .with_message("status must be one of active, suspended, completed".into()))
    }
}

/// The join record binding a student to a class offering. Grades and
/// attendance hang off this record, not off the student directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Enrollment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub class_id: Uuid,
    pub status: String,
    pub enrolled_on: chrono::NaiveDate,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEnrollmentDto {
    pub student_id: Uuid,
    pub class_id: Uuid,
    pub enrolled_on: Option<chrono::NaiveDate>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateEnrollmentStatusDto {
    #[validate(custom(function = "validate_status"))]
    pub status: String,
}

/// Enrollment joined with the student, for class rosters.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct RosterEntry {
    pub enrollment_id: Uuid,
    pub student_id: Uuid,
    pub enrollment_number: String,
    pub full_name: String,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_validation() {
        assert!(validate_status("active").is_ok());
        assert!(validate_status("completed").is_ok());
        assert!(validate_status("expelled").is_err());
    }
}
