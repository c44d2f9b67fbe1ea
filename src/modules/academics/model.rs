//! Courses, their subjects, and class offerings.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub const SHIFTS: &[&str] = &["morning", "afternoon", "evening", "full_time"];

pub fn validate_shift(shift: &str) -> Result<(), ValidationError> {
    if SHIFTS.contains(&shift) {
        Ok(())
    } else {
        Err(ValidationError::new("shift")
            .with_message("shift must be one of morning, afternoon, evening, full_time".into()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub workload_hours: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub code: String,
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub workload_hours: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseDto {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub workload_hours: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Subject {
    pub id: Uuid,
    pub name: String,
    pub syllabus: Option<String>,
    pub course_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSubjectDto {
    #[validate(length(min = 1))]
    pub name: String,
    pub syllabus: Option<String>,
    pub course_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SchoolClass {
    pub id: Uuid,
    pub code: String,
    pub term: String,
    pub shift: String,
    pub course_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateClassDto {
    #[validate(length(min = 1))]
    pub code: String,
    #[validate(length(min = 1))]
    pub term: String,
    #[validate(custom(function = "validate_shift"))]
    pub shift: String,
    pub course_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateClassDto {
    #[validate(length(min = 1))]
    pub code: Option<String>,
    #[validate(length(min = 1))]
    pub term: Option<String>,
    #[validate(custom(function = "validate_shift"))]
    pub shift: Option<String>,
}

/// The registrar's academic overview, everything on one screen.
#[derive(Debug, Serialize, ToSchema)]
pub struct AcademicOverview {
    pub courses: Vec<Course>,
    pub subjects: Vec<Subject>,
    pub classes: Vec<SchoolClass>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_validation() {
        assert!(validate_shift("morning").is_ok());
        assert!(validate_shift("full_time").is_ok());
        assert!(validate_shift("midnight").is_err());
    }
}
