use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Grades live on the 0..=10 scale.
pub fn validate_grade_value(value: &Decimal) -> Result<(), ValidationError> {
    if *value >= Decimal::ZERO && *value <= Decimal::from(10) {
        Ok(())
    } else {
        Err(ValidationError::new("value").with_message("grade must be between 0 and 10".into()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Grade {
    pub id: Uuid,
    pub enrollment_id: Uuid,
    pub subject_id: Uuid,
    #[schema(value_type = f64)]
    pub value: Decimal,
    pub evaluation_kind: String,
    pub recorded_on: chrono::NaiveDate,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateGradeDto {
    pub enrollment_id: Uuid,
    pub subject_id: Uuid,
    #[validate(custom(function = "validate_grade_value"))]
    #[schema(value_type = f64)]
    pub value: Decimal,
    #[validate(length(min = 1))]
    pub evaluation_kind: String,
    pub recorded_on: Option<chrono::NaiveDate>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateGradeDto {
    #[validate(custom(function = "validate_grade_value"))]
    #[schema(value_type = f64)]
    pub value: Option<Decimal>,
    #[validate(length(min = 1))]
    pub evaluation_kind: Option<String>,
    pub recorded_on: Option<chrono::NaiveDate>,
}

/// One row of a batch grade submission.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct GradeEntryDto {
    pub enrollment_id: Uuid,
    #[validate(custom(function = "validate_grade_value"))]
    #[schema(value_type = f64)]
    pub value: Decimal,
}

/// The grade-entry form a teacher submits for one subject of one class.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct GradeBatchDto {
    pub subject_id: Uuid,
    #[validate(length(min = 1))]
    pub evaluation_kind: String,
    pub recorded_on: Option<chrono::NaiveDate>,
    #[validate(nested)]
    pub entries: Vec<GradeEntryDto>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct GradeListParams {
    pub enrollment_id: Option<Uuid>,
    pub subject_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_bounds() {
        assert!(validate_grade_value(&Decimal::ZERO).is_ok());
        assert!(validate_grade_value(&Decimal::from(10)).is_ok());
        assert!(validate_grade_value(&Decimal::new(75, 1)).is_ok());
        assert!(validate_grade_value(&Decimal::new(101, 1)).is_err());
        assert!(validate_grade_value(&Decimal::new(-1, 1)).is_err());
    }

    #[test]
    fn batch_validation_covers_entries() {
        let batch = GradeBatchDto {
            subject_id: Uuid::new_v4(),
            evaluation_kind: "final exam".to_string(),
            recorded_on: None,
            entries: vec![GradeEntryDto {
                enrollment_id: Uuid::new_v4(),
                value: Decimal::from(11),
            }],
        };
        assert!(batch.validate().is_err());
    }
}
