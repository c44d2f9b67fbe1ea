use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub const AUDIENCES: &[&str] = &["students", "teachers", "registrar", "all"];

pub fn validate_audience(audience: &str) -> Result<(), ValidationError> {
    if AUDIENCES.contains(&audience) {
        Ok(())
    } else {
        Err(ValidationError::new("audience")
            .with_message("audience must be one of students, teachers, registrar, all".into()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Announcement {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub audience: String,
    pub created_by: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAnnouncementDto {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub body: String,
    #[validate(custom(function = "validate_audience"))]
    #[serde(default = "default_audience")]
    pub audience: String,
}

fn default_audience() -> String {
    "all".to_string()
}
