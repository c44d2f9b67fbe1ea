use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Material {
    pub id: Uuid,
    pub teacher_id: Uuid,
    pub class_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub file_path: String,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}
