use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::students::service::foreign_key_violation;
use crate::utils::errors::AppError;
use crate::utils::media::MediaStore;

use super::model::Material;

const MATERIAL_COLUMNS: &str =
    "id, teacher_id, class_id, title, description, file_path, uploaded_at";

pub struct MaterialService;

impl MaterialService {
    #[instrument(skip(db, description, file_path))]
    pub async fn create_material(
        db: &PgPool,
        teacher_id: Uuid,
        class_id: Option<Uuid>,
        title: &str,
        description: Option<&str>,
        file_path: &str,
    ) -> Result<Material, AppError> {
        sqlx::query_as::<_, Material>(&format!(
            "INSERT INTO materials (teacher_id, class_id, title, description, file_path)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {MATERIAL_COLUMNS}"
        ))
        .bind(teacher_id)
        .bind(class_id)
        .bind(title)
        .bind(description)
        .bind(file_path)
        .fetch_one(db)
        .await
        .map_err(|e| match foreign_key_violation(&e) {
            true => AppError::could_not_complete(),
            false => AppError::database(anyhow::Error::from(e)),
        })
    }

    /// A teacher's own uploads, newest first.
    #[instrument(skip(db))]
    pub async fn list_for_teacher(
        db: &PgPool,
        teacher_id: Uuid,
    ) -> Result<Vec<Material>, AppError> {
        sqlx::query_as::<_, Material>(&format!(
            "SELECT {MATERIAL_COLUMNS} FROM materials
             WHERE teacher_id = $1
             ORDER BY uploaded_at DESC"
        ))
        .bind(teacher_id)
        .fetch_all(db)
        .await
        .context("Failed to list materials")
        .map_err(AppError::database)
    }

    #[instrument(skip(db, media))]
    pub async fn read_file(
        db: &PgPool,
        media: &MediaStore,
        id: Uuid,
    ) -> Result<(Material, Vec<u8>), AppError> {
        let material = sqlx::query_as::<_, Material>(&format!(
            "SELECT {MATERIAL_COLUMNS} FROM materials WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Material not found")))?;

        let bytes = media.read(&material.file_path).await?;
        Ok((material, bytes))
    }

    #[instrument(skip(db, media))]
    pub async fn delete_material(
        db: &PgPool,
        media: &MediaStore,
        id: Uuid,
        teacher_id: Uuid,
    ) -> Result<(), AppError> {
        let file_path = sqlx::query_scalar::<_, String>(
            "DELETE FROM materials WHERE id = $1 AND teacher_id = $2 RETURNING file_path",
        )
        .bind(id)
        .bind(teacher_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Material not found")))?;

        media.delete(&file_path).await?;
        Ok(())
    }
}
