use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{Announcement, CreateAnnouncementDto};

const ANNOUNCEMENT_COLUMNS: &str = "id, title, body, audience, created_by, created_at";

pub struct AnnouncementService;

impl AnnouncementService {
    #[instrument(skip(db, dto))]
    pub async fn create_announcement(
        db: &PgPool,
        dto: CreateAnnouncementDto,
        created_by: Uuid,
    ) -> Result<Announcement, AppError> {
        sqlx::query_as::<_, Announcement>(&format!(
            "INSERT INTO announcements (title, body, audience, created_by)
             VALUES ($1, $2, $3, $4)
             RETURNING {ANNOUNCEMENT_COLUMNS}"
        ))
        .bind(&dto.title)
        .bind(&dto.body)
        .bind(&dto.audience)
        .bind(created_by)
        .fetch_one(db)
        .await
        .context("Failed to create announcement")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn list_announcements(db: &PgPool) -> Result<Vec<Announcement>, AppError> {
        sqlx::query_as::<_, Announcement>(&format!(
            "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements ORDER BY created_at DESC"
        ))
        .fetch_all(db)
        .await
        .context("Failed to list announcements")
        .map_err(AppError::database)
    }

    /// Latest announcements visible to students, for the dashboard.
    #[instrument(skip(db))]
    pub async fn latest_for_students(
        db: &PgPool,
        limit: i64,
    ) -> Result<Vec<Announcement>, AppError> {
        sqlx::query_as::<_, Announcement>(&format!(
            "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements
             WHERE audience IN ('students', 'all')
             ORDER BY created_at DESC
             LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(db)
        .await
        .context("Failed to list announcements")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn delete_announcement(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Announcement not found"
            )));
        }
        Ok(())
    }
}
