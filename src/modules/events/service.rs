use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{CalendarEvent, CreateEventDto, UpdateEventDto};

const EVENT_COLUMNS: &str = "id, title, description, starts_at, created_by, created_at";

pub struct EventService;

impl EventService {
    #[instrument(skip(db, dto))]
    pub async fn create_event(
        db: &PgPool,
        dto: CreateEventDto,
        created_by: Uuid,
    ) -> Result<CalendarEvent, AppError> {
        sqlx::query_as::<_, CalendarEvent>(&format!(
            "INSERT INTO calendar_events (title, description, starts_at, created_by)
             VALUES ($1, $2, $3, $4)
             RETURNING {EVENT_COLUMNS}"
        ))
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.starts_at)
        .bind(created_by)
        .fetch_one(db)
        .await
        .context("Failed to create event")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn list_events(db: &PgPool) -> Result<Vec<CalendarEvent>, AppError> {
        sqlx::query_as::<_, CalendarEvent>(&format!(
            "SELECT {EVENT_COLUMNS} FROM calendar_events ORDER BY starts_at"
        ))
        .fetch_all(db)
        .await
        .context("Failed to list events")
        .map_err(AppError::database)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_event(
        db: &PgPool,
        id: Uuid,
        dto: UpdateEventDto,
    ) -> Result<CalendarEvent, AppError> {
        let existing = sqlx::query_as::<_, CalendarEvent>(&format!(
            "SELECT {EVENT_COLUMNS} FROM calendar_events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Event not found")))?;

        sqlx::query_as::<_, CalendarEvent>(&format!(
            "UPDATE calendar_events SET title = $1, description = $2, starts_at = $3
             WHERE id = $4
             RETURNING {EVENT_COLUMNS}"
        ))
        .bind(dto.title.unwrap_or(existing.title))
        .bind(dto.description.or(existing.description))
        .bind(dto.starts_at.unwrap_or(existing.starts_at))
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update event")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn delete_event(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM calendar_events WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Event not found")));
        }
        Ok(())
    }
}
