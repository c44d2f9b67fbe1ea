use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::students::service::foreign_key_violation;
use crate::utils::errors::AppError;

use super::model::{CreateGradeDto, Grade, GradeBatchDto, GradeListParams, UpdateGradeDto};

const GRADE_COLUMNS: &str = "id, enrollment_id, subject_id, value, evaluation_kind, recorded_on";

pub struct GradeService;

impl GradeService {
    #[instrument(skip(db, dto))]
    pub async fn create_grade(db: &PgPool, dto: CreateGradeDto) -> Result<Grade, AppError> {
        sqlx::query_as::<_, Grade>(&format!(
            "INSERT INTO grades (enrollment_id, subject_id, value, evaluation_kind, recorded_on)
             VALUES ($1, $2, $3, $4, COALESCE($5, CURRENT_DATE))
             RETURNING {GRADE_COLUMNS}"
        ))
        .bind(dto.enrollment_id)
        .bind(dto.subject_id)
        .bind(dto.value)
        .bind(&dto.evaluation_kind)
        .bind(dto.recorded_on)
        .fetch_one(db)
        .await
        .map_err(|e| match foreign_key_violation(&e) {
            true => AppError::could_not_complete(),
            false => AppError::database(anyhow::Error::from(e)),
        })
    }

    /// Record a whole grade column in one transaction. Either the whole
    /// form lands or none of it does.
    #[instrument(skip(db, dto), fields(entries = dto.entries.len()))]
    pub async fn record_batch(db: &PgPool, dto: GradeBatchDto) -> Result<Vec<Grade>, AppError> {
        let mut tx = db.begin().await?;
        let mut recorded = Vec::with_capacity(dto.entries.len());

        for entry in &dto.entries {
            let grade = sqlx::query_as::<_, Grade>(&format!(
                "INSERT INTO grades (enrollment_id, subject_id, value, evaluation_kind, recorded_on)
                 VALUES ($1, $2, $3, $4, COALESCE($5, CURRENT_DATE))
                 RETURNING {GRADE_COLUMNS}"
            ))
            .bind(entry.enrollment_id)
            .bind(dto.subject_id)
            .bind(entry.value)
            .bind(&dto.evaluation_kind)
            .bind(dto.recorded_on)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| match foreign_key_violation(&e) {
                true => AppError::could_not_complete(),
                false => AppError::database(anyhow::Error::from(e)),
            })?;
            recorded.push(grade);
        }

        tx.commit().await?;
        Ok(recorded)
    }

    #[instrument(skip(db, params))]
    pub async fn list_grades(
        db: &PgPool,
        params: &GradeListParams,
    ) -> Result<Vec<Grade>, AppError> {
        sqlx::query_as::<_, Grade>(&format!(
            "SELECT {GRADE_COLUMNS} FROM grades
             WHERE ($1::uuid IS NULL OR enrollment_id = $1)
               AND ($2::uuid IS NULL OR subject_id = $2)
             ORDER BY recorded_on DESC"
        ))
        .bind(params.enrollment_id)
        .bind(params.subject_id)
        .fetch_all(db)
        .await
        .context("Failed to list grades")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_grade(db: &PgPool, id: Uuid) -> Result<Grade, AppError> {
        sqlx::query_as::<_, Grade>(&format!("SELECT {GRADE_COLUMNS} FROM grades WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Grade not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_grade(
        db: &PgPool,
        id: Uuid,
        dto: UpdateGradeDto,
    ) -> Result<Grade, AppError> {
        let existing = Self::get_grade(db, id).await?;

        sqlx::query_as::<_, Grade>(&format!(
            "UPDATE grades SET value = $1, evaluation_kind = $2, recorded_on = $3
             WHERE id = $4
             RETURNING {GRADE_COLUMNS}"
        ))
        .bind(dto.value.unwrap_or(existing.value))
        .bind(dto.evaluation_kind.unwrap_or(existing.evaluation_kind))
        .bind(dto.recorded_on.unwrap_or(existing.recorded_on))
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update grade")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn delete_grade(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM grades WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Grade not found")));
        }
        Ok(())
    }
}
