use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::students::service::{foreign_key_violation, unique_violation};
use crate::utils::errors::AppError;

use super::model::{CreateEnrollmentDto, Enrollment, RosterEntry, UpdateEnrollmentStatusDto};

const ENROLLMENT_COLUMNS: &str = "id, student_id, class_id, status, enrolled_on";

pub struct EnrollmentService;

impl EnrollmentService {
    /// Enroll a student in a class. A second enrollment in the same class
    /// trips the unique constraint and is reported generically.
    #[instrument(skip(db, dto))]
    pub async fn create_enrollment(
        db: &PgPool,
        dto: CreateEnrollmentDto,
    ) -> Result<Enrollment, AppError> {
        sqlx::query_as::<_, Enrollment>(&format!(
            "INSERT INTO enrollments (student_id, class_id, enrolled_on)
             VALUES ($1, $2, COALESCE($3, CURRENT_DATE))
             RETURNING {ENROLLMENT_COLUMNS}"
        ))
        .bind(dto.student_id)
        .bind(dto.class_id)
        .bind(dto.enrolled_on)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if unique_violation(&e) || foreign_key_violation(&e) {
                AppError::could_not_complete()
            } else {
                AppError::database(anyhow::Error::from(e))
            }
        })
    }

    #[instrument(skip(db))]
    pub async fn list_for_student(
        db: &PgPool,
        student_id: Uuid,
    ) -> Result<Vec<Enrollment>, AppError> {
        sqlx::query_as::<_, Enrollment>(&format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments
             WHERE student_id = $1 ORDER BY enrolled_on DESC"
        ))
        .bind(student_id)
        .fetch_all(db)
        .await
        .context("Failed to list enrollments")
        .map_err(AppError::database)
    }

    /// Class roster with student names, ordered for the attendance sheet.
    #[instrument(skip(db))]
    pub async fn class_roster(db: &PgPool, class_id: Uuid) -> Result<Vec<RosterEntry>, AppError> {
        sqlx::query_as::<_, RosterEntry>(
            "SELECT e.id AS enrollment_id, s.id AS student_id,
                    s.enrollment_number, s.full_name, e.status
             FROM enrollments e
             JOIN students s ON s.id = e.student_id
             WHERE e.class_id = $1
             ORDER BY s.full_name",
        )
        .bind(class_id)
        .fetch_all(db)
        .await
        .context("Failed to load class roster")
        .map_err(AppError::database)
    }

    /// The student's active enrollment in their current class, if any.
    #[instrument(skip(db))]
    pub async fn active_enrollment(
        db: &PgPool,
        student_id: Uuid,
    ) -> Result<Option<Enrollment>, AppError> {
        sqlx::query_as::<_, Enrollment>(&format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments
             WHERE student_id = $1 AND status = 'active'
             ORDER BY enrolled_on DESC
             LIMIT 1"
        ))
        .bind(student_id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch active enrollment")
        .map_err(AppError::database)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_status(
        db: &PgPool,
        id: Uuid,
        dto: UpdateEnrollmentStatusDto,
    ) -> Result<Enrollment, AppError> {
        sqlx::query_as::<_, Enrollment>(&format!(
            "UPDATE enrollments SET status = $1 WHERE id = $2 RETURNING {ENROLLMENT_COLUMNS}"
        ))
        .bind(&dto.status)
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Enrollment not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete_enrollment(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM enrollments WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| match foreign_key_violation(&e) {
                true => AppError::could_not_complete(),
                false => AppError::database(anyhow::Error::from(e)),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Enrollment not found")));
        }
        Ok(())
    }
}
