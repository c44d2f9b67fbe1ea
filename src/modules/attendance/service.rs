use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::students::service::foreign_key_violation;
use crate::utils::errors::AppError;

use super::model::{Attendance, AttendanceBatchDto, AttendanceListParams};

const ATTENDANCE_COLUMNS: &str =
    "id, enrollment_id, subject_id, class_date, present, justification";

pub struct AttendanceService;

impl AttendanceService {
    /// Record one lesson's attendance sheet.
    ///
    /// The (enrollment, subject, date) triple is unique; a re-submission
    /// of the same sheet coalesces into an update of the `present` flag
    /// instead of producing duplicate rows.
    #[instrument(skip(db, dto), fields(entries = dto.entries.len()))]
    pub async fn record_sheet(
        db: &PgPool,
        dto: AttendanceBatchDto,
    ) -> Result<Vec<Attendance>, AppError> {
        let mut tx = db.begin().await?;
        let mut recorded = Vec::with_capacity(dto.entries.len());

        for entry in &dto.entries {
            let row = sqlx::query_as::<_, Attendance>(&format!(
                "INSERT INTO attendance (enrollment_id, subject_id, class_date, present)
                 VALUES ($1, $2, $3, $4)
                 ON CONFLICT (enrollment_id, subject_id, class_date)
                 DO UPDATE SET present = EXCLUDED.present
                 RETURNING {ATTENDANCE_COLUMNS}"
            ))
            .bind(entry.enrollment_id)
            .bind(dto.subject_id)
            .bind(dto.class_date)
            .bind(entry.present)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| match foreign_key_violation(&e) {
                true => AppError::could_not_complete(),
                false => AppError::database(anyhow::Error::from(e)),
            })?;
            recorded.push(row);
        }

        tx.commit().await?;
        Ok(recorded)
    }

    #[instrument(skip(db, params))]
    pub async fn list_attendance(
        db: &PgPool,
        params: &AttendanceListParams,
    ) -> Result<Vec<Attendance>, AppError> {
        sqlx::query_as::<_, Attendance>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance
             WHERE ($1::uuid IS NULL OR enrollment_id = $1)
               AND ($2::uuid IS NULL OR subject_id = $2)
             ORDER BY class_date DESC"
        ))
        .bind(params.enrollment_id)
        .bind(params.subject_id)
        .fetch_all(db)
        .await
        .context("Failed to list attendance")
        .map_err(AppError::database)
    }

    /// Attach an approved justification to the matching attendance row,
    /// if the lesson was already recorded.
    #[instrument(skip(db, reason))]
    pub async fn attach_justification(
        db: &PgPool,
        enrollment_id: Uuid,
        subject_id: Uuid,
        class_date: chrono::NaiveDate,
        reason: &str,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE attendance SET justification = $1
             WHERE enrollment_id = $2 AND subject_id = $3 AND class_date = $4",
        )
        .bind(reason)
        .bind(enrollment_id)
        .bind(subject_id)
        .bind(class_date)
        .execute(db)
        .await
        .context("Failed to attach justification")
        .map_err(AppError::database)?;
        Ok(())
    }
}
