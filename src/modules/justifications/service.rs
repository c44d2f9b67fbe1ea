use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::attendance::service::AttendanceService;
use crate::modules::students::service::foreign_key_violation;
use crate::utils::errors::AppError;

use super::model::{AbsenceJustification, JustificationListParams, SubmitJustificationDto};

const JUSTIFICATION_COLUMNS: &str = "id, enrollment_id, subject_id, class_date, reason, status, \
                                     reviewed_by, created_at, reviewed_at";

pub struct JustificationService;

impl JustificationService {
    #[instrument(skip(db, dto))]
    pub async fn submit(
        db: &PgPool,
        enrollment_id: Uuid,
        dto: SubmitJustificationDto,
    ) -> Result<AbsenceJustification, AppError> {
        sqlx::query_as::<_, AbsenceJustification>(&format!(
            "INSERT INTO absence_justifications (enrollment_id, subject_id, class_date, reason)
             VALUES ($1, $2, $3, $4)
             RETURNING {JUSTIFICATION_COLUMNS}"
        ))
        .bind(enrollment_id)
        .bind(dto.subject_id)
        .bind(dto.class_date)
        .bind(&dto.reason)
        .fetch_one(db)
        .await
        .map_err(|e| match foreign_key_violation(&e) {
            true => AppError::could_not_complete(),
            false => AppError::database(anyhow::Error::from(e)),
        })
    }

    #[instrument(skip(db))]
    pub async fn list_for_enrollment(
        db: &PgPool,
        enrollment_id: Uuid,
    ) -> Result<Vec<AbsenceJustification>, AppError> {
        sqlx::query_as::<_, AbsenceJustification>(&format!(
            "SELECT {JUSTIFICATION_COLUMNS} FROM absence_justifications
             WHERE enrollment_id = $1
             ORDER BY created_at DESC"
        ))
        .bind(enrollment_id)
        .fetch_all(db)
        .await
        .context("Failed to list justifications")
        .map_err(AppError::database)
    }

    #[instrument(skip(db, params))]
    pub async fn list_all(
        db: &PgPool,
        params: &JustificationListParams,
    ) -> Result<Vec<AbsenceJustification>, AppError> {
        sqlx::query_as::<_, AbsenceJustification>(&format!(
            "SELECT {JUSTIFICATION_COLUMNS} FROM absence_justifications
             WHERE ($1::text IS NULL OR status = $1)
             ORDER BY created_at"
        ))
        .bind(&params.status)
        .fetch_all(db)
        .await
        .context("Failed to list justifications")
        .map_err(AppError::database)
    }

    /// Review a pending justification. Approval also writes the reason
    /// onto the matching attendance row when that lesson was recorded.
    #[instrument(skip(db))]
    pub async fn review(
        db: &PgPool,
        id: Uuid,
        approve: bool,
        reviewed_by: Uuid,
    ) -> Result<AbsenceJustification, AppError> {
        let status = if approve { "approved" } else { "rejected" };

        let justification = sqlx::query_as::<_, AbsenceJustification>(&format!(
            "UPDATE absence_justifications
             SET status = $1, reviewed_by = $2, reviewed_at = NOW()
             WHERE id = $3 AND status = 'pending'
             RETURNING {JUSTIFICATION_COLUMNS}"
        ))
        .bind(status)
        .bind(reviewed_by)
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(AppError::could_not_complete)?;

        if approve {
            AttendanceService::attach_justification(
                db,
                justification.enrollment_id,
                justification.subject_id,
                justification.class_date,
                &justification.reason,
            )
            .await?;
        }

        Ok(justification)
    }
}
