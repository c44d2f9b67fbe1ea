use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::enrollments::service::EnrollmentService;
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::flash;
use crate::validator::ValidatedJson;

use super::model::{AbsenceJustification, JustificationListParams, SubmitJustificationDto};
use super::service::JustificationService;

/// Student submits a justification for an absence in their active class.
#[utoipa::path(
    post,
    path = "/dashboard/aluno/justificativa",
    request_body = SubmitJustificationDto,
    responses(
        (status = 201, description = "Justification submitted", body = AbsenceJustification),
        (status = 400, description = "No active enrollment", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Justifications"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn submit_justification(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<SubmitJustificationDto>,
) -> Result<Response, AppError> {
    let user_id = auth_user.user_id()?;
    let Some(student) = StudentService::find_by_user(&state.db, user_id).await? else {
        warn!(%user_id, "Student role without a linked profile");
        return Ok(flash::redirect_home(flash::PROFILE_MISSING));
    };

    let enrollment = EnrollmentService::active_enrollment(&state.db, student.id)
        .await?
        .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("No active enrollment")))?;

    let justification = JustificationService::submit(&state.db, enrollment.id, dto).await?;
    Ok((axum::http::StatusCode::CREATED, Json(justification)).into_response())
}

/// Student lists their own justifications.
#[utoipa::path(
    get,
    path = "/dashboard/aluno/justificativa",
    responses((status = 200, description = "The student's justifications", body = [AbsenceJustification])),
    security(("bearer_auth" = [])),
    tag = "Justifications"
)]
#[instrument(skip(state, auth_user))]
pub async fn list_own_justifications(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Response, AppError> {
    let user_id = auth_user.user_id()?;
    let Some(student) = StudentService::find_by_user(&state.db, user_id).await? else {
        warn!(%user_id, "Student role without a linked profile");
        return Ok(flash::redirect_home(flash::PROFILE_MISSING));
    };

    let Some(enrollment) = EnrollmentService::active_enrollment(&state.db, student.id).await?
    else {
        return Ok(Json(Vec::<AbsenceJustification>::new()).into_response());
    };

    let justifications =
        JustificationService::list_for_enrollment(&state.db, enrollment.id).await?;
    Ok(Json(justifications).into_response())
}

/// Registrar review queue.
#[utoipa::path(
    get,
    path = "/dashboard/secretaria/justificativas",
    responses((status = 200, description = "Justifications, oldest first", body = [AbsenceJustification])),
    security(("bearer_auth" = [])),
    tag = "Justifications"
)]
#[instrument(skip(state, params))]
pub async fn list_justifications(
    State(state): State<AppState>,
    Query(params): Query<JustificationListParams>,
) -> Result<Json<Vec<AbsenceJustification>>, AppError> {
    Ok(Json(JustificationService::list_all(&state.db, &params).await?))
}

#[utoipa::path(
    post,
    path = "/dashboard/secretaria/justificativas/{id}/aprovar",
    params(("id" = Uuid, Path, description = "Justification ID")),
    responses(
        (status = 200, description = "Justification approved", body = AbsenceJustification),
        (status = 400, description = "Justification is not pending", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Justifications"
)]
#[instrument(skip(state, auth_user))]
pub async fn approve_justification(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<AbsenceJustification>, AppError> {
    let reviewed_by = auth_user.user_id()?;
    let justification = JustificationService::review(&state.db, id, true, reviewed_by).await?;
    Ok(Json(justification))
}

#[utoipa::path(
    post,
    path = "/dashboard/secretaria/justificativas/{id}/rejeitar",
    params(("id" = Uuid, Path, description = "Justification ID")),
    responses(
        (status = 200, description = "Justification rejected", body = AbsenceJustification),
        (status = 400, description = "Justification is not pending", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Justifications"
)]
#[instrument(skip(state, auth_user))]
pub async fn reject_justification(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<AbsenceJustification>, AppError> {
    let reviewed_by = auth_user.user_id()?;
    let justification = JustificationService::review(&state.db, id, false, reviewed_by).await?;
    Ok(Json(justification))
}
