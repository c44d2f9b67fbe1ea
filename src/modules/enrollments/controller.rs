use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CreateEnrollmentDto, Enrollment, RosterEntry, UpdateEnrollmentStatusDto};
use super::service::EnrollmentService;

#[utoipa::path(
    post,
    path = "/dashboard/secretaria/matriculas",
    request_body = CreateEnrollmentDto,
    responses(
        (status = 201, description = "Enrollment created", body = Enrollment),
        (status = 400, description = "Duplicate enrollment or unknown references", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state, dto))]
pub async fn create_enrollment(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateEnrollmentDto>,
) -> Result<(axum::http::StatusCode, Json<Enrollment>), AppError> {
    let enrollment = EnrollmentService::create_enrollment(&state.db, dto).await?;
    Ok((axum::http::StatusCode::CREATED, Json(enrollment)))
}

#[utoipa::path(
    get,
    path = "/dashboard/secretaria/matriculas/aluno/{student_id}",
    params(("student_id" = Uuid, Path, description = "Student ID")),
    responses((status = 200, description = "Student's enrollments", body = [Enrollment])),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn list_student_enrollments(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Vec<Enrollment>>, AppError> {
    Ok(Json(
        EnrollmentService::list_for_student(&state.db, student_id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/dashboard/secretaria/matriculas/turma/{class_id}",
    params(("class_id" = Uuid, Path, description = "Class ID")),
    responses((status = 200, description = "Class roster", body = [RosterEntry])),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn class_roster(
    State(state): State<AppState>,
    Path(class_id): Path<Uuid>,
) -> Result<Json<Vec<RosterEntry>>, AppError> {
    Ok(Json(EnrollmentService::class_roster(&state.db, class_id).await?))
}

#[utoipa::path(
    put,
    path = "/dashboard/secretaria/matriculas/{id}/status",
    params(("id" = Uuid, Path, description = "Enrollment ID")),
    request_body = UpdateEnrollmentStatusDto,
    responses(
        (status = 200, description = "Status updated", body = Enrollment),
        (status = 404, description = "Enrollment not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state, dto))]
pub async fn update_enrollment_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateEnrollmentStatusDto>,
) -> Result<Json<Enrollment>, AppError> {
    Ok(Json(EnrollmentService::update_status(&state.db, id, dto).await?))
}

#[utoipa::path(
    delete,
    path = "/dashboard/secretaria/matriculas/{id}",
    params(("id" = Uuid, Path, description = "Enrollment ID")),
    responses(
        (status = 200, description = "Enrollment deleted"),
        (status = 404, description = "Enrollment not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn delete_enrollment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    EnrollmentService::delete_enrollment(&state.db, id).await?;
    Ok(Json(json!({"message": "Enrollment deleted successfully"})))
}
