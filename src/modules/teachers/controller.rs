use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;
use crate::validator::ValidatedJson;

use super::model::{
    AssignTeacherDto, CreateTeacherDto, PaginatedTeachersResponse, Teacher, TeacherFilterParams,
    UpdateTeacherDto,
};
use super::service::TeacherService;

#[utoipa::path(
    post,
    path = "/dashboard/secretaria/professores",
    request_body = CreateTeacherDto,
    responses(
        (status = 201, description = "Teacher created", body = Teacher),
        (status = 400, description = "Duplicate email or username", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, dto))]
pub async fn create_teacher(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateTeacherDto>,
) -> Result<(axum::http::StatusCode, Json<Teacher>), AppError> {
    let teacher = TeacherService::create_teacher(&state.db, dto).await?;
    Ok((axum::http::StatusCode::CREATED, Json(teacher)))
}

#[utoipa::path(
    get,
    path = "/dashboard/secretaria/professores",
    responses(
        (status = 200, description = "List of teachers", body = PaginatedTeachersResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, params))]
pub async fn list_teachers(
    State(state): State<AppState>,
    Query(params): Query<TeacherFilterParams>,
) -> Result<Json<PaginatedTeachersResponse>, AppError> {
    let (teachers, total) = TeacherService::list_teachers(&state.db, &params).await?;

    Ok(Json(PaginatedTeachersResponse {
        data: teachers,
        meta: PaginationMeta::new(total, params.pagination.limit(), params.pagination.offset()),
    }))
}

#[utoipa::path(
    get,
    path = "/dashboard/secretaria/professores/{id}",
    params(("id" = Uuid, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "Teacher details", body = Teacher),
        (status = 404, description = "Teacher not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn get_teacher(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Teacher>, AppError> {
    let teacher = TeacherService::get_teacher(&state.db, id).await?;
    Ok(Json(teacher))
}

#[utoipa::path(
    put,
    path = "/dashboard/secretaria/professores/{id}",
    params(("id" = Uuid, Path, description = "Teacher ID")),
    request_body = UpdateTeacherDto,
    responses(
        (status = 200, description = "Teacher updated", body = Teacher),
        (status = 404, description = "Teacher not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, dto))]
pub async fn update_teacher(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateTeacherDto>,
) -> Result<Json<Teacher>, AppError> {
    let teacher = TeacherService::update_teacher(&state.db, id, dto).await?;
    Ok(Json(teacher))
}

/// Replace the teacher's subject/class assignments.
#[utoipa::path(
    put,
    path = "/dashboard/secretaria/professores/{id}/atribuicoes",
    params(("id" = Uuid, Path, description = "Teacher ID")),
    request_body = AssignTeacherDto,
    responses(
        (status = 200, description = "Assignments replaced"),
        (status = 400, description = "Unknown subject or class", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, dto))]
pub async fn assign_teacher(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(dto): Json<AssignTeacherDto>,
) -> Result<Json<serde_json::Value>, AppError> {
    TeacherService::assign_teacher(&state.db, id, dto).await?;
    Ok(Json(json!({"message": "Assignments updated"})))
}

#[utoipa::path(
    delete,
    path = "/dashboard/secretaria/professores/{id}",
    params(("id" = Uuid, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "Teacher deleted"),
        (status = 404, description = "Teacher not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn delete_teacher(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    TeacherService::delete_teacher(&state.db, id).await?;
    Ok(Json(json!({"message": "Teacher deleted successfully"})))
}
