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
use crate::validator::ValidatedJson;

use super::model::{CreateGradeDto, Grade, GradeBatchDto, GradeListParams, UpdateGradeDto};
use super::service::GradeService;

#[utoipa::path(
    post,
    path = "/api/grades",
    request_body = CreateGradeDto,
    responses(
        (status = 201, description = "Grade recorded", body = Grade),
        (status = 400, description = "Unknown enrollment or subject", body = ErrorResponse),
        (status = 422, description = "Grade outside the 0..=10 range", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Grades"
)]
#[instrument(skip(state, dto))]
pub async fn create_grade(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateGradeDto>,
) -> Result<(axum::http::StatusCode, Json<Grade>), AppError> {
    let grade = GradeService::create_grade(&state.db, dto).await?;
    Ok((axum::http::StatusCode::CREATED, Json(grade)))
}

/// Batch form submission from the teacher's grade-entry screen.
#[utoipa::path(
    post,
    path = "/dashboard/professor/notas/salvar",
    request_body = GradeBatchDto,
    responses(
        (status = 201, description = "Grades recorded", body = [Grade]),
        (status = 422, description = "A grade outside the 0..=10 range", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Grades"
)]
#[instrument(skip(state, dto))]
pub async fn record_grade_batch(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<GradeBatchDto>,
) -> Result<(axum::http::StatusCode, Json<Vec<Grade>>), AppError> {
    let grades = GradeService::record_batch(&state.db, dto).await?;
    Ok((axum::http::StatusCode::CREATED, Json(grades)))
}

#[utoipa::path(
    get,
    path = "/api/grades",
    responses((status = 200, description = "Grades, optionally filtered", body = [Grade])),
    security(("bearer_auth" = [])),
    tag = "Grades"
)]
#[instrument(skip(state, params))]
pub async fn list_grades(
    State(state): State<AppState>,
    Query(params): Query<GradeListParams>,
) -> Result<Json<Vec<Grade>>, AppError> {
    Ok(Json(GradeService::list_grades(&state.db, &params).await?))
}

#[utoipa::path(
    get,
    path = "/api/grades/{id}",
    params(("id" = Uuid, Path, description = "Grade ID")),
    responses(
        (status = 200, description = "Grade details", body = Grade),
        (status = 404, description = "Grade not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Grades"
)]
#[instrument(skip(state))]
pub async fn get_grade(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Grade>, AppError> {
    Ok(Json(GradeService::get_grade(&state.db, id).await?))
}

#[utoipa::path(
    put,
    path = "/api/grades/{id}",
    params(("id" = Uuid, Path, description = "Grade ID")),
    request_body = UpdateGradeDto,
    responses(
        (status = 200, description = "Grade updated", body = Grade),
        (status = 404, description = "Grade not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Grades"
)]
#[instrument(skip(state, dto))]
pub async fn update_grade(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateGradeDto>,
) -> Result<Json<Grade>, AppError> {
    Ok(Json(GradeService::update_grade(&state.db, id, dto).await?))
}

#[utoipa::path(
    delete,
    path = "/api/grades/{id}",
    params(("id" = Uuid, Path, description = "Grade ID")),
    responses(
        (status = 200, description = "Grade deleted"),
        (status = 404, description = "Grade not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Grades"
)]
#[instrument(skip(state))]
pub async fn delete_grade(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    GradeService::delete_grade(&state.db, id).await?;
    Ok(Json(json!({"message": "Grade deleted successfully"})))
}
