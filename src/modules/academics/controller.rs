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

use super::model::{
    AcademicOverview, Course, CreateClassDto, CreateCourseDto, CreateSubjectDto, SchoolClass,
    Subject, UpdateClassDto, UpdateCourseDto,
};
use super::service::AcademicService;

#[utoipa::path(
    get,
    path = "/dashboard/secretaria/academico",
    responses((status = 200, description = "Courses, subjects and classes", body = AcademicOverview)),
    security(("bearer_auth" = [])),
    tag = "Academics"
)]
#[instrument(skip(state))]
pub async fn academic_overview(
    State(state): State<AppState>,
) -> Result<Json<AcademicOverview>, AppError> {
    Ok(Json(AcademicService::overview(&state.db).await?))
}

#[utoipa::path(
    post,
    path = "/dashboard/secretaria/academico/cursos",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 400, description = "Duplicate course code", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Academics"
)]
#[instrument(skip(state, dto))]
pub async fn create_course(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<(axum::http::StatusCode, Json<Course>), AppError> {
    let course = AcademicService::create_course(&state.db, dto).await?;
    Ok((axum::http::StatusCode::CREATED, Json(course)))
}

#[utoipa::path(
    get,
    path = "/dashboard/secretaria/academico/cursos",
    responses((status = 200, description = "All courses", body = [Course])),
    security(("bearer_auth" = [])),
    tag = "Academics"
)]
#[instrument(skip(state))]
pub async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    Ok(Json(AcademicService::list_courses(&state.db).await?))
}

#[utoipa::path(
    put,
    path = "/dashboard/secretaria/academico/cursos/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated", body = Course),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Academics"
)]
#[instrument(skip(state, dto))]
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseDto>,
) -> Result<Json<Course>, AppError> {
    Ok(Json(AcademicService::update_course(&state.db, id, dto).await?))
}

#[utoipa::path(
    delete,
    path = "/dashboard/secretaria/academico/cursos/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course deleted"),
        (status = 400, description = "Course still has classes", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Academics"
)]
#[instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    AcademicService::delete_course(&state.db, id).await?;
    Ok(Json(json!({"message": "Course deleted successfully"})))
}

#[utoipa::path(
    post,
    path = "/dashboard/secretaria/academico/disciplinas",
    request_body = CreateSubjectDto,
    responses((status = 201, description = "Subject created", body = Subject)),
    security(("bearer_auth" = [])),
    tag = "Academics"
)]
#[instrument(skip(state, dto))]
pub async fn create_subject(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateSubjectDto>,
) -> Result<(axum::http::StatusCode, Json<Subject>), AppError> {
    let subject = AcademicService::create_subject(&state.db, dto).await?;
    Ok((axum::http::StatusCode::CREATED, Json(subject)))
}

#[utoipa::path(
    get,
    path = "/dashboard/secretaria/academico/cursos/{id}/disciplinas",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses((status = 200, description = "Subjects of the course", body = [Subject])),
    security(("bearer_auth" = [])),
    tag = "Academics"
)]
#[instrument(skip(state))]
pub async fn list_course_subjects(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Subject>>, AppError> {
    Ok(Json(
        AcademicService::list_subjects_for_course(&state.db, id).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/dashboard/secretaria/academico/disciplinas/{id}",
    params(("id" = Uuid, Path, description = "Subject ID")),
    responses((status = 200, description = "Subject deleted")),
    security(("bearer_auth" = [])),
    tag = "Academics"
)]
#[instrument(skip(state))]
pub async fn delete_subject(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    AcademicService::delete_subject(&state.db, id).await?;
    Ok(Json(json!({"message": "Subject deleted successfully"})))
}

#[utoipa::path(
    post,
    path = "/dashboard/secretaria/academico/turmas",
    request_body = CreateClassDto,
    responses(
        (status = 201, description = "Class created", body = SchoolClass),
        (status = 400, description = "Duplicate class or unknown course", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Academics"
)]
#[instrument(skip(state, dto))]
pub async fn create_class(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateClassDto>,
) -> Result<(axum::http::StatusCode, Json<SchoolClass>), AppError> {
    let class = AcademicService::create_class(&state.db, dto).await?;
    Ok((axum::http::StatusCode::CREATED, Json(class)))
}

#[utoipa::path(
    get,
    path = "/dashboard/secretaria/academico/turmas",
    responses((status = 200, description = "All classes", body = [SchoolClass])),
    security(("bearer_auth" = [])),
    tag = "Academics"
)]
#[instrument(skip(state))]
pub async fn list_classes(
    State(state): State<AppState>,
) -> Result<Json<Vec<SchoolClass>>, AppError> {
    Ok(Json(AcademicService::list_classes(&state.db).await?))
}

#[utoipa::path(
    put,
    path = "/dashboard/secretaria/academico/turmas/{id}",
    params(("id" = Uuid, Path, description = "Class ID")),
    request_body = UpdateClassDto,
    responses(
        (status = 200, description = "Class updated", body = SchoolClass),
        (status = 404, description = "Class not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Academics"
)]
#[instrument(skip(state, dto))]
pub async fn update_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateClassDto>,
) -> Result<Json<SchoolClass>, AppError> {
    Ok(Json(AcademicService::update_class(&state.db, id, dto).await?))
}

#[utoipa::path(
    delete,
    path = "/dashboard/secretaria/academico/turmas/{id}",
    params(("id" = Uuid, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Class deleted"),
        (status = 400, description = "Class still has enrollments", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Academics"
)]
#[instrument(skip(state))]
pub async fn delete_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    AcademicService::delete_class(&state.db, id).await?;
    Ok(Json(json!({"message": "Class deleted successfully"})))
}
