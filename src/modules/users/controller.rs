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
    AdminDashboard, AssignGroupsDto, CreateUserDto, PaginatedUsersResponse, User, UserFilterParams,
};
use super::service::UserService;

#[utoipa::path(
    get,
    path = "/admin",
    responses((status = 200, description = "System-wide counters", body = AdminDashboard)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn admin_dashboard(
    State(state): State<AppState>,
) -> Result<Json<AdminDashboard>, AppError> {
    Ok(Json(UserService::admin_dashboard(&state.db).await?))
}

#[utoipa::path(
    post,
    path = "/admin/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "Account created", body = User),
        (status = 400, description = "Duplicate username/email or unknown group", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, dto))]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(axum::http::StatusCode, Json<User>), AppError> {
    let user = UserService::create_user(&state.db, dto).await?;
    Ok((axum::http::StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/admin/users",
    responses((status = 200, description = "Accounts", body = PaginatedUsersResponse)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, params))]
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<UserFilterParams>,
) -> Result<Json<PaginatedUsersResponse>, AppError> {
    let (users, total) = UserService::list_users(&state.db, &params).await?;
    Ok(Json(PaginatedUsersResponse {
        data: users,
        meta: PaginationMeta::new(total, params.pagination.limit(), params.pagination.offset()),
    }))
}

#[utoipa::path(
    put,
    path = "/admin/users/{id}/grupos",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = AssignGroupsDto,
    responses(
        (status = 200, description = "Groups replaced"),
        (status = 400, description = "Unknown group", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, dto))]
pub async fn assign_groups(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(dto): Json<AssignGroupsDto>,
) -> Result<Json<serde_json::Value>, AppError> {
    UserService::assign_groups(&state.db, id, &dto.groups).await?;
    Ok(Json(json!({"message": "Groups updated"})))
}

#[utoipa::path(
    delete,
    path = "/admin/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Account deleted"),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    UserService::delete_user(&state.db, id).await?;
    Ok(Json(json!({"message": "User deleted successfully"})))
}
