use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{Announcement, CreateAnnouncementDto};
use super::service::AnnouncementService;

#[utoipa::path(
    post,
    path = "/dashboard/coordenacao/comunicados",
    request_body = CreateAnnouncementDto,
    responses(
        (status = 201, description = "Announcement published", body = Announcement),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Announcements"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn create_announcement(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateAnnouncementDto>,
) -> Result<(axum::http::StatusCode, Json<Announcement>), AppError> {
    let created_by = auth_user.user_id()?;
    let announcement =
        AnnouncementService::create_announcement(&state.db, dto, created_by).await?;
    Ok((axum::http::StatusCode::CREATED, Json(announcement)))
}

#[utoipa::path(
    get,
    path = "/dashboard/coordenacao/comunicados",
    responses((status = 200, description = "All announcements", body = [Announcement])),
    security(("bearer_auth" = [])),
    tag = "Announcements"
)]
#[instrument(skip(state))]
pub async fn list_announcements(
    State(state): State<AppState>,
) -> Result<Json<Vec<Announcement>>, AppError> {
    Ok(Json(AnnouncementService::list_announcements(&state.db).await?))
}

#[utoipa::path(
    delete,
    path = "/dashboard/coordenacao/comunicados/{id}",
    params(("id" = Uuid, Path, description = "Announcement ID")),
    responses(
        (status = 200, description = "Announcement deleted"),
        (status = 404, description = "Announcement not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Announcements"
)]
#[instrument(skip(state))]
pub async fn delete_announcement(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    AnnouncementService::delete_announcement(&state.db, id).await?;
    Ok(Json(json!({"message": "Announcement deleted successfully"})))
}
