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

use super::model::{CalendarEvent, CreateEventDto, UpdateEventDto};
use super::service::EventService;

#[utoipa::path(
    get,
    path = "/dashboard/coordenacao/calendario",
    responses((status = 200, description = "School calendar, ordered by date", body = [CalendarEvent])),
    security(("bearer_auth" = [])),
    tag = "Calendar"
)]
#[instrument(skip(state))]
pub async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<CalendarEvent>>, AppError> {
    Ok(Json(EventService::list_events(&state.db).await?))
}

#[utoipa::path(
    post,
    path = "/dashboard/coordenacao/calendario/evento",
    request_body = CreateEventDto,
    responses((status = 201, description = "Event created", body = CalendarEvent)),
    security(("bearer_auth" = [])),
    tag = "Calendar"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn create_event(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateEventDto>,
) -> Result<(axum::http::StatusCode, Json<CalendarEvent>), AppError> {
    let created_by = auth_user.user_id()?;
    let event = EventService::create_event(&state.db, dto, created_by).await?;
    Ok((axum::http::StatusCode::CREATED, Json(event)))
}

#[utoipa::path(
    put,
    path = "/dashboard/coordenacao/calendario/evento/{id}",
    params(("id" = Uuid, Path, description = "Event ID")),
    request_body = UpdateEventDto,
    responses(
        (status = 200, description = "Event updated", body = CalendarEvent),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Calendar"
)]
#[instrument(skip(state, dto))]
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateEventDto>,
) -> Result<Json<CalendarEvent>, AppError> {
    Ok(Json(EventService::update_event(&state.db, id, dto).await?))
}

#[utoipa::path(
    delete,
    path = "/dashboard/coordenacao/calendario/evento/{id}",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event deleted"),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Calendar"
)]
#[instrument(skip(state))]
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    EventService::delete_event(&state.db, id).await?;
    Ok(Json(json!({"message": "Event deleted successfully"})))
}
