use axum::{
    Json,
    extract::{Query, State},
};
use tracing::instrument;

use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{Attendance, AttendanceBatchDto, AttendanceListParams};
use super::service::AttendanceService;

/// Submit (or re-submit) one lesson's attendance sheet.
#[utoipa::path(
    post,
    path = "/dashboard/professor/frequencia/salvar",
    request_body = AttendanceBatchDto,
    responses(
        (status = 200, description = "Sheet recorded; re-submissions update in place", body = [Attendance]),
        (status = 400, description = "Unknown enrollment or subject", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state, dto))]
pub async fn record_attendance_sheet(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<AttendanceBatchDto>,
) -> Result<Json<Vec<Attendance>>, AppError> {
    Ok(Json(AttendanceService::record_sheet(&state.db, dto).await?))
}

#[utoipa::path(
    get,
    path = "/dashboard/professor/frequencia",
    responses((status = 200, description = "Attendance records, optionally filtered", body = [Attendance])),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state, params))]
pub async fn list_attendance(
    State(state): State<AppState>,
    Query(params): Query<AttendanceListParams>,
) -> Result<Json<Vec<Attendance>>, AppError> {
    Ok(Json(
        AttendanceService::list_attendance(&state.db, &params).await?,
    ))
}
