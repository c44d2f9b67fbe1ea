use axum::{
    Json,
    body::Body,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use tracing::{instrument, warn};

use crate::middleware::auth::AuthUser;
use crate::modules::students::model::Student;
use crate::modules::students::service::StudentService;
use crate::modules::teachers::service::TeacherService;
use crate::reports::{excel, pdf};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::flash;

use super::model::{
    AttendanceReport, ClassPerformanceRow, CoordinatorDashboard, RegistrarDashboard, ReportCard,
    StudentDashboard, StudentSchedule, TeacherDashboard,
};
use super::service::DashboardService;

/// The linked student profile, or the flash redirect the original app
/// produced when the lookup failed.
async fn current_student(
    state: &AppState,
    auth_user: &AuthUser,
) -> Result<Result<Student, Response>, AppError> {
    let user_id = auth_user.user_id()?;
    match StudentService::find_by_user(&state.db, user_id).await? {
        Some(student) => Ok(Ok(student)),
        None => {
            warn!(%user_id, "Student role without a linked profile");
            Ok(Err(flash::redirect_home(flash::PROFILE_MISSING)))
        }
    }
}

fn attachment(bytes: Vec<u8>, content_type: &str, file_name: &str) -> Result<Response, AppError> {
    Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name),
        )
        .body(Body::from(bytes))
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to build response: {}", e)))
}

#[utoipa::path(
    get,
    path = "/dashboard/aluno",
    responses((status = 200, description = "Student dashboard", body = StudentDashboard)),
    security(("bearer_auth" = [])),
    tag = "Dashboards"
)]
#[instrument(skip(state, auth_user))]
pub async fn student_dashboard(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Response, AppError> {
    let student = match current_student(&state, &auth_user).await? {
        Ok(student) => student,
        Err(redirect) => return Ok(redirect),
    };

    let dashboard = DashboardService::student_dashboard(&state.db, student).await?;
    Ok(Json(dashboard).into_response())
}

#[utoipa::path(
    get,
    path = "/dashboard/aluno/boletim",
    responses((status = 200, description = "Report card", body = ReportCard)),
    security(("bearer_auth" = [])),
    tag = "Dashboards"
)]
#[instrument(skip(state, auth_user))]
pub async fn student_report_card(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Response, AppError> {
    let student = match current_student(&state, &auth_user).await? {
        Ok(student) => student,
        Err(redirect) => return Ok(redirect),
    };

    let report = DashboardService::report_card(&state.db, &student).await?;
    Ok(Json(report).into_response())
}

#[utoipa::path(
    get,
    path = "/dashboard/aluno/boletim/pdf",
    responses((status = 200, description = "Report card as PDF")),
    security(("bearer_auth" = [])),
    tag = "Exports"
)]
#[instrument(skip(state, auth_user))]
pub async fn export_report_card_pdf(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Response, AppError> {
    let student = match current_student(&state, &auth_user).await? {
        Ok(student) => student,
        Err(redirect) => return Ok(redirect),
    };

    let report = DashboardService::report_card(&state.db, &student).await?;
    let bytes = pdf::render_report_card(&report)?;
    attachment(
        bytes,
        "application/pdf",
        &format!("boletim_{}.pdf", student.enrollment_number),
    )
}

#[utoipa::path(
    get,
    path = "/dashboard/aluno/frequencia",
    responses((status = 200, description = "Per-subject attendance", body = AttendanceReport)),
    security(("bearer_auth" = [])),
    tag = "Dashboards"
)]
#[instrument(skip(state, auth_user))]
pub async fn student_attendance(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Response, AppError> {
    let student = match current_student(&state, &auth_user).await? {
        Ok(student) => student,
        Err(redirect) => return Ok(redirect),
    };

    let report = DashboardService::attendance_report(&state.db, &student).await?;
    Ok(Json(report).into_response())
}

#[utoipa::path(
    get,
    path = "/dashboard/aluno/frequencia/pdf",
    responses((status = 200, description = "Attendance report as PDF")),
    security(("bearer_auth" = [])),
    tag = "Exports"
)]
#[instrument(skip(state, auth_user))]
pub async fn export_attendance_pdf(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Response, AppError> {
    let student = match current_student(&state, &auth_user).await? {
        Ok(student) => student,
        Err(redirect) => return Ok(redirect),
    };

    let report = DashboardService::attendance_report(&state.db, &student).await?;
    let bytes = pdf::render_attendance_report(&report)?;
    attachment(
        bytes,
        "application/pdf",
        &format!("frequencia_{}.pdf", student.enrollment_number),
    )
}

#[utoipa::path(
    get,
    path = "/dashboard/aluno/frequencia/excel",
    responses((status = 200, description = "Attendance report as XLSX")),
    security(("bearer_auth" = [])),
    tag = "Exports"
)]
#[instrument(skip(state, auth_user))]
pub async fn export_attendance_excel(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Response, AppError> {
    let student = match current_student(&state, &auth_user).await? {
        Ok(student) => student,
        Err(redirect) => return Ok(redirect),
    };

    let report = DashboardService::attendance_report(&state.db, &student).await?;
    let bytes = excel::attendance_workbook(&report)?;
    attachment(
        bytes,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        &format!("frequencia_{}.xlsx", student.enrollment_number),
    )
}

#[utoipa::path(
    get,
    path = "/dashboard/aluno/horario",
    responses((status = 200, description = "Current class and its subjects", body = StudentSchedule)),
    security(("bearer_auth" = [])),
    tag = "Dashboards"
)]
#[instrument(skip(state, auth_user))]
pub async fn student_schedule(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Response, AppError> {
    let student = match current_student(&state, &auth_user).await? {
        Ok(student) => student,
        Err(redirect) => return Ok(redirect),
    };

    let schedule = DashboardService::schedule(&state.db, &student).await?;
    Ok(Json(schedule).into_response())
}

#[utoipa::path(
    get,
    path = "/dashboard/professor",
    responses((status = 200, description = "Teacher dashboard", body = TeacherDashboard)),
    security(("bearer_auth" = [])),
    tag = "Dashboards"
)]
#[instrument(skip(state, auth_user))]
pub async fn teacher_dashboard(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Response, AppError> {
    let user_id = auth_user.user_id()?;
    let Some(teacher) = TeacherService::find_by_user(&state.db, user_id).await? else {
        warn!(%user_id, "Teacher role without a linked profile");
        return Ok(flash::redirect_home(flash::PROFILE_MISSING));
    };

    let dashboard = DashboardService::teacher_dashboard(&state.db, &teacher).await?;
    Ok(Json(dashboard).into_response())
}

#[utoipa::path(
    get,
    path = "/dashboard/secretaria",
    responses((status = 200, description = "Registrar dashboard", body = RegistrarDashboard)),
    security(("bearer_auth" = [])),
    tag = "Dashboards"
)]
#[instrument(skip(state))]
pub async fn registrar_dashboard(
    State(state): State<AppState>,
) -> Result<Json<RegistrarDashboard>, AppError> {
    Ok(Json(DashboardService::registrar_dashboard(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/dashboard/coordenacao",
    responses((status = 200, description = "Coordination dashboard", body = CoordinatorDashboard)),
    security(("bearer_auth" = [])),
    tag = "Dashboards"
)]
#[instrument(skip(state))]
pub async fn coordinator_dashboard(
    State(state): State<AppState>,
) -> Result<Json<CoordinatorDashboard>, AppError> {
    Ok(Json(
        DashboardService::coordinator_dashboard(&state.db).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/dashboard/coordenacao/relatorios",
    responses((status = 200, description = "Per-class performance", body = [ClassPerformanceRow])),
    security(("bearer_auth" = [])),
    tag = "Dashboards"
)]
#[instrument(skip(state))]
pub async fn class_performance_report(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClassPerformanceRow>>, AppError> {
    Ok(Json(DashboardService::class_performance(&state.db).await?))
}
