use axum::{Router, routing::get};

use crate::modules::dashboards::controller::{
    class_performance_report, coordinator_dashboard, export_attendance_excel,
    export_attendance_pdf, export_report_card_pdf, registrar_dashboard, student_attendance,
    student_dashboard, student_report_card, student_schedule, teacher_dashboard,
};
use crate::state::AppState;

/// Student-facing screens of `/dashboard/aluno`.
pub fn init_student_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/", get(student_dashboard))
        .route("/boletim", get(student_report_card))
        .route("/boletim/pdf", get(export_report_card_pdf))
        .route("/frequencia", get(student_attendance))
        .route("/frequencia/pdf", get(export_attendance_pdf))
        .route("/frequencia/excel", get(export_attendance_excel))
        .route("/horario", get(student_schedule))
}

pub fn init_teacher_dashboard_router() -> Router<AppState> {
    Router::new().route("/", get(teacher_dashboard))
}

pub fn init_registrar_dashboard_router() -> Router<AppState> {
    Router::new().route("/", get(registrar_dashboard))
}

pub fn init_coordinator_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/", get(coordinator_dashboard))
        .route("/relatorios", get(class_performance_report))
}
