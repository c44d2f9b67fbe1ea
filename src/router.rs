use axum::http::{HeaderMap, HeaderValue, Method};
use axum::{Json, Router, middleware, routing::get};
use serde_json::json;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::gate::permission_gate;
use crate::modules::academics::router::{init_academics_router, init_classes_router};
use crate::modules::announcements::router::{
    init_announcements_router, init_announcements_view_router,
};
use crate::modules::attendance::router::init_attendance_router;
use crate::modules::auth::router::init_auth_router;
use crate::modules::dashboards::router::{
    init_coordinator_dashboard_router, init_registrar_dashboard_router,
    init_student_dashboard_router, init_teacher_dashboard_router,
};
use crate::modules::documents::router::init_documents_router;
use crate::modules::enrollments::router::init_enrollments_router;
use crate::modules::events::router::{init_calendar_router, init_calendar_view_router};
use crate::modules::grades::router::{init_grade_entry_router, init_grades_router};
use crate::modules::justifications::router::{
    init_justification_review_router, init_student_justifications_router,
};
use crate::modules::materials::router::init_materials_router;
use crate::modules::students::router::init_students_router;
use crate::modules::teachers::router::init_teachers_router;
use crate::modules::users::router::init_admin_router;
use crate::state::AppState;
use crate::utils::flash;

/// Public home view. Reports and clears the flash left by a denied
/// request, the way the original rendered its one-shot messages.
async fn home(headers: HeaderMap) -> axum::response::Response {
    let message = headers
        .get(axum::http::header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(flash::read_from_cookie_header)
        .as_deref()
        .and_then(flash::describe);

    let body = Json(json!({
        "name": "Nexus",
        "message": message,
    }));

    let mut response = axum::response::IntoResponse::into_response(body);
    if message.is_some() {
        response
            .headers_mut()
            .append(axum::http::header::SET_COOKIE, flash::clear_cookie());
    }
    response
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({"status": "healthy"}))
}

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/", get(home))
        .route("/health", get(health_check))
        .nest("/auth", init_auth_router())
        .nest(
            "/dashboard/aluno",
            init_student_dashboard_router()
                .nest("/calendario", init_calendar_view_router())
                .nest("/comunicados", init_announcements_view_router())
                .nest("/justificativa", init_student_justifications_router()),
        )
        .nest(
            "/dashboard/professor",
            init_teacher_dashboard_router()
                .nest("/notas", init_grade_entry_router())
                .nest("/frequencia", init_attendance_router())
                .nest("/materiais", init_materials_router())
                .nest("/calendario", init_calendar_view_router())
                .nest("/comunicados", init_announcements_router()),
        )
        .nest(
            "/dashboard/secretaria",
            init_registrar_dashboard_router()
                .nest("/alunos", init_students_router())
                .nest("/professores", init_teachers_router())
                .nest("/academico", init_academics_router())
                .nest("/matriculas", init_enrollments_router())
                .nest("/documentos", init_documents_router())
                .nest("/justificativas", init_justification_review_router())
                .nest("/calendario", init_calendar_view_router()),
        )
        .nest(
            "/dashboard/coordenacao",
            init_coordinator_dashboard_router()
                .nest("/turmas", init_classes_router())
                .nest("/alunos", init_students_router())
                .nest("/professores", init_teachers_router())
                .nest("/calendario", init_calendar_router())
                .nest("/comunicados", init_announcements_router()),
        )
        .nest("/admin", init_admin_router())
        .nest(
            "/api",
            Router::new()
                .nest("/students", init_students_router())
                .nest("/grades", init_grades_router()),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            permission_gate,
        ))
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
