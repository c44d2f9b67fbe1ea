use axum::{
    Router,
    routing::{get, post, put},
};

use crate::modules::academics::controller::{
    academic_overview, create_class, create_course, create_subject, delete_class, delete_course,
    delete_subject, list_classes, list_course_subjects, list_courses, update_class, update_course,
};
use crate::state::AppState;

/// Academic management: mounted under `/dashboard/secretaria/academico`.
pub fn init_academics_router() -> Router<AppState> {
    Router::new()
        .route("/", get(academic_overview))
        .route("/cursos", post(create_course).get(list_courses))
        .route(
            "/cursos/{id}",
            put(update_course).delete(delete_course),
        )
        .route("/cursos/{id}/disciplinas", get(list_course_subjects))
        .route("/disciplinas", post(create_subject))
        .route("/disciplinas/{id}", axum::routing::delete(delete_subject))
        .route("/turmas", post(create_class).get(list_classes))
        .route("/turmas/{id}", put(update_class).delete(delete_class))
}

/// Class management as exposed to coordination (`/dashboard/coordenacao/turmas`).
pub fn init_classes_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_class).get(list_classes))
        .route("/{id}", put(update_class).delete(delete_class))
}
