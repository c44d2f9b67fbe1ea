use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::modules::enrollments::controller::{
    class_roster, create_enrollment, delete_enrollment, list_student_enrollments,
    update_enrollment_status,
};
use crate::state::AppState;

pub fn init_enrollments_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_enrollment))
        .route("/aluno/{student_id}", get(list_student_enrollments))
        .route("/turma/{class_id}", get(class_roster))
        .route("/{id}/status", put(update_enrollment_status))
        .route("/{id}", delete(delete_enrollment))
}
