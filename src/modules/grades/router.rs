use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::grades::controller::{
    create_grade, delete_grade, get_grade, list_grades, record_grade_batch, update_grade,
};
use crate::state::AppState;

/// JSON CRUD resource mounted under `/api/grades`.
pub fn init_grades_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_grade).get(list_grades))
        .route(
            "/{id}",
            get(get_grade).put(update_grade).delete(delete_grade),
        )
}

/// The teacher's grade-entry surface (`/dashboard/professor/notas`).
pub fn init_grade_entry_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_grades))
        .route("/salvar", post(record_grade_batch))
}
