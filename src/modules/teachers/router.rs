use axum::{
    Router,
    routing::{get, post, put},
};

use crate::modules::teachers::controller::{
    assign_teacher, create_teacher, delete_teacher, get_teacher, list_teachers, update_teacher,
};
use crate::state::AppState;

pub fn init_teachers_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_teacher).get(list_teachers))
        .route(
            "/{id}",
            get(get_teacher).put(update_teacher).delete(delete_teacher),
        )
        .route("/{id}/atribuicoes", put(assign_teacher))
}
