use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::justifications::controller::{
    approve_justification, list_justifications, list_own_justifications, reject_justification,
    submit_justification,
};
use crate::state::AppState;

/// Student side: submit and track (`/dashboard/aluno/justificativa`).
pub fn init_student_justifications_router() -> Router<AppState> {
    Router::new().route("/", post(submit_justification).get(list_own_justifications))
}

/// Registrar side: review queue (`/dashboard/secretaria/justificativas`).
pub fn init_justification_review_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_justifications))
        .route("/{id}/aprovar", post(approve_justification))
        .route("/{id}/rejeitar", post(reject_justification))
}
