use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::documents::controller::{
    create_document, deliver_document, download_document, issue_document, list_documents,
};
use crate::state::AppState;

pub fn init_documents_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_document).get(list_documents))
        .route("/{id}/emitir", post(issue_document))
        .route("/{id}/entregar", post(deliver_document))
        .route("/{id}/download", get(download_document))
}
