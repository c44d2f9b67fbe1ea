use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::materials::controller::{
    delete_material, download_material, list_materials, upload_material,
};
use crate::state::AppState;

pub fn init_materials_router() -> Router<AppState> {
    Router::new()
        .route("/", post(upload_material).get(list_materials))
        .route("/{id}", axum::routing::delete(delete_material))
        .route("/{id}/download", get(download_material))
}
