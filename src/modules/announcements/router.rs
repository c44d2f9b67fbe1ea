use axum::{Router, routing::post};

use crate::modules::announcements::controller::{
    create_announcement, delete_announcement, list_announcements,
};
use crate::state::AppState;

/// Mounted under the coordination and teacher namespaces.
pub fn init_announcements_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_announcement).get(list_announcements))
        .route("/{id}", axum::routing::delete(delete_announcement))
}

/// Read-only listing for the student dashboard namespace.
pub fn init_announcements_view_router() -> Router<AppState> {
    Router::new().route("/", axum::routing::get(list_announcements))
}
