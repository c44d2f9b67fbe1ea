use axum::{
    Router,
    routing::{get, post, put},
};

use crate::modules::events::controller::{
    create_event, delete_event, list_events, update_event,
};
use crate::state::AppState;

/// Full calendar management, for the coordination namespace.
pub fn init_calendar_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events))
        .route("/evento", post(create_event))
        .route("/evento/{id}", put(update_event).delete(delete_event))
}

/// Read-only calendar, mounted in the other dashboards.
pub fn init_calendar_view_router() -> Router<AppState> {
    Router::new().route("/", get(list_events))
}
