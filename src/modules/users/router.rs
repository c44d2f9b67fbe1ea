use axum::{
    Router,
    routing::{get, post, put},
};

use crate::modules::users::controller::{
    admin_dashboard, assign_groups, create_user, delete_user, list_users,
};
use crate::state::AppState;

/// The `/admin` namespace: superuser-only management backend.
pub fn init_admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(admin_dashboard))
        .route("/users", post(create_user).get(list_users))
        .route("/users/{id}", axum::routing::delete(delete_user))
        .route("/users/{id}/grupos", put(assign_groups))
}
