use axum::{Router, routing::post};

use crate::modules::auth::controller::{login_user, logout_user};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login_user))
        .route("/logout", post(logout_user))
}
