use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::attendance::controller::{list_attendance, record_attendance_sheet};
use crate::state::AppState;

pub fn init_attendance_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_attendance))
        .route("/salvar", post(record_attendance_sheet))
}
