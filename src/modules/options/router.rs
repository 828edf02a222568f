use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::get_filter_options;

pub fn init_options_router() -> Router<AppState> {
    Router::new().route("/", get(get_filter_options))
}
