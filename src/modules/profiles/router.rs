use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    bulk_delete, create_profile, delete_profile, get_profile, list_profiles, update_profile,
};

pub fn init_profiles_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_profile).get(list_profiles))
        .route("/bulk-delete", post(bulk_delete))
        .route(
            "/{id}",
            get(get_profile).put(update_profile).delete(delete_profile),
        )
}
