use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    active_status, designation_count, platform_comparison, top_profiles, verified_status,
    zone_followers,
};

pub fn init_analytics_router() -> Router<AppState> {
    Router::new()
        .route("/platform-comparison", get(platform_comparison))
        .route("/top-profiles", get(top_profiles))
        .route("/active-status", get(active_status))
        .route("/verified-status", get(verified_status))
        .route("/zone-followers", get(zone_followers))
        .route("/designation-count", get(designation_count))
}
