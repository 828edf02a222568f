use axum::{Json, extract::State};

use sociograph_core::AppError;

use crate::state::AppState;

use super::model::StatsResponse;
use super::service::StatsService;

#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Aggregate profile statistics", body = StatsResponse)
    ),
    tag = "Stats"
)]
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let stats = StatsService::get_stats(&state.db, &state.cache).await?;
    Ok(Json(stats))
}
