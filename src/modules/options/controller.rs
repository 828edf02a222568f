use axum::{Json, extract::State};

use sociograph_core::AppError;

use crate::state::AppState;

use super::model::FilterOptionsResponse;
use super::service::OptionsService;

#[utoipa::path(
    get,
    path = "/api/filter-options",
    responses(
        (status = 200, description = "Distinct values for each filterable column", body = FilterOptionsResponse)
    ),
    tag = "Options"
)]
pub async fn get_filter_options(
    State(state): State<AppState>,
) -> Result<Json<FilterOptionsResponse>, AppError> {
    let options = OptionsService::get_filter_options(&state.db, &state.cache).await?;
    Ok(Json(options))
}
