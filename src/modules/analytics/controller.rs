use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use sociograph_core::AppError;

use crate::state::AppState;

use super::model::{AnalyticsFilters, ChartData};
use super::service::AnalyticsService;

fn unwrap_filters(
    filters: Result<Query<AnalyticsFilters>, QueryRejection>,
) -> Result<AnalyticsFilters, AppError> {
    let Query(filters) = filters
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid query parameters: {}", e)))?;
    Ok(filters)
}

#[utoipa::path(
    get,
    path = "/api/analytics/platform-comparison",
    params(
        ("zone" = Option<String>, Query, description = "Filter by zone"),
        ("party_district" = Option<String>, Query, description = "Filter by party district"),
        ("constituency" = Option<String>, Query, description = "Filter by constituency"),
        ("designation" = Option<String>, Query, description = "Filter by designation")
    ),
    responses(
        (status = 200, description = "Average followers per platform", body = ChartData)
    ),
    tag = "Analytics"
)]
pub async fn platform_comparison(
    State(state): State<AppState>,
    filters: Result<Query<AnalyticsFilters>, QueryRejection>,
) -> Result<Json<ChartData>, AppError> {
    let filters = unwrap_filters(filters)?;
    let chart = AnalyticsService::platform_comparison(&state.db, &state.cache, filters).await?;
    Ok(Json(chart))
}

#[utoipa::path(
    get,
    path = "/api/analytics/top-profiles",
    params(
        ("zone" = Option<String>, Query, description = "Filter by zone"),
        ("party_district" = Option<String>, Query, description = "Filter by party district"),
        ("constituency" = Option<String>, Query, description = "Filter by constituency"),
        ("designation" = Option<String>, Query, description = "Filter by designation")
    ),
    responses(
        (status = 200, description = "Top 15 profiles by total followers", body = ChartData)
    ),
    tag = "Analytics"
)]
pub async fn top_profiles(
    State(state): State<AppState>,
    filters: Result<Query<AnalyticsFilters>, QueryRejection>,
) -> Result<Json<ChartData>, AppError> {
    let filters = unwrap_filters(filters)?;
    let chart = AnalyticsService::top_profiles(&state.db, &state.cache, filters).await?;
    Ok(Json(chart))
}

#[utoipa::path(
    get,
    path = "/api/analytics/active-status",
    params(
        ("zone" = Option<String>, Query, description = "Filter by zone"),
        ("party_district" = Option<String>, Query, description = "Filter by party district"),
        ("constituency" = Option<String>, Query, description = "Filter by constituency"),
        ("designation" = Option<String>, Query, description = "Filter by designation")
    ),
    responses(
        (status = 200, description = "Active profile counts per platform", body = ChartData)
    ),
    tag = "Analytics"
)]
pub async fn active_status(
    State(state): State<AppState>,
    filters: Result<Query<AnalyticsFilters>, QueryRejection>,
) -> Result<Json<ChartData>, AppError> {
    let filters = unwrap_filters(filters)?;
    let chart = AnalyticsService::active_status(&state.db, &state.cache, filters).await?;
    Ok(Json(chart))
}

#[utoipa::path(
    get,
    path = "/api/analytics/verified-status",
    params(
        ("zone" = Option<String>, Query, description = "Filter by zone"),
        ("party_district" = Option<String>, Query, description = "Filter by party district"),
        ("constituency" = Option<String>, Query, description = "Filter by constituency"),
        ("designation" = Option<String>, Query, description = "Filter by designation")
    ),
    responses(
        (status = 200, description = "Verified profile counts per platform", body = ChartData)
    ),
    tag = "Analytics"
)]
pub async fn verified_status(
    State(state): State<AppState>,
    filters: Result<Query<AnalyticsFilters>, QueryRejection>,
) -> Result<Json<ChartData>, AppError> {
    let filters = unwrap_filters(filters)?;
    let chart = AnalyticsService::verified_status(&state.db, &state.cache, filters).await?;
    Ok(Json(chart))
}

#[utoipa::path(
    get,
    path = "/api/analytics/zone-followers",
    params(
        ("zone" = Option<String>, Query, description = "Filter by zone"),
        ("party_district" = Option<String>, Query, description = "Filter by party district"),
        ("constituency" = Option<String>, Query, description = "Filter by constituency"),
        ("designation" = Option<String>, Query, description = "Filter by designation")
    ),
    responses(
        (status = 200, description = "Total followers for the largest zones", body = ChartData)
    ),
    tag = "Analytics"
)]
pub async fn zone_followers(
    State(state): State<AppState>,
    filters: Result<Query<AnalyticsFilters>, QueryRejection>,
) -> Result<Json<ChartData>, AppError> {
    let filters = unwrap_filters(filters)?;
    let chart = AnalyticsService::zone_followers(&state.db, &state.cache, filters).await?;
    Ok(Json(chart))
}

#[utoipa::path(
    get,
    path = "/api/analytics/designation-count",
    params(
        ("zone" = Option<String>, Query, description = "Filter by zone"),
        ("party_district" = Option<String>, Query, description = "Filter by party district"),
        ("constituency" = Option<String>, Query, description = "Filter by constituency"),
        ("designation" = Option<String>, Query, description = "Filter by designation")
    ),
    responses(
        (status = 200, description = "Profile counts for the largest designations", body = ChartData)
    ),
    tag = "Analytics"
)]
pub async fn designation_count(
    State(state): State<AppState>,
    filters: Result<Query<AnalyticsFilters>, QueryRejection>,
) -> Result<Json<ChartData>, AppError> {
    let filters = unwrap_filters(filters)?;
    let chart = AnalyticsService::designation_count(&state.db, &state.cache, filters).await?;
    Ok(Json(chart))
}
