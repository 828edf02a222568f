use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use sociograph_core::AppError;

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    BulkDeleteRequest, BulkDeleteResponse, CreateProfileDto, MessageResponse, ProfileFilters,
    ProfileListParams, ProfileListResponse, SocialProfile, UpdateProfileDto,
};
use super::service::ProfileService;

#[utoipa::path(
    get,
    path = "/api/profiles",
    params(
        ("cursor" = Option<i64>, Query, description = "Last id from the previous page; 0 for the first page"),
        ("limit" = Option<i64>, Query, description = "Rows per page (1-200, default 50)"),
        ("search" = Option<String>, Query, description = "Case-insensitive partial match across name, location and platform IDs"),
        ("zone" = Option<String>, Query, description = "Filter by zone (exact match)"),
        ("party_district" = Option<String>, Query, description = "Filter by party district (exact match)"),
        ("constituency" = Option<String>, Query, description = "Filter by constituency (exact match)"),
        ("designation" = Option<String>, Query, description = "Filter by designation (exact match)"),
        ("active_only" = Option<bool>, Query, description = "Keep only profiles active on at least one platform"),
        ("verified_only" = Option<bool>, Query, description = "Keep only profiles verified on at least one platform"),
        ("sort_by" = Option<String>, Query, description = "Sort column (unknown values fall back to id)"),
        ("sort_order" = Option<String>, Query, description = "asc (default) or desc")
    ),
    responses(
        (status = 200, description = "Keyset-paginated list of profiles", body = ProfileListResponse)
    ),
    tag = "Profiles"
)]
pub async fn list_profiles(
    State(state): State<AppState>,
    params: Result<Query<ProfileListParams>, QueryRejection>,
) -> Result<Json<ProfileListResponse>, AppError> {
    let Query(params) = params
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid query parameters: {}", e)))?;

    let profiles = ProfileService::list_profiles(&state.db, params).await?;
    Ok(Json(profiles))
}

#[utoipa::path(
    get,
    path = "/api/profiles/{id}",
    params(
        ("id" = i32, Path, description = "Profile ID")
    ),
    responses(
        (status = 200, description = "Profile details", body = SocialProfile),
        (status = 404, description = "Profile not found")
    ),
    tag = "Profiles"
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SocialProfile>, AppError> {
    let profile = ProfileService::get_profile(&state.db, id).await?;
    Ok(Json(profile))
}

#[utoipa::path(
    post,
    path = "/api/profiles",
    request_body = CreateProfileDto,
    responses(
        (status = 201, description = "Profile created successfully", body = SocialProfile),
        (status = 422, description = "Validation failed")
    ),
    tag = "Profiles"
)]
pub async fn create_profile(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateProfileDto>,
) -> Result<(StatusCode, Json<SocialProfile>), AppError> {
    let profile = ProfileService::create_profile(&state.db, &state.cache, dto).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

#[utoipa::path(
    put,
    path = "/api/profiles/{id}",
    params(
        ("id" = i32, Path, description = "Profile ID")
    ),
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated successfully", body = SocialProfile),
        (status = 404, description = "Profile not found"),
        (status = 422, description = "Validation failed or empty patch")
    ),
    tag = "Profiles"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateProfileDto>,
) -> Result<Json<SocialProfile>, AppError> {
    let profile = ProfileService::update_profile(&state.db, &state.cache, id, dto).await?;
    Ok(Json(profile))
}

#[utoipa::path(
    delete,
    path = "/api/profiles/{id}",
    params(
        ("id" = i32, Path, description = "Profile ID")
    ),
    responses(
        (status = 200, description = "Profile deleted successfully", body = MessageResponse),
        (status = 404, description = "Profile not found")
    ),
    tag = "Profiles"
)]
pub async fn delete_profile(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    ProfileService::delete_profile(&state.db, &state.cache, id).await?;
    Ok(Json(MessageResponse {
        message: "Deleted".to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/profiles/bulk-delete",
    request_body = BulkDeleteRequest,
    responses(
        (status = 200, description = "Profiles deleted", body = BulkDeleteResponse),
        (status = 422, description = "Validation failed")
    ),
    tag = "Profiles"
)]
pub async fn bulk_delete(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<BulkDeleteRequest>,
) -> Result<Json<BulkDeleteResponse>, AppError> {
    let deleted = ProfileService::bulk_delete(&state.db, &state.cache, request).await?;
    Ok(Json(BulkDeleteResponse { deleted }))
}

#[utoipa::path(
    get,
    path = "/api/export/csv",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive partial match"),
        ("zone" = Option<String>, Query, description = "Filter by zone"),
        ("party_district" = Option<String>, Query, description = "Filter by party district"),
        ("constituency" = Option<String>, Query, description = "Filter by constituency"),
        ("designation" = Option<String>, Query, description = "Filter by designation"),
        ("active_only" = Option<bool>, Query, description = "Keep only active profiles"),
        ("verified_only" = Option<bool>, Query, description = "Keep only verified profiles")
    ),
    responses(
        (status = 200, description = "CSV attachment of the filtered profiles")
    ),
    tag = "Profiles"
)]
pub async fn export_csv(
    State(state): State<AppState>,
    filters: Result<Query<ProfileFilters>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(filters) = filters
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid query parameters: {}", e)))?;

    let csv = ProfileService::export_csv(&state.db, filters).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"export.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}
