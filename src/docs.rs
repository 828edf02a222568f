use utoipa::OpenApi;

use crate::modules::analytics::model::{ChartColor, ChartData, ChartDataset};
use crate::modules::options::model::FilterOptionsResponse;
use crate::modules::profiles::model::{
    BulkDeleteRequest, BulkDeleteResponse, CreateProfileDto, MessageResponse, ProfileListResponse,
    SocialProfile, UpdateProfileDto,
};
use crate::modules::stats::model::{LabelCount, PlatformStats, StatsResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::profiles::controller::list_profiles,
        crate::modules::profiles::controller::get_profile,
        crate::modules::profiles::controller::create_profile,
        crate::modules::profiles::controller::update_profile,
        crate::modules::profiles::controller::delete_profile,
        crate::modules::profiles::controller::bulk_delete,
        crate::modules::profiles::controller::export_csv,
        crate::modules::stats::controller::get_stats,
        crate::modules::analytics::controller::platform_comparison,
        crate::modules::analytics::controller::top_profiles,
        crate::modules::analytics::controller::active_status,
        crate::modules::analytics::controller::verified_status,
        crate::modules::analytics::controller::zone_followers,
        crate::modules::analytics::controller::designation_count,
        crate::modules::options::controller::get_filter_options,
    ),
    components(schemas(
        SocialProfile,
        CreateProfileDto,
        UpdateProfileDto,
        ProfileListResponse,
        BulkDeleteRequest,
        BulkDeleteResponse,
        MessageResponse,
        StatsResponse,
        PlatformStats,
        LabelCount,
        ChartData,
        ChartDataset,
        ChartColor,
        FilterOptionsResponse,
    )),
    tags(
        (name = "Profiles", description = "Social profile management"),
        (name = "Stats", description = "Aggregate statistics"),
        (name = "Analytics", description = "Chart data for the dashboard"),
        (name = "Options", description = "Filter dropdown values")
    ),
    info(
        title = "Sociograph API",
        description = "Social profiles reporting backend with a best-effort Redis response cache",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
