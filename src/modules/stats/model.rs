//! Aggregate statistics response models.
//!
//! These types round-trip through the cache, so they derive both
//! `Serialize` and `Deserialize`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Per-platform aggregate counters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct PlatformStats {
    /// Profiles marked active on this platform.
    pub active: i64,
    /// Profiles marked verified on this platform.
    pub verified: i64,
    /// Sum of followers across all profiles.
    pub followers: i64,
}

/// A labelled count, used by the grouped breakdowns.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct LabelCount {
    pub label: String,
    pub count: i64,
}

/// Response body of `/api/stats`.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct StatsResponse {
    /// Total number of profiles.
    pub total: i64,
    pub facebook: PlatformStats,
    pub twitter: PlatformStats,
    pub instagram: PlatformStats,
    /// Top designations by profile count (at most 12).
    pub by_designation: Vec<LabelCount>,
    /// Profile count per zone.
    pub by_zone: Vec<LabelCount>,
}
