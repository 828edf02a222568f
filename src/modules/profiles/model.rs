//! Social profile domain models and DTOs.
//!
//! This module contains the profile entity, request/response DTOs, and the
//! filtering/sorting parameters shared by the listing and export endpoints.

use serde::{Deserialize, Serialize};
use sociograph_core::pagination::CursorParams;
use sociograph_core::serde::{deserialize_bool_flag, deserialize_optional_string};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A social profile row.
///
/// One flat record per tracked person, with presence data for the three
/// platforms inlined. Follower counts and status flags are nullable:
/// `None` means unknown, not zero/inactive.
#[derive(Serialize, FromRow, Debug, ToSchema)]
pub struct SocialProfile {
    pub id: i32,
    pub zone: Option<String>,
    pub party_district: Option<String>,
    pub constituency: Option<String>,
    pub designation: Option<String>,
    pub name: Option<String>,
    pub whatsapp_number: Option<String>,
    pub dob: Option<chrono::NaiveDate>,
    pub address: Option<String>,
    pub email_id: Option<String>,

    pub facebook_id: Option<String>,
    pub facebook_followers: Option<i64>,
    pub facebook_active_status: Option<bool>,
    pub facebook_verified_status: Option<bool>,

    pub twitter_id: Option<String>,
    pub twitter_followers: Option<i64>,
    pub twitter_active_status: Option<bool>,
    pub twitter_verified_status: Option<bool>,

    pub instagram_id: Option<String>,
    pub instagram_followers: Option<i64>,
    pub instagram_active_status: Option<bool>,
    pub instagram_verified_status: Option<bool>,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for creating a new profile.
///
/// A profile must have a name; everything else, including all social media
/// IDs, is optional.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateProfileDto {
    #[validate(length(min = 1, max = 500))]
    pub name: String,
    #[validate(length(max = 200))]
    pub zone: Option<String>,
    #[validate(length(max = 200))]
    pub party_district: Option<String>,
    #[validate(length(max = 200))]
    pub constituency: Option<String>,
    #[validate(length(max = 200))]
    pub designation: Option<String>,
    #[validate(length(max = 50))]
    pub whatsapp_number: Option<String>,
    pub dob: Option<chrono::NaiveDate>,
    pub address: Option<String>,
    #[validate(email)]
    pub email_id: Option<String>,

    #[validate(length(max = 500))]
    pub facebook_id: Option<String>,
    #[validate(range(min = 0))]
    pub facebook_followers: Option<i64>,
    pub facebook_active_status: Option<bool>,
    pub facebook_verified_status: Option<bool>,

    #[validate(length(max = 500))]
    pub twitter_id: Option<String>,
    #[validate(range(min = 0))]
    pub twitter_followers: Option<i64>,
    pub twitter_active_status: Option<bool>,
    pub twitter_verified_status: Option<bool>,

    #[validate(length(max = 500))]
    pub instagram_id: Option<String>,
    #[validate(range(min = 0))]
    pub instagram_followers: Option<i64>,
    pub instagram_active_status: Option<bool>,
    pub instagram_verified_status: Option<bool>,
}

/// DTO for updating an existing profile.
///
/// Patch semantics: only provided fields are updated. Absent fields are
/// left untouched (a field cannot be nulled out through this DTO).
#[derive(Deserialize, Debug, Default, ToSchema, Validate)]
pub struct UpdateProfileDto {
    #[validate(length(min = 1, max = 500))]
    pub name: Option<String>,
    #[validate(length(max = 200))]
    pub zone: Option<String>,
    #[validate(length(max = 200))]
    pub party_district: Option<String>,
    #[validate(length(max = 200))]
    pub constituency: Option<String>,
    #[validate(length(max = 200))]
    pub designation: Option<String>,
    #[validate(length(max = 50))]
    pub whatsapp_number: Option<String>,
    pub dob: Option<chrono::NaiveDate>,
    pub address: Option<String>,
    #[validate(email)]
    pub email_id: Option<String>,

    #[validate(length(max = 500))]
    pub facebook_id: Option<String>,
    #[validate(range(min = 0))]
    pub facebook_followers: Option<i64>,
    pub facebook_active_status: Option<bool>,
    pub facebook_verified_status: Option<bool>,

    #[validate(length(max = 500))]
    pub twitter_id: Option<String>,
    #[validate(range(min = 0))]
    pub twitter_followers: Option<i64>,
    pub twitter_active_status: Option<bool>,
    pub twitter_verified_status: Option<bool>,

    #[validate(length(max = 500))]
    pub instagram_id: Option<String>,
    #[validate(range(min = 0))]
    pub instagram_followers: Option<i64>,
    pub instagram_active_status: Option<bool>,
    pub instagram_verified_status: Option<bool>,
}

impl UpdateProfileDto {
    /// Whether the patch carries at least one field.
    pub fn has_changes(&self) -> bool {
        self.name.is_some()
            || self.zone.is_some()
            || self.party_district.is_some()
            || self.constituency.is_some()
            || self.designation.is_some()
            || self.whatsapp_number.is_some()
            || self.dob.is_some()
            || self.address.is_some()
            || self.email_id.is_some()
            || self.facebook_id.is_some()
            || self.facebook_followers.is_some()
            || self.facebook_active_status.is_some()
            || self.facebook_verified_status.is_some()
            || self.twitter_id.is_some()
            || self.twitter_followers.is_some()
            || self.twitter_active_status.is_some()
            || self.twitter_verified_status.is_some()
            || self.instagram_id.is_some()
            || self.instagram_followers.is_some()
            || self.instagram_active_status.is_some()
            || self.instagram_verified_status.is_some()
    }
}

/// Filters shared by the listing and CSV export endpoints.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProfileFilters {
    /// Case-insensitive partial match across name, constituency,
    /// designation, zone, email and all social media IDs.
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub zone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub party_district: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub constituency: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub designation: Option<String>,
    /// Keep only profiles active on at least one platform.
    #[serde(default, deserialize_with = "deserialize_bool_flag")]
    pub active_only: bool,
    /// Keep only profiles verified on at least one platform.
    #[serde(default, deserialize_with = "deserialize_bool_flag")]
    pub verified_only: bool,
}

/// Query parameters for the listing endpoint: filters + sort + cursor.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileListParams {
    #[serde(flatten)]
    pub filters: ProfileFilters,
    #[serde(flatten)]
    pub pagination: CursorParams,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub sort_by: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub sort_order: Option<String>,
}

impl ProfileListParams {
    /// Resolved sort column; unknown names fall back to `id`.
    pub fn sort_by(&self) -> SortBy {
        self.sort_by
            .as_deref()
            .map(SortBy::parse)
            .unwrap_or(SortBy::Id)
    }

    pub fn sort_order(&self) -> SortOrder {
        match self.sort_order.as_deref() {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}

/// Whitelist of sortable columns. Sorting goes through this enum so user
/// input never reaches the ORDER BY clause as raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    Id,
    Name,
    Zone,
    PartyDistrict,
    Constituency,
    Designation,
    FacebookFollowers,
    TwitterFollowers,
    InstagramFollowers,
}

impl SortBy {
    /// Parses a `sort_by` query value; unknown values fall back to `Id`.
    pub fn parse(value: &str) -> Self {
        match value {
            "name" => Self::Name,
            "zone" => Self::Zone,
            "party_district" => Self::PartyDistrict,
            "constituency" => Self::Constituency,
            "designation" => Self::Designation,
            "facebook_followers" => Self::FacebookFollowers,
            "twitter_followers" => Self::TwitterFollowers,
            "instagram_followers" => Self::InstagramFollowers,
            _ => Self::Id,
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Zone => "zone",
            Self::PartyDistrict => "party_district",
            Self::Constituency => "constituency",
            Self::Designation => "designation",
            Self::FacebookFollowers => "facebook_followers",
            Self::TwitterFollowers => "twitter_followers",
            Self::InstagramFollowers => "instagram_followers",
        }
    }

    /// Whether the column holds numbers rather than text. The keyset
    /// fallback for non-id sorts needs to fetch the cursor row's value
    /// with the matching Rust type.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Id | Self::FacebookFollowers | Self::TwitterFollowers | Self::InstagramFollowers
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Comparison operator that moves the keyset cursor in this direction.
    pub fn cursor_op(self) -> &'static str {
        match self {
            Self::Asc => ">",
            Self::Desc => "<",
        }
    }
}

/// Keyset-paginated listing response.
#[derive(Serialize, Debug, ToSchema)]
pub struct ProfileListResponse {
    pub rows: Vec<SocialProfile>,
    /// Total row count under the active filters, ignoring pagination.
    pub total: i64,
    /// Pass back as `cursor` to fetch the next page; `None` means no more
    /// pages.
    pub next_cursor: Option<i64>,
}

/// Bulk delete request body.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct BulkDeleteRequest {
    #[validate(length(min = 1, max = 500))]
    pub ids: Vec<i32>,
}

/// Bulk delete response body.
#[derive(Serialize, Debug, ToSchema)]
pub struct BulkDeleteResponse {
    pub deleted: u64,
}

/// Generic message response.
#[derive(Serialize, Debug, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_by_parse_known_columns() {
        assert_eq!(SortBy::parse("name"), SortBy::Name);
        assert_eq!(SortBy::parse("facebook_followers"), SortBy::FacebookFollowers);
        assert_eq!(SortBy::parse("id"), SortBy::Id);
    }

    #[test]
    fn test_sort_by_parse_unknown_falls_back_to_id() {
        assert_eq!(SortBy::parse("created_at"), SortBy::Id);
        assert_eq!(SortBy::parse("; DROP TABLE social_profiles"), SortBy::Id);
        assert_eq!(SortBy::parse(""), SortBy::Id);
    }

    #[test]
    fn test_sort_order_defaults_to_asc() {
        let params = ProfileListParams::default();
        assert_eq!(params.sort_order(), SortOrder::Asc);

        let params = ProfileListParams {
            sort_order: Some("desc".into()),
            ..Default::default()
        };
        assert_eq!(params.sort_order(), SortOrder::Desc);
    }

    #[test]
    fn test_numeric_columns() {
        assert!(SortBy::Id.is_numeric());
        assert!(SortBy::TwitterFollowers.is_numeric());
        assert!(!SortBy::Zone.is_numeric());
        assert!(!SortBy::Name.is_numeric());
    }

    #[test]
    fn test_create_profile_dto_validation() {
        let valid_dto = CreateProfileDto {
            name: "Asha Rao".to_string(),
            zone: Some("North".to_string()),
            party_district: None,
            constituency: None,
            designation: Some("Mayor".to_string()),
            whatsapp_number: None,
            dob: None,
            address: None,
            email_id: Some("asha.rao@example.com".to_string()),
            facebook_id: None,
            facebook_followers: Some(1200),
            facebook_active_status: Some(true),
            facebook_verified_status: None,
            twitter_id: None,
            twitter_followers: None,
            twitter_active_status: None,
            twitter_verified_status: None,
            instagram_id: None,
            instagram_followers: None,
            instagram_active_status: None,
            instagram_verified_status: None,
        };
        assert!(valid_dto.validate().is_ok());
    }

    #[test]
    fn test_create_profile_dto_empty_name() {
        let dto = CreateProfileDto {
            name: "".to_string(),
            zone: None,
            party_district: None,
            constituency: None,
            designation: None,
            whatsapp_number: None,
            dob: None,
            address: None,
            email_id: None,
            facebook_id: None,
            facebook_followers: None,
            facebook_active_status: None,
            facebook_verified_status: None,
            twitter_id: None,
            twitter_followers: None,
            twitter_active_status: None,
            twitter_verified_status: None,
            instagram_id: None,
            instagram_followers: None,
            instagram_active_status: None,
            instagram_verified_status: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_profile_dto_invalid_email() {
        let dto = CreateProfileDto {
            name: "Asha Rao".to_string(),
            zone: None,
            party_district: None,
            constituency: None,
            designation: None,
            whatsapp_number: None,
            dob: None,
            address: None,
            email_id: Some("not-an-email".to_string()),
            facebook_id: None,
            facebook_followers: None,
            facebook_active_status: None,
            facebook_verified_status: None,
            twitter_id: None,
            twitter_followers: None,
            twitter_active_status: None,
            twitter_verified_status: None,
            instagram_id: None,
            instagram_followers: None,
            instagram_active_status: None,
            instagram_verified_status: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_profile_dto_negative_followers() {
        let dto = CreateProfileDto {
            name: "Asha Rao".to_string(),
            zone: None,
            party_district: None,
            constituency: None,
            designation: None,
            whatsapp_number: None,
            dob: None,
            address: None,
            email_id: None,
            facebook_id: None,
            facebook_followers: Some(-5),
            facebook_active_status: None,
            facebook_verified_status: None,
            twitter_id: None,
            twitter_followers: None,
            twitter_active_status: None,
            twitter_verified_status: None,
            instagram_id: None,
            instagram_followers: None,
            instagram_active_status: None,
            instagram_verified_status: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_update_profile_dto_empty_patch() {
        let dto = UpdateProfileDto::default();
        assert!(!dto.has_changes());
    }

    #[test]
    fn test_update_profile_dto_with_one_field() {
        let dto = UpdateProfileDto {
            zone: Some("South".to_string()),
            ..Default::default()
        };
        assert!(dto.has_changes());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_bulk_delete_request_bounds() {
        let empty = BulkDeleteRequest { ids: vec![] };
        assert!(empty.validate().is_err());

        let ok = BulkDeleteRequest { ids: vec![1, 2, 3] };
        assert!(ok.validate().is_ok());

        let oversized = BulkDeleteRequest {
            ids: (0..501).collect(),
        };
        assert!(oversized.validate().is_err());
    }
}
