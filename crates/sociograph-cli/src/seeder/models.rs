//! Data models for database seeding configuration.

/// Seed data for creating a social profile.
pub struct ProfileSeed {
    pub name: String,
    pub zone: Option<String>,
    pub party_district: Option<String>,
    pub constituency: Option<String>,
    pub designation: Option<String>,
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
}

/// Complete configuration for database seeding.
#[derive(Clone)]
pub struct SeedConfig {
    pub num_profiles: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { num_profiles: 500 }
    }
}

impl SeedConfig {
    /// Creates a new seed configuration with the specified number of profiles.
    pub fn new(num_profiles: usize) -> Self {
        Self { num_profiles }
    }
}
