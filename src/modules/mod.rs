pub mod analytics;
pub mod options;
pub mod profiles;
pub mod stats;

pub use self::profiles::model::SocialProfile;
