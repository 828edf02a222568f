use std::env;

/// Allowed CORS origins for the dashboard frontend.
///
/// # Environment Variables
///
/// - `ALLOWED_ORIGINS`: comma-separated origin list
///   (default: `http://localhost:3000,http://localhost:5173`)
#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        let raw = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string());

        Self {
            allowed_origins: raw
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect(),
        }
    }
}
