//! Keyset (cursor) pagination parameters.
//!
//! Listing endpoints page by primary key instead of offset: the client
//! passes the last `id` of the previous page as `cursor` (0 or absent for
//! the first page) and receives `next_cursor` back when more rows exist.
//! Unlike offset pagination this stays O(page) as the client walks a large
//! table, and rows inserted mid-walk cannot shift the window.
//!
//! # Example
//!
//! ```ignore
//! // GET /api/profiles?cursor=150&limit=50
//! let params = CursorParams {
//!     cursor: Some(150),
//!     limit: Some(50),
//! };
//!
//! assert_eq!(params.cursor(), 150);
//! assert_eq!(params.limit(), 50);
//! ```

use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;

/// Deserializes an optional string into an optional i64.
///
/// Handles the case where query parameters may be empty strings,
/// which should be treated as `None`.
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Query parameters for keyset pagination.
///
/// # Limits
///
/// - `limit` is clamped to the range [1, 200], default 50
/// - `cursor` is clamped to a minimum of 0 (0 = first page)
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CursorParams {
    /// Last `id` from the previous page; 0 or absent for the first page.
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub cursor: Option<i64>,
    /// Maximum number of rows to return (1-200, default: 50).
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
}

impl Default for CursorParams {
    fn default() -> Self {
        Self {
            cursor: Some(0),
            limit: Some(50),
        }
    }
}

impl CursorParams {
    /// Returns the effective cursor, clamped to a minimum of 0.
    #[must_use]
    pub fn cursor(&self) -> i64 {
        self.cursor.unwrap_or(0).max(0)
    }

    /// Returns the effective limit, clamped to [1, 200]. Defaults to 50.
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(50).clamp(1, 200)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_params_defaults() {
        let params = CursorParams {
            cursor: None,
            limit: None,
        };
        assert_eq!(params.cursor(), 0);
        assert_eq!(params.limit(), 50);
    }

    #[test]
    fn test_cursor_params_custom_values() {
        let params = CursorParams {
            cursor: Some(150),
            limit: Some(25),
        };
        assert_eq!(params.cursor(), 150);
        assert_eq!(params.limit(), 25);
    }

    #[test]
    fn test_limit_boundary_cases() {
        let test_cases = vec![
            (Some(1), 1),
            (Some(200), 200),
            (Some(201), 200),
            (Some(0), 1),
            (Some(-1), 1),
        ];

        for (input, expected) in test_cases {
            let params = CursorParams {
                cursor: Some(0),
                limit: input,
            };
            assert_eq!(params.limit(), expected);
        }
    }

    #[test]
    fn test_negative_cursor_clamps_to_zero() {
        let params = CursorParams {
            cursor: Some(-10),
            limit: Some(50),
        };
        assert_eq!(params.cursor(), 0);
    }

    #[test]
    fn test_deserialize_empty_strings() {
        let json = r#"{"cursor":"","limit":""}"#;
        let params: CursorParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.cursor(), 0);
        assert_eq!(params.limit(), 50);
    }

    #[test]
    fn test_deserialize_with_values() {
        let json = r#"{"cursor":"42","limit":"100"}"#;
        let params: CursorParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.cursor(), 42);
        assert_eq!(params.limit(), 100);
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let json = r#"{}"#;
        let params: CursorParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.cursor(), 0);
        assert_eq!(params.limit(), 50);
    }
}
