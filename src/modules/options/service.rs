use std::time::Duration;

use sqlx::PgPool;
use tracing::{debug, error, instrument};

use sociograph_cache::{Cache, KeyParams, ns};
use sociograph_core::AppError;

use super::model::FilterOptionsResponse;

/// Dropdown contents change rarely, so they keep a longer TTL than the
/// aggregate reports.
const OPTIONS_TTL: Duration = Duration::from_secs(600);

pub struct OptionsService;

impl OptionsService {
    /// Distinct values of the four filter columns, memoized under the
    /// `options` namespace.
    #[instrument(skip(db, cache))]
    pub async fn get_filter_options(
        db: &PgPool,
        cache: &Cache,
    ) -> Result<FilterOptionsResponse, AppError> {
        cache
            .get_or_compute(ns::OPTIONS, OPTIONS_TTL, &KeyParams::new(), || async {
                debug!("Computing filter options");
                Ok(FilterOptionsResponse {
                    zones: distinct_values(db, "zone").await?,
                    party_districts: distinct_values(db, "party_district").await?,
                    constituencies: distinct_values(db, "constituency").await?,
                    designations: distinct_values(db, "designation").await?,
                })
            })
            .await
    }
}

/// `column` is always one of the fixed names above, never user input.
async fn distinct_values(db: &PgPool, column: &str) -> Result<Vec<String>, AppError> {
    let query = format!(
        "SELECT DISTINCT {column} FROM social_profiles \
         WHERE {column} IS NOT NULL ORDER BY {column}"
    );
    sqlx::query_scalar::<_, String>(&query)
        .fetch_all(db)
        .await
        .map_err(|e| {
            error!(error = %e, column = %column, "Database error fetching distinct values");
            AppError::from(e)
        })
}
