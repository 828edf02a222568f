use std::time::Duration;

use sqlx::{FromRow, PgPool};
use tracing::{debug, error, instrument};

use sociograph_cache::{Cache, KeyParams, ns};
use sociograph_core::AppError;

use super::model::{LabelCount, PlatformStats, StatsResponse};

/// Aggregate stats change with every write, so a short TTL keeps the
/// dashboard fresh even if an invalidation is missed.
const STATS_TTL: Duration = Duration::from_secs(300);

/// One row carrying every platform counter. All sums are cast to BIGINT in
/// SQL so the row maps onto plain `i64`s.
#[derive(FromRow)]
struct TotalsRow {
    total: i64,
    fb_active: i64,
    fb_verified: i64,
    fb_followers: i64,
    tw_active: i64,
    tw_verified: i64,
    tw_followers: i64,
    ig_active: i64,
    ig_verified: i64,
    ig_followers: i64,
}

pub struct StatsService;

impl StatsService {
    /// Returns the aggregate stats, memoized under the `stats` namespace.
    #[instrument(skip(db, cache))]
    pub async fn get_stats(db: &PgPool, cache: &Cache) -> Result<StatsResponse, AppError> {
        cache
            .get_or_compute(ns::STATS, STATS_TTL, &KeyParams::new(), || {
                Self::compute_stats(db)
            })
            .await
    }

    /// All platform counters in one round-trip using conditional
    /// aggregation, plus the two grouped breakdowns.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "social_profiles"))]
    async fn compute_stats(db: &PgPool) -> Result<StatsResponse, AppError> {
        debug!("Computing aggregate stats");

        let totals = sqlx::query_as::<_, TotalsRow>(
            "SELECT \
                COUNT(id) AS total, \
                COALESCE(SUM(CASE WHEN facebook_active_status THEN 1 ELSE 0 END), 0)::BIGINT AS fb_active, \
                COALESCE(SUM(CASE WHEN facebook_verified_status THEN 1 ELSE 0 END), 0)::BIGINT AS fb_verified, \
                COALESCE(SUM(COALESCE(facebook_followers, 0)), 0)::BIGINT AS fb_followers, \
                COALESCE(SUM(CASE WHEN twitter_active_status THEN 1 ELSE 0 END), 0)::BIGINT AS tw_active, \
                COALESCE(SUM(CASE WHEN twitter_verified_status THEN 1 ELSE 0 END), 0)::BIGINT AS tw_verified, \
                COALESCE(SUM(COALESCE(twitter_followers, 0)), 0)::BIGINT AS tw_followers, \
                COALESCE(SUM(CASE WHEN instagram_active_status THEN 1 ELSE 0 END), 0)::BIGINT AS ig_active, \
                COALESCE(SUM(CASE WHEN instagram_verified_status THEN 1 ELSE 0 END), 0)::BIGINT AS ig_verified, \
                COALESCE(SUM(COALESCE(instagram_followers, 0)), 0)::BIGINT AS ig_followers \
             FROM social_profiles",
        )
        .fetch_one(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error computing platform totals");
            AppError::from(e)
        })?;

        let by_designation = sqlx::query_as::<_, (Option<String>, i64)>(
            "SELECT designation, COUNT(id) AS cnt FROM social_profiles \
             GROUP BY designation ORDER BY cnt DESC LIMIT 12",
        )
        .fetch_all(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error grouping by designation");
            AppError::from(e)
        })?;

        let by_zone = sqlx::query_as::<_, (Option<String>, i64)>(
            "SELECT zone, COUNT(id) AS cnt FROM social_profiles \
             GROUP BY zone ORDER BY cnt DESC",
        )
        .fetch_all(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error grouping by zone");
            AppError::from(e)
        })?;

        debug!(total = %totals.total, "Aggregate stats computed");

        Ok(StatsResponse {
            total: totals.total,
            facebook: PlatformStats {
                active: totals.fb_active,
                verified: totals.fb_verified,
                followers: totals.fb_followers,
            },
            twitter: PlatformStats {
                active: totals.tw_active,
                verified: totals.tw_verified,
                followers: totals.tw_followers,
            },
            instagram: PlatformStats {
                active: totals.ig_active,
                verified: totals.ig_verified,
                followers: totals.ig_followers,
            },
            by_designation: label_counts(by_designation),
            by_zone: label_counts(by_zone),
        })
    }
}

fn label_counts(rows: Vec<(Option<String>, i64)>) -> Vec<LabelCount> {
    rows.into_iter()
        .map(|(label, count)| LabelCount {
            label: label.unwrap_or_else(|| "Unknown".to_string()),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_counts_substitutes_unknown() {
        let rows = vec![
            (Some("Mayor".to_string()), 4),
            (None, 2),
        ];
        let counts = label_counts(rows);

        assert_eq!(counts[0].label, "Mayor");
        assert_eq!(counts[0].count, 4);
        assert_eq!(counts[1].label, "Unknown");
        assert_eq!(counts[1].count, 2);
    }
}
