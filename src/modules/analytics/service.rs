use std::time::Duration;

use sqlx::PgPool;
use tracing::{debug, error, instrument};

use sociograph_cache::{Cache, ns};
use sociograph_core::AppError;

use super::model::{AnalyticsFilters, ChartColor, ChartData};

const ANALYTICS_TTL: Duration = Duration::from_secs(300);

/// Brand colors in the fixed Facebook/Twitter/Instagram order the
/// dashboard expects.
const PLATFORM_COLORS: [&str; 3] = ["#1877F2", "#1DA1F2", "#E1306C"];
const PLATFORM_LABELS: [&str; 3] = ["Facebook", "Twitter", "Instagram"];

fn platform_labels() -> Vec<String> {
    PLATFORM_LABELS.iter().map(|s| s.to_string()).collect()
}

fn platform_colors() -> ChartColor {
    ChartColor::PerBar(PLATFORM_COLORS.iter().map(|s| s.to_string()).collect())
}

/// Appends `AND ...` fragments for the four analytics filters.
fn build_filter_clause(filters: &AnalyticsFilters, params: &mut Vec<String>) -> String {
    let mut clause = String::new();

    if let Some(zone) = &filters.zone {
        params.push(zone.clone());
        clause.push_str(&format!(" AND zone = ${}", params.len()));
    }

    if let Some(party_district) = &filters.party_district {
        params.push(party_district.clone());
        clause.push_str(&format!(" AND party_district = ${}", params.len()));
    }

    if let Some(constituency) = &filters.constituency {
        params.push(constituency.clone());
        clause.push_str(&format!(" AND constituency = ${}", params.len()));
    }

    if let Some(designation) = &filters.designation {
        params.push(designation.clone());
        clause.push_str(&format!(" AND designation = ${}", params.len()));
    }

    clause
}

/// Chart labels get truncated so long names cannot wreck the axis.
fn truncate_label(name: Option<String>) -> String {
    match name {
        None => "Unknown".to_string(),
        Some(name) => {
            if name.chars().count() > 20 {
                let truncated: String = name.chars().take(20).collect();
                format!("{truncated}…")
            } else {
                name
            }
        }
    }
}

pub struct AnalyticsService;

impl AnalyticsService {
    /// Average follower count per platform.
    #[instrument(skip(db, cache, filters))]
    pub async fn platform_comparison(
        db: &PgPool,
        cache: &Cache,
        filters: AnalyticsFilters,
    ) -> Result<ChartData, AppError> {
        cache
            .get_or_compute(
                ns::analytics::PLATFORM,
                ANALYTICS_TTL,
                &filters.key_params(),
                || async {
                    let mut params = Vec::new();
                    let where_clause = build_filter_clause(&filters, &mut params);

                    let query = format!(
                        "SELECT \
                            COALESCE(AVG(facebook_followers), 0)::BIGINT, \
                            COALESCE(AVG(twitter_followers), 0)::BIGINT, \
                            COALESCE(AVG(instagram_followers), 0)::BIGINT \
                         FROM social_profiles WHERE 1=1{where_clause}"
                    );
                    let mut sql = sqlx::query_as::<_, (i64, i64, i64)>(&query);
                    for param in &params {
                        sql = sql.bind(param);
                    }
                    let (fb, tw, ig) = sql.fetch_one(db).await.map_err(|e| {
                        error!(error = %e, "Database error computing platform comparison");
                        AppError::from(e)
                    })?;

                    Ok(ChartData::single_dataset(
                        platform_labels(),
                        "Avg Followers",
                        vec![fb, tw, ig],
                        platform_colors(),
                    ))
                },
            )
            .await
    }

    /// Top 15 profiles by total followers across all platforms.
    #[instrument(skip(db, cache, filters))]
    pub async fn top_profiles(
        db: &PgPool,
        cache: &Cache,
        filters: AnalyticsFilters,
    ) -> Result<ChartData, AppError> {
        cache
            .get_or_compute(
                ns::analytics::TOP,
                ANALYTICS_TTL,
                &filters.key_params(),
                || async {
                    let mut params = Vec::new();
                    let where_clause = build_filter_clause(&filters, &mut params);

                    let query = format!(
                        "SELECT name, \
                            (COALESCE(facebook_followers, 0) + COALESCE(twitter_followers, 0) \
                             + COALESCE(instagram_followers, 0))::BIGINT AS total \
                         FROM social_profiles WHERE 1=1{where_clause} \
                         ORDER BY total DESC LIMIT 15"
                    );
                    let mut sql = sqlx::query_as::<_, (Option<String>, i64)>(&query);
                    for param in &params {
                        sql = sql.bind(param);
                    }
                    let rows = sql.fetch_all(db).await.map_err(|e| {
                        error!(error = %e, "Database error computing top profiles");
                        AppError::from(e)
                    })?;

                    let (labels, data) = rows
                        .into_iter()
                        .map(|(name, total)| (truncate_label(name), total))
                        .unzip();

                    Ok(ChartData::single_dataset(
                        labels,
                        "Total Followers",
                        data,
                        ChartColor::Single("#36A2EB".to_string()),
                    ))
                },
            )
            .await
    }

    /// Count of active profiles per platform.
    #[instrument(skip(db, cache, filters))]
    pub async fn active_status(
        db: &PgPool,
        cache: &Cache,
        filters: AnalyticsFilters,
    ) -> Result<ChartData, AppError> {
        cache
            .get_or_compute(
                ns::analytics::ACTIVE,
                ANALYTICS_TTL,
                &filters.key_params(),
                || {
                    Self::status_distribution(
                        db,
                        filters,
                        "active_status",
                        "Active Profiles",
                    )
                },
            )
            .await
    }

    /// Count of verified profiles per platform.
    #[instrument(skip(db, cache, filters))]
    pub async fn verified_status(
        db: &PgPool,
        cache: &Cache,
        filters: AnalyticsFilters,
    ) -> Result<ChartData, AppError> {
        cache
            .get_or_compute(
                ns::analytics::VERIFIED,
                ANALYTICS_TTL,
                &filters.key_params(),
                || {
                    Self::status_distribution(
                        db,
                        filters,
                        "verified_status",
                        "Verified Profiles",
                    )
                },
            )
            .await
    }

    /// Total followers per zone, largest 12 zones.
    #[instrument(skip(db, cache, filters))]
    pub async fn zone_followers(
        db: &PgPool,
        cache: &Cache,
        filters: AnalyticsFilters,
    ) -> Result<ChartData, AppError> {
        cache
            .get_or_compute(
                ns::analytics::ZONE,
                ANALYTICS_TTL,
                &filters.key_params(),
                || async {
                    let mut params = Vec::new();
                    let where_clause = build_filter_clause(&filters, &mut params);

                    let query = format!(
                        "SELECT zone, \
                            COALESCE(SUM(COALESCE(facebook_followers, 0) \
                                + COALESCE(twitter_followers, 0) \
                                + COALESCE(instagram_followers, 0)), 0)::BIGINT AS total \
                         FROM social_profiles WHERE 1=1{where_clause} \
                         GROUP BY zone ORDER BY total DESC LIMIT 12"
                    );
                    let mut sql = sqlx::query_as::<_, (Option<String>, i64)>(&query);
                    for param in &params {
                        sql = sql.bind(param);
                    }
                    let rows = sql.fetch_all(db).await.map_err(|e| {
                        error!(error = %e, "Database error computing zone followers");
                        AppError::from(e)
                    })?;

                    let (labels, data) = rows
                        .into_iter()
                        .map(|(zone, total)| {
                            (zone.unwrap_or_else(|| "Unknown".to_string()), total)
                        })
                        .unzip();

                    Ok(ChartData::single_dataset(
                        labels,
                        "Total Followers by Zone",
                        data,
                        ChartColor::Single("#FFCE56".to_string()),
                    ))
                },
            )
            .await
    }

    /// Profile count per designation, largest 10.
    #[instrument(skip(db, cache, filters))]
    pub async fn designation_count(
        db: &PgPool,
        cache: &Cache,
        filters: AnalyticsFilters,
    ) -> Result<ChartData, AppError> {
        cache
            .get_or_compute(
                ns::analytics::DESIGNATION,
                ANALYTICS_TTL,
                &filters.key_params(),
                || async {
                    let mut params = Vec::new();
                    let where_clause = build_filter_clause(&filters, &mut params);

                    let query = format!(
                        "SELECT designation, COUNT(id) AS cnt \
                         FROM social_profiles WHERE 1=1{where_clause} \
                         GROUP BY designation ORDER BY cnt DESC LIMIT 10"
                    );
                    let mut sql = sqlx::query_as::<_, (Option<String>, i64)>(&query);
                    for param in &params {
                        sql = sql.bind(param);
                    }
                    let rows = sql.fetch_all(db).await.map_err(|e| {
                        error!(error = %e, "Database error computing designation counts");
                        AppError::from(e)
                    })?;

                    let (labels, data) = rows
                        .into_iter()
                        .map(|(designation, count)| {
                            (designation.unwrap_or_else(|| "Unknown".to_string()), count)
                        })
                        .unzip();

                    Ok(ChartData::single_dataset(
                        labels,
                        "Profiles by Designation",
                        data,
                        ChartColor::Single("#4BC0C0".to_string()),
                    ))
                },
            )
            .await
    }

    /// Shared query for the active/verified distributions; `status_suffix`
    /// selects which flag column family to sum.
    async fn status_distribution(
        db: &PgPool,
        filters: AnalyticsFilters,
        status_suffix: &str,
        dataset_label: &str,
    ) -> Result<ChartData, AppError> {
        debug!(status = %status_suffix, "Computing status distribution");

        let mut params = Vec::new();
        let where_clause = build_filter_clause(&filters, &mut params);

        let query = format!(
            "SELECT \
                COALESCE(SUM(CASE WHEN facebook_{status_suffix} THEN 1 ELSE 0 END), 0)::BIGINT, \
                COALESCE(SUM(CASE WHEN twitter_{status_suffix} THEN 1 ELSE 0 END), 0)::BIGINT, \
                COALESCE(SUM(CASE WHEN instagram_{status_suffix} THEN 1 ELSE 0 END), 0)::BIGINT \
             FROM social_profiles WHERE 1=1{where_clause}"
        );
        let mut sql = sqlx::query_as::<_, (i64, i64, i64)>(&query);
        for param in &params {
            sql = sql.bind(param);
        }
        let (fb, tw, ig) = sql.fetch_one(db).await.map_err(|e| {
            error!(error = %e, status = %status_suffix, "Database error computing status distribution");
            AppError::from(e)
        })?;

        Ok(ChartData::single_dataset(
            platform_labels(),
            dataset_label,
            vec![fb, tw, ig],
            platform_colors(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_label_passes_short_names() {
        assert_eq!(truncate_label(Some("Asha Rao".into())), "Asha Rao");
    }

    #[test]
    fn test_truncate_label_caps_at_twenty_chars() {
        let long = "A Very Long Political Profile Name".to_string();
        let label = truncate_label(Some(long));
        assert_eq!(label.chars().count(), 21); // 20 + ellipsis
        assert!(label.ends_with('…'));
    }

    #[test]
    fn test_truncate_label_is_char_safe() {
        // Multi-byte characters must not be split mid-codepoint.
        let long = "ΑΒΓΔΕΖΗΘΙΚΛΜΝΞΟΠΡΣΤΥΦΧ".to_string();
        let label = truncate_label(Some(long));
        assert!(label.ends_with('…'));
        assert_eq!(label.chars().count(), 21);
    }

    #[test]
    fn test_truncate_label_none_is_unknown() {
        assert_eq!(truncate_label(None), "Unknown");
    }

    #[test]
    fn test_filter_clause_binds_in_order() {
        let filters = AnalyticsFilters {
            zone: Some("North".into()),
            designation: Some("Mayor".into()),
            ..Default::default()
        };
        let mut params = Vec::new();
        let clause = build_filter_clause(&filters, &mut params);

        assert_eq!(params, vec!["North".to_string(), "Mayor".to_string()]);
        assert!(clause.contains("zone = $1"));
        assert!(clause.contains("designation = $2"));
    }
}
