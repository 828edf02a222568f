use sqlx::PgPool;
use tracing::{debug, error, info, instrument};

use sociograph_cache::{Cache, invalidate};
use sociograph_core::AppError;

use super::model::{
    BulkDeleteRequest, CreateProfileDto, ProfileFilters, ProfileListParams, ProfileListResponse,
    SocialProfile, SortBy, UpdateProfileDto,
};

/// Column list shared by every query that maps rows into [`SocialProfile`].
const ALL_COLUMNS: &str = "id, zone, party_district, constituency, designation, name, \
     whatsapp_number, dob, address, email_id, \
     facebook_id, facebook_followers, facebook_active_status, facebook_verified_status, \
     twitter_id, twitter_followers, twitter_active_status, twitter_verified_status, \
     instagram_id, instagram_followers, instagram_active_status, instagram_verified_status, \
     created_at, updated_at";

/// Column order of the CSV export, matching the listing UI.
pub const EXPORT_FIELDS: [&str; 22] = [
    "id",
    "zone",
    "party_district",
    "constituency",
    "designation",
    "name",
    "whatsapp_number",
    "dob",
    "address",
    "email_id",
    "facebook_id",
    "facebook_followers",
    "facebook_active_status",
    "facebook_verified_status",
    "twitter_id",
    "twitter_followers",
    "twitter_active_status",
    "twitter_verified_status",
    "instagram_id",
    "instagram_followers",
    "instagram_active_status",
    "instagram_verified_status",
];

/// Appends `AND ...` fragments for the active filters and collects their
/// bind values. The search term binds once and is referenced by every
/// ILIKE arm; the status filters are pure SQL with no binds.
fn build_filter_clause(filters: &ProfileFilters, params: &mut Vec<String>) -> String {
    let mut clause = String::new();

    if let Some(search) = &filters.search {
        params.push(format!("%{}%", search));
        let n = params.len();
        clause.push_str(&format!(
            " AND (name ILIKE ${n} OR constituency ILIKE ${n} OR designation ILIKE ${n} \
             OR zone ILIKE ${n} OR email_id ILIKE ${n} OR facebook_id ILIKE ${n} \
             OR twitter_id ILIKE ${n} OR instagram_id ILIKE ${n})"
        ));
    }

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

    if filters.active_only {
        clause.push_str(
            " AND (facebook_active_status = TRUE OR twitter_active_status = TRUE \
             OR instagram_active_status = TRUE)",
        );
    }

    if filters.verified_only {
        clause.push_str(
            " AND (facebook_verified_status = TRUE OR twitter_verified_status = TRUE \
             OR instagram_verified_status = TRUE)",
        );
    }

    clause
}

pub struct ProfileService;

impl ProfileService {
    #[instrument(skip(db, params), fields(db.operation = "SELECT", db.table = "social_profiles"))]
    pub async fn list_profiles(
        db: &PgPool,
        params: ProfileListParams,
    ) -> Result<ProfileListResponse, AppError> {
        let limit = params.pagination.limit();
        let cursor = params.pagination.cursor();
        let sort_by = params.sort_by();
        let sort_order = params.sort_order();

        debug!(
            limit = %limit,
            cursor = %cursor,
            sort_by = ?sort_by,
            filter.search = ?params.filters.search,
            filter.zone = ?params.filters.zone,
            "Fetching profiles with keyset pagination"
        );

        let mut bind_params = Vec::new();
        let where_clause = build_filter_clause(&params.filters, &mut bind_params);

        let count_query = format!("SELECT COUNT(*) FROM social_profiles WHERE 1=1{where_clause}");
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &bind_params {
            count_sql = count_sql.bind(param);
        }
        let total = count_sql.fetch_one(db).await.map_err(|e| {
            error!(error = %e, "Database error counting profiles");
            AppError::from(e)
        })?;

        let mut data_query =
            format!("SELECT {ALL_COLUMNS} FROM social_profiles WHERE 1=1{where_clause}");

        // Keyset cursor. Sorting by id gets the plain `id > last_id` form;
        // any other column needs that column's value at the cursor row, so
        // the row is looked up first. NULL at the cursor position degrades
        // to an unfiltered page, same as a vanished cursor row.
        let mut cursor_num: Option<i64> = None;
        let mut cursor_text: Option<String> = None;
        if cursor > 0 {
            if sort_by == SortBy::Id {
                cursor_num = Some(cursor);
                data_query.push_str(&format!(
                    " AND id {} ${}",
                    sort_order.cursor_op(),
                    bind_params.len() + 1
                ));
            } else {
                let cursor_val_query = format!(
                    "SELECT {} FROM social_profiles WHERE id = $1",
                    sort_by.column()
                );
                if sort_by.is_numeric() {
                    cursor_num = sqlx::query_scalar::<_, Option<i64>>(&cursor_val_query)
                        .bind(cursor)
                        .fetch_optional(db)
                        .await
                        .map_err(|e| {
                            error!(error = %e, "Database error resolving cursor row");
                            AppError::from(e)
                        })?
                        .flatten();
                    if cursor_num.is_some() {
                        data_query.push_str(&format!(
                            " AND {} {} ${}",
                            sort_by.column(),
                            sort_order.cursor_op(),
                            bind_params.len() + 1
                        ));
                    }
                } else {
                    cursor_text = sqlx::query_scalar::<_, Option<String>>(&cursor_val_query)
                        .bind(cursor)
                        .fetch_optional(db)
                        .await
                        .map_err(|e| {
                            error!(error = %e, "Database error resolving cursor row");
                            AppError::from(e)
                        })?
                        .flatten();
                    if cursor_text.is_some() {
                        data_query.push_str(&format!(
                            " AND {} {} ${}",
                            sort_by.column(),
                            sort_order.cursor_op(),
                            bind_params.len() + 1
                        ));
                    }
                }
            }
        }

        // Fetch one extra row to learn whether another page exists.
        data_query.push_str(&format!(
            " ORDER BY {} {}, id ASC LIMIT {}",
            sort_by.column(),
            sort_order.sql(),
            limit + 1
        ));

        let mut data_sql = sqlx::query_as::<_, SocialProfile>(&data_query);
        for param in &bind_params {
            data_sql = data_sql.bind(param);
        }
        if let Some(value) = cursor_num {
            data_sql = data_sql.bind(value);
        }
        if let Some(value) = &cursor_text {
            data_sql = data_sql.bind(value);
        }
        let mut rows = data_sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Database error fetching profiles");
            AppError::from(e)
        })?;

        let has_more = rows.len() as i64 > limit;
        rows.truncate(limit as usize);
        let next_cursor = if has_more {
            rows.last().map(|row| i64::from(row.id))
        } else {
            None
        };

        debug!(
            total = %total,
            returned = %rows.len(),
            has_more = %has_more,
            "Profiles fetched successfully"
        );

        Ok(ProfileListResponse {
            rows,
            total,
            next_cursor,
        })
    }

    #[instrument(skip(db), fields(profile.id = %profile_id, db.operation = "SELECT", db.table = "social_profiles"))]
    pub async fn get_profile(db: &PgPool, profile_id: i32) -> Result<SocialProfile, AppError> {
        debug!("Fetching profile by ID");

        let query = format!("SELECT {ALL_COLUMNS} FROM social_profiles WHERE id = $1");
        sqlx::query_as::<_, SocialProfile>(&query)
            .bind(profile_id)
            .fetch_optional(db)
            .await
            .map_err(|e| {
                error!(profile.id = %profile_id, error = %e, "Database error fetching profile");
                AppError::from(e)
            })?
            .ok_or_else(|| {
                debug!(profile.id = %profile_id, "Profile not found");
                AppError::not_found(anyhow::anyhow!("Profile not found"))
            })
    }

    #[instrument(skip(db, cache, dto), fields(profile.name = %dto.name, db.operation = "INSERT", db.table = "social_profiles"))]
    pub async fn create_profile(
        db: &PgPool,
        cache: &Cache,
        dto: CreateProfileDto,
    ) -> Result<SocialProfile, AppError> {
        debug!(profile.name = %dto.name, "Creating new profile");

        let query = format!(
            "INSERT INTO social_profiles (\
                name, zone, party_district, constituency, designation, whatsapp_number, \
                dob, address, email_id, \
                facebook_id, facebook_followers, facebook_active_status, facebook_verified_status, \
                twitter_id, twitter_followers, twitter_active_status, twitter_verified_status, \
                instagram_id, instagram_followers, instagram_active_status, instagram_verified_status\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
                $17, $18, $19, $20, $21) \
             RETURNING {ALL_COLUMNS}"
        );

        let profile = sqlx::query_as::<_, SocialProfile>(&query)
            .bind(&dto.name)
            .bind(&dto.zone)
            .bind(&dto.party_district)
            .bind(&dto.constituency)
            .bind(&dto.designation)
            .bind(&dto.whatsapp_number)
            .bind(dto.dob)
            .bind(&dto.address)
            .bind(&dto.email_id)
            .bind(&dto.facebook_id)
            .bind(dto.facebook_followers)
            .bind(dto.facebook_active_status)
            .bind(dto.facebook_verified_status)
            .bind(&dto.twitter_id)
            .bind(dto.twitter_followers)
            .bind(dto.twitter_active_status)
            .bind(dto.twitter_verified_status)
            .bind(&dto.instagram_id)
            .bind(dto.instagram_followers)
            .bind(dto.instagram_active_status)
            .bind(dto.instagram_verified_status)
            .fetch_one(db)
            .await
            .map_err(|e| {
                error!(error = %e, profile.name = %dto.name, "Database error creating profile");
                AppError::from(e)
            })?;

        // New rows affect every aggregate and can add new filter values.
        invalidate::profile_created(cache).await;

        info!(
            profile.id = %profile.id,
            profile.name = %dto.name,
            "Profile created successfully"
        );

        Ok(profile)
    }

    #[instrument(skip(db, cache, dto), fields(profile.id = %profile_id, db.operation = "UPDATE", db.table = "social_profiles"))]
    pub async fn update_profile(
        db: &PgPool,
        cache: &Cache,
        profile_id: i32,
        dto: UpdateProfileDto,
    ) -> Result<SocialProfile, AppError> {
        if !dto.has_changes() {
            return Err(AppError::unprocessable(anyhow::anyhow!(
                "At least one field must be provided for an update"
            )));
        }

        debug!("Updating profile");

        let query = format!(
            "UPDATE social_profiles SET \
                name = COALESCE($2, name), \
                zone = COALESCE($3, zone), \
                party_district = COALESCE($4, party_district), \
                constituency = COALESCE($5, constituency), \
                designation = COALESCE($6, designation), \
                whatsapp_number = COALESCE($7, whatsapp_number), \
                dob = COALESCE($8, dob), \
                address = COALESCE($9, address), \
                email_id = COALESCE($10, email_id), \
                facebook_id = COALESCE($11, facebook_id), \
                facebook_followers = COALESCE($12, facebook_followers), \
                facebook_active_status = COALESCE($13, facebook_active_status), \
                facebook_verified_status = COALESCE($14, facebook_verified_status), \
                twitter_id = COALESCE($15, twitter_id), \
                twitter_followers = COALESCE($16, twitter_followers), \
                twitter_active_status = COALESCE($17, twitter_active_status), \
                twitter_verified_status = COALESCE($18, twitter_verified_status), \
                instagram_id = COALESCE($19, instagram_id), \
                instagram_followers = COALESCE($20, instagram_followers), \
                instagram_active_status = COALESCE($21, instagram_active_status), \
                instagram_verified_status = COALESCE($22, instagram_verified_status), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {ALL_COLUMNS}"
        );

        let profile = sqlx::query_as::<_, SocialProfile>(&query)
            .bind(profile_id)
            .bind(&dto.name)
            .bind(&dto.zone)
            .bind(&dto.party_district)
            .bind(&dto.constituency)
            .bind(&dto.designation)
            .bind(&dto.whatsapp_number)
            .bind(dto.dob)
            .bind(&dto.address)
            .bind(&dto.email_id)
            .bind(&dto.facebook_id)
            .bind(dto.facebook_followers)
            .bind(dto.facebook_active_status)
            .bind(dto.facebook_verified_status)
            .bind(&dto.twitter_id)
            .bind(dto.twitter_followers)
            .bind(dto.twitter_active_status)
            .bind(dto.twitter_verified_status)
            .bind(&dto.instagram_id)
            .bind(dto.instagram_followers)
            .bind(dto.instagram_active_status)
            .bind(dto.instagram_verified_status)
            .fetch_optional(db)
            .await
            .map_err(|e| {
                error!(profile.id = %profile_id, error = %e, "Database error updating profile");
                AppError::from(e)
            })?
            .ok_or_else(|| {
                debug!(profile.id = %profile_id, "Profile not found for update");
                AppError::not_found(anyhow::anyhow!("Profile not found"))
            })?;

        invalidate::profiles_changed(cache).await;

        info!(profile.id = %profile_id, "Profile updated successfully");

        Ok(profile)
    }

    #[instrument(skip(db, cache), fields(profile.id = %profile_id, db.operation = "DELETE", db.table = "social_profiles"))]
    pub async fn delete_profile(
        db: &PgPool,
        cache: &Cache,
        profile_id: i32,
    ) -> Result<(), AppError> {
        debug!("Deleting profile");

        let result = sqlx::query("DELETE FROM social_profiles WHERE id = $1")
            .bind(profile_id)
            .execute(db)
            .await
            .map_err(|e| {
                error!(profile.id = %profile_id, error = %e, "Database error deleting profile");
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            debug!(profile.id = %profile_id, "Profile not found for deletion");
            return Err(AppError::not_found(anyhow::anyhow!("Profile not found")));
        }

        invalidate::profiles_changed(cache).await;

        info!(profile.id = %profile_id, "Profile deleted successfully");

        Ok(())
    }

    #[instrument(skip(db, cache, request), fields(count = request.ids.len(), db.operation = "DELETE", db.table = "social_profiles"))]
    pub async fn bulk_delete(
        db: &PgPool,
        cache: &Cache,
        request: BulkDeleteRequest,
    ) -> Result<u64, AppError> {
        debug!(count = request.ids.len(), "Bulk deleting profiles");

        let result = sqlx::query("DELETE FROM social_profiles WHERE id = ANY($1)")
            .bind(&request.ids)
            .execute(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error bulk deleting profiles");
                AppError::from(e)
            })?;

        invalidate::profiles_changed(cache).await;

        info!(deleted = result.rows_affected(), "Bulk delete complete");

        Ok(result.rows_affected())
    }

    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "social_profiles"))]
    pub async fn export_csv(db: &PgPool, filters: ProfileFilters) -> Result<Vec<u8>, AppError> {
        debug!("Exporting profiles to CSV");

        let mut bind_params = Vec::new();
        let where_clause = build_filter_clause(&filters, &mut bind_params);

        let query = format!(
            "SELECT {ALL_COLUMNS} FROM social_profiles WHERE 1=1{where_clause} ORDER BY id"
        );
        let mut sql = sqlx::query_as::<_, SocialProfile>(&query);
        for param in &bind_params {
            sql = sql.bind(param);
        }
        let rows = sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Database error exporting profiles");
            AppError::from(e)
        })?;

        let csv = write_csv(&rows).map_err(|e| {
            error!(error = %e, "Failed to build CSV export");
            AppError::internal(anyhow::anyhow!("Failed to build CSV export: {}", e))
        })?;

        info!(rows = rows.len(), bytes = csv.len(), "CSV export complete");

        Ok(csv)
    }
}

/// Renders rows as CSV, prefixed with a UTF-8 BOM so Excel detects the
/// encoding.
pub fn write_csv(rows: &[SocialProfile]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());

    writer.write_record(EXPORT_FIELDS)?;

    for row in rows {
        writer.write_record(&[
            row.id.to_string(),
            text(&row.zone),
            text(&row.party_district),
            text(&row.constituency),
            text(&row.designation),
            text(&row.name),
            text(&row.whatsapp_number),
            row.dob.map(|d| d.to_string()).unwrap_or_default(),
            text(&row.address),
            text(&row.email_id),
            text(&row.facebook_id),
            number(row.facebook_followers),
            flag(row.facebook_active_status),
            flag(row.facebook_verified_status),
            text(&row.twitter_id),
            number(row.twitter_followers),
            flag(row.twitter_active_status),
            flag(row.twitter_verified_status),
            text(&row.instagram_id),
            number(row.instagram_followers),
            flag(row.instagram_active_status),
            flag(row.instagram_verified_status),
        ])?;
    }

    let body = writer
        .into_inner()
        .map_err(|e| csv::Error::from(std::io::Error::other(e.to_string())))?;

    let mut out = Vec::with_capacity(body.len() + 3);
    out.extend_from_slice(b"\xEF\xBB\xBF");
    out.extend_from_slice(&body);
    Ok(out)
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn number(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn flag(value: Option<bool>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> SocialProfile {
        SocialProfile {
            id: 1,
            zone: Some("North".into()),
            party_district: None,
            constituency: Some("Riverside, East".into()),
            designation: Some("Mayor".into()),
            name: Some("Asha Rao".into()),
            whatsapp_number: None,
            dob: None,
            address: None,
            email_id: Some("asha@example.com".into()),
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
            instagram_active_status: Some(false),
            instagram_verified_status: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_filter_clause_empty_filters() {
        let mut params = Vec::new();
        let clause = build_filter_clause(&ProfileFilters::default(), &mut params);
        assert!(clause.is_empty());
        assert!(params.is_empty());
    }

    #[test]
    fn test_filter_clause_search_binds_once() {
        let filters = ProfileFilters {
            search: Some("rao".into()),
            ..Default::default()
        };
        let mut params = Vec::new();
        let clause = build_filter_clause(&filters, &mut params);

        assert_eq!(params, vec!["%rao%".to_string()]);
        // All eight ILIKE arms reference the single bind.
        assert_eq!(clause.matches("$1").count(), 8);
    }

    #[test]
    fn test_filter_clause_numbers_binds_sequentially() {
        let filters = ProfileFilters {
            search: Some("rao".into()),
            zone: Some("North".into()),
            designation: Some("Mayor".into()),
            ..Default::default()
        };
        let mut params = Vec::new();
        let clause = build_filter_clause(&filters, &mut params);

        assert_eq!(params.len(), 3);
        assert!(clause.contains("zone = $2"));
        assert!(clause.contains("designation = $3"));
    }

    #[test]
    fn test_filter_clause_status_filters_add_no_binds() {
        let filters = ProfileFilters {
            active_only: true,
            verified_only: true,
            ..Default::default()
        };
        let mut params = Vec::new();
        let clause = build_filter_clause(&filters, &mut params);

        assert!(params.is_empty());
        assert!(clause.contains("facebook_active_status = TRUE"));
        assert!(clause.contains("instagram_verified_status = TRUE"));
    }

    #[test]
    fn test_write_csv_header_and_bom() {
        let csv = write_csv(&[]).unwrap();
        assert!(csv.starts_with(b"\xEF\xBB\xBF"));

        let body = String::from_utf8(csv[3..].to_vec()).unwrap();
        let header = body.lines().next().unwrap();
        assert_eq!(header.split(',').count(), EXPORT_FIELDS.len());
        assert!(header.starts_with("id,zone,party_district"));
    }

    #[test]
    fn test_write_csv_quotes_embedded_commas() {
        let csv = write_csv(&[sample_row()]).unwrap();
        let body = String::from_utf8(csv[3..].to_vec()).unwrap();
        let row = body.lines().nth(1).unwrap();

        assert!(row.contains("\"Riverside, East\""));
        assert!(row.contains("Asha Rao"));
        assert!(row.contains("1200"));
        assert!(row.contains("true"));
        assert!(row.contains("false"));
    }
}
