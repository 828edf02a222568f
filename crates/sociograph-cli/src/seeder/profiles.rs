//! Profile seeding functionality.
//!
//! Provides functions for generating and inserting fake social profile
//! data into the database.

use chrono::NaiveDate;
use fake::Fake;
use fake::faker::address::en::{BuildingNumber, CityName, StreetName};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use rand::Rng;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use super::models::ProfileSeed;

const ZONES: [&str; 5] = ["North", "South", "East", "West", "Central"];

const DESIGNATIONS: [&str; 8] = [
    "MLA",
    "MP",
    "Mayor",
    "Councillor",
    "Corporator",
    "Sarpanch",
    "Minister",
    "Party Worker",
];

/// Generates profile data in parallel using Rayon
pub fn generate_profiles(count: usize) -> Vec<ProfileSeed> {
    (0..count)
        .into_par_iter()
        .map(|i| {
            let mut rng = rand::thread_rng();

            let name: String = Name().fake();
            let city: String = CityName().fake();
            let street: String = StreetName().fake();
            let building: String = BuildingNumber().fake();
            let handle = format!(
                "{}{}",
                name.to_lowercase().replace(' ', "."),
                rng.gen_range(1..10_000)
            );

            let dob = NaiveDate::from_ymd_opt(
                rng.gen_range(1950..=2000),
                rng.gen_range(1..=12),
                rng.gen_range(1..=28),
            );

            ProfileSeed {
                name,
                zone: Some(ZONES[i % ZONES.len()].to_string()),
                party_district: Some(format!("{} District", city)),
                constituency: Some(city.clone()),
                designation: Some(DESIGNATIONS[rng.gen_range(0..DESIGNATIONS.len())].to_string()),
                whatsapp_number: Some(format!("+91{}", rng.gen_range(7_000_000_000u64..10_000_000_000u64))),
                dob,
                address: Some(format!("{} {}, {}", building, street, city)),
                email_id: Some(SafeEmail().fake()),
                facebook_id: platform_handle(&mut rng, &handle, "fb"),
                facebook_followers: platform_followers(&mut rng),
                facebook_active_status: platform_flag(&mut rng, 0.7),
                facebook_verified_status: platform_flag(&mut rng, 0.2),
                twitter_id: platform_handle(&mut rng, &handle, "tw"),
                twitter_followers: platform_followers(&mut rng),
                twitter_active_status: platform_flag(&mut rng, 0.6),
                twitter_verified_status: platform_flag(&mut rng, 0.25),
                instagram_id: platform_handle(&mut rng, &handle, "ig"),
                instagram_followers: platform_followers(&mut rng),
                instagram_active_status: platform_flag(&mut rng, 0.65),
                instagram_verified_status: platform_flag(&mut rng, 0.15),
            }
        })
        .collect()
}

/// Roughly one profile in ten has no presence on a given platform.
fn platform_handle(rng: &mut impl Rng, handle: &str, suffix: &str) -> Option<String> {
    if rng.gen_bool(0.9) {
        Some(format!("{handle}.{suffix}"))
    } else {
        None
    }
}

fn platform_followers(rng: &mut impl Rng) -> Option<i64> {
    if rng.gen_bool(0.85) {
        Some(rng.gen_range(0..2_000_000))
    } else {
        None
    }
}

fn platform_flag(rng: &mut impl Rng, probability: f64) -> Option<bool> {
    if rng.gen_bool(0.9) {
        Some(rng.gen_bool(probability))
    } else {
        None
    }
}

/// Seeds profiles into the database
pub async fn seed_profiles(
    db: &PgPool,
    count: usize,
) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("👥 Seeding {} profiles...", count);

    let profiles = generate_profiles(count);
    let inserted = insert_profiles_batch(db, &profiles).await?;

    println!(
        "   ✓ Inserted {} profiles in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}

/// Inserts profiles in batches using multi-value INSERT statements
pub async fn insert_profiles_batch(
    db: &PgPool,
    profiles: &[ProfileSeed],
) -> Result<u64, Box<dyn std::error::Error>> {
    let mut tx = db.begin().await?;

    const BATCH_SIZE: usize = 500;
    let mut inserted = 0;

    for chunk in profiles.chunks(BATCH_SIZE) {
        inserted += insert_profiles_chunk(&mut tx, chunk).await?;
    }

    tx.commit().await?;
    Ok(inserted)
}

const INSERT_COLUMNS: usize = 21;

async fn insert_profiles_chunk(
    tx: &mut Transaction<'_, Postgres>,
    profiles: &[ProfileSeed],
) -> Result<u64, Box<dyn std::error::Error>> {
    if profiles.is_empty() {
        return Ok(0);
    }

    let mut query = String::from(
        "INSERT INTO social_profiles (\
            name, zone, party_district, constituency, designation, whatsapp_number, \
            dob, address, email_id, \
            facebook_id, facebook_followers, facebook_active_status, facebook_verified_status, \
            twitter_id, twitter_followers, twitter_active_status, twitter_verified_status, \
            instagram_id, instagram_followers, instagram_active_status, instagram_verified_status\
         ) VALUES ",
    );

    for i in 0..profiles.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let base = i * INSERT_COLUMNS;
        query.push('(');
        for j in 0..INSERT_COLUMNS {
            if j > 0 {
                query.push_str(", ");
            }
            query.push_str(&format!("${}", base + j + 1));
        }
        query.push(')');
    }

    let mut sql = sqlx::query(&query);
    for profile in profiles {
        sql = sql
            .bind(&profile.name)
            .bind(&profile.zone)
            .bind(&profile.party_district)
            .bind(&profile.constituency)
            .bind(&profile.designation)
            .bind(&profile.whatsapp_number)
            .bind(profile.dob)
            .bind(&profile.address)
            .bind(&profile.email_id)
            .bind(&profile.facebook_id)
            .bind(profile.facebook_followers)
            .bind(profile.facebook_active_status)
            .bind(profile.facebook_verified_status)
            .bind(&profile.twitter_id)
            .bind(profile.twitter_followers)
            .bind(profile.twitter_active_status)
            .bind(profile.twitter_verified_status)
            .bind(&profile.instagram_id)
            .bind(profile.instagram_followers)
            .bind(profile.instagram_active_status)
            .bind(profile.instagram_verified_status);
    }

    let result = sql.execute(&mut **tx).await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_profiles_count() {
        let profiles = generate_profiles(25);
        assert_eq!(profiles.len(), 25);
    }

    #[test]
    fn test_generated_profiles_have_names_and_zones() {
        let profiles = generate_profiles(10);
        for profile in &profiles {
            assert!(!profile.name.is_empty());
            assert!(ZONES.contains(&profile.zone.as_deref().unwrap()));
        }
    }

    #[test]
    fn test_generated_followers_are_non_negative() {
        for profile in generate_profiles(50) {
            for followers in [
                profile.facebook_followers,
                profile.twitter_followers,
                profile.instagram_followers,
            ]
            .into_iter()
            .flatten()
            {
                assert!(followers >= 0);
            }
        }
    }
}
