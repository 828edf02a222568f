//! Database seeding orchestration.

use sqlx::PgPool;
use std::time::Instant;

mod models;
mod profiles;

pub use models::{ProfileSeed, SeedConfig};
pub use profiles::{generate_profiles, seed_profiles};

/// Seeds the database per the given configuration.
pub async fn seed_all(db: &PgPool, config: SeedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🌱 Seeding database...");

    let inserted = seed_profiles(db, config.num_profiles).await?;

    println!(
        "🏁 Seeding complete: {} profiles in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(())
}
