use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use sociograph_cli::seeder::{SeedConfig, seed_all};

#[derive(Parser)]
#[command(name = "sociograph-cli")]
#[command(about = "Sociograph CLI - Administrative tools for Sociograph", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the database with fake social profiles
    Seed {
        /// Number of profiles to create
        #[arg(short = 'p', long, default_value = "500")]
        profiles: usize,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Seed { profiles } => {
            let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(5)
                .connect(&database_url)
                .await
                .expect("Failed to connect to database");

            if let Err(e) = seed_all(&pool, SeedConfig::new(profiles)).await {
                eprintln!("❌ Seeding failed: {}", e);
                std::process::exit(1);
            }
        }
    }
}
