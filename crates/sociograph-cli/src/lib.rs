//! # Sociograph CLI
//!
//! Database seeding utilities for Sociograph testing and development.
//!
//! This library crate provides the seeding functionality used by the CLI binary.
//!
//! ## Usage
//!
//! ```ignore
//! use sociograph_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(1000); // 1000 profiles
//! seed_all(&pool, config).await?;
//! ```

pub mod seeder;
