//! # Sociograph Config
//!
//! Configuration types for the Sociograph API.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: HTTP server bind configuration
//!
//! # Example
//!
//! ```ignore
//! use sociograph_config::{CorsConfig, ServerConfig};
//!
//! // Load all configs from environment
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use server::ServerConfig;
