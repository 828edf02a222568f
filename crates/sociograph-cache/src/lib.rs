//! # Sociograph Cache
//!
//! Best-effort Redis response cache for the Sociograph API.
//!
//! This crate provides:
//! - A lazily-connected store handle with a failure cooldown window
//! - Cache operations (get, set, delete by prefix) that degrade to
//!   miss/no-op when Redis is unreachable
//! - Deterministic cache key derivation from request parameters
//! - A get-or-compute memoization wrapper for read endpoints
//!
//! The cache is strictly an accelerator: every operation is total, and a
//! Redis outage costs latency, never availability. Handlers that memoize
//! through [`Cache::get_or_compute`] behave identically (minus speed)
//! whether the store is healthy, flapping, or permanently down.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use sociograph_cache::{Cache, CacheConfig, KeyParams, ns};
//!
//! #[tokio::main]
//! async fn main() {
//!     let cache = Cache::new(&CacheConfig::from_env());
//!
//!     let params = KeyParams::new().with("zone", "north");
//!     let report: Result<Vec<i64>, anyhow::Error> = cache
//!         .get_or_compute(ns::STATS, Duration::from_secs(300), &params, || async {
//!             // expensive aggregation query
//!             Ok(vec![1, 2, 3])
//!         })
//!         .await;
//!
//!     // After a write, bust everything derived from profile rows:
//!     cache.delete_by_prefix(ns::STATS).await;
//! }
//! ```

pub mod config;
pub mod keys;
mod memo;
pub mod ops;
pub mod redis;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use config::CacheConfig;
pub use keys::{KeyParams, derive_key, invalidate, ns};
pub use ops::Cache;
pub use store::{CacheBackend, CacheError, CacheStore, Connector, SharedBackend};
