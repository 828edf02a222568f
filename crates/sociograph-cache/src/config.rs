//! Cache configuration.
//!
//! This module provides configuration for the Redis connection and the
//! degradation behavior, loaded from environment variables.

use std::env;
use std::time::Duration;

/// Cache configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `REDIS_URL`: Redis connection URL (default: `redis://127.0.0.1:6379`)
/// - `CACHE_CONNECT_TIMEOUT_MS`: connect timeout in milliseconds (default: `2000`)
/// - `CACHE_RESPONSE_TIMEOUT_MS`: per-command timeout in milliseconds (default: `2000`)
/// - `CACHE_COOLDOWN_SECONDS`: reconnect back-off after a failed connect (default: `10`)
/// - `CACHE_TTL_SECONDS`: default TTL for cached items in seconds (default: `300`)
/// - `CACHE_PREFIX`: prefix for all cache keys (default: `sociograph`)
///
/// The timeouts are deliberately short: the cache is a best-effort
/// accelerator and must stay well under a request's latency budget.
#[derive(Clone, Debug)]
pub struct CacheConfig {
    /// Redis connection URL.
    pub redis_url: String,

    /// Timeout for establishing a connection.
    pub connect_timeout_ms: u64,

    /// Timeout for individual commands once connected.
    pub response_timeout_ms: u64,

    /// After a failed connect, how long acquires fast-fail without retrying.
    pub cooldown_seconds: u64,

    /// Default time-to-live for cached items in seconds.
    pub default_ttl_seconds: u64,

    /// Prefix for all cache keys to avoid collisions with other Redis users.
    pub key_prefix: String,
}

impl CacheConfig {
    /// Load configuration from environment variables, falling back to the
    /// documented defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        Self {
            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".into()),
            connect_timeout_ms: env_u64("CACHE_CONNECT_TIMEOUT_MS", 2000),
            response_timeout_ms: env_u64("CACHE_RESPONSE_TIMEOUT_MS", 2000),
            cooldown_seconds: env_u64("CACHE_COOLDOWN_SECONDS", 10),
            default_ttl_seconds: env_u64("CACHE_TTL_SECONDS", 300),
            key_prefix: env::var("CACHE_PREFIX").unwrap_or_else(|_| "sociograph".into()),
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn response_timeout(&self) -> Duration {
        Duration::from_millis(self.response_timeout_ms)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_seconds)
    }

    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_seconds)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://127.0.0.1:6379".into(),
            connect_timeout_ms: 2000,
            response_timeout_ms: 2000,
            cooldown_seconds: 10,
            default_ttl_seconds: 300,
            key_prefix: "sociograph".into(),
        }
    }
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeouts_are_short() {
        let config = CacheConfig::default();
        assert!(config.connect_timeout() <= Duration::from_secs(3));
        assert!(config.response_timeout() <= Duration::from_secs(3));
    }

    #[test]
    fn default_cooldown_is_ten_seconds() {
        assert_eq!(CacheConfig::default().cooldown(), Duration::from_secs(10));
    }
}
