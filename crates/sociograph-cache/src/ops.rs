//! Cache operations: get, set, delete-by-prefix.
//!
//! [`Cache`] is the boundary where store failures stop propagating. The
//! internal `try_*` methods return typed [`CacheError`]s; the public
//! methods collapse every failure mode into the degraded result the
//! contract documents — a read failure is a miss, a write failure is a
//! no-op, an invalidation failure deleted zero keys. No caller may assume
//! the cache is up, and none can observe that it is down except by timing.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use crate::config::CacheConfig;
use crate::keys::DELIMITER;
use crate::store::{CacheError, CacheStore};

/// Cheap-to-clone handle to the cache layer, held in application state.
///
/// All keys are transparently namespaced under the configured key prefix so
/// several applications can share one Redis without collisions.
#[derive(Clone, Debug)]
pub struct Cache {
    store: Arc<CacheStore>,
    key_prefix: String,
}

impl Cache {
    /// Creates a cache backed by Redis per the given configuration. The
    /// connection itself is established lazily on first use.
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_store(
            Arc::new(CacheStore::connect_lazy(config)),
            config.key_prefix.clone(),
        )
    }

    /// Creates a cache over an explicit store. Tests use this to inject
    /// fake backends; an empty prefix disables key prefixing.
    pub fn with_store(store: Arc<CacheStore>, key_prefix: impl Into<String>) -> Self {
        Self {
            store,
            key_prefix: key_prefix.into(),
        }
    }

    /// Gets a cached value by key.
    ///
    /// Returns `None` if the key doesn't exist, the store is unavailable,
    /// or the stored payload doesn't deserialize as `T`.
    pub async fn get<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        match self.try_get(key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => {
                    debug!(cache.key = %key, "cache hit");
                    Some(value)
                }
                Err(e) => {
                    // Corrupt or foreign payload; the next successful set
                    // overwrites it, or it expires on its own TTL.
                    warn!(cache.key = %key, error = %e, "failed to deserialize cached value");
                    None
                }
            },
            Ok(None) => {
                debug!(cache.key = %key, "cache miss");
                None
            }
            Err(CacheError::Unavailable) => {
                debug!(cache.key = %key, "cache unavailable; treating as miss");
                None
            }
            Err(e) => {
                error!(cache.key = %key, error = %e, "cache GET failed");
                None
            }
        }
    }

    /// Writes a value with the given TTL. Best effort: failures are logged
    /// and otherwise silent.
    pub async fn set<T>(&self, key: &str, value: &T, ttl: Duration)
    where
        T: Serialize,
    {
        match self.try_set(key, value, ttl).await {
            Ok(()) => {
                debug!(cache.key = %key, cache.ttl_secs = ttl.as_secs(), "cache set");
            }
            Err(CacheError::Unavailable) => {
                debug!(cache.key = %key, "cache unavailable; write skipped");
            }
            Err(e) => {
                error!(cache.key = %key, error = %e, "cache SET failed");
            }
        }
    }

    /// Deletes every key under `prefix` + delimiter, returning the number
    /// deleted. Safe with zero matches; returns `0` on any failure.
    pub async fn delete_by_prefix(&self, prefix: &str) -> u64 {
        match self.try_delete_by_prefix(prefix).await {
            Ok(deleted) => {
                debug!(cache.prefix = %prefix, cache.deleted = deleted, "prefix invalidation complete");
                deleted
            }
            Err(CacheError::Unavailable) => {
                // Stale entries will expire on their own TTL.
                debug!(cache.prefix = %prefix, "cache unavailable; invalidation skipped");
                0
            }
            Err(e) => {
                error!(cache.prefix = %prefix, error = %e, "prefix invalidation failed");
                0
            }
        }
    }

    /// Releases the underlying store. Called once at process shutdown;
    /// never fails.
    pub async fn shutdown(&self) {
        self.store.release().await;
    }

    async fn try_get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let backend = self.store.acquire().await?;
        backend.get(&self.full_key(key)).await
    }

    async fn try_set<T>(&self, key: &str, value: &T, ttl: Duration) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let json = serde_json::to_string(value)?;
        let backend = self.store.acquire().await?;
        backend.set_ex(&self.full_key(key), json, ttl.as_secs()).await
    }

    async fn try_delete_by_prefix(&self, prefix: &str) -> Result<u64, CacheError> {
        let backend = self.store.acquire().await?;
        let pattern = format!("{}{}*", self.full_key(prefix), DELIMITER);
        let keys = backend.scan_keys(&pattern).await?;
        if keys.is_empty() {
            return Ok(0);
        }
        backend.del(keys).await
    }

    fn full_key(&self, key: &str) -> String {
        if self.key_prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}{}{}", self.key_prefix, DELIMITER, key)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{failing_cache, memory_cache};

    #[tokio::test]
    async fn set_then_get_roundtrips() {
        let (cache, _backend) = memory_cache("");

        cache
            .set("stats:abc", &vec![1i64, 2, 3], Duration::from_secs(300))
            .await;

        let hit: Option<Vec<i64>> = cache.get("stats:abc").await;
        assert_eq!(hit, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn set_records_the_requested_ttl() {
        let (cache, backend) = memory_cache("");
        cache.set("options:k", &"v", Duration::from_secs(600)).await;
        assert_eq!(backend.ttl_of("options:k"), Some(600));
    }

    #[tokio::test]
    async fn delete_by_prefix_scopes_to_the_namespace() {
        let (cache, _backend) = memory_cache("");
        let ttl = Duration::from_secs(300);

        cache.set("stats:aaa", &1i64, ttl).await;
        cache.set("stats:bbb", &2i64, ttl).await;
        cache.set("analytics:ccc", &3i64, ttl).await;

        assert_eq!(cache.delete_by_prefix("stats").await, 2);

        assert_eq!(cache.get::<i64>("stats:aaa").await, None);
        assert_eq!(cache.get::<i64>("stats:bbb").await, None);
        assert_eq!(cache.get::<i64>("analytics:ccc").await, Some(3));
    }

    #[tokio::test]
    async fn delete_by_prefix_with_no_matches_returns_zero() {
        let (cache, _backend) = memory_cache("");
        assert_eq!(cache.delete_by_prefix("stats").await, 0);
    }

    #[tokio::test]
    async fn key_prefix_is_transparent_to_callers() {
        let (cache, backend) = memory_cache("testapp");
        let ttl = Duration::from_secs(60);

        cache.set("stats:aaa", &1i64, ttl).await;

        // Stored under the prefixed key, readable through the facade.
        assert!(backend.contains("testapp:stats:aaa"));
        assert_eq!(cache.get::<i64>("stats:aaa").await, Some(1));
        assert_eq!(cache.delete_by_prefix("stats").await, 1);
    }

    #[tokio::test]
    async fn every_operation_degrades_when_the_store_is_down() {
        let cache = failing_cache();
        let ttl = Duration::from_secs(300);

        // Repeated sequences of all three operations: never a panic or an
        // error, always the documented degraded result.
        for _ in 0..3 {
            assert_eq!(cache.get::<String>("stats:abc").await, None);
            cache.set("stats:abc", &"value", ttl).await;
            assert_eq!(cache.delete_by_prefix("stats").await, 0);
        }
    }

    #[tokio::test]
    async fn corrupt_payload_reads_as_a_miss() {
        let (cache, backend) = memory_cache("");
        backend.insert_raw("stats:bad", "{not json");

        let hit: Option<Vec<i64>> = cache.get("stats:bad").await;
        assert_eq!(hit, None);
    }
}
