//! Redis-backed connector and protocol implementation.
//!
//! The backend clones its inner [`ConnectionManager`] per call, which is the
//! supported cheap way to share one multiplexed connection across tasks.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager, aio::ConnectionManagerConfig};

use crate::config::CacheConfig;
use crate::store::{CacheBackend, CacheError, Connector, SharedBackend};

/// Connects to Redis with short, fixed timeouts.
///
/// The overall connect attempt is additionally bounded by `connect_timeout`
/// so a blackholed address cannot stall the first request past the budget.
pub struct RedisConnector {
    url: String,
    connect_timeout: Duration,
    response_timeout: Duration,
}

impl RedisConnector {
    pub fn from_config(config: &CacheConfig) -> Self {
        Self {
            url: config.redis_url.clone(),
            connect_timeout: config.connect_timeout(),
            response_timeout: config.response_timeout(),
        }
    }
}

#[async_trait]
impl Connector for RedisConnector {
    async fn connect(&self) -> Result<SharedBackend, CacheError> {
        let client = Client::open(self.url.as_str())?;
        let config = ConnectionManagerConfig::new()
            .set_connection_timeout(self.connect_timeout)
            .set_response_timeout(self.response_timeout)
            .set_number_of_retries(1);

        let conn = tokio::time::timeout(
            self.connect_timeout,
            ConnectionManager::new_with_config(client, config),
        )
        .await
        .map_err(|_| CacheError::ConnectTimeout(self.connect_timeout))??;

        Ok(Arc::new(RedisBackend { conn }))
    }
}

struct RedisBackend {
    conn: ConnectionManager,
}

#[async_trait]
impl CacheBackend for RedisBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.conn.clone();
        Ok(conn.get::<_, Option<String>>(key).await?)
    }

    async fn set_ex(&self, key: &str, value: String, ttl_secs: u64) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(key, value, ttl_secs).await?;
        Ok(())
    }

    /// Enumerates with SCAN rather than KEYS so a large keyspace cannot
    /// block the server.
    async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>, CacheError> {
        let mut conn = self.conn.clone();
        let mut cursor: u64 = 0;
        let mut found = Vec::new();

        loop {
            let (next_cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(100)
                .query_async(&mut conn)
                .await?;

            found.extend(keys);
            cursor = next_cursor;
            if cursor == 0 {
                break;
            }
        }

        Ok(found)
    }

    async fn del(&self, keys: Vec<String>) -> Result<u64, CacheError> {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut conn = self.conn.clone();
        Ok(conn.del::<_, u64>(&keys).await?)
    }

    async fn close(&self) -> Result<(), CacheError> {
        // ConnectionManager has no explicit close; dropping the last clone
        // tears the connection down.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration test requires a running Redis instance.

    #[tokio::test]
    #[ignore = "requires Redis"]
    async fn set_get_and_prefix_delete_roundtrip() {
        let connector = RedisConnector {
            url: "redis://127.0.0.1:6379".into(),
            connect_timeout: Duration::from_secs(2),
            response_timeout: Duration::from_secs(2),
        };
        let backend = connector.connect().await.unwrap();

        backend
            .set_ex("sociograph-test:stats:aaa", "1".into(), 60)
            .await
            .unwrap();
        backend
            .set_ex("sociograph-test:stats:bbb", "2".into(), 60)
            .await
            .unwrap();

        let hit = backend.get("sociograph-test:stats:aaa").await.unwrap();
        assert_eq!(hit.as_deref(), Some("1"));

        let keys = backend.scan_keys("sociograph-test:stats:*").await.unwrap();
        assert_eq!(keys.len(), 2);

        let deleted = backend.del(keys).await.unwrap();
        assert_eq!(deleted, 2);
    }
}
