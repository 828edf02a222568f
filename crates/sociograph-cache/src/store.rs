//! Store handle lifecycle: lazy connect, failure cooldown, teardown.
//!
//! [`CacheStore`] owns the process-wide connection to the remote key-value
//! store. The connection is established on first use; a failed attempt is
//! stamped with a timestamp, and further acquires inside the cooldown window
//! fast-fail with [`CacheError::Unavailable`] instead of paying a socket
//! timeout per request.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::config::CacheConfig;
use crate::redis::RedisConnector;

/// Error type for cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The store is down and inside its cooldown window; no I/O was attempted.
    #[error("cache unavailable")]
    Unavailable,

    #[error("cache connect timed out after {0:?}")]
    ConnectTimeout(Duration),

    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend-defined failure (used by non-Redis backends, e.g. test fakes).
    #[error("cache backend error: {0}")]
    Backend(String),
}

/// The six-operation protocol any backing key-value store must speak.
///
/// Methods take `&self`; implementations are expected to multiplex or clone
/// an inner connection per call (the redis `ConnectionManager` is `Clone`).
#[async_trait]
pub trait CacheBackend: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Write `value` under `key` with an expiry of `ttl_secs` seconds.
    async fn set_ex(&self, key: &str, value: String, ttl_secs: u64) -> Result<(), CacheError>;

    /// Enumerate all keys matching a trailing-wildcard pattern (`prefix*`).
    async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>, CacheError>;

    /// Delete the given keys, returning how many existed.
    async fn del(&self, keys: Vec<String>) -> Result<u64, CacheError>;

    async fn close(&self) -> Result<(), CacheError>;
}

pub type SharedBackend = Arc<dyn CacheBackend>;

/// Establishes a [`CacheBackend`]. This is the single connect primitive the
/// cooldown gates, and the seam tests instrument with counting fakes.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self) -> Result<SharedBackend, CacheError>;
}

#[derive(Default)]
struct StoreState {
    backend: Option<SharedBackend>,
    last_failure: Option<Instant>,
}

/// Process-wide handle to the remote store.
///
/// Cheap to share via `Arc`; `acquire` is called per cache operation and
/// returns the live backend without I/O on the hot path. The mutex is held
/// across the (timeout-bounded) connect attempt so concurrent first-callers
/// cannot race two connections into existence.
pub struct CacheStore {
    connector: Box<dyn Connector>,
    cooldown: Duration,
    state: Mutex<StoreState>,
}

impl std::fmt::Debug for CacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore")
            .field("cooldown", &self.cooldown)
            .finish_non_exhaustive()
    }
}

impl CacheStore {
    /// Creates a store backed by Redis. No connection is attempted until the
    /// first [`acquire`](Self::acquire).
    pub fn connect_lazy(config: &CacheConfig) -> Self {
        Self::with_connector(
            Box::new(RedisConnector::from_config(config)),
            config.cooldown(),
        )
    }

    /// Creates a store with an injected connector. Tests use this to swap in
    /// in-memory, failing, or call-counting backends.
    pub fn with_connector(connector: Box<dyn Connector>, cooldown: Duration) -> Self {
        Self {
            connector,
            cooldown,
            state: Mutex::new(StoreState::default()),
        }
    }

    /// Returns the live backend, connecting lazily.
    ///
    /// If the last connect failed within the cooldown window, returns
    /// [`CacheError::Unavailable`] immediately without attempting I/O.
    pub async fn acquire(&self) -> Result<SharedBackend, CacheError> {
        let mut state = self.state.lock().await;

        if let Some(backend) = &state.backend {
            return Ok(backend.clone());
        }

        if let Some(failed_at) = state.last_failure
            && failed_at.elapsed() < self.cooldown
        {
            return Err(CacheError::Unavailable);
        }

        match self.connector.connect().await {
            Ok(backend) => {
                debug!("cache backend connected");
                state.backend = Some(backend.clone());
                state.last_failure = None;
                Ok(backend)
            }
            Err(e) => {
                state.last_failure = Some(Instant::now());
                warn!(
                    error = %e,
                    cooldown_secs = self.cooldown.as_secs(),
                    "cache connect failed; backing off"
                );
                Err(e)
            }
        }
    }

    /// Tears down the backend, if any. Called once at process shutdown.
    ///
    /// Close errors are swallowed: shutdown must never fail because the
    /// cache did. The handle is cleared regardless of the outcome.
    pub async fn release(&self) {
        let mut state = self.state.lock().await;
        if let Some(backend) = state.backend.take()
            && let Err(e) = backend.close().await
        {
            debug!(error = %e, "cache close failed during shutdown");
        }
    }
}
