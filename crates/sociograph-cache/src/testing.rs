//! Test fakes: an in-memory backend plus failing and call-counting
//! connectors, injected through [`CacheStore::with_connector`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::ops::Cache;
use crate::store::{CacheBackend, CacheError, CacheStore, Connector, SharedBackend};

/// HashMap-backed store. TTLs are recorded but never enforced; tests that
/// care about expiry assert on the recorded value instead of sleeping.
#[derive(Default)]
pub(crate) struct MemoryBackend {
    entries: Mutex<HashMap<String, (String, u64)>>,
}

impl MemoryBackend {
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), 0));
    }

    pub fn ttl_of(&self, key: &str) -> Option<u64> {
        self.entries.lock().unwrap().get(key).map(|(_, ttl)| *ttl)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(key)
            .map(|(value, _)| value.clone()))
    }

    async fn set_ex(&self, key: &str, value: String, ttl_secs: u64) -> Result<(), CacheError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value, ttl_secs));
        Ok(())
    }

    async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>, CacheError> {
        let prefix = pattern.strip_suffix('*').unwrap_or(pattern);
        Ok(self
            .entries
            .lock()
            .unwrap()
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn del(&self, keys: Vec<String>) -> Result<u64, CacheError> {
        let mut entries = self.entries.lock().unwrap();
        Ok(keys
            .iter()
            .filter(|key| entries.remove(*key).is_some())
            .count() as u64)
    }

    async fn close(&self) -> Result<(), CacheError> {
        Ok(())
    }
}

/// Counts connect attempts, failing the first `fail_first` of them. The
/// failure/success schedule plus the counter is everything the cooldown
/// tests need.
pub(crate) struct CountingConnector {
    attempts: Arc<AtomicUsize>,
    fail_first: usize,
    backend: Arc<MemoryBackend>,
}

impl CountingConnector {
    pub fn healthy() -> Self {
        Self::failing_first(0)
    }

    pub fn always_failing() -> Self {
        Self::failing_first(usize::MAX)
    }

    pub fn failing_first(fail_first: usize) -> Self {
        Self {
            attempts: Arc::new(AtomicUsize::new(0)),
            fail_first,
            backend: Arc::new(MemoryBackend::default()),
        }
    }

    pub fn attempts(&self) -> impl Fn() -> usize {
        let attempts = self.attempts.clone();
        move || attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for CountingConnector {
    async fn connect(&self) -> Result<SharedBackend, CacheError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if attempt < self.fail_first {
            return Err(CacheError::Backend("connection refused".into()));
        }
        Ok(self.backend.clone())
    }
}

/// A cache over a shared in-memory backend. Returns the backend too so
/// tests can inspect stored entries directly.
pub(crate) fn memory_cache(key_prefix: &str) -> (Cache, Arc<MemoryBackend>) {
    let backend = Arc::new(MemoryBackend::default());
    let connector = MemoryConnector {
        backend: backend.clone(),
    };
    let store = CacheStore::with_connector(Box::new(connector), Duration::from_secs(10));
    (Cache::with_store(Arc::new(store), key_prefix), backend)
}

/// A cache whose every connect attempt fails.
pub(crate) fn failing_cache() -> Cache {
    let store = CacheStore::with_connector(
        Box::new(CountingConnector::always_failing()),
        Duration::from_secs(10),
    );
    Cache::with_store(Arc::new(store), "")
}

struct MemoryConnector {
    backend: Arc<MemoryBackend>,
}

#[async_trait]
impl Connector for MemoryConnector {
    async fn connect(&self) -> Result<SharedBackend, CacheError> {
        Ok(self.backend.clone())
    }
}
