//! Get-or-compute memoization for read endpoints.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::keys::{KeyParams, derive_key};
use crate::ops::Cache;

impl Cache {
    /// Memoizes an asynchronous computation under a derived key.
    ///
    /// On a hit the cached value is returned and `compute` is never
    /// invoked. On a miss, `compute` runs exactly once, its result is
    /// written through with the given TTL (best effort), and the freshly
    /// computed value is returned either way.
    ///
    /// Errors from `compute` belong to the caller and propagate unchanged;
    /// nothing is cached for a failed computation. Two concurrent misses on
    /// the same key may both compute — writes are idempotent overwrites, so
    /// this costs duplicated work, not correctness.
    pub async fn get_or_compute<T, E, F, Fut>(
        &self,
        namespace: &str,
        ttl: Duration,
        params: &KeyParams,
        compute: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let key = derive_key(namespace, params);

        if let Some(hit) = self.get::<T>(&key).await {
            return Ok(hit);
        }

        let value = compute().await?;
        self.set(&key, &value, ttl).await;
        Ok(value)
    }
}
