//! Cache key derivation, namespaces, and invalidation helpers.
//!
//! Keys have the shape `namespace:digest`, where the digest is a truncated
//! SHA-256 of the canonically-serialized request parameters. Sorting the
//! parameter names before hashing makes derivation independent of argument
//! order, and the fixed-width digest bounds key length no matter how many
//! filters a request carries.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Separator between a namespace and the rest of a key. Prefix-scoped
/// deletion matches `namespace` + this delimiter, so keys in one namespace
/// can never shadow another namespace that happens to share a prefix.
pub const DELIMITER: char = ':';

/// 128 bits of SHA-256, rendered as 32 hex characters.
const DIGEST_BYTES: usize = 16;

/// The request parameters that define a cache entry's identity.
///
/// Backed by a `BTreeMap`, so iteration (and therefore serialization) is
/// always in lexicographic key order regardless of insertion order. Values
/// go through `serde_json`, which renders dates and other non-primitive
/// types as deterministic strings.
#[derive(Debug, Clone, Default)]
pub struct KeyParams(BTreeMap<String, Value>);

impl KeyParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named parameter. `None` values serialize as JSON `null`, so a
    /// request with an absent filter and one with the filter explicitly
    /// unset derive the same key.
    pub fn with(mut self, name: impl Into<String>, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.0.insert(name.into(), value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn canonical(&self) -> String {
        // BTreeMap serializes with sorted keys; this is the canonical form.
        serde_json::to_string(&self.0).unwrap_or_default()
    }
}

/// Derives the cache key for a namespace and parameter set.
///
/// Pure: identical inputs always produce identical output. An empty
/// parameter set is valid and derives the digest of `{}`.
pub fn derive_key(namespace: &str, params: &KeyParams) -> String {
    let digest = Sha256::digest(params.canonical().as_bytes());
    format!(
        "{}{}{}",
        namespace,
        DELIMITER,
        hex::encode(&digest[..DIGEST_BYTES])
    )
}

/// Cache namespaces used by the API. Each is also the unit of invalidation.
pub mod ns {
    /// Aggregate statistics (`/api/stats`).
    pub const STATS: &str = "stats";

    /// All chart reports. Individual reports key under the sub-namespaces
    /// below; write paths invalidate this common prefix.
    pub const ANALYTICS: &str = "analytics";

    /// Filter dropdown values (`/api/filter-options`).
    pub const OPTIONS: &str = "options";

    pub mod analytics {
        pub const PLATFORM: &str = "analytics:platform";
        pub const TOP: &str = "analytics:top";
        pub const ACTIVE: &str = "analytics:active";
        pub const VERIFIED: &str = "analytics:verified";
        pub const ZONE: &str = "analytics:zone";
        pub const DESIGNATION: &str = "analytics:desig";
    }
}

/// Write-path invalidation helpers.
///
/// Invalidation is a manual, enumerated contract: each mutation lists the
/// namespaces whose cached results it could have staled. There is no
/// dependency tracking.
pub mod invalidate {
    use super::ns;
    use crate::ops::Cache;
    use tracing::debug;

    /// After creating a profile. A new row can introduce new distinct
    /// filter values, so the options lists go too.
    pub async fn profile_created(cache: &Cache) {
        bust(cache, &[ns::STATS, ns::ANALYTICS, ns::OPTIONS]).await;
    }

    /// After updating or deleting existing profiles.
    pub async fn profiles_changed(cache: &Cache) {
        bust(cache, &[ns::STATS, ns::ANALYTICS]).await;
    }

    async fn bust(cache: &Cache, namespaces: &[&str]) {
        for namespace in namespaces {
            let deleted = cache.delete_by_prefix(namespace).await;
            debug!(
                cache.namespace = %namespace,
                cache.deleted = deleted,
                "namespace invalidated"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_params_derive_identical_keys() {
        let a = KeyParams::new()
            .with("zone", "north")
            .with("designation", "mayor");
        let b = KeyParams::new()
            .with("designation", "mayor")
            .with("zone", "north");

        // Insertion order must not matter.
        assert_eq!(derive_key("analytics", &a), derive_key("analytics", &b));
    }

    #[test]
    fn differing_values_derive_differing_keys() {
        let north = KeyParams::new().with("zone", "north");
        let south = KeyParams::new().with("zone", "south");

        assert_ne!(
            derive_key("analytics", &north),
            derive_key("analytics", &south)
        );
    }

    #[test]
    fn empty_params_derive_a_stable_key() {
        let key1 = derive_key("stats", &KeyParams::new());
        let key2 = derive_key("stats", &KeyParams::new());
        assert_eq!(key1, key2);
        assert!(key1.starts_with("stats:"));
    }

    #[test]
    fn absent_and_null_filters_are_equivalent() {
        let absent: Option<&str> = None;
        let a = KeyParams::new().with("zone", absent);
        let b = KeyParams::new().with("zone", Value::Null);
        assert_eq!(derive_key("analytics", &a), derive_key("analytics", &b));
    }

    #[test]
    fn key_length_is_bounded_by_namespace_plus_digest() {
        let many = (0..50).fold(KeyParams::new(), |params, i| {
            params.with(format!("filter_{i}"), "x".repeat(200))
        });
        let key = derive_key("options", &many);
        assert_eq!(key.len(), "options".len() + 1 + DIGEST_BYTES * 2);
    }

    #[test]
    fn namespace_prefixes_the_key() {
        let key = derive_key("analytics:top", &KeyParams::new().with("zone", "east"));
        assert!(key.starts_with("analytics:top:"));
    }

    #[test]
    fn param_presence_changes_the_key() {
        let none = KeyParams::new();
        let one = KeyParams::new().with("zone", Value::Null);
        assert_ne!(derive_key("stats", &none), derive_key("stats", &one));
    }
}
