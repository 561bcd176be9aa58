//! Hit-ratio instrumentation decorator

use crate::key::CacheKey;
use crate::traits::Cache;
use silt_core::{CacheValue, Result};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Counts requests and hits, exposing the running hit ratio
///
/// Every `get` counts as a request; every non-absent result counts as a hit.
/// A stored [`CacheValue::Null`] is a hit: the lookup found an entry. Returned
/// values are never altered.
pub struct StatsCache {
    inner: Box<dyn Cache>,
    requests: AtomicU64,
    hits: AtomicU64,
}

impl StatsCache {
    /// Wrap a cache with hit-ratio counters
    pub fn new(inner: Box<dyn Cache>) -> Self {
        StatsCache {
            inner,
            requests: AtomicU64::new(0),
            hits: AtomicU64::new(0),
        }
    }

    /// Total `get` calls observed
    pub fn requests(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    /// Total non-absent results observed
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Running ratio of hits to requests (0.0 when nothing was requested yet)
    pub fn hit_ratio(&self) -> f64 {
        let requests = self.requests();
        if requests == 0 {
            0.0
        } else {
            self.hits() as f64 / requests as f64
        }
    }
}

impl Cache for StatsCache {
    fn id(&self) -> &str {
        self.inner.id()
    }

    fn get(&self, key: &CacheKey) -> Result<Option<CacheValue>> {
        self.requests.fetch_add(1, Ordering::Relaxed);
        let found = self.inner.get(key)?;
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        debug!(
            target: "silt::cache",
            namespace = self.inner.id(),
            requests = self.requests(),
            hits = self.hits(),
            ratio = self.hit_ratio(),
            "cache hit ratio"
        );
        Ok(found)
    }

    fn put(&self, key: CacheKey, value: CacheValue) -> Result<()> {
        self.inner.put(key, value)
    }

    fn remove(&self, key: &CacheKey) -> Result<Option<CacheValue>> {
        self.inner.remove(key)
    }

    fn clear(&self) -> Result<()> {
        self.inner.clear()
    }

    fn len(&self) -> Result<usize> {
        self.inner.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;

    fn test_key(tag: i64) -> CacheKey {
        let mut key = CacheKey::new();
        key.update(CacheValue::Int(tag));
        key
    }

    fn stats() -> StatsCache {
        StatsCache::new(Box::new(Store::new("stats-test").unwrap()))
    }

    #[test]
    fn test_hit_ratio_counts() {
        let cache = stats();
        cache.put(test_key(1), CacheValue::Int(1)).unwrap();

        cache.get(&test_key(1)).unwrap();
        cache.get(&test_key(2)).unwrap();
        cache.get(&test_key(1)).unwrap();
        cache.get(&test_key(3)).unwrap();

        assert_eq!(cache.requests(), 4);
        assert_eq!(cache.hits(), 2);
        assert!((cache.hit_ratio() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_ratio_is_zero() {
        assert_eq!(stats().hit_ratio(), 0.0);
    }

    #[test]
    fn test_stored_null_counts_as_hit() {
        let cache = stats();
        cache.put(test_key(1), CacheValue::Null).unwrap();
        cache.get(&test_key(1)).unwrap();
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn test_values_pass_through_unaltered() {
        let cache = stats();
        cache
            .put(test_key(1), CacheValue::Str("payload".into()))
            .unwrap();
        assert_eq!(
            cache.get(&test_key(1)).unwrap(),
            Some(CacheValue::Str("payload".into()))
        );
    }

    #[test]
    fn test_put_and_remove_are_not_requests() {
        let cache = stats();
        cache.put(test_key(1), CacheValue::Int(1)).unwrap();
        cache.remove(&test_key(1)).unwrap();
        assert_eq!(cache.requests(), 0);
    }
}
