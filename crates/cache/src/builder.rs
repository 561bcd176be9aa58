//! Namespace cache assembly
//!
//! [`CacheBuilder`] turns plain construction-time properties into a decorator
//! stack over a [`Store`]. Wrap order, innermost first: store → eviction →
//! scheduled clear → instrumentation → mutual exclusion.

use crate::decorators::{FifoCache, LruCache, ScheduledCache, StatsCache, SynchronizedCache};
use crate::store::Store;
use crate::traits::{Cache, SharedCache};
use silt_core::Result;
use std::sync::Arc;
use std::time::Duration;

/// Which bounded-eviction decorator to apply, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvictionPolicy {
    /// No eviction: the namespace cache grows without bound
    None,
    /// Evict in insertion order
    Fifo,
    /// Evict the least recently used entry
    #[default]
    Lru,
}

/// Assembles a configured namespace cache
///
/// Capacity and interval are plain settable properties; defaults are the
/// decorators' own (capacity 1024, interval one hour). The result is shared
/// as an [`Arc`] so it can be registered and handed to units of work.
#[derive(Debug, Clone)]
pub struct CacheBuilder {
    id: String,
    eviction: EvictionPolicy,
    capacity: Option<usize>,
    clear_interval: Option<Duration>,
    instrumented: bool,
    synchronized: bool,
}

impl CacheBuilder {
    /// Start building a cache for the given namespace
    pub fn new(id: impl Into<String>) -> Self {
        CacheBuilder {
            id: id.into(),
            eviction: EvictionPolicy::default(),
            capacity: None,
            clear_interval: None,
            instrumented: false,
            synchronized: false,
        }
    }

    /// Select the eviction policy
    #[must_use]
    pub fn eviction(mut self, policy: EvictionPolicy) -> Self {
        self.eviction = policy;
        self
    }

    /// Bound the eviction decorator to the given number of entries
    #[must_use]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Clear the whole namespace every `interval`
    #[must_use]
    pub fn clear_interval(mut self, interval: Duration) -> Self {
        self.clear_interval = Some(interval);
        self
    }

    /// Count requests and hits, logging the running ratio
    #[must_use]
    pub fn instrumented(mut self, instrumented: bool) -> Self {
        self.instrumented = instrumented;
        self
    }

    /// Serialize all access behind one exclusive lock
    #[must_use]
    pub fn synchronized(mut self, synchronized: bool) -> Self {
        self.synchronized = synchronized;
        self
    }

    /// Build the decorator stack
    ///
    /// # Errors
    ///
    /// Returns [`silt_core::Error::Config`] when the namespace id is empty.
    pub fn build(self) -> Result<SharedCache> {
        let store = Store::new(self.id)?;
        let mut cache: Box<dyn Cache> = Box::new(store);

        cache = match self.eviction {
            EvictionPolicy::None => cache,
            EvictionPolicy::Fifo => match self.capacity {
                Some(capacity) => Box::new(FifoCache::with_capacity(cache, capacity)),
                None => Box::new(FifoCache::new(cache)),
            },
            EvictionPolicy::Lru => match self.capacity {
                Some(capacity) => Box::new(LruCache::with_capacity(cache, capacity)),
                None => Box::new(LruCache::new(cache)),
            },
        };

        if let Some(interval) = self.clear_interval {
            cache = Box::new(ScheduledCache::with_interval(cache, interval));
        }
        if self.instrumented {
            cache = Box::new(StatsCache::new(cache));
        }
        if self.synchronized {
            cache = Box::new(SynchronizedCache::new(cache));
        }

        Ok(Arc::from(cache))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::CacheKey;
    use silt_core::{CacheValue, Error};

    fn test_key(tag: i64) -> CacheKey {
        let mut key = CacheKey::new();
        key.update(CacheValue::Int(tag));
        key
    }

    #[test]
    fn test_default_build_is_usable() {
        let cache = CacheBuilder::new("users").build().unwrap();
        cache.put(test_key(1), CacheValue::Int(1)).unwrap();
        assert_eq!(cache.get(&test_key(1)).unwrap(), Some(CacheValue::Int(1)));
        assert_eq!(cache.id(), "users");
    }

    #[test]
    fn test_empty_id_fails() {
        let err = CacheBuilder::new("").build().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_fifo_capacity_is_applied() {
        let cache = CacheBuilder::new("users")
            .eviction(EvictionPolicy::Fifo)
            .capacity(2)
            .build()
            .unwrap();

        for tag in 0..3 {
            cache.put(test_key(tag), CacheValue::Int(tag)).unwrap();
        }
        assert_eq!(cache.get(&test_key(0)).unwrap(), None);
        assert!(cache.get(&test_key(2)).unwrap().is_some());
    }

    #[test]
    fn test_lru_capacity_is_applied() {
        let cache = CacheBuilder::new("users")
            .eviction(EvictionPolicy::Lru)
            .capacity(2)
            .build()
            .unwrap();

        cache.put(test_key(1), CacheValue::Int(1)).unwrap();
        cache.put(test_key(2), CacheValue::Int(2)).unwrap();
        cache.get(&test_key(1)).unwrap();
        cache.put(test_key(3), CacheValue::Int(3)).unwrap();

        assert_eq!(cache.get(&test_key(2)).unwrap(), None);
        assert!(cache.get(&test_key(1)).unwrap().is_some());
    }

    #[test]
    fn test_zero_interval_clears_immediately() {
        let cache = CacheBuilder::new("users")
            .eviction(EvictionPolicy::None)
            .clear_interval(Duration::ZERO)
            .build()
            .unwrap();

        cache.put(test_key(1), CacheValue::Int(1)).unwrap();
        assert_eq!(cache.get(&test_key(1)).unwrap(), None);
    }

    #[test]
    fn test_full_stack_composes() {
        let cache = CacheBuilder::new("users")
            .eviction(EvictionPolicy::Lru)
            .capacity(16)
            .clear_interval(Duration::from_secs(3600))
            .instrumented(true)
            .synchronized(true)
            .build()
            .unwrap();

        cache.put(test_key(1), CacheValue::Int(1)).unwrap();
        assert_eq!(cache.get(&test_key(1)).unwrap(), Some(CacheValue::Int(1)));
        assert_eq!(cache.remove(&test_key(1)).unwrap(), Some(CacheValue::Int(1)));
        assert!(cache.is_empty().unwrap());
    }
}
