//! Bounded FIFO eviction decorator

use crate::key::CacheKey;
use crate::traits::Cache;
use parking_lot::Mutex;
use silt_core::{CacheValue, Result};
use std::collections::VecDeque;

/// Default FIFO capacity
pub const DEFAULT_FIFO_CAPACITY: usize = 1024;

/// Evicts entries in insertion order once capacity is exceeded
///
/// Keeps a queue of keys in `put` order. When a `put` pushes the queue past
/// capacity, the oldest key is popped and removed from the wrapped cache.
/// Reads do not affect eviction order.
pub struct FifoCache {
    inner: Box<dyn Cache>,
    capacity: usize,
    queue: Mutex<VecDeque<CacheKey>>,
}

impl FifoCache {
    /// Wrap a cache with the default capacity
    pub fn new(inner: Box<dyn Cache>) -> Self {
        Self::with_capacity(inner, DEFAULT_FIFO_CAPACITY)
    }

    /// Wrap a cache with an explicit capacity
    pub fn with_capacity(inner: Box<dyn Cache>, capacity: usize) -> Self {
        FifoCache {
            inner,
            capacity,
            queue: Mutex::new(VecDeque::with_capacity(capacity.min(1024))),
        }
    }

    /// Configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Cache for FifoCache {
    fn id(&self) -> &str {
        self.inner.id()
    }

    fn get(&self, key: &CacheKey) -> Result<Option<CacheValue>> {
        self.inner.get(key)
    }

    fn put(&self, key: CacheKey, value: CacheValue) -> Result<()> {
        let evicted = {
            let mut queue = self.queue.lock();
            queue.push_back(key.clone());
            if queue.len() > self.capacity {
                queue.pop_front()
            } else {
                None
            }
        };
        if let Some(oldest) = evicted {
            self.inner.remove(&oldest)?;
        }
        self.inner.put(key, value)
    }

    fn remove(&self, key: &CacheKey) -> Result<Option<CacheValue>> {
        self.inner.remove(key)
    }

    fn clear(&self) -> Result<()> {
        self.queue.lock().clear();
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

    fn fifo(capacity: usize) -> FifoCache {
        FifoCache::with_capacity(Box::new(Store::new("fifo-test").unwrap()), capacity)
    }

    #[test]
    fn test_oldest_entry_evicted_at_capacity() {
        let cache = fifo(3);
        for tag in 0..4 {
            cache.put(test_key(tag), CacheValue::Int(tag)).unwrap();
        }

        // First-inserted key is gone, the remaining three are present
        assert_eq!(cache.get(&test_key(0)).unwrap(), None);
        for tag in 1..4 {
            assert_eq!(cache.get(&test_key(tag)).unwrap(), Some(CacheValue::Int(tag)));
        }
        assert_eq!(cache.len().unwrap(), 3);
    }

    #[test]
    fn test_reads_do_not_affect_order() {
        let cache = fifo(2);
        cache.put(test_key(1), CacheValue::Int(1)).unwrap();
        cache.put(test_key(2), CacheValue::Int(2)).unwrap();

        // Touching key 1 does not save it from FIFO eviction
        cache.get(&test_key(1)).unwrap();
        cache.put(test_key(3), CacheValue::Int(3)).unwrap();

        assert_eq!(cache.get(&test_key(1)).unwrap(), None);
        assert!(cache.get(&test_key(2)).unwrap().is_some());
        assert!(cache.get(&test_key(3)).unwrap().is_some());
    }

    #[test]
    fn test_clear_also_empties_queue() {
        let cache = fifo(2);
        cache.put(test_key(1), CacheValue::Int(1)).unwrap();
        cache.put(test_key(2), CacheValue::Int(2)).unwrap();
        cache.clear().unwrap();

        // Queue restarted: two more puts fit without evicting each other
        cache.put(test_key(3), CacheValue::Int(3)).unwrap();
        cache.put(test_key(4), CacheValue::Int(4)).unwrap();
        assert!(cache.get(&test_key(3)).unwrap().is_some());
        assert!(cache.get(&test_key(4)).unwrap().is_some());
    }

    #[test]
    fn test_id_forwarded() {
        assert_eq!(fifo(2).id(), "fifo-test");
    }
}
