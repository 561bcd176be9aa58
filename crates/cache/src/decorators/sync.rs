//! Mutual-exclusion decorator

use crate::key::CacheKey;
use crate::traits::Cache;
use parking_lot::Mutex;
use silt_core::{CacheValue, Result};

/// Serializes every accessor behind one exclusive lock
///
/// Exists for wrapped chains whose traversal must be atomic under concurrent
/// units of work (for example an eviction index update plus the delegated
/// read, or a backend that is not inherently safe under concurrent access).
/// Reads and writes are equally serialized; there is no separate read lock.
/// The guard is scoped to the single call and releases on every path,
/// including unwinding.
pub struct SynchronizedCache {
    inner: Box<dyn Cache>,
    lock: Mutex<()>,
}

impl SynchronizedCache {
    /// Wrap a cache behind an exclusive lock
    pub fn new(inner: Box<dyn Cache>) -> Self {
        SynchronizedCache {
            inner,
            lock: Mutex::new(()),
        }
    }
}

impl Cache for SynchronizedCache {
    fn id(&self) -> &str {
        self.inner.id()
    }

    fn get(&self, key: &CacheKey) -> Result<Option<CacheValue>> {
        let _guard = self.lock.lock();
        self.inner.get(key)
    }

    fn put(&self, key: CacheKey, value: CacheValue) -> Result<()> {
        let _guard = self.lock.lock();
        self.inner.put(key, value)
    }

    fn remove(&self, key: &CacheKey) -> Result<Option<CacheValue>> {
        let _guard = self.lock.lock();
        self.inner.remove(key)
    }

    fn clear(&self) -> Result<()> {
        let _guard = self.lock.lock();
        self.inner.clear()
    }

    fn len(&self) -> Result<usize> {
        let _guard = self.lock.lock();
        self.inner.len()
    }
}
