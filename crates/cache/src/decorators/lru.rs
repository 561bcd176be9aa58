//! Bounded LRU eviction decorator

use crate::key::CacheKey;
use crate::traits::Cache;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use silt_core::{CacheValue, Result};
use std::collections::BTreeMap;

/// Default LRU capacity
pub const DEFAULT_LRU_CAPACITY: usize = 1024;

/// Access-ordered key index
///
/// A monotonic sequence number stands in for recency: touching a key assigns
/// it the next sequence, and the entry with the smallest sequence is the
/// least recently used. The sorted side of the index makes oldest-first
/// eviction a `pop_first`.
#[derive(Debug, Default)]
struct LruIndex {
    next_seq: u64,
    by_seq: BTreeMap<u64, CacheKey>,
    by_key: FxHashMap<CacheKey, u64>,
}

impl LruIndex {
    fn touch(&mut self, key: &CacheKey) {
        if let Some(seq) = self.by_key.get(key).copied() {
            self.by_seq.remove(&seq);
            let seq = self.bump();
            self.by_seq.insert(seq, key.clone());
            self.by_key.insert(key.clone(), seq);
        }
    }

    fn insert(&mut self, key: CacheKey) {
        if self.by_key.contains_key(&key) {
            self.touch(&key);
            return;
        }
        let seq = self.bump();
        self.by_seq.insert(seq, key.clone());
        self.by_key.insert(key, seq);
    }

    fn evict_oldest(&mut self) -> Option<CacheKey> {
        let (_, key) = self.by_seq.pop_first()?;
        self.by_key.remove(&key);
        Some(key)
    }

    fn bump(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    fn len(&self) -> usize {
        self.by_key.len()
    }

    fn clear(&mut self) {
        self.by_seq.clear();
        self.by_key.clear();
    }
}

/// Evicts the least recently used entry once capacity is exceeded
///
/// Both `get` and `put` reorder the touched key to most-recently-used, so
/// pure reads affect eviction order. When an insertion pushes the index past
/// capacity, the single least-recently-used key is evicted from the index and
/// the wrapped cache.
pub struct LruCache {
    inner: Box<dyn Cache>,
    capacity: usize,
    index: Mutex<LruIndex>,
}

impl LruCache {
    /// Wrap a cache with the default capacity
    pub fn new(inner: Box<dyn Cache>) -> Self {
        Self::with_capacity(inner, DEFAULT_LRU_CAPACITY)
    }

    /// Wrap a cache with an explicit capacity
    pub fn with_capacity(inner: Box<dyn Cache>, capacity: usize) -> Self {
        LruCache {
            inner,
            capacity,
            index: Mutex::new(LruIndex::default()),
        }
    }

    /// Configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Cache for LruCache {
    fn id(&self) -> &str {
        self.inner.id()
    }

    fn get(&self, key: &CacheKey) -> Result<Option<CacheValue>> {
        self.index.lock().touch(key);
        self.inner.get(key)
    }

    fn put(&self, key: CacheKey, value: CacheValue) -> Result<()> {
        let evicted = {
            let mut index = self.index.lock();
            index.insert(key.clone());
            if index.len() > self.capacity {
                index.evict_oldest()
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
        self.index.lock().clear();
        self.inner.clear()
    }

    fn len(&self) -> Result<usize> {
        self.inner.len()
    }
}
