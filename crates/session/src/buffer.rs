//! Transactional write buffer for one cache in one unit of work
//!
//! Reads go straight to the underlying cache; writes stage in a pending map
//! and reach the cache only on [`commit`](TransactionalBuffer::commit).
//! Between flushes the underlying cache observes no effect of this buffer's
//! activity, so other units of work keep seeing the pre-transaction state.
//!
//! ## Lock-release writes
//!
//! The buffer records every key that missed on read. On flush (commit or
//! rollback) it writes an explicit [`CacheValue::Null`] for those keys: a
//! backend that blocks concurrent readers on a miss needs some write, even a
//! null one, to unblock them. For the in-process [`Store`](silt_cache::Store)
//! these writes are pure overhead, but the behavior is kept so such backends
//! stay correct behind the same trait.

use rustc_hash::{FxHashMap, FxHashSet};
use silt_cache::{CacheKey, SharedCache};
use silt_core::{CacheValue, Result};
use std::sync::Arc;
use tracing::debug;

/// Write-deferral buffer pairing one underlying cache with one unit of work
///
/// Created lazily the first time a unit of work touches a cache; its state is
/// reset on commit or rollback, which makes a second consecutive `commit` a
/// no-op. The underlying cache outlives the buffer.
pub struct TransactionalBuffer {
    delegate: SharedCache,
    clear_requested: bool,
    pending: FxHashMap<CacheKey, CacheValue>,
    misses: FxHashSet<CacheKey>,
}

impl TransactionalBuffer {
    /// Open a buffer over the given cache
    pub fn new(delegate: SharedCache) -> Self {
        TransactionalBuffer {
            delegate,
            clear_requested: false,
            pending: FxHashMap::default(),
            misses: FxHashSet::default(),
        }
    }

    /// Namespace id of the underlying cache
    pub fn id(&self) -> &str {
        self.delegate.id()
    }

    /// Read through to the underlying cache
    ///
    /// A miss is recorded so the flush can release any backend lock held for
    /// the key. When a clear was requested earlier in this unit of work, the
    /// result is absent regardless of the underlying cache: the clear must
    /// appear to have happened even though it is deferred to commit.
    pub fn get(&mut self, key: &CacheKey) -> Result<Option<CacheValue>> {
        let found = self.delegate.get(key)?;
        if found.is_none() {
            self.misses.insert(key.clone());
        }
        if self.clear_requested {
            return Ok(None);
        }
        Ok(found)
    }

    /// Stage a write; the underlying cache is not touched until commit
    pub fn put(&mut self, key: CacheKey, value: CacheValue) {
        self.pending.insert(key, value);
    }

    /// Intentionally unsupported: the buffer batches writes and does not do
    /// fine-grained transactional deletes. Always reports absent.
    pub fn remove(&mut self, _key: &CacheKey) -> Option<CacheValue> {
        None
    }

    /// Request a full clear of the namespace, deferred to commit
    ///
    /// Anything staged so far becomes moot and is dropped; subsequent reads
    /// in this unit of work report absent.
    pub fn clear(&mut self) {
        self.clear_requested = true;
        self.pending.clear();
    }

    /// Flush this unit of work's activity to the underlying cache
    ///
    /// Clears the cache when a clear was requested, writes every pending
    /// entry, writes null for every read-miss that was never overwritten, and
    /// resets the buffer. Calling `commit` again without intervening activity
    /// is a no-op.
    pub fn commit(&mut self) -> Result<()> {
        if self.clear_requested {
            self.delegate.clear()?;
        }
        self.flush_pending()?;
        self.reset();
        Ok(())
    }

    /// Discard staged writes, release read-miss markers, and reset
    ///
    /// Pending writes never reach the underlying cache; the null lock-release
    /// writes happen regardless of whether the unit of work commits.
    pub fn rollback(&mut self) -> Result<()> {
        for key in &self.misses {
            self.delegate.put(key.clone(), CacheValue::Null)?;
        }
        debug!(
            target: "silt::session",
            namespace = self.delegate.id(),
            released = self.misses.len(),
            discarded = self.pending.len(),
            "rolled back transactional buffer"
        );
        self.reset();
        Ok(())
    }

    /// Number of writes currently staged
    pub fn pending_writes(&self) -> usize {
        self.pending.len()
    }

    /// Number of read-misses recorded in this unit of work
    pub fn missed_reads(&self) -> usize {
        self.misses.len()
    }

    fn flush_pending(&mut self) -> Result<()> {
        for (key, value) in &self.pending {
            self.delegate.put(key.clone(), value.clone())?;
        }
        let mut released = 0usize;
        for key in &self.misses {
            if !self.pending.contains_key(key) {
                self.delegate.put(key.clone(), CacheValue::Null)?;
                released += 1;
            }
        }
        debug!(
            target: "silt::session",
            namespace = self.delegate.id(),
            writes = self.pending.len(),
            released,
            cleared = self.clear_requested,
            "flushed transactional buffer"
        );
        Ok(())
    }

    /// The underlying cache this buffer defers writes for
    pub fn delegate(&self) -> SharedCache {
        Arc::clone(&self.delegate)
    }

    fn reset(&mut self) {
        self.clear_requested = false;
        self.pending.clear();
        self.misses.clear();
    }
}
