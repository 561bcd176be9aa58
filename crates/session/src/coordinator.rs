//! Buffer routing and commit/rollback fan-out for one unit of work

use crate::buffer::TransactionalBuffer;
use silt_cache::{CacheKey, SharedCache};
use silt_core::{CacheValue, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Owns the live buffer for every cache a unit of work has touched
///
/// Buffers are keyed by namespace id, since identifier equality is cache
/// identity: two decorator stacks over the same namespace share one buffer. The
/// coordinator holds no cached data itself; it is routing plus lifecycle
/// fan-out, one instance per unit of work. Buffers are independent, so
/// commit/rollback order across namespaces is unspecified.
#[derive(Default)]
pub struct BufferCoordinator {
    buffers: HashMap<String, TransactionalBuffer>,
}

impl BufferCoordinator {
    /// Create a coordinator for a fresh unit of work
    pub fn new() -> Self {
        BufferCoordinator {
            buffers: HashMap::new(),
        }
    }

    /// Read a key through the cache's transactional buffer
    pub fn get(&mut self, cache: &SharedCache, key: &CacheKey) -> Result<Option<CacheValue>> {
        self.buffer(cache).get(key)
    }

    /// Stage a write into the cache's transactional buffer
    pub fn put(&mut self, cache: &SharedCache, key: CacheKey, value: CacheValue) {
        self.buffer(cache).put(key, value);
    }

    /// Request a deferred clear of the cache's namespace
    pub fn clear(&mut self, cache: &SharedCache) {
        self.buffer(cache).clear();
    }

    /// Flush every touched buffer to its underlying cache
    pub fn commit(&mut self) -> Result<()> {
        debug!(
            target: "silt::session",
            buffers = self.buffers.len(),
            "committing unit of work"
        );
        for buffer in self.buffers.values_mut() {
            buffer.commit()?;
        }
        Ok(())
    }

    /// Discard every touched buffer's staged writes, releasing miss markers
    pub fn rollback(&mut self) -> Result<()> {
        debug!(
            target: "silt::session",
            buffers = self.buffers.len(),
            "rolling back unit of work"
        );
        for buffer in self.buffers.values_mut() {
            buffer.rollback()?;
        }
        Ok(())
    }

    /// Number of caches this unit of work has touched
    pub fn tracked(&self) -> usize {
        self.buffers.len()
    }

    fn buffer(&mut self, cache: &SharedCache) -> &mut TransactionalBuffer {
        self.buffers
            .entry(cache.id().to_string())
            .or_insert_with(|| TransactionalBuffer::new(Arc::clone(cache)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use silt_cache::{Cache, Store};

    fn test_key(tag: i64) -> CacheKey {
        let mut key = CacheKey::new();
        key.update(CacheValue::Int(tag));
        key
    }

    fn shared_store(id: &str) -> SharedCache {
        Arc::new(Store::new(id).unwrap())
    }

    #[test]
    fn test_buffers_created_lazily_per_cache() {
        let users = shared_store("users");
        let orders = shared_store("orders");
        let mut uow = BufferCoordinator::new();

        assert_eq!(uow.tracked(), 0);
        uow.put(&users, test_key(1), CacheValue::Int(1));
        uow.put(&orders, test_key(1), CacheValue::Int(2));
        uow.put(&users, test_key(2), CacheValue::Int(3));
        assert_eq!(uow.tracked(), 2);
    }

    #[test]
    fn test_commit_fans_out_to_all_buffers() {
        let users = shared_store("users");
        let orders = shared_store("orders");
        let mut uow = BufferCoordinator::new();

        uow.put(&users, test_key(1), CacheValue::Int(1));
        uow.put(&orders, test_key(1), CacheValue::Int(2));
        uow.commit().unwrap();

        assert_eq!(users.get(&test_key(1)).unwrap(), Some(CacheValue::Int(1)));
        assert_eq!(orders.get(&test_key(1)).unwrap(), Some(CacheValue::Int(2)));
    }

    #[test]
    fn test_rollback_fans_out_to_all_buffers() {
        let users = shared_store("users");
        let orders = shared_store("orders");
        let mut uow = BufferCoordinator::new();

        uow.get(&users, &test_key(1)).unwrap();
        uow.put(&orders, test_key(1), CacheValue::Int(2));
        uow.rollback().unwrap();

        assert_eq!(users.get(&test_key(1)).unwrap(), Some(CacheValue::Null));
        assert_eq!(orders.get(&test_key(1)).unwrap(), None);
    }

    #[test]
    fn test_same_id_caches_share_one_buffer() {
        let a = shared_store("users");
        let b = shared_store("users");
        let mut uow = BufferCoordinator::new();

        uow.put(&a, test_key(1), CacheValue::Int(1));
        uow.put(&b, test_key(2), CacheValue::Int(2));
        // Identifier equality, not instance identity
        assert_eq!(uow.tracked(), 1);
    }

    #[test]
    fn test_clear_routes_to_the_right_buffer() {
        let users = shared_store("users");
        users.put(test_key(1), CacheValue::Int(1)).unwrap();
        let mut uow = BufferCoordinator::new();

        uow.clear(&users);
        assert_eq!(uow.get(&users, &test_key(1)).unwrap(), None);
        // Deferred: the physical clear happens at commit
        assert_eq!(users.get(&test_key(1)).unwrap(), Some(CacheValue::Int(1)));

        uow.commit().unwrap();
        assert_ne!(users.get(&test_key(1)).unwrap(), Some(CacheValue::Int(1)));
    }
}
