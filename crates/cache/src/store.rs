//! Base namespace cache
//!
//! [`Store`] is the unbounded key → value mapping for one namespace: no
//! eviction, no ordering, no capacity guarantees. Every policy is layered on
//! top by the decorators in [`crate::decorators`].

use crate::key::CacheKey;
use crate::traits::Cache;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use silt_core::{CacheValue, Error, Result};

/// Unbounded in-memory cache for one namespace
///
/// Two stores are equal iff their namespace identifiers are equal, regardless
/// of contents.
#[derive(Debug)]
pub struct Store {
    id: String,
    entries: RwLock<FxHashMap<CacheKey, CacheValue>>,
}

impl Store {
    /// Create an empty store for the given namespace
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the namespace id is empty; a cache
    /// without an identifier cannot participate in registry lookups or
    /// buffer routing.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(Error::config("namespace cache requires a non-empty id"));
        }
        Ok(Store {
            id,
            entries: RwLock::new(FxHashMap::default()),
        })
    }
}

impl Cache for Store {
    fn id(&self) -> &str {
        &self.id
    }

    fn get(&self, key: &CacheKey) -> Result<Option<CacheValue>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn put(&self, key: CacheKey, value: CacheValue) -> Result<()> {
        self.entries.write().insert(key, value);
        Ok(())
    }

    fn remove(&self, key: &CacheKey) -> Result<Option<CacheValue>> {
        Ok(self.entries.write().remove(key))
    }

    fn clear(&self) -> Result<()> {
        self.entries.write().clear();
        Ok(())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.entries.read().len())
    }
}

impl PartialEq for Store {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Store {}

// Identity is the identifier, so hashing follows equality and ignores contents
impl std::hash::Hash for Store {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::hash::Hash::hash(&self.id, state);
    }
}
