//! Namespace cache registry
//!
//! The registry owns the namespace id → cache mapping for one data-access
//! configuration. It is an explicitly constructed value passed to whatever
//! builds units of work; there is no ambient global registry, which keeps
//! lifecycle and testing deterministic.

use crate::traits::SharedCache;
use dashmap::DashMap;
use silt_core::{Error, Result};
use std::sync::Arc;
use tracing::debug;

/// Owns one cache per namespace identifier
///
/// Caches are registered at configuration/build time and held for the
/// registry's lifetime. Registration of a duplicate id is a configuration
/// error: identifier equality is cache identity, so a second cache under the
/// same id would silently split a namespace.
#[derive(Default)]
pub struct CacheRegistry {
    caches: DashMap<String, SharedCache>,
}

impl CacheRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        CacheRegistry {
            caches: DashMap::new(),
        }
    }

    /// Register a namespace cache
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when a cache is already registered under the
    /// same namespace id.
    pub fn add(&self, cache: SharedCache) -> Result<()> {
        let id = cache.id().to_string();
        match self.caches.entry(id.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(Error::config(format!(
                "namespace '{id}' is already registered"
            ))),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(cache);
                debug!(target: "silt::registry", namespace = %id, "registered namespace cache");
                Ok(())
            }
        }
    }

    /// Look up the cache for a namespace id
    pub fn get(&self, id: &str) -> Option<SharedCache> {
        self.caches.get(id).map(|entry| Arc::clone(entry.value()))
    }

    /// Whether a cache is registered under the given id
    pub fn contains(&self, id: &str) -> bool {
        self.caches.contains_key(id)
    }

    /// All registered namespace ids, sorted
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.caches.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    /// Number of registered namespaces
    pub fn len(&self) -> usize {
        self.caches.len()
    }

    /// Whether the registry holds no caches
    pub fn is_empty(&self) -> bool {
        self.caches.is_empty()
    }

    /// Flush every registered namespace cache
    pub fn clear_all(&self) -> Result<()> {
        for entry in self.caches.iter() {
            entry.value().clear()?;
        }
        Ok(())
    }
}
