//! silt - transactional result-cache engine for identifier-keyed data-access layers
//!
//! silt is the caching core of a persistence-mapping stack: it fingerprints
//! query invocations into composite keys, holds results in per-namespace
//! caches assembled from composable policy decorators, and batches a unit of
//! work's cache writes so they only become visible on commit.
//!
//! # Quick Start
//!
//! ```
//! use silt::{Cache, BufferCoordinator, CacheBuilder, CacheKey, CacheRegistry, CacheValue};
//!
//! # fn main() -> silt::Result<()> {
//! // Configuration time: build and register one cache per namespace
//! let registry = CacheRegistry::new();
//! registry.add(CacheBuilder::new("com.example.UserMapper").build()?)?;
//!
//! // Query time: fingerprint the invocation
//! let mut key = CacheKey::new();
//! key.update("selectUser");
//! key.update(42i64);
//! key.update("production");
//!
//! // One coordinator per unit of work; writes stay invisible until commit
//! let cache = registry.get("com.example.UserMapper").unwrap();
//! let mut uow = BufferCoordinator::new();
//! if uow.get(&cache, &key)?.is_none() {
//!     uow.put(&cache, key.clone(), CacheValue::Str("mapped rows".into()));
//! }
//! uow.commit()?;
//!
//! assert!(cache.get(&key)?.is_some());
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - `silt-core`: the error taxonomy and the canonical [`CacheValue`] model
//! - `silt-cache`: [`CacheKey`], the [`Cache`] trait, [`Store`], the
//!   decorators, [`CacheRegistry`], and [`CacheBuilder`]
//! - `silt-session`: [`TransactionalBuffer`] and [`BufferCoordinator`]
//!
//! Statement building, parameter binding, connection management, and result
//! mapping belong to the surrounding data-access layer; this crate only sees
//! namespace ids, composite keys, and opaque payload values.

pub use silt_core::{CacheValue, Error, Result};

pub use silt_cache::{
    Cache, CacheBuilder, CacheKey, CacheRegistry, EvictionPolicy, FifoCache, LruCache,
    ScheduledCache, SharedCache, StatsCache, Store, SynchronizedCache,
};

pub use silt_session::{BufferCoordinator, TransactionalBuffer};
