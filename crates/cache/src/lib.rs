//! Namespace caches for the silt engine
//!
//! This crate implements the per-namespace caching layer:
//! - [`CacheKey`]: the order-sensitive composite fingerprint built from the
//!   contributing values of one query invocation
//! - [`Cache`]: the one capability trait every cache layer implements
//! - [`Store`]: the unbounded base cache for one namespace
//! - [`decorators`]: composable policy wrappers (FIFO, LRU, scheduled clear,
//!   mutual exclusion, hit-ratio instrumentation)
//! - [`CacheRegistry`]: the explicitly owned namespace → cache map
//! - [`CacheBuilder`]: assembles a configured decorator stack
//!
//! Transactional buffering across a unit of work lives in `silt-session`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod decorators;
pub mod key;
pub mod registry;
pub mod store;
pub mod traits;

pub use builder::{CacheBuilder, EvictionPolicy};
pub use decorators::{FifoCache, LruCache, ScheduledCache, StatsCache, SynchronizedCache};
pub use key::CacheKey;
pub use registry::CacheRegistry;
pub use store::Store;
pub use traits::{Cache, SharedCache};
