//! Cache decorators
//!
//! Each decorator wraps exactly one underlying cache (of any kind, including
//! another decorator), forwards `id` and `len` transparently, and adds one
//! cross-cutting policy:
//!
//! - [`FifoCache`]: bounded insertion-order eviction
//! - [`LruCache`]: bounded access-order eviction
//! - [`ScheduledCache`]: periodic full clear
//! - [`SynchronizedCache`]: whole-chain mutual exclusion
//! - [`StatsCache`]: hit-ratio instrumentation
//!
//! Decorators never invent error conditions; a failure in the wrapped cache
//! propagates unchanged.

pub mod fifo;
pub mod lru;
pub mod scheduled;
pub mod stats;
pub mod sync;

pub use fifo::FifoCache;
pub use lru::LruCache;
pub use scheduled::ScheduledCache;
pub use stats::StatsCache;
pub use sync::SynchronizedCache;
