//! Periodic full-clear decorator

use crate::key::CacheKey;
use crate::traits::Cache;
use parking_lot::Mutex;
use silt_core::{CacheValue, Result};
use std::time::{Duration, Instant};

/// Default clear interval: one hour
pub const DEFAULT_CLEAR_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Clears the wrapped cache whenever the configured interval has elapsed
///
/// Every accessor first checks elapsed time since the last clear; when the
/// interval is reached the wrapped cache is cleared and the timer resets. A
/// `get` that triggered the clear reports absent for that call, even though
/// the clear happened as a side effect of the read. An explicit `clear` also
/// resets the timer.
pub struct ScheduledCache {
    inner: Box<dyn Cache>,
    interval: Duration,
    last_clear: Mutex<Instant>,
}

impl ScheduledCache {
    /// Wrap a cache with the default one-hour interval
    pub fn new(inner: Box<dyn Cache>) -> Self {
        Self::with_interval(inner, DEFAULT_CLEAR_INTERVAL)
    }

    /// Wrap a cache with an explicit clear interval
    ///
    /// An interval of zero clears on every accessor call.
    pub fn with_interval(inner: Box<dyn Cache>, interval: Duration) -> Self {
        ScheduledCache {
            inner,
            interval,
            last_clear: Mutex::new(Instant::now()),
        }
    }

    /// Configured clear interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Clear the wrapped cache and reset the timer when the interval is due.
    /// Returns whether a clear happened.
    fn clear_when_due(&self) -> Result<bool> {
        let mut last_clear = self.last_clear.lock();
        if last_clear.elapsed() >= self.interval {
            self.inner.clear()?;
            *last_clear = Instant::now();
            return Ok(true);
        }
        Ok(false)
    }
}

impl Cache for ScheduledCache {
    fn id(&self) -> &str {
        self.inner.id()
    }

    fn get(&self, key: &CacheKey) -> Result<Option<CacheValue>> {
        if self.clear_when_due()? {
            return Ok(None);
        }
        self.inner.get(key)
    }

    fn put(&self, key: CacheKey, value: CacheValue) -> Result<()> {
        self.clear_when_due()?;
        self.inner.put(key, value)
    }

    fn remove(&self, key: &CacheKey) -> Result<Option<CacheValue>> {
        self.clear_when_due()?;
        self.inner.remove(key)
    }

    fn clear(&self) -> Result<()> {
        *self.last_clear.lock() = Instant::now();
        self.inner.clear()
    }

    fn len(&self) -> Result<usize> {
        self.clear_when_due()?;
        self.inner.len()
    }
}
