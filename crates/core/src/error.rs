//! Error types for the silt cache engine
//!
//! Two failure classes cross the public API:
//! - [`Error::Config`]: a misconfigured cache (missing or duplicate namespace
//!   id). Fatal, surfaced immediately, never retried.
//! - [`Error::Backend`]: an underlying cache backend failed to answer. The
//!   engine propagates these unchanged; retry policy belongs to the backend.
//!
//! Contract violations (for example mutating the disabled cache key) are
//! programming errors and panic instead of returning an `Error`.

use thiserror::Error;

/// Result type alias for cache-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the silt cache engine
#[derive(Debug, Error)]
pub enum Error {
    /// Cache configuration error (missing namespace id, duplicate registration)
    #[error("cache configuration error: {0}")]
    Config(String),

    /// Underlying cache backend failure
    #[error("cache backend error in namespace '{namespace}': {message}")]
    Backend {
        /// Namespace id of the failing cache
        namespace: String,
        /// Backend-supplied failure description
        message: String,
    },
}

impl Error {
    /// Build a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    /// Build a backend failure for the given namespace
    pub fn backend(namespace: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Backend {
            namespace: namespace.into(),
            message: message.into(),
        }
    }
}
