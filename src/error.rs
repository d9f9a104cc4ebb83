//! Error types for the cachecore library.
//!
//! The error surface is deliberately small: the only hard failure a cache can
//! report is an invalid construction parameter. Missing keys on `get` are a
//! normal outcome (`None`), and capacity pressure is resolved silently by
//! eviction inside `insert`.
//!
//! ## Example Usage
//!
//! ```
//! use cachecore::error::ConfigError;
//! use cachecore::policy::lru::LruCache;
//!
//! // Fallible constructor for user-configurable parameters
//! let cache: Result<LruCache<u64, String>, ConfigError> = LruCache::try_new(100);
//! assert!(cache.is_ok());
//!
//! // Zero capacity is caught without panicking
//! let bad = LruCache::<u64, String>::try_new(0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`LruCache::try_new`](crate::policy::lru::LruCache::try_new) and
/// [`TtlLruCache::try_new`](crate::policy::ttl_lru::TtlLruCache::try_new).
/// Carries a human-readable description of which parameter failed validation.
///
/// # Example
///
/// ```
/// use cachecore::policy::lru::LruCache;
///
/// let err = LruCache::<u64, u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}
