//! Convenience re-exports of the crate's common types and traits.

pub use crate::error::ConfigError;
pub use crate::policy::lfu::LfuCache;
pub use crate::policy::lru::LruCache;
pub use crate::policy::ttl_lru::TtlLruCache;
pub use crate::stats::CacheStats;
pub use crate::traits::{CoreCache, LfuCacheTrait, LruCacheTrait, MutableCache};

#[cfg(feature = "concurrency")]
pub use crate::policy::lfu::ConcurrentLfuCache;
#[cfg(feature = "concurrency")]
pub use crate::policy::lru::ConcurrentLruCache;
