//! cachecore: bounded in-memory key-value caches with O(1) eviction policies.
//!
//! The crate provides three independently usable cache cores:
//!
//! - [`policy::lru::LruCache`] — evicts the least recently used entry.
//! - [`policy::lfu::LfuCache`] — evicts the least frequently used entry,
//!   breaking ties by recency within the lowest frequency tier.
//! - [`policy::ttl_lru::TtlLruCache`] — LRU with per-entry time-to-live.
//!
//! All cores are single-threaded by design; thread safety is layered on top
//! by the `Concurrent*` wrappers behind the `concurrency` feature (a single
//! exclusive lock around the whole core, never finer-grained).

pub mod error;
pub mod policy;
pub mod stats;
pub mod traits;

pub mod prelude;
