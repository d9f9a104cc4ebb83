//! Per-cache operation counters.
//!
//! Every cache core embeds a [`CacheStats`] and bumps it inline; the cost is
//! a couple of integer adds per operation, so the counters are always on.
//! [`CacheStats`] is `Copy`, and `stats()` on a cache returns a snapshot.

/// Operation counters for a single cache instance.
///
/// # Example
///
/// ```
/// use cachecore::policy::lru::LruCache;
///
/// let mut cache: LruCache<u32, &str> = LruCache::new(2);
/// cache.insert(1, "one");
/// cache.get(&1);
/// cache.get(&2);
///
/// let stats = cache.stats();
/// assert_eq!(stats.hits(), 1);
/// assert_eq!(stats.misses(), 1);
/// assert_eq!(stats.hit_ratio(), 0.5);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    hits: u64,
    misses: u64,
    insertions: u64,
    updates: u64,
    evictions: u64,
    expirations: u64,
}

impl CacheStats {
    /// Total `get` calls that found the key.
    #[inline]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Total `get` calls that missed.
    #[inline]
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Total inserts of previously absent keys.
    #[inline]
    pub fn insertions(&self) -> u64 {
        self.insertions
    }

    /// Total inserts that replaced an existing value.
    #[inline]
    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// Total entries removed by capacity eviction.
    #[inline]
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Total entries removed by TTL expiry (always 0 for non-TTL caches).
    #[inline]
    pub fn expirations(&self) -> u64 {
        self.expirations
    }

    /// Hit ratio in `0.0..=1.0`; `0.0` when no `get` has been recorded.
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    #[inline]
    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    #[inline]
    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    #[inline]
    pub(crate) fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    #[inline]
    pub(crate) fn record_update(&mut self) {
        self.updates += 1;
    }

    #[inline]
    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    #[inline]
    pub(crate) fn record_expiration(&mut self) {
        self.expirations += 1;
    }
}
