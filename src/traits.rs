//! # Cache Trait Hierarchy
//!
//! Defines the trait hierarchy shared by all cache policies in this crate,
//! so callers can write policy-generic code while each policy only exposes
//! operations that make sense for it.
//!
//! ```text
//!                  ┌─────────────────────────────────────────┐
//!                  │            CoreCache<K, V>              │
//!                  │                                         │
//!                  │  insert(&mut, K, V) → Option<V>         │
//!                  │  get(&mut, &K) → Option<&V>             │
//!                  │  contains(&, &K) → bool                 │
//!                  │  len / is_empty / capacity / clear      │
//!                  └──────────────────┬──────────────────────┘
//!                                     │
//!                                     ▼
//!                  ┌─────────────────────────────────────────┐
//!                  │          MutableCache<K, V>             │
//!                  │                                         │
//!                  │  remove(&K) → Option<V>                 │
//!                  │  remove_batch(&[K]) → Vec<Option<V>>    │
//!                  └────────┬───────────────────┬────────────┘
//!                           │                   │
//!                           ▼                   ▼
//!       ┌────────────────────────────┐  ┌────────────────────────────┐
//!       │   LruCacheTrait<K, V>      │  │   LfuCacheTrait<K, V>      │
//!       │                            │  │                            │
//!       │  pop_lru() → (K, V)        │  │  pop_lfu() → (K, V)        │
//!       │  peek_lru() → (&K, &V)     │  │  peek_lfu() → (&K, &V)     │
//!       │  touch(&K) → bool          │  │  frequency(&K) → u64       │
//!       │  recency_rank(&K) → usize  │  │                            │
//!       └────────────────────────────┘  └────────────────────────────┘
//! ```
//!
//! | Trait            | Extends        | Purpose                              |
//! |------------------|----------------|--------------------------------------|
//! | `CoreCache`      | -              | Universal cache operations           |
//! | `MutableCache`   | `CoreCache`    | Adds arbitrary key removal           |
//! | `LruCacheTrait`  | `MutableCache` | Recency-ordered eviction operations  |
//! | `LfuCacheTrait`  | `MutableCache` | Frequency-ordered eviction operations|
//!
//! Implementations add their own bounds on `K` and `V` as needed; the traits
//! themselves stay unconstrained.

/// Core cache operations that all caches support.
///
/// # Example
///
/// ```
/// use cachecore::traits::CoreCache;
/// use cachecore::policy::lru::LruCache;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = LruCache::new(100);
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if it existed.
    ///
    /// If the cache is at capacity, an entry may be evicted according to the
    /// cache's eviction policy before the new entry is inserted. `insert`
    /// never fails; capacity pressure is resolved by eviction.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key.
    ///
    /// Updates internal state (recency position or frequency count) according
    /// to the eviction policy. A missing key is a defined outcome (`None`),
    /// never an error. Use [`contains`](Self::contains) to check existence
    /// without affecting eviction order.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating access state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries in the cache.
    fn len(&self) -> usize;

    /// Returns `true` if the cache contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum capacity of the cache.
    fn capacity(&self) -> usize;

    /// Removes all entries from the cache.
    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
///
/// # Example
///
/// ```
/// use cachecore::traits::{CoreCache, MutableCache};
/// use cachecore::policy::lfu::LfuCache;
///
/// fn invalidate_keys<C: MutableCache<u64, String>>(cache: &mut C, keys: &[u64]) {
///     for key in keys {
///         cache.remove(key);
///     }
/// }
///
/// let mut cache = LfuCache::new(100);
/// cache.insert(1, "one".to_string());
/// cache.insert(2, "two".to_string());
///
/// invalidate_keys(&mut cache, &[1]);
/// assert!(!cache.contains(&1));
/// assert!(cache.contains(&2));
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes a specific key-value pair.
    ///
    /// Returns the removed value if the key existed, or `None` if it didn't.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes multiple keys, returning removed values in input order.
    ///
    /// The default implementation loops over [`remove`](Self::remove).
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|k| self.remove(k)).collect()
    }
}

/// LRU-specific operations that respect access order.
///
/// Entries are ordered by recency; the least recently accessed entry is
/// evicted first.
///
/// # Example
///
/// ```
/// use cachecore::traits::{CoreCache, LruCacheTrait};
/// use cachecore::policy::lru::LruCache;
///
/// let mut cache: LruCache<u64, &str> = LruCache::new(3);
/// cache.insert(1, "first");
/// cache.insert(2, "second");
///
/// // Access key 1 to make it MRU; key 2 becomes LRU
/// cache.get(&1);
/// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(2));
///
/// let (key, _) = cache.pop_lru().unwrap();
/// assert_eq!(key, 2);
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Peeks at the LRU entry without removing it or updating access order.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks an entry as recently used without retrieving the value.
    ///
    /// Returns `true` if the key was found and touched, `false` otherwise.
    fn touch(&mut self, key: &K) -> bool;

    /// Gets the recency rank of a key (0 = most recent, higher = older).
    ///
    /// Requires an O(n) list walk; intended for tests and diagnostics.
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// LFU-specific operations that respect frequency order.
///
/// Entries are ordered by access frequency; the least frequently accessed
/// entry is evicted first, with ties broken by recency within the lowest
/// frequency tier.
///
/// # Example
///
/// ```
/// use cachecore::traits::{CoreCache, LfuCacheTrait};
/// use cachecore::policy::lfu::LfuCache;
///
/// let mut cache: LfuCache<u64, &str> = LfuCache::new(3);
/// cache.insert(1, "first");
/// cache.insert(2, "second");
///
/// cache.get(&1);
/// assert_eq!(cache.frequency(&1), Some(2));
/// assert_eq!(cache.frequency(&2), Some(1));
///
/// // Key 2 has the lowest frequency, so it is the eviction candidate
/// assert_eq!(cache.peek_lfu().map(|(k, _)| *k), Some(2));
/// ```
pub trait LfuCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least frequently used entry.
    ///
    /// Ties at the lowest frequency are broken by recency (least recent
    /// within the tier is removed first).
    fn pop_lfu(&mut self) -> Option<(K, V)>;

    /// Peeks at the LFU entry without removing it or updating state.
    fn peek_lfu(&self) -> Option<(&K, &V)>;

    /// Returns the access frequency recorded for a key.
    fn frequency(&self, key: &K) -> Option<u64>;
}
