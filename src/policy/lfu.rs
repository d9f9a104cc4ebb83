//! # Least Frequently Used (LFU) Cache
//!
//! A bounded key-value cache that evicts the entry with the lowest access
//! frequency when capacity is exceeded, breaking ties by recency within the
//! lowest frequency tier.
//!
//! ## Architecture
//!
//! ```text
//!   ┌────────────────────────────────────────────────────────────────────┐
//!   │                         LfuCache<K, V>                             │
//!   │                                                                    │
//!   │   FxHashMap<K, usize> ──────► slot index                           │
//!   │                                                                    │
//!   │   Vec<Slot> (slab)      slot = { key, value, freq, prev, next }    │
//!   │                                                                    │
//!   │   FxHashMap<u64, FreqList>   (frequency buckets)                   │
//!   │                                                                    │
//!   │     freq 1: head ──► [E] ◄──► [D] ◄── tail   (MRU ... LRU)         │
//!   │     freq 3: head ──► [B] ◄─────────── tail                         │
//!   │     freq 7: head ──► [A] ◄──► [C] ◄── tail                         │
//!   │                                                                    │
//!   │   min_freq: 1  (smallest non-empty tier; 0 while cache is empty)   │
//!   └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why frequency buckets, not one sorted structure
//!
//! A single global ordering by (frequency, recency) would cost O(log n)
//! rebalancing per access. Bucketing by exact frequency turns "find least
//! frequent, least recent" into O(1): look up the `min_freq` bucket and take
//! its tail. Promotion on access is also O(1): unlink from the old bucket,
//! push onto the front of the `freq + 1` bucket.
//!
//! Every bucket is itself a recency-ordered intrusive list threaded through
//! the slot slab (MRU at head), which is what makes the eviction tie-break
//! deterministic: the victim is always the least recently touched key of the
//! lowest tier.
//!
//! ## `min_freq` maintenance
//!
//! - Fresh insert: `min_freq = 1` unconditionally — a new entry always has
//!   the lowest possible frequency.
//! - Promotion (`get`, or `insert` on an existing key): if the old tier
//!   emptied and was the minimum, the minimum becomes `old + 1`.
//! - Arbitrary `remove` / `pop_lfu`: if the minimum tier emptied, the new
//!   minimum is recomputed over remaining tiers (O(distinct frequencies),
//!   only on the emptying transition).
//!
//! ## Operations
//!
//! | Method           | Complexity | Description                               |
//! |------------------|------------|-------------------------------------------|
//! | `new(capacity)`  | O(1)       | Capacity 0 is valid: all inserts no-op    |
//! | `insert(k, v)`   | O(1)*      | Insert or update+promote, may evict LFU   |
//! | `get(&k)`        | O(1)       | Get value, increments frequency           |
//! | `peek(&k)`       | O(1)       | Get value without frequency bump          |
//! | `remove(&k)`     | O(1)*      | Remove entry by key                       |
//! | `pop_lfu()`      | O(1)*      | Remove and return the LFU entry           |
//! | `peek_lfu()`     | O(1)       | Peek at the LFU entry                     |
//! | `frequency(&k)`  | O(1)       | Access count recorded for a key           |
//!
//! ## Thread Safety
//!
//! `LfuCache` is **not** thread-safe. [`ConcurrentLfuCache`] (feature
//! `concurrency`) wraps the core in a single exclusive mutex.

use std::hash::Hash;
use std::mem;

#[cfg(feature = "concurrency")]
use std::fmt;
#[cfg(feature = "concurrency")]
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::stats::CacheStats;
use crate::traits::{CoreCache, LfuCacheTrait, MutableCache};

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    freq: u64,
}

#[derive(Debug)]
struct Slot<K, V> {
    entry: Option<Entry<K, V>>,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Recency-ordered list of slots sharing one frequency. MRU at head.
#[derive(Debug, Default)]
struct FreqList {
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

/// Bounded LFU cache: slot slab + key index + frequency buckets.
///
/// Capacity 0 is explicitly valid and means "unable to hold anything";
/// every insert is then a no-op.
///
/// # Example
///
/// ```
/// use cachecore::policy::lfu::LfuCache;
///
/// let mut cache: LfuCache<u32, &str> = LfuCache::new(2);
/// cache.insert(1, "one");
/// cache.insert(2, "two");
///
/// // Key 1 now has frequency 2; key 2 stays at 1
/// cache.get(&1);
///
/// // Key 2 has the lowest frequency and is evicted
/// cache.insert(3, "three");
/// assert!(cache.contains(&1));
/// assert!(!cache.contains(&2));
/// ```
#[derive(Debug)]
pub struct LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    slots: Vec<Slot<K, V>>,
    free_list: Vec<usize>,
    index: FxHashMap<K, usize>,
    buckets: FxHashMap<u64, FreqList>,
    /// Smallest frequency with a non-empty bucket; 0 iff the cache is empty.
    min_freq: u64,
    capacity: usize,
    stats: CacheStats,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a new LFU cache with the given capacity.
    ///
    /// # Example
    ///
    /// ```
    /// use cachecore::policy::lfu::LfuCache;
    ///
    /// let cache: LfuCache<u32, u32> = LfuCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    ///
    /// // Capacity 0 is valid: the cache simply never stores anything
    /// let mut zero: LfuCache<u32, u32> = LfuCache::new(0);
    /// zero.insert(1, 1);
    /// assert!(!zero.contains(&1));
    /// ```
    pub fn new(capacity: usize) -> Self {
        LfuCache {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            buckets: FxHashMap::default(),
            min_freq: 0,
            capacity,
            stats: CacheStats::default(),
        }
    }

    /// Inserts a key-value pair, returning the previous value if the key
    /// already existed.
    ///
    /// An existing key has its value replaced and its frequency incremented,
    /// exactly as a `get` would. A new key is inserted with frequency 1 into
    /// the frequency-1 bucket as most recent, evicting the least-recent
    /// member of the `min_freq` bucket first if the cache is full. Never
    /// fails; with capacity 0 this is a guaranteed no-op.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&idx) = self.index.get(&key) {
            self.stats.record_update();
            let entry = self.slots[idx].entry.as_mut().expect("lfu entry missing");
            let previous = mem::replace(&mut entry.value, value);
            self.promote(idx);
            self.validate_invariants();
            return Some(previous);
        }

        if self.capacity == 0 {
            return None;
        }

        if self.index.len() >= self.capacity {
            if self.evict_lfu().is_some() {
                self.stats.record_eviction();
            }
        }

        let idx = self.allocate_slot(Entry {
            key: key.clone(),
            value,
            freq: 1,
        });
        self.index.insert(key, idx);
        let slots = &mut self.slots;
        let bucket = self.buckets.entry(1).or_default();
        Self::list_push_front(slots, bucket, idx);
        // A fresh entry always has the lowest possible frequency.
        self.min_freq = 1;
        self.stats.record_insertion();
        self.validate_invariants();
        None
    }

    /// Gets a value by key, incrementing its access frequency.
    ///
    /// The entry moves from its old frequency bucket to the next one,
    /// inserted as most recent there. A missing key is a defined outcome
    /// (`None`) with no side effect.
    ///
    /// # Example
    ///
    /// ```
    /// use cachecore::policy::lfu::LfuCache;
    ///
    /// let mut cache = LfuCache::new(10);
    /// cache.insert(1, "value");
    ///
    /// assert_eq!(cache.get(&1), Some(&"value"));
    /// assert_eq!(cache.frequency(&1), Some(2));
    /// assert_eq!(cache.get(&99), None);
    /// ```
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let idx = match self.index.get(key) {
            Some(&idx) => idx,
            None => {
                self.stats.record_miss();
                return None;
            },
        };
        self.stats.record_hit();
        self.promote(idx);
        self.validate_invariants();
        self.slots[idx].entry.as_ref().map(|entry| &entry.value)
    }

    /// Read-only lookup without a frequency bump.
    #[inline]
    pub fn peek(&self, key: &K) -> Option<&V> {
        let &idx = self.index.get(key)?;
        self.slots[idx].entry.as_ref().map(|entry| &entry.value)
    }

    /// Checks if a key exists without updating its frequency.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the access frequency recorded for a key.
    #[inline]
    pub fn frequency(&self, key: &K) -> Option<u64> {
        let &idx = self.index.get(key)?;
        self.slots[idx].entry.as_ref().map(|entry| entry.freq)
    }

    /// Removes an entry by key, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let idx = self.index.remove(key)?;
        let freq = self.slots[idx]
            .entry
            .as_ref()
            .expect("lfu entry missing")
            .freq;

        let emptied = {
            let slots = &mut self.slots;
            let bucket = self.buckets.get_mut(&freq).expect("lfu bucket missing");
            Self::list_remove(slots, bucket, idx);
            bucket.len == 0
        };
        if emptied {
            self.buckets.remove(&freq);
            if self.min_freq == freq {
                self.min_freq = self.buckets.keys().copied().min().unwrap_or(0);
            }
        }

        let entry = self.release_slot(idx);
        self.validate_invariants();
        Some(entry.value)
    }

    /// Removes and returns the least frequently used entry, breaking ties by
    /// recency (least recent within the lowest tier first).
    pub fn pop_lfu(&mut self) -> Option<(K, V)> {
        let popped = self.evict_lfu();
        self.validate_invariants();
        popped
    }

    /// Peeks at the eviction candidate without removing it.
    pub fn peek_lfu(&self) -> Option<(&K, &V)> {
        if self.min_freq == 0 {
            return None;
        }
        let bucket = self.buckets.get(&self.min_freq)?;
        let idx = bucket.tail?;
        self.slots[idx]
            .entry
            .as_ref()
            .map(|entry| (&entry.key, &entry.value))
    }

    /// Returns the current number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the maximum capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes all entries. Capacity and statistics are retained.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.index.clear();
        self.buckets.clear();
        self.min_freq = 0;
    }

    /// Returns a snapshot of this cache's operation counters.
    #[inline]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Move a slot from its current frequency tier to the next one.
    fn promote(&mut self, idx: usize) {
        let old_freq = self.slots[idx]
            .entry
            .as_ref()
            .expect("lfu entry missing")
            .freq;
        let new_freq = old_freq.saturating_add(1);
        if new_freq == old_freq {
            // Frequency counter saturated; order within the tier still holds.
            return;
        }

        let emptied = {
            let slots = &mut self.slots;
            let bucket = self.buckets.get_mut(&old_freq).expect("lfu bucket missing");
            Self::list_remove(slots, bucket, idx);
            bucket.len == 0
        };
        if emptied {
            self.buckets.remove(&old_freq);
            // Promotion moves exactly one tier up, so the entry itself now
            // defines the minimum.
            if self.min_freq == old_freq {
                self.min_freq = new_freq;
            }
        }

        self.slots[idx]
            .entry
            .as_mut()
            .expect("lfu entry missing")
            .freq = new_freq;
        let slots = &mut self.slots;
        let bucket = self.buckets.entry(new_freq).or_default();
        Self::list_push_front(slots, bucket, idx);
    }

    /// Evict the least-recent member of the `min_freq` bucket.
    fn evict_lfu(&mut self) -> Option<(K, V)> {
        if self.min_freq == 0 {
            return None;
        }
        let min_freq = self.min_freq;

        let (idx, emptied) = {
            let slots = &mut self.slots;
            let bucket = self.buckets.get_mut(&min_freq)?;
            let idx = Self::list_pop_back(slots, bucket)?;
            (idx, bucket.len == 0)
        };
        if emptied {
            self.buckets.remove(&min_freq);
            self.min_freq = self.buckets.keys().copied().min().unwrap_or(0);
        }

        let entry = self.release_slot(idx);
        self.index.remove(&entry.key);
        Some((entry.key, entry.value))
    }

    fn allocate_slot(&mut self, entry: Entry<K, V>) -> usize {
        if let Some(idx) = self.free_list.pop() {
            self.slots[idx] = Slot {
                entry: Some(entry),
                prev: None,
                next: None,
            };
            idx
        } else {
            self.slots.push(Slot {
                entry: Some(entry),
                prev: None,
                next: None,
            });
            self.slots.len() - 1
        }
    }

    fn release_slot(&mut self, idx: usize) -> Entry<K, V> {
        let entry = self.slots[idx].entry.take().expect("lfu entry missing");
        self.slots[idx].prev = None;
        self.slots[idx].next = None;
        self.free_list.push(idx);
        entry
    }

    fn list_push_front(slots: &mut [Slot<K, V>], list: &mut FreqList, idx: usize) {
        let old_head = list.head;
        slots[idx].prev = None;
        slots[idx].next = old_head;
        if let Some(head_idx) = old_head {
            slots[head_idx].prev = Some(idx);
        } else {
            list.tail = Some(idx);
        }
        list.head = Some(idx);
        list.len += 1;
    }

    fn list_remove(slots: &mut [Slot<K, V>], list: &mut FreqList, idx: usize) {
        let prev = slots[idx].prev;
        let next = slots[idx].next;
        if let Some(prev_idx) = prev {
            slots[prev_idx].next = next;
        } else {
            list.head = next;
        }
        if let Some(next_idx) = next {
            slots[next_idx].prev = prev;
        } else {
            list.tail = prev;
        }
        slots[idx].prev = None;
        slots[idx].next = None;
        list.len = list.len.saturating_sub(1);
    }

    fn list_pop_back(slots: &mut [Slot<K, V>], list: &mut FreqList) -> Option<usize> {
        let idx = list.tail?;
        Self::list_remove(slots, list, idx);
        Some(idx)
    }

    /// Validate internal invariants (debug builds only).
    fn validate_invariants(&self) {
        #[cfg(debug_assertions)]
        {
            let mut total = 0usize;
            for (&freq, bucket) in &self.buckets {
                debug_assert!(bucket.len > 0, "empty bucket left behind at freq {freq}");
                let mut count = 0usize;
                let mut current = bucket.head;
                while let Some(idx) = current {
                    let slot = &self.slots[idx];
                    let entry = slot.entry.as_ref().expect("lfu entry missing");
                    debug_assert_eq!(entry.freq, freq);
                    debug_assert_eq!(self.index.get(&entry.key), Some(&idx));
                    current = slot.next;
                    count += 1;
                    if count > self.index.len() {
                        panic!("cycle detected in freq {freq} bucket");
                    }
                }
                debug_assert_eq!(count, bucket.len);
                total += count;
            }
            debug_assert_eq!(total, self.index.len());
            debug_assert!(self.index.len() <= self.capacity);
            let expected_min = self.buckets.keys().copied().min().unwrap_or(0);
            debug_assert_eq!(self.min_freq, expected_min);
        }
    }
}

impl<K, V> CoreCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        LfuCache::insert(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        LfuCache::get(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        LfuCache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        LfuCache::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        LfuCache::capacity(self)
    }

    #[inline]
    fn clear(&mut self) {
        LfuCache::clear(self)
    }
}

impl<K, V> MutableCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        LfuCache::remove(self, key)
    }
}

impl<K, V> LfuCacheTrait<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn pop_lfu(&mut self) -> Option<(K, V)> {
        LfuCache::pop_lfu(self)
    }

    #[inline]
    fn peek_lfu(&self) -> Option<(&K, &V)> {
        LfuCache::peek_lfu(self)
    }

    #[inline]
    fn frequency(&self, key: &K) -> Option<u64> {
        LfuCache::frequency(self, key)
    }
}

/// Thread-safe LFU cache wrapper.
///
/// A single exclusive `parking_lot::Mutex` guards the whole core; `get`
/// restructures the frequency buckets, so every operation takes the lock
/// exclusively. Values are stored as `Arc<V>` so lookups hand out owned
/// handles without cloning the payload.
///
/// # Example
///
/// ```
/// use cachecore::policy::lfu::ConcurrentLfuCache;
///
/// let cache: ConcurrentLfuCache<u32, String> = ConcurrentLfuCache::new(100);
/// cache.insert(1, "value".to_string());
/// assert_eq!(*cache.get(&1).unwrap(), "value");
/// ```
#[cfg(feature = "concurrency")]
pub struct ConcurrentLfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    inner: Arc<Mutex<LfuCache<K, Arc<V>>>>,
}

// Manual Clone: a derived impl would demand V: Clone, but clones share the
// same underlying cache.
#[cfg(feature = "concurrency")]
impl<K, V> Clone for ConcurrentLfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn clone(&self) -> Self {
        ConcurrentLfuCache {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentLfuCache<K, V>
where
    K: Eq + Hash + Clone + Send,
    V: Send + Sync,
{
    /// Creates a new thread-safe LFU cache. Capacity 0 is valid.
    pub fn new(capacity: usize) -> Self {
        ConcurrentLfuCache {
            inner: Arc::new(Mutex::new(LfuCache::new(capacity))),
        }
    }

    /// Inserts a value, wrapping it in `Arc<V>` internally.
    pub fn insert(&self, key: K, value: V) -> Option<Arc<V>> {
        let value = Arc::new(value);
        self.inner.lock().insert(key, value)
    }

    /// Inserts a pre-wrapped `Arc<V>` directly.
    pub fn insert_arc(&self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        self.inner.lock().insert(key, value)
    }

    /// Gets a value by key, incrementing its frequency.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.inner.lock().get(key).map(Arc::clone)
    }

    /// Looks up a value without a frequency bump.
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        self.inner.lock().peek(key).map(Arc::clone)
    }

    /// Returns the access frequency recorded for a key.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.inner.lock().frequency(key)
    }

    /// Removes an entry and returns its `Arc<V>`.
    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        self.inner.lock().remove(key)
    }

    /// Removes and returns the least frequently used entry.
    pub fn pop_lfu(&self) -> Option<(K, Arc<V>)> {
        self.inner.lock().pop_lfu()
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns the maximum capacity.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Returns `true` if the key exists.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    /// Removes all entries.
    pub fn clear(&self) {
        self.inner.lock().clear()
    }

    /// Returns a snapshot of the operation counters.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> fmt::Debug for ConcurrentLfuCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.lock();
        f.debug_struct("ConcurrentLfuCache")
            .field("len", &cache.len())
            .field("capacity", &cache.capacity())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod correctness {
        use super::*;

        mod basic_behavior {
            use super::*;

            #[test]
            fn new_cache_is_empty() {
                let cache: LfuCache<i32, i32> = LfuCache::new(10);
                assert_eq!(cache.capacity(), 10);
                assert_eq!(cache.len(), 0);
                assert!(cache.is_empty());
            }

            #[test]
            fn insert_and_get_single_item() {
                let mut cache = LfuCache::new(5);
                assert_eq!(cache.insert(1, 100), None);
                assert_eq!(cache.get(&1), Some(&100));
                assert_eq!(cache.len(), 1);
            }

            #[test]
            fn get_missing_key_returns_none() {
                let mut cache = LfuCache::new(5);
                cache.insert(1, 100);
                assert_eq!(cache.get(&2), None);
            }

            #[test]
            fn insert_duplicate_key_updates_value() {
                let mut cache = LfuCache::new(5);
                assert_eq!(cache.insert(1, 100), None);
                assert_eq!(cache.insert(1, 200), Some(100));
                assert_eq!(cache.len(), 1);
                assert_eq!(cache.peek(&1), Some(&200));
            }

            #[test]
            fn update_increments_frequency() {
                // put on an existing key performs the same frequency bump as get
                let mut cache = LfuCache::new(5);
                cache.insert(1, 100);
                assert_eq!(cache.frequency(&1), Some(1));
                cache.insert(1, 200);
                assert_eq!(cache.frequency(&1), Some(2));
            }

            #[test]
            fn get_increments_frequency() {
                let mut cache = LfuCache::new(5);
                cache.insert(1, 100);
                cache.get(&1);
                cache.get(&1);
                assert_eq!(cache.frequency(&1), Some(3));
            }

            #[test]
            fn peek_and_contains_do_not_bump_frequency() {
                let mut cache = LfuCache::new(5);
                cache.insert(1, 100);
                cache.peek(&1);
                cache.contains(&1);
                assert_eq!(cache.frequency(&1), Some(1));
            }

            #[test]
            fn remove_existing_item() {
                let mut cache = LfuCache::new(5);
                cache.insert(1, 100);
                assert_eq!(cache.remove(&1), Some(100));
                assert!(cache.is_empty());
                assert_eq!(cache.remove(&1), None);
            }

            #[test]
            fn clear_empties_cache() {
                let mut cache = LfuCache::new(5);
                for i in 1..=3 {
                    cache.insert(i, i * 10);
                }
                cache.clear();
                assert_eq!(cache.len(), 0);
                // usable after clear
                cache.insert(7, 70);
                assert_eq!(cache.get(&7), Some(&70));
            }

            #[test]
            fn empty_cache_operations() {
                let mut cache: LfuCache<i32, i32> = LfuCache::new(5);
                assert_eq!(cache.get(&1), None);
                assert_eq!(cache.peek(&1), None);
                assert!(!cache.contains(&1));
                assert_eq!(cache.remove(&1), None);
                assert_eq!(cache.pop_lfu(), None);
                assert_eq!(cache.peek_lfu(), None);
                assert_eq!(cache.frequency(&1), None);
            }
        }

        mod eviction {
            use super::*;

            #[test]
            fn evicts_lowest_frequency() {
                let mut cache = LfuCache::new(2);
                cache.insert(1, 1);
                cache.insert(2, 2);
                assert_eq!(cache.get(&1), Some(&1)); // freq(1)=2, freq(2)=1

                cache.insert(3, 3); // evicts key 2
                assert_eq!(cache.get(&2), None);
                assert_eq!(cache.get(&3), Some(&3));
            }

            #[test]
            fn tie_break_evicts_least_recent() {
                let mut cache = LfuCache::new(3);
                cache.insert(1, "a");
                cache.insert(2, "b");
                cache.insert(3, "c");
                // All at freq 1; key 1 is the least recently touched
                cache.insert(4, "d");
                assert!(!cache.contains(&1));
                assert!(cache.contains(&2));
                assert!(cache.contains(&3));
            }

            #[test]
            fn lone_min_candidate_walkthrough() {
                // capacity 2: put(1,"A") put(2,"B"), get(1), put(3,"C")
                // evicts key 2 (only one left at min frequency)
                let mut cache = LfuCache::new(2);
                cache.insert(1, "A");
                cache.insert(2, "B");
                assert_eq!(cache.get(&1), Some(&"A"));
                cache.insert(3, "C");
                assert_eq!(cache.get(&2), None);
                assert_eq!(cache.get(&3), Some(&"C"));
            }

            #[test]
            fn fresh_insert_resets_min_frequency() {
                let mut cache = LfuCache::new(3);
                cache.insert(1, 1);
                cache.get(&1);
                cache.get(&1); // freq(1)=3
                cache.insert(2, 2); // min tier is 1 again
                assert_eq!(cache.peek_lfu().map(|(k, _)| *k), Some(2));
            }

            #[test]
            fn hot_key_survives_cold_churn() {
                let mut cache = LfuCache::new(3);
                cache.insert(0, 0);
                for _ in 0..5 {
                    cache.get(&0);
                }
                for i in 1..20 {
                    cache.insert(i, i);
                }
                assert!(cache.contains(&0));
                assert_eq!(cache.len(), 3);
            }

            #[test]
            fn pop_lfu_drains_by_frequency_then_recency() {
                let mut cache = LfuCache::new(4);
                cache.insert(1, 1);
                cache.insert(2, 2);
                cache.insert(3, 3);
                cache.get(&2); // freq(2)=2

                // freq-1 tier in recency order (oldest first): 1, 3
                assert_eq!(cache.pop_lfu(), Some((1, 1)));
                assert_eq!(cache.pop_lfu(), Some((3, 3)));
                assert_eq!(cache.pop_lfu(), Some((2, 2)));
                assert_eq!(cache.pop_lfu(), None);
            }

            #[test]
            fn peek_lfu_matches_next_pop() {
                let mut cache = LfuCache::new(4);
                cache.insert(1, 1);
                cache.insert(2, 2);
                cache.get(&1);
                let peeked = cache.peek_lfu().map(|(k, v)| (*k, *v));
                assert_eq!(peeked, cache.pop_lfu());
            }

            #[test]
            fn remove_from_min_tier_recomputes_minimum() {
                let mut cache = LfuCache::new(4);
                cache.insert(1, 1);
                cache.insert(2, 2);
                cache.get(&2);
                cache.get(&2); // freq(2)=3

                // Key 1 is the sole member of the minimum tier
                cache.remove(&1);
                assert_eq!(cache.peek_lfu().map(|(k, _)| *k), Some(2));
            }

            #[test]
            fn capacity_never_exceeded() {
                let mut cache = LfuCache::new(4);
                for i in 0..100 {
                    cache.insert(i % 7, i);
                    assert!(cache.len() <= 4);
                }
            }

            #[test]
            fn interleaved_walkthrough_capacity_two() {
                // put(1,1) put(2,2) get(1)=1 put(3,3) evicts 2; get(3)=3
                let mut cache = LfuCache::new(2);
                cache.insert(1, 1);
                cache.insert(2, 2);
                assert_eq!(cache.get(&1), Some(&1));
                cache.insert(3, 3);
                assert_eq!(cache.get(&2), None);
                assert_eq!(cache.get(&3), Some(&3));
            }
        }

        mod edge_cases {
            use super::*;

            #[test]
            fn zero_capacity_stores_nothing() {
                let mut cache: LfuCache<i32, i32> = LfuCache::new(0);
                assert_eq!(cache.insert(1, 1), None);
                assert_eq!(cache.get(&1), None);
                assert_eq!(cache.len(), 0);
                assert_eq!(cache.pop_lfu(), None);
            }

            #[test]
            fn single_slot_cache() {
                let mut cache = LfuCache::new(1);
                cache.insert(1, 100);
                cache.insert(2, 200);
                assert_eq!(cache.len(), 1);
                assert!(!cache.contains(&1));
                assert_eq!(cache.get(&2), Some(&200));
            }

            #[test]
            fn slot_reuse_after_churn() {
                let mut cache = LfuCache::new(2);
                for i in 0..50 {
                    cache.insert(i, i);
                }
                // Slab never grows past capacity plus transient churn
                assert!(cache.slots.len() <= 3);
                assert_eq!(cache.len(), 2);
            }

            #[test]
            fn string_keys() {
                let mut cache: LfuCache<String, i32> = LfuCache::new(2);
                cache.insert("a".to_string(), 1);
                cache.insert("b".to_string(), 2);
                cache.get(&"a".to_string());
                cache.insert("c".to_string(), 3);
                assert!(!cache.contains(&"b".to_string()));
                assert!(cache.contains(&"a".to_string()));
            }
        }

        mod stats {
            use super::*;

            #[test]
            fn counters_track_operations() {
                let mut cache = LfuCache::new(2);
                cache.insert(1, 1);
                cache.insert(2, 2);
                cache.insert(2, 22);
                cache.get(&2);
                cache.get(&99);
                cache.insert(3, 3); // evicts 1

                let stats = cache.stats();
                assert_eq!(stats.insertions(), 3);
                assert_eq!(stats.updates(), 1);
                assert_eq!(stats.evictions(), 1);
                assert_eq!(stats.hits(), 1);
                assert_eq!(stats.misses(), 1);
            }
        }

        mod trait_objects {
            use super::*;

            #[test]
            fn works_through_lfu_trait_bound() {
                fn coldest<C: LfuCacheTrait<u32, u32>>(cache: &C) -> Option<u32> {
                    cache.peek_lfu().map(|(k, _)| *k)
                }
                let mut cache = LfuCache::new(4);
                cache.insert(1, 1);
                cache.insert(2, 2);
                cache.get(&1);
                assert_eq!(coldest(&cache), Some(2));
            }

            #[test]
            fn remove_batch_reports_in_order() {
                let mut cache = LfuCache::new(4);
                cache.insert(1, 10);
                cache.insert(2, 20);
                let removed = cache.remove_batch(&[2, 9]);
                assert_eq!(removed, vec![Some(20), None]);
            }
        }
    }

    #[cfg(feature = "concurrency")]
    mod concurrent {
        use super::*;

        #[test]
        fn insert_get_roundtrip() {
            let cache: ConcurrentLfuCache<u32, String> = ConcurrentLfuCache::new(4);
            assert!(cache.insert(1, "one".to_string()).is_none());
            assert_eq!(*cache.get(&1).unwrap(), "one");
            assert_eq!(cache.frequency(&1), Some(2));
        }

        #[test]
        fn eviction_applies_under_wrapper() {
            let cache: ConcurrentLfuCache<u32, u32> = ConcurrentLfuCache::new(2);
            cache.insert(1, 1);
            cache.insert(2, 2);
            cache.get(&1);
            cache.insert(3, 3);
            assert!(cache.contains(&1));
            assert!(!cache.contains(&2));
        }

        #[test]
        fn clone_shares_state() {
            let cache: ConcurrentLfuCache<u32, u32> = ConcurrentLfuCache::new(4);
            let other = cache.clone();
            cache.insert(1, 10);
            assert_eq!(other.get(&1).map(|v| *v), Some(10));
        }
    }
}
