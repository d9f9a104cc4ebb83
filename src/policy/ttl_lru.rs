//! # LRU Cache with TTL expiration
//!
//! [`TtlLruCache`] combines LRU eviction with a per-entry time-to-live.
//! Expired entries behave as absent from the caller's perspective and are
//! reclaimed lazily: every mutating operation first drains a min-heap of
//! expiry deadlines before touching the recency order or the capacity check,
//! so TTL expiry always wins over LRU eviction when both apply.
//!
//! ## Stale heap records
//!
//! Re-inserting a key pushes a fresh heap record; the old record for the
//! same key is now stale and must not expire the newer entry. Each update
//! stamps the entry with a monotonically increasing version, and a popped
//! heap record is acted on only when its version still matches the live
//! entry. A stale record is simply discarded.
//!
//! ```text
//!   insert(k, v, 10s)   heap: [(k, t+10s, ver=1)]         node ver=1
//!   insert(k, w, 60s)   heap: [(k, t+10s, ver=1),         node ver=2
//!                              (k, t+60s, ver=2)]
//!   t+10s: pop (k, ver=1) → live ver is 2 → stale, ignore
//!   t+60s: pop (k, ver=2) → match → expire k
//! ```
//!
//! Heap size is bounded by the number of inserts whose deadline has not yet
//! passed, and each record is popped exactly once, so the purge cost stays
//! amortized O(log n) per insert.
//!
//! ## Thread Safety
//!
//! `TtlLruCache` is **not** thread-safe; wrap it in a mutex for concurrent
//! use, as with the other policy cores.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt;
use std::hash::Hash;
use std::mem;
use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;

use crate::error::ConfigError;
use crate::stats::CacheStats;
use crate::traits::{CoreCache, MutableCache};

struct Node<K, V> {
    key: K,
    value: V,
    expires_at: Instant,
    version: u64,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Deadline record in the expiry heap.
///
/// Ordering looks at `(expires_at, version)` only; keys never need `Ord`.
struct ExpiryRecord<K> {
    expires_at: Instant,
    version: u64,
    key: K,
}

impl<K> PartialEq for ExpiryRecord<K> {
    fn eq(&self, other: &Self) -> bool {
        self.expires_at == other.expires_at && self.version == other.version
    }
}

impl<K> Eq for ExpiryRecord<K> {}

impl<K> PartialOrd for ExpiryRecord<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for ExpiryRecord<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.expires_at
            .cmp(&other.expires_at)
            .then(self.version.cmp(&other.version))
    }
}

/// Bounded LRU cache with per-entry time-to-live.
///
/// Entries are inserted with the cache's default TTL or an explicit one via
/// [`insert_with_ttl`](Self::insert_with_ttl). An expired entry is treated
/// as absent by every lookup even before it is physically reclaimed.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use cachecore::policy::ttl_lru::TtlLruCache;
///
/// let mut cache: TtlLruCache<u32, &str> = TtlLruCache::new(16, Duration::from_secs(60));
/// cache.insert(1, "fresh");
/// assert_eq!(cache.get(&1), Some(&"fresh"));
/// assert!(cache.ttl_remaining(&1).unwrap() <= Duration::from_secs(60));
/// ```
pub struct TtlLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    nodes: Vec<Option<Node<K, V>>>,
    free_list: Vec<usize>,
    map: FxHashMap<K, usize>,
    /// MRU end of the recency list.
    head: Option<usize>,
    /// LRU end of the recency list.
    tail: Option<usize>,
    expiry: BinaryHeap<Reverse<ExpiryRecord<K>>>,
    next_version: u64,
    capacity: usize,
    default_ttl: Duration,
    stats: CacheStats,
}

impl<K, V> TtlLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a new TTL-LRU cache.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use [`try_new`](Self::try_new) to handle
    /// that case without panicking.
    pub fn new(capacity: usize, default_ttl: Duration) -> Self {
        assert!(capacity > 0, "TtlLruCache capacity must be greater than zero");
        Self::with_capacity_unchecked(capacity, default_ttl)
    }

    /// Fallible constructor rejecting a zero capacity.
    pub fn try_new(capacity: usize, default_ttl: Duration) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new(
                "TtlLruCache capacity must be greater than zero",
            ));
        }
        Ok(Self::with_capacity_unchecked(capacity, default_ttl))
    }

    fn with_capacity_unchecked(capacity: usize, default_ttl: Duration) -> Self {
        TtlLruCache {
            nodes: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            head: None,
            tail: None,
            expiry: BinaryHeap::new(),
            next_version: 0,
            capacity,
            default_ttl,
            stats: CacheStats::default(),
        }
    }

    /// Inserts a key-value pair with the cache's default TTL.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let ttl = self.default_ttl;
        self.insert_with_ttl(key, value, ttl)
    }

    /// Inserts a key-value pair with an explicit TTL.
    ///
    /// Expired entries are reclaimed before the capacity check, so a full
    /// cache with an expired member expires it rather than evicting a live
    /// LRU entry.
    pub fn insert_with_ttl(&mut self, key: K, value: V, ttl: Duration) -> Option<V> {
        let now = Instant::now();
        self.purge_expired_at(now);

        let expires_at = now + ttl;
        let version = self.next_version;
        self.next_version += 1;

        if let Some(&idx) = self.map.get(&key) {
            self.stats.record_update();
            let node = self.nodes[idx].as_mut().expect("ttl node missing");
            let previous = mem::replace(&mut node.value, value);
            node.expires_at = expires_at;
            node.version = version;
            self.detach(idx);
            self.attach_front(idx);
            self.expiry.push(Reverse(ExpiryRecord {
                expires_at,
                version,
                key,
            }));
            return Some(previous);
        }

        if self.map.len() >= self.capacity {
            if let Some(lru_idx) = self.tail {
                self.detach(lru_idx);
                let node = self.free_slot(lru_idx);
                self.map.remove(&node.key);
                self.stats.record_eviction();
            }
        }

        let idx = self.allocate_slot(Node {
            key: key.clone(),
            value,
            expires_at,
            version,
            prev: None,
            next: None,
        });
        self.map.insert(key.clone(), idx);
        self.attach_front(idx);
        self.expiry.push(Reverse(ExpiryRecord {
            expires_at,
            version,
            key,
        }));
        self.stats.record_insertion();
        None
    }

    /// Gets a value by key, marking the entry most recently used.
    ///
    /// An expired entry is a miss, not an error, and is reclaimed on the way.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let now = Instant::now();
        self.purge_expired_at(now);

        let idx = match self.map.get(key) {
            Some(&idx) => idx,
            None => {
                self.stats.record_miss();
                return None;
            },
        };

        // Purge already drained everything past its deadline; this guard only
        // matters if the clock advanced between the purge and the lookup.
        if self.nodes[idx].as_ref().expect("ttl node missing").expires_at <= now {
            self.map.remove(key);
            self.detach(idx);
            let _ = self.free_slot(idx);
            self.stats.record_expiration();
            self.stats.record_miss();
            return None;
        }

        self.stats.record_hit();
        self.detach(idx);
        self.attach_front(idx);
        self.nodes[idx].as_ref().map(|node| &node.value)
    }

    /// Read-only lookup without refreshing recency. Expired entries read as
    /// absent even before they are physically reclaimed.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let &idx = self.map.get(key)?;
        let node = self.nodes[idx].as_ref()?;
        if node.expires_at <= Instant::now() {
            return None;
        }
        Some(&node.value)
    }

    /// Checks liveness of a key: present and not expired.
    pub fn contains(&self, key: &K) -> bool {
        self.peek_node(key).is_some()
    }

    /// Time left until the entry expires, `None` for missing/expired keys.
    pub fn ttl_remaining(&self, key: &K) -> Option<Duration> {
        let node = self.peek_node(key)?;
        Some(node.expires_at.saturating_duration_since(Instant::now()))
    }

    /// Removes an entry by key. Returns `None` for missing or already
    /// expired entries (the slot is reclaimed either way).
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let idx = self.map.remove(key)?;
        self.detach(idx);
        let node = self.free_slot(idx);
        if node.expires_at <= Instant::now() {
            self.stats.record_expiration();
            return None;
        }
        Some(node.value)
    }

    /// Removes and returns the least recently used live entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        self.purge_expired_at(Instant::now());
        let idx = self.tail?;
        self.detach(idx);
        let node = self.free_slot(idx);
        self.map.remove(&node.key);
        Some((node.key, node.value))
    }

    /// Marks an entry as recently used; returns `true` if it is live.
    pub fn touch(&mut self, key: &K) -> bool {
        let now = Instant::now();
        self.purge_expired_at(now);
        if let Some(&idx) = self.map.get(key) {
            self.detach(idx);
            self.attach_front(idx);
            true
        } else {
            false
        }
    }

    /// Eagerly reclaims every expired entry, returning how many were removed.
    ///
    /// Reclamation otherwise happens lazily at the start of each mutating
    /// operation; call this to bound memory between long idle stretches.
    pub fn purge_expired(&mut self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    /// Number of entries currently held, including expired entries that have
    /// not been reclaimed yet (see [`purge_expired`](Self::purge_expired)).
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the cache holds no entries at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the maximum capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the TTL applied by [`insert`](Self::insert).
    #[inline]
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Removes all entries and pending expiry records.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free_list.clear();
        self.map.clear();
        self.head = None;
        self.tail = None;
        self.expiry.clear();
    }

    /// Returns a snapshot of this cache's operation counters.
    #[inline]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    fn peek_node(&self, key: &K) -> Option<&Node<K, V>> {
        let &idx = self.map.get(key)?;
        let node = self.nodes[idx].as_ref()?;
        if node.expires_at <= Instant::now() {
            return None;
        }
        Some(node)
    }

    fn purge_expired_at(&mut self, now: Instant) -> usize {
        let mut removed = 0usize;
        loop {
            match self.expiry.peek() {
                Some(Reverse(record)) if record.expires_at <= now => {},
                _ => break,
            }
            let record = match self.expiry.pop() {
                Some(Reverse(record)) => record,
                None => break,
            };
            if let Some(&idx) = self.map.get(&record.key) {
                let version = self.nodes[idx].as_ref().expect("ttl node missing").version;
                // A mismatched version means the key was re-inserted after
                // this record was queued; the record is stale.
                if version == record.version {
                    self.map.remove(&record.key);
                    self.detach(idx);
                    let _ = self.free_slot(idx);
                    self.stats.record_expiration();
                    removed += 1;
                }
            }
        }
        removed
    }

    fn allocate_slot(&mut self, node: Node<K, V>) -> usize {
        if let Some(idx) = self.free_list.pop() {
            self.nodes[idx] = Some(node);
            idx
        } else {
            self.nodes.push(Some(node));
            self.nodes.len() - 1
        }
    }

    fn free_slot(&mut self, idx: usize) -> Node<K, V> {
        let node = self.nodes[idx].take().expect("ttl node missing");
        self.free_list.push(idx);
        node
    }

    fn detach(&mut self, idx: usize) {
        let (prev, next) = {
            let node = self.nodes[idx].as_ref().expect("ttl node missing");
            (node.prev, node.next)
        };
        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = self.nodes[prev_idx].as_mut() {
                    prev_node.next = next;
                }
            },
            None => self.head = next,
        }
        match next {
            Some(next_idx) => {
                if let Some(next_node) = self.nodes[next_idx].as_mut() {
                    next_node.prev = prev;
                }
            },
            None => self.tail = prev,
        }
        if let Some(node) = self.nodes[idx].as_mut() {
            node.prev = None;
            node.next = None;
        }
    }

    fn attach_front(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(node) = self.nodes[idx].as_mut() {
            node.prev = None;
            node.next = old_head;
        }
        if let Some(head_idx) = old_head {
            if let Some(head_node) = self.nodes[head_idx].as_mut() {
                head_node.prev = Some(idx);
            }
        } else {
            self.tail = Some(idx);
        }
        self.head = Some(idx);
    }
}

impl<K, V> fmt::Debug for TtlLruCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtlLruCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

impl<K, V> CoreCache<K, V> for TtlLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Inserts with the cache's default TTL.
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        TtlLruCache::insert(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        TtlLruCache::get(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        TtlLruCache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        TtlLruCache::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        TtlLruCache::capacity(self)
    }

    #[inline]
    fn clear(&mut self) {
        TtlLruCache::clear(self)
    }
}

impl<K, V> MutableCache<K, V> for TtlLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        TtlLruCache::remove(self, key)
    }
}
