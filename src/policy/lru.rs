//! # Least Recently Used (LRU) Cache
//!
//! A bounded key-value cache that evicts the least recently accessed entry
//! when capacity is exceeded. Built from a hash index plus a doubly linked
//! list ordered by recency.
//!
//! ## Architecture
//!
//! ```text
//!   ┌────────────────────────────────────────────────────────────────────┐
//!   │                         LruCache<K, V>                             │
//!   │                                                                    │
//!   │   ┌──────────────────────────────────────────────────────────┐    │
//!   │   │  FxHashMap<K, NonNull<Node>>  (non-owning lookup index)  │    │
//!   │   └────────────────────────────┬─────────────────────────────┘    │
//!   │                                │                                  │
//!   │   ┌────────────────────────────┼─────────────────────────────┐    │
//!   │   │  Recency list              ▼                              │   │
//!   │   │                                                           │   │
//!   │   │  [head]◄──►[A]◄──►[B]◄──►[C]◄──►[tail]                    │   │
//!   │   │  sentinel  MRU           LRU     sentinel                 │   │
//!   │   └───────────────────────────────────────────────────────────┘   │
//!   └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The two sentinel nodes are permanent, hold no user data, and are never
//! exposed to callers. Because every data node always has a live neighbor on
//! both sides, detach/attach never branch on list boundaries.
//!
//! ## Operations
//!
//! | Method           | Complexity | Description                               |
//! |------------------|------------|-------------------------------------------|
//! | `new(capacity)`  | O(1)       | Create cache; panics on capacity 0        |
//! | `try_new(cap)`   | O(1)       | Fallible variant returning `ConfigError`  |
//! | `insert(k, v)`   | O(1)*      | Insert or update, may evict LRU           |
//! | `get(&k)`        | O(1)       | Get value, moves entry to MRU position    |
//! | `peek(&k)`       | O(1)       | Get value without affecting LRU order     |
//! | `contains(&k)`   | O(1)       | Check if key exists                       |
//! | `remove(&k)`     | O(1)       | Remove entry by key                       |
//! | `pop_lru()`      | O(1)       | Remove and return least recently used     |
//! | `peek_lru()`     | O(1)       | Peek at LRU entry without removing        |
//! | `touch(&k)`      | O(1)       | Move to MRU without returning value       |
//! | `recency_rank()` | O(n)       | Position in recency order (0 = MRU)       |
//! | `clear()`        | O(n)       | Remove all entries                        |
//!
//! ## Safety
//!
//! Nodes are heap-allocated and reached through `NonNull` pointers owned by
//! the list; the hash index holds only non-owning copies of those pointers.
//! Key and value slots in the sentinels stay uninitialized (`MaybeUninit`)
//! for the lifetime of the cache, so every `assume_init` site must be
//! reachable only through data nodes. The `Drop` impl walks the list and
//! frees every node, sentinels last.
//!
//! ## Thread Safety
//!
//! `LruCache` is **not** thread-safe; every operation needs `&mut self`.
//! [`ConcurrentLruCache`] (feature `concurrency`) wraps the core in a single
//! exclusive `parking_lot::Mutex` — `get` reorders the list, so even reads
//! mutate and a reader-writer split would buy nothing.

use std::fmt;
use std::hash::Hash;
use std::mem::MaybeUninit;
use std::ptr::NonNull;

#[cfg(feature = "concurrency")]
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::error::ConfigError;
use crate::stats::CacheStats;
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// Node in the recency list.
///
/// `key` and `value` are `MaybeUninit` so the same layout serves both data
/// nodes (initialized) and the two sentinels (never initialized).
struct Node<K, V> {
    prev: NonNull<Node<K, V>>,
    next: NonNull<Node<K, V>>,
    key: MaybeUninit<K>,
    value: MaybeUninit<V>,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Self {
        Node {
            prev: NonNull::dangling(),
            next: NonNull::dangling(),
            key: MaybeUninit::new(key),
            value: MaybeUninit::new(value),
        }
    }

    fn sentinel() -> Self {
        Node {
            prev: NonNull::dangling(),
            next: NonNull::dangling(),
            key: MaybeUninit::uninit(),
            value: MaybeUninit::uninit(),
        }
    }
}

/// Bounded LRU cache: hash index + sentinel-delimited recency list.
///
/// All mutating operations run to completion synchronously; the cache is the
/// sole owner of its entries and no caller ever holds a reference to an
/// internal node.
///
/// # Example
///
/// ```
/// use cachecore::policy::lru::LruCache;
///
/// let mut cache: LruCache<u32, String> = LruCache::new(2);
/// cache.insert(1, "one".to_string());
/// cache.insert(2, "two".to_string());
///
/// // Touching key 1 makes key 2 the eviction candidate
/// cache.get(&1);
/// cache.insert(3, "three".to_string());
///
/// assert!(cache.contains(&1));
/// assert!(!cache.contains(&2));
/// ```
pub struct LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    map: FxHashMap<K, NonNull<Node<K, V>>>,
    /// Sentinel; `head.next` is the MRU data node (or `tail` when empty).
    head: NonNull<Node<K, V>>,
    /// Sentinel; `tail.prev` is the LRU data node (or `head` when empty).
    tail: NonNull<Node<K, V>>,
    capacity: usize,
    stats: CacheStats,
}

// SAFETY: the raw pointers only reference heap nodes owned by this struct,
// so sending the whole cache moves exclusive ownership of every node.
unsafe impl<K, V> Send for LruCache<K, V>
where
    K: Eq + Hash + Clone + Send,
    V: Send,
{
}

// SAFETY: all mutation requires &mut self; shared references only permit
// reads of node contents.
unsafe impl<K, V> Sync for LruCache<K, V>
where
    K: Eq + Hash + Clone + Sync,
    V: Sync,
{
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a new LRU cache with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use [`try_new`](Self::try_new) to handle
    /// that case without panicking.
    ///
    /// # Example
    ///
    /// ```
    /// use cachecore::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u32, String> = LruCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// ```
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "LruCache capacity must be greater than zero");
        Self::with_capacity_unchecked(capacity)
    }

    /// Creates a new LRU cache, rejecting a zero capacity with [`ConfigError`].
    ///
    /// # Example
    ///
    /// ```
    /// use cachecore::policy::lru::LruCache;
    ///
    /// assert!(LruCache::<u32, u32>::try_new(8).is_ok());
    /// assert!(LruCache::<u32, u32>::try_new(0).is_err());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("LruCache capacity must be greater than zero"));
        }
        Ok(Self::with_capacity_unchecked(capacity))
    }

    fn with_capacity_unchecked(capacity: usize) -> Self {
        let head = NonNull::from(Box::leak(Box::new(Node::sentinel())));
        let tail = NonNull::from(Box::leak(Box::new(Node::sentinel())));
        // SAFETY: both sentinels were just allocated and are exclusively ours.
        unsafe {
            (*head.as_ptr()).next = tail;
            (*tail.as_ptr()).prev = head;
        }
        LruCache {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            head,
            tail,
            capacity,
            stats: CacheStats::default(),
        }
    }

    /// Inserts a key-value pair, returning the previous value if the key
    /// already existed.
    ///
    /// An existing key is updated in place and moved to the MRU position. A
    /// new key is inserted at the MRU position, evicting the LRU entry first
    /// if the cache is full. Never fails.
    ///
    /// # Example
    ///
    /// ```
    /// use cachecore::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(10);
    /// assert_eq!(cache.insert(1, "first"), None);
    /// assert_eq!(cache.insert(1, "second"), Some("first"));
    /// assert_eq!(cache.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&node_ptr) = self.map.get(&key) {
            self.stats.record_update();
            // SAFETY: pointers in the map always reference live data nodes.
            let previous = unsafe {
                let node = &mut *node_ptr.as_ptr();
                std::mem::replace(node.value.assume_init_mut(), value)
            };
            self.detach(node_ptr);
            self.attach_front(node_ptr);
            self.validate_invariants();
            return Some(previous);
        }

        if self.map.len() >= self.capacity {
            if let Some(node) = self.pop_back() {
                let (evicted_key, _evicted_value) = Self::into_entry(node);
                self.map.remove(&evicted_key);
                self.stats.record_eviction();
            }
        }

        let node_ptr = NonNull::from(Box::leak(Box::new(Node::new(key.clone(), value))));
        self.map.insert(key, node_ptr);
        self.attach_front(node_ptr);
        self.stats.record_insertion();
        self.validate_invariants();
        None
    }

    /// Gets a value by key, marking the entry most recently used.
    ///
    /// A missing key is a defined outcome (`None`), never an error, and has
    /// no side effect on the recency order.
    ///
    /// # Example
    ///
    /// ```
    /// use cachecore::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(10);
    /// cache.insert(1, "value");
    ///
    /// assert_eq!(cache.get(&1), Some(&"value"));
    /// assert_eq!(cache.get(&99), None);
    /// ```
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let node_ptr = match self.map.get(key) {
            Some(&ptr) => ptr,
            None => {
                self.stats.record_miss();
                return None;
            },
        };
        self.stats.record_hit();

        self.detach(node_ptr);
        self.attach_front(node_ptr);
        self.validate_invariants();

        // SAFETY: node is a live data node; the borrow is tied to &mut self.
        unsafe { Some((*node_ptr.as_ptr()).value.assume_init_ref()) }
    }

    /// Read-only lookup without updating the recency order.
    ///
    /// # Example
    ///
    /// ```
    /// use cachecore::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(2);
    /// cache.insert(1, "first");
    /// cache.insert(2, "second");
    ///
    /// // Peek leaves key 1 as the LRU entry
    /// assert_eq!(cache.peek(&1), Some(&"first"));
    /// cache.insert(3, "third");
    /// assert!(!cache.contains(&1));
    /// ```
    #[inline]
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.map.get(key).map(|&node_ptr| {
            // SAFETY: pointers in the map always reference live data nodes.
            unsafe { (*node_ptr.as_ptr()).value.assume_init_ref() }
        })
    }

    /// Checks if a key exists without updating the recency order.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Removes an entry by key, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let node_ptr = self.map.remove(key)?;
        self.detach(node_ptr);
        // SAFETY: the node was detached and its map entry removed; we hold
        // the only remaining pointer to it.
        let node = unsafe { Box::from_raw(node_ptr.as_ptr()) };
        let (_key, value) = Self::into_entry(node);
        self.validate_invariants();
        Some(value)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let node = self.pop_back()?;
        let (key, value) = Self::into_entry(node);
        self.map.remove(&key);
        self.validate_invariants();
        Some((key, value))
    }

    /// Peeks at the least recently used entry without removing it.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        // SAFETY: tail is a valid sentinel; its prev is either the head
        // sentinel (empty cache) or a live data node.
        unsafe {
            let last = self.tail.as_ref().prev;
            if last == self.head {
                return None;
            }
            let node = last.as_ref();
            Some((node.key.assume_init_ref(), node.value.assume_init_ref()))
        }
    }

    /// Marks an entry as recently used without retrieving the value.
    ///
    /// Returns `true` if the key was found.
    pub fn touch(&mut self, key: &K) -> bool {
        if let Some(&node_ptr) = self.map.get(key) {
            self.detach(node_ptr);
            self.attach_front(node_ptr);
            self.validate_invariants();
            true
        } else {
            false
        }
    }

    /// Gets the recency rank of a key (0 = MRU). O(n) list walk.
    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        let &target_ptr = self.map.get(key)?;
        let mut rank = 0usize;
        // SAFETY: the walk follows list links from one sentinel to the other;
        // every pointer on the way is live.
        let mut current = unsafe { self.head.as_ref().next };
        while current != self.tail {
            if current == target_ptr {
                return Some(rank);
            }
            rank += 1;
            current = unsafe { current.as_ref().next };
        }
        None
    }

    /// Returns the current number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the maximum capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes all entries. Capacity and statistics are retained.
    pub fn clear(&mut self) {
        while let Some(node) = self.pop_back() {
            let _ = Self::into_entry(node);
        }
        self.map.clear();
        self.validate_invariants();
    }

    /// Returns a snapshot of this cache's operation counters.
    #[inline]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Unlink a data node from the list without freeing it.
    #[inline(always)]
    fn detach(&mut self, node_ptr: NonNull<Node<K, V>>) {
        // SAFETY: data nodes always sit between two live neighbors thanks to
        // the sentinels, so no boundary cases exist.
        unsafe {
            let node = node_ptr.as_ref();
            let prev = node.prev;
            let next = node.next;
            (*prev.as_ptr()).next = next;
            (*next.as_ptr()).prev = prev;
        }
    }

    /// Link a node immediately after the head sentinel (MRU position).
    #[inline(always)]
    fn attach_front(&mut self, node_ptr: NonNull<Node<K, V>>) {
        // SAFETY: head is a valid sentinel and head.next is always live.
        unsafe {
            let first = self.head.as_ref().next;
            let node = &mut *node_ptr.as_ptr();
            node.prev = self.head;
            node.next = first;
            (*self.head.as_ptr()).next = node_ptr;
            (*first.as_ptr()).prev = node_ptr;
        }
    }

    /// Unlink and take ownership of the node before the tail sentinel.
    #[inline(always)]
    fn pop_back(&mut self) -> Option<Box<Node<K, V>>> {
        // SAFETY: tail.prev is either the head sentinel (empty) or a live
        // data node; after detach we hold the only pointer to it.
        unsafe {
            let last = self.tail.as_ref().prev;
            if last == self.head {
                return None;
            }
            self.detach(last);
            Some(Box::from_raw(last.as_ptr()))
        }
    }

    /// Extract key and value from an owned data node.
    fn into_entry(node: Box<Node<K, V>>) -> (K, V) {
        let node = *node;
        // SAFETY: only data nodes are handed out of the list; sentinels stay
        // inside the cache until Drop.
        unsafe { (node.key.assume_init(), node.value.assume_init()) }
    }

    /// Validate internal invariants (debug builds only).
    fn validate_invariants(&self) {
        #[cfg(debug_assertions)]
        {
            let mut count = 0usize;
            // SAFETY: walk follows list links between the two sentinels.
            let mut current = unsafe { self.head.as_ref().next };
            while current != self.tail {
                unsafe {
                    let node = current.as_ref();
                    debug_assert!(self.map.contains_key(node.key.assume_init_ref()));
                    current = node.next;
                }
                count += 1;
                if count > self.map.len() {
                    panic!("cycle detected in LRU list");
                }
            }
            debug_assert_eq!(count, self.map.len());
            debug_assert!(self.map.len() <= self.capacity);
        }
    }
}

impl<K, V> Drop for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn drop(&mut self) {
        while let Some(node) = self.pop_back() {
            let _ = Self::into_entry(node);
        }
        // SAFETY: the list is now empty; only the sentinels remain, their
        // key/value slots were never initialized so the Box drop is trivial.
        unsafe {
            drop(Box::from_raw(self.head.as_ptr()));
            drop(Box::from_raw(self.tail.as_ptr()));
        }
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LRU cache with a default capacity of 16.
    fn default() -> Self {
        Self::new(16)
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        LruCache::insert(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        LruCache::get(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        LruCache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        LruCache::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        LruCache::capacity(self)
    }

    #[inline]
    fn clear(&mut self) {
        LruCache::clear(self)
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        LruCache::remove(self, key)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn pop_lru(&mut self) -> Option<(K, V)> {
        LruCache::pop_lru(self)
    }

    #[inline]
    fn peek_lru(&self) -> Option<(&K, &V)> {
        LruCache::peek_lru(self)
    }

    #[inline]
    fn touch(&mut self, key: &K) -> bool {
        LruCache::touch(self, key)
    }

    #[inline]
    fn recency_rank(&self, key: &K) -> Option<usize> {
        LruCache::recency_rank(self, key)
    }
}

/// Thread-safe LRU cache wrapper.
///
/// A single exclusive `parking_lot::Mutex` guards the whole core, preserving
/// the amortized O(1) cost per operation under serialized access. Values are
/// stored as `Arc<V>` so lookups can hand out owned handles without cloning
/// the payload or holding the lock.
///
/// # Example
///
/// ```
/// use cachecore::policy::lru::ConcurrentLruCache;
///
/// let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::new(100);
/// cache.insert(1, "value".to_string());
///
/// let value = cache.get(&1).unwrap();
/// assert_eq!(*value, "value");
/// ```
#[cfg(feature = "concurrency")]
pub struct ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    inner: Arc<Mutex<LruCache<K, Arc<V>>>>,
}

// Manual Clone: a derived impl would demand V: Clone, but clones share the
// same underlying cache.
#[cfg(feature = "concurrency")]
impl<K, V> Clone for ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn clone(&self) -> Self {
        ConcurrentLruCache {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone + Send,
    V: Send + Sync,
{
    /// Creates a new thread-safe LRU cache.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; see [`try_new`](Self::try_new).
    pub fn new(capacity: usize) -> Self {
        ConcurrentLruCache {
            inner: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// Fallible constructor rejecting a zero capacity.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(ConcurrentLruCache {
            inner: Arc::new(Mutex::new(LruCache::try_new(capacity)?)),
        })
    }

    /// Inserts a value, wrapping it in `Arc<V>` internally.
    ///
    /// Returns the previous `Arc<V>` if the key existed.
    pub fn insert(&self, key: K, value: V) -> Option<Arc<V>> {
        let value = Arc::new(value);
        self.inner.lock().insert(key, value)
    }

    /// Inserts a pre-wrapped `Arc<V>` directly.
    pub fn insert_arc(&self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        self.inner.lock().insert(key, value)
    }

    /// Gets a value by key, moving it to the MRU position.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.inner.lock().get(key).map(Arc::clone)
    }

    /// Looks up a value without affecting the recency order.
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        self.inner.lock().peek(key).map(Arc::clone)
    }

    /// Removes an entry and returns its `Arc<V>`.
    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        self.inner.lock().remove(key)
    }

    /// Marks an entry as recently used; returns `true` if it existed.
    pub fn touch(&self, key: &K) -> bool {
        self.inner.lock().touch(key)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&self) -> Option<(K, Arc<V>)> {
        self.inner.lock().pop_lru()
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
impl<K, V> fmt::Debug for ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.lock();
        f.debug_struct("ConcurrentLruCache")
            .field("len", &cache.len())
            .field("capacity", &cache.capacity())
            .finish_non_exhaustive()
    }
}
