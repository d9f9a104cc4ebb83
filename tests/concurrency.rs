//! Thread-safety smoke tests for the mutex-wrapped cache handles.

#![cfg(feature = "concurrency")]

use std::sync::Arc;
use std::thread;

use cachecore::policy::lfu::ConcurrentLfuCache;
use cachecore::policy::lru::ConcurrentLruCache;

const THREADS: usize = 8;
const OPS_PER_THREAD: u64 = 500;

#[test]
fn lru_survives_concurrent_churn() {
    const CAPACITY: usize = 64;
    let cache: ConcurrentLruCache<u64, u64> = ConcurrentLruCache::new(CAPACITY);

    let handles: Vec<_> = (0..THREADS as u64)
        .map(|t| {
            let cache = cache.clone();
            thread::spawn(move || {
                for i in 0..OPS_PER_THREAD {
                    let key = (t * OPS_PER_THREAD + i) % 200;
                    cache.insert(key, key * 2);
                    if let Some(value) = cache.get(&key) {
                        assert_eq!(*value, key * 2);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert!(cache.len() <= CAPACITY);
    assert!(!cache.is_empty());
}

#[test]
fn lfu_survives_concurrent_churn() {
    const CAPACITY: usize = 64;
    let cache: ConcurrentLfuCache<u64, u64> = ConcurrentLfuCache::new(CAPACITY);

    let handles: Vec<_> = (0..THREADS as u64)
        .map(|t| {
            let cache = cache.clone();
            thread::spawn(move || {
                for i in 0..OPS_PER_THREAD {
                    let key = (t * OPS_PER_THREAD + i) % 200;
                    cache.insert(key, key + 1);
                    if let Some(value) = cache.get(&key) {
                        assert_eq!(*value, key + 1);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert!(cache.len() <= CAPACITY);
}

#[test]
fn shared_value_handles_outlive_eviction() {
    let cache: ConcurrentLruCache<u32, Vec<u8>> = ConcurrentLruCache::new(1);
    cache.insert(1, vec![1, 2, 3]);
    let held: Arc<Vec<u8>> = cache.get(&1).unwrap();
    cache.insert(2, vec![4, 5, 6]); // evicts key 1
    assert!(cache.get(&1).is_none());
    // The Arc handed out earlier keeps the evicted value alive
    assert_eq!(*held, vec![1, 2, 3]);
}

#[test]
fn clones_share_one_cache() {
    let cache: ConcurrentLfuCache<u32, &str> = ConcurrentLfuCache::new(8);
    let other = cache.clone();
    cache.insert(1, "via-original");
    assert_eq!(other.get(&1).as_deref(), Some(&"via-original"));
    other.clear();
    assert!(cache.is_empty());
}
