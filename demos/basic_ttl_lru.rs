use std::thread::sleep;
use std::time::Duration;

use cachecore::policy::ttl_lru::TtlLruCache;

fn main() {
    let mut cache: TtlLruCache<u32, String> =
        TtlLruCache::new(4, Duration::from_millis(100));

    cache.insert(1, "ephemeral".to_string());
    cache.insert_with_ttl(2, "durable".to_string(), Duration::from_secs(60));

    println!("fresh 1: {:?}", cache.get(&1).is_some());

    sleep(Duration::from_millis(150));

    println!("after ttl 1: {:?}", cache.get(&1).is_some());
    println!("after ttl 2: {:?}", cache.get(&2).is_some());
    println!("expirations: {}", cache.stats().expirations());
}

// Expected output:
// fresh 1: true
// after ttl 1: false
// after ttl 2: true
// expirations: 1
//
// Explanation: key 1 uses the 100ms default TTL and expires during the
// sleep; key 2 carries an explicit 60s TTL and survives.
