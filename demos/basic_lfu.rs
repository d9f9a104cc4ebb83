use cachecore::policy::lfu::LfuCache;

fn main() {
    let mut cache: LfuCache<u32, String> = LfuCache::new(2);

    cache.insert(1, "alpha".to_string());
    cache.insert(2, "beta".to_string());

    // Key 1 reaches frequency 3, key 2 stays at 1
    cache.get(&1);
    cache.get(&1);

    cache.insert(3, "gamma".to_string());

    println!("contains 1? {}", cache.contains(&1));
    println!("contains 2? {}", cache.contains(&2));
    println!("frequency of 3: {:?}", cache.frequency(&3));
}

// Expected output:
// contains 1? true
// contains 2? false
// frequency of 3: Some(1)
//
// Explanation: capacity=2; key 2 holds the lowest frequency when key 3
// arrives, so key 2 is evicted. A fresh insert always starts at frequency 1.
