//! Cache eviction policies.
//!
//! Each policy is a self-contained single-threaded core; the policies share
//! the trait surface in [`crate::traits`] but deliberately no internal code,
//! so each file can be read (and audited) on its own.

pub mod lfu;
pub mod lru;
pub mod ttl_lru;
