//! Process-lifetime cache holding the last good value per integration.
//!
//! One slot per key and no eviction: the key space is a handful of fixed
//! integrations. Concurrent writers race with last-writer-wins semantics.

use std::collections::HashMap;
use std::hash::Hash;

use parking_lot::RwLock;

#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    pub value: V,
    /// Epoch seconds of the upstream fetch that produced `value`.
    pub fetched_at: i64,
}

impl<V> CacheEntry<V> {
    pub fn is_fresh(&self, now: i64, ttl_secs: i64) -> bool {
        now - self.fetched_at < ttl_secs
    }

    /// Seconds of freshness left, zero once stale.
    pub fn remaining(&self, now: i64, ttl_secs: i64) -> i64 {
        (ttl_secs - (now - self.fetched_at)).max(0)
    }
}

pub struct TtlCache<K, V> {
    entries: RwLock<HashMap<K, CacheEntry<V>>>,
}

impl<K, V> Default for TtlCache<K, V> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &K) -> Option<CacheEntry<V>> {
        self.entries.read().get(key).cloned()
    }

    pub fn set(&self, key: K, value: V, now: i64) {
        self.entries.write().insert(
            key,
            CacheEntry {
                value,
                fetched_at: now,
            },
        );
    }

    /// The cached value if it is still within `ttl_secs`.
    pub fn get_fresh(&self, key: &K, now: i64, ttl_secs: i64) -> Option<CacheEntry<V>> {
        self.get(key).filter(|entry| entry.is_fresh(now, ttl_secs))
    }
}
