//! LRU (Least Recently Used) cache implementation
//!
//! A key table maps each key to a handle in the ordered index; the index keeps
//! entries in recency order so the least recently used one is evicted in O(1).

use std::hash::Hash;
use tracing::{debug, trace};

use crate::config::CacheConfig;
use crate::error::Result;
use crate::list::OrderedIndex;
use crate::stats::CacheStats;
use crate::table::KeyTable;

/// Upper bound on slots reserved up front; larger caches grow on demand
const MAX_PREALLOC: usize = 64 * 1024;

/// LRU cache with fixed capacity
#[derive(Debug)]
pub struct LruCache<K, V> {
    table: KeyTable<K>,
    index: OrderedIndex<K, V>,
    stats: CacheStats,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new LRU cache with the given capacity
    ///
    /// # Errors
    /// [`Error::InvalidCapacity`](crate::Error::InvalidCapacity) if `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_config(CacheConfig::new(capacity))
    }

    /// Create a new LRU cache from a validated config
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            capacity = config.capacity,
            max_capacity = ?config.max_capacity,
            "creating LRU cache"
        );

        // One extra slot: a new key is linked before the LRU entry is evicted.
        let prealloc = config.capacity.saturating_add(1).min(MAX_PREALLOC);
        Ok(Self {
            table: KeyTable::with_capacity(prealloc),
            index: OrderedIndex::with_capacity(prealloc),
            stats: CacheStats::new(),
            capacity: config.capacity,
        })
    }

    /// Get a value from the cache, marking it most recently used
    ///
    /// A miss returns `None` and leaves every entry's recency untouched.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let Some(handle) = self.table.get(key) else {
            self.stats.record_miss();
            return None;
        };

        self.stats.record_hit();
        self.index.promote(handle);
        trace!(len = self.index.len(), "promoted entry on get");
        self.index.get(handle).map(|(_, value)| value)
    }

    /// Insert or update a key-value pair, marking it most recently used
    ///
    /// Inserting a new key into a full cache evicts the least recently used
    /// entry, which is returned. Updating an existing key never evicts.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(handle) = self.table.get(&key) {
            if let Some(slot) = self.index.get_mut(handle) {
                *slot = value;
            }
            self.index.promote(handle);
            self.stats.record_update();
            trace!(len = self.index.len(), "promoted entry on update");
            return None;
        }

        let handle = self.index.push_most_recent(key.clone(), value);
        self.table.set(key, handle);
        self.stats.record_insert();

        if self.index.len() > self.capacity {
            self.evict()
        } else {
            None
        }
    }

    /// Get a value without touching its recency
    pub fn peek(&self, key: &K) -> Option<&V> {
        let handle = self.table.get(key)?;
        self.index.get(handle).map(|(_, value)| value)
    }

    /// Check whether `key` is cached, without touching its recency
    pub fn contains(&self, key: &K) -> bool {
        self.table.has(key)
    }

    /// Key that the next eviction would remove
    pub fn least_recent(&self) -> Option<&K> {
        self.index.least_recent()
    }

    /// Iterate over entries from least to most recently used
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.index.iter()
    }

    /// Iterate over keys from least to most recently used
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.index.iter().map(|(key, _)| key)
    }

    /// Get the current size of the cache
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Get the cache capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    fn evict(&mut self) -> Option<(K, V)> {
        let (key, value) = self.index.pop_least_recent()?;
        self.table.delete(&key);
        self.stats.record_eviction();
        debug!(
            capacity = self.capacity,
            len = self.index.len(),
            evictions = self.stats.evictions(),
            "evicted least recently used entry"
        );
        Some((key, value))
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        self.index.assert_consistent();
        assert_eq!(self.table.len(), self.index.len());
        assert!(self.index.len() <= self.capacity);

        for (key, _) in self.index.iter() {
            let handle = self.table.get(key).expect("indexed key missing from table");
            let (entry_key, _) = self.index.get(handle).expect("table handle is stale");
            assert!(entry_key == key, "table handle points at another entry");
        }
    }
}
