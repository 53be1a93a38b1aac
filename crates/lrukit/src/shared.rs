//! Thread-safe handle around a single [`LruCache`]

use std::hash::Hash;
use std::sync::Arc;
use parking_lot::Mutex;

use crate::config::CacheConfig;
use crate::error::Result;
use crate::lru::LruCache;

/// LRU cache shared between threads
///
/// Every `get` and `put` holds one lock for its whole duration, so the key
/// table and the ordered index are never observed out of step. `get` needs
/// the lock exclusively because it reorders entries.
pub struct SharedLruCache<K, V> {
    inner: Arc<Mutex<LruCache<K, V>>>,
    capacity: usize,
}

impl<K, V> SharedLruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create a new shared cache with the given capacity
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_config(CacheConfig::new(capacity))
    }

    /// Create a new shared cache from a config
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        let cache = LruCache::with_config(config)?;

        Ok(Self {
            inner: Arc::new(Mutex::new(cache)),
            capacity: config.capacity,
        })
    }

    /// Get a copy of the value for `key`, marking it most recently used
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().get(key).cloned()
    }

    /// Insert or update a key-value pair, returning the evicted entry if any
    pub fn put(&self, key: K, value: V) -> Option<(K, V)> {
        self.inner.lock().put(key, value)
    }

    /// Get a copy of the value for `key` without touching its recency
    pub fn peek(&self, key: &K) -> Option<V> {
        self.inner.lock().peek(key).cloned()
    }

    /// Keys from least to most recently used
    pub fn keys(&self) -> Vec<K> {
        self.inner.lock().keys().cloned().collect()
    }

    /// Get current cache size
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Run `f` with the cache locked
    pub fn with_cache<R>(&self, f: impl FnOnce(&mut LruCache<K, V>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl<K, V> Clone for SharedLruCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            capacity: self.capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_shared_basic() {
        let cache = SharedLruCache::new(2).unwrap();

        cache.put(1, String::from("a"));
        cache.put(2, String::from("b"));

        assert_eq!(cache.get(&1), Some(String::from("a")));
        assert_eq!(cache.put(3, String::from("c")), Some((2, String::from("b"))));
        assert_eq!(cache.keys(), vec![1, 3]);
        assert_eq!(cache.capacity(), 2);
    }

    #[test]
    fn test_shared_clone_sees_same_cache() {
        let cache = SharedLruCache::new(4).unwrap();
        let other = cache.clone();

        other.put("k", 1);
        assert_eq!(cache.peek(&"k"), Some(1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_shared_concurrent_puts() {
        let cache = SharedLruCache::new(64).unwrap();

        let workers: Vec<_> = (0..8u64)
            .map(|t| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..500u64 {
                        cache.put(t * 1000 + i, i);
                        cache.get(&(t * 1000 + i / 2));
                    }
                })
            })
            .collect();

        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(cache.len(), 64);
        cache.with_cache(|inner| {
            inner.assert_consistent();
            assert_eq!(inner.stats().inserts(), 8 * 500);
            assert_eq!(inner.stats().evictions(), 8 * 500 - 64);
        });
    }
}
