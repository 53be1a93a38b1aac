//! Key lookup table: key to ordered-index handle

use std::collections::HashMap;
use std::hash::Hash;
use ahash::RandomState;

use crate::list::Handle;

/// Maps keys to the handle of their entry in the ordered index
///
/// Values are stored only on the entry, never here.
#[derive(Debug)]
pub struct KeyTable<K> {
    map: HashMap<K, Handle, RandomState>,
}

impl<K> KeyTable<K>
where
    K: Hash + Eq,
{
    /// Create a table sized for `capacity` keys
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    /// Check whether `key` is present
    pub fn has(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Handle recorded for `key`
    pub fn get(&self, key: &K) -> Option<Handle> {
        self.map.get(key).copied()
    }

    /// Insert or overwrite the handle for `key`, returning the previous one
    pub fn set(&mut self, key: K, handle: Handle) -> Option<Handle> {
        self.map.insert(key, handle)
    }

    /// Remove `key`, returning its handle
    pub fn delete(&mut self, key: &K) -> Option<Handle> {
        self.map.remove(key)
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
