//! # lrukit
//!
//! Fixed-capacity LRU cache with O(1) `get` and `put`.
//!
//! ## Architecture
//! - **Key table**: AHash map from key to entry handle (O(1))
//! - **Ordered index**: arena-backed doubly linked list in recency order (O(1))
//! - **Cache**: keeps both in step and evicts the least recently used entry
//!
//! ```
//! use lrukit::LruCache;
//!
//! let mut cache = LruCache::new(2)?;
//! cache.put(1, 1);
//! cache.put(2, 2);
//! assert_eq!(cache.get(&1), Some(&1));
//! cache.put(3, 3); // evicts 2
//! assert_eq!(cache.get(&2), None);
//! # Ok::<(), lrukit::Error>(())
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod list;
mod lru;
mod shared;
mod stats;
mod table;

pub use config::{checked_capacity, CacheConfig};
pub use error::{Error, Result};
pub use list::{Handle, Iter, OrderedIndex};
pub use lru::LruCache;
pub use shared::SharedLruCache;
pub use stats::CacheStats;
pub use table::KeyTable;
