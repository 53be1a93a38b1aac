//! Cache statistics tracking

use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics for cache performance tracking
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    updates: AtomicU64,
    evictions: AtomicU64,
}

impl CacheStats {
    /// Create new stats tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a `get` that found its key
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a `get` that missed
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a `put` of a new key
    pub fn record_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a `put` overwriting an existing key
    pub fn record_update(&self) {
        self.updates.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an eviction
    pub fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total hits
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Get total misses
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Get total inserts
    pub fn inserts(&self) -> u64 {
        self.inserts.load(Ordering::Relaxed)
    }

    /// Get total updates
    pub fn updates(&self) -> u64 {
        self.updates.load(Ordering::Relaxed)
    }

    /// Get total evictions
    pub fn evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }

    /// Calculate hit ratio (0.0 to 1.0)
    pub fn hit_ratio(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }

    /// Reset all statistics
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.inserts.store(0, Ordering::Relaxed);
        self.updates.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_ratio_counts_only_lookups() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_ratio(), 0.0);

        // Writes never move the ratio
        stats.record_insert();
        stats.record_insert();
        stats.record_update();
        stats.record_eviction();
        assert_eq!(stats.hit_ratio(), 0.0);

        stats.record_hit();
        stats.record_miss();
        stats.record_miss();
        stats.record_miss();
        assert_eq!(stats.hit_ratio(), 0.25);

        assert_eq!(stats.inserts(), 2);
        assert_eq!(stats.updates(), 1);
        assert_eq!(stats.evictions(), 1);
    }

    #[test]
    fn test_reset_clears_write_counters() {
        let stats = CacheStats::new();
        stats.record_insert();
        stats.record_update();
        stats.record_eviction();
        stats.record_hit();

        stats.reset();

        assert_eq!(stats.inserts(), 0);
        assert_eq!(stats.updates(), 0);
        assert_eq!(stats.evictions(), 0);
        assert_eq!(stats.hits(), 0);
    }
}
