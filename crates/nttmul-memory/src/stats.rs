//! Atomic pool statistics for lock-free usage tracking.

use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of scratch pool usage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Buffers handed out from the pool.
    pub hits: u64,
    /// Buffers freshly allocated because the class was empty.
    pub misses: u64,
    /// Buffers dropped on release (too large, or class full).
    pub evictions: u64,
    /// Words allocated on misses.
    pub allocated_words: u64,
}

impl PoolStats {
    /// Fraction of acquisitions served from the pool.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Atomic counters behind [`PoolStats`].
#[derive(Debug, Default)]
pub struct AtomicPoolStats {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
    allocated_words: AtomicU64,
}

impl AtomicPoolStats {
    /// Create zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a snapshot of current counters.
    pub fn snapshot(&self) -> PoolStats {
        PoolStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            allocated_words: self.allocated_words.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters.
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
        self.allocated_words.store(0, Ordering::Relaxed);
    }

    /// Count a pool hit.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a miss that allocated `words` words.
    pub fn record_miss(&self, words: usize) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        self.allocated_words
            .fetch_add(words as u64, Ordering::Relaxed);
    }

    /// Count an eviction.
    pub fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stats_are_zeroed() {
        let stats = AtomicPoolStats::new();
        assert_eq!(stats.snapshot(), PoolStats::default());
    }

    #[test]
    fn record_and_snapshot() {
        let stats = AtomicPoolStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss(128);
        stats.record_eviction();
        let snap = stats.snapshot();
        assert_eq!(snap.hits, 2);
        assert_eq!(snap.misses, 1);
        assert_eq!(snap.evictions, 1);
        assert_eq!(snap.allocated_words, 128);
    }

    #[test]
    fn reset_clears_counters() {
        let stats = AtomicPoolStats::new();
        stats.record_hit();
        stats.record_miss(8);
        stats.record_eviction();
        stats.reset();
        assert_eq!(stats.snapshot(), PoolStats::default());
    }

    #[test]
    fn hit_rate() {
        assert!(PoolStats::default().hit_rate().abs() < f64::EPSILON);
        let snap = PoolStats {
            hits: 3,
            misses: 1,
            ..PoolStats::default()
        };
        assert!((snap.hit_rate() - 0.75).abs() < f64::EPSILON);
    }
}
