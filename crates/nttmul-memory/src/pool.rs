//! Scratch buffer pool with power-of-two size classes.
//!
//! Lets threads lend each other scratch buffers without ever sharing one:
//! a buffer is owned by exactly one caller between `acquire` and `release`.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::scratch::ScratchBuffer;
use crate::stats::{AtomicPoolStats, PoolStats};

/// Smallest size class, in words.
const MIN_CLASS_WORDS: usize = 64;

/// Pool of [`ScratchBuffer`]s keyed by size class.
pub struct ScratchPool {
    classes: Mutex<HashMap<usize, Vec<ScratchBuffer>>>,
    max_words: usize,
    max_per_class: usize,
    stats: AtomicPoolStats,
}

impl ScratchPool {
    /// Create a pool that keeps buffers of at most `max_words` words,
    /// and at most `max_per_class` buffers per size class.
    #[must_use]
    pub fn new(max_words: usize, max_per_class: usize) -> Self {
        Self {
            classes: Mutex::new(HashMap::new()),
            max_words,
            max_per_class,
            stats: AtomicPoolStats::new(),
        }
    }

    /// Take a buffer holding at least `min_words` words.
    pub fn acquire(&self, min_words: usize) -> ScratchBuffer {
        let class = Self::class_for_request(min_words);
        if let Some(buf) = self
            .classes
            .lock()
            .get_mut(&class)
            .and_then(Vec::pop)
        {
            self.stats.record_hit();
            return buf;
        }
        self.stats.record_miss(class);
        ScratchBuffer::with_len(class)
    }

    /// Give a buffer back to the pool.
    pub fn release(&self, buf: ScratchBuffer) {
        let len = buf.len();
        if len < MIN_CLASS_WORDS || len > self.max_words {
            tracing::trace!(words = len, "scratch buffer not pooled");
            self.stats.record_eviction();
            return;
        }

        let class = Self::class_for_release(len);
        let mut classes = self.classes.lock();
        let pool = classes.entry(class).or_default();
        if pool.len() < self.max_per_class {
            pool.push(buf);
        } else {
            self.stats.record_eviction();
        }
    }

    /// Class serving a request: next power of two, at least the minimum class.
    fn class_for_request(words: usize) -> usize {
        words.max(MIN_CLASS_WORDS).next_power_of_two()
    }

    /// Class a returned buffer can serve: the largest power of two not above its length.
    fn class_for_release(len: usize) -> usize {
        1 << (usize::BITS - 1 - len.leading_zeros())
    }

    /// Number of buffers currently held.
    #[must_use]
    pub fn total_pooled(&self) -> usize {
        self.classes.lock().values().map(Vec::len).sum()
    }

    /// Snapshot of usage counters.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        self.stats.snapshot()
    }

    /// Reset usage counters.
    pub fn reset_stats(&self) {
        self.stats.reset();
    }

    /// Drop every pooled buffer.
    pub fn clear(&self) {
        self.classes.lock().clear();
    }

    /// Pre-populate the class serving `words`-word requests up to `count` buffers.
    pub fn warm(&self, words: usize, count: usize) {
        let class = Self::class_for_request(words);
        if class > self.max_words {
            return;
        }
        let mut classes = self.classes.lock();
        let pool = classes.entry(class).or_default();
        let to_add = count
            .saturating_sub(pool.len())
            .min(self.max_per_class.saturating_sub(pool.len()));
        for _ in 0..to_add {
            pool.push(ScratchBuffer::with_len(class));
        }
    }
}

impl Default for ScratchPool {
    fn default() -> Self {
        Self::new(1 << 28, 8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_release_roundtrip() {
        let pool = ScratchPool::default();
        let buf = pool.acquire(1000);
        assert!(buf.len() >= 1000);
        pool.release(buf);
        assert_eq!(pool.total_pooled(), 1);
    }

    #[test]
    fn request_classes() {
        assert_eq!(ScratchPool::class_for_request(0), 64);
        assert_eq!(ScratchPool::class_for_request(64), 64);
        assert_eq!(ScratchPool::class_for_request(65), 128);
        assert_eq!(ScratchPool::class_for_request(1000), 1024);
    }

    #[test]
    fn release_classes_round_down() {
        assert_eq!(ScratchPool::class_for_release(64), 64);
        assert_eq!(ScratchPool::class_for_release(100), 64);
        assert_eq!(ScratchPool::class_for_release(1024), 1024);
        assert_eq!(ScratchPool::class_for_release(1500), 1024);
    }

    #[test]
    fn released_buffer_serves_its_class() {
        let pool = ScratchPool::default();
        pool.release(ScratchBuffer::with_len(1500));
        let buf = pool.acquire(900);
        assert!(buf.len() >= 900);
        assert_eq!(pool.stats().hits, 1);
    }

    #[test]
    fn stats_track_hits_and_misses() {
        let pool = ScratchPool::default();
        let buf = pool.acquire(100);
        let stats = pool.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.allocated_words, 128);

        pool.release(buf);
        let _ = pool.acquire(100);
        let stats = pool.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn oversized_buffer_is_evicted() {
        let pool = ScratchPool::new(256, 4);
        pool.release(ScratchBuffer::with_len(512));
        assert_eq!(pool.stats().evictions, 1);
        assert_eq!(pool.total_pooled(), 0);
    }

    #[test]
    fn tiny_buffer_is_evicted() {
        let pool = ScratchPool::default();
        pool.release(ScratchBuffer::with_len(10));
        assert_eq!(pool.stats().evictions, 1);
    }

    #[test]
    fn full_class_evicts() {
        let pool = ScratchPool::new(1 << 20, 2);
        for _ in 0..3 {
            pool.release(ScratchBuffer::with_len(64));
        }
        assert_eq!(pool.stats().evictions, 1);
        assert_eq!(pool.total_pooled(), 2);
    }

    #[test]
    fn reset_and_clear() {
        let pool = ScratchPool::default();
        pool.release(pool.acquire(64));
        pool.reset_stats();
        assert_eq!(pool.stats(), PoolStats::default());
        pool.clear();
        assert_eq!(pool.total_pooled(), 0);
    }

    #[test]
    fn warm_fills_up_to_count() {
        let pool = ScratchPool::default();
        pool.warm(1000, 3);
        assert_eq!(pool.total_pooled(), 3);
        pool.warm(1000, 3);
        assert_eq!(pool.total_pooled(), 3);
        pool.warm(1000, 5);
        assert_eq!(pool.total_pooled(), 5);
    }

    #[test]
    fn warm_respects_class_limit() {
        let pool = ScratchPool::new(1 << 20, 2);
        pool.warm(64, 10);
        assert_eq!(pool.total_pooled(), 2);
    }

    #[test]
    fn concurrent_acquire_release() {
        use std::sync::Arc;
        use std::thread;

        let pool = Arc::new(ScratchPool::default());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let pool = Arc::clone(&pool);
                thread::spawn(move || {
                    for i in 0..50 {
                        let mut buf = pool.acquire(64 + t * 100 + i);
                        buf.as_mut_slice()[0] = 1;
                        pool.release(buf);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        let stats = pool.stats();
        assert_eq!(stats.hits + stats.misses, 200);
    }
}
