//! Bump arena for batch-scoped scratch slices.
//!
//! Uses bumpalo so a batch of products can carve one scratch slice per call
//! and release all of them at once with [`BumpArena::reset`].

use bumpalo::Bump;

/// Bump arena handing out zeroed `u64` scratch slices.
pub struct BumpArena {
    bump: Bump,
}

impl BumpArena {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Allocate a zero-filled scratch slice of `len` words.
    pub fn alloc_scratch(&self, len: usize) -> &mut [u64] {
        self.bump.alloc_slice_fill_default(len)
    }

    /// Release every slice at once.
    pub fn reset(&mut self) {
        self.bump.reset();
    }

    /// Bytes currently held by the arena.
    #[must_use]
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }
}

impl Default for BumpArena {
    fn default() -> Self {
        Self::new()
    }
}
