//! Thread-local scratch pooling.
//!
//! Each thread keeps its own small stack of [`ScratchBuffer`]s, so callers
//! that do not manage scratch themselves still never share a buffer between
//! concurrent calls.

use std::cell::RefCell;

use crate::scratch::ScratchBuffer;

/// Buffers kept per thread.
const MAX_THREAD_BUFFERS: usize = 2;

/// Buffers larger than this are dropped instead of kept on the thread (64 MiB).
const MAX_RETAINED_WORDS: usize = 1 << 23;

thread_local! {
    static THREAD_SCRATCH: RefCell<Vec<ScratchBuffer>> = const { RefCell::new(Vec::new()) };
}

/// Acquire an object from a thread-local pool.
///
/// Pops a pooled object and runs `reset` on it, or builds one with `factory`.
#[inline]
pub fn tl_acquire<T>(pool: &RefCell<Vec<T>>, factory: fn() -> T, reset: fn(&mut T)) -> T {
    let pooled = pool.borrow_mut().pop();
    match pooled {
        Some(mut item) => {
            reset(&mut item);
            item
        }
        None => factory(),
    }
}

/// Return an object to a thread-local pool, dropping it once `max` are held.
#[inline]
pub fn tl_release<T>(pool: &RefCell<Vec<T>>, max: usize, item: T) {
    let mut pool = pool.borrow_mut();
    if pool.len() < max {
        pool.push(item);
    }
}

/// Run `f` with a scratch slice of exactly `words` words owned by this thread.
///
/// Nested calls on the same thread get distinct buffers.
pub fn with_thread_scratch<R>(words: usize, f: impl FnOnce(&mut [u64]) -> R) -> R {
    let mut buf = THREAD_SCRATCH.with(|pool| tl_acquire(pool, ScratchBuffer::new, |_| {}));
    let out = f(buf.prefix_mut(words));
    if buf.len() <= MAX_RETAINED_WORDS {
        THREAD_SCRATCH.with(|pool| tl_release(pool, MAX_THREAD_BUFFERS, buf));
    }
    out
}

/// Number of scratch buffers parked on the current thread.
#[must_use]
pub fn thread_pooled() -> usize {
    THREAD_SCRATCH.with(|pool| pool.borrow().len())
}
