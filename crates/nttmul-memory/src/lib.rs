//! # nttmul-memory
//!
//! Scratch memory for the `nttmul` workspace.
//!
//! The multiplication engine never allocates behind the caller's back: every
//! transform stage works inside a caller-owned word slice. This crate provides
//! the owners of those slices: a grow-only [`ScratchBuffer`], a bump arena for
//! batch-scoped slices, a size-classed pool for sharing buffers between
//! threads, and thread-local pooling helpers.
#![warn(missing_docs)]

pub mod arena;
pub mod pool;
pub mod scratch;
pub mod stats;
pub mod thread_local;

pub use arena::BumpArena;
pub use pool::ScratchPool;
pub use scratch::ScratchBuffer;
pub use stats::PoolStats;
