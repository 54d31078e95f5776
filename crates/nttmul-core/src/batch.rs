//! Parallel batch multiplication.
//!
//! Independent products run on rayon's global pool; each worker borrows its
//! own thread-local scratch, so no buffer is ever shared between two
//! products in flight. [`multiply_in_arena`] instead runs a batch on the
//! calling thread out of a single bump arena.

use nttmul_memory::BumpArena;
use rayon::prelude::*;

use crate::layout::required_scratch_size;
use crate::mul::Multiplier;
use crate::word::Word;

/// Multiply every `(a, b)` pair, returning the products in input order.
#[must_use]
pub fn multiply_many(multiplier: &Multiplier, pairs: &[(&[Word], &[Word])]) -> Vec<Vec<Word>> {
    tracing::debug!(count = pairs.len(), "batch multiply");
    pairs
        .par_iter()
        .map(|&(a, b)| multiplier.mul_vec(a, b))
        .collect()
}

/// Square every operand, returning the squares in input order.
#[must_use]
pub fn square_many(multiplier: &Multiplier, operands: &[&[Word]]) -> Vec<Vec<Word>> {
    operands
        .par_iter()
        .map(|&a| multiplier.square_vec(a))
        .collect()
}

/// Multiply every pair in order on the calling thread, allocating the
/// products and one shared scratch slice from `arena`.
pub fn multiply_in_arena<'a>(
    multiplier: &Multiplier,
    arena: &'a BumpArena,
    pairs: &[(&[Word], &[Word])],
) -> Vec<&'a mut [Word]> {
    let widest = pairs
        .iter()
        .map(|(a, b)| a.len().max(b.len()))
        .max()
        .unwrap_or(0);
    let scratch = arena.alloc_scratch(required_scratch_size(widest));

    let mut products = Vec::with_capacity(pairs.len());
    for &(a, b) in pairs {
        let dest = arena.alloc_scratch(a.len() + b.len());
        multiplier.multiply(a, b, dest, scratch);
        products.push(dest);
    }
    products
}
