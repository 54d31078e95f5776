//! Core transform: forward and inverse NTT over a prime field.
//!
//! Residues enter and leave in whatever scaling the caller chose; the
//! twiddle factors are Montgomery-encoded, so multiplying by one keeps the
//! caller's scaling intact.

use crate::modular::PrimeField;

/// Fill `twiddles` with `w^0, w^1, ..., w^(len/2 - 1)` in Montgomery form,
/// where `w` is the primitive root of order `len = 2 * twiddles.len()`.
pub fn fill_twiddles(field: &PrimeField, twiddles: &mut [u64]) {
    let Some((first, rest)) = twiddles.split_first_mut() else {
        return;
    };
    let w = field.encode(field.root_of_unity(2 * rest.len() + 2));
    *first = field.one();
    let mut prev = *first;
    for t in rest {
        prev = field.mul(prev, w);
        *t = prev;
    }
}

/// Forward NTT in place.
///
/// Bit-reversal permutation followed by iterative Cooley-Tukey butterflies.
/// `twiddles` must come from [`fill_twiddles`] for `data.len()`.
pub fn forward(field: &PrimeField, data: &mut [u64], twiddles: &[u64]) {
    let n = data.len();
    if n <= 1 {
        return;
    }
    debug_assert!(n.is_power_of_two());
    debug_assert_eq!(twiddles.len(), n / 2);

    bit_reverse_permutation(data);

    let mut size = 2;
    while size <= n {
        let half = size / 2;
        let stride = n / size;
        for block in data.chunks_exact_mut(size) {
            let (lo, hi) = block.split_at_mut(half);
            for ((u, v), &w) in lo
                .iter_mut()
                .zip(hi.iter_mut())
                .zip(twiddles.iter().step_by(stride))
            {
                let t = field.mul(*v, w);
                let x = *u;
                *u = field.add(x, t);
                *v = field.sub(x, t);
            }
        }
        size *= 2;
    }
}

/// Inverse NTT in place, finishing with a Montgomery multiply by `scale`.
///
/// Reverses indices `1..n` and reuses the forward transform; the result is
/// `n` times the true inverse until scaled. Pass
/// `field.encode(field.inverse_len(n))` for a plain inverse.
pub fn inverse(field: &PrimeField, data: &mut [u64], twiddles: &[u64], scale: u64) {
    if data.len() > 1 {
        data[1..].reverse();
        forward(field, data, twiddles);
    }
    for x in data.iter_mut() {
        *x = field.mul(*x, scale);
    }
}

/// Pointwise Montgomery product `lhs[i] = lhs[i] * rhs[i] * R^{-1}`.
pub fn pointwise_multiply(field: &PrimeField, lhs: &mut [u64], rhs: &[u64]) {
    debug_assert_eq!(lhs.len(), rhs.len());
    for (x, &y) in lhs.iter_mut().zip(rhs) {
        *x = field.mul(*x, y);
    }
}

/// Pointwise Montgomery square `data[i] = data[i]^2 * R^{-1}`.
pub fn pointwise_square(field: &PrimeField, data: &mut [u64]) {
    for x in data.iter_mut() {
        *x = field.mul(*x, *x);
    }
}

/// Bit-reversal permutation.
fn bit_reverse_permutation(data: &mut [u64]) {
    let n = data.len();
    let mut j = 0;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j ^= bit;
        if i < j {
            data.swap(i, j);
        }
    }
}
