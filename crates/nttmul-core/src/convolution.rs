//! Transform multiplier: three-prime convolution, Garner reconstruction and
//! carry resolution.
//!
//! Every coefficient of the integer convolution of two `n`-word operands is
//! below `n * 2^128 <= 2^182`, while `p1 * p2 * p3 > 2^183`, so the three
//! residues determine each coefficient exactly.

use crate::layout::ScratchLayout;
use crate::modular::{mul_mod, pow_mod, PrimeField, FIELDS, P1, P2, P3};
use crate::ntt;
use crate::word::{add_with_carry, add_words, widen_multiply, Word};

/// `p1^{-1} mod p2`, Montgomery form.
const INV_P1_MOD_P2: u64 = FIELDS[1].encode(pow_mod(P1 % P2, P2 - 2, P2));
/// `p1^{-1} mod p3`, Montgomery form.
const INV_P1_MOD_P3: u64 = FIELDS[2].encode(pow_mod(P1 % P3, P3 - 2, P3));
/// `p2^{-1} mod p3`, Montgomery form.
const INV_P2_MOD_P3: u64 = FIELDS[2].encode(pow_mod(P2 % P3, P3 - 2, P3));
/// `p1 * p2`, split into words.
#[allow(clippy::cast_possible_truncation)]
const P1P2: [u64; 2] = {
    let p = P1 as u128 * P2 as u128;
    [p as u64, (p >> 64) as u64]
};

/// Multiply `a` by `b` into `dest` through the transform.
///
/// Preconditions (checked by the dispatcher): `dest.len() == a.len() + b.len()`
/// and `scratch` holds at least `required_scratch_size(max(a.len(), b.len()))` words.
pub fn mul_ntt(a: &[Word], b: &[Word], dest: &mut [Word], scratch: &mut [u64]) {
    let n = a.len().max(b.len());
    let ScratchLayout {
        mut lanes,
        work,
        twiddles,
        len,
    } = ScratchLayout::split(scratch, n);

    for (field, lane) in FIELDS.iter().zip(lanes.iter_mut()) {
        ntt::fill_twiddles(field, twiddles);

        load_residues(field, a, lane);
        ntt::forward(field, lane, twiddles);
        load_residues(field, b, work);
        ntt::forward(field, work, twiddles);

        ntt::pointwise_multiply(field, lane, work);
        ntt::inverse(field, lane, twiddles, product_scale(field, len));
    }

    resolve_carries(&lanes, dest);
}

/// Square `a` into `dest`, transforming the operand once per prime.
pub fn sqr_ntt(a: &[Word], dest: &mut [Word], scratch: &mut [u64]) {
    let ScratchLayout {
        mut lanes,
        twiddles,
        len,
        ..
    } = ScratchLayout::split(scratch, a.len());

    for (field, lane) in FIELDS.iter().zip(lanes.iter_mut()) {
        ntt::fill_twiddles(field, twiddles);
        load_residues(field, a, lane);
        ntt::forward(field, lane, twiddles);
        ntt::pointwise_square(field, lane);
        ntt::inverse(field, lane, twiddles, product_scale(field, len));
    }

    resolve_carries(&lanes, dest);
}

/// Reduce operand words into `lane`, zero-extending to the transform length.
fn load_residues(field: &PrimeField, words: &[Word], lane: &mut [u64]) {
    let (head, tail) = lane.split_at_mut(words.len());
    for (r, &w) in head.iter_mut().zip(words) {
        *r = field.reduce(w);
    }
    tail.fill(0);
}

/// Inverse-transform scale: undoes the factor `len` and the `R^{-1}` left by
/// the Montgomery pointwise product, i.e. `len^{-1} * R^2`.
fn product_scale(field: &PrimeField, len: usize) -> u64 {
    mul_mod(field.inverse_len(len), field.r2(), field.modulus())
}

/// Rebuild a coefficient `< p1 * p2 * p3` from its residues (Garner).
///
/// Returns three little-endian words.
fn garner(r1: u64, r2: u64, r3: u64) -> [Word; 3] {
    let [_, f2, f3] = &FIELDS;

    // x = x1 + x2 * p1 + x3 * p1 * p2, each digit reduced by its own prime.
    let x1 = r1;
    let x2 = f2.mul(f2.sub(r2, x1 % P2), INV_P1_MOD_P2);
    let t = f3.mul(f3.sub(r3, x1 % P3), INV_P1_MOD_P3);
    let x3 = f3.mul(f3.sub(t, x2 % P3), INV_P2_MOD_P3);

    let (lo, mid) = widen_multiply(x3, P1P2[0]);
    let (mid2, hi) = widen_multiply(x3, P1P2[1]);
    let (mid, c) = add_with_carry(mid, mid2, 0);
    let mut value = [lo, mid, hi + c];

    let (p_lo, p_hi) = widen_multiply(x2, P1);
    let (p_lo, c) = add_with_carry(p_lo, x1, 0);
    let carry = add_words(&mut value, &[p_lo, p_hi + c]);
    debug_assert_eq!(carry, 0);
    value
}

/// Combine the lanes position by position and propagate overflow upward
/// into one word per place.
fn resolve_carries(lanes: &[&mut [u64]; 3], dest: &mut [Word]) {
    let [l1, l2, l3] = lanes;
    let mut acc: [Word; 3] = [0; 3];
    for (i, out) in dest.iter_mut().enumerate() {
        let coeff = garner(l1[i], l2[i], l3[i]);
        let carry = add_words(&mut acc, &coeff);
        debug_assert_eq!(carry, 0);
        *out = acc[0];
        acc = [acc[1], acc[2], 0];
    }
    debug_assert_eq!(acc, [0; 3], "product overflowed its destination");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::required_scratch_size;
    use crate::schoolbook::mul_schoolbook;

    fn via_ntt(a: &[u64], b: &[u64]) -> Vec<u64> {
        let mut scratch = vec![0; required_scratch_size(a.len().max(b.len()))];
        let mut dest = vec![0; a.len() + b.len()];
        mul_ntt(a, b, &mut dest, &mut scratch);
        dest
    }

    fn via_schoolbook(a: &[u64], b: &[u64]) -> Vec<u64> {
        let mut dest = vec![0; a.len() + b.len()];
        mul_schoolbook(a, b, &mut dest);
        dest
    }

    #[test]
    fn p1p2_words() {
        let p = u128::from(P1) * u128::from(P2);
        assert_eq!(u128::from(P1P2[0]) | (u128::from(P1P2[1]) << 64), p);
        assert_eq!(p, 10_389_786_013_928_190_091_354_850_603_277_746_177);
    }

    #[test]
    fn garner_constants_invert() {
        assert_eq!(FIELDS[1].decode(INV_P1_MOD_P2), 1_745_480_230_046_403_300);
        assert_eq!(FIELDS[2].decode(INV_P1_MOD_P3), 313_799_199_842_589_398);
        assert_eq!(FIELDS[2].decode(INV_P2_MOD_P3), 389_111_007_804_810_851);
        assert_eq!(mul_mod(P1 % P2, FIELDS[1].decode(INV_P1_MOD_P2), P2), 1);
    }

    #[test]
    fn garner_small_values() {
        assert_eq!(garner(0, 0, 0), [0, 0, 0]);
        assert_eq!(garner(7, 7, 7), [7, 0, 0]);
    }

    #[test]
    fn garner_recovers_wide_value() {
        // c = (2^64 - 1)^2 * 3, a three-term column of all-ones words
        let c: u128 = u128::from(u64::MAX) * u128::from(u64::MAX);
        let residue = |p: u64| {
            let r = u64::try_from(c % u128::from(p)).unwrap();
            mul_mod(r, 3, p)
        };
        let got = garner(residue(P1), residue(P2), residue(P3));
        // 3 * (2^128 - 2^65 + 1) = 2 * 2^128 + (2^64 - 6) * 2^64 + 3
        assert_eq!(got, [3, u64::MAX - 5, 2]);
    }

    #[test]
    fn literal_max_word_square() {
        assert_eq!(via_ntt(&[u64::MAX], &[u64::MAX]), vec![1, u64::MAX - 1]);
    }

    #[test]
    fn all_ones_match_schoolbook() {
        for n in [1, 2, 3, 8, 17, 64] {
            let a = vec![u64::MAX; n];
            assert_eq!(via_ntt(&a, &a), via_schoolbook(&a, &a), "n={n}");
        }
    }

    #[test]
    fn unequal_lengths_match_schoolbook() {
        let a: Vec<u64> = (1..=9u64).map(|i| i.wrapping_mul(0x9e37_79b9_7f4a_7c15)).collect();
        let b = [u64::MAX, 3, 0, 1 << 63];
        assert_eq!(via_ntt(&a, &b), via_schoolbook(&a, &b));
        assert_eq!(via_ntt(&b, &a), via_schoolbook(&b, &a));
    }

    #[test]
    fn zero_operand() {
        assert_eq!(via_ntt(&[0; 5], &[u64::MAX; 5]), vec![0; 10]);
        assert_eq!(via_ntt(&[], &[1, 2]), vec![0, 0]);
    }

    #[test]
    fn dirty_scratch_is_ignored() {
        let a = [1, 2, 3];
        let b = [4, 5, 6];
        let mut scratch = vec![u64::MAX; required_scratch_size(3)];
        let mut dest = vec![u64::MAX; 6];
        mul_ntt(&a, &b, &mut dest, &mut scratch);
        assert_eq!(dest, via_schoolbook(&a, &b));
    }

    #[test]
    fn square_matches_product() {
        let a: Vec<u64> = (0..33u64).map(|i| u64::MAX - i * i).collect();
        let mut scratch = vec![0; required_scratch_size(a.len())];
        let mut dest = vec![0; 2 * a.len()];
        sqr_ntt(&a, &mut dest, &mut scratch);
        assert_eq!(dest, via_schoolbook(&a, &a));
    }
}
