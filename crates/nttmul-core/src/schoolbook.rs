//! Quadratic long multiplication.
//!
//! Column-wise product scanning: every output word is finished before the
//! next one is started, so the destination is written strictly in order.

use crate::word::{add_with_carry, widen_multiply, DoubleWord, Word, WORD_BITS};

/// Multiply `a` by `b` into `dest` (`a.len() + b.len()` words).
///
/// Operands may have different lengths, including zero.
#[allow(clippy::cast_possible_truncation)]
pub fn mul_schoolbook(a: &[Word], b: &[Word], dest: &mut [Word]) {
    assert_eq!(
        dest.len(),
        a.len() + b.len(),
        "schoolbook destination must hold len(a) + len(b) words"
    );

    // High halves of column products; wide enough for len(a) of them per column.
    let mut carry: DoubleWord = 0;
    for (i, out) in dest.iter_mut().enumerate() {
        let mut column = carry as Word;
        carry >>= WORD_BITS;

        let start = (i + 1).saturating_sub(b.len());
        let end = (i + 1).min(a.len());
        for j in start..end {
            let (low, high) = widen_multiply(a[j], b[i - j]);
            let (sum, c) = add_with_carry(column, low, 0);
            column = sum;
            carry += DoubleWord::from(high) + DoubleWord::from(c);
        }
        *out = column;
    }
    debug_assert_eq!(carry, 0);
}

/// Square `a` into `dest` (`2 * a.len()` words).
///
/// Cross products are summed once, doubled with a one-bit shift, and the
/// diagonal squares are added last.
pub fn sqr_schoolbook(a: &[Word], dest: &mut [Word]) {
    let n = a.len();
    assert_eq!(
        dest.len(),
        2 * n,
        "schoolbook square destination must hold 2 * len(a) words"
    );
    dest.fill(0);

    for (j, &x) in a.iter().enumerate() {
        let mut carry = 0;
        for (k, &y) in a.iter().enumerate().skip(j + 1) {
            let (low, high) = widen_multiply(x, y);
            let (sum, c1) = add_with_carry(dest[j + k], low, carry);
            dest[j + k] = sum;
            carry = high + c1;
        }
        if n > 0 {
            dest[j + n] = carry;
        }
    }

    let mut top = 0;
    for w in dest.iter_mut() {
        let next = *w >> (WORD_BITS - 1);
        *w = (*w << 1) | top;
        top = next;
    }
    debug_assert_eq!(top, 0);

    let mut carry = 0;
    for (j, &x) in a.iter().enumerate() {
        let (low, high) = widen_multiply(x, x);
        let (sum, c) = add_with_carry(dest[2 * j], low, carry);
        dest[2 * j] = sum;
        let (sum, c) = add_with_carry(dest[2 * j + 1], high, c);
        dest[2 * j + 1] = sum;
        carry = c;
    }
    debug_assert_eq!(carry, 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(a: &[u64], b: &[u64]) -> Vec<u64> {
        let mut dest = vec![0; a.len() + b.len()];
        mul_schoolbook(a, b, &mut dest);
        dest
    }

    #[test]
    fn single_words() {
        assert_eq!(product(&[6], &[7]), vec![42, 0]);
    }

    #[test]
    fn max_word_squared() {
        assert_eq!(product(&[u64::MAX], &[u64::MAX]), vec![1, u64::MAX - 1]);
    }

    #[test]
    fn empty_operands() {
        assert!(product(&[], &[]).is_empty());
        assert_eq!(product(&[], &[1, 2]), vec![0, 0]);
        assert_eq!(product(&[3], &[]), vec![0]);
    }

    #[test]
    fn unequal_lengths() {
        // (2^64 + 1) * 3 = 3 * 2^64 + 3
        assert_eq!(product(&[1, 1], &[3]), vec![3, 3, 0]);
        assert_eq!(product(&[3], &[1, 1]), vec![3, 3, 0]);
    }

    #[test]
    fn all_ones_carries_through_columns() {
        // (2^128 - 1)^2 = 2^256 - 2^129 + 1
        assert_eq!(
            product(&[u64::MAX, u64::MAX], &[u64::MAX, u64::MAX]),
            vec![1, 0, u64::MAX - 1, u64::MAX]
        );
    }

    #[test]
    fn one_is_identity() {
        let b = [5, u64::MAX, 0, 9];
        assert_eq!(product(&[1], &b), vec![5, u64::MAX, 0, 9, 0]);
    }

    #[test]
    fn leading_zero_words_are_kept() {
        assert_eq!(product(&[2, 0, 0], &[3, 0]), vec![6, 0, 0, 0, 0]);
    }

    #[test]
    #[should_panic(expected = "len(a) + len(b)")]
    fn wrong_destination_panics() {
        let mut dest = [0; 3];
        mul_schoolbook(&[1, 2], &[3, 4], &mut dest);
    }

    #[test]
    fn square_matches_product() {
        let cases: [&[u64]; 5] = [
            &[],
            &[u64::MAX],
            &[u64::MAX; 7],
            &[1, 2, 3, 4, 5],
            &[0x0123_4567_89ab_cdef, 0, u64::MAX, 42],
        ];
        for a in cases {
            let mut dest = vec![0; 2 * a.len()];
            sqr_schoolbook(a, &mut dest);
            assert_eq!(dest, product(a, a), "square mismatch for {a:?}");
        }
    }

    #[test]
    fn square_overwrites_dirty_destination() {
        let mut dest = [u64::MAX; 4];
        sqr_schoolbook(&[2, 0], &mut dest);
        assert_eq!(dest, [4, 0, 0, 0]);
    }
}
