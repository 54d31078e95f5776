//! Word-level arithmetic primitives.

/// Machine word: one base-2^64 digit.
pub type Word = u64;

/// Double-width intermediate for word products and carry-extended sums.
pub type DoubleWord = u128;

/// Bits per word.
pub const WORD_BITS: u32 = Word::BITS;

/// Add with carry: a + b + carry -> (sum, `carry_out`)
///
/// `carry` may be any word; the carry-out is 0, 1 or 2 accordingly.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn add_with_carry(a: Word, b: Word, carry: Word) -> (Word, Word) {
    let sum = DoubleWord::from(a) + DoubleWord::from(b) + DoubleWord::from(carry);
    (sum as Word, (sum >> WORD_BITS) as Word)
}

/// Multiply: a * b -> (low, high)
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn widen_multiply(a: Word, b: Word) -> (Word, Word) {
    let prod = DoubleWord::from(a) * DoubleWord::from(b);
    (prod as Word, (prod >> WORD_BITS) as Word)
}

/// Add `src` into the low words of `dest`, returning the carry out of `dest`.
///
/// `src` must not be longer than `dest`.
pub fn add_words(dest: &mut [Word], src: &[Word]) -> Word {
    debug_assert!(src.len() <= dest.len());
    let (low, high) = dest.split_at_mut(src.len());
    let mut carry = 0;
    for (d, &s) in low.iter_mut().zip(src) {
        let (sum, c) = add_with_carry(*d, s, carry);
        *d = sum;
        carry = c;
    }
    for d in high {
        if carry == 0 {
            break;
        }
        let (sum, c) = add_with_carry(*d, carry, 0);
        *d = sum;
        carry = c;
    }
    carry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_carry() {
        assert_eq!(add_with_carry(u64::MAX, 1, 0), (0, 1));
    }

    #[test]
    fn add_carry_zero_plus_zero() {
        assert_eq!(add_with_carry(0, 0, 0), (0, 0));
    }

    #[test]
    fn add_carry_with_carry_in() {
        assert_eq!(add_with_carry(u64::MAX, 0, 1), (0, 1));
    }

    #[test]
    fn add_carry_max_plus_max_plus_carry() {
        assert_eq!(add_with_carry(u64::MAX, u64::MAX, 1), (u64::MAX, 1));
    }

    #[test]
    fn add_carry_wide_carry_in() {
        assert_eq!(add_with_carry(u64::MAX, u64::MAX, u64::MAX), (u64::MAX - 2, 2));
    }

    #[test]
    fn add_carry_no_overflow() {
        assert_eq!(add_with_carry(100, 200, 0), (300, 0));
    }

    #[test]
    fn widen_zero() {
        assert_eq!(widen_multiply(0, u64::MAX), (0, 0));
    }

    #[test]
    fn widen_identity() {
        assert_eq!(widen_multiply(12345, 1), (12345, 0));
    }

    #[test]
    fn widen_max_times_max() {
        // (2^64 - 1)^2 = 2^128 - 2^65 + 1
        assert_eq!(widen_multiply(u64::MAX, u64::MAX), (1, u64::MAX - 1));
    }

    #[test]
    fn widen_power_of_two() {
        assert_eq!(widen_multiply(1 << 32, 1 << 32), (0, 1));
    }

    #[test]
    fn add_words_no_carry() {
        let mut dest = [10, 20, 30];
        assert_eq!(add_words(&mut dest, &[5, 5]), 0);
        assert_eq!(dest, [15, 25, 30]);
    }

    #[test]
    fn add_words_propagates_into_high_part() {
        let mut dest = [u64::MAX, u64::MAX, 0];
        assert_eq!(add_words(&mut dest, &[1]), 0);
        assert_eq!(dest, [0, 0, 1]);
    }

    #[test]
    fn add_words_carry_out() {
        let mut dest = [u64::MAX, u64::MAX];
        assert_eq!(add_words(&mut dest, &[1, 0]), 1);
        assert_eq!(dest, [0, 0]);
    }

    #[test]
    fn add_words_empty_src() {
        let mut dest = [7];
        assert_eq!(add_words(&mut dest, &[]), 0);
        assert_eq!(dest, [7]);
    }
}
