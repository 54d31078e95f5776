//! Shared helpers for the workspace integration tests.

use num_bigint::BigUint;
use nttmul_core::Word;

/// SplitMix64 generator, used to derive reproducible operands from a seed.
#[derive(Debug, Clone)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    /// Generator starting at `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next output word.
    pub fn next_word(&mut self) -> Word {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Next `len` output words.
    pub fn words(&mut self, len: usize) -> Vec<Word> {
        (0..len).map(|_| self.next_word()).collect()
    }
}

/// Little-endian words to a big integer.
#[must_use]
pub fn to_biguint(words: &[Word]) -> BigUint {
    let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
    BigUint::from_bytes_le(&bytes)
}

/// Big integer to exactly `len` little-endian words, zero-padded.
///
/// Panics if the value does not fit.
#[must_use]
pub fn from_biguint(value: &BigUint, len: usize) -> Vec<Word> {
    let mut words = value.to_u64_digits();
    assert!(words.len() <= len, "value needs {} words, {len} given", words.len());
    words.resize(len, 0);
    words
}

/// Product computed by `num-bigint`, as `a.len() + b.len()` words.
#[must_use]
pub fn reference_product(a: &[Word], b: &[Word]) -> Vec<Word> {
    from_biguint(&(to_biguint(a) * to_biguint(b)), a.len() + b.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splitmix_known_output() {
        assert_eq!(SplitMix64::new(0).next_word(), 0xe220_a839_7b1d_cdaf);
    }

    #[test]
    fn biguint_conversion_keeps_leading_zeros() {
        let words = [5, 0, u64::MAX, 0, 0];
        assert_eq!(from_biguint(&to_biguint(&words), 5), words);
        assert_eq!(from_biguint(&BigUint::default(), 3), vec![0; 3]);
    }

    #[test]
    fn reference_max_word() {
        assert_eq!(reference_product(&[u64::MAX], &[u64::MAX]), vec![1, u64::MAX - 1]);
    }
}
