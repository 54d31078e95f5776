//! GMP reference multiplication through `rug`.
//!
//! Only available when the `gmp` feature is enabled. Used as an independent
//! oracle and as a baseline when calibrating.

use rug::integer::Order;
use rug::Integer;

use crate::word::Word;

/// Product of `a` and `b` computed by GMP, as `a.len() + b.len()` words.
#[must_use]
pub fn mul_gmp(a: &[Word], b: &[Word]) -> Vec<Word> {
    let x = Integer::from_digits(a, Order::Lsf);
    let y = Integer::from_digits(b, Order::Lsf);
    let product = x * y;
    let mut words = product.to_digits::<Word>(Order::Lsf);
    words.resize(a.len() + b.len(), 0);
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mul::mul_vec;

    #[test]
    fn agrees_with_dispatcher() {
        let a: Vec<u64> = (0..700u64).map(|i| i.wrapping_mul(0x9e37_79b9_7f4a_7c15)).collect();
        let b = vec![u64::MAX; 650];
        assert_eq!(mul_gmp(&a, &b), mul_vec(&a, &b));
    }

    #[test]
    fn zero_is_padded() {
        assert_eq!(mul_gmp(&[0, 0], &[5]), vec![0, 0, 0]);
    }
}
