//! Scratch sizing and partitioning for the transform path.
//!
//! For operands padded to `n` words the transform length is
//! `L = next_pow2(2n)` and the scratch is laid out as
//!
//! ```text
//! [ lane p1 : L ][ lane p2 : L ][ lane p3 : L ][ work : L ][ twiddles : L/2 ]
//! ```
//!
//! Each lane ends up holding one prime's residues of the product; the work
//! lane holds the second operand's transform; the twiddle table is rebuilt
//! for each prime.

use crate::constants::MAX_NTT_WORDS;
use crate::modular::FIELDS;

/// Number of residue lanes (one per transform prime).
pub const LANES: usize = FIELDS.len();

/// Transform length for operands padded to `n` words.
#[must_use]
pub fn transform_len(n: usize) -> usize {
    if n == 0 {
        0
    } else {
        (2 * n).next_power_of_two()
    }
}

/// Minimum scratch words for multiplying operands of at most `n` words.
///
/// Depends only on `n`, never on the dispatch threshold.
#[must_use]
pub fn required_scratch_size(n: usize) -> usize {
    assert!(
        n as u64 <= MAX_NTT_WORDS,
        "operand of {n} words exceeds the transform limit of {MAX_NTT_WORDS} words"
    );
    let len = transform_len(n);
    LANES * len + len + len / 2
}

/// Estimated scratch footprint in bytes for operands of at most `n` words.
#[must_use]
pub fn estimate_scratch_bytes(n: usize) -> usize {
    required_scratch_size(n) * std::mem::size_of::<u64>()
}

/// Borrowed partition of a scratch slice.
pub struct ScratchLayout<'a> {
    /// One residue lane per prime, each `len` words.
    pub lanes: [&'a mut [u64]; LANES],
    /// Second-operand lane.
    pub work: &'a mut [u64],
    /// Twiddle table, `len / 2` words.
    pub twiddles: &'a mut [u64],
    /// Transform length.
    pub len: usize,
}

impl<'a> ScratchLayout<'a> {
    /// Carve the layout for operands of at most `n` words out of `scratch`.
    ///
    /// Panics if `scratch` is shorter than [`required_scratch_size`]`(n)`.
    pub fn split(scratch: &'a mut [u64], n: usize) -> Self {
        let len = transform_len(n);
        let needed = required_scratch_size(n);
        assert!(
            scratch.len() >= needed,
            "scratch holds {} words, transform needs at least {needed}",
            scratch.len()
        );

        let (lanes, rest) = scratch[..needed].split_at_mut(LANES * len);
        let (work, twiddles) = rest.split_at_mut(len);
        let (l1, rest) = lanes.split_at_mut(len);
        let (l2, l3) = rest.split_at_mut(len);
        Self {
            lanes: [l1, l2, l3],
            work,
            twiddles,
            len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_len_covers_full_product() {
        assert_eq!(transform_len(0), 0);
        assert_eq!(transform_len(1), 2);
        assert_eq!(transform_len(3), 8);
        assert_eq!(transform_len(4), 8);
        assert_eq!(transform_len(5), 16);
        for n in 1..200 {
            assert!(transform_len(n) >= 2 * n);
        }
    }

    #[test]
    fn scratch_size_formula() {
        assert_eq!(required_scratch_size(0), 0);
        // L = 2: 3 lanes + work + one twiddle
        assert_eq!(required_scratch_size(1), 9);
        // L = 32
        assert_eq!(required_scratch_size(16), 144);
    }

    #[test]
    fn scratch_size_is_monotonic() {
        let mut prev = 0;
        for n in 0..300 {
            let size = required_scratch_size(n);
            assert!(size >= prev);
            prev = size;
        }
    }

    #[test]
    fn estimate_grows_with_size() {
        assert!(estimate_scratch_bytes(10_000) > estimate_scratch_bytes(1_000));
        assert_eq!(estimate_scratch_bytes(1), 72);
    }

    #[test]
    fn split_partitions_disjointly() {
        let mut scratch = vec![0; required_scratch_size(5) + 3];
        let layout = ScratchLayout::split(&mut scratch, 5);
        assert_eq!(layout.len, 16);
        for lane in &layout.lanes {
            assert_eq!(lane.len(), 16);
        }
        assert_eq!(layout.work.len(), 16);
        assert_eq!(layout.twiddles.len(), 8);
    }

    #[test]
    #[should_panic(expected = "transform needs at least")]
    fn split_rejects_short_scratch() {
        let mut scratch = vec![0; required_scratch_size(5) - 1];
        let _ = ScratchLayout::split(&mut scratch, 5);
    }
}
