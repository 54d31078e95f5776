//! Public multiplication API.
//!
//! Routes operands below the crossover threshold to schoolbook
//! multiplication and everything else to the three-prime transform.

use nttmul_memory::ScratchPool;

use crate::config::{MulConfig, MulPath};
use crate::constants::MAX_NTT_WORDS;
use crate::convolution::{mul_ntt, sqr_ntt};
use crate::error::ContractError;
use crate::layout::required_scratch_size;
use crate::schoolbook::{mul_schoolbook, sqr_schoolbook};
use crate::word::Word;

/// Multiply `a` by `b` into `dest` with the default configuration.
///
/// `dest` must hold exactly `a.len() + b.len()` words and `scratch` at least
/// [`required_scratch_size`]`(max(a.len(), b.len()))`. Both are checked
/// regardless of the path taken; a violation panics before `dest` is touched.
pub fn multiply(a: &[Word], b: &[Word], dest: &mut [Word], scratch: &mut [u64]) {
    Multiplier::default().multiply(a, b, dest, scratch);
}

/// Square `a` into `dest` (`2 * a.len()` words) with the default configuration.
pub fn square(a: &[Word], dest: &mut [Word], scratch: &mut [u64]) {
    Multiplier::default().square(a, dest, scratch);
}

/// Multiply through the transform regardless of size.
pub fn mul_transform(a: &[Word], b: &[Word], dest: &mut [Word], scratch: &mut [u64]) {
    enforce(check_buffers(a.len(), b.len(), dest.len(), scratch.len()));
    if a.is_empty() || b.is_empty() {
        dest.fill(0);
        return;
    }
    mul_ntt(a, b, dest, scratch);
}

/// Validate buffer lengths for a product of `len_a` by `len_b` words.
///
/// The dispatcher panics on the same conditions; this lets callers check
/// ahead of time.
pub fn check_buffers(
    len_a: usize,
    len_b: usize,
    dest_len: usize,
    scratch_len: usize,
) -> Result<(), ContractError> {
    let n = len_a.max(len_b);
    if n as u64 > MAX_NTT_WORDS {
        return Err(ContractError::OperandTooLong {
            len: n,
            max: MAX_NTT_WORDS,
        });
    }
    let expected = len_a + len_b;
    if dest_len != expected {
        return Err(ContractError::DestinationLength {
            expected,
            actual: dest_len,
        });
    }
    let required = required_scratch_size(n);
    if scratch_len < required {
        return Err(ContractError::ScratchTooSmall {
            required,
            actual: scratch_len,
        });
    }
    Ok(())
}

/// Multiply into a freshly allocated vector, using this thread's scratch.
#[must_use]
pub fn mul_vec(a: &[Word], b: &[Word]) -> Vec<Word> {
    Multiplier::default().mul_vec(a, b)
}

/// Square into a freshly allocated vector, using this thread's scratch.
#[must_use]
pub fn square_vec(a: &[Word]) -> Vec<Word> {
    Multiplier::default().square_vec(a)
}

#[track_caller]
fn enforce(result: Result<(), ContractError>) {
    if let Err(err) = result {
        panic!("nttmul contract violation: {err}");
    }
}

/// Dispatcher bound to a configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Multiplier {
    config: MulConfig,
}

impl Multiplier {
    /// Dispatcher using `config`.
    #[must_use]
    pub fn new(config: MulConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &MulConfig {
        &self.config
    }

    /// Path a product of `len_a` by `len_b` words would take.
    #[must_use]
    pub fn path_for(&self, len_a: usize, len_b: usize) -> MulPath {
        self.config.path_for(len_a, len_b)
    }

    /// Multiply `a` by `b` into `dest`; see [`multiply`].
    pub fn multiply(&self, a: &[Word], b: &[Word], dest: &mut [Word], scratch: &mut [u64]) {
        enforce(check_buffers(a.len(), b.len(), dest.len(), scratch.len()));
        if a.is_empty() || b.is_empty() {
            dest.fill(0);
            return;
        }
        match self.path_for(a.len(), b.len()) {
            MulPath::Schoolbook => mul_schoolbook(a, b, dest),
            MulPath::Transform => {
                tracing::debug!(len_a = a.len(), len_b = b.len(), "transform multiply");
                mul_ntt(a, b, dest, scratch);
            }
        }
    }

    /// Square `a` into `dest`, transforming the operand only once on the
    /// transform path.
    pub fn square(&self, a: &[Word], dest: &mut [Word], scratch: &mut [u64]) {
        enforce(check_buffers(a.len(), a.len(), dest.len(), scratch.len()));
        if a.is_empty() {
            return;
        }
        match self.path_for(a.len(), a.len()) {
            MulPath::Schoolbook => sqr_schoolbook(a, dest),
            MulPath::Transform => {
                tracing::debug!(len = a.len(), "transform square");
                sqr_ntt(a, dest, scratch);
            }
        }
    }

    /// Multiply into a new vector, borrowing scratch from the calling thread.
    #[must_use]
    pub fn mul_vec(&self, a: &[Word], b: &[Word]) -> Vec<Word> {
        let mut dest = vec![0; a.len() + b.len()];
        let words = required_scratch_size(a.len().max(b.len()));
        nttmul_memory::thread_local::with_thread_scratch(words, |scratch| {
            self.multiply(a, b, &mut dest, scratch);
        });
        dest
    }

    /// Multiply into a new vector with scratch lent by `pool`.
    #[must_use]
    pub fn mul_pooled(&self, pool: &ScratchPool, a: &[Word], b: &[Word]) -> Vec<Word> {
        let mut dest = vec![0; a.len() + b.len()];
        let mut scratch = pool.acquire(required_scratch_size(a.len().max(b.len())));
        self.multiply(a, b, &mut dest, scratch.as_mut_slice());
        pool.release(scratch);
        dest
    }

    /// Square into a new vector, borrowing scratch from the calling thread.
    #[must_use]
    pub fn square_vec(&self, a: &[Word]) -> Vec<Word> {
        let mut dest = vec![0; 2 * a.len()];
        let words = required_scratch_size(a.len());
        nttmul_memory::thread_local::with_thread_scratch(words, |scratch| {
            self.square(a, &mut dest, scratch);
        });
        dest
    }
}
