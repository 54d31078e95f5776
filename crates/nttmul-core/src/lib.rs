//! # nttmul-core
//!
//! Exact multiplication of unsigned multi-word integers stored as
//! little-endian `u64` words.
//!
//! Small operands use schoolbook multiplication; larger ones go through a
//! number-theoretic transform over three 62-bit primes, recombined with
//! Garner's algorithm. All working memory is a caller-supplied scratch slice
//! sized by [`required_scratch_size`].
//!
//! ```
//! use nttmul_core::{multiply, required_scratch_size};
//!
//! let a = [u64::MAX];
//! let b = [u64::MAX];
//! let mut dest = [0; 2];
//! let mut scratch = vec![0; required_scratch_size(1)];
//! multiply(&a, &b, &mut dest, &mut scratch);
//! assert_eq!(dest, [1, u64::MAX - 1]);
//! ```

pub mod batch;
pub mod config;
pub mod constants;
pub mod convolution;
pub mod error;
#[cfg(feature = "gmp")]
pub mod gmp;
pub mod layout;
pub mod modular;
pub mod mul;
pub mod ntt;
pub mod schoolbook;
pub mod word;

// Re-exports
pub use config::{MulConfig, MulPath};
pub use constants::{DEFAULT_NTT_THRESHOLD, MAX_NTT_WORDS};
pub use error::{ConfigError, ContractError};
pub use layout::{estimate_scratch_bytes, required_scratch_size};
pub use mul::{check_buffers, mul_transform, mul_vec, multiply, square, square_vec, Multiplier};
pub use schoolbook::mul_schoolbook;
pub use word::Word;
