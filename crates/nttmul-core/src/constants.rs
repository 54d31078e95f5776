//! Thresholds and limits for multiplication dispatch.

/// Default crossover (in words of the longer operand) at and above which the
/// transform path is used.
pub const DEFAULT_NTT_THRESHOLD: usize = 512;

/// Longest operand, in words, the transform path accepts.
///
/// The transform length `next_pow2(2n)` must stay within the primes' common
/// two-adicity of 2^55.
pub const MAX_NTT_WORDS: u64 = 1 << 54;

/// Environment variable overriding the crossover threshold.
pub const ENV_NTT_THRESHOLD: &str = "NTTMUL_NTT_THRESHOLD";
