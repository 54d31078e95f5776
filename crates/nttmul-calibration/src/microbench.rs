//! Micro-benchmarks comparing the two multiplication paths.

use nttmul_core::schoolbook::mul_schoolbook;
use nttmul_core::{mul_transform, required_scratch_size};

use crate::runner::{measure, BenchmarkResult, RunnerConfig};

/// Timing of both paths at one operand size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossoverPoint {
    /// Words per operand.
    pub words: usize,
    /// Median schoolbook time.
    pub schoolbook_ns: u64,
    /// Median transform time.
    pub transform_ns: u64,
}

impl CrossoverPoint {
    /// Whether the transform won at this size.
    #[must_use]
    pub fn transform_is_faster(&self) -> bool {
        self.transform_ns < self.schoolbook_ns
    }
}

/// Time schoolbook multiplication of two `words`-word operands.
#[must_use]
pub fn bench_schoolbook(words: usize, config: RunnerConfig) -> BenchmarkResult {
    let a = make_operand(words, 1);
    let b = make_operand(words, 2);
    let mut dest = vec![0; 2 * words];
    measure(config, || mul_schoolbook(&a, &b, &mut dest)).with_name(format!("schoolbook_{words}"))
}

/// Time transform multiplication of two `words`-word operands.
#[must_use]
pub fn bench_transform(words: usize, config: RunnerConfig) -> BenchmarkResult {
    let a = make_operand(words, 1);
    let b = make_operand(words, 2);
    let mut dest = vec![0; 2 * words];
    let mut scratch = vec![0; required_scratch_size(words)];
    measure(config, || mul_transform(&a, &b, &mut dest, &mut scratch))
        .with_name(format!("transform_{words}"))
}

/// Compare both paths at each size in `sizes`.
#[must_use]
pub fn compare_paths(sizes: &[usize], config: RunnerConfig) -> Vec<CrossoverPoint> {
    sizes
        .iter()
        .map(|&words| {
            let point = CrossoverPoint {
                words,
                schoolbook_ns: bench_schoolbook(words, config).median_ns(),
                transform_ns: bench_transform(words, config).median_ns(),
            };
            tracing::debug!(
                words,
                schoolbook_ns = point.schoolbook_ns,
                transform_ns = point.transform_ns,
                "calibration sample"
            );
            point
        })
        .collect()
}

/// Geometric ladder of operand sizes from `min_words` to `max_words`, doubling.
#[must_use]
pub fn size_ladder(min_words: usize, max_words: usize) -> Vec<usize> {
    std::iter::successors(Some(min_words.max(1)), |&n| n.checked_mul(2))
        .take_while(|&n| n <= max_words)
        .collect()
}

/// Operand with every word populated, so no path can shortcut on zeros.
fn make_operand(words: usize, seed: u64) -> Vec<u64> {
    let mut state = seed;
    (0..words)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            state | 1
        })
        .collect()
}
