//! Crossover selection from path timings.

use nttmul_core::DEFAULT_NTT_THRESHOLD;

use crate::microbench::{self, CrossoverPoint};
use crate::runner::RunnerConfig;

/// Smallest sampled size from which the transform wins at every larger
/// sampled size, or `None` if it never settles ahead.
///
/// Requiring the win to persist keeps one noisy sample from pulling the
/// threshold down.
#[must_use]
pub fn select_threshold(points: &[CrossoverPoint]) -> Option<usize> {
    let mut sorted = points.to_vec();
    sorted.sort_by_key(|p| p.words);

    let losing = sorted.iter().rposition(|p| !p.transform_is_faster());
    let first_winning = losing.map_or(0, |i| i + 1);
    sorted.get(first_winning).map(|p| p.words)
}

/// Bisect between a losing size `low` and a winning size `high`.
pub fn refine(mut low: usize, mut high: usize, rounds: u32, config: RunnerConfig) -> usize {
    for _ in 0..rounds {
        if high.saturating_sub(low) <= low / 8 {
            break;
        }
        let mid = low + (high - low) / 2;
        let point = microbench::compare_paths(&[mid], config);
        match point.first() {
            Some(p) if p.transform_is_faster() => high = mid,
            Some(_) => low = mid,
            None => break,
        }
    }
    high
}

/// Quick crossover estimate over `sizes`, falling back to the default.
#[must_use]
pub fn estimate_threshold(sizes: &[usize], config: RunnerConfig) -> usize {
    let points = microbench::compare_paths(sizes, config);
    let Some(threshold) = select_threshold(&points) else {
        tracing::info!(
            default = DEFAULT_NTT_THRESHOLD,
            "transform never faster on sampled sizes, keeping default threshold"
        );
        return DEFAULT_NTT_THRESHOLD;
    };

    let below = points
        .iter()
        .filter(|p| p.words < threshold)
        .map(|p| p.words)
        .max();
    match below {
        Some(low) => refine(low, threshold, 3, config),
        None => threshold,
    }
}
