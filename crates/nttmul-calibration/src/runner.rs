//! Timing harness for calibration.

use std::time::{Duration, Instant};

/// Warmup and sample counts for one measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Untimed runs before sampling.
    pub warmup: u32,
    /// Timed runs; the median is reported.
    pub samples: u32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            warmup: 2,
            samples: 7,
        }
    }
}

impl RunnerConfig {
    /// Single warmup and three samples, for quick estimates.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            warmup: 1,
            samples: 3,
        }
    }
}

/// Time `f` according to `config`. At least one sample is always taken.
pub fn measure<F>(config: RunnerConfig, mut f: F) -> BenchmarkResult
where
    F: FnMut(),
{
    for _ in 0..config.warmup {
        f();
    }

    let samples = config.samples.max(1);
    let mut durations: Vec<Duration> = (0..samples)
        .map(|_| {
            let start = Instant::now();
            f();
            start.elapsed()
        })
        .collect();
    durations.sort_unstable();

    let mid = durations.len() / 2;
    let median = if durations.len() % 2 == 1 {
        durations[mid]
    } else {
        (durations[mid - 1] + durations[mid]) / 2
    };
    let total: Duration = durations.iter().sum();

    BenchmarkResult {
        name: String::new(),
        mean: total / samples,
        median,
        min: durations[0],
        max: durations[durations.len() - 1],
        samples,
    }
}

/// Summary of one measurement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkResult {
    /// Label, empty unless set with [`BenchmarkResult::with_name`].
    pub name: String,
    /// Mean sample time.
    pub mean: Duration,
    /// Median sample time.
    pub median: Duration,
    /// Fastest sample.
    pub min: Duration,
    /// Slowest sample.
    pub max: Duration,
    /// Number of timed samples.
    pub samples: u32,
}

impl BenchmarkResult {
    /// Attach a label.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Median in nanoseconds, saturating.
    #[must_use]
    pub fn median_ns(&self) -> u64 {
        u64::try_from(self.median.as_nanos()).unwrap_or(u64::MAX)
    }
}
