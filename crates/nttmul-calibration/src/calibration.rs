//! Calibration engine.

use nttmul_core::MulConfig;

use crate::adaptive;
use crate::io;
use crate::microbench;
use crate::profile::CalibrationProfile;
use crate::runner::RunnerConfig;

/// Mode of calibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationMode {
    /// Full calibration: dense ladder, default sampling, bisection.
    Full,
    /// Auto calibration: sparse ladder, quick sampling.
    Auto,
    /// Cached: load from profile file.
    Cached,
}

/// Progress callback for calibration.
pub type ProgressCallback = Box<dyn Fn(CalibrationProgress) + Send>;

/// Progress information during calibration.
#[derive(Debug, Clone)]
pub struct CalibrationProgress {
    /// Current step name.
    pub step: String,
    /// Current step number (1-based).
    pub current: usize,
    /// Total number of steps.
    pub total: usize,
}

/// Calibration engine that measures the schoolbook/transform crossover.
pub struct CalibrationEngine {
    mode: CalibrationMode,
    sizes: Option<Vec<usize>>,
    progress_cb: Option<ProgressCallback>,
}

impl CalibrationEngine {
    /// Create a new calibration engine.
    #[must_use]
    pub fn new(mode: CalibrationMode) -> Self {
        Self {
            mode,
            sizes: None,
            progress_cb: None,
        }
    }

    /// Set a progress callback.
    #[must_use]
    pub fn with_progress(mut self, cb: ProgressCallback) -> Self {
        self.progress_cb = Some(cb);
        self
    }

    /// Replace the mode's size ladder (words per operand).
    #[must_use]
    pub fn with_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.sizes = Some(sizes);
        self
    }

    /// Run calibration and produce a profile.
    #[must_use]
    pub fn calibrate(&self) -> CalibrationProfile {
        match self.mode {
            CalibrationMode::Full => self.full_calibration(),
            CalibrationMode::Auto => self.auto_calibration(),
            CalibrationMode::Cached => self.load_cached(),
        }
    }

    /// Run calibration and return the resulting multiplier configuration.
    #[must_use]
    pub fn calibrated_config(&self) -> MulConfig {
        let profile = self.calibrate();
        profile.to_config().unwrap_or_else(|err| {
            tracing::warn!(%err, "Calibrated threshold rejected, using defaults");
            MulConfig::default()
        })
    }

    fn report_progress(&self, step: &str, current: usize, total: usize) {
        if let Some(cb) = &self.progress_cb {
            cb(CalibrationProgress {
                step: step.to_string(),
                current,
                total,
            });
        }
    }

    fn ladder(&self, default_min: usize, default_max: usize) -> Vec<usize> {
        self.sizes
            .clone()
            .unwrap_or_else(|| microbench::size_ladder(default_min, default_max))
    }

    fn full_calibration(&self) -> CalibrationProfile {
        let total_steps = 3;
        let config = RunnerConfig::default();

        self.report_progress("Timing schoolbook and transform paths", 1, total_steps);
        let sizes = self.ladder(16, 8192);
        let points = microbench::compare_paths(&sizes, config);

        self.report_progress("Bisecting crossover", 2, total_steps);
        let threshold = match adaptive::select_threshold(&points) {
            Some(t) => {
                let low = points.iter().map(|p| p.words).filter(|&w| w < t).max();
                low.map_or(t, |low| adaptive::refine(low, t, 5, config))
            }
            None => nttmul_core::DEFAULT_NTT_THRESHOLD,
        };

        self.report_progress("Building profile", 3, total_steps);
        tracing::info!(threshold, "Full calibration complete");
        CalibrationProfile::for_this_machine(threshold)
    }

    fn auto_calibration(&self) -> CalibrationProfile {
        let total_steps = 2;

        self.report_progress("Running adaptive estimation", 1, total_steps);
        let sizes = self.ladder(64, 2048);
        let threshold = adaptive::estimate_threshold(&sizes, RunnerConfig::quick());

        self.report_progress("Building profile", 2, total_steps);
        tracing::info!(threshold, "Auto calibration complete");
        CalibrationProfile::for_this_machine(threshold)
    }

    #[allow(clippy::unused_self)]
    fn load_cached(&self) -> CalibrationProfile {
        io::load_validated_profile().unwrap_or_else(|| {
            tracing::warn!("No usable cached profile, using defaults");
            CalibrationProfile::default()
        })
    }
}
