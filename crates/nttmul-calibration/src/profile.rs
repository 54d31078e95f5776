//! Calibration profile (serializable).

use serde::{Deserialize, Serialize};

use nttmul_core::{ConfigError, MulConfig, DEFAULT_NTT_THRESHOLD};

/// Current profile format version.
pub const PROFILE_VERSION: u32 = 1;

/// Crossover measured on one machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationProfile {
    /// Profile format version for compatibility checking.
    pub version: u32,
    /// Measured schoolbook/transform crossover, in words.
    pub ntt_threshold: usize,
    /// CPU model used for calibration.
    pub cpu_model: String,
    /// Number of CPU cores.
    pub num_cores: usize,
    /// CPU fingerprint for invalidation.
    pub cpu_fingerprint: String,
    /// Calibration timestamp.
    pub timestamp: String,
}

impl Default for CalibrationProfile {
    fn default() -> Self {
        Self {
            version: PROFILE_VERSION,
            ntt_threshold: DEFAULT_NTT_THRESHOLD,
            cpu_model: String::new(),
            num_cores: num_cpus(),
            cpu_fingerprint: String::new(),
            timestamp: String::new(),
        }
    }
}

impl CalibrationProfile {
    /// Profile for `ntt_threshold`, stamped with this machine and the current time.
    #[must_use]
    pub fn for_this_machine(ntt_threshold: usize) -> Self {
        Self {
            version: PROFILE_VERSION,
            ntt_threshold,
            cpu_model: cpu_model(),
            num_cores: num_cpus(),
            cpu_fingerprint: cpu_fingerprint(),
            timestamp: current_timestamp(),
        }
    }

    /// Check if this profile is compatible with the current version.
    #[must_use]
    pub fn is_compatible(&self) -> bool {
        self.version == PROFILE_VERSION
    }

    /// Check if this profile matches the current CPU.
    #[must_use]
    pub fn matches_cpu(&self, current_fingerprint: &str) -> bool {
        if self.cpu_fingerprint.is_empty() || current_fingerprint.is_empty() {
            return true; // can't verify, assume compatible
        }
        self.cpu_fingerprint == current_fingerprint
    }

    /// Multiplier configuration carried by this profile.
    pub fn to_config(&self) -> Result<MulConfig, ConfigError> {
        let config = MulConfig::with_threshold(self.ntt_threshold);
        config.validate()?;
        Ok(config)
    }

    /// Whether the threshold is one the multiplier accepts.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.ntt_threshold > 0 && self.to_config().is_ok()
    }
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZero::get)
        .unwrap_or(4)
}

/// CPU fingerprint from model and core count.
#[must_use]
pub fn cpu_fingerprint() -> String {
    let cores = num_cpus();
    let model = cpu_model();
    if model.is_empty() {
        format!("cores={cores}")
    } else {
        format!("{model};cores={cores}")
    }
}

/// Get the current CPU model string.
#[must_use]
pub fn cpu_model() -> String {
    use sysinfo::System;
    let sys = System::new_all();
    sys.cpus()
        .first()
        .map(|cpu| cpu.brand().trim().to_string())
        .unwrap_or_default()
}

/// Seconds since the Unix epoch, as `unix:<secs>`.
#[must_use]
pub fn current_timestamp() -> String {
    let dur = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    format!("unix:{}", dur.as_secs())
}
