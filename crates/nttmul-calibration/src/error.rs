//! Calibration errors.

use std::path::PathBuf;

use nttmul_core::ConfigError;
use thiserror::Error;

/// Failure to load, validate, or persist a calibration profile.
#[derive(Debug, Error)]
pub enum CalibrationError {
    /// Filesystem failure.
    #[error("profile I/O failed for {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Malformed profile contents.
    #[error("profile is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Profile written by an incompatible format version.
    #[error("profile version {found} does not match expected version {expected}")]
    VersionMismatch {
        /// Version in the file.
        found: u32,
        /// Version this build writes.
        expected: u32,
    },

    /// Profile threshold rejected by the multiplier configuration.
    #[error("profile threshold rejected: {0}")]
    InvalidThreshold(#[from] ConfigError),

    /// Profile calibrated on different hardware.
    #[error("profile was calibrated on {profile:?}, this machine is {current:?}")]
    CpuMismatch {
        /// Fingerprint stored in the profile.
        profile: String,
        /// Fingerprint of this machine.
        current: String,
    },

    /// No configuration directory could be determined.
    #[error("no configuration directory available")]
    NoConfigDir,
}

impl CalibrationError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
