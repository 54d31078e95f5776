//! Multiplier configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_NTT_THRESHOLD, ENV_NTT_THRESHOLD, MAX_NTT_WORDS};
use crate::error::ConfigError;

/// Which algorithm a multiplication ran through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MulPath {
    /// Quadratic long multiplication.
    Schoolbook,
    /// Three-prime number-theoretic transform.
    Transform,
}

/// Tunable dispatch settings.
///
/// Only timing depends on these values; every setting yields the same product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MulConfig {
    /// Operands whose longer side has at least this many words use the transform.
    pub ntt_threshold: usize,
}

impl Default for MulConfig {
    fn default() -> Self {
        Self {
            ntt_threshold: DEFAULT_NTT_THRESHOLD,
        }
    }
}

impl MulConfig {
    /// Configuration with the given crossover threshold.
    #[must_use]
    pub fn with_threshold(ntt_threshold: usize) -> Self {
        Self { ntt_threshold }
    }

    /// Defaults overridden by `NTTMUL_NTT_THRESHOLD` when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each setting.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENV_NTT_THRESHOLD) {
            config.ntt_threshold = parse_threshold(&raw)?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Reject thresholds that can never be reached by a transformable operand,
    /// other than `usize::MAX`, which disables the transform outright.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = self.ntt_threshold;
        if t != usize::MAX && t as u64 > MAX_NTT_WORDS {
            return Err(ConfigError::ThresholdOutOfRange {
                value: t,
                max: MAX_NTT_WORDS,
            });
        }
        Ok(())
    }

    /// Path taken for operands of `len_a` and `len_b` words.
    #[must_use]
    pub fn path_for(&self, len_a: usize, len_b: usize) -> MulPath {
        if len_a.max(len_b) < self.ntt_threshold {
            MulPath::Schoolbook
        } else {
            MulPath::Transform
        }
    }
}

/// Parse a word count; `_` separators and the words `never`/`always` are accepted.
fn parse_threshold(raw: &str) -> Result<usize, ConfigError> {
    let trimmed = raw.trim();
    match trimmed {
        "never" => return Ok(usize::MAX),
        "always" => return Ok(0),
        _ => {}
    }
    trimmed
        .replace('_', "")
        .parse::<usize>()
        .map_err(|e| ConfigError::InvalidValue {
            key: ENV_NTT_THRESHOLD,
            value: raw.to_string(),
            reason: e.to_string(),
        })
}
