//! Contract and configuration errors.

use thiserror::Error;

/// A violated precondition of the multiplication entry points.
///
/// These are caller defects: the dispatcher panics with the message rather
/// than returning them. [`crate::mul::check_buffers`] exposes the same checks
/// for callers that validate ahead of time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// Destination length differs from `len(a) + len(b)`.
    #[error("destination holds {actual} words, the product needs exactly {expected}")]
    DestinationLength {
        /// Required length.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },

    /// Scratch buffer shorter than `required_scratch_size`.
    #[error("scratch holds {actual} words, the transform needs at least {required}")]
    ScratchTooSmall {
        /// Minimum length.
        required: usize,
        /// Supplied length.
        actual: usize,
    },

    /// Operand longer than the transform can represent.
    #[error("operand of {len} words exceeds the transform limit of {max} words")]
    OperandTooLong {
        /// Operand length.
        len: usize,
        /// Largest accepted length.
        max: u64,
    },
}

/// Invalid configuration input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A value could not be parsed.
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        /// Setting name.
        key: &'static str,
        /// Raw value.
        value: String,
        /// Parse failure.
        reason: String,
    },

    /// Threshold above the transform limit.
    #[error("threshold {value} exceeds the transform limit of {max} words (use `never` to disable)")]
    ThresholdOutOfRange {
        /// Requested threshold.
        value: usize,
        /// Transform limit.
        max: u64,
    },
}
