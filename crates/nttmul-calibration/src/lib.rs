//! # nttmul-calibration
//!
//! Measures where the transform overtakes schoolbook multiplication on the
//! current machine and persists the result as a calibration profile.

pub mod adaptive;
pub mod calibration;
pub mod error;
pub mod io;
pub mod microbench;
pub mod profile;
pub mod runner;

pub use calibration::{CalibrationEngine, CalibrationMode};
pub use error::CalibrationError;
pub use profile::CalibrationProfile;
