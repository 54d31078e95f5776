//! Profile persistence (load/save).

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::CalibrationError;
use crate::profile::{self, CalibrationProfile, PROFILE_VERSION};

const PROFILE_FILENAME: &str = "nttmul_calibration.json";
const CONFIG_DIR_NAME: &str = "nttmul";

/// Load the calibration profile from the standard location.
///
/// Tries the XDG config dir first, then the working directory. `Ok(None)`
/// means no profile file exists.
pub fn load_profile() -> Result<Option<CalibrationProfile>, CalibrationError> {
    let candidates = xdg_profile_path().into_iter().chain([cwd_profile_path()]);
    for path in candidates {
        if path.exists() {
            return load_from_path(&path).map(Some);
        }
    }
    Ok(None)
}

/// Load a profile and check it against this build and machine.
///
/// Any failure is logged and reported as `None`, so callers fall back to
/// defaults.
#[must_use]
pub fn load_validated_profile() -> Option<CalibrationProfile> {
    let loaded = match load_profile() {
        Ok(Some(p)) => p,
        Ok(None) => return None,
        Err(err) => {
            tracing::info!(%err, "Ignoring unreadable calibration profile");
            return None;
        }
    };
    match validate_profile(&loaded, &profile::cpu_fingerprint()) {
        Ok(()) => Some(loaded),
        Err(err) => {
            tracing::info!(%err, "Ignoring cached calibration profile");
            None
        }
    }
}

/// Check version, threshold, and CPU fingerprint.
pub fn validate_profile(
    p: &CalibrationProfile,
    current_fingerprint: &str,
) -> Result<(), CalibrationError> {
    if !p.is_compatible() {
        return Err(CalibrationError::VersionMismatch {
            found: p.version,
            expected: PROFILE_VERSION,
        });
    }
    p.to_config()?;
    if !p.matches_cpu(current_fingerprint) {
        return Err(CalibrationError::CpuMismatch {
            profile: p.cpu_fingerprint.clone(),
            current: current_fingerprint.to_string(),
        });
    }
    Ok(())
}

/// Save the profile to the XDG config directory, or the working directory
/// when none is available. Returns the path written.
pub fn save_profile(p: &CalibrationProfile) -> Result<PathBuf, CalibrationError> {
    let path = match xdg_profile_path() {
        Some(xdg_path) => {
            if let Some(parent) = xdg_path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| CalibrationError::io(parent, e))?;
            }
            xdg_path
        }
        None => cwd_profile_path(),
    };
    save_to_path(p, &path)?;
    tracing::info!(path = %path.display(), threshold = p.ntt_threshold, "Saved calibration profile");
    Ok(path)
}

/// Save profile to a specific path.
pub fn save_to_path(p: &CalibrationProfile, path: &Path) -> Result<(), CalibrationError> {
    let content = serde_json::to_string_pretty(p)?;
    std::fs::write(path, content).map_err(|e| CalibrationError::io(path, e))
}

/// Read a profile from a specific path.
pub fn load_from_path(path: &Path) -> Result<CalibrationProfile, CalibrationError> {
    let content = std::fs::read_to_string(path).map_err(|e| CalibrationError::io(path, e))?;
    Ok(serde_json::from_str(&content)?)
}

/// Delete the saved profile if it exists.
pub fn delete_profile() -> Result<bool, CalibrationError> {
    let candidates = xdg_profile_path().into_iter().chain([cwd_profile_path()]);
    for path in candidates {
        if path.exists() {
            std::fs::remove_file(&path).map_err(|e| CalibrationError::io(&path, e))?;
            return Ok(true);
        }
    }
    Ok(false)
}

/// Profile location under the XDG config dir, if one can be determined.
#[must_use]
pub fn xdg_profile_path() -> Option<PathBuf> {
    profile_path_from(std::env::var_os("XDG_CONFIG_HOME"), std::env::var_os("HOME"))
}

/// `$XDG_CONFIG_HOME/nttmul/<file>`, else `$HOME/.config/nttmul/<file>`.
fn profile_path_from(xdg_config_home: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    let config_dir = xdg_config_home
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home.map(|home| PathBuf::from(home).join(".config")))?;
    Some(config_dir.join(CONFIG_DIR_NAME).join(PROFILE_FILENAME))
}

/// Get the working directory profile path.
fn cwd_profile_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(format!(".{PROFILE_FILENAME}"))
}
