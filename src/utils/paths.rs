//! Cross-Platform Path Utilities
//!
//! Resolves the application directory (~/.aqua-verify/) and its files.

use std::path::{Path, PathBuf};

use crate::utils::error::{AppError, AppResult};

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the Aqua Verify directory (~/.aqua-verify/)
pub fn aqua_verify_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(".aqua-verify"))
}

/// Get the config file path (~/.aqua-verify/config.json)
pub fn config_path() -> AppResult<PathBuf> {
    Ok(aqua_verify_dir()?.join("config.json"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Get the Aqua Verify directory, creating it if it doesn't exist
pub fn ensure_aqua_verify_dir() -> AppResult<PathBuf> {
    let path = aqua_verify_dir()?;
    ensure_dir(&path)?;
    Ok(path)
}
