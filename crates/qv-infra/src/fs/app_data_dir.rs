use anyhow::{Context, Result};
use std::path::PathBuf;

pub const PREFERENCES_FILE: &str = "preferences.json";

/// Get the QVuew application data root directory.
///
/// # Platform-specific Paths
/// - macOS: ~/Library/Application Support/QVuew
/// - Windows: %APPDATA%\QVuew
/// - Linux: $XDG_DATA_HOME/QVuew or ~/.local/share/QVuew
///
/// This function does not create the directory.
pub fn app_data_dir() -> Result<PathBuf> {
    let base_dir =
        get_platform_data_dir().context("Failed to get platform-specific data directory")?;

    Ok(base_dir.join("QVuew"))
}

/// Default location of the preference store file.
pub fn preferences_path() -> Result<PathBuf> {
    Ok(app_data_dir()?.join(PREFERENCES_FILE))
}

pub fn log_dir() -> Result<PathBuf> {
    Ok(app_data_dir()?.join("logs"))
}

fn get_platform_data_dir() -> Result<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        if let Some(xdg_data_home) = std::env::var_os("XDG_DATA_HOME") {
            return Ok(PathBuf::from(xdg_data_home));
        }
    }

    dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Unable to get platform data directory"))
}
