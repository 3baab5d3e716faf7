//! Data directory layout for MedAssist.

use std::path::{Path, PathBuf};

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `MEDASSIST_DATA_DIR` environment variable
/// 2. `~/.medassist`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("MEDASSIST_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".medassist");
    }

    // Last resort: current directory
    PathBuf::from(".medassist")
}

/// Path of the persisted settings file (webhook URL).
pub fn settings_path(data_dir: &Path) -> PathBuf {
    data_dir.join("settings.toml")
}

/// Path of the optional client configuration file.
pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}
