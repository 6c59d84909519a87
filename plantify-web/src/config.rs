//! Data folder resolution and preparation
//!
//! Priority order:
//! 1. Command-line argument / environment variable (via clap)
//! 2. OS-dependent compiled default

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Resolve the data folder holding mutable app files (contacts.csv)
pub fn resolve_data_folder(cli_arg: Option<&Path>) -> PathBuf {
    match cli_arg {
        Some(path) => path.to_path_buf(),
        None => default_data_folder(),
    }
}

/// OS-dependent default data folder path
fn default_data_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/plantify
        dirs::data_local_dir()
            .map(|d| d.join("plantify"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/plantify"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/plantify
        dirs::data_dir()
            .map(|d| d.join("plantify"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/plantify"))
    } else if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\plantify
        dirs::data_local_dir()
            .map(|d| d.join("plantify"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\plantify"))
    } else {
        PathBuf::from("./plantify_data")
    }
}

/// Create the data folder if it does not exist yet
pub fn ensure_data_folder(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)
        .with_context(|| format!("Failed to create data folder {}", path.display()))?;
    Ok(())
}
