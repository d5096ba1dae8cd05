//! XDG-style path resolution for the configuration directory.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "babel";

/// Returns the configuration directory for babel.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/babel` if `XDG_CONFIG_HOME` is set and not empty
/// 2. `~/.config/babel` otherwise
pub fn config_dir() -> Result<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(xdg).join(APP_DIR));
    }

    let home = dirs::home_dir().context("Failed to determine home directory")?;
    Ok(home.join(".config").join(APP_DIR))
}
