//! Configuration file locations

use std::path::PathBuf;

/// File name of the configuration file
pub const CONFIG_FILE_NAME: &str = "plume.toml";

/// Default configuration path
///
/// - Unix: `$XDG_CONFIG_HOME/plume/plume.toml` or `~/.config/plume/plume.toml`
/// - Windows: `%APPDATA%\plume\plume.toml`
pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    Ok(dir.join("plume").join(CONFIG_FILE_NAME))
}
