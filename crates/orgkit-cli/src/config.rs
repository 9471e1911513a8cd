use std::{
    fs,
    path::{Path, PathBuf},
};

use color_eyre::Result;
use dirs::config_dir;
use serde::{Deserialize, Serialize};

/// User-level configuration loaded from `~/.config/orgkit/config.toml`
/// (platform-specific). Every field is optional; the vault falls back to its
/// own defaults and the key-locator indirection when nothing is set here.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Override for the key-locator config file.
    pub locator_file: Option<PathBuf>,
    /// Explicit key file path, bypassing the locator.
    pub key_file: Option<PathBuf>,
    /// Explicit token (ciphertext) file path.
    pub token_file: Option<PathBuf>,
    /// Root folder for `orgkit backup`.
    pub backup_dir: Option<PathBuf>,
    /// GitHub endpoint settings (optional).
    pub github: Option<GitHubSettings>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct GitHubSettings {
    /// API base override, e.g. a GitHub Enterprise endpoint.
    pub api_base: Option<String>,
}

/// Load config from the default path; if missing, return defaults.
pub fn load() -> Result<Config> {
    let path = default_path()?;
    load_from_path(path)
}

/// Load config from a given path; if missing or empty, return defaults.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    let cfg: Config = toml::from_str(&contents)?;
    Ok(cfg)
}

/// Resolve the default config path (platform aware).
pub fn default_path() -> Result<PathBuf> {
    let base = config_dir().ok_or_else(|| color_eyre::eyre::eyre!("no config dir available"))?;
    Ok(base.join("orgkit").join("config.toml"))
}

/// Write the given config to disk, creating parent directories as needed.
/// Will not overwrite an existing file, to avoid clobbering user edits.
pub fn write_default_if_missing(config: &Config) -> Result<PathBuf> {
    let path = default_path()?;
    write_to_path_if_missing(config, &path)?;
    Ok(path)
}

fn write_to_path_if_missing(config: &Config, path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = toml::to_string_pretty(config)?;
    fs::write(path, body)?;
    Ok(())
}
