use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::VaultError;

/// Default locator config file, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".orgkit";

/// On-disk shape of the locator file: a single recognized entry.
#[derive(Debug, Default, Deserialize, Serialize)]
struct LocatorFile {
    key_file_location: Option<PathBuf>,
}

/// Durable pointer telling the vault where the symmetric key file lives.
///
/// The locator owns exactly one file and nothing else. No locking: the
/// single-writer assumption holds because a human or a one-shot setup script
/// drives it.
#[derive(Debug, Clone)]
pub struct KeyLocator {
    config_path: PathBuf,
}

impl KeyLocator {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Read the stored key file path.
    ///
    /// The returned path is not checked for existence; that is the caller's
    /// concern.
    pub fn read(&self) -> Result<PathBuf, VaultError> {
        if !self.config_path.exists() {
            return Err(VaultError::ConfigMissing {
                path: self.config_path.clone(),
            });
        }
        let contents = fs::read_to_string(&self.config_path)
            .map_err(|e| VaultError::from_read(&self.config_path, e))?;
        let parsed: LocatorFile =
            toml::from_str(&contents).map_err(|_| VaultError::ConfigMalformed {
                path: self.config_path.clone(),
            })?;
        parsed
            .key_file_location
            .ok_or_else(|| VaultError::ConfigMalformed {
                path: self.config_path.clone(),
            })
    }

    /// Overwrite (never merge) the config file with the single entry.
    pub fn write(&self, key_path: impl Into<PathBuf>) -> Result<(), VaultError> {
        let file = LocatorFile {
            key_file_location: Some(key_path.into()),
        };
        let body = toml::to_string(&file).map_err(|e| {
            VaultError::from_write(&self.config_path, std::io::Error::other(e))
        })?;
        fs::write(&self.config_path, body)
            .map_err(|e| VaultError::from_write(&self.config_path, e))?;
        debug!(path = %self.config_path.display(), "wrote key file location");
        Ok(())
    }
}

impl Default for KeyLocator {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_FILE)
    }
}
