use std::path::PathBuf;

use color_eyre::Result;
use orgkit_vault::{vault::DEFAULT_TOKEN_FILE, KeyLocator, TokenVault};
use tracing::debug;

use crate::config::Config;

/// Build the token vault from config overrides, falling back to the
/// key-locator indirection and then to the fixed default paths.
pub fn from_config(config: &Config) -> Result<TokenVault> {
    let token_path = config
        .token_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TOKEN_FILE));

    if let Some(key_path) = &config.key_file {
        debug!(key_path = %key_path.display(), "vault paths from config override");
        return Ok(TokenVault::new(key_path.clone(), token_path));
    }

    let resolved = TokenVault::from_locator(&locator_from_config(config))?;
    Ok(TokenVault::new(resolved.key_path().to_path_buf(), token_path))
}

pub fn locator_from_config(config: &Config) -> KeyLocator {
    match &config.locator_file {
        Some(path) => KeyLocator::new(path),
        None => KeyLocator::default(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use orgkit_vault::vault::DEFAULT_KEY_FILE;

    use super::*;

    #[test]
    fn explicit_overrides_win() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config {
            key_file: Some(dir.path().join("k")),
            token_file: Some(dir.path().join("t")),
            ..Config::default()
        };

        let vault = from_config(&config).expect("from_config");
        assert_eq!(vault.key_path(), dir.path().join("k"));
        assert_eq!(vault.token_path(), dir.path().join("t"));
    }

    #[test]
    fn locator_entry_supplies_key_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let locator_path = dir.path().join(".orgkit");
        KeyLocator::new(&locator_path)
            .write(dir.path().join("located_key"))
            .expect("write locator");

        let config = Config {
            locator_file: Some(locator_path),
            ..Config::default()
        };

        let vault = from_config(&config).expect("from_config");
        assert_eq!(vault.key_path(), dir.path().join("located_key"));
        assert_eq!(vault.token_path(), Path::new(DEFAULT_TOKEN_FILE));
    }

    #[test]
    fn missing_locator_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config {
            locator_file: Some(dir.path().join("absent")),
            ..Config::default()
        };

        let vault = from_config(&config).expect("from_config");
        assert_eq!(vault.key_path(), Path::new(DEFAULT_KEY_FILE));
        assert_eq!(vault.token_path(), Path::new(DEFAULT_TOKEN_FILE));
    }
}
