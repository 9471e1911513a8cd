use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors produced by the vault and the key locator.
#[derive(Debug, Error)]
pub enum VaultError {
    /// The locator config file does not exist.
    #[error("config file not found: {path}")]
    ConfigMissing { path: PathBuf },
    /// The locator config file exists but holds no usable
    /// `key_file_location` entry.
    #[error("config file has no usable key_file_location entry: {path}")]
    ConfigMalformed { path: PathBuf },
    /// Key or token file absent at load time. A missing secret is never
    /// treated as an empty secret.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },
    /// Key/ciphertext mismatch, corrupted or truncated data. The message is
    /// fixed text; nothing derived from key or plaintext appears in it.
    #[error("token decryption failed: key does not match ciphertext or data is corrupted")]
    Decryption,
    /// Cipher failure while producing ciphertext.
    #[error("token encryption failed")]
    Encryption,
    /// Read/write failure other than a missing file.
    #[error("i/o failure on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl VaultError {
    /// Map an I/O error from a read path, turning `NotFound` into the typed
    /// variant so callers can distinguish an absent file from a broken disk.
    pub(crate) fn from_read(path: &Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            VaultError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            VaultError::Io {
                path: path.to_path_buf(),
                source: err,
            }
        }
    }

    pub(crate) fn from_write(path: &Path, err: std::io::Error) -> Self {
        VaultError::Io {
            path: path.to_path_buf(),
            source: err,
        }
    }
}
