use std::fmt;

use rand::{rngs::OsRng, RngCore};

use crate::error::VaultError;

/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;

/// Symmetric key material for token encryption at rest.
///
/// Generated fresh from the OS CSPRNG on every save (key rotation); never
/// derived from the secret it protects. The `Debug` impl is redacted so key
/// bytes cannot leak through logs.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyMaterial {
    bytes: [u8; KEY_LEN],
}

impl KeyMaterial {
    /// Generate a fresh random key.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Rebuild key material from raw file bytes. A wrong length means the
    /// key file is truncated or not a key file at all; that is a corrupted
    /// key, reported as a decryption failure.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, VaultError> {
        if bytes.len() != KEY_LEN {
            return Err(VaultError::Decryption);
        }
        let mut out = [0u8; KEY_LEN];
        out.copy_from_slice(bytes);
        Ok(Self { bytes: out })
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeyMaterial([redacted])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_produces_distinct_keys() {
        let a = KeyMaterial::generate();
        let b = KeyMaterial::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn from_slice_round_trips() {
        let key = KeyMaterial::generate();
        let rebuilt = KeyMaterial::from_slice(key.as_bytes()).expect("rebuild");
        assert_eq!(key, rebuilt);
    }

    #[test]
    fn from_slice_rejects_wrong_length() {
        let err = KeyMaterial::from_slice(&[0u8; 16]).expect_err("short key");
        assert!(matches!(err, VaultError::Decryption));
    }

    #[test]
    fn debug_output_is_redacted() {
        let key = KeyMaterial::generate();
        assert_eq!(format!("{key:?}"), "KeyMaterial([redacted])");
    }
}
