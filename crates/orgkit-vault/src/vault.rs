use std::{
    fs,
    path::{Path, PathBuf},
};

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce,
};
use tracing::{debug, instrument};

use crate::{error::VaultError, key::KeyMaterial, locator::KeyLocator};

/// Default key file, resolved against the working directory.
pub const DEFAULT_KEY_FILE: &str = ".token_key";
/// Default token (ciphertext) file, resolved against the working directory.
pub const DEFAULT_TOKEN_FILE: &str = ".token";

/// AES-GCM nonce length in bytes (96 bit).
pub const NONCE_LEN: usize = 12;

/// Encrypt a secret under a freshly generated key.
///
/// The returned blob is the random nonce followed by the ciphertext and
/// authentication tag, raw bytes with no header. Every call draws a new key
/// and a new nonce, so two encryptions of the same secret never match.
pub fn encrypt(secret: &str) -> Result<(Vec<u8>, KeyMaterial), VaultError> {
    let key = KeyMaterial::generate();
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
    // AES-GCM encryption only fails on plaintext lengths far beyond anything
    // a credential string can reach.
    let ciphertext = cipher
        .encrypt(&nonce, secret.as_bytes())
        .map_err(|_| VaultError::Encryption)?;

    let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    blob.extend_from_slice(nonce.as_slice());
    blob.extend_from_slice(&ciphertext);
    Ok((blob, key))
}

/// Decrypt a nonce-prefixed blob with the given key.
///
/// Any mismatch (wrong key, flipped byte, truncation, non-UTF-8 plaintext)
/// fails with [`VaultError::Decryption`]; the authentication tag makes
/// tampering detectable, so garbage plaintext is never returned.
pub fn decrypt(blob: &[u8], key: &KeyMaterial) -> Result<String, VaultError> {
    if blob.len() < NONCE_LEN {
        return Err(VaultError::Decryption);
    }
    let (nonce, ciphertext) = blob.split_at(NONCE_LEN);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| VaultError::Decryption)?;
    String::from_utf8(plaintext).map_err(|_| VaultError::Decryption)
}

/// Protects one secret string at rest, recoverable only via the paired key.
///
/// Key and token live as two independent files; their pairing is an
/// operational invariant, not a structural one, so a mismatched pair is a
/// detected failure (`Decryption`), not silent corruption.
#[derive(Debug, Clone)]
pub struct TokenVault {
    key_path: PathBuf,
    token_path: PathBuf,
}

impl TokenVault {
    pub fn new(key_path: impl Into<PathBuf>, token_path: impl Into<PathBuf>) -> Self {
        Self {
            key_path: key_path.into(),
            token_path: token_path.into(),
        }
    }

    /// Vault at the fixed default paths in the working directory.
    pub fn with_default_paths() -> Self {
        Self::new(DEFAULT_KEY_FILE, DEFAULT_TOKEN_FILE)
    }

    /// Resolve the key path through the locator's config file.
    ///
    /// A missing config file falls back to the default paths; a config file
    /// that exists but is unusable is surfaced so a broken setup gets fixed
    /// rather than silently bypassed.
    pub fn from_locator(locator: &KeyLocator) -> Result<Self, VaultError> {
        match locator.read() {
            Ok(key_path) => Ok(Self::new(key_path, DEFAULT_TOKEN_FILE)),
            Err(VaultError::ConfigMissing { .. }) => Ok(Self::with_default_paths()),
            Err(err) => Err(err),
        }
    }

    pub fn key_path(&self) -> &Path {
        &self.key_path
    }

    pub fn token_path(&self) -> &Path {
        &self.token_path
    }

    /// Encrypt `secret` under a fresh key and persist both files.
    ///
    /// Writes the key file, then the token file, each a plain overwrite.
    /// The two writes are not atomic as a pair: a fault between them leaves
    /// a state where the next `load` fails with `FileNotFound` or
    /// `Decryption`. Saving rotates the key, so any previous ciphertext is
    /// permanently undecryptable afterwards.
    #[instrument(skip_all)]
    pub fn save(&self, secret: &str) -> Result<(), VaultError> {
        let (blob, key) = encrypt(secret)?;
        fs::write(&self.key_path, key.as_bytes())
            .map_err(|e| VaultError::from_write(&self.key_path, e))?;
        fs::write(&self.token_path, &blob)
            .map_err(|e| VaultError::from_write(&self.token_path, e))?;
        debug!(
            key_path = %self.key_path.display(),
            token_path = %self.token_path.display(),
            "token saved"
        );
        Ok(())
    }

    /// Read both files back and decrypt.
    #[instrument(skip_all)]
    pub fn load(&self) -> Result<String, VaultError> {
        let blob = fs::read(&self.token_path)
            .map_err(|e| VaultError::from_read(&self.token_path, e))?;
        let key_bytes =
            fs::read(&self.key_path).map_err(|e| VaultError::from_read(&self.key_path, e))?;
        let key = KeyMaterial::from_slice(&key_bytes)?;
        decrypt(&blob, &key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vault_in(dir: &Path) -> TokenVault {
        TokenVault::new(dir.join(".token_key"), dir.join(".token"))
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let vault = vault_in(dir.path());

        vault.save("ghp_exampleToken123").expect("save");
        assert!(vault.key_path().exists());
        assert!(vault.token_path().exists());
        assert_eq!(vault.load().expect("load"), "ghp_exampleToken123");
    }

    #[test]
    fn ciphertext_does_not_contain_plaintext() {
        let dir = tempfile::tempdir().expect("tempdir");
        let vault = vault_in(dir.path());

        vault.save("ghp_exampleToken123").expect("save");
        let blob = fs::read(vault.token_path()).expect("read blob");
        let needle = b"ghp_exampleToken123";
        assert!(!blob.windows(needle.len()).any(|w| w == needle));
    }

    #[test]
    fn save_path_errors_never_mention_decryption() {
        assert_eq!(VaultError::Encryption.to_string(), "token encryption failed");
    }

    #[test]
    fn two_encryptions_of_same_secret_differ() {
        let (blob_a, key_a) = encrypt("same-secret").expect("encrypt a");
        let (blob_b, key_b) = encrypt("same-secret").expect("encrypt b");

        assert_ne!(blob_a, blob_b);
        assert_ne!(key_a, key_b);
    }

    #[test]
    fn flipping_any_byte_is_detected() {
        let (blob, key) = encrypt("secret").expect("encrypt");
        for i in 0..blob.len() {
            let mut tampered = blob.clone();
            tampered[i] ^= 0x01;
            let err = decrypt(&tampered, &key).expect_err("tamper at byte");
            assert!(matches!(err, VaultError::Decryption), "byte {i}");
        }
    }

    #[test]
    fn truncated_blob_is_detected() {
        let (blob, key) = encrypt("secret").expect("encrypt");
        let err = decrypt(&blob[..blob.len() - 1], &key).expect_err("truncated");
        assert!(matches!(err, VaultError::Decryption));

        let err = decrypt(&blob[..4], &key).expect_err("shorter than a nonce");
        assert!(matches!(err, VaultError::Decryption));
    }

    #[test]
    fn key_from_different_save_never_decrypts() {
        let (blob, _key) = encrypt("secret").expect("encrypt");
        let (_other_blob, other_key) = encrypt("secret").expect("encrypt again");

        let err = decrypt(&blob, &other_key).expect_err("wrong key");
        assert!(matches!(err, VaultError::Decryption));
    }

    #[test]
    fn save_rotates_key_and_invalidates_old_ciphertext() {
        let dir = tempfile::tempdir().expect("tempdir");
        let vault = vault_in(dir.path());

        vault.save("first").expect("first save");
        let old_blob = fs::read(vault.token_path()).expect("old blob");

        vault.save("second").expect("second save");
        assert_eq!(vault.load().expect("load"), "second");

        // The old ciphertext is undecryptable under the rotated key.
        let new_key =
            KeyMaterial::from_slice(&fs::read(vault.key_path()).expect("key")).expect("key bytes");
        let err = decrypt(&old_blob, &new_key).expect_err("stale ciphertext");
        assert!(matches!(err, VaultError::Decryption));
    }

    #[test]
    fn load_without_token_file_fails_with_file_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let vault = vault_in(dir.path());

        let err = vault.load().expect_err("nothing saved");
        assert!(matches!(err, VaultError::FileNotFound { ref path } if path == vault.token_path()));
    }

    #[test]
    fn load_after_deleting_key_file_fails_with_file_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let vault = vault_in(dir.path());

        vault.save("ghp_exampleToken123").expect("save");
        fs::remove_file(vault.key_path()).expect("delete key");

        let err = vault.load().expect_err("key deleted");
        assert!(matches!(err, VaultError::FileNotFound { ref path } if path == vault.key_path()));
    }

    #[test]
    fn load_with_corrupted_key_file_fails_with_decryption() {
        let dir = tempfile::tempdir().expect("tempdir");
        let vault = vault_in(dir.path());

        vault.save("secret").expect("save");
        fs::write(vault.key_path(), b"not a real key").expect("corrupt key");

        let err = vault.load().expect_err("corrupted key");
        assert!(matches!(err, VaultError::Decryption));
    }

    #[test]
    fn interrupted_save_leaves_detectable_mismatch() {
        // Simulates a fault between the key write and the token write: the
        // key file was rotated but the token file still holds the old blob.
        let dir = tempfile::tempdir().expect("tempdir");
        let vault = vault_in(dir.path());

        vault.save("first").expect("save");
        let (_, fresh_key) = encrypt("first").expect("encrypt");
        fs::write(vault.key_path(), fresh_key.as_bytes()).expect("rotate key only");

        let err = vault.load().expect_err("mismatched pair");
        assert!(matches!(err, VaultError::Decryption));
    }

    #[test]
    fn save_into_missing_directory_fails_with_io() {
        let dir = tempfile::tempdir().expect("tempdir");
        let vault = TokenVault::new(
            dir.path().join("absent/.token_key"),
            dir.path().join("absent/.token"),
        );

        let err = vault.save("secret").expect_err("parent missing");
        assert!(matches!(err, VaultError::Io { .. }));
    }

    #[test]
    fn from_locator_uses_configured_key_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let locator = KeyLocator::new(dir.path().join(".orgkit"));
        let key_path = dir.path().join("custom_key");
        locator.write(&key_path).expect("write locator");

        let vault = TokenVault::from_locator(&locator).expect("from_locator");
        assert_eq!(vault.key_path(), key_path);
        assert_eq!(vault.token_path(), Path::new(DEFAULT_TOKEN_FILE));
    }

    #[test]
    fn from_locator_falls_back_to_defaults_when_config_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let locator = KeyLocator::new(dir.path().join(".orgkit"));

        let vault = TokenVault::from_locator(&locator).expect("fallback");
        assert_eq!(vault.key_path(), Path::new(DEFAULT_KEY_FILE));
        assert_eq!(vault.token_path(), Path::new(DEFAULT_TOKEN_FILE));
    }

    #[test]
    fn from_locator_surfaces_malformed_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = dir.path().join(".orgkit");
        fs::write(&config, "wrong_entry = \"x\"\n").expect("write config");

        let err = TokenVault::from_locator(&KeyLocator::new(&config)).expect_err("malformed");
        assert!(matches!(err, VaultError::ConfigMalformed { .. }));
    }
}
