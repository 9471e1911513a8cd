use std::fmt;

use crate::{error::VaultError, vault::TokenVault};

/// Explicit, lazily-initialized credential cache.
///
/// Owns the vault and loads the secret at most once per process unless
/// invalidated. Collaborators receive `&str`, never the holder, so rotation
/// stays an explicit operation instead of hidden global state.
pub struct TokenHolder {
    vault: TokenVault,
    cached: Option<String>,
}

impl fmt::Debug for TokenHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The cached plaintext stays out of any Debug output.
        f.debug_struct("TokenHolder")
            .field("vault", &self.vault)
            .field("cached", &self.cached.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

impl TokenHolder {
    pub fn new(vault: TokenVault) -> Self {
        Self {
            vault,
            cached: None,
        }
    }

    /// The plaintext secret, loaded from the vault on first use.
    pub fn token(&mut self) -> Result<&str, VaultError> {
        let token = match self.cached.take() {
            Some(token) => token,
            None => self.vault.load()?,
        };
        Ok(self.cached.insert(token).as_str())
    }

    /// Drop the cached value so the next `token` call re-reads the vault,
    /// e.g. after a rotation by `save`.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}
