use thiserror::Error;

/// Errors produced when acquiring a secret from an operator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SecretError {
    /// The source could not provide a secret (closed terminal, cancelled
    /// prompt, exhausted test double).
    #[error("secret unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Capability for obtaining a plaintext secret from the operator.
///
/// The vault never reads a terminal itself; callers inject a source so the
/// save path is testable without interactive input. The production
/// implementation lives in the CLI and prompts without echo.
pub trait SecretSource {
    /// Obtain the secret, displaying `prompt` if the source is interactive.
    fn read_secret(&self, prompt: &str) -> Result<String, SecretError>;
}

/// Fixed-value source for tests and scripted bootstrap.
#[derive(Debug, Clone)]
pub struct StaticSecret(String);

impl StaticSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }
}

impl SecretSource for StaticSecret {
    fn read_secret(&self, _prompt: &str) -> Result<String, SecretError> {
        Ok(self.0.clone())
    }
}
