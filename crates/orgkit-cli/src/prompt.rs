use dialoguer::Password;
use orgkit_core::secret::{SecretError, SecretSource};

/// Interactive secret entry: prompts on the terminal without echoing.
pub struct PromptSecret;

impl SecretSource for PromptSecret {
    fn read_secret(&self, prompt: &str) -> Result<String, SecretError> {
        Password::new()
            .with_prompt(prompt)
            .interact()
            .map_err(|e| SecretError::Unavailable {
                reason: e.to_string(),
            })
    }
}
