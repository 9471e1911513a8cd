use color_eyre::Result;
use orgkit_core::secret::SecretSource;
use orgkit_vault::TokenVault;

use crate::{cli::TokenCommand, config::Config, prompt::PromptSecret, vault};

/// Execute a token subcommand against the configured vault.
pub fn handle(cmd: TokenCommand, config: &Config) -> Result<()> {
    let vault = vault::from_config(config)?;
    match cmd {
        TokenCommand::Save => save(&vault, &PromptSecret),
        TokenCommand::Check => check(&vault),
    }
}

fn save(vault: &TokenVault, source: &dyn SecretSource) -> Result<()> {
    let secret = source.read_secret("Enter your GitHub token")?;
    vault.save(&secret)?;
    println!(
        "Token saved (key: {}, token: {}).",
        vault.key_path().display(),
        vault.token_path().display()
    );
    Ok(())
}

fn check(vault: &TokenVault) -> Result<()> {
    // Load proves the key/ciphertext pair matches; the secret stays off the
    // terminal.
    vault.load()?;
    println!("Stored token decrypts correctly.");
    Ok(())
}
