mod backup;
mod cli;
mod config;
mod github;
mod prompt;
mod token;
mod vault;

use clap::Parser;
use color_eyre::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::ConfigCommand;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let cli = cli::Cli::parse();
    let config = config::load()?;
    match cli.command {
        cli::Command::Token(cmd) => token::handle(cmd, &config)?,
        cli::Command::Config(cmd) => handle_config(cmd, &config)?,
        cli::Command::Repos { org } => github::repos(&org, &config).await?,
        cli::Command::Branches {
            owner,
            repo,
            protected,
        } => github::branches(&owner, &repo, protected, &config).await?,
        cli::Command::Branch(cmd) => github::branch(cmd, &config).await?,
        cli::Command::Comment {
            owner,
            repo,
            issue,
            message,
        } => github::comment(&owner, &repo, issue, &message, &config).await?,
        cli::Command::Issue {
            owner,
            repo,
            title,
            body,
            assignee,
        } => github::issue(&owner, &repo, &title, &body, assignee.as_deref(), &config).await?,
        cli::Command::Committers { owner, repo } => {
            github::committers(&owner, &repo, &config).await?
        }
        cli::Command::Backup { org, dest } => backup::run(&org, dest, &config).await?,
    }

    Ok(())
}

fn init_tracing() {
    // Respect user-provided filters, default to info to avoid noisy stdout.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn handle_config(cmd: ConfigCommand, config: &config::Config) -> Result<()> {
    match cmd {
        ConfigCommand::Init => {
            let path = config::write_default_if_missing(config)?;
            println!("Config initialized at {}", path.display());
        }
        ConfigCommand::SetKeyFile { path } => {
            let locator = vault::locator_from_config(config);
            locator.write(&path)?;
            println!(
                "Key file location {} recorded in {}",
                path.display(),
                locator.config_path().display()
            );
        }
    }
    Ok(())
}
