use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// CLI surface definition.
#[derive(Parser, Debug)]
#[command(
    name = "orgkit",
    about = "GitHub org automation with an encrypted token vault",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Manage the encrypted access token.
    #[command(subcommand)]
    Token(TokenCommand),
    /// Manage CLI configuration.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// List clone URLs of an organization's repositories.
    Repos { org: String },
    /// List branch names of a repository.
    Branches {
        owner: String,
        repo: String,
        /// Only list protected branches.
        #[arg(long)]
        protected: bool,
    },
    /// Create or delete branches.
    #[command(subcommand)]
    Branch(BranchCommand),
    /// Post a comment on an issue.
    Comment {
        owner: String,
        repo: String,
        issue: u64,
        message: String,
    },
    /// Open a new issue.
    Issue {
        owner: String,
        repo: String,
        title: String,
        body: String,
        /// GitHub login to assign the issue to.
        #[arg(long)]
        assignee: Option<String>,
    },
    /// List distinct committer email addresses of a repository.
    Committers { owner: String, repo: String },
    /// Clone all repositories of an organization into a backup folder.
    Backup {
        org: String,
        /// Backup root; defaults to the configured backup_dir or ./backup.
        #[arg(long)]
        dest: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TokenCommand {
    /// Prompt for the token (no echo) and store it encrypted.
    Save,
    /// Verify the stored token decrypts, without printing it.
    Check,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Create a default config file if one does not exist.
    Init,
    /// Record where the symmetric key file lives.
    SetKeyFile { path: PathBuf },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum BranchCommand {
    /// Create a branch pointing at the head of --base.
    Create {
        owner: String,
        repo: String,
        name: String,
        #[arg(long, default_value = "main")]
        base: String,
    },
    /// Delete a branch.
    Delete {
        owner: String,
        repo: String,
        name: String,
    },
}
