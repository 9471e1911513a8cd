use std::{
    fs,
    path::{Path, PathBuf},
    process::Stdio,
};

use color_eyre::Result;
use orgkit_gh::urls;
use orgkit_vault::TokenHolder;
use tokio::process::Command;
use tracing::{info, warn};

use crate::{config::Config, github, vault};

/// Clone every repository of `org` into `<root>/<org>/`.
///
/// Repositories whose target directory already exists are skipped, so a
/// rerun only fetches what is missing.
pub async fn run(org: &str, dest: Option<PathBuf>, config: &Config) -> Result<()> {
    let mut holder = TokenHolder::new(vault::from_config(config)?);
    let token = holder.token()?.to_string();
    let client = github::client(config, &token);

    let org_dir = resolve_root(dest, config).join(org);
    fs::create_dir_all(&org_dir)?;

    let repos = client
        .list_org_repos(org)
        .await
        .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
    info!(count = repos.len(), org, "starting backup");

    let mut cloned = 0usize;
    for repo in repos {
        if org_dir.join(&repo.name).exists() {
            info!(repo = %repo.name, "already present, skipping");
            continue;
        }
        // The URL embeds the token; log repo names only.
        let url = urls::authenticated_clone_url(org, &repo.name, &token);
        if !remote_exists(&url).await? {
            warn!(repo = %repo.name, "remote not reachable, skipping");
            continue;
        }
        clone_into(&url, &org_dir, &repo.name).await?;
        cloned += 1;
    }

    println!("Backed up {cloned} repositories into {}.", org_dir.display());
    Ok(())
}

fn resolve_root(dest: Option<PathBuf>, config: &Config) -> PathBuf {
    dest.or_else(|| config.backup_dir.clone())
        .unwrap_or_else(|| PathBuf::from("backup"))
}

async fn remote_exists(url: &str) -> Result<bool> {
    let status = Command::new("git")
        .args(["ls-remote", url])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await?;
    Ok(status.success())
}

async fn clone_into(url: &str, cwd: &Path, name: &str) -> Result<()> {
    info!(repo = %name, "cloning");
    let status = Command::new("git")
        .args(["clone", url])
        .current_dir(cwd)
        .stdout(Stdio::null())
        .status()
        .await?;
    if !status.success() {
        color_eyre::eyre::bail!("git clone failed for {name}");
    }
    Ok(())
}
