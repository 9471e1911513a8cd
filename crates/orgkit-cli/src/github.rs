use color_eyre::Result;
use orgkit_gh::GitHubClient;
use orgkit_vault::TokenHolder;

use crate::{cli::BranchCommand, config::Config, vault};

/// Build a client from the config's endpoint settings.
pub fn client(config: &Config, token: &str) -> GitHubClient {
    match config.github.as_ref().and_then(|g| g.api_base.as_deref()) {
        Some(base) => GitHubClient::with_api_base(token, base),
        None => GitHubClient::new(token),
    }
}

fn holder(config: &Config) -> Result<TokenHolder> {
    Ok(TokenHolder::new(vault::from_config(config)?))
}

pub async fn repos(org: &str, config: &Config) -> Result<()> {
    let mut holder = holder(config)?;
    let client = client(config, holder.token()?);
    let repos = client
        .list_org_repos(org)
        .await
        .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;

    if repos.is_empty() {
        println!("No repositories in {org}.");
        return Ok(());
    }
    for repo in repos {
        println!("{}", repo.clone_url);
    }
    Ok(())
}

pub async fn branches(owner: &str, repo: &str, protected: bool, config: &Config) -> Result<()> {
    let mut holder = holder(config)?;
    let client = client(config, holder.token()?);
    let branches = client
        .list_branches(owner, repo, protected)
        .await
        .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;

    for branch in branches {
        println!("{branch}");
    }
    Ok(())
}

pub async fn branch(cmd: BranchCommand, config: &Config) -> Result<()> {
    let mut holder = holder(config)?;
    let client = client(config, holder.token()?);
    match cmd {
        BranchCommand::Create {
            owner,
            repo,
            name,
            base,
        } => {
            client
                .create_branch(&owner, &repo, &name, &base)
                .await
                .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
            println!("Created branch {name} in {owner}/{repo} from {base}.");
        }
        BranchCommand::Delete { owner, repo, name } => {
            client
                .delete_branch(&owner, &repo, &name)
                .await
                .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
            println!("Deleted branch {name} from {owner}/{repo}.");
        }
    }
    Ok(())
}

pub async fn comment(
    owner: &str,
    repo: &str,
    issue: u64,
    message: &str,
    config: &Config,
) -> Result<()> {
    let mut holder = holder(config)?;
    let client = client(config, holder.token()?);
    client
        .post_issue_comment(owner, repo, issue, message)
        .await
        .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
    println!("Commented on {owner}/{repo}#{issue}.");
    Ok(())
}

pub async fn issue(
    owner: &str,
    repo: &str,
    title: &str,
    body: &str,
    assignee: Option<&str>,
    config: &Config,
) -> Result<()> {
    let mut holder = holder(config)?;
    let client = client(config, holder.token()?);
    let id = client
        .create_issue(owner, repo, title, body, assignee)
        .await
        .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
    println!("Opened issue {id} in {owner}/{repo}.");
    Ok(())
}

pub async fn committers(owner: &str, repo: &str, config: &Config) -> Result<()> {
    let mut holder = holder(config)?;
    let client = client(config, holder.token()?);
    let emails = client
        .list_committer_emails(owner, repo)
        .await
        .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;

    for email in emails {
        println!("{email}");
    }
    Ok(())
}
