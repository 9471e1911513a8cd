//! Pure helpers for clone URLs: building token-authenticated ones and
//! splitting owner/repo back out of them.

use anyhow::{bail, Context, Result};
use url::Url;

/// Clone URL with the access token embedded as userinfo:
/// `https://<token>@github.com/<owner>/<repo>`.
///
/// The result carries the credential; never log it.
pub fn authenticated_clone_url(owner: &str, repo: &str, token: &str) -> String {
    format!("https://{token}@github.com/{owner}/{repo}")
}

/// Extract `(owner, repo)` from a clone URL, stripping a trailing `.git`.
pub fn split_org_repo(clone_url: &str) -> Result<(String, String)> {
    let parsed = Url::parse(clone_url).with_context(|| "parsing clone url")?;
    let mut segments = parsed
        .path_segments()
        .context("clone url has no path")?
        .filter(|s| !s.is_empty());

    let (Some(owner), Some(repo)) = (segments.next(), segments.next()) else {
        bail!("clone url path is not owner/repo");
    };

    let repo = repo.strip_suffix(".git").unwrap_or(repo);
    Ok((owner.to_string(), repo.to_string()))
}
