//! Thin pass-through client for the GitHub REST API: org repo listing,
//! branch metadata and mutation, issue comments. No retry, backoff, or
//! rate-limit handling; failures surface immediately with status context.

pub mod urls;

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

const DEFAULT_API_BASE: &str = "https://api.github.com";
const PER_PAGE: usize = 100;

/// A repository as returned by the org listing endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Repo {
    pub name: String,
    pub clone_url: String,
    #[serde(default)]
    pub private: bool,
}

pub struct GitHubClient {
    api_base: String,
    token: String,
    http: reqwest::Client,
}

impl GitHubClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_api_base(token, DEFAULT_API_BASE)
    }

    pub fn with_api_base(token: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: token.into(),
            http: reqwest::Client::new(),
        }
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("orgkit"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("token {}", self.token))?,
        );
        Ok(headers)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// All repositories of an organization. Walks pages of 100 until a short
    /// page.
    #[instrument(skip_all, fields(org))]
    pub async fn list_org_repos(&self, org: &str) -> Result<Vec<Repo>> {
        let mut repos = Vec::new();
        for page in 1u32.. {
            let page = page.to_string();
            let per_page = PER_PAGE.to_string();
            let batch: Vec<Repo> = self
                .http
                .get(self.url(&format!("/orgs/{org}/repos")))
                .headers(self.headers()?)
                .query(&[
                    ("type", "all"),
                    ("per_page", per_page.as_str()),
                    ("page", page.as_str()),
                ])
                .send()
                .await?
                .error_for_status()
                .with_context(|| format!("listing repos of org {org}"))?
                .json()
                .await?;

            let short_page = batch.len() < PER_PAGE;
            repos.extend(batch);
            if short_page {
                break;
            }
        }
        Ok(repos)
    }

    /// Branch names of a repository, optionally only protected ones.
    #[instrument(skip_all, fields(owner, repo))]
    pub async fn list_branches(
        &self,
        owner: &str,
        repo: &str,
        protected: bool,
    ) -> Result<Vec<String>> {
        #[derive(Debug, Deserialize)]
        struct Branch {
            name: String,
        }

        let mut branches = Vec::new();
        for page in 1u32.. {
            let page = page.to_string();
            let per_page = PER_PAGE.to_string();
            let protected = protected.to_string();
            let batch: Vec<Branch> = self
                .http
                .get(self.url(&format!("/repos/{owner}/{repo}/branches")))
                .headers(self.headers()?)
                .query(&[
                    ("protected", protected.as_str()),
                    ("per_page", per_page.as_str()),
                    ("page", page.as_str()),
                ])
                .send()
                .await?
                .error_for_status()
                .with_context(|| format!("listing branches of {owner}/{repo}"))?
                .json()
                .await?;

            let short_page = batch.len() < PER_PAGE;
            branches.extend(batch.into_iter().map(|b| b.name));
            if short_page {
                break;
            }
        }
        Ok(branches)
    }

    /// Commit sha a branch head points at.
    #[instrument(skip_all, fields(owner, repo, branch))]
    pub async fn branch_sha(&self, owner: &str, repo: &str, branch: &str) -> Result<String> {
        #[derive(Debug, Deserialize)]
        struct GitRef {
            object: GitObject,
        }
        #[derive(Debug, Deserialize)]
        struct GitObject {
            sha: String,
        }

        let git_ref: GitRef = self
            .http
            .get(self.url(&format!("/repos/{owner}/{repo}/git/refs/heads/{branch}")))
            .headers(self.headers()?)
            .send()
            .await?
            .error_for_status()
            .with_context(|| format!("resolving {owner}/{repo} ref heads/{branch}"))?
            .json()
            .await?;
        Ok(git_ref.object.sha)
    }

    /// Create a branch pointing at the head of `base`.
    #[instrument(skip_all, fields(owner, repo, branch, base))]
    pub async fn create_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        base: &str,
    ) -> Result<()> {
        let sha = self.branch_sha(owner, repo, base).await?;
        self.http
            .post(self.url(&format!("/repos/{owner}/{repo}/git/refs")))
            .headers(self.headers()?)
            .json(&json!({
                "ref": format!("refs/heads/{branch}"),
                "sha": sha,
            }))
            .send()
            .await?
            .error_for_status()
            .with_context(|| format!("creating branch {branch} in {owner}/{repo}"))?;
        Ok(())
    }

    /// Delete a branch ref.
    #[instrument(skip_all, fields(owner, repo, branch))]
    pub async fn delete_branch(&self, owner: &str, repo: &str, branch: &str) -> Result<()> {
        self.http
            .delete(self.url(&format!("/repos/{owner}/{repo}/git/refs/heads/{branch}")))
            .headers(self.headers()?)
            .send()
            .await?
            .error_for_status()
            .with_context(|| format!("deleting branch {branch} in {owner}/{repo}"))?;
        Ok(())
    }

    /// Post a comment on an existing issue.
    #[instrument(skip_all, fields(owner, repo, issue))]
    pub async fn post_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        issue: u64,
        body: &str,
    ) -> Result<()> {
        self.http
            .post(self.url(&format!("/repos/{owner}/{repo}/issues/{issue}/comments")))
            .headers(self.headers()?)
            .json(&json!({ "body": body }))
            .send()
            .await?
            .error_for_status()
            .with_context(|| format!("commenting on {owner}/{repo}#{issue}"))?;
        Ok(())
    }

    /// Open a new issue, optionally assigning someone, and return its id.
    #[instrument(skip_all, fields(owner, repo))]
    pub async fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        body: &str,
        assignee: Option<&str>,
    ) -> Result<u64> {
        #[derive(Debug, Deserialize)]
        struct Created {
            id: u64,
        }

        let created: Created = self
            .http
            .post(self.url(&format!("/repos/{owner}/{repo}/issues")))
            .headers(self.headers()?)
            .json(&issue_request(title, body, assignee))
            .send()
            .await?
            .error_for_status()
            .with_context(|| format!("creating issue in {owner}/{repo}"))?
            .json()
            .await?;
        Ok(created.id)
    }

    /// Distinct committer email addresses from a repository's recent commits.
    ///
    /// Email addresses are personal data; handle the result with care.
    #[instrument(skip_all, fields(owner, repo))]
    pub async fn list_committer_emails(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<BTreeSet<String>> {
        let commits: Vec<CommitEntry> = self
            .http
            .get(self.url(&format!("/repos/{owner}/{repo}/commits")))
            .headers(self.headers()?)
            .send()
            .await?
            .error_for_status()
            .with_context(|| format!("listing commits of {owner}/{repo}"))?
            .json()
            .await?;
        Ok(committer_emails(commits))
    }
}

fn issue_request(title: &str, body: &str, assignee: Option<&str>) -> serde_json::Value {
    let mut request = json!({ "title": title, "body": body });
    if let Some(assignee) = assignee {
        request["assignees"] = json!([assignee]);
    }
    request
}

#[derive(Debug, Deserialize)]
struct CommitEntry {
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    author: Option<CommitAuthor>,
}

#[derive(Debug, Deserialize)]
struct CommitAuthor {
    email: Option<String>,
}

fn committer_emails(entries: Vec<CommitEntry>) -> BTreeSet<String> {
    entries
        .into_iter()
        .filter_map(|entry| entry.commit.author.and_then(|author| author.email))
        .collect()
}
