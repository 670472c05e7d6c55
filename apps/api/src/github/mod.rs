// GitHub ingestion: turns a repository URL into `RepoMetadata` for analysis.

pub mod client;
pub mod files;
pub mod handlers;

pub use client::{GitHubClient, GitHubError};

/// `owner/repo` coordinates parsed from a GitHub URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

/// Accepts `https://github.com/owner/repo`, with or without scheme, `www.`,
/// trailing path segments, or a `.git` suffix.
pub fn parse_repo_url(url: &str) -> Result<RepoRef, GitHubError> {
    let trimmed = url.trim();
    let path = trimmed
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_start_matches("www.");
    let path = path
        .strip_prefix("github.com/")
        .ok_or_else(|| GitHubError::InvalidUrl(trimmed.to_string()))?;

    let mut segments = path.split('/');
    let owner = segments.next().unwrap_or_default().trim();
    let repo = segments
        .next()
        .unwrap_or_default()
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim();
    let repo = repo.strip_suffix(".git").unwrap_or(repo);

    if owner.is_empty() || repo.is_empty() {
        return Err(GitHubError::InvalidUrl(trimmed.to_string()));
    }

    Ok(RepoRef {
        owner: owner.to_string(),
        repo: repo.to_string(),
    })
}
