//! GitHub REST client — the only module that talks to api.github.com.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use indexmap::IndexMap;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::analysis::models::RepoMetadata;
use crate::analysis::prompts::truncate_chars;
use crate::github::files::select_important_files;
use crate::github::RepoRef;

const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("jobmatch-api/", env!("CARGO_PKG_VERSION"));
const README_CHARS: usize = 3000;
const FILE_CHARS: usize = 2000;

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("repository or resource not found")]
    NotFound,

    #[error("rate limit exceeded or token rejected")]
    RateLimited,

    #[error("GitHub API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("could not decode content: {0}")]
    Decode(String),

    #[error("invalid GitHub URL: {0}")]
    InvalidUrl(String),
}

#[derive(Debug, Deserialize)]
struct RepositoryInfo {
    default_branch: String,
}

/// Base64 payload of the readme and blob endpoints.
#[derive(Debug, Deserialize)]
struct EncodedContent {
    content: String,
    #[serde(default)]
    encoding: String,
}

#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct Languages(IndexMap<String, u64>);

#[derive(Debug, Deserialize)]
struct GitTree {
    tree: Vec<TreeEntry>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub sha: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimit {
    pub limit: u32,
    pub remaining: u32,
    /// Unix seconds.
    pub reset: i64,
}

#[derive(Debug, Deserialize)]
struct RateLimitResponse {
    resources: RateLimitResources,
}

#[derive(Debug, Deserialize)]
struct RateLimitResources {
    core: RateLimit,
}

#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    token: Option<String>,
    base_url: String,
}

impl GitHubClient {
    pub fn new(token: Option<String>, base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to build HTTP client"),
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, GitHubError> {
        let mut request = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = response.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::NOT_FOUND => GitHubError::NotFound,
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => GitHubError::RateLimited,
            _ => GitHubError::Api {
                status: status.as_u16(),
                message,
            },
        })
    }

    pub async fn default_branch(&self, repo: &RepoRef) -> Result<String, GitHubError> {
        let info: RepositoryInfo = self
            .get_json(&format!("/repos/{}/{}", repo.owner, repo.repo), &[])
            .await?;
        Ok(info.default_branch)
    }

    /// `None` when the repository has no README.
    pub async fn readme(&self, repo: &RepoRef) -> Result<Option<String>, GitHubError> {
        let path = format!("/repos/{}/{}/readme", repo.owner, repo.repo);
        match self.get_json::<EncodedContent>(&path, &[]).await {
            Ok(content) => decode_content(&content).map(Some),
            Err(GitHubError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Language names, largest byte count first.
    pub async fn languages(&self, repo: &RepoRef) -> Result<Vec<String>, GitHubError> {
        let Languages(entries) = self
            .get_json(&format!("/repos/{}/{}/languages", repo.owner, repo.repo), &[])
            .await?;
        Ok(entries.into_keys().collect())
    }

    pub async fn tree(&self, repo: &RepoRef, branch: &str) -> Result<Vec<TreeEntry>, GitHubError> {
        let tree: GitTree = self
            .get_json(
                &format!("/repos/{}/{}/git/trees/{}", repo.owner, repo.repo, branch),
                &[("recursive", "true")],
            )
            .await?;
        if tree.truncated {
            warn!("Tree for {}/{} was truncated by GitHub", repo.owner, repo.repo);
        }
        Ok(tree.tree)
    }

    pub async fn blob(&self, repo: &RepoRef, sha: &str) -> Result<String, GitHubError> {
        let content: EncodedContent = self
            .get_json(
                &format!("/repos/{}/{}/git/blobs/{}", repo.owner, repo.repo, sha),
                &[],
            )
            .await?;
        decode_content(&content)
    }

    pub async fn rate_limit(&self) -> Result<RateLimit, GitHubError> {
        let response: RateLimitResponse = self.get_json("/rate_limit", &[]).await?;
        Ok(response.resources.core)
    }

    /// Collects README, languages, and the most informative source files.
    /// A README or file that fails to download is skipped.
    pub async fn fetch_metadata(&self, repo: &RepoRef) -> Result<RepoMetadata, GitHubError> {
        let branch = self.default_branch(repo).await?;
        debug!("Default branch: {branch}");

        let readme = readme_or_empty(repo, self.readme(repo).await);
        let languages = self.languages(repo).await?;

        let tree = self.tree(repo, &branch).await?;
        let selected = select_important_files(&tree);
        info!(
            "Selected {} of {} tree entries from {}/{}",
            selected.len(),
            tree.len(),
            repo.owner,
            repo.repo
        );

        let mut files = IndexMap::with_capacity(selected.len());
        for file in selected {
            match self.blob(repo, &file.sha).await {
                Ok(content) => {
                    debug!("Fetched {} (priority {})", file.path, file.priority);
                    files.insert(file.path, truncate_chars(&content, FILE_CHARS).to_string());
                }
                Err(e) => warn!("Could not fetch {}: {e}", file.path),
            }
        }

        Ok(RepoMetadata {
            owner: repo.owner.clone(),
            repo_name: repo.repo.clone(),
            languages,
            readme: truncate_chars(&readme, README_CHARS).to_string(),
            files,
        })
    }
}

/// A missing or unreadable README never fails the analysis.
fn readme_or_empty(repo: &RepoRef, fetched: Result<Option<String>, GitHubError>) -> String {
    match fetched {
        Ok(Some(readme)) => readme,
        Ok(None) => {
            info!("No README found for {}/{}", repo.owner, repo.repo);
            String::new()
        }
        Err(e) => {
            warn!("Could not fetch README for {}/{}: {e}", repo.owner, repo.repo);
            String::new()
        }
    }
}

fn decode_content(content: &EncodedContent) -> Result<String, GitHubError> {
    if !content.encoding.is_empty() && content.encoding != "base64" {
        return Err(GitHubError::Decode(format!(
            "unsupported encoding '{}'",
            content.encoding
        )));
    }

    let compact: String = content
        .content
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| GitHubError::Decode(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_wrapped_base64() {
        // GitHub wraps base64 at 60 columns.
        let content = EncodedContent {
            content: "SGVsbG8s\nIHdvcmxk\n".to_string(),
            encoding: "base64".to_string(),
        };
        assert_eq!(decode_content(&content).unwrap(), "Hello, world");
    }

    #[test]
    fn test_decode_rejects_unknown_encoding() {
        let content = EncodedContent {
            content: "abc".to_string(),
            encoding: "utf-8".to_string(),
        };
        assert!(matches!(decode_content(&content), Err(GitHubError::Decode(_))));
    }

    #[test]
    fn test_decode_rejects_invalid_base64() {
        let content = EncodedContent {
            content: "!!!".to_string(),
            encoding: "base64".to_string(),
        };
        assert!(decode_content(&content).is_err());
    }

    #[test]
    fn test_readme_errors_fall_back_to_empty() {
        let repo = RepoRef {
            owner: "octo".to_string(),
            repo: "shop".to_string(),
        };
        let failures = [
            GitHubError::NotFound,
            GitHubError::RateLimited,
            GitHubError::Decode("bad base64".to_string()),
            GitHubError::Api {
                status: 500,
                message: "boom".to_string(),
            },
        ];
        for failure in failures {
            assert_eq!(readme_or_empty(&repo, Err(failure)), "");
        }
        assert_eq!(readme_or_empty(&repo, Ok(None)), "");
        assert_eq!(readme_or_empty(&repo, Ok(Some("# Shop".to_string()))), "# Shop");
    }

    #[test]
    fn test_languages_keep_response_order() {
        let json = r#"{"TypeScript": 90210, "Python": 5000, "CSS": 120}"#;
        let Languages(entries) = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = entries.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["TypeScript", "Python", "CSS"]);
    }

    #[test]
    fn test_tree_entry_deserializes_type_field() {
        let json = r#"{"sha": "abc", "tree": [
            {"path": "src/main.rs", "mode": "100644", "type": "blob", "sha": "111", "size": 30, "url": "u"},
            {"path": "src", "mode": "040000", "type": "tree", "sha": "222", "url": "u"}
        ], "truncated": false}"#;
        let tree: GitTree = serde_json::from_str(json).unwrap();
        assert_eq!(tree.tree.len(), 2);
        assert_eq!(tree.tree[0].kind, "blob");
        assert_eq!(tree.tree[1].kind, "tree");
        assert!(!tree.truncated);
    }

    #[test]
    fn test_rate_limit_response_shape() {
        let json = r#"{"resources": {"core": {"limit": 5000, "remaining": 4999, "reset": 1700000000, "used": 1}}, "rate": {}}"#;
        let response: RateLimitResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.resources.core.limit, 5000);
        assert_eq!(response.resources.core.reset, 1_700_000_000);
    }
}
