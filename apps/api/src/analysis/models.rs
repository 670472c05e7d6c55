use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Repository metadata supplied by the caller for one analysis request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepoMetadata {
    pub owner: String,
    #[serde(rename = "repo", alias = "repoName")]
    pub repo_name: String,
    /// Ordered by relevance; the first entry is the primary language.
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub readme: String,
    /// Filename → content, in insertion order.
    #[serde(default)]
    pub files: IndexMap<String, String>,
}

impl RepoMetadata {
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

/// Coarse classification of a repository's primary engineering discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleFocus {
    Frontend,
    Backend,
    Fullstack,
    Mobile,
    Data,
}

impl RoleFocus {
    pub fn as_str(self) -> &'static str {
        match self {
            RoleFocus::Frontend => "frontend",
            RoleFocus::Backend => "backend",
            RoleFocus::Fullstack => "fullstack",
            RoleFocus::Mobile => "mobile",
            RoleFocus::Data => "data",
        }
    }
}

impl fmt::Display for RoleFocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured job-keyword analysis of a repository. Identical in shape whether
/// produced by the model or by the heuristic classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// 1–10 unique job titles / skills, most relevant first.
    pub keywords: Vec<String>,
    pub project_description: String,
    /// At most 5 technology names.
    pub tech_stack: Vec<String>,
    pub role_focus: RoleFocus,
}

/// Which path produced an `AnalysisResult`. Transport metadata only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisSource {
    Ai,
    Heuristic,
}
