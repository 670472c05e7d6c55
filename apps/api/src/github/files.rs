//! Important-file selection — picks which blobs of a repository tree are worth
//! fetching for analysis.
//!
//! Scoring (additive):
//! - dependency manifest (package.json, Cargo.toml, ...): +100
//! - under a conventional source root (src/, app/, server/, ...): +50
//! - file name contains `index` or `main`: +30 each; `app`: +20
//! - code extension: +10
//!
//! Vendored and build-output paths are dropped before scoring.

use crate::github::client::TreeEntry;

const CONFIG_FILES: &[&str] = &[
    "package.json",
    "requirements.txt",
    "Gemfile",
    "pom.xml",
    "Cargo.toml",
    "go.mod",
    "composer.json",
    "pubspec.yaml",
    "tsconfig.json",
];

const IMPORTANT_ROOTS: &[&str] = &[
    "src/", "app/", "lib/", "backend/", "frontend/", "server/", "client/",
];

const CODE_EXTENSIONS: &[&str] = &[
    ".js", ".jsx", ".ts", ".tsx", ".py", ".java", ".go", ".rs", ".php", ".rb",
];

const IGNORED_PATHS: &[&str] = &[
    "node_modules/",
    "dist/",
    "build/",
    "__pycache__/",
    ".git/",
    "vendor/",
];

pub const MAX_SELECTED_FILES: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportantFile {
    pub path: String,
    pub sha: String,
    pub priority: u32,
}

pub fn file_priority(path: &str) -> u32 {
    let name = path.rsplit('/').next().unwrap_or(path);
    let lower = name.to_lowercase();
    let mut priority = 0;

    if CONFIG_FILES.contains(&name) {
        priority += 100;
    }
    if IMPORTANT_ROOTS.iter().any(|root| path.starts_with(root)) {
        priority += 50;
    }
    if lower.contains("index") {
        priority += 30;
    }
    if lower.contains("main") {
        priority += 30;
    }
    if lower.contains("app") {
        priority += 20;
    }
    if CODE_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        priority += 10;
    }

    priority
}

/// Highest-priority blobs first; ties keep tree order. At most 15.
pub fn select_important_files(tree: &[TreeEntry]) -> Vec<ImportantFile> {
    let mut files: Vec<ImportantFile> = tree
        .iter()
        .filter(|entry| entry.kind == "blob")
        .filter(|entry| !IGNORED_PATHS.iter().any(|p| entry.path.contains(p)))
        .map(|entry| ImportantFile {
            path: entry.path.clone(),
            sha: entry.sha.clone(),
            priority: file_priority(&entry.path),
        })
        .filter(|file| file.priority > 0)
        .collect();

    files.sort_by(|a, b| b.priority.cmp(&a.priority));
    files.truncate(MAX_SELECTED_FILES);
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob(path: &str) -> TreeEntry {
        TreeEntry {
            path: path.to_string(),
            kind: "blob".to_string(),
            sha: format!("sha-{path}"),
        }
    }

    #[test]
    fn test_priority_components() {
        assert_eq!(file_priority("package.json"), 100);
        assert_eq!(file_priority("src/index.ts"), 50 + 30 + 10);
        assert_eq!(file_priority("src/main.rs"), 50 + 30 + 10);
        assert_eq!(file_priority("app.py"), 20 + 10);
        assert_eq!(file_priority("frontend/package.json"), 100 + 50);
        assert_eq!(file_priority("docs/guide.md"), 0);
    }

    #[test]
    fn test_name_matching_is_case_insensitive_but_manifest_is_exact() {
        assert_eq!(file_priority("MainActivity.kt"), 30);
        assert_eq!(file_priority("PACKAGE.JSON"), 0);
    }

    #[test]
    fn test_selection_drops_trees_ignored_paths_and_zero_priority() {
        let tree = vec![
            TreeEntry {
                path: "src".to_string(),
                kind: "tree".to_string(),
                sha: "t".to_string(),
            },
            blob("node_modules/react/index.js"),
            blob("client/build/main.js"),
            blob("LICENSE"),
            blob("src/lib.rs"),
        ];
        let selected = select_important_files(&tree);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].path, "src/lib.rs");
        assert_eq!(selected[0].sha, "sha-src/lib.rs");
    }

    #[test]
    fn test_selection_orders_by_priority_and_is_stable() {
        let tree = vec![
            blob("util.py"),
            blob("Cargo.toml"),
            blob("helpers.py"),
            blob("src/main.rs"),
        ];
        let paths: Vec<String> = select_important_files(&tree)
            .into_iter()
            .map(|f| f.path)
            .collect();
        assert_eq!(paths, vec!["Cargo.toml", "src/main.rs", "util.py", "helpers.py"]);
    }

    #[test]
    fn test_selection_caps_at_fifteen() {
        let tree: Vec<TreeEntry> = (0..40).map(|i| blob(&format!("src/mod{i}.rs"))).collect();
        let selected = select_important_files(&tree);
        assert_eq!(selected.len(), MAX_SELECTED_FILES);
        assert_eq!(selected[0].path, "src/mod0.rs");
    }
}
