// Prompt construction for repository analysis.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::analysis::models::RepoMetadata;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

const MAX_LISTED_FILES: usize = 10;
const MAX_SNIPPET_FILES: usize = 3;
const SNIPPET_CHARS: usize = 500;
const README_CHARS: usize = 3000;

/// Returns the longest prefix of `text` holding at most `max` characters.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// `- name` lines for the first ten files.
pub fn build_file_list(metadata: &RepoMetadata) -> String {
    metadata
        .file_names()
        .take(MAX_LISTED_FILES)
        .map(|name| format!("- {name}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Name plus the first 500 characters of each of the first three files.
pub fn build_code_snippets(metadata: &RepoMetadata) -> String {
    metadata
        .files
        .iter()
        .take(MAX_SNIPPET_FILES)
        .map(|(name, content)| {
            format!(
                "\n--- {name} ---\n{}...\n",
                truncate_chars(content, SNIPPET_CHARS)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_analysis_prompt(metadata: &RepoMetadata) -> String {
    let languages = if metadata.languages.is_empty() {
        "None detected".to_string()
    } else {
        metadata.languages.join(", ")
    };
    let readme = truncate_chars(&metadata.readme, README_CHARS);
    let readme = if readme.trim().is_empty() {
        "No README provided"
    } else {
        readme
    };

    format!(
        r#"You are a technical recruiter analyzing a GitHub repository to find matching job titles and skills.

Repository: {owner}/{repo}
Languages: {languages}

README:
{readme}

Files in the repository:
{file_list}

Code samples:
{code_snippets}

Return a JSON object with this EXACT schema (no extra fields):
{{
  "keywords": ["Job title or skill", "..."],
  "projectDescription": "2-3 sentence description of what the project does and how it is built.",
  "techStack": ["Technology", "..."],
  "roleFocus": "frontend"
}}

Rules:
- "keywords": 5 to 10 job titles or skills a recruiter would search for, most relevant first, no duplicates.
- "projectDescription": 2 to 3 sentences.
- "techStack": at most 5 technologies, most important first.
- "roleFocus": exactly one of "frontend", "backend", "fullstack", "mobile", "data".

{JSON_ONLY_INSTRUCTION}"#,
        owner = metadata.owner,
        repo = metadata.repo_name,
        file_list = build_file_list(metadata),
        code_snippets = build_code_snippets(metadata),
    )
}
