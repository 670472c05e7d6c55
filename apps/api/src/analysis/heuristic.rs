//! Heuristic classifier — deterministic fallback analysis from repository metadata.
//!
//! Pure function, no I/O. Total over any `RepoMetadata`, including empty languages,
//! files, and README. Used whenever the model path fails or returns garbage.

use crate::analysis::models::{AnalysisResult, RepoMetadata, RoleFocus};

const FRONTEND_INDICATORS: &[&str] = &[
    "JavaScript",
    "TypeScript",
    "HTML",
    "CSS",
    "SCSS",
    "Sass",
    "Less",
    "Vue",
    "Svelte",
    "Astro",
];

const BACKEND_INDICATORS: &[&str] = &[
    "Python", "Java", "Go", "Ruby", "PHP", "C#", "Rust", "Elixir", "Scala",
];

const MOBILE_INDICATORS: &[&str] = &["Swift", "Kotlin", "Dart", "Objective-C"];

const DATA_INDICATORS: &[&str] = &["Python", "R", "Jupyter Notebook", "Julia", "Scala"];

const GENERIC_KEYWORDS: &[&str] = &["Software Developer", "Engineer"];

const MAX_KEYWORDS: usize = 10;
const MAX_TECH_STACK: usize = 5;
/// Languages that get a `"<language> Developer"` keyword / appear in the description.
const LANGUAGE_SAMPLE: usize = 3;

/// Which discipline signals a repository shows. Categories overlap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleSignals {
    pub frontend: bool,
    pub backend: bool,
    pub mobile: bool,
    pub data: bool,
}

impl RoleSignals {
    pub fn detect(metadata: &RepoMetadata) -> Self {
        let names: Vec<String> = metadata.file_names().map(str::to_lowercase).collect();
        let any_file = |needles: &[&str]| {
            names
                .iter()
                .any(|name| needles.iter().any(|needle| name.contains(needle)))
        };
        let any_language = |set: &[&str]| {
            metadata
                .languages
                .iter()
                .any(|lang| set.iter().any(|known| known.eq_ignore_ascii_case(lang)))
        };

        Self {
            frontend: any_language(FRONTEND_INDICATORS) || any_file(&["frontend"]),
            backend: any_language(BACKEND_INDICATORS) || any_file(&["backend", "server"]),
            mobile: any_language(MOBILE_INDICATORS),
            data: any_language(DATA_INDICATORS) && any_file(&["data", "ml"]),
        }
    }

    /// Fixed priority: fullstack > mobile > data > frontend > backend > fullstack.
    pub fn role_focus(self) -> RoleFocus {
        if self.frontend && self.backend {
            RoleFocus::Fullstack
        } else if self.mobile {
            RoleFocus::Mobile
        } else if self.data {
            RoleFocus::Data
        } else if self.frontend {
            RoleFocus::Frontend
        } else if self.backend {
            RoleFocus::Backend
        } else {
            RoleFocus::Fullstack
        }
    }
}

/// Produces a structurally valid analysis from metadata alone. Never fails.
pub fn classify(metadata: &RepoMetadata) -> AnalysisResult {
    let primary_language = metadata
        .languages
        .first()
        .map(String::as_str)
        .unwrap_or("Unknown");

    let signals = RoleSignals::detect(metadata);
    let role_focus = signals.role_focus();

    AnalysisResult {
        keywords: build_keywords(role_focus, &metadata.languages),
        project_description: describe(metadata, primary_language, role_focus, signals),
        tech_stack: metadata
            .languages
            .iter()
            .take(MAX_TECH_STACK)
            .cloned()
            .collect(),
        role_focus,
    }
}

fn role_keywords(role: RoleFocus) -> [&'static str; 3] {
    match role {
        RoleFocus::Fullstack => ["Full Stack Developer", "Software Engineer", "Web Developer"],
        RoleFocus::Frontend => ["Frontend Developer", "UI Developer", "Web Developer"],
        RoleFocus::Backend => ["Backend Developer", "Software Engineer", "API Developer"],
        RoleFocus::Mobile => ["Mobile Developer", "iOS Developer", "Android Developer"],
        RoleFocus::Data => ["Data Scientist", "Data Engineer", "Machine Learning Engineer"],
    }
}

fn build_keywords(role: RoleFocus, languages: &[String]) -> Vec<String> {
    let candidates = role_keywords(role)
        .into_iter()
        .map(str::to_string)
        .chain(
            languages
                .iter()
                .take(LANGUAGE_SAMPLE)
                .map(|lang| format!("{lang} Developer")),
        )
        .chain(GENERIC_KEYWORDS.iter().map(|k| k.to_string()));

    let mut keywords: Vec<String> = Vec::new();
    for candidate in candidates {
        if !keywords.contains(&candidate) {
            keywords.push(candidate);
        }
    }
    keywords.truncate(MAX_KEYWORDS);
    keywords
}

fn describe(
    metadata: &RepoMetadata,
    primary_language: &str,
    role: RoleFocus,
    signals: RoleSignals,
) -> String {
    let focus = if signals.frontend && signals.backend {
        "with both frontend and backend components".to_string()
    } else {
        format!("focusing on {role} development")
    };

    let sampled: Vec<&str> = metadata
        .languages
        .iter()
        .take(LANGUAGE_SAMPLE)
        .map(String::as_str)
        .collect();
    let languages = if sampled.is_empty() {
        "no detected languages".to_string()
    } else {
        sampled.join(", ")
    };

    let file_count = metadata.files.len();
    let noun = if file_count == 1 { "file" } else { "files" };

    format!(
        "This is a {primary_language} project {focus}. \
         The repository contains {file_count} analyzed {noun} using {languages}."
    )
}
