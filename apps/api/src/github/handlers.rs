//! Axum route handlers for the GitHub-backed API.

use anyhow::anyhow;
use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::models::{AnalysisResult, AnalysisSource};
use crate::analysis::orchestrator::analyze;
use crate::errors::AppError;
use crate::github::parse_repo_url;
use crate::llm_client::Timed;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRepositoryRequest {
    #[serde(default)]
    pub repo_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryAnalysis {
    pub owner: String,
    pub repo: String,
    pub repo_url: String,
    pub readme: String,
    pub languages: Vec<String>,
    pub files: IndexMap<String, String>,
    pub file_count: usize,
    pub ai_analysis: AnalysisResult,
    pub analysis_source: AnalysisSource,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeRepositoryResponse {
    pub success: bool,
    pub message: &'static str,
    pub data: RepositoryAnalysis,
}

#[derive(Debug, Serialize)]
pub struct CoreRateLimit {
    pub limit: u32,
    pub remaining: u32,
    pub reset: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct RateLimitResponse {
    pub core: CoreRateLimit,
    pub message: &'static str,
}

/// POST /api/analyze
///
/// Fetches README, languages, and key source files of a public GitHub repository,
/// then runs the repository analysis on them.
pub async fn handle_analyze_repository(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRepositoryRequest>,
) -> Result<Json<AnalyzeRepositoryResponse>, AppError> {
    let repo_url = request
        .repo_url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Repository URL is required".to_string()))?;
    let repo = parse_repo_url(&repo_url)?;

    info!("Analyzing {}/{}", repo.owner, repo.repo);
    let metadata = state.github.fetch_metadata(&repo).await?;

    let generator = Timed::new(state.generator.as_ref(), state.config.generation_timeout);
    let analysis = analyze(&metadata, &generator).await;
    info!(
        "Analysis complete - {} files analyzed ({:?})",
        metadata.files.len(),
        analysis.source
    );

    Ok(Json(AnalyzeRepositoryResponse {
        success: true,
        message: "Repository analyzed successfully",
        data: RepositoryAnalysis {
            file_count: metadata.files.len(),
            owner: metadata.owner,
            repo: metadata.repo_name,
            repo_url,
            readme: metadata.readme,
            languages: metadata.languages,
            files: metadata.files,
            ai_analysis: analysis.result,
            analysis_source: analysis.source,
            timestamp: Utc::now(),
        },
    }))
}

/// GET /api/rate-limit
///
/// Current GitHub core rate limit for the configured token.
pub async fn handle_rate_limit(
    State(state): State<AppState>,
) -> Result<Json<RateLimitResponse>, AppError> {
    let core = state.github.rate_limit().await?;
    let reset = DateTime::from_timestamp(core.reset, 0)
        .ok_or_else(|| anyhow!("GitHub returned an out-of-range reset time: {}", core.reset))?;

    Ok(Json(RateLimitResponse {
        message: if core.remaining == 0 {
            "Rate limit exhausted! Wait until reset time."
        } else {
            "You have API calls remaining"
        },
        core: CoreRateLimit {
            limit: core.limit,
            remaining: core.remaining,
            reset,
        },
    }))
}
