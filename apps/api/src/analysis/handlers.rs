//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::analysis::models::{AnalysisResult, AnalysisSource, RepoMetadata};
use crate::analysis::orchestrator::analyze;
use crate::errors::AppError;
use crate::llm_client::Timed;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnalyzeRepoResponse {
    pub status: &'static str,
    pub analysis: AnalysisResult,
    pub source: AnalysisSource,
}

/// POST /analyze-repo
///
/// Analyzes caller-supplied repository metadata. Model failures never surface
/// here; the heuristic fallback always yields a complete analysis.
pub async fn handle_analyze_repo(
    State(state): State<AppState>,
    Json(metadata): Json<RepoMetadata>,
) -> Result<Json<AnalyzeRepoResponse>, AppError> {
    if metadata.owner.trim().is_empty() || metadata.repo_name.trim().is_empty() {
        return Err(AppError::Validation(
            "owner and repo are required".to_string(),
        ));
    }

    let generator = Timed::new(state.generator.as_ref(), state.config.generation_timeout);
    let analysis = analyze(&metadata, &generator).await;

    Ok(Json(AnalyzeRepoResponse {
        status: "success",
        analysis: analysis.result,
        source: analysis.source,
    }))
}
