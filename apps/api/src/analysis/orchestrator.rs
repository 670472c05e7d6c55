//! Orchestrator — model-first repository analysis with a deterministic fallback.
//!
//! One generation attempt per request. A generation failure (network, auth, quota,
//! timeout) or a normalization failure is inspected here and answered with the
//! heuristic classifier; callers always receive a well-formed `AnalysisResult`.

use thiserror::Error;
use tracing::{info, warn};

use crate::analysis::heuristic::classify;
use crate::analysis::models::{AnalysisResult, AnalysisSource, RepoMetadata};
use crate::analysis::normalizer::{normalize, ParseError};
use crate::analysis::prompts::build_analysis_prompt;
use crate::llm_client::{LlmError, TextGenerator};

/// Why the model path was abandoned.
#[derive(Debug, Error)]
pub enum ModelPathFailure {
    #[error("generation failed: {0}")]
    Generation(#[from] LlmError),

    #[error("unusable model output: {0}")]
    Parse(#[from] ParseError),
}

/// An analysis together with the path that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub result: AnalysisResult,
    pub source: AnalysisSource,
}

pub async fn analyze(metadata: &RepoMetadata, generator: &dyn TextGenerator) -> Analysis {
    match analyze_with_model(metadata, generator).await {
        Ok(result) => {
            info!(
                owner = %metadata.owner,
                repo = %metadata.repo_name,
                role_focus = %result.role_focus,
                "Repository analyzed by model"
            );
            Analysis {
                result,
                source: AnalysisSource::Ai,
            }
        }
        Err(failure) => {
            warn!(
                owner = %metadata.owner,
                repo = %metadata.repo_name,
                "Falling back to heuristic analysis: {failure}"
            );
            Analysis {
                result: classify(metadata),
                source: AnalysisSource::Heuristic,
            }
        }
    }
}

async fn analyze_with_model(
    metadata: &RepoMetadata,
    generator: &dyn TextGenerator,
) -> Result<AnalysisResult, ModelPathFailure> {
    let prompt = build_analysis_prompt(metadata);
    let raw = generator.generate(&prompt).await?;
    Ok(normalize(&raw)?)
}
