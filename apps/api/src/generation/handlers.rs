//! Axum route handlers for free-form generation and model discovery.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::{TextGenerator, Timed};
use crate::state::AppState;

const DEFAULT_PROMPT: &str = "Hello!";

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub status: &'static str,
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct ListModelsResponse {
    pub status: &'static str,
    pub models: Vec<String>,
}

/// POST /generate
///
/// Forwards a prompt to the model and returns its text verbatim.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    if request.prompt.trim().is_empty() {
        return Err(AppError::Validation("prompt cannot be empty".to_string()));
    }

    let generator = Timed::new(state.generator.as_ref(), state.config.generation_timeout);
    let response = generator.generate(&request.prompt).await?;

    Ok(Json(GenerateResponse {
        status: "success",
        response,
    }))
}

/// GET /models
///
/// Names of the models that support `generateContent`.
pub async fn handle_list_models(
    State(state): State<AppState>,
) -> Result<Json<ListModelsResponse>, AppError> {
    let models = state
        .llm
        .list_models()
        .await?
        .into_iter()
        .map(|m| m.name)
        .collect();

    Ok(Json(ListModelsResponse {
        status: "success",
        models,
    }))
}
