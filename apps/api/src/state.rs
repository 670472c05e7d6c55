use std::sync::Arc;

use crate::config::Config;
use crate::github::GitHubClient;
use crate::llm_client::{LlmClient, TextGenerator};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Concrete Gemini client, used for model listing.
    pub llm: LlmClient,
    /// The `generate(prompt)` capability. Defaults to `llm`; tests swap in stubs.
    pub generator: Arc<dyn TextGenerator>,
    pub github: GitHubClient,
}
