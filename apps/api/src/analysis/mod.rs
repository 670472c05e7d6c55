// Repository analysis: model-backed job-keyword analysis with a heuristic fallback.
// All model calls go through the `TextGenerator` seam in llm_client.

pub mod handlers;
pub mod heuristic;
pub mod models;
pub mod normalizer;
pub mod orchestrator;
pub mod prompts;
