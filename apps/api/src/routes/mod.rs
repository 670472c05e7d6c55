pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers::handle_analyze_repo;
use crate::generation::handlers::{handle_generate, handle_list_models};
use crate::github::handlers::{handle_analyze_repository, handle_rate_limit};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/test", get(health::test_handler))
        // Model passthrough
        .route("/generate", post(handle_generate))
        .route("/models", get(handle_list_models))
        // Repository analysis
        .route("/analyze-repo", post(handle_analyze_repo))
        .route("/api/analyze", post(handle_analyze_repository))
        .route("/api/rate-limit", get(handle_rate_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::heuristic::classify;
    use crate::analysis::models::{AnalysisResult, RepoMetadata};
    use crate::config::Config;
    use crate::github::GitHubClient;
    use crate::llm_client::{LlmClient, LlmError, TextGenerator};

    enum Stub {
        Reply(&'static str),
        Fail,
        Hang,
    }

    #[async_trait]
    impl TextGenerator for Stub {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            match self {
                Stub::Reply(text) if text.is_empty() => Ok(format!("echo: {prompt}")),
                Stub::Reply(text) => Ok(text.to_string()),
                Stub::Fail => Err(LlmError::Api {
                    status: 403,
                    message: "API key not valid".to_string(),
                }),
                Stub::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(String::new())
                }
            }
        }
    }

    fn test_state(generator: Stub) -> AppState {
        let config = Config {
            gemini_api_key: "test-key".to_string(),
            gemini_model: "models/test".to_string(),
            gemini_base_url: "http://127.0.0.1:9".to_string(),
            generation_timeout: Duration::from_secs(2),
            github_token: None,
            github_api_url: "http://127.0.0.1:9".to_string(),
            port: 0,
            rust_log: "info".to_string(),
        };
        AppState {
            llm: LlmClient::new(
                config.gemini_api_key.clone(),
                &config.gemini_model,
                config.gemini_base_url.clone(),
            ),
            github: GitHubClient::new(None, config.github_api_url.clone()),
            generator: Arc::new(generator),
            config,
        }
    }

    async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
        let response = build_router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn shop_request() -> Value {
        json!({
            "owner": "octo",
            "repo": "shop",
            "languages": ["TypeScript", "Python"],
            "readme": "An online shop.",
            "files": {"frontend/index.ts": "export {}", "backend/app.py": "import flask"}
        })
    }

    #[tokio::test]
    async fn test_probe_endpoints() {
        let (status, body) = send(
            test_state(Stub::Fail),
            Request::get("/test").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Server is running!");

        let (status, body) = send(
            test_state(Stub::Fail),
            Request::get("/health").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_analyze_repo_uses_model_output() {
        let reply = r#"```json
{"keywords": ["Django Developer"], "projectDescription": "A shop. Built with Django.", "techStack": ["Python"], "roleFocus": "backend"}
```"#;
        let (status, body) = send(
            test_state(Stub::Reply(reply)),
            post_json("/analyze-repo", shop_request()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["source"], "ai");
        assert_eq!(body["analysis"]["roleFocus"], "backend");
        assert_eq!(body["analysis"]["keywords"], json!(["Django Developer"]));
    }

    #[tokio::test]
    async fn test_analyze_repo_falls_back_on_generation_failure() {
        let (status, body) = send(
            test_state(Stub::Fail),
            post_json("/analyze-repo", shop_request()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "heuristic");

        let metadata: RepoMetadata = serde_json::from_value(shop_request()).unwrap();
        let analysis: AnalysisResult = serde_json::from_value(body["analysis"].clone()).unwrap();
        assert_eq!(analysis, classify(&metadata));
    }

    #[tokio::test]
    async fn test_analyze_repo_falls_back_on_garbage() {
        let (status, body) = send(
            test_state(Stub::Reply("Here you go: not json")),
            post_json("/analyze-repo", shop_request()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "heuristic");
        assert_eq!(body["analysis"]["roleFocus"], "fullstack");
    }

    #[tokio::test(start_paused = true)]
    async fn test_analyze_repo_falls_back_on_timeout() {
        let (status, body) = send(
            test_state(Stub::Hang),
            post_json("/analyze-repo", shop_request()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "heuristic");
    }

    #[tokio::test]
    async fn test_analyze_repo_requires_owner_and_repo() {
        let (status, body) = send(
            test_state(Stub::Fail),
            post_json("/analyze-repo", json!({"owner": " ", "repo": "shop"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_generate_returns_model_text() {
        let (status, body) = send(
            test_state(Stub::Reply("")),
            post_json("/generate", json!({"prompt": "Say hi"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["response"], "echo: Say hi");
    }

    #[tokio::test]
    async fn test_generate_defaults_prompt() {
        let (_, body) = send(
            test_state(Stub::Reply("")),
            post_json("/generate", json!({})),
        )
        .await;
        assert_eq!(body["response"], "echo: Hello!");
    }

    #[tokio::test]
    async fn test_generate_failure_is_bad_gateway() {
        let (status, body) = send(
            test_state(Stub::Fail),
            post_json("/generate", json!({"prompt": "Say hi"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "LLM_ERROR");
    }

    #[tokio::test]
    async fn test_generate_rejects_blank_prompt() {
        let (status, _) = send(
            test_state(Stub::Reply("")),
            post_json("/generate", json!({"prompt": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_github_analyze_validates_url_before_fetching() {
        let (status, body) = send(
            test_state(Stub::Fail),
            post_json("/api/analyze", json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Repository URL is required");

        let (status, _) = send(
            test_state(Stub::Fail),
            post_json("/api/analyze", json!({"repoUrl": "https://example.com/a/b"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
