/// LLM Client — the single point of entry for all chat-completion calls.
///
/// ARCHITECTURAL RULE: No other module may call the OpenAI API directly.
/// All generation goes through the `TextGenerator` trait implemented here.
///
/// The client makes exactly one attempt per call. Retry and fallback policy
/// belong to the caller (see `generation::router`).
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// The model used for every artifact. Hardcoded so all drafts come from the same model.
pub const MODEL: &str = "gpt-4.1-mini";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

impl LlmError {
    /// Transport failures, rate limits and server errors may succeed on a second try.
    /// Auth, quota-exhausted (non-429) and malformed responses will not.
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            LlmError::Api { status, .. } => *status == 429 || *status >= 500,
            LlmError::Parse(_) | LlmError::EmptyContent => false,
        }
    }
}

/// Sampling parameters. Each artifact kind carries its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

/// One system + user exchange.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub system: &'a str,
    pub prompt: &'a str,
    pub params: SamplingParams,
}

/// Anything that can turn a system + user prompt into text.
/// `LlmClient` in production; fakes in tests.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Content of the first choice, if the model produced any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Wraps the OpenAI chat-completions API.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl LlmClient {
    pub fn new(api_key: String, base_url: &str) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_key,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        })
    }

    /// Makes a single call to the chat-completions endpoint and returns the full response.
    pub async fn call(&self, request: GenerationRequest<'_>) -> Result<ChatResponse, LlmError> {
        let body = ChatRequest {
            model: MODEL,
            messages: [
                ChatMessage {
                    role: "system",
                    content: request.system,
                },
                ChatMessage {
                    role: "user",
                    content: request.prompt,
                },
            ],
            temperature: request.params.temperature,
            max_tokens: request.params.max_tokens,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = parse_error_message(&body);
            warn!("LLM API returned {}: {}", status, message);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        let chat: ChatResponse = serde_json::from_slice(&bytes)?;

        if let Some(usage) = &chat.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat)
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String, LlmError> {
        let response = self.call(request).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Pulls `error.message` out of an OpenAI error body, falling back to the raw body.
fn parse_error_message(body: &str) -> String {
    serde_json::from_str::<ApiError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_system_then_user() {
        let body = ChatRequest {
            model: MODEL,
            messages: [
                ChatMessage {
                    role: "system",
                    content: "be kind",
                },
                ChatMessage {
                    role: "user",
                    content: "Name: Ama",
                },
            ],
            temperature: 0.7,
            max_tokens: 1200,
        };
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["model"], "gpt-4.1-mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "Name: Ama");
        assert_eq!(json["max_tokens"], 1200);
    }

    #[test]
    fn test_response_text_takes_first_choice() {
        let json = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "Dear committee"}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 3, "total_tokens": 13}
        }"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), Some("Dear committee"));
    }

    #[test]
    fn test_response_without_content_has_no_text() {
        let json = r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert!(response.text().is_none());

        let json = r#"{"choices": []}"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_parse_error_message_prefers_api_message() {
        let body = r#"{"error": {"message": "You exceeded your current quota", "type": "insufficient_quota"}}"#;
        assert_eq!(parse_error_message(body), "You exceeded your current quota");
        assert_eq!(parse_error_message("bad gateway"), "bad gateway");
    }

    #[test]
    fn test_retryable_statuses() {
        let api = |status| LlmError::Api {
            status,
            message: String::new(),
        };
        assert!(api(429).is_retryable());
        assert!(api(500).is_retryable());
        assert!(api(503).is_retryable());
        assert!(!api(401).is_retryable());
        assert!(!api(400).is_retryable());
        assert!(!LlmError::EmptyContent.is_retryable());
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let client = LlmClient::new("sk-test".to_string(), "http://localhost:9999/v1/").unwrap();
        assert_eq!(client.endpoint, "http://localhost:9999/v1/chat/completions");
    }

    mod http {
        use std::sync::{Arc, Mutex};

        use axum::extract::State;
        use axum::http::{header, HeaderMap, StatusCode};
        use axum::routing::post;
        use axum::Router;
        use serde_json::Value;

        use crate::llm_client::{
            GenerationRequest, LlmClient, LlmError, SamplingParams, TextGenerator, MODEL,
        };

        /// Stand-in for the chat-completions endpoint: fixed reply, records every request.
        #[derive(Clone)]
        struct FakeApi {
            status: StatusCode,
            body: &'static str,
            seen: Arc<Mutex<Vec<(Option<String>, Value)>>>,
        }

        async fn chat_completions(
            State(api): State<FakeApi>,
            headers: HeaderMap,
            body: String,
        ) -> (StatusCode, [(header::HeaderName, &'static str); 1], &'static str) {
            let auth = headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let json = serde_json::from_str(&body).unwrap_or(Value::Null);
            api.seen.lock().unwrap().push((auth, json));
            (api.status, [(header::CONTENT_TYPE, "application/json")], api.body)
        }

        async fn start(status: StatusCode, body: &'static str) -> (LlmClient, FakeApi) {
            let api = FakeApi {
                status,
                body,
                seen: Arc::default(),
            };
            let app = Router::new()
                .route("/v1/chat/completions", post(chat_completions))
                .with_state(api.clone());

            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            let client =
                LlmClient::new("sk-test".to_string(), &format!("http://{addr}/v1")).unwrap();
            (client, api)
        }

        fn request() -> GenerationRequest<'static> {
            GenerationRequest {
                system: "You are a kind mentor.",
                prompt: "Name: Ama",
                params: SamplingParams {
                    temperature: 0.7,
                    max_tokens: 1200,
                },
            }
        }

        #[tokio::test]
        async fn test_generate_sends_bearer_and_system_then_user() {
            let (client, api) = start(
                StatusCode::OK,
                r#"{"choices": [{"message": {"role": "assistant", "content": "Dear committee"}}],
                    "usage": {"prompt_tokens": 12, "completion_tokens": 2}}"#,
            )
            .await;

            let text = client.generate(request()).await.unwrap();
            assert_eq!(text, "Dear committee");

            let seen = api.seen.lock().unwrap();
            assert_eq!(seen.len(), 1);
            let (auth, body) = &seen[0];
            assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
            assert_eq!(body["model"], MODEL);
            assert_eq!(body["max_tokens"], 1200);
            assert_eq!(body["messages"].as_array().unwrap().len(), 2);
            assert_eq!(body["messages"][0]["role"], "system");
            assert_eq!(body["messages"][0]["content"], "You are a kind mentor.");
            assert_eq!(body["messages"][1]["role"], "user");
            assert_eq!(body["messages"][1]["content"], "Name: Ama");
        }

        #[tokio::test]
        async fn test_server_error_maps_to_retryable_api_error() {
            let (client, _) = start(
                StatusCode::SERVICE_UNAVAILABLE,
                r#"{"error": {"message": "The server is overloaded"}}"#,
            )
            .await;

            let err = client.generate(request()).await.unwrap_err();

            match &err {
                LlmError::Api { status, message } => {
                    assert_eq!(*status, 503);
                    assert_eq!(message, "The server is overloaded");
                }
                other => panic!("expected Api error, got {other:?}"),
            }
            assert!(err.is_retryable());
        }

        #[tokio::test]
        async fn test_unauthorized_is_not_retryable() {
            let (client, _) = start(
                StatusCode::UNAUTHORIZED,
                r#"{"error": {"message": "Incorrect API key provided"}}"#,
            )
            .await;

            let err = client.generate(request()).await.unwrap_err();

            assert!(matches!(err, LlmError::Api { status: 401, .. }), "{err:?}");
            assert!(!err.is_retryable());
        }

        #[tokio::test]
        async fn test_null_content_is_empty_content() {
            let (client, _) = start(
                StatusCode::OK,
                r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#,
            )
            .await;

            let err = client.generate(request()).await.unwrap_err();

            assert!(matches!(err, LlmError::EmptyContent), "{err:?}");
            assert!(!err.is_retryable());
        }

        #[tokio::test]
        async fn test_non_json_success_body_is_parse_error() {
            let (client, _) = start(StatusCode::OK, "<html>gateway</html>").await;

            let err = client.generate(request()).await.unwrap_err();

            assert!(matches!(err, LlmError::Parse(_)), "{err:?}");
            assert!(!err.is_retryable());
        }
    }
}
