//! 外部 chat-completion 接口客户端
//!
//! [`CompletionClient`] 是摘要功能依赖的抽象，生产环境使用
//! [`OpenRouterClient`]，测试中可以替换为假实现。

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::config::LlmConfig;

/// 外部调用错误
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("OPENROUTER_API_KEY is not set")]
    MissingApiKey,
    #[error("request to completion API failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("completion API returned {0}")]
    Status(StatusCode),
    #[error("completion API returned no choices")]
    EmptyResponse,
}

/// 把一段提示词发送给语言模型，返回模型的文本回复
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// OpenRouter chat-completion 客户端
pub struct OpenRouterClient {
    http: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl OpenRouterClient {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let http = reqwest::ClientBuilder::new()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl CompletionClient for OpenRouterClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        // 密钥缺失在请求时才报错，服务本身仍可提供用户接口
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!("Sending {} byte prompt to {}", prompt.len(), self.endpoint);

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Status(status));
        }

        let result: ChatResponse = response.json().await?;
        let content = first_choice(result)?;
        info!("Completion received from {} ({} chars)", self.model, content.len());
        Ok(content)
    }
}

fn first_choice(response: ChatResponse) -> Result<String, LlmError> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or(LlmError::EmptyResponse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::State,
        http::{header::AUTHORIZATION, HeaderMap},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    type Received = Arc<Mutex<Vec<(Option<String>, Value)>>>;

    /// 在本地端口启动一个假的 completion 接口，返回其地址
    async fn spawn_endpoint(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/api/v1/chat/completions")
    }

    fn client_for(endpoint: String) -> OpenRouterClient {
        OpenRouterClient::new(&LlmConfig {
            endpoint,
            api_key: Some("sk-test".to_string()),
            ..LlmConfig::default()
        })
        .unwrap()
    }

    async fn record_and_answer(
        State(received): State<Received>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        let auth = headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string);
        received.lock().unwrap().push((auth, body));
        Json(json!({
            "id": "gen-1",
            "choices": [{ "message": { "role": "assistant", "content": "Both like mountains." } }]
        }))
    }

    #[tokio::test]
    async fn test_complete_sends_bearer_and_body() {
        let received = Received::default();
        let app = Router::new()
            .route("/api/v1/chat/completions", post(record_and_answer))
            .with_state(received.clone());
        let client = client_for(spawn_endpoint(app).await);

        let summary = client.complete("Summarize Ana").await.unwrap();
        assert_eq!(summary, "Both like mountains.");

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        let (auth, body) = &received[0];
        assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
        assert_eq!(
            body,
            &json!({
                "model": "deepseek/deepseek-r1",
                "messages": [{ "role": "user", "content": "Summarize Ana" }]
            })
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let app = Router::new().route(
            "/api/v1/chat/completions",
            post(|| async { StatusCode::BAD_GATEWAY }),
        );
        let client = client_for(spawn_endpoint(app).await);

        let result = client.complete("hello").await;
        assert!(matches!(result, Err(LlmError::Status(status)) if status == StatusCode::BAD_GATEWAY));
    }

    #[tokio::test]
    async fn test_empty_choices_from_endpoint() {
        let app = Router::new().route(
            "/api/v1/chat/completions",
            post(|| async { Json(json!({ "choices": [] })) }),
        );
        let client = client_for(spawn_endpoint(app).await);

        assert!(matches!(
            client.complete("hello").await,
            Err(LlmError::EmptyResponse)
        ));
    }

    #[test]
    fn test_request_body_shape() {
        let body = ChatRequest {
            model: "deepseek/deepseek-r1",
            messages: [ChatMessage {
                role: "user",
                content: "hello",
            }],
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "model": "deepseek/deepseek-r1",
                "messages": [{ "role": "user", "content": "hello" }]
            })
        );
    }

    #[test]
    fn test_first_choice_content() {
        let response: ChatResponse = serde_json::from_value(json!({
            "id": "gen-1",
            "choices": [
                { "message": { "role": "assistant", "content": "first" } },
                { "message": { "role": "assistant", "content": "second" } }
            ]
        }))
        .unwrap();
        assert_eq!(first_choice(response).unwrap(), "first");
    }

    #[test]
    fn test_no_choices_is_error() {
        let response: ChatResponse = serde_json::from_value(json!({ "id": "gen-2" })).unwrap();
        assert!(matches!(first_choice(response), Err(LlmError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_sending() {
        let client = OpenRouterClient::new(&LlmConfig {
            endpoint: "http://127.0.0.1:9/unreachable".to_string(),
            ..LlmConfig::default()
        })
        .unwrap();

        let result = client.complete("hello").await;
        assert!(matches!(result, Err(LlmError::MissingApiKey)));
    }
}
