use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};

use super::semantic::ScorerFailure;

/// Prompt plus sampling parameters sent to the completion service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Outbound text-completion collaborator. Its output is untrusted free-form text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, ScorerFailure>;
}

/// Chat-completions client for OpenAI-compatible endpoints.
pub struct OpenAiCompletionClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl OpenAiCompletionClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, ScorerFailure> {
        let body = json!({
            "model": request.model,
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.prompt },
            ],
        });

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| ScorerFailure::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScorerFailure::UnexpectedStatus(status.as_u16()));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|err| ScorerFailure::MalformedResponse(err.to_string()))?;

        message_content(&payload)
    }
}

fn message_content(payload: &Value) -> Result<String, ScorerFailure> {
    payload["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| {
            ScorerFailure::MalformedResponse("response carried no message content".to_string())
        })
}
