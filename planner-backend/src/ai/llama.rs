use crate::ai::types::AiError;
use crate::ai::{ChatModel, Message};
use crate::config::{self, Config};
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Llama client for the Ollama API
#[derive(Clone)]
pub struct LlamaClient {
    client: Client,
    headers: header::HeaderMap,
    endpoint: String,
    generate_endpoint: String,
    model: String,
    timeout: Option<Duration>,
}

#[derive(Debug, Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<OllamaMessage>,
    stream: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaResponseMessage,
    #[serde(default)]
    done_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OllamaResponseMessage {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    #[serde(default)]
    response: String,
}

#[derive(Debug, Deserialize)]
struct OllamaErrorResponse {
    error: String,
}

impl LlamaClient {
    pub fn new(endpoint: Option<&str>, model: Option<&str>) -> Self {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Self {
            client: crate::http::shared_client().clone(),
            headers,
            endpoint: endpoint
                .unwrap_or(config::DEFAULT_OLLAMA_ENDPOINT)
                .to_string(),
            generate_endpoint: config::DEFAULT_OLLAMA_GENERATE_ENDPOINT.to_string(),
            model: model.unwrap_or(config::DEFAULT_OLLAMA_MODEL).to_string(),
            timeout: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Some(&config.ollama_endpoint), Some(&config.ollama_model))
            .with_generate_endpoint(&config.ollama_generate_endpoint)
            .with_timeout(config.ollama_timeout_secs.map(Duration::from_secs))
    }

    pub fn with_generate_endpoint(mut self, endpoint: &str) -> Self {
        self.generate_endpoint = endpoint.to_string();
        self
    }

    /// Bound each request; `None` waits for the server indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn generate_text(&self, messages: Vec<Message>) -> Result<String, AiError> {
        let request = OllamaChatRequest {
            model: self.model.clone(),
            messages: messages
                .into_iter()
                .map(|m| OllamaMessage {
                    role: m.role.to_string(),
                    content: m.content,
                })
                .collect(),
            stream: false,
        };

        log::debug!(
            "[OLLAMA] Sending {} messages to {}",
            request.messages.len(),
            self.endpoint
        );

        let response: OllamaChatResponse = self.post_json(&self.endpoint, &request).await?;

        if let Some(reason) = &response.done_reason {
            log::debug!("[OLLAMA] Done reason: {}", reason);
        }
        if response.message.content.is_empty() {
            return Err(AiError::new("Ollama API returned no content"));
        }

        Ok(response.message.content)
    }

    /// Single-prompt completion against the generate endpoint, trimmed.
    pub async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        let request = OllamaGenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        log::debug!("[OLLAMA] Sending prompt ({} chars) to {}", prompt.len(), self.generate_endpoint);

        let response: OllamaGenerateResponse =
            self.post_json(&self.generate_endpoint, &request).await?;
        let text = response.response.trim();
        if text.is_empty() {
            return Err(AiError::new("Ollama API returned no content"));
        }
        Ok(text.to_string())
    }

    async fn post_json<Req, Resp>(&self, url: &str, body: &Req) -> Result<Resp, AiError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let mut request = self
            .client
            .post(url)
            .headers(self.headers.clone())
            .json(body);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AiError::new(format!("Ollama API request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::warn!("[OLLAMA] {} returned {}: {}", url, status, error_text);

            if let Ok(error_response) = serde_json::from_str::<OllamaErrorResponse>(&error_text) {
                return Err(AiError::with_status(
                    format!("Ollama API error: {}", error_response.error),
                    status.as_u16(),
                ));
            }
            return Err(AiError::with_status(
                format!("Ollama API returned error status: {}, body: {}", status, error_text),
                status.as_u16(),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| AiError::new(format!("Failed to parse Ollama response: {}", e)))
    }
}

#[async_trait]
impl ChatModel for LlamaClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate_text(&self, messages: Vec<Message>) -> Result<String, AiError> {
        LlamaClient::generate_text(self, messages).await
    }

    async fn complete(&self, prompt: &str) -> Result<String, AiError> {
        self.generate(prompt).await
    }
}
