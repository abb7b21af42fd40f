use crate::config::DrafterConfig;
use crate::traits::LanguageModel;
use crate::types::{DrafterError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info};

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<RequestMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Anthropic Messages API client. The key comes from `DrafterConfig`, never from the environment.
pub struct AnthropicClient {
    client: Client,
    endpoint: String,
    api_key: String,
    api_version: String,
}

impl AnthropicClient {
    pub fn new(config: &DrafterConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.generation_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.messages_url.clone(),
            api_key: config.api_key.clone(),
            api_version: config.api_version.clone(),
        })
    }
}

#[async_trait]
impl LanguageModel for AnthropicClient {
    fn adapter_name(&self) -> String {
        format!("Anthropic Messages API ({})", self.endpoint)
    }

    async fn complete(&self, model: &str, user_message: &str, max_tokens: u32) -> Result<String> {
        let start_time = Instant::now();
        let request = MessagesRequest {
            model,
            max_tokens,
            messages: vec![RequestMessage {
                role: "user",
                content: user_message,
            }],
        };

        debug!("Calling {} with {} chars of prompt", model, user_message.len());

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        info!(
            "{} replied with HTTP {} in {} ms",
            model,
            status.as_u16(),
            start_time.elapsed().as_millis()
        );

        if !status.is_success() {
            // Error bodies still carry {"type":"error",...}; fall back to the status line
            return match parse_reply(&body) {
                Err(e @ DrafterError::Api { .. }) => Err(e),
                _ => Err(DrafterError::Api {
                    message: format!(
                        "HTTP {}: {}",
                        status.as_u16(),
                        status.canonical_reason().unwrap_or("Unknown")
                    ),
                }),
            };
        }

        parse_reply(&body)
    }
}

/// Turn a Messages API response body into its text, joining text blocks with newlines
pub fn parse_reply(body: &str) -> Result<String> {
    let response: MessagesResponse = serde_json::from_str(body)?;

    if response.kind.as_deref() == Some("error") {
        let message = response
            .error
            .and_then(|e| e.message)
            .unwrap_or_else(|| "Unknown error".to_string());
        return Err(DrafterError::Api { message });
    }

    let text = response
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .filter_map(|block| block.text)
        .collect::<Vec<_>>()
        .join("\n");

    if text.trim().is_empty() {
        return Err(DrafterError::EmptyGeneration);
    }

    Ok(text)
}

/// Scripted model for development and testing. Replies are served in order.
pub struct MockLanguageModel {
    name: String,
    replies: Mutex<VecDeque<std::result::Result<String, String>>>,
    prompts: Mutex<Vec<(String, String)>>,
}

impl MockLanguageModel {
    pub fn new(name: String) -> Self {
        Self {
            name,
            replies: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_reply(mut self, text: &str) -> Self {
        self.replies.get_mut().push_back(Ok(text.to_string()));
        self
    }

    /// Queue a reply that fails the way an API error would
    pub fn with_failure(mut self, message: &str) -> Self {
        self.replies.get_mut().push_back(Err(message.to_string()));
        self
    }

    /// (model, prompt) pairs received so far
    pub async fn prompts(&self) -> Vec<(String, String)> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    fn adapter_name(&self) -> String {
        format!("Mock LLM Adapter ({})", self.name)
    }

    async fn complete(&self, model: &str, user_message: &str, _max_tokens: u32) -> Result<String> {
        self.prompts
            .lock()
            .await
            .push((model.to_string(), user_message.to_string()));

        match self.replies.lock().await.pop_front() {
            Some(Ok(text)) if text.trim().is_empty() => Err(DrafterError::EmptyGeneration),
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(DrafterError::Api { message }),
            None => Err(DrafterError::Api {
                message: format!("{} has no scripted reply left", self.name),
            }),
        }
    }
}
