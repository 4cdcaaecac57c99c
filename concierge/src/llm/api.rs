use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::{ApiError, OpenAIError},
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
        CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
    },
    Client,
};
use reqwest::StatusCode;
use serde_json::Value;

use crate::config::{parse_llm_provider_model, LlmConfig};
use crate::error::{ConciergeError, Result};

/// Providers served from the member's own machine; they take no API key.
const KEYLESS_PROVIDERS: &[&str] = &["ollama", "lmstudio", "local"];

const RATE_LIMIT_MARKERS: &[&str] = &[
    "rate limit",
    "rate_limit",
    "too many requests",
    "resource exhausted",
    "insufficient_quota",
];

const AUTH_MARKERS: &[&str] = &[
    "unauthorized",
    "forbidden",
    "authentication",
    "invalid api key",
    "invalid_api_key",
];

fn default_base_url(provider: &str) -> &'static str {
    match provider {
        "openrouter" => "https://openrouter.ai/api/v1",
        "gemini" => "https://generativelanguage.googleapis.com/v1beta/openai",
        "ollama" => "http://localhost:11434/v1",
        "lmstudio" => "http://localhost:1234/v1",
        _ => "https://api.openai.com/v1",
    }
}

/// Outcome of one failed completion attempt.
enum Failure {
    /// Worth another attempt while the retry budget lasts.
    Transient(ConciergeError),
    Fatal(ConciergeError),
}

/// Chat-completions client for any OpenAI-compatible endpoint.
#[derive(Clone)]
pub struct LlmApiClient {
    client: Client<OpenAIConfig>,
    model: String,
    base_url: String,
    max_retries: u32,
}

impl LlmApiClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let (provider, model) = parse_llm_provider_model(&config.model);
        let provider = provider.to_lowercase();

        if config.api_key.is_none() && !KEYLESS_PROVIDERS.contains(&provider.as_str()) {
            return Err(ConciergeError::LlmUnavailable(format!(
                "API key required for provider '{provider}'"
            )));
        }

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| default_base_url(&provider).to_string());
        // Local model names may themselves contain a slash.
        let model = if provider == "local" {
            config.model.clone()
        } else {
            model.to_string()
        };

        let timeout = Duration::from_secs(config.timeout_secs);
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConciergeError::Llm(format!("Failed to create LLM HTTP client: {e}")))?;

        // async-openai retries 5xx on its own; bound that by the request timeout.
        let backoff = backoff::ExponentialBackoff {
            max_elapsed_time: Some(timeout),
            ..Default::default()
        };

        let openai_config = OpenAIConfig::new()
            .with_api_base(base_url.clone())
            .with_api_key(config.api_key.clone().unwrap_or_default());
        let client = Client::with_config(openai_config)
            .with_http_client(http_client)
            .with_backoff(backoff);

        Ok(Self {
            client,
            model,
            base_url,
            max_retries: config.max_retries,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn complete(&self, prompt: &str, system_prompt: Option<&str>) -> Result<String> {
        let request = self.build_request(prompt, system_prompt)?;
        self.send(request).await
    }

    /// Completion parsed as JSON. A markdown fence around the document is dropped.
    pub async fn complete_json(&self, prompt: &str) -> Result<Value> {
        let content = self.complete(prompt, None).await?;
        tracing::debug!(response_len = content.len(), "LLM JSON response received");

        serde_json::from_str(strip_code_fence(&content)).map_err(|e| {
            tracing::error!(
                response_len = content.len(),
                response_preview = %content.chars().take(100).collect::<String>(),
                error = %e,
                "Failed to parse JSON response"
            );
            ConciergeError::Llm(format!("Failed to parse JSON response: {e}"))
        })
    }

    async fn send(&self, request: CreateChatCompletionRequest) -> Result<String> {
        let mut attempt: u32 = 0;

        loop {
            let failure = match self.client.chat().create(request.clone()).await {
                Ok(response) => return first_choice_text(response),
                Err(error) => classify(error),
            };

            match failure {
                Failure::Transient(error) if attempt < self.max_retries => {
                    attempt += 1;
                    let delay = Duration::from_millis(100_u64 << (attempt - 1));
                    tracing::warn!(attempt, error = %error, "LLM request failed, retrying");
                    tokio::time::sleep(delay).await;
                }
                Failure::Transient(error) | Failure::Fatal(error) => return Err(error),
            }
        }
    }

    fn build_request(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
    ) -> Result<CreateChatCompletionRequest> {
        if prompt.trim().is_empty() {
            return Err(ConciergeError::Validation(
                "Prompt cannot be empty".to_string(),
            ));
        }

        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::with_capacity(2);
        if let Some(system_prompt) = system_prompt.filter(|value| !value.trim().is_empty()) {
            messages.push(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system_prompt)
                    .build()
                    .map_err(invalid_request)?
                    .into(),
            );
        }
        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(invalid_request)?
                .into(),
        );

        CreateChatCompletionRequestArgs::default()
            .model(self.model.clone())
            .messages(messages)
            .build()
            .map_err(invalid_request)
    }
}

fn invalid_request(error: OpenAIError) -> ConciergeError {
    ConciergeError::Validation(format!("Invalid LLM request: {error}"))
}

fn first_choice_text(response: CreateChatCompletionResponse) -> Result<String> {
    let content = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ConciergeError::Llm("LLM response contained no choices".to_string()))?
        .message
        .content
        .unwrap_or_default();

    if content.trim().is_empty() {
        return Err(ConciergeError::Llm(
            "LLM response contained empty content".to_string(),
        ));
    }
    Ok(content)
}

/// Rate limits and rejected credentials are never retried.
fn classify(error: OpenAIError) -> Failure {
    match error {
        OpenAIError::Reqwest(e) => match e.status() {
            Some(StatusCode::TOO_MANY_REQUESTS) => {
                Failure::Fatal(ConciergeError::LlmRateLimit { retry_after: None })
            }
            Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => {
                Failure::Fatal(ConciergeError::Llm(format!("LLM authentication failed: {e}")))
            }
            Some(status) if !status.is_server_error() => {
                Failure::Fatal(ConciergeError::Llm(format!("LLM request failed: {e}")))
            }
            _ => Failure::Transient(ConciergeError::Llm(format!("LLM request failed: {e}"))),
        },
        OpenAIError::ApiError(api_error) => classify_api_error(api_error),
        OpenAIError::JSONDeserialize(e) => {
            Failure::Fatal(ConciergeError::Llm(format!("Failed to parse LLM response: {e}")))
        }
        OpenAIError::InvalidArgument(message) => Failure::Fatal(ConciergeError::Validation(message)),
        other => Failure::Fatal(ConciergeError::Llm(other.to_string())),
    }
}

fn classify_api_error(api_error: ApiError) -> Failure {
    let text = format!(
        "{} {} {}",
        api_error.message,
        api_error.r#type.as_deref().unwrap_or_default(),
        api_error.code.as_deref().unwrap_or_default()
    )
    .to_lowercase();

    if RATE_LIMIT_MARKERS.iter().any(|marker| text.contains(marker)) {
        return Failure::Fatal(ConciergeError::LlmRateLimit { retry_after: None });
    }
    if AUTH_MARKERS.iter().any(|marker| text.contains(marker)) {
        return Failure::Fatal(ConciergeError::Llm(format!(
            "LLM authentication failed: {api_error}"
        )));
    }

    // Untyped errors are usually proxies or gateways failing upstream.
    let error = ConciergeError::Llm(format!("LLM API error: {api_error}"));
    if api_error.r#type.is_none() && api_error.code.is_none() {
        Failure::Transient(error)
    } else {
        Failure::Fatal(error)
    }
}

/// Models frequently wrap JSON answers in a markdown fence.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_llm_config(model: &str) -> LlmConfig {
        LlmConfig {
            model: model.to_string(),
            api_key: None,
            base_url: None,
            timeout_secs: 30,
            max_retries: 0,
        }
    }

    fn api_error(message: &str, error_type: Option<&str>, code: Option<&str>) -> ApiError {
        ApiError {
            message: message.to_string(),
            r#type: error_type.map(str::to_string),
            param: None,
            code: code.map(str::to_string),
        }
    }

    #[test]
    fn test_strip_code_fence_variants() {
        assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n[1,2]\n```"), "[1,2]");
        assert_eq!(strip_code_fence("  {\"a\":1}  \n"), "{\"a\":1}");
    }

    #[test]
    fn test_gemini_default_base_url() {
        let mut config = test_llm_config("gemini/gemini-2.5-flash");
        config.api_key = Some("key".to_string());
        let client = LlmApiClient::new(&config).expect("client should be created");

        assert_eq!(
            client.base_url(),
            "https://generativelanguage.googleapis.com/v1beta/openai"
        );
        assert_eq!(client.model(), "gemini-2.5-flash");
    }

    #[test]
    fn test_hosted_provider_requires_api_key() {
        let config = test_llm_config("openai/gpt-4o-mini");
        let result = LlmApiClient::new(&config);

        assert!(matches!(result, Err(ConciergeError::LlmUnavailable(_))));
    }

    #[test]
    fn test_local_provider_keeps_full_model_name() {
        let mut config = test_llm_config("my-org/custom-model");
        config.base_url = Some("http://localhost:8080/v1".to_string());
        let client = LlmApiClient::new(&config).expect("local client should not need a key");

        assert_eq!(client.model(), "my-org/custom-model");
        assert_eq!(client.base_url(), "http://localhost:8080/v1");
    }

    #[test]
    fn test_blank_prompt_is_rejected_before_sending() {
        let client =
            LlmApiClient::new(&test_llm_config("ollama/llama3")).expect("client should be created");

        assert!(matches!(
            client.build_request(" \n", Some("You are Ruby")),
            Err(ConciergeError::Validation(_))
        ));
    }

    #[test]
    fn test_blank_system_prompt_is_skipped() {
        let client =
            LlmApiClient::new(&test_llm_config("ollama/llama3")).expect("client should be created");

        let with_system = client
            .build_request("hello", Some("You are Ruby"))
            .expect("request should build");
        let blank_system = client
            .build_request("hello", Some("   "))
            .expect("request should build");

        assert_eq!(with_system.messages.len(), 2);
        assert_eq!(blank_system.messages.len(), 1);
        assert!(blank_system.response_format.is_none());
    }

    #[test]
    fn test_api_error_classification() {
        assert!(matches!(
            classify_api_error(api_error("Quota gone", Some("insufficient_quota"), None)),
            Failure::Fatal(ConciergeError::LlmRateLimit { .. })
        ));
        assert!(matches!(
            classify_api_error(api_error("Invalid API key", None, Some("invalid_api_key"))),
            Failure::Fatal(ConciergeError::Llm(message)) if message.contains("authentication failed")
        ));
        assert!(matches!(
            classify_api_error(api_error("bad gateway", None, None)),
            Failure::Transient(ConciergeError::Llm(_))
        ));
        assert!(matches!(
            classify_api_error(api_error("model not found", Some("invalid_request_error"), None)),
            Failure::Fatal(ConciergeError::Llm(_))
        ));
    }
}
