use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::{parse_llm_provider_model, LlmConfig};
use crate::error::{ConciergeError, Result};
use crate::llm::api::LlmApiClient;

/// Generative-text collaborator used by the intelligence components.
///
/// Implementations must treat empty model output and unparseable JSON as
/// errors; callers decide the fallback.
#[async_trait]
pub trait TextGeneration: Send + Sync {
    /// Free-text completion with an optional system instruction.
    async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String>;

    /// Completion parsed as a JSON document.
    async fn generate_json(&self, prompt: &str) -> Result<Value>;
}

/// Run a JSON completion and deserialize it into `T`.
pub async fn generate_structured<T: DeserializeOwned>(
    llm: &dyn TextGeneration,
    prompt: &str,
) -> Result<T> {
    let json_value = llm.generate_json(prompt).await?;

    serde_json::from_value(json_value)
        .map_err(|e| ConciergeError::Llm(format!("Failed to deserialize response: {e}")))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmBackend {
    OpenAI,
    OpenRouter,
    Gemini,
    Ollama,
    LmStudio,
    OpenAICompatible { base_url: String },
    Unavailable { reason: String },
}

#[derive(Debug, Clone)]
pub struct LlmProvider {
    backend: LlmBackend,
    config: Option<Arc<LlmConfig>>,
}

impl LlmProvider {
    pub fn new(config: Option<&LlmConfig>) -> Self {
        let Some(config) = config else {
            return Self::unavailable("No LLM configuration provided");
        };

        let (provider, _model) = parse_llm_provider_model(&config.model);

        let backend = match provider.to_lowercase().as_str() {
            "openai" => LlmBackend::OpenAI,
            "openrouter" => LlmBackend::OpenRouter,
            "gemini" => LlmBackend::Gemini,
            "ollama" => LlmBackend::Ollama,
            "lmstudio" => LlmBackend::LmStudio,
            _ => {
                if let Some(base_url) = &config.base_url {
                    LlmBackend::OpenAICompatible {
                        base_url: base_url.clone(),
                    }
                } else {
                    LlmBackend::Unavailable {
                        reason: format!("Unknown provider in model: {}", config.model),
                    }
                }
            }
        };

        Self {
            backend,
            config: Some(Arc::new(config.clone())),
        }
    }

    pub fn unavailable(reason: &str) -> Self {
        Self {
            backend: LlmBackend::Unavailable {
                reason: reason.to_string(),
            },
            config: None,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, LlmBackend::Unavailable { .. })
    }

    pub fn backend(&self) -> &LlmBackend {
        &self.backend
    }

    pub fn config(&self) -> Option<&LlmConfig> {
        self.config.as_deref()
    }

    fn client(&self) -> Result<LlmApiClient> {
        if !self.is_available() {
            return Err(ConciergeError::LlmUnavailable(self.unavailable_reason()));
        }

        let config = self
            .config()
            .ok_or_else(|| ConciergeError::LlmUnavailable("No config available".to_string()))?;

        LlmApiClient::new(config)
    }

    fn unavailable_reason(&self) -> String {
        match &self.backend {
            LlmBackend::Unavailable { reason } => reason.clone(),
            _ => "LLM provider is not configured".to_string(),
        }
    }
}

#[async_trait]
impl TextGeneration for LlmProvider {
    async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String> {
        self.client()?.complete(prompt, system).await
    }

    async fn generate_json(&self, prompt: &str) -> Result<Value> {
        self.client()?.complete_json(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(model: &str, base_url: Option<&str>) -> LlmConfig {
        LlmConfig {
            model: model.to_string(),
            api_key: Some("key".to_string()),
            base_url: base_url.map(str::to_string),
            timeout_secs: 5,
            max_retries: 0,
        }
    }

    #[test]
    fn test_no_config_is_unavailable() {
        let provider = LlmProvider::new(None);
        assert!(!provider.is_available());
        assert!(provider.config().is_none());
    }

    #[test]
    fn test_backend_detection() {
        let cases = [
            ("openai/gpt-4o-mini", LlmBackend::OpenAI),
            ("openrouter/anthropic/claude", LlmBackend::OpenRouter),
            ("gemini/gemini-2.5-flash", LlmBackend::Gemini),
            ("ollama/llama3", LlmBackend::Ollama),
            ("lmstudio/qwen", LlmBackend::LmStudio),
        ];

        for (model, expected) in cases {
            let provider = LlmProvider::new(Some(&config(model, None)));
            assert_eq!(provider.backend(), &expected, "model {model}");
            assert!(provider.is_available());
        }
    }

    #[test]
    fn test_unknown_provider_with_base_url_is_compatible() {
        let provider = LlmProvider::new(Some(&config("custom-model", Some("http://x/v1"))));
        assert_eq!(
            provider.backend(),
            &LlmBackend::OpenAICompatible {
                base_url: "http://x/v1".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_provider_without_base_url_is_unavailable() {
        let provider = LlmProvider::new(Some(&config("custom-model", None)));
        assert!(!provider.is_available());
    }

    #[tokio::test]
    async fn test_unavailable_provider_returns_unavailable_error() {
        let provider = LlmProvider::unavailable("disabled for test");

        let result = provider.generate("hello", None).await;
        match result {
            Err(ConciergeError::LlmUnavailable(reason)) => assert_eq!(reason, "disabled for test"),
            other => panic!("expected LlmUnavailable, got {other:?}"),
        }
    }
}
