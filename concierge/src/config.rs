use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

/// Parse a comma-separated list, dropping blank entries.
fn parse_env_list(var: &str, default: &[&str]) -> Vec<String> {
    match env::var(var) {
        Ok(val) if !val.trim().is_empty() => val
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
        _ => default.iter().map(|item| item.to_string()).collect(),
    }
}

pub const DEFAULT_USER_ID: &str = "default-user";
pub const DEFAULT_SESSION_ID: &str = "current-session";

const DEFAULT_HOSPITALS: &[&str] = &[
    "Singapore General Hospital",
    "Tan Tock Seng Hospital",
    "National University Hospital",
];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: Option<LlmConfig>,
    pub memory: MemoryConfig,
    pub emergency: EmergencyConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub default_user_id: String,
    pub default_session_id: String,
}

/// LLM configuration for chat/completion models
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

/// Windows and thresholds used by conversation memory.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    pub recency_days: i64,
    pub max_recent_messages: usize,
    pub repetition_window: usize,
    /// Similarity (0-100) a repetition verdict must exceed.
    pub repetition_threshold: u8,
    pub chat_history_limit: usize,
    pub medical_context_limit: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            recency_days: 14,
            max_recent_messages: 50,
            repetition_window: 10,
            repetition_threshold: 70,
            chat_history_limit: 20,
            medical_context_limit: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmergencyConfig {
    pub number: String,
    pub hospitals: Vec<String>,
}

impl Default for EmergencyConfig {
    fn default() -> Self {
        Self {
            number: "995".to_string(),
            hospitals: DEFAULT_HOSPITALS.iter().map(|h| h.to_string()).collect(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let memory_defaults = MemoryConfig::default();

        Self {
            server: ServerConfig {
                host: env::var("CONCIERGE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("CONCIERGE_PORT", 5000),
                default_user_id: env::var("CONCIERGE_DEFAULT_USER")
                    .unwrap_or_else(|_| DEFAULT_USER_ID.to_string()),
                default_session_id: env::var("CONCIERGE_DEFAULT_SESSION")
                    .unwrap_or_else(|_| DEFAULT_SESSION_ID.to_string()),
            },
            llm: env::var("LLM_MODEL").ok().map(|model| LlmConfig {
                model,
                api_key: env::var("LLM_API_KEY")
                    .or_else(|_| env::var("GEMINI_API_KEY"))
                    .ok(),
                base_url: env::var("LLM_BASE_URL").ok(),
                timeout_secs: parse_env_or("LLM_TIMEOUT", 30),
                max_retries: parse_env_or("LLM_MAX_RETRIES", 0),
            }),
            memory: MemoryConfig {
                recency_days: parse_env_or("MEMORY_RECENCY_DAYS", memory_defaults.recency_days),
                max_recent_messages: parse_env_or(
                    "MEMORY_MAX_RECENT_MESSAGES",
                    memory_defaults.max_recent_messages,
                ),
                repetition_window: parse_env_or(
                    "MEMORY_REPETITION_WINDOW",
                    memory_defaults.repetition_window,
                ),
                repetition_threshold: parse_env_or(
                    "MEMORY_REPETITION_THRESHOLD",
                    memory_defaults.repetition_threshold,
                )
                .min(100),
                chat_history_limit: parse_env_or(
                    "CHAT_HISTORY_LIMIT",
                    memory_defaults.chat_history_limit,
                ),
                medical_context_limit: parse_env_or(
                    "MEDICAL_CONTEXT_LIMIT",
                    memory_defaults.medical_context_limit,
                ),
            },
            emergency: EmergencyConfig {
                number: env::var("EMERGENCY_NUMBER").unwrap_or_else(|_| "995".to_string()),
                hospitals: parse_env_list("EMERGENCY_HOSPITALS", DEFAULT_HOSPITALS),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

/// Known LLM providers that use OpenAI-compatible APIs
pub const KNOWN_LLM_PROVIDERS: &[&str] = &["openai", "openrouter", "gemini", "ollama", "lmstudio"];

/// Parse an LLM model name into (provider, model) tuple.
pub fn parse_llm_provider_model(model: &str) -> (&str, &str) {
    if let Some((prefix, rest)) = model.split_once('/') {
        let prefix_lower = prefix.to_lowercase();
        if KNOWN_LLM_PROVIDERS.contains(&prefix_lower.as_str()) {
            return (prefix, rest);
        }
    }
    // Default to treating the whole string as a local model
    ("local", model)
}
