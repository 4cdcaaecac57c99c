use std::env;

use pretty_assertions::assert_eq;
use serial_test::serial;

use concierge::config::{parse_llm_provider_model, Config, KNOWN_LLM_PROVIDERS};
use concierge::llm::{LlmBackend, LlmProvider};

const LLM_VARS: &[&str] = &[
    "LLM_MODEL",
    "LLM_API_KEY",
    "GEMINI_API_KEY",
    "LLM_BASE_URL",
    "LLM_TIMEOUT",
    "LLM_MAX_RETRIES",
];

fn clear_llm_env() {
    for var in LLM_VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_llm_config_gemini() {
    let (provider, model) = parse_llm_provider_model("gemini/gemini-2.5-flash");
    assert_eq!(provider, "gemini");
    assert_eq!(model, "gemini-2.5-flash");
}

#[test]
fn test_llm_config_openrouter_keeps_nested_model() {
    let (provider, model) = parse_llm_provider_model("openrouter/anthropic/claude-3.5-sonnet");
    assert_eq!(provider, "openrouter");
    assert_eq!(model, "anthropic/claude-3.5-sonnet");
}

#[test]
fn test_llm_config_unknown_prefix_defaults_to_local() {
    let (provider, model) = parse_llm_provider_model("unknown/model-name");
    assert_eq!(provider, "local");
    assert_eq!(model, "unknown/model-name");
}

#[test]
fn test_known_llm_providers_constant() {
    for provider in ["openai", "openrouter", "gemini", "ollama", "lmstudio"] {
        assert!(KNOWN_LLM_PROVIDERS.contains(&provider), "{provider}");
    }
    assert_eq!(KNOWN_LLM_PROVIDERS.len(), 5);
}

#[test]
#[serial]
fn test_no_model_means_fallback_mode() {
    clear_llm_env();

    let config = Config::from_env();

    assert!(config.llm.is_none());
    assert!(!LlmProvider::new(config.llm.as_ref()).is_available());
}

#[test]
#[serial]
fn test_gemini_key_is_accepted_as_api_key() {
    clear_llm_env();
    env::set_var("LLM_MODEL", "gemini/gemini-2.5-flash");
    env::set_var("GEMINI_API_KEY", "g-key");
    env::set_var("LLM_MAX_RETRIES", "2");

    let config = Config::from_env();
    let llm = config.llm.clone().expect("model is set");

    assert_eq!(llm.api_key.as_deref(), Some("g-key"));
    assert_eq!(llm.max_retries, 2);
    assert_eq!(llm.timeout_secs, 30);
    assert_eq!(
        LlmProvider::new(config.llm.as_ref()).backend(),
        &LlmBackend::Gemini
    );

    clear_llm_env();
}

#[test]
#[serial]
fn test_llm_api_key_wins_over_gemini_key() {
    clear_llm_env();
    env::set_var("LLM_MODEL", "openai/gpt-4o-mini");
    env::set_var("LLM_API_KEY", "primary");
    env::set_var("GEMINI_API_KEY", "secondary");

    let llm = Config::from_env().llm.expect("model is set");
    assert_eq!(llm.api_key.as_deref(), Some("primary"));

    clear_llm_env();
}

#[test]
#[serial]
fn test_invalid_timeout_falls_back_to_default() {
    clear_llm_env();
    env::set_var("LLM_MODEL", "ollama/llama3");
    env::set_var("LLM_TIMEOUT", "soon");

    let llm = Config::from_env().llm.expect("model is set");
    assert_eq!(llm.timeout_secs, 30);
    assert_eq!(llm.max_retries, 0);

    clear_llm_env();
}
