#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;

use concierge::config::{Config, EmergencyConfig, MemoryConfig, ServerConfig};
use concierge::db::InMemoryStorage;
use concierge::error::{ConciergeError, Result};
use concierge::intelligence::SpecialistRegistry;
use concierge::llm::TextGeneration;
use concierge::models::ChatMessage;
use concierge::services::ConciergeService;

static INIT: Once = Once::new();

pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("concierge=debug")
            .with_test_writer()
            .try_init();
    });
}

/// Scripted model: fixed text and JSON answers, counting every call.
#[derive(Default)]
pub struct ScriptedLlm {
    pub text: Option<String>,
    pub json: Option<Value>,
    pub text_calls: AtomicUsize,
    pub json_calls: AtomicUsize,
}

impl ScriptedLlm {
    pub fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            ..Default::default()
        }
    }

    pub fn with_json(mut self, json: Value) -> Self {
        self.json = Some(json);
        self
    }

    pub fn calls(&self) -> usize {
        self.text_calls.load(Ordering::SeqCst) + self.json_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGeneration for ScriptedLlm {
    async fn generate(&self, _prompt: &str, _system: Option<&str>) -> Result<String> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        self.text
            .clone()
            .ok_or_else(|| ConciergeError::Llm("no scripted text".to_string()))
    }

    async fn generate_json(&self, _prompt: &str) -> Result<Value> {
        self.json_calls.fetch_add(1, Ordering::SeqCst);
        self.json
            .clone()
            .ok_or_else(|| ConciergeError::Llm("Failed to parse JSON response".to_string()))
    }
}

/// Model that is never configured.
pub struct OfflineLlm;

#[async_trait]
impl TextGeneration for OfflineLlm {
    async fn generate(&self, _prompt: &str, _system: Option<&str>) -> Result<String> {
        Err(ConciergeError::LlmUnavailable("offline".to_string()))
    }

    async fn generate_json(&self, _prompt: &str) -> Result<Value> {
        Err(ConciergeError::LlmUnavailable("offline".to_string()))
    }
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            default_user_id: "default-user".to_string(),
            default_session_id: "current-session".to_string(),
        },
        llm: None,
        memory: MemoryConfig::default(),
        emergency: EmergencyConfig::default(),
    }
}

pub fn registry() -> Arc<SpecialistRegistry> {
    Arc::new(SpecialistRegistry::standard().expect("standard registry is valid"))
}

pub fn service(storage: InMemoryStorage, llm: Arc<dyn TextGeneration>) -> ConciergeService {
    ConciergeService::new(Arc::new(storage), llm, registry(), test_config())
}

pub fn member_message(text: &str, date: NaiveDate) -> ChatMessage {
    ChatMessage {
        id: format!("m-{date}-{}", text.len()),
        user_id: "default-user".to_string(),
        is_from_user: true,
        sender_id: None,
        sender_name: Some("You".to_string()),
        sender_role: None,
        sender_color: Some("user".to_string()),
        message: text.to_string(),
        timestamp: "9:00 AM".to_string(),
        date: date.format("%m/%d/%y").to_string(),
        attachments: Vec::new(),
    }
}
