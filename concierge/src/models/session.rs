use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of comparing a new question with recent member questions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RepetitionCheck {
    pub is_repetitive: bool,
    pub previous_response: Option<String>,
    /// 0-100
    pub similarity: u8,
}

impl RepetitionCheck {
    pub fn not_repetitive() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub conversation_summary: String,
    #[serde(default)]
    pub key_topics: Vec<String>,
    #[serde(default)]
    pub specialists_involved: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<String>,
    #[serde(default)]
    pub follow_up_needed: Vec<String>,
}

/// A persisted session summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    pub id: String,
    pub user_id: String,
    pub session_id: String,
    pub summary: SessionSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
