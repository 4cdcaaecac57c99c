//! Scripted conversation history DTOs for the v1 API.

use serde::{Deserialize, Serialize};

use crate::models;

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConversationResponse {
    pub id: String,
    pub is_from_member: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_color: Option<String>,
    pub message: String,
    pub timestamp: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month_label: Option<String>,
}

impl From<models::Conversation> for ConversationResponse {
    fn from(entry: models::Conversation) -> Self {
        Self {
            id: entry.id,
            is_from_member: entry.is_from_member,
            sender_id: entry.sender_id.map(|id| id.to_string()),
            sender_name: entry.sender_name,
            sender_role: entry.sender_role,
            sender_color: entry.sender_color,
            message: entry.message,
            timestamp: entry.timestamp,
            date: entry.date,
            month_label: entry.month_label,
        }
    }
}

/// Query parameters for `GET /api/v1/conversations/search`.
#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
pub struct ConversationSearchQuery {
    /// Case-insensitive text matched against message, sender name and role.
    #[serde(default)]
    pub q: String,
}
