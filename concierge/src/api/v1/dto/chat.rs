//! Chat request/response DTOs for the v1 API.

use serde::{Deserialize, Serialize};

use super::team::SpecialistResponse;
use crate::models;
use crate::services::{ChatExchange, ChatRequest};

/// File metadata attached to a chat message. Upload handling happens elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileAttachmentDto {
    pub file_name: String,
    pub original_name: String,
    pub file_type: String,
    pub file_size: u64,
}

impl From<FileAttachmentDto> for models::FileAttachment {
    fn from(dto: FileAttachmentDto) -> Self {
        Self {
            file_name: dto.file_name,
            original_name: dto.original_name,
            file_type: dto.file_type,
            file_size: dto.file_size,
        }
    }
}

impl From<models::FileAttachment> for FileAttachmentDto {
    fn from(file: models::FileAttachment) -> Self {
        Self {
            file_name: file.file_name,
            original_name: file.original_name,
            file_type: file.file_type,
            file_size: file.file_size,
        }
    }
}

/// Request body for `POST /api/v1/chat`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequestBody {
    /// Member message. Blank messages are rejected with 400.
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub files: Option<Vec<FileAttachmentDto>>,
    /// Defaults to `default-user`.
    pub user_id: Option<String>,
    /// Defaults to `current-session`.
    pub session_id: Option<String>,
}

impl From<ChatRequestBody> for ChatRequest {
    fn from(body: ChatRequestBody) -> Self {
        Self {
            message: body.message,
            files: body
                .files
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
            user_id: body.user_id,
            session_id: body.session_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageResponse {
    pub id: String,
    pub user_id: String,
    pub is_from_user: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_color: Option<String>,
    pub message: String,
    /// `h:mm AM`
    pub timestamp: String,
    /// `MM/DD/YY`
    pub date: String,
    pub attachments: Vec<FileAttachmentDto>,
}

impl From<models::ChatMessage> for ChatMessageResponse {
    fn from(msg: models::ChatMessage) -> Self {
        Self {
            id: msg.id,
            user_id: msg.user_id,
            is_from_user: msg.is_from_user,
            sender_id: msg.sender_id.map(|id| id.to_string()),
            sender_name: msg.sender_name,
            sender_role: msg.sender_role,
            sender_color: msg.sender_color,
            message: msg.message,
            timestamp: msg.timestamp,
            date: msg.date,
            attachments: msg.attachments.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyAlertResponse {
    pub is_emergency: bool,
    /// `low`, `medium`, `high` or `critical`.
    pub urgency_level: String,
    pub symptoms: Vec<String>,
    pub recommendations: Vec<String>,
    pub emergency_number: String,
}

impl From<models::EmergencyAlert> for EmergencyAlertResponse {
    fn from(alert: models::EmergencyAlert) -> Self {
        Self {
            is_emergency: alert.is_emergency,
            urgency_level: alert.urgency_level.to_string(),
            symptoms: alert.symptoms,
            recommendations: alert.recommendations,
            emergency_number: alert.emergency_number,
        }
    }
}

/// Response for `POST /api/v1/chat`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub user_message: ChatMessageResponse,
    pub ai_message: ChatMessageResponse,
    /// The specialist who answered.
    pub specialist: SpecialistResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_alert: Option<EmergencyAlertResponse>,
    pub needs_referral: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referred_specialist: Option<SpecialistResponse>,
}

impl From<ChatExchange> for ChatResponse {
    fn from(exchange: ChatExchange) -> Self {
        let outcome = exchange.outcome;
        Self {
            user_message: exchange.user_message.into(),
            ai_message: exchange.ai_message.into(),
            specialist: outcome.specialist.into(),
            emergency_alert: outcome.emergency_alert.map(Into::into),
            needs_referral: outcome.needs_referral,
            referred_specialist: outcome.referred_specialist.map(Into::into),
        }
    }
}

/// Query parameters for `GET /api/v1/chat-messages`.
#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessagesQuery {
    /// Restrict to one member. All members when absent.
    pub user_id: Option<String>,
    /// Keep only the most recent N messages.
    pub limit: Option<usize>,
}
