//! Session context DTOs for the v1 API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models;

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummaryResponse {
    pub conversation_summary: String,
    pub key_topics: Vec<String>,
    pub specialists_involved: Vec<String>,
    pub action_items: Vec<String>,
    pub follow_up_needed: Vec<String>,
}

impl From<models::SessionSummary> for SessionSummaryResponse {
    fn from(summary: models::SessionSummary) -> Self {
        Self {
            conversation_summary: summary.conversation_summary,
            key_topics: summary.key_topics,
            specialists_involved: summary.specialists_involved,
            action_items: summary.action_items,
            follow_up_needed: summary.follow_up_needed,
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionContextResponse {
    pub id: String,
    pub user_id: String,
    pub session_id: String,
    pub summary: SessionSummaryResponse,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String)]
    pub updated_at: DateTime<Utc>,
}

impl From<models::SessionContext> for SessionContextResponse {
    fn from(ctx: models::SessionContext) -> Self {
        Self {
            id: ctx.id,
            user_id: ctx.user_id,
            session_id: ctx.session_id,
            summary: ctx.summary.into(),
            created_at: ctx.created_at,
            updated_at: ctx.updated_at,
        }
    }
}

/// Query parameters for `GET /api/v1/sessions/{userId}`.
#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct SessionContextsQuery {
    pub session_id: Option<String>,
}
