//! v1 scripted history handlers.

use axum::extract::{Query, State};

use crate::api::v1::dto::{ConversationResponse, ConversationSearchQuery};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode, ResponseMeta};
use crate::api::AppState;
use crate::models::Conversation;

fn into_list(entries: Vec<Conversation>) -> ApiResponse<Vec<ConversationResponse>> {
    let items: Vec<ConversationResponse> = entries.into_iter().map(Into::into).collect();
    let meta = ResponseMeta::total(items.len());
    ApiResponse::success_with_meta(items, meta)
}

/// `GET /api/v1/conversations`
#[utoipa::path(
    get,
    path = "/api/v1/conversations",
    tag = "conversations",
    operation_id = "conversations.list",
    responses(
        (status = 200, description = "Scripted history in chronological order", body = Vec<ConversationResponse>),
    )
)]
pub async fn list_conversations(State(state): State<AppState>) -> ApiResponse<Vec<ConversationResponse>> {
    match state.storage.conversations().await {
        Ok(entries) => into_list(entries),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/conversations/search?q=`
#[utoipa::path(
    get,
    path = "/api/v1/conversations/search",
    tag = "conversations",
    operation_id = "conversations.search",
    params(ConversationSearchQuery),
    responses(
        (status = 200, description = "Matching history entries", body = Vec<ConversationResponse>),
        (status = 400, description = "Missing query", body = ApiError),
    )
)]
pub async fn search_conversations(
    State(state): State<AppState>,
    Query(params): Query<ConversationSearchQuery>,
) -> ApiResponse<Vec<ConversationResponse>> {
    let query = params.q.trim();
    if query.is_empty() {
        return ApiResponse::error(ErrorCode::InvalidRequest, "Search query is required");
    }

    match state.storage.search_conversations(query).await {
        Ok(entries) => into_list(entries),
        Err(e) => e.into(),
    }
}
