//! v1 chat handlers.

use axum::extract::{Query, State};

use crate::api::v1::dto::{ChatMessageResponse, ChatMessagesQuery, ChatRequestBody, ChatResponse};
use crate::api::v1::response::{ApiError, ApiResponse, ResponseMeta};
use crate::api::AppState;

/// `POST /api/v1/chat`
///
/// Stores the member message, routes it to a specialist (or raises an
/// emergency alert) and stores the reply.
#[utoipa::path(
    post,
    path = "/api/v1/chat",
    tag = "chat",
    operation_id = "chat.send",
    request_body = ChatRequestBody,
    responses(
        (status = 200, description = "Specialist reply", body = ChatResponse),
        (status = 400, description = "Blank message", body = ApiError),
        (status = 500, description = "Storage failure", body = ApiError),
    )
)]
pub async fn send_chat(
    State(state): State<AppState>,
    axum::Json(body): axum::Json<ChatRequestBody>,
) -> ApiResponse<ChatResponse> {
    match state.concierge.handle_chat(body.into()).await {
        Ok(exchange) => ApiResponse::success(ChatResponse::from(exchange)),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/chat-messages`
#[utoipa::path(
    get,
    path = "/api/v1/chat-messages",
    tag = "chat",
    operation_id = "chat.messages",
    params(ChatMessagesQuery),
    responses(
        (status = 200, description = "Chat messages in chronological order", body = Vec<ChatMessageResponse>),
    )
)]
pub async fn list_chat_messages(
    State(state): State<AppState>,
    Query(query): Query<ChatMessagesQuery>,
) -> ApiResponse<Vec<ChatMessageResponse>> {
    match state
        .storage
        .chat_messages(query.user_id.as_deref(), query.limit)
        .await
    {
        Ok(messages) => {
            let items: Vec<ChatMessageResponse> = messages.into_iter().map(Into::into).collect();
            let meta = ResponseMeta::total(items.len());
            ApiResponse::success_with_meta(items, meta)
        }
        Err(e) => e.into(),
    }
}
