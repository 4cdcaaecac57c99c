use axum::extract::{Path, Query, State};

use crate::api::v1::dto::{SessionContextResponse, SessionContextsQuery};
use crate::api::v1::response::{ApiResponse, ResponseMeta};
use crate::api::AppState;

/// `GET /api/v1/sessions/{userId}`
#[utoipa::path(
    get,
    path = "/api/v1/sessions/{userId}",
    tag = "sessions",
    operation_id = "sessions.list",
    params(
        ("userId" = String, Path, description = "Member id"),
        SessionContextsQuery,
    ),
    responses(
        (status = 200, description = "Session summaries, newest first", body = Vec<SessionContextResponse>),
    )
)]
pub async fn list_session_contexts(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<SessionContextsQuery>,
) -> ApiResponse<Vec<SessionContextResponse>> {
    match state
        .storage
        .session_contexts(&user_id, query.session_id.as_deref())
        .await
    {
        Ok(contexts) => {
            let items: Vec<SessionContextResponse> = contexts.into_iter().map(Into::into).collect();
            let meta = ResponseMeta::total(items.len());
            ApiResponse::success_with_meta(items, meta)
        }
        Err(e) => e.into(),
    }
}
