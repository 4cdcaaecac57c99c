use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use super::response;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Elyx Concierge API",
        version = "1.0.0",
        description = "Health concierge chat: specialist routing, emergency screening and member records.",
    ),
    paths(
        handlers::health::health_check,
        handlers::team::list_team_members,
        handlers::team::list_specialists,
        handlers::conversations::list_conversations,
        handlers::conversations::search_conversations,
        handlers::chat::send_chat,
        handlers::chat::list_chat_messages,
        handlers::profile::get_profile,
        handlers::profile::create_profile,
        handlers::profile::update_profile,
        handlers::medical::get_medical_history,
        handlers::medical::add_medical_record,
        handlers::sessions::list_session_contexts,
    ),
    components(schemas(
        // Response envelope
        response::ErrorCode,
        response::ApiError,
        response::ResponseMeta,
        // Team
        dto::team::TeamMemberResponse,
        dto::team::SpecialistResponse,
        // Chat
        dto::chat::FileAttachmentDto,
        dto::chat::ChatRequestBody,
        dto::chat::ChatMessageResponse,
        dto::chat::EmergencyAlertResponse,
        dto::chat::ChatResponse,
        // Conversations
        dto::conversation::ConversationResponse,
        // Profile
        dto::profile::UserProfileResponse,
        dto::profile::CreateProfileRequest,
        dto::profile::UpdateProfileRequest,
        // Medical
        dto::medical::MedicalRecordResponse,
        dto::medical::CreateMedicalRecordRequest,
        // Sessions
        dto::session::SessionSummaryResponse,
        dto::session::SessionContextResponse,
        // Health (handler-local types)
        handlers::health::HealthData,
        handlers::health::LlmStatus,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "team", description = "Team roster and specialist personas"),
        (name = "conversations", description = "Scripted member history"),
        (name = "chat", description = "Interactive chat with the specialist team"),
        (name = "profile", description = "Member profiles"),
        (name = "medical", description = "Member medical history"),
        (name = "sessions", description = "Persisted session summaries"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
