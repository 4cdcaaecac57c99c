use axum::{
    routing::{get, post},
    Router,
};

use crate::api::state::AppState;

use super::handlers;

pub fn v1_router() -> Router<AppState> {
    let conversations = Router::new()
        .route("/", get(handlers::conversations::list_conversations))
        .route("/search", get(handlers::conversations::search_conversations));

    let profile = Router::new()
        .route("/", post(handlers::profile::create_profile))
        .route(
            "/{userId}",
            get(handlers::profile::get_profile).put(handlers::profile::update_profile),
        );

    let medical = Router::new()
        .route("/", post(handlers::medical::add_medical_record))
        .route("/{userId}", get(handlers::medical::get_medical_history));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(super::openapi::openapi_json))
        .merge(super::openapi::redoc_router())
        .route("/team-members", get(handlers::team::list_team_members))
        .route("/specialists", get(handlers::team::list_specialists))
        .route("/chat", post(handlers::chat::send_chat))
        .route("/chat-messages", get(handlers::chat::list_chat_messages))
        .route(
            "/sessions/{userId}",
            get(handlers::sessions::list_session_contexts),
        )
        .nest("/conversations", conversations)
        .nest("/profile", profile)
        .nest("/medical-history", medical)
}
