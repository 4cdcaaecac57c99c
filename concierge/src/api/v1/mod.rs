pub mod dto;
pub mod handlers;
pub mod openapi;
pub mod response;
pub mod router;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::api::routes::create_router;
    use crate::api::state::AppState;
    use crate::config::{Config, EmergencyConfig, MemoryConfig, ServerConfig};
    use crate::db::InMemoryStorage;
    use crate::error::{ConciergeError, Result};
    use crate::intelligence::SpecialistRegistry;
    use crate::llm::{LlmProvider, TextGeneration};

    /// Replies with a fixed line and never produces JSON.
    struct CannedLlm;

    #[async_trait]
    impl TextGeneration for CannedLlm {
        async fn generate(&self, _prompt: &str, _system: Option<&str>) -> Result<String> {
            Ok("Stay hydrated and keep portions light.".to_string())
        }

        async fn generate_json(&self, _prompt: &str) -> Result<Value> {
            Err(ConciergeError::Llm("no json".to_string()))
        }
    }

    fn test_state() -> AppState {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
                default_user_id: "default-user".to_string(),
                default_session_id: "current-session".to_string(),
            },
            llm: None,
            memory: MemoryConfig::default(),
            emergency: EmergencyConfig::default(),
        };

        AppState::with_generator(
            config,
            Arc::new(InMemoryStorage::seeded()),
            Arc::new(SpecialistRegistry::standard().unwrap()),
            LlmProvider::unavailable("not configured in tests"),
            Arc::new(CannedLlm),
        )
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn health_reports_llm_unavailable() {
        let app = create_router(test_state());

        let response = app.oneshot(get("/api/v1/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["data"]["llm"]["status"], "unavailable");
        assert_eq!(json["data"]["specialists"], 6);
        assert!(json.get("error").is_none());
    }

    #[tokio::test]
    async fn openapi_json_is_valid() {
        let app = create_router(test_state());

        let response = app.oneshot(get("/api/v1/openapi.json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let version = json["openapi"].as_str().expect("openapi field should be a string");
        assert!(version.starts_with('3'), "got: {version}");
        assert!(json["paths"].get("/api/v1/chat").is_some());
    }

    #[tokio::test]
    async fn blank_chat_message_is_rejected() {
        let app = create_router(test_state());

        let response = app
            .oneshot(post_json("/api/v1/chat", serde_json::json!({ "message": "   " })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "invalid_request");
        assert_eq!(json["error"]["message"], "Message is required");
        assert!(json.get("data").is_none());
    }

    #[tokio::test]
    async fn missing_chat_message_is_rejected() {
        let app = create_router(test_state());

        let response = app
            .oneshot(post_json("/api/v1/chat", serde_json::json!({ "userId": "u1" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn chat_routes_nutrition_question_to_carla() {
        let app = create_router(test_state());

        let response = app
            .oneshot(post_json(
                "/api/v1/chat",
                serde_json::json!({
                    "message": "What should I eat before my flight to reduce bloating?",
                    "files": [{
                        "fileName": "f-1",
                        "originalName": "meal-log.pdf",
                        "fileType": "application/pdf",
                        "fileSize": 2048
                    }]
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let data = &json["data"];
        assert_eq!(data["specialist"]["id"], "carla");
        assert_eq!(data["needsReferral"], false);
        assert!(data.get("emergencyAlert").is_none());
        assert_eq!(data["userMessage"]["senderName"], "You");
        assert_eq!(data["userMessage"]["senderColor"], "user");
        assert_eq!(data["userMessage"]["userId"], "default-user");
        assert!(data["userMessage"]["message"]
            .as_str()
            .unwrap()
            .ends_with("[User attached files: meal-log.pdf]"));
        assert_eq!(data["aiMessage"]["senderName"], "Carla");
        assert_eq!(data["aiMessage"]["isFromUser"], false);
    }

    #[tokio::test]
    async fn chat_persists_messages_and_session() {
        let state = test_state();
        let app = create_router(state.clone());

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/chat",
                serde_json::json!({
                    "message": "Can you reschedule my Thursday appointment?",
                    "userId": "u-42",
                    "sessionId": "s-1"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["specialist"]["id"], "ruby");

        let messages = app
            .clone()
            .oneshot(get("/api/v1/chat-messages?userId=u-42"))
            .await
            .unwrap();
        let json = body_json(messages).await;
        assert_eq!(json["meta"]["total"], 2);
        assert_eq!(json["data"][0]["isFromUser"], true);

        let sessions = app.oneshot(get("/api/v1/sessions/u-42?sessionId=s-1")).await.unwrap();
        let json = body_json(sessions).await;
        assert_eq!(json["meta"]["total"], 1);
        assert!(json["data"][0]["summary"]["conversationSummary"].is_string());
    }

    #[tokio::test]
    async fn chat_emergency_returns_alert() {
        let app = create_router(test_state());

        let response = app
            .oneshot(post_json(
                "/api/v1/chat",
                serde_json::json!({ "message": "I have severe chest pain and can't breathe" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let alert = &json["data"]["emergencyAlert"];
        assert_eq!(alert["isEmergency"], true);
        assert_eq!(alert["urgencyLevel"], "high");
        assert_eq!(alert["emergencyNumber"], "995");
        assert_eq!(json["data"]["specialist"]["id"], "warren");
    }

    #[tokio::test]
    async fn missing_profile_is_not_found() {
        let app = create_router(test_state());

        let response = app.oneshot(get("/api/v1/profile/nobody")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "not_found");
    }

    #[tokio::test]
    async fn seeded_profile_is_served_camel_case() {
        let app = create_router(test_state());

        let response = app.oneshot(get("/api/v1/profile/default-user")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["name"], "Rohan Patel");
        assert_eq!(json["data"]["chronicConditions"][0], "Elevated Cholesterol");
    }

    #[tokio::test]
    async fn profile_create_then_update() {
        let app = create_router(test_state());

        let created = app
            .clone()
            .oneshot(post_json(
                "/api/v1/profile",
                serde_json::json!({ "id": "mei", "name": "Mei Lin", "age": 38 }),
            ))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);

        let updated = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/v1/profile/mei")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"travelFrequency":"Monthly"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(updated.status(), StatusCode::OK);
        let json = body_json(updated).await;
        assert_eq!(json["data"]["travelFrequency"], "Monthly");
        assert_eq!(json["data"]["age"], 38);
    }

    #[tokio::test]
    async fn update_unknown_profile_is_not_found() {
        let app = create_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/v1/profile/ghost")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name":"Ghost"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn medical_history_filters_by_category() {
        let app = create_router(test_state());

        let response = app
            .oneshot(get("/api/v1/medical-history/default-user?category=allergy"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["meta"]["total"], 1);
        assert_eq!(json["data"][0]["title"], "Shellfish Allergy");
    }

    #[tokio::test]
    async fn conversation_search_requires_query() {
        let app = create_router(test_state());

        let missing = app
            .clone()
            .oneshot(get("/api/v1/conversations/search"))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

        let found = app
            .oneshot(get("/api/v1/conversations/search?q=salmon"))
            .await
            .unwrap();
        assert_eq!(found.status(), StatusCode::OK);
        let json = body_json(found).await;
        assert!(json["meta"]["total"].as_u64().unwrap() >= 1);
    }

    #[tokio::test]
    async fn team_members_in_declaration_order() {
        let app = create_router(test_state());

        let response = app.oneshot(get("/api/v1/team-members")).await.unwrap();

        let json = body_json(response).await;
        let ids: Vec<&str> = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["ruby", "warren", "advik", "carla", "rachel", "neel"]);
    }
}
