use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::config::Config;
use crate::db::StorageBackend;
use crate::error::{ConciergeError, Result};
use crate::intelligence::referral::compose_referral;
use crate::intelligence::{
    AdviceComposer, ConversationMemory, EmergencyDetector, KeywordTaxonomy, SpecialistRegistry,
    SpecialistRouter,
};
use crate::llm::TextGeneration;
use crate::models::{
    format_message_stamp, ChatMessage, EmergencyAlert, FileAttachment, NewChatMessage,
    RepetitionCheck, Specialist,
};

const USER_SENDER_NAME: &str = "You";
const USER_SENDER_COLOR: &str = "user";

/// Result of answering one member query.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatOutcome {
    pub specialist: Specialist,
    pub response: String,
    pub emergency_alert: Option<EmergencyAlert>,
    pub needs_referral: bool,
    pub referred_specialist: Option<Specialist>,
}

impl ChatOutcome {
    fn answered_by(specialist: &Specialist, response: String) -> Self {
        Self {
            specialist: specialist.clone(),
            response,
            emergency_alert: None,
            needs_referral: false,
            referred_specialist: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub message: String,
    pub files: Vec<FileAttachment>,
    pub user_id: Option<String>,
    pub session_id: Option<String>,
}

/// Both stored messages of a chat turn plus the routing outcome.
#[derive(Debug, Clone)]
pub struct ChatExchange {
    pub user_message: ChatMessage,
    pub ai_message: ChatMessage,
    pub outcome: ChatOutcome,
}

/// Orchestrates a chat turn: emergency screening, context, routing and reply.
pub struct ConciergeService {
    storage: Arc<dyn StorageBackend>,
    registry: Arc<SpecialistRegistry>,
    router: SpecialistRouter,
    detector: EmergencyDetector,
    memory: ConversationMemory,
    advice: AdviceComposer,
    config: Config,
}

impl ConciergeService {
    pub fn new(
        storage: Arc<dyn StorageBackend>,
        llm: Arc<dyn TextGeneration>,
        registry: Arc<SpecialistRegistry>,
        config: Config,
    ) -> Self {
        let taxonomy = Arc::new(KeywordTaxonomy::default());

        Self {
            router: SpecialistRouter::new(registry.clone(), taxonomy.clone()),
            detector: EmergencyDetector::new(
                llm.clone(),
                taxonomy.clone(),
                config.emergency.clone(),
            ),
            memory: ConversationMemory::new(llm.clone(), config.memory.clone()),
            advice: AdviceComposer::new(llm, taxonomy),
            storage,
            registry,
            config,
        }
    }

    pub fn registry(&self) -> &SpecialistRegistry {
        &self.registry
    }

    pub fn storage(&self) -> &Arc<dyn StorageBackend> {
        &self.storage
    }

    /// Answer `query` for a member. Only storage failures are returned as errors.
    ///
    /// High and critical emergencies skip routing and are answered with the
    /// alert text; milder ones keep the alert attached to the routed answer.
    pub async fn respond(&self, query: &str, user_id: &str, session_id: &str) -> Result<ChatOutcome> {
        let today = Local::now().date_naive();
        let medical_history = self.storage.medical_history(user_id, None).await?;

        let alert = self.detector.analyze(query, &medical_history).await;
        if alert.should_escalate() {
            tracing::warn!(
                user_id,
                session_id,
                urgency = %alert.urgency_level,
                "Emergency response issued"
            );
            let responder = self.registry.default_advisor();
            let mut outcome =
                ChatOutcome::answered_by(responder, self.detector.format_response(&alert));
            outcome.emergency_alert = Some(alert);
            return Ok(outcome);
        }
        let emergency_alert = alert.is_emergency.then_some(alert);

        let (profile, history) = futures::try_join!(
            self.storage.get_profile(user_id),
            self.storage
                .chat_messages(Some(user_id), Some(self.config.memory.chat_history_limit)),
        )?;
        let history = without_pending(&history, query);

        let context = self
            .memory
            .context_summary(history, profile.as_ref(), &medical_history, today)
            .await;
        let check = self.memory.check_repetition(query, history).await;

        let needs_advice = self.router.needs_advice(query);
        let specialist = self.router.route(query, needs_advice);

        if needs_advice && specialist.id == self.registry.coordinator().id {
            let mut outcome = self.refer(query, &context, &check, today).await;
            outcome.emergency_alert = emergency_alert;
            return Ok(outcome);
        }

        let response = match check.previous_response {
            Some(_) if check.is_repetitive => {
                self.memory
                    .adaptive_response(query, &context, &check, specialist)
                    .await
            }
            _ => {
                self.advice
                    .compose(query, specialist, &context, &check, today)
                    .await
            }
        };

        tracing::info!(
            user_id,
            specialist = %specialist.id,
            needs_advice,
            repetitive = check.is_repetitive,
            emergency = emergency_alert.is_some(),
            "Chat query answered"
        );

        let mut outcome = ChatOutcome::answered_by(specialist, response);
        outcome.emergency_alert = emergency_alert;
        Ok(outcome)
    }

    /// Coordinator hand-off: the coordinator introduces the best advisor and
    /// relays that advisor's answer.
    pub async fn refer(
        &self,
        query: &str,
        context: &str,
        check: &RepetitionCheck,
        today: NaiveDate,
    ) -> ChatOutcome {
        let coordinator = self.registry.coordinator();
        let advisor = self.router.route(query, true);
        let advice = self.advice.compose(query, advisor, context, check, today).await;

        tracing::info!(advisor = %advisor.id, "Coordinator referral");

        ChatOutcome {
            specialist: coordinator.clone(),
            response: compose_referral(advisor, &advice),
            emergency_alert: None,
            needs_referral: true,
            referred_specialist: Some(advisor.clone()),
        }
    }

    /// Full chat turn: validate, store the member message, answer, store the
    /// reply and persist a session summary.
    pub async fn handle_chat(&self, request: ChatRequest) -> Result<ChatExchange> {
        let trimmed = request.message.trim();
        if trimmed.is_empty() {
            return Err(ConciergeError::Validation("Message is required".to_string()));
        }

        let user_id = request
            .user_id
            .unwrap_or_else(|| self.config.server.default_user_id.clone());
        let session_id = request
            .session_id
            .unwrap_or_else(|| self.config.server.default_session_id.clone());

        let query = format!("{trimmed}{}", attachment_note(&request.files));
        let (timestamp, date) = format_message_stamp(Local::now().naive_local());

        let user_message = self
            .storage
            .add_chat_message(NewChatMessage {
                user_id: user_id.clone(),
                is_from_user: true,
                sender_id: None,
                sender_name: Some(USER_SENDER_NAME.to_string()),
                sender_role: None,
                sender_color: Some(USER_SENDER_COLOR.to_string()),
                message: query.clone(),
                timestamp: timestamp.clone(),
                date: date.clone(),
                attachments: request.files,
            })
            .await?;

        let outcome = self.respond(&query, &user_id, &session_id).await?;

        let ai_message = self
            .storage
            .add_chat_message(NewChatMessage {
                user_id: user_id.clone(),
                is_from_user: false,
                sender_id: Some(outcome.specialist.id),
                sender_name: Some(outcome.specialist.name.clone()),
                sender_role: Some(outcome.specialist.role.clone()),
                sender_color: Some(outcome.specialist.color.clone()),
                message: outcome.response.clone(),
                timestamp,
                date,
                attachments: Vec::new(),
            })
            .await?;

        self.record_session(&user_id, &session_id, &user_message, &ai_message)
            .await;

        Ok(ChatExchange {
            user_message,
            ai_message,
            outcome,
        })
    }

    async fn record_session(
        &self,
        user_id: &str,
        session_id: &str,
        user_message: &ChatMessage,
        ai_message: &ChatMessage,
    ) {
        let summary = self
            .memory
            .summarize_session(&[user_message.clone(), ai_message.clone()])
            .await;

        if let Err(e) = self
            .storage
            .add_session_context(user_id, session_id, summary)
            .await
        {
            tracing::error!(user_id, session_id, error = %e, "Failed to store session context");
        }
    }
}

/// Note appended to the member message when files were attached.
pub fn attachment_note(files: &[FileAttachment]) -> String {
    if files.is_empty() {
        return String::new();
    }

    let names: Vec<&str> = files.iter().map(|f| f.original_name.as_str()).collect();
    format!("\n\n[User attached files: {}]", names.join(", "))
}

/// History minus the member message currently being answered.
fn without_pending<'a>(history: &'a [ChatMessage], query: &str) -> &'a [ChatMessage] {
    match history.split_last() {
        Some((last, rest)) if last.is_from_user && last.message == query => rest,
        _ => history,
    }
}
