use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use serde::Deserialize;

use super::utils::{clamp_similarity, truncate_chars};
use crate::config::MemoryConfig;
use crate::error::ConciergeError;
use crate::llm::{generate_structured, prompts, TextGeneration};
use crate::models::{
    ChatMessage, MedicalRecord, RepetitionCheck, SessionSummary, Specialist, UserProfile,
};

/// Characters of the model's "most similar question" used to find it again.
const MATCH_PREFIX_CHARS: usize = 50;
/// Characters of a previous answer quoted when the model is unavailable.
const QUOTE_CHARS: usize = 200;

const REFERENCE_PREFIX: &str = "[Referencing our previous discussion]";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepetitionVerdict {
    is_repetitive: bool,
    #[serde(default)]
    most_similar_question: Option<String>,
    #[serde(default)]
    similarity: Option<f64>,
    #[serde(default)]
    reason: Option<String>,
}

/// Short-term conversational memory: recency window, repetition checks,
/// session summaries and the rolling patient context.
#[derive(Clone)]
pub struct ConversationMemory {
    llm: Arc<dyn TextGeneration>,
    config: MemoryConfig,
}

impl ConversationMemory {
    pub fn new(llm: Arc<dyn TextGeneration>, config: MemoryConfig) -> Self {
        Self { llm, config }
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    /// Messages dated within the recency window, capped to the most recent
    /// `max_recent_messages` in input order, then ordered by date and time.
    pub fn recent_messages(&self, messages: &[ChatMessage], today: NaiveDate) -> Vec<ChatMessage> {
        let cutoff = today - Duration::days(self.config.recency_days);

        let in_window: Vec<&ChatMessage> = messages
            .iter()
            .filter(|msg| msg.sent_on().is_some_and(|date| date >= cutoff))
            .collect();

        let skip = in_window.len().saturating_sub(self.config.max_recent_messages);
        let mut recent: Vec<ChatMessage> = in_window.into_iter().skip(skip).cloned().collect();
        recent.sort_by_key(ChatMessage::chronological_key);
        recent
    }

    /// Ask the model whether `query` repeats a recent member question.
    ///
    /// Never fails: every error path reports "not repetitive".
    pub async fn check_repetition(&self, query: &str, messages: &[ChatMessage]) -> RepetitionCheck {
        let user_questions: Vec<&str> = messages
            .iter()
            .filter(|msg| msg.is_from_user)
            .map(|msg| msg.message.as_str())
            .collect();
        let skip = user_questions
            .len()
            .saturating_sub(self.config.repetition_window);
        let user_questions = &user_questions[skip..];

        if user_questions.is_empty() {
            return RepetitionCheck::not_repetitive();
        }

        let prompt =
            prompts::repetition_check_prompt(query, user_questions, self.config.repetition_threshold);

        let verdict: RepetitionVerdict = match generate_structured(self.llm.as_ref(), &prompt).await {
            Ok(verdict) => verdict,
            Err(ConciergeError::LlmUnavailable(reason)) => {
                tracing::debug!(%reason, "LLM unavailable, skipping repetition check");
                return RepetitionCheck::not_repetitive();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Repetition check failed");
                return RepetitionCheck::not_repetitive();
            }
        };

        let similarity = clamp_similarity(verdict.similarity.unwrap_or(0.0));
        let is_repetitive =
            verdict.is_repetitive && similarity > self.config.repetition_threshold;

        tracing::debug!(
            is_repetitive,
            similarity,
            reason = ?verdict.reason,
            "Repetition check complete"
        );

        let previous_response = if is_repetitive {
            verdict
                .most_similar_question
                .as_deref()
                .and_then(|question| find_previous_answer(messages, question))
        } else {
            None
        };

        RepetitionCheck {
            is_repetitive,
            previous_response,
            similarity,
        }
    }

    /// A reference to the earlier answer for repeated questions, otherwise
    /// the context summary unchanged.
    pub async fn adaptive_response(
        &self,
        query: &str,
        context_summary: &str,
        check: &RepetitionCheck,
        specialist: &Specialist,
    ) -> String {
        match check.previous_response.as_deref() {
            Some(previous) if check.is_repetitive => {
                self.reference_response(query, previous, specialist).await
            }
            _ => context_summary.to_string(),
        }
    }

    async fn reference_response(
        &self,
        query: &str,
        previous_response: &str,
        specialist: &Specialist,
    ) -> String {
        let prompt = prompts::reference_response_prompt(
            &specialist.name,
            &specialist.role,
            query,
            previous_response,
        );

        match self.llm.generate(&prompt, None).await {
            Ok(text) => format!("{REFERENCE_PREFIX} {text}"),
            Err(e) => {
                tracing::warn!(error = %e, "Reference response generation failed");
                format!(
                    "As I mentioned before: {}...",
                    truncate_chars(previous_response, QUOTE_CHARS)
                )
            }
        }
    }

    /// Structured summary of a session, with a deterministic fallback.
    pub async fn summarize_session(&self, session_messages: &[ChatMessage]) -> SessionSummary {
        let prompt = prompts::session_summary_prompt(session_messages);

        match generate_structured::<SessionSummary>(self.llm.as_ref(), &prompt).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::debug!(error = %e, "Using fallback session summary");
                fallback_session_summary(session_messages)
            }
        }
    }

    /// Rolling patient context fed to the specialist prompt.
    pub async fn context_summary(
        &self,
        messages: &[ChatMessage],
        profile: Option<&UserProfile>,
        medical_history: &[MedicalRecord],
        today: NaiveDate,
    ) -> String {
        let fallback = || {
            format!(
                "Context: Recent conversation with {} messages. User profile: {}",
                messages.len(),
                profile.map(|p| p.name.as_str()).unwrap_or("Unknown")
            )
        };

        let recent = self.recent_messages(messages, today);
        let profile_json = profile.and_then(|p| serde_json::to_string_pretty(p).ok());

        let medical = self.medical_context(medical_history);
        let history_json = if medical.is_empty() {
            None
        } else {
            serde_json::to_string_pretty(medical).ok()
        };

        let prompt = prompts::context_summary_prompt(
            profile_json.as_deref(),
            history_json.as_deref(),
            &recent,
        );

        match self.llm.generate(&prompt, None).await {
            Ok(summary) => summary,
            Err(ConciergeError::LlmUnavailable(_)) => fallback(),
            Err(e) => {
                tracing::warn!(error = %e, "Context summary generation failed");
                fallback()
            }
        }
    }

    /// The most recent records, given history ordered newest first.
    fn medical_context<'a>(&self, medical_history: &'a [MedicalRecord]) -> &'a [MedicalRecord] {
        let keep = medical_history.len().min(self.config.medical_context_limit);
        &medical_history[..keep]
    }
}

/// The first member message containing the question's prefix, and the
/// specialist reply right after it.
fn find_previous_answer(messages: &[ChatMessage], question: &str) -> Option<String> {
    let needle = truncate_chars(question, MATCH_PREFIX_CHARS);
    if needle.is_empty() {
        return None;
    }

    let idx = messages
        .iter()
        .position(|msg| msg.is_from_user && msg.message.contains(needle))?;

    messages
        .get(idx + 1)
        .filter(|reply| !reply.is_from_user)
        .map(|reply| reply.message.clone())
}

fn fallback_session_summary(session_messages: &[ChatMessage]) -> SessionSummary {
    let mut specialists: Vec<String> = Vec::new();
    for name in session_messages
        .iter()
        .filter(|msg| !msg.is_from_user)
        .filter_map(|msg| msg.sender_name.as_deref())
        .filter(|name| !name.is_empty())
    {
        if !specialists.iter().any(|seen| seen == name) {
            specialists.push(name.to_string());
        }
    }

    SessionSummary {
        conversation_summary: format!("Session with {} messages", session_messages.len()),
        key_topics: vec!["General health consultation".to_string()],
        specialists_involved: specialists,
        action_items: Vec::new(),
        follow_up_needed: Vec::new(),
    }
}
