use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    ChatMessage, Conversation, MedicalRecord, NewChatMessage, NewMedicalRecord, NewUserProfile,
    ProfileUpdate, SessionContext, SessionSummary, UserProfile,
};

// ---------------------------------------------------------------------------
// Individual store traits
// ---------------------------------------------------------------------------

/// Interactive chat messages.
#[async_trait]
pub trait ChatStore: Send + Sync {
    /// Messages in chronological order. `limit` keeps the most recent ones.
    async fn chat_messages(&self, user_id: Option<&str>, limit: Option<usize>)
        -> Result<Vec<ChatMessage>>;
    async fn add_chat_message(&self, message: NewChatMessage) -> Result<ChatMessage>;
}

/// The read-only scripted member history.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    async fn conversations(&self) -> Result<Vec<Conversation>>;
    async fn search_conversations(&self, query: &str) -> Result<Vec<Conversation>>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>>;
    async fn create_profile(&self, profile: NewUserProfile) -> Result<UserProfile>;
    /// Fails with `NotFound` for unknown users.
    async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<UserProfile>;
}

#[async_trait]
pub trait MedicalStore: Send + Sync {
    /// Newest first; optionally restricted to one category.
    async fn medical_history(&self, user_id: &str, category: Option<&str>)
        -> Result<Vec<MedicalRecord>>;
    async fn add_medical_record(&self, record: NewMedicalRecord) -> Result<MedicalRecord>;
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Newest first; optionally restricted to one session.
    async fn session_contexts(&self, user_id: &str, session_id: Option<&str>)
        -> Result<Vec<SessionContext>>;
    async fn add_session_context(
        &self,
        user_id: &str,
        session_id: &str,
        summary: SessionSummary,
    ) -> Result<SessionContext>;
}

// ---------------------------------------------------------------------------
// Unified backend supertrait
// ---------------------------------------------------------------------------

/// A complete storage backend combining all store traits.
pub trait StorageBackend:
    ChatStore + ConversationStore + ProfileStore + MedicalStore + SessionStore
{
}

impl<T> StorageBackend for T where
    T: ChatStore + ConversationStore + ProfileStore + MedicalStore + SessionStore
{
}
