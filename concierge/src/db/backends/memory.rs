use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::seed;
use crate::db::traits::{ChatStore, ConversationStore, MedicalStore, ProfileStore, SessionStore};
use crate::error::{ConciergeError, Result};
use crate::models::{
    ChatMessage, Conversation, MedicalRecord, NewChatMessage, NewMedicalRecord, NewUserProfile,
    ProfileUpdate, SessionContext, SessionSummary, UserProfile,
};

/// Process-local storage. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryStorage {
    conversations: Vec<Conversation>,
    chat_messages: RwLock<Vec<ChatMessage>>,
    profiles: RwLock<HashMap<String, UserProfile>>,
    medical_records: RwLock<Vec<MedicalRecord>>,
    session_contexts: RwLock<Vec<SessionContext>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage preloaded with the scripted history and the demo member.
    pub fn seeded() -> Self {
        let profile = seed::demo_profile();
        let medical_records = seed::demo_medical_records(&profile.id);

        Self {
            conversations: seed::scripted_conversations(),
            chat_messages: RwLock::new(Vec::new()),
            profiles: RwLock::new(HashMap::from([(profile.id.clone(), profile)])),
            medical_records: RwLock::new(medical_records),
            session_contexts: RwLock::new(Vec::new()),
        }
    }

    pub fn with_conversations(mut self, conversations: Vec<Conversation>) -> Self {
        self.conversations = conversations;
        self
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[async_trait]
impl ChatStore for InMemoryStorage {
    async fn chat_messages(
        &self,
        user_id: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<ChatMessage>> {
        let mut messages: Vec<ChatMessage> = self
            .chat_messages
            .read()
            .await
            .iter()
            .filter(|msg| user_id.map_or(true, |id| msg.user_id == id))
            .cloned()
            .collect();

        messages.sort_by_key(ChatMessage::chronological_key);

        if let Some(limit) = limit {
            let skip = messages.len().saturating_sub(limit);
            messages.drain(..skip);
        }

        Ok(messages)
    }

    async fn add_chat_message(&self, message: NewChatMessage) -> Result<ChatMessage> {
        let stored = ChatMessage {
            id: new_id(),
            user_id: message.user_id,
            is_from_user: message.is_from_user,
            sender_id: message.sender_id,
            sender_name: message.sender_name,
            sender_role: message.sender_role,
            sender_color: message.sender_color,
            message: message.message,
            timestamp: message.timestamp,
            date: message.date,
            attachments: message.attachments,
        };

        self.chat_messages.write().await.push(stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl ConversationStore for InMemoryStorage {
    async fn conversations(&self) -> Result<Vec<Conversation>> {
        let mut conversations = self.conversations.clone();
        conversations.sort_by_key(Conversation::chronological_key);
        Ok(conversations)
    }

    async fn search_conversations(&self, query: &str) -> Result<Vec<Conversation>> {
        Ok(self
            .conversations()
            .await?
            .into_iter()
            .filter(|entry| entry.matches(query))
            .collect())
    }
}

#[async_trait]
impl ProfileStore for InMemoryStorage {
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn create_profile(&self, profile: NewUserProfile) -> Result<UserProfile> {
        let id = profile.id.unwrap_or_else(new_id);
        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(&id) {
            return Err(ConciergeError::Validation(format!(
                "Profile already exists: {id}"
            )));
        }

        let now = Utc::now();
        let stored = UserProfile {
            id: id.clone(),
            name: profile.name,
            age: profile.age,
            gender: profile.gender,
            chronic_conditions: profile.chronic_conditions,
            travel_frequency: profile.travel_frequency,
            lifestyle_habits: profile.lifestyle_habits,
            emergency_contact: profile.emergency_contact,
            created_at: now,
            updated_at: now,
        };
        profiles.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<UserProfile> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .get_mut(user_id)
            .ok_or_else(|| ConciergeError::NotFound(format!("User profile {user_id}")))?;

        profile.apply(update);
        Ok(profile.clone())
    }
}

#[async_trait]
impl MedicalStore for InMemoryStorage {
    async fn medical_history(
        &self,
        user_id: &str,
        category: Option<&str>,
    ) -> Result<Vec<MedicalRecord>> {
        let mut records: Vec<MedicalRecord> = self
            .medical_records
            .read()
            .await
            .iter()
            .filter(|record| record.user_id == user_id)
            .filter(|record| category.map_or(true, |c| record.category == c))
            .cloned()
            .collect();

        records.sort_by(|a, b| b.recorded_date.cmp(&a.recorded_date));
        Ok(records)
    }

    async fn add_medical_record(&self, record: NewMedicalRecord) -> Result<MedicalRecord> {
        let stored = MedicalRecord {
            id: new_id(),
            user_id: record.user_id,
            category: record.category,
            title: record.title,
            value: record.value,
            unit: record.unit,
            normal_range: record.normal_range,
            status: record.status,
            notes: record.notes,
            source: record.source,
            recorded_date: record.recorded_date,
            created_at: Utc::now(),
        };

        self.medical_records.write().await.push(stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl SessionStore for InMemoryStorage {
    async fn session_contexts(
        &self,
        user_id: &str,
        session_id: Option<&str>,
    ) -> Result<Vec<SessionContext>> {
        let mut contexts: Vec<SessionContext> = self
            .session_contexts
            .read()
            .await
            .iter()
            .filter(|ctx| ctx.user_id == user_id)
            .filter(|ctx| session_id.map_or(true, |id| ctx.session_id == id))
            .cloned()
            .collect();

        contexts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(contexts)
    }

    async fn add_session_context(
        &self,
        user_id: &str,
        session_id: &str,
        summary: SessionSummary,
    ) -> Result<SessionContext> {
        let now = Utc::now();
        let stored = SessionContext {
            id: new_id(),
            user_id: user_id.to_string(),
            session_id: session_id.to_string(),
            summary,
            created_at: now,
            updated_at: now,
        };

        self.session_contexts.write().await.push(stored.clone());
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SpecialistId;

    fn new_message(user_id: &str, text: &str, date: &str, time: &str) -> NewChatMessage {
        NewChatMessage {
            user_id: user_id.to_string(),
            is_from_user: true,
            sender_id: None,
            sender_name: Some("You".to_string()),
            sender_role: None,
            sender_color: Some("user".to_string()),
            message: text.to_string(),
            timestamp: time.to_string(),
            date: date.to_string(),
            attachments: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_chat_messages_sorted_filtered_and_limited() {
        let storage = InMemoryStorage::new();
        storage
            .add_chat_message(new_message("u1", "third", "03/02/24", "9:00 AM"))
            .await
            .unwrap();
        storage
            .add_chat_message(new_message("u1", "first", "03/01/24", "11:00 AM"))
            .await
            .unwrap();
        storage
            .add_chat_message(new_message("u1", "second", "03/01/24", "2:30 PM"))
            .await
            .unwrap();
        storage
            .add_chat_message(new_message("u2", "other", "03/01/24", "1:00 PM"))
            .await
            .unwrap();

        let all = storage.chat_messages(Some("u1"), None).await.unwrap();
        let texts: Vec<&str> = all.iter().map(|m| m.message.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);

        let last_two = storage.chat_messages(Some("u1"), Some(2)).await.unwrap();
        assert_eq!(last_two[0].message, "second");
        assert_eq!(last_two.len(), 2);

        assert_eq!(storage.chat_messages(None, None).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_search_conversations_is_case_insensitive() {
        let storage = InMemoryStorage::seeded();

        let hits = storage.search_conversations("SALMON").await.unwrap();
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|c| c.message.to_lowercase().contains("salmon")));

        let by_role = storage.search_conversations("physiotherapist").await.unwrap();
        assert!(by_role.iter().all(|c| c.sender_id == Some(SpecialistId::Rachel)));
    }

    #[tokio::test]
    async fn test_conversations_are_chronological() {
        let storage = InMemoryStorage::seeded();
        let conversations = storage.conversations().await.unwrap();

        let keys: Vec<_> = conversations.iter().map(|c| c.chronological_key()).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[tokio::test]
    async fn test_update_missing_profile_is_not_found() {
        let storage = InMemoryStorage::new();
        let err = storage
            .update_profile("ghost", ProfileUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ConciergeError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_profile_uses_given_id_and_rejects_duplicates() {
        let storage = InMemoryStorage::new();
        let new_profile = NewUserProfile {
            id: Some("member-7".to_string()),
            name: "Mei Lin".to_string(),
            ..Default::default()
        };

        let created = storage.create_profile(new_profile.clone()).await.unwrap();
        assert_eq!(created.id, "member-7");
        assert!(storage.get_profile("member-7").await.unwrap().is_some());
        assert!(storage.create_profile(new_profile).await.is_err());
    }

    #[tokio::test]
    async fn test_medical_history_newest_first_and_category_filter() {
        let storage = InMemoryStorage::seeded();
        let records = storage.medical_history("default-user", None).await.unwrap();
        assert!(records
            .windows(2)
            .all(|pair| pair[0].recorded_date >= pair[1].recorded_date));

        let meds = storage
            .medical_history("default-user", Some("medication"))
            .await
            .unwrap();
        assert!(!meds.is_empty());
        assert!(meds.iter().all(|r| r.category == "medication"));
    }

    #[tokio::test]
    async fn test_session_contexts_filter_by_session() {
        let storage = InMemoryStorage::new();
        storage
            .add_session_context("u1", "s1", SessionSummary::default())
            .await
            .unwrap();
        storage
            .add_session_context("u1", "s2", SessionSummary::default())
            .await
            .unwrap();

        assert_eq!(storage.session_contexts("u1", None).await.unwrap().len(), 2);
        let s1 = storage.session_contexts("u1", Some("s1")).await.unwrap();
        assert_eq!(s1.len(), 1);
        assert_eq!(s1[0].session_id, "s1");
        assert!(storage.session_contexts("u2", None).await.unwrap().is_empty());
    }
}
