use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub chronic_conditions: Vec<String>,
    pub travel_frequency: Option<String>,
    /// Free-form habits map (exercise, diet, sleep, ...).
    pub lifestyle_habits: Option<serde_json::Value>,
    pub emergency_contact: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert shape for a profile. A missing id gets a generated one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewUserProfile {
    pub id: Option<String>,
    pub name: String,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub chronic_conditions: Vec<String>,
    pub travel_frequency: Option<String>,
    pub lifestyle_habits: Option<serde_json::Value>,
    pub emergency_contact: Option<String>,
}

/// Partial update applied by `ProfileStore::update_profile`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub chronic_conditions: Option<Vec<String>>,
    pub travel_frequency: Option<String>,
    pub lifestyle_habits: Option<serde_json::Value>,
    pub emergency_contact: Option<String>,
}

impl UserProfile {
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(age) = update.age {
            self.age = Some(age);
        }
        if let Some(gender) = update.gender {
            self.gender = Some(gender);
        }
        if let Some(conditions) = update.chronic_conditions {
            self.chronic_conditions = conditions;
        }
        if let Some(travel) = update.travel_frequency {
            self.travel_frequency = Some(travel);
        }
        if let Some(habits) = update.lifestyle_habits {
            self.lifestyle_habits = Some(habits);
        }
        if let Some(contact) = update.emergency_contact {
            self.emergency_contact = Some(contact);
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub id: String,
    pub user_id: String,
    /// e.g. `lab_result`, `medication`, `diagnosis`.
    pub category: String,
    pub title: String,
    pub value: Option<String>,
    pub unit: Option<String>,
    pub normal_range: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub source: String,
    pub recorded_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMedicalRecord {
    pub user_id: String,
    pub category: String,
    pub title: String,
    pub value: Option<String>,
    pub unit: Option<String>,
    pub normal_range: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub source: String,
    pub recorded_date: DateTime<Utc>,
}
