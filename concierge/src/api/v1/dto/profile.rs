//! Member profile DTOs for the v1 API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models;

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    pub chronic_conditions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub lifestyle_habits: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String)]
    pub updated_at: DateTime<Utc>,
}

impl From<models::UserProfile> for UserProfileResponse {
    fn from(profile: models::UserProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            age: profile.age,
            gender: profile.gender,
            chronic_conditions: profile.chronic_conditions,
            travel_frequency: profile.travel_frequency,
            lifestyle_habits: profile.lifestyle_habits,
            emergency_contact: profile.emergency_contact,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

/// Request body for `POST /api/v1/profile`.
#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileRequest {
    /// Member id. Generated when absent.
    #[validate(length(min = 1, max = 128))]
    pub id: Option<String>,
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,
    #[validate(range(max = 150))]
    pub age: Option<u32>,
    pub gender: Option<String>,
    #[serde(default)]
    pub chronic_conditions: Vec<String>,
    pub travel_frequency: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub lifestyle_habits: Option<serde_json::Value>,
    pub emergency_contact: Option<String>,
}

impl From<CreateProfileRequest> for models::NewUserProfile {
    fn from(req: CreateProfileRequest) -> Self {
        Self {
            id: req.id,
            name: req.name.trim().to_string(),
            age: req.age,
            gender: req.gender,
            chronic_conditions: req.chronic_conditions,
            travel_frequency: req.travel_frequency,
            lifestyle_habits: req.lifestyle_habits,
            emergency_contact: req.emergency_contact,
        }
    }
}

/// Request body for `PUT /api/v1/profile/{userId}`. Absent fields are kept.
#[derive(Debug, Clone, Default, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(range(max = 150))]
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub chronic_conditions: Option<Vec<String>>,
    pub travel_frequency: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub lifestyle_habits: Option<serde_json::Value>,
    pub emergency_contact: Option<String>,
}

impl From<UpdateProfileRequest> for models::ProfileUpdate {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            name: req.name,
            age: req.age,
            gender: req.gender,
            chronic_conditions: req.chronic_conditions,
            travel_frequency: req.travel_frequency,
            lifestyle_habits: req.lifestyle_habits,
            emergency_contact: req.emergency_contact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_requires_name() {
        let req: CreateProfileRequest =
            serde_json::from_value(serde_json::json!({ "name": "" })).unwrap();
        assert!(req.validate().is_err());

        let req: CreateProfileRequest = serde_json::from_value(serde_json::json!({
            "name": "Mei Lin",
            "age": 38,
            "chronicConditions": ["Asthma"]
        }))
        .unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.chronic_conditions, vec!["Asthma"]);
    }

    #[test]
    fn create_request_rejects_implausible_age() {
        let req: CreateProfileRequest =
            serde_json::from_value(serde_json::json!({ "name": "Mei Lin", "age": 400 })).unwrap();
        assert!(req.validate().is_err());
    }
}
