//! Medical history DTOs for the v1 API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models;

const DEFAULT_SOURCE: &str = "manual_entry";

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecordResponse {
    pub id: String,
    pub user_id: String,
    pub category: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub source: String,
    #[schema(value_type = String)]
    pub recorded_date: DateTime<Utc>,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
}

impl From<models::MedicalRecord> for MedicalRecordResponse {
    fn from(record: models::MedicalRecord) -> Self {
        Self {
            id: record.id,
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
            created_at: record.created_at,
        }
    }
}

/// Request body for `POST /api/v1/medical-history`.
#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMedicalRecordRequest {
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,
    /// e.g. `lab_result`, `medication`, `allergy`.
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    pub value: Option<String>,
    pub unit: Option<String>,
    pub normal_range: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    /// Defaults to `manual_entry`.
    pub source: Option<String>,
    /// Defaults to now.
    #[schema(value_type = Option<String>)]
    pub recorded_date: Option<DateTime<Utc>>,
}

impl From<CreateMedicalRecordRequest> for models::NewMedicalRecord {
    fn from(req: CreateMedicalRecordRequest) -> Self {
        Self {
            user_id: req.user_id,
            category: req.category,
            title: req.title,
            value: req.value,
            unit: req.unit,
            normal_range: req.normal_range,
            status: req.status,
            notes: req.notes,
            source: req.source.unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
            recorded_date: req.recorded_date.unwrap_or_else(Utc::now),
        }
    }
}

/// Query parameters for `GET /api/v1/medical-history/{userId}`.
#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
pub struct MedicalHistoryQuery {
    pub category: Option<String>,
}
