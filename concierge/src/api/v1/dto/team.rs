//! Team roster DTOs for the v1 API.

use serde::Serialize;

use crate::models;

/// A team member as shown in the roster.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberResponse {
    pub id: String,
    pub name: String,
    pub role: String,
    pub color: String,
    /// Single-letter avatar.
    pub avatar: String,
}

impl From<models::TeamMember> for TeamMemberResponse {
    fn from(member: models::TeamMember) -> Self {
        Self {
            id: member.id.to_string(),
            name: member.name,
            role: member.role,
            color: member.color,
            avatar: member.avatar,
        }
    }
}

/// A specialist persona with its routing keywords.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpecialistResponse {
    pub id: String,
    pub name: String,
    pub role: String,
    pub color: String,
    pub specialties: Vec<String>,
    pub can_provide_advice: bool,
}

impl From<&models::Specialist> for SpecialistResponse {
    fn from(specialist: &models::Specialist) -> Self {
        Self {
            id: specialist.id.to_string(),
            name: specialist.name.clone(),
            role: specialist.role.clone(),
            color: specialist.color.clone(),
            specialties: specialist.specialties.clone(),
            can_provide_advice: specialist.can_provide_advice,
        }
    }
}

impl From<models::Specialist> for SpecialistResponse {
    fn from(specialist: models::Specialist) -> Self {
        Self::from(&specialist)
    }
}
