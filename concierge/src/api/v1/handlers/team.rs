//! v1 team roster handlers.

use axum::extract::State;

use crate::api::v1::dto::{SpecialistResponse, TeamMemberResponse};
use crate::api::v1::response::{ApiResponse, ResponseMeta};
use crate::api::AppState;

/// `GET /api/v1/team-members`
#[utoipa::path(
    get,
    path = "/api/v1/team-members",
    tag = "team",
    operation_id = "team.members",
    responses(
        (status = 200, description = "Team roster in declaration order", body = Vec<TeamMemberResponse>),
    )
)]
pub async fn list_team_members(State(state): State<AppState>) -> ApiResponse<Vec<TeamMemberResponse>> {
    let members: Vec<TeamMemberResponse> = state
        .registry
        .team_members()
        .into_iter()
        .map(TeamMemberResponse::from)
        .collect();
    let meta = ResponseMeta::total(members.len());

    ApiResponse::success_with_meta(members, meta)
}

/// `GET /api/v1/specialists`
#[utoipa::path(
    get,
    path = "/api/v1/specialists",
    tag = "team",
    operation_id = "team.specialists",
    responses(
        (status = 200, description = "Specialists with routing keywords", body = Vec<SpecialistResponse>),
    )
)]
pub async fn list_specialists(State(state): State<AppState>) -> ApiResponse<Vec<SpecialistResponse>> {
    let specialists: Vec<SpecialistResponse> = state
        .registry
        .all()
        .iter()
        .map(SpecialistResponse::from)
        .collect();
    let meta = ResponseMeta::total(specialists.len());

    ApiResponse::success_with_meta(specialists, meta)
}
