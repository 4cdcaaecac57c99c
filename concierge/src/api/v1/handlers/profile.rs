//! v1 profile handlers.

use axum::extract::{Path, State};
use validator::Validate;

use crate::api::v1::dto::{CreateProfileRequest, UpdateProfileRequest, UserProfileResponse};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;

/// `GET /api/v1/profile/{userId}`
#[utoipa::path(
    get,
    path = "/api/v1/profile/{userId}",
    tag = "profile",
    operation_id = "profile.get",
    params(("userId" = String, Path, description = "Member id")),
    responses(
        (status = 200, description = "Member profile", body = UserProfileResponse),
        (status = 404, description = "Unknown member", body = ApiError),
    )
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResponse<UserProfileResponse> {
    match state.storage.get_profile(&user_id).await {
        Ok(Some(profile)) => ApiResponse::success(profile.into()),
        Ok(None) => ApiResponse::error(ErrorCode::NotFound, "User profile not found"),
        Err(e) => e.into(),
    }
}

/// `POST /api/v1/profile`
#[utoipa::path(
    post,
    path = "/api/v1/profile",
    tag = "profile",
    operation_id = "profile.create",
    request_body = CreateProfileRequest,
    responses(
        (status = 201, description = "Profile created", body = UserProfileResponse),
        (status = 400, description = "Invalid profile", body = ApiError),
    )
)]
pub async fn create_profile(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<CreateProfileRequest>,
) -> ApiResponse<UserProfileResponse> {
    if let Err(e) = req.validate() {
        return ApiResponse::error(ErrorCode::InvalidRequest, e.to_string());
    }

    match state.storage.create_profile(req.into()).await {
        Ok(profile) => {
            tracing::info!(user_id = %profile.id, "Profile created");
            ApiResponse::created(profile.into())
        }
        Err(e) => e.into(),
    }
}

/// `PUT /api/v1/profile/{userId}`
#[utoipa::path(
    put,
    path = "/api/v1/profile/{userId}",
    tag = "profile",
    operation_id = "profile.update",
    params(("userId" = String, Path, description = "Member id")),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserProfileResponse),
        (status = 400, description = "Invalid update", body = ApiError),
        (status = 404, description = "Unknown member", body = ApiError),
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    axum::Json(req): axum::Json<UpdateProfileRequest>,
) -> ApiResponse<UserProfileResponse> {
    if let Err(e) = req.validate() {
        return ApiResponse::error(ErrorCode::InvalidRequest, e.to_string());
    }

    match state.storage.update_profile(&user_id, req.into()).await {
        Ok(profile) => ApiResponse::success(profile.into()),
        Err(e) => e.into(),
    }
}
