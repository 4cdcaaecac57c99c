//! v1 medical history handlers.

use axum::extract::{Path, Query, State};
use validator::Validate;

use crate::api::v1::dto::{CreateMedicalRecordRequest, MedicalHistoryQuery, MedicalRecordResponse};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode, ResponseMeta};
use crate::api::AppState;

/// `GET /api/v1/medical-history/{userId}`
#[utoipa::path(
    get,
    path = "/api/v1/medical-history/{userId}",
    tag = "medical",
    operation_id = "medical.list",
    params(
        ("userId" = String, Path, description = "Member id"),
        MedicalHistoryQuery,
    ),
    responses(
        (status = 200, description = "Records, newest first", body = Vec<MedicalRecordResponse>),
    )
)]
pub async fn get_medical_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<MedicalHistoryQuery>,
) -> ApiResponse<Vec<MedicalRecordResponse>> {
    match state
        .storage
        .medical_history(&user_id, query.category.as_deref())
        .await
    {
        Ok(records) => {
            let items: Vec<MedicalRecordResponse> = records.into_iter().map(Into::into).collect();
            let meta = ResponseMeta::total(items.len());
            ApiResponse::success_with_meta(items, meta)
        }
        Err(e) => e.into(),
    }
}

/// `POST /api/v1/medical-history`
#[utoipa::path(
    post,
    path = "/api/v1/medical-history",
    tag = "medical",
    operation_id = "medical.create",
    request_body = CreateMedicalRecordRequest,
    responses(
        (status = 201, description = "Record stored", body = MedicalRecordResponse),
        (status = 400, description = "Invalid record", body = ApiError),
    )
)]
pub async fn add_medical_record(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<CreateMedicalRecordRequest>,
) -> ApiResponse<MedicalRecordResponse> {
    if let Err(e) = req.validate() {
        return ApiResponse::error(ErrorCode::InvalidRequest, e.to_string());
    }

    match state.storage.add_medical_record(req.into()).await {
        Ok(record) => ApiResponse::created(record.into()),
        Err(e) => e.into(),
    }
}
