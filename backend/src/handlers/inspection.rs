//! Field inspection HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::auth::{require_write, AuthUser};
use crate::services::inspection::{InspectionService, RecordInspectionInput};
use crate::AppState;

/// Get inspections for a specific planting
pub async fn get_inspections_by_planting(
    State(state): State<AppState>,
    Path(planting_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let service = InspectionService::new(state.db.clone());
    let inspections = service.get_inspections_by_planting(planting_id).await?;
    Ok(Json(serde_json::json!({ "inspections": inspections })))
}

/// Get a specific inspection
pub async fn get_inspection(
    State(state): State<AppState>,
    Path(inspection_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let service = InspectionService::new(state.db.clone());
    let inspection = service.get_inspection(inspection_id).await?;
    Ok(Json(inspection))
}

/// Record a new inspection
pub async fn record_inspection(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(input): Json<RecordInspectionInput>,
) -> AppResult<impl IntoResponse> {
    require_write(&user)?;
    let service = InspectionService::new(state.db.clone());
    let inspection = service.record_inspection(input).await?;
    Ok((StatusCode::CREATED, Json(inspection)))
}

/// Delete an inspection
pub async fn delete_inspection(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(inspection_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    require_write(&user)?;
    let service = InspectionService::new(state.db.clone());
    service.delete_inspection(inspection_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
