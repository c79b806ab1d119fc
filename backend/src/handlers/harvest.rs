//! Harvest management HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::auth::{require_write, AuthUser};
use crate::services::harvest::{HarvestService, RecordHarvestInput, UpdateHarvestInput};
use crate::AppState;

/// List all harvests
pub async fn list_harvests(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let service = HarvestService::new(state.db.clone());
    let harvests = service.list_harvests().await?;
    Ok(Json(serde_json::json!({ "harvests": harvests })))
}

/// Get harvests for a specific planting
pub async fn get_harvests_by_planting(
    State(state): State<AppState>,
    Path(planting_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let service = HarvestService::new(state.db.clone());
    let harvests = service.get_harvests_by_planting(planting_id).await?;
    Ok(Json(serde_json::json!({ "harvests": harvests })))
}

/// Get a specific harvest
pub async fn get_harvest(
    State(state): State<AppState>,
    Path(harvest_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let service = HarvestService::new(state.db.clone());
    let harvest = service.get_harvest(harvest_id).await?;
    Ok(Json(harvest))
}

/// Record a new harvest
pub async fn record_harvest(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(input): Json<RecordHarvestInput>,
) -> AppResult<impl IntoResponse> {
    require_write(&user)?;
    let service = HarvestService::new(state.db.clone());
    let harvest = service.record_harvest(input).await?;
    Ok((StatusCode::CREATED, Json(harvest)))
}

/// Update a harvest
pub async fn update_harvest(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(harvest_id): Path<Uuid>,
    Json(input): Json<UpdateHarvestInput>,
) -> AppResult<impl IntoResponse> {
    require_write(&user)?;
    let service = HarvestService::new(state.db.clone());
    let harvest = service.update_harvest(harvest_id, input).await?;
    Ok(Json(harvest))
}

/// Delete a harvest
pub async fn delete_harvest(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(harvest_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    require_write(&user)?;
    let service = HarvestService::new(state.db.clone());
    service.delete_harvest(harvest_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
