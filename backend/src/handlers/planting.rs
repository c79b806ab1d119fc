//! Crop planting HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::auth::{require_write, AuthUser};
use crate::services::planting::{
    PlantingFilter, PlantingService, RecordPlantingInput, UpdatePlantingInput,
};
use crate::AppState;
use crate::models::{GrowthStage, PlantingStatus};
use shared::types::Pagination;

#[derive(Debug, Deserialize)]
pub struct PlantingListQuery {
    pub municipality_id: Option<Uuid>,
    pub barangay_id: Option<Uuid>,
    pub farmer_id: Option<Uuid>,
    pub commodity: Option<String>,
    pub status: Option<PlantingStatus>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStageInput {
    pub growth_stage: GrowthStage,
}

/// List plantings with filters and pagination
pub async fn list_plantings(
    State(state): State<AppState>,
    Query(query): Query<PlantingListQuery>,
) -> AppResult<impl IntoResponse> {
    let service = PlantingService::new(state.db.clone());

    let filter = PlantingFilter {
        municipality_id: query.municipality_id,
        barangay_id: query.barangay_id,
        farmer_id: query.farmer_id,
        commodity: query.commodity,
        status: query.status,
    };
    let pagination = Pagination {
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    };

    let plantings = service.list_plantings(&filter, &pagination).await?;
    Ok(Json(plantings))
}

/// Get a specific planting
pub async fn get_planting(
    State(state): State<AppState>,
    Path(planting_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let service = PlantingService::new(state.db.clone());
    let planting = service.get_planting(planting_id).await?;
    Ok(Json(planting))
}

/// Record a new planting
pub async fn record_planting(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(input): Json<RecordPlantingInput>,
) -> AppResult<impl IntoResponse> {
    require_write(&user)?;
    let service = PlantingService::new(state.db.clone());
    let planting = service.record_planting(input).await?;
    Ok((StatusCode::CREATED, Json(planting)))
}

/// Update a planting
pub async fn update_planting(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(planting_id): Path<Uuid>,
    Json(input): Json<UpdatePlantingInput>,
) -> AppResult<impl IntoResponse> {
    require_write(&user)?;
    let service = PlantingService::new(state.db.clone());
    let planting = service.update_planting(planting_id, input).await?;
    Ok(Json(planting))
}

/// Advance the growth stage of a standing planting
pub async fn update_growth_stage(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(planting_id): Path<Uuid>,
    Json(input): Json<UpdateStageInput>,
) -> AppResult<impl IntoResponse> {
    require_write(&user)?;
    let service = PlantingService::new(state.db.clone());
    let planting = service
        .update_growth_stage(planting_id, input.growth_stage)
        .await?;
    Ok(Json(planting))
}

/// Delete a planting
pub async fn delete_planting(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(planting_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    require_write(&user)?;
    let service = PlantingService::new(state.db.clone());
    service.delete_planting(planting_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
