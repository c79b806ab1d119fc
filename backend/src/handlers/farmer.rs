//! Farmer registry HTTP handlers

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
use crate::services::farmer::{
    CreateFarmerInput, FarmerFilter, FarmerService, UpdateFarmerInput,
};
use crate::AppState;
use shared::types::Pagination;

#[derive(Debug, Deserialize)]
pub struct FarmerListQuery {
    pub search: Option<String>,
    pub barangay_id: Option<Uuid>,
    pub association_id: Option<Uuid>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// List farmers with search and pagination
pub async fn list_farmers(
    State(state): State<AppState>,
    Query(query): Query<FarmerListQuery>,
) -> AppResult<impl IntoResponse> {
    let service = FarmerService::new(state.db.clone());

    let filter = FarmerFilter {
        search: query.search,
        barangay_id: query.barangay_id,
        association_id: query.association_id,
    };
    let pagination = Pagination {
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    };

    let farmers = service.list_farmers(&filter, &pagination).await?;
    Ok(Json(farmers))
}

/// Get a specific farmer
pub async fn get_farmer(
    State(state): State<AppState>,
    Path(farmer_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let service = FarmerService::new(state.db.clone());
    let farmer = service.get_farmer(farmer_id).await?;
    Ok(Json(farmer))
}

/// Register a new farmer
pub async fn create_farmer(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(input): Json<CreateFarmerInput>,
) -> AppResult<impl IntoResponse> {
    require_write(&user)?;
    let service = FarmerService::new(state.db.clone());
    let farmer = service.create_farmer(input).await?;
    Ok((StatusCode::CREATED, Json(farmer)))
}

/// Update a farmer
pub async fn update_farmer(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(farmer_id): Path<Uuid>,
    Json(input): Json<UpdateFarmerInput>,
) -> AppResult<impl IntoResponse> {
    require_write(&user)?;
    let service = FarmerService::new(state.db.clone());
    let farmer = service.update_farmer(farmer_id, input).await?;
    Ok(Json(farmer))
}

/// Delete a farmer
pub async fn delete_farmer(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(farmer_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    require_write(&user)?;
    let service = FarmerService::new(state.db.clone());
    service.delete_farmer(farmer_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
