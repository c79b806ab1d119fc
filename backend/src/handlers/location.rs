//! Location management HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::auth::{require_write, AuthUser};
use crate::services::location::{CreateBarangayInput, CreateMunicipalityInput, LocationService};
use crate::AppState;

/// List all municipalities
pub async fn list_municipalities(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let service = LocationService::new(state.db.clone());
    let municipalities = service.list_municipalities().await?;
    Ok(Json(
        serde_json::json!({ "municipalities": municipalities }),
    ))
}

/// Create a municipality
pub async fn create_municipality(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(input): Json<CreateMunicipalityInput>,
) -> AppResult<impl IntoResponse> {
    require_write(&user)?;
    let service = LocationService::new(state.db.clone());
    let municipality = service.create_municipality(input).await?;
    Ok((StatusCode::CREATED, Json(municipality)))
}

/// List barangays of a municipality
pub async fn list_barangays(
    State(state): State<AppState>,
    Path(municipality_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let service = LocationService::new(state.db.clone());
    let barangays = service.list_barangays(municipality_id).await?;
    Ok(Json(serde_json::json!({ "barangays": barangays })))
}

/// Create a barangay under a municipality
pub async fn create_barangay(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(municipality_id): Path<Uuid>,
    Json(input): Json<CreateBarangayInput>,
) -> AppResult<impl IntoResponse> {
    require_write(&user)?;
    let service = LocationService::new(state.db.clone());
    let barangay = service.create_barangay(municipality_id, input).await?;
    Ok((StatusCode::CREATED, Json(barangay)))
}
