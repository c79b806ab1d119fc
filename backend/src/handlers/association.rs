//! Association management HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::auth::{require_write, AuthUser};
use crate::services::association::{
    AssociationService, CreateAssociationInput, UpdateAssociationInput,
};
use crate::AppState;

/// List all associations
pub async fn list_associations(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let service = AssociationService::new(state.db.clone());
    let associations = service.list_associations().await?;
    Ok(Json(serde_json::json!({ "associations": associations })))
}

/// Get a specific association
pub async fn get_association(
    State(state): State<AppState>,
    Path(association_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let service = AssociationService::new(state.db.clone());
    let association = service.get_association(association_id).await?;
    Ok(Json(association))
}

/// Create a new association
pub async fn create_association(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(input): Json<CreateAssociationInput>,
) -> AppResult<impl IntoResponse> {
    require_write(&user)?;
    let service = AssociationService::new(state.db.clone());
    let association = service.create_association(input).await?;
    Ok((StatusCode::CREATED, Json(association)))
}

/// Update an association
pub async fn update_association(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(association_id): Path<Uuid>,
    Json(input): Json<UpdateAssociationInput>,
) -> AppResult<impl IntoResponse> {
    require_write(&user)?;
    let service = AssociationService::new(state.db.clone());
    let association = service.update_association(association_id, input).await?;
    Ok(Json(association))
}

/// Delete an association
pub async fn delete_association(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(association_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    require_write(&user)?;
    let service = AssociationService::new(state.db.clone());
    service.delete_association(association_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
