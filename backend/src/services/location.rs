//! Administrative location service for municipalities and barangays

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Location service
#[derive(Clone)]
pub struct LocationService {
    db: PgPool,
}

/// Municipality row
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MunicipalityRow {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Barangay with municipality info
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct BarangayRow {
    pub id: Uuid,
    pub name: String,
    pub municipality_id: Uuid,
    pub municipality_name: String,
}

/// Input for creating a municipality
#[derive(Debug, Deserialize)]
pub struct CreateMunicipalityInput {
    pub name: String,
}

/// Input for creating a barangay
#[derive(Debug, Deserialize)]
pub struct CreateBarangayInput {
    pub name: String,
}

impl LocationService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all municipalities in name order
    pub async fn list_municipalities(&self) -> AppResult<Vec<MunicipalityRow>> {
        let municipalities = sqlx::query_as::<_, MunicipalityRow>(
            "SELECT id, name, created_at FROM municipalities ORDER BY name",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(municipalities)
    }

    /// Get a municipality by ID
    pub async fn get_municipality(&self, municipality_id: Uuid) -> AppResult<MunicipalityRow> {
        sqlx::query_as::<_, MunicipalityRow>(
            "SELECT id, name, created_at FROM municipalities WHERE id = $1",
        )
        .bind(municipality_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Municipality".to_string()))
    }

    /// Create a municipality
    pub async fn create_municipality(
        &self,
        input: CreateMunicipalityInput,
    ) -> AppResult<MunicipalityRow> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Municipality name is required".to_string(),
            });
        }

        let existing =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM municipalities WHERE name = $1")
                .bind(name)
                .fetch_one(&self.db)
                .await?;
        if existing > 0 {
            return Err(AppError::DuplicateEntry("municipality".to_string()));
        }

        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO municipalities (name) VALUES ($1) RETURNING id",
        )
        .bind(name)
        .fetch_one(&self.db)
        .await?;

        self.get_municipality(id).await
    }

    /// List barangays of a municipality in name order
    pub async fn list_barangays(&self, municipality_id: Uuid) -> AppResult<Vec<BarangayRow>> {
        let barangays = sqlx::query_as::<_, BarangayRow>(
            r#"
            SELECT b.id, b.name, b.municipality_id, m.name as municipality_name
            FROM barangays b
            JOIN municipalities m ON m.id = b.municipality_id
            WHERE b.municipality_id = $1
            ORDER BY b.name
            "#,
        )
        .bind(municipality_id)
        .fetch_all(&self.db)
        .await?;

        Ok(barangays)
    }

    /// Get a barangay by ID
    pub async fn get_barangay(&self, barangay_id: Uuid) -> AppResult<BarangayRow> {
        sqlx::query_as::<_, BarangayRow>(
            r#"
            SELECT b.id, b.name, b.municipality_id, m.name as municipality_name
            FROM barangays b
            JOIN municipalities m ON m.id = b.municipality_id
            WHERE b.id = $1
            "#,
        )
        .bind(barangay_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Barangay".to_string()))
    }

    /// Create a barangay under a municipality
    pub async fn create_barangay(
        &self,
        municipality_id: Uuid,
        input: CreateBarangayInput,
    ) -> AppResult<BarangayRow> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Barangay name is required".to_string(),
            });
        }

        // Validate municipality exists
        self.get_municipality(municipality_id).await?;

        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM barangays WHERE municipality_id = $1 AND name = $2",
        )
        .bind(municipality_id)
        .bind(name)
        .fetch_one(&self.db)
        .await?;
        if existing > 0 {
            return Err(AppError::DuplicateEntry("barangay".to_string()));
        }

        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO barangays (municipality_id, name) VALUES ($1, $2) RETURNING id",
        )
        .bind(municipality_id)
        .bind(name)
        .fetch_one(&self.db)
        .await?;

        self.get_barangay(id).await
    }
}
