//! Field inspection service
//!
//! An inspection records what the technician observed in the field; the
//! observed growth stage is written back to the planting in the same
//! transaction so standing-crop reports reflect the latest visit.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{GrowthStage, PlantingStatus};

/// Inspection service
#[derive(Clone)]
pub struct InspectionService {
    db: PgPool,
}

/// Inspection with joined planting info
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct InspectionRow {
    pub id: Uuid,
    pub planting_id: Uuid,
    pub farmer_name: String,
    pub barangay_name: String,
    pub commodity: String,
    pub inspector_name: String,
    pub inspection_date: NaiveDate,
    pub observed_stage: String,
    pub findings: Option<String>,
    pub recommendations: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for recording an inspection
#[derive(Debug, Deserialize)]
pub struct RecordInspectionInput {
    pub planting_id: Uuid,
    pub inspector_name: String,
    pub inspection_date: NaiveDate,
    pub observed_stage: GrowthStage,
    pub findings: Option<String>,
    pub recommendations: Option<String>,
}

const INSPECTION_SELECT: &str = r#"
    SELECT i.id, i.planting_id,
           CONCAT(f.first_name, ' ', f.last_name) as farmer_name,
           b.name as barangay_name, p.commodity,
           i.inspector_name, i.inspection_date, i.observed_stage,
           i.findings, i.recommendations, i.created_at
    FROM inspections i
    JOIN plantings p ON p.id = i.planting_id
    JOIN farmers f ON f.id = p.farmer_id
    JOIN barangays b ON b.id = p.barangay_id
"#;

impl InspectionService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List inspections for a planting, most recent first
    pub async fn get_inspections_by_planting(
        &self,
        planting_id: Uuid,
    ) -> AppResult<Vec<InspectionRow>> {
        let query = format!(
            "{} WHERE i.planting_id = $1 ORDER BY i.inspection_date DESC",
            INSPECTION_SELECT
        );
        let inspections = sqlx::query_as::<_, InspectionRow>(&query)
            .bind(planting_id)
            .fetch_all(&self.db)
            .await?;

        Ok(inspections)
    }

    /// Get an inspection by ID
    pub async fn get_inspection(&self, inspection_id: Uuid) -> AppResult<InspectionRow> {
        let query = format!("{} WHERE i.id = $1", INSPECTION_SELECT);

        sqlx::query_as::<_, InspectionRow>(&query)
            .bind(inspection_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Inspection".to_string()))
    }

    /// Record an inspection and sync the planting's growth stage
    pub async fn record_inspection(
        &self,
        input: RecordInspectionInput,
    ) -> AppResult<InspectionRow> {
        if input.inspector_name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "inspector_name".to_string(),
                message: "Inspector name is required".to_string(),
            });
        }

        let status = sqlx::query_scalar::<_, String>(
            "SELECT status FROM plantings WHERE id = $1",
        )
        .bind(input.planting_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Planting".to_string()))?;

        // Start transaction
        let mut tx = self.db.begin().await?;

        let inspection_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO inspections (planting_id, inspector_name, inspection_date,
                                     observed_stage, findings, recommendations)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(input.planting_id)
        .bind(input.inspector_name.trim())
        .bind(input.inspection_date)
        .bind(input.observed_stage.as_str())
        .bind(&input.findings)
        .bind(&input.recommendations)
        .fetch_one(&mut *tx)
        .await?;

        // Only standing crops advance with the observation
        if status == PlantingStatus::Standing.as_str() {
            sqlx::query(
                "UPDATE plantings SET growth_stage = $1, updated_at = NOW() WHERE id = $2",
            )
            .bind(input.observed_stage.as_str())
            .bind(input.planting_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.get_inspection(inspection_id).await
    }

    /// Delete an inspection
    pub async fn delete_inspection(&self, inspection_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM inspections WHERE id = $1")
            .bind(inspection_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Inspection".to_string()));
        }

        Ok(())
    }
}
