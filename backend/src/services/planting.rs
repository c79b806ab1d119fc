//! Crop planting service for recording and tracking plantings

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{GrowthStage, PlantingStatus};
use shared::types::{PaginatedResponse, Pagination, PaginationMeta};
use shared::validation::validate_area_hectares;

/// Planting service
#[derive(Clone)]
pub struct PlantingService {
    db: PgPool,
}

/// Planting with joined farmer and location info
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PlantingRow {
    pub id: Uuid,
    pub farmer_id: Uuid,
    pub farmer_name: String,
    pub rsbsa_number: String,
    pub barangay_id: Uuid,
    pub barangay_name: String,
    pub municipality_name: String,
    pub commodity: String,
    pub classification: String,
    pub area_planted_ha: Decimal,
    pub date_planted: NaiveDate,
    pub growth_stage: String,
    pub status: String,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for recording a planting
#[derive(Debug, Deserialize)]
pub struct RecordPlantingInput {
    pub farmer_id: Uuid,
    pub commodity: String,
    pub classification: String,
    pub area_planted_ha: Decimal,
    pub date_planted: NaiveDate,
    /// Defaults to seedling when omitted
    pub growth_stage: Option<GrowthStage>,
    pub remarks: Option<String>,
}

/// Input for updating a planting
#[derive(Debug, Deserialize)]
pub struct UpdatePlantingInput {
    pub commodity: Option<String>,
    pub classification: Option<String>,
    pub area_planted_ha: Option<Decimal>,
    pub date_planted: Option<NaiveDate>,
    pub growth_stage: Option<GrowthStage>,
    pub remarks: Option<String>,
}

/// Filter parameters for planting listings
#[derive(Debug, Default, Deserialize)]
pub struct PlantingFilter {
    pub municipality_id: Option<Uuid>,
    pub barangay_id: Option<Uuid>,
    pub farmer_id: Option<Uuid>,
    pub commodity: Option<String>,
    pub status: Option<PlantingStatus>,
}

const PLANTING_SELECT: &str = r#"
    SELECT p.id, p.farmer_id, CONCAT(f.first_name, ' ', f.last_name) as farmer_name,
           f.rsbsa_number, p.barangay_id, b.name as barangay_name,
           m.name as municipality_name, p.commodity, p.classification,
           p.area_planted_ha, p.date_planted, p.growth_stage, p.status, p.remarks,
           p.created_at, p.updated_at
    FROM plantings p
    JOIN farmers f ON f.id = p.farmer_id
    JOIN barangays b ON b.id = p.barangay_id
    JOIN municipalities m ON m.id = b.municipality_id
"#;

impl PlantingService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List plantings, filtered and paginated
    pub async fn list_plantings(
        &self,
        filter: &PlantingFilter,
        pagination: &Pagination,
    ) -> AppResult<PaginatedResponse<PlantingRow>> {
        let status = filter.status.map(|s| s.as_str().to_string());

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM plantings p
            JOIN barangays b ON b.id = p.barangay_id
            WHERE ($1::uuid IS NULL OR b.municipality_id = $1)
              AND ($2::uuid IS NULL OR p.barangay_id = $2)
              AND ($3::uuid IS NULL OR p.farmer_id = $3)
              AND ($4::text IS NULL OR p.commodity = $4)
              AND ($5::text IS NULL OR p.status = $5)
            "#,
        )
        .bind(filter.municipality_id)
        .bind(filter.barangay_id)
        .bind(filter.farmer_id)
        .bind(&filter.commodity)
        .bind(&status)
        .fetch_one(&self.db)
        .await?;

        let query = format!(
            r#"{}
            WHERE ($1::uuid IS NULL OR b.municipality_id = $1)
              AND ($2::uuid IS NULL OR p.barangay_id = $2)
              AND ($3::uuid IS NULL OR p.farmer_id = $3)
              AND ($4::text IS NULL OR p.commodity = $4)
              AND ($5::text IS NULL OR p.status = $5)
            ORDER BY p.date_planted DESC
            LIMIT $6 OFFSET $7
            "#,
            PLANTING_SELECT
        );

        let plantings = sqlx::query_as::<_, PlantingRow>(&query)
            .bind(filter.municipality_id)
            .bind(filter.barangay_id)
            .bind(filter.farmer_id)
            .bind(&filter.commodity)
            .bind(&status)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.db)
            .await?;

        Ok(PaginatedResponse {
            data: plantings,
            pagination: PaginationMeta::new(pagination, total),
        })
    }

    /// Get a planting by ID
    pub async fn get_planting(&self, planting_id: Uuid) -> AppResult<PlantingRow> {
        let query = format!("{} WHERE p.id = $1", PLANTING_SELECT);

        sqlx::query_as::<_, PlantingRow>(&query)
            .bind(planting_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Planting".to_string()))
    }

    /// Record a new planting. The planting is attached to the farmer's
    /// barangay so reports always group by the normalized location.
    pub async fn record_planting(&self, input: RecordPlantingInput) -> AppResult<PlantingRow> {
        Self::validate_input(&input.commodity, &input.classification, input.area_planted_ha)?;

        // The planting inherits the farmer's barangay
        let barangay_id =
            sqlx::query_scalar::<_, Uuid>("SELECT barangay_id FROM farmers WHERE id = $1")
                .bind(input.farmer_id)
                .fetch_optional(&self.db)
                .await?
                .ok_or_else(|| AppError::NotFound("Farmer".to_string()))?;

        let growth_stage = input.growth_stage.unwrap_or(GrowthStage::Seedling);

        let planting_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO plantings (farmer_id, barangay_id, commodity, classification,
                                   area_planted_ha, date_planted, growth_stage, remarks)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(input.farmer_id)
        .bind(barangay_id)
        .bind(input.commodity.trim().to_lowercase())
        .bind(input.classification.trim())
        .bind(input.area_planted_ha)
        .bind(input.date_planted)
        .bind(growth_stage.as_str())
        .bind(&input.remarks)
        .fetch_one(&self.db)
        .await?;

        self.get_planting(planting_id).await
    }

    /// Update a planting
    pub async fn update_planting(
        &self,
        planting_id: Uuid,
        input: UpdatePlantingInput,
    ) -> AppResult<PlantingRow> {
        let existing = self.get_planting(planting_id).await?;

        let commodity = input.commodity.unwrap_or(existing.commodity);
        let classification = input.classification.unwrap_or(existing.classification);
        let area_planted_ha = input.area_planted_ha.unwrap_or(existing.area_planted_ha);
        let date_planted = input.date_planted.unwrap_or(existing.date_planted);
        let growth_stage = input
            .growth_stage
            .map(|s| s.as_str().to_string())
            .unwrap_or(existing.growth_stage);
        let remarks = input.remarks.or(existing.remarks);

        Self::validate_input(&commodity, &classification, area_planted_ha)?;

        sqlx::query(
            r#"
            UPDATE plantings
            SET commodity = $1, classification = $2, area_planted_ha = $3,
                date_planted = $4, growth_stage = $5, remarks = $6, updated_at = NOW()
            WHERE id = $7
            "#,
        )
        .bind(commodity.trim().to_lowercase())
        .bind(classification.trim())
        .bind(area_planted_ha)
        .bind(date_planted)
        .bind(&growth_stage)
        .bind(&remarks)
        .bind(planting_id)
        .execute(&self.db)
        .await?;

        self.get_planting(planting_id).await
    }

    /// Advance the growth stage of a standing planting
    pub async fn update_growth_stage(
        &self,
        planting_id: Uuid,
        stage: GrowthStage,
    ) -> AppResult<PlantingRow> {
        let existing = self.get_planting(planting_id).await?;

        if existing.status != PlantingStatus::Standing.as_str() {
            return Err(AppError::InvalidStateTransition(
                "Growth stage can only change while the crop is standing".to_string(),
            ));
        }

        sqlx::query("UPDATE plantings SET growth_stage = $1, updated_at = NOW() WHERE id = $2")
            .bind(stage.as_str())
            .bind(planting_id)
            .execute(&self.db)
            .await?;

        self.get_planting(planting_id).await
    }

    /// Delete a planting and its dependent records
    pub async fn delete_planting(&self, planting_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM plantings WHERE id = $1")
            .bind(planting_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Planting".to_string()));
        }

        Ok(())
    }

    fn validate_input(
        commodity: &str,
        classification: &str,
        area_planted_ha: Decimal,
    ) -> AppResult<()> {
        if commodity.trim().is_empty() {
            return Err(AppError::Validation {
                field: "commodity".to_string(),
                message: "Commodity is required".to_string(),
            });
        }
        if classification.trim().is_empty() {
            return Err(AppError::Validation {
                field: "classification".to_string(),
                message: "Classification is required".to_string(),
            });
        }
        if area_planted_ha <= Decimal::ZERO {
            return Err(AppError::Validation {
                field: "area_planted_ha".to_string(),
                message: "Area planted must be greater than 0".to_string(),
            });
        }
        validate_area_hectares(area_planted_ha).map_err(|msg| AppError::Validation {
            field: "area_planted_ha".to_string(),
            message: msg.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_input_valid() {
        assert!(PlantingService::validate_input("corn", "Yellow", Decimal::new(25, 1)).is_ok());
    }

    #[test]
    fn test_validate_input_rejects_zero_area() {
        assert!(PlantingService::validate_input("corn", "Yellow", Decimal::ZERO).is_err());
    }

    #[test]
    fn test_validate_input_rejects_blank_fields() {
        assert!(PlantingService::validate_input("", "Yellow", Decimal::ONE).is_err());
        assert!(PlantingService::validate_input("corn", "  ", Decimal::ONE).is_err());
    }

    #[test]
    fn test_validate_input_rejects_implausible_area() {
        assert!(PlantingService::validate_input("corn", "Yellow", Decimal::from(20_000)).is_err());
    }
}
