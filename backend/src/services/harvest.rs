//! Harvest service for recording production against plantings
//!
//! Recording a harvest flips the planting to `harvested`; deleting the last
//! harvest of a planting flips it back to `standing`. Both transitions happen
//! inside the same transaction as the harvest write.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::PlantingStatus;
use shared::validation::{validate_harvest_area, validate_production_kg};

/// Harvest service
#[derive(Clone)]
pub struct HarvestService {
    db: PgPool,
}

/// Harvest with joined planting and location info
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct HarvestRow {
    pub id: Uuid,
    pub planting_id: Uuid,
    pub farmer_id: Uuid,
    pub farmer_name: String,
    pub barangay_name: String,
    pub municipality_name: String,
    pub commodity: String,
    pub classification: String,
    pub date_harvested: NaiveDate,
    pub area_harvested_ha: Decimal,
    pub production_kg: Decimal,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for recording a harvest
#[derive(Debug, Deserialize)]
pub struct RecordHarvestInput {
    pub planting_id: Uuid,
    pub date_harvested: NaiveDate,
    pub area_harvested_ha: Decimal,
    pub production_kg: Decimal,
    pub remarks: Option<String>,
}

/// Input for updating a harvest
#[derive(Debug, Deserialize)]
pub struct UpdateHarvestInput {
    pub date_harvested: Option<NaiveDate>,
    pub area_harvested_ha: Option<Decimal>,
    pub production_kg: Option<Decimal>,
    pub remarks: Option<String>,
}

const HARVEST_SELECT: &str = r#"
    SELECT h.id, h.planting_id, h.farmer_id,
           CONCAT(f.first_name, ' ', f.last_name) as farmer_name,
           b.name as barangay_name, m.name as municipality_name,
           p.commodity, p.classification,
           h.date_harvested, h.area_harvested_ha, h.production_kg, h.remarks,
           h.created_at, h.updated_at
    FROM harvests h
    JOIN plantings p ON p.id = h.planting_id
    JOIN farmers f ON f.id = h.farmer_id
    JOIN barangays b ON b.id = p.barangay_id
    JOIN municipalities m ON m.id = b.municipality_id
"#;

impl HarvestService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all harvests, most recent first
    pub async fn list_harvests(&self) -> AppResult<Vec<HarvestRow>> {
        let query = format!("{} ORDER BY h.date_harvested DESC", HARVEST_SELECT);
        let harvests = sqlx::query_as::<_, HarvestRow>(&query)
            .fetch_all(&self.db)
            .await?;

        Ok(harvests)
    }

    /// Get harvests recorded against a planting
    pub async fn get_harvests_by_planting(&self, planting_id: Uuid) -> AppResult<Vec<HarvestRow>> {
        let query = format!(
            "{} WHERE h.planting_id = $1 ORDER BY h.date_harvested DESC",
            HARVEST_SELECT
        );
        let harvests = sqlx::query_as::<_, HarvestRow>(&query)
            .bind(planting_id)
            .fetch_all(&self.db)
            .await?;

        Ok(harvests)
    }

    /// Get a harvest by ID
    pub async fn get_harvest(&self, harvest_id: Uuid) -> AppResult<HarvestRow> {
        let query = format!("{} WHERE h.id = $1", HARVEST_SELECT);

        sqlx::query_as::<_, HarvestRow>(&query)
            .bind(harvest_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Harvest".to_string()))
    }

    /// Record a harvest against a planting
    pub async fn record_harvest(&self, input: RecordHarvestInput) -> AppResult<HarvestRow> {
        // Look up the planting being harvested
        let planting = sqlx::query_as::<_, (Uuid, Decimal, NaiveDate)>(
            "SELECT farmer_id, area_planted_ha, date_planted FROM plantings WHERE id = $1",
        )
        .bind(input.planting_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Planting".to_string()))?;

        let (farmer_id, area_planted_ha, date_planted) = planting;

        validate_harvest_area(input.area_harvested_ha, area_planted_ha).map_err(|msg| {
            AppError::Validation {
                field: "area_harvested_ha".to_string(),
                message: msg.to_string(),
            }
        })?;
        validate_production_kg(input.production_kg).map_err(|msg| AppError::Validation {
            field: "production_kg".to_string(),
            message: msg.to_string(),
        })?;
        if input.date_harvested < date_planted {
            return Err(AppError::Validation {
                field: "date_harvested".to_string(),
                message: "Harvest date cannot precede the planting date".to_string(),
            });
        }

        // Start transaction
        let mut tx = self.db.begin().await?;

        let harvest_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO harvests (planting_id, farmer_id, date_harvested,
                                  area_harvested_ha, production_kg, remarks)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(input.planting_id)
        .bind(farmer_id)
        .bind(input.date_harvested)
        .bind(input.area_harvested_ha)
        .bind(input.production_kg)
        .bind(&input.remarks)
        .fetch_one(&mut *tx)
        .await?;

        // The crop is no longer standing
        sqlx::query("UPDATE plantings SET status = $1, updated_at = NOW() WHERE id = $2")
            .bind(PlantingStatus::Harvested.as_str())
            .bind(input.planting_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        self.get_harvest(harvest_id).await
    }

    /// Update a harvest
    pub async fn update_harvest(
        &self,
        harvest_id: Uuid,
        input: UpdateHarvestInput,
    ) -> AppResult<HarvestRow> {
        let existing = self.get_harvest(harvest_id).await?;

        let date_harvested = input.date_harvested.unwrap_or(existing.date_harvested);
        let area_harvested_ha = input.area_harvested_ha.unwrap_or(existing.area_harvested_ha);
        let production_kg = input.production_kg.unwrap_or(existing.production_kg);
        let remarks = input.remarks.or(existing.remarks);

        let area_planted_ha = sqlx::query_scalar::<_, Decimal>(
            "SELECT area_planted_ha FROM plantings WHERE id = $1",
        )
        .bind(existing.planting_id)
        .fetch_one(&self.db)
        .await?;

        validate_harvest_area(area_harvested_ha, area_planted_ha).map_err(|msg| {
            AppError::Validation {
                field: "area_harvested_ha".to_string(),
                message: msg.to_string(),
            }
        })?;
        validate_production_kg(production_kg).map_err(|msg| AppError::Validation {
            field: "production_kg".to_string(),
            message: msg.to_string(),
        })?;

        sqlx::query(
            r#"
            UPDATE harvests
            SET date_harvested = $1, area_harvested_ha = $2, production_kg = $3,
                remarks = $4, updated_at = NOW()
            WHERE id = $5
            "#,
        )
        .bind(date_harvested)
        .bind(area_harvested_ha)
        .bind(production_kg)
        .bind(&remarks)
        .bind(harvest_id)
        .execute(&self.db)
        .await?;

        self.get_harvest(harvest_id).await
    }

    /// Delete a harvest, reverting the planting to standing when it was the
    /// last one
    pub async fn delete_harvest(&self, harvest_id: Uuid) -> AppResult<()> {
        let planting_id =
            sqlx::query_scalar::<_, Uuid>("SELECT planting_id FROM harvests WHERE id = $1")
                .bind(harvest_id)
                .fetch_optional(&self.db)
                .await?
                .ok_or_else(|| AppError::NotFound("Harvest".to_string()))?;

        // Start transaction
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM harvests WHERE id = $1")
            .bind(harvest_id)
            .execute(&mut *tx)
            .await?;

        let remaining = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM harvests WHERE planting_id = $1",
        )
        .bind(planting_id)
        .fetch_one(&mut *tx)
        .await?;

        if remaining == 0 {
            sqlx::query("UPDATE plantings SET status = $1, updated_at = NOW() WHERE id = $2")
                .bind(PlantingStatus::Standing.as_str())
                .bind(planting_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(())
    }
}
