//! Farmer registry service

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::types::{PaginatedResponse, Pagination, PaginationMeta};
use shared::validation::{validate_philippine_mobile, validate_rsbsa_number};

/// Farmer registry service
#[derive(Clone)]
pub struct FarmerService {
    db: PgPool,
}

/// Farmer with joined location info for listings
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct FarmerRow {
    pub id: Uuid,
    pub rsbsa_number: String,
    pub first_name: String,
    pub last_name: String,
    pub sex: String,
    pub birth_date: Option<NaiveDate>,
    pub contact_number: Option<String>,
    pub barangay_id: Uuid,
    pub barangay_name: String,
    pub municipality_name: String,
    pub association_id: Option<Uuid>,
    pub association_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for registering a farmer
#[derive(Debug, Deserialize)]
pub struct CreateFarmerInput {
    pub rsbsa_number: String,
    pub first_name: String,
    pub last_name: String,
    pub sex: String,
    pub birth_date: Option<NaiveDate>,
    pub contact_number: Option<String>,
    pub barangay_id: Uuid,
    pub association_id: Option<Uuid>,
}

/// Input for updating a farmer
#[derive(Debug, Deserialize)]
pub struct UpdateFarmerInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub sex: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub contact_number: Option<String>,
    pub barangay_id: Option<Uuid>,
    pub association_id: Option<Uuid>,
}

/// Filter parameters for farmer listings
#[derive(Debug, Default, Deserialize)]
pub struct FarmerFilter {
    /// Matches against name or RSBSA number
    pub search: Option<String>,
    pub barangay_id: Option<Uuid>,
    pub association_id: Option<Uuid>,
}

const FARMER_SELECT: &str = r#"
    SELECT f.id, f.rsbsa_number, f.first_name, f.last_name, f.sex, f.birth_date,
           f.contact_number, f.barangay_id, b.name as barangay_name,
           m.name as municipality_name, f.association_id, a.name as association_name,
           f.created_at, f.updated_at
    FROM farmers f
    JOIN barangays b ON b.id = f.barangay_id
    JOIN municipalities m ON m.id = b.municipality_id
    LEFT JOIN associations a ON a.id = f.association_id
"#;

impl FarmerService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List farmers, filtered and paginated
    pub async fn list_farmers(
        &self,
        filter: &FarmerFilter,
        pagination: &Pagination,
    ) -> AppResult<PaginatedResponse<FarmerRow>> {
        let search = filter
            .search
            .as_deref()
            .map(|s| format!("%{}%", s.trim()));

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM farmers f
            WHERE ($1::text IS NULL
                   OR f.rsbsa_number ILIKE $1
                   OR f.first_name ILIKE $1
                   OR f.last_name ILIKE $1)
              AND ($2::uuid IS NULL OR f.barangay_id = $2)
              AND ($3::uuid IS NULL OR f.association_id = $3)
            "#,
        )
        .bind(&search)
        .bind(filter.barangay_id)
        .bind(filter.association_id)
        .fetch_one(&self.db)
        .await?;

        let query = format!(
            r#"{}
            WHERE ($1::text IS NULL
                   OR f.rsbsa_number ILIKE $1
                   OR f.first_name ILIKE $1
                   OR f.last_name ILIKE $1)
              AND ($2::uuid IS NULL OR f.barangay_id = $2)
              AND ($3::uuid IS NULL OR f.association_id = $3)
            ORDER BY f.last_name, f.first_name
            LIMIT $4 OFFSET $5
            "#,
            FARMER_SELECT
        );

        let farmers = sqlx::query_as::<_, FarmerRow>(&query)
            .bind(&search)
            .bind(filter.barangay_id)
            .bind(filter.association_id)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.db)
            .await?;

        Ok(PaginatedResponse {
            data: farmers,
            pagination: PaginationMeta::new(pagination, total),
        })
    }

    /// Get a farmer by ID
    pub async fn get_farmer(&self, farmer_id: Uuid) -> AppResult<FarmerRow> {
        let query = format!("{} WHERE f.id = $1", FARMER_SELECT);

        sqlx::query_as::<_, FarmerRow>(&query)
            .bind(farmer_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Farmer".to_string()))
    }

    /// Register a new farmer
    pub async fn create_farmer(&self, input: CreateFarmerInput) -> AppResult<FarmerRow> {
        Self::validate_input(
            &input.rsbsa_number,
            &input.sex,
            input.contact_number.as_deref(),
        )?;

        // RSBSA numbers are unique nationwide
        let existing =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM farmers WHERE rsbsa_number = $1")
                .bind(&input.rsbsa_number)
                .fetch_one(&self.db)
                .await?;
        if existing > 0 {
            return Err(AppError::DuplicateEntry("rsbsa_number".to_string()));
        }

        // Validate barangay exists
        let barangay_exists =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM barangays WHERE id = $1")
                .bind(input.barangay_id)
                .fetch_one(&self.db)
                .await?;
        if barangay_exists == 0 {
            return Err(AppError::NotFound("Barangay".to_string()));
        }

        let farmer_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO farmers (rsbsa_number, first_name, last_name, sex, birth_date,
                                 contact_number, barangay_id, association_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&input.rsbsa_number)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.sex)
        .bind(input.birth_date)
        .bind(&input.contact_number)
        .bind(input.barangay_id)
        .bind(input.association_id)
        .fetch_one(&self.db)
        .await?;

        self.get_farmer(farmer_id).await
    }

    /// Update a farmer
    pub async fn update_farmer(
        &self,
        farmer_id: Uuid,
        input: UpdateFarmerInput,
    ) -> AppResult<FarmerRow> {
        let existing = self.get_farmer(farmer_id).await?;

        let first_name = input.first_name.unwrap_or(existing.first_name);
        let last_name = input.last_name.unwrap_or(existing.last_name);
        let sex = input.sex.unwrap_or(existing.sex);
        let birth_date = input.birth_date.or(existing.birth_date);
        let contact_number = input.contact_number.or(existing.contact_number);
        let barangay_id = input.barangay_id.unwrap_or(existing.barangay_id);
        let association_id = input.association_id.or(existing.association_id);

        Self::validate_input(&existing.rsbsa_number, &sex, contact_number.as_deref())?;

        sqlx::query(
            r#"
            UPDATE farmers
            SET first_name = $1, last_name = $2, sex = $3, birth_date = $4,
                contact_number = $5, barangay_id = $6, association_id = $7,
                updated_at = NOW()
            WHERE id = $8
            "#,
        )
        .bind(&first_name)
        .bind(&last_name)
        .bind(&sex)
        .bind(birth_date)
        .bind(&contact_number)
        .bind(barangay_id)
        .bind(association_id)
        .bind(farmer_id)
        .execute(&self.db)
        .await?;

        self.get_farmer(farmer_id).await
    }

    /// Delete a farmer and all dependent records
    pub async fn delete_farmer(&self, farmer_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM farmers WHERE id = $1")
            .bind(farmer_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Farmer".to_string()));
        }

        Ok(())
    }

    fn validate_input(rsbsa_number: &str, sex: &str, contact: Option<&str>) -> AppResult<()> {
        validate_rsbsa_number(rsbsa_number).map_err(|msg| AppError::Validation {
            field: "rsbsa_number".to_string(),
            message: msg.to_string(),
        })?;

        if sex != "male" && sex != "female" {
            return Err(AppError::Validation {
                field: "sex".to_string(),
                message: "Sex must be 'male' or 'female'".to_string(),
            });
        }

        if let Some(contact) = contact {
            validate_philippine_mobile(contact).map_err(|msg| AppError::Validation {
                field: "contact_number".to_string(),
                message: msg.to_string(),
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_input_accepts_valid_farmer() {
        assert!(
            FarmerService::validate_input("06-30-18-014-000001", "female", Some("09171234567"))
                .is_ok()
        );
        assert!(FarmerService::validate_input("06-30-18-014-000001", "male", None).is_ok());
    }

    #[test]
    fn test_validate_input_rejects_bad_rsbsa() {
        assert!(FarmerService::validate_input("not-a-number", "male", None).is_err());
    }

    #[test]
    fn test_validate_input_rejects_bad_sex() {
        assert!(FarmerService::validate_input("06-30-18-014-000001", "other", None).is_err());
    }

    #[test]
    fn test_validate_input_rejects_bad_contact() {
        assert!(
            FarmerService::validate_input("06-30-18-014-000001", "male", Some("12345")).is_err()
        );
    }
}
