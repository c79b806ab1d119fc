//! Farmer association service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Association service
#[derive(Clone)]
pub struct AssociationService {
    db: PgPool,
}

/// Association with joined location and membership info
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AssociationRow {
    pub id: Uuid,
    pub name: String,
    pub registration_number: Option<String>,
    pub barangay_id: Uuid,
    pub barangay_name: String,
    pub municipality_name: String,
    pub president_name: Option<String>,
    pub member_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an association
#[derive(Debug, Deserialize)]
pub struct CreateAssociationInput {
    pub name: String,
    pub registration_number: Option<String>,
    pub barangay_id: Uuid,
    pub president_name: Option<String>,
}

/// Input for updating an association
#[derive(Debug, Deserialize)]
pub struct UpdateAssociationInput {
    pub name: Option<String>,
    pub registration_number: Option<String>,
    pub barangay_id: Option<Uuid>,
    pub president_name: Option<String>,
}

const ASSOCIATION_SELECT: &str = r#"
    SELECT a.id, a.name, a.registration_number, a.barangay_id,
           b.name as barangay_name, m.name as municipality_name,
           a.president_name,
           (SELECT COUNT(*) FROM farmers f WHERE f.association_id = a.id) as member_count,
           a.created_at, a.updated_at
    FROM associations a
    JOIN barangays b ON b.id = a.barangay_id
    JOIN municipalities m ON m.id = b.municipality_id
"#;

impl AssociationService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all associations in name order
    pub async fn list_associations(&self) -> AppResult<Vec<AssociationRow>> {
        let query = format!("{} ORDER BY a.name", ASSOCIATION_SELECT);
        let associations = sqlx::query_as::<_, AssociationRow>(&query)
            .fetch_all(&self.db)
            .await?;

        Ok(associations)
    }

    /// Get an association by ID
    pub async fn get_association(&self, association_id: Uuid) -> AppResult<AssociationRow> {
        let query = format!("{} WHERE a.id = $1", ASSOCIATION_SELECT);

        sqlx::query_as::<_, AssociationRow>(&query)
            .bind(association_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Association".to_string()))
    }

    /// Create a new association
    pub async fn create_association(
        &self,
        input: CreateAssociationInput,
    ) -> AppResult<AssociationRow> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Association name is required".to_string(),
            });
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

        let association_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO associations (name, registration_number, barangay_id, president_name)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(input.name.trim())
        .bind(&input.registration_number)
        .bind(input.barangay_id)
        .bind(&input.president_name)
        .fetch_one(&self.db)
        .await?;

        self.get_association(association_id).await
    }

    /// Update an association
    pub async fn update_association(
        &self,
        association_id: Uuid,
        input: UpdateAssociationInput,
    ) -> AppResult<AssociationRow> {
        let existing = self.get_association(association_id).await?;

        let name = input.name.unwrap_or(existing.name);
        let registration_number = input.registration_number.or(existing.registration_number);
        let barangay_id = input.barangay_id.unwrap_or(existing.barangay_id);
        let president_name = input.president_name.or(existing.president_name);

        sqlx::query(
            r#"
            UPDATE associations
            SET name = $1, registration_number = $2, barangay_id = $3,
                president_name = $4, updated_at = NOW()
            WHERE id = $5
            "#,
        )
        .bind(&name)
        .bind(&registration_number)
        .bind(barangay_id)
        .bind(&president_name)
        .bind(association_id)
        .execute(&self.db)
        .await?;

        self.get_association(association_id).await
    }

    /// Delete an association; member farmers are detached, not deleted
    pub async fn delete_association(&self, association_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM associations WHERE id = $1")
            .bind(association_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Association".to_string()));
        }

        Ok(())
    }
}
