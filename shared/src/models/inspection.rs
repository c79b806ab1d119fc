//! Field inspection models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::GrowthStage;

/// A field inspection of a planting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inspection {
    pub id: Uuid,
    pub planting_id: Uuid,
    pub inspector_name: String,
    pub inspection_date: NaiveDate,
    /// Growth stage observed during the visit
    pub observed_stage: GrowthStage,
    pub findings: Option<String>,
    pub recommendations: Option<String>,
    pub created_at: DateTime<Utc>,
}
