//! Farmer association models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A farmer association or cooperative
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Association {
    pub id: Uuid,
    pub name: String,
    /// SEC/CDA/DOLE registration number, when registered
    pub registration_number: Option<String>,
    pub barangay_id: Uuid,
    pub president_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
