//! Administrative location models
//!
//! Every farmer, association, and planting is attached to exactly one
//! barangay, which belongs to exactly one municipality. Reports always group
//! by these normalized names, never by free-text address fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A municipality of the province
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Municipality {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A barangay within a municipality
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Barangay {
    pub id: Uuid,
    pub municipality_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Barangay joined with its municipality name, as used in listings and reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarangayWithMunicipality {
    pub id: Uuid,
    pub name: String,
    pub municipality_id: Uuid,
    pub municipality_name: String,
}
