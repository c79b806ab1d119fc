//! Farmer registry models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Sex;

/// A farmer registered with the provincial agriculture office.
///
/// The RSBSA number is the national registry identifier and is unique across
/// the province.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Farmer {
    pub id: Uuid,
    pub rsbsa_number: String,
    pub first_name: String,
    pub last_name: String,
    pub sex: Sex,
    pub birth_date: Option<NaiveDate>,
    pub contact_number: Option<String>,
    pub barangay_id: Uuid,
    pub association_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Farmer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
