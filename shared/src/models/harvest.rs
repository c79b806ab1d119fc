//! Harvest models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recorded harvest against a planting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Harvest {
    pub id: Uuid,
    pub planting_id: Uuid,
    pub farmer_id: Uuid,
    pub date_harvested: NaiveDate,
    /// Area harvested in hectares
    pub area_harvested_ha: Decimal,
    /// Production in kilograms as weighed at the field
    pub production_kg: Decimal,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Harvest {
    /// Average yield in metric tons per hectare; `0` when no area was harvested
    pub fn average_yield_mt_per_ha(&self) -> Decimal {
        if self.area_harvested_ha > Decimal::ZERO {
            (self.production_kg / Decimal::from(1000)) / self.area_harvested_ha
        } else {
            Decimal::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn harvest(area: Decimal, production_kg: Decimal) -> Harvest {
        Harvest {
            id: Uuid::nil(),
            planting_id: Uuid::nil(),
            farmer_id: Uuid::nil(),
            date_harvested: NaiveDate::from_ymd_opt(2024, 10, 15).unwrap(),
            area_harvested_ha: area,
            production_kg,
            remarks: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_average_yield() {
        // 8,000 kg over 2 ha = 4 MT/ha
        let h = harvest(Decimal::from(2), Decimal::from(8000));
        assert_eq!(h.average_yield_mt_per_ha(), Decimal::from(4));
    }

    #[test]
    fn test_average_yield_zero_area() {
        let h = harvest(Decimal::ZERO, Decimal::from(8000));
        assert_eq!(h.average_yield_mt_per_ha(), Decimal::ZERO);
    }
}
