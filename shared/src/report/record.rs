//! Report input rows and normalization

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{CropClassification, GrowthStage};

/// A raw report input row as produced by a joined query.
///
/// Every field is optional: rows may come from outer joins against location
/// tables, and legacy records can carry blank or unparseable values. The
/// aggregator never consumes these directly; they pass through
/// [`normalize`] first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportRecord {
    pub municipality: Option<String>,
    pub barangay: Option<String>,
    pub classification: Option<String>,
    pub growth_stage: Option<String>,
    pub area_ha: Option<Decimal>,
    pub production_kg: Option<Decimal>,
    pub farmer_id: Option<Uuid>,
}

/// A validated record ready for aggregation.
///
/// Production is carried in metric tons so yields come out in MT/ha.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    pub municipality: String,
    pub barangay: String,
    pub classification: CropClassification,
    pub stage: Option<GrowthStage>,
    pub area: Decimal,
    pub production_mt: Decimal,
    pub farmer_id: Option<Uuid>,
}

impl ReportRecord {
    /// Validate and convert a raw row, or `None` if the row is malformed.
    ///
    /// Malformed means: missing/blank location or classification, missing
    /// area, or a negative quantity. An unrecognized growth stage does not
    /// disqualify the row; the stage is dropped and the row still counts
    /// toward stage-independent totals.
    pub fn normalize(&self) -> Option<NormalizedRecord> {
        let municipality = non_blank(self.municipality.as_deref())?;
        let barangay = non_blank(self.barangay.as_deref())?;
        let classification: CropClassification =
            non_blank(self.classification.as_deref())?.parse().ok()?;

        let area = self.area_ha?;
        if area < Decimal::ZERO {
            return None;
        }

        let production_kg = self.production_kg.unwrap_or(Decimal::ZERO);
        if production_kg < Decimal::ZERO {
            return None;
        }

        let stage = self
            .growth_stage
            .as_deref()
            .and_then(|s| s.trim().parse::<GrowthStage>().ok());

        Some(NormalizedRecord {
            municipality,
            barangay,
            classification,
            stage,
            area,
            production_mt: production_kg / Decimal::from(1000),
            farmer_id: self.farmer_id,
        })
    }
}

/// Normalize a batch of raw rows, silently skipping malformed ones.
pub fn normalize(records: &[ReportRecord]) -> Vec<NormalizedRecord> {
    records.iter().filter_map(ReportRecord::normalize).collect()
}

fn non_blank(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(municipality: &str, barangay: &str, classification: &str, area: i64) -> ReportRecord {
        ReportRecord {
            municipality: Some(municipality.to_string()),
            barangay: Some(barangay.to_string()),
            classification: Some(classification.to_string()),
            growth_stage: Some("vegetative".to_string()),
            area_ha: Some(Decimal::from(area)),
            production_kg: None,
            farmer_id: None,
        }
    }

    #[test]
    fn test_normalize_valid_row() {
        let record = raw("Pototan", "Amamaros", "Yellow", 2);
        let normalized = record.normalize().unwrap();
        assert_eq!(normalized.municipality, "Pototan");
        assert_eq!(normalized.barangay, "Amamaros");
        assert_eq!(normalized.classification, CropClassification::Yellow);
        assert_eq!(normalized.stage, Some(GrowthStage::Vegetative));
        assert_eq!(normalized.area, Decimal::from(2));
        assert_eq!(normalized.production_mt, Decimal::ZERO);
    }

    #[test]
    fn test_kg_to_mt_conversion() {
        let record = ReportRecord {
            production_kg: Some(Decimal::from(4500)),
            ..raw("Pototan", "Amamaros", "Hybrid", 1)
        };
        let normalized = record.normalize().unwrap();
        assert_eq!(normalized.production_mt, Decimal::new(45, 1)); // 4.5 MT
    }

    #[test]
    fn test_missing_location_is_skipped() {
        let mut record = raw("Pototan", "Amamaros", "Yellow", 2);
        record.barangay = None;
        assert!(record.normalize().is_none());

        let mut record = raw("Pototan", "Amamaros", "Yellow", 2);
        record.municipality = Some("   ".to_string());
        assert!(record.normalize().is_none());
    }

    #[test]
    fn test_missing_area_is_skipped() {
        let mut record = raw("Pototan", "Amamaros", "Yellow", 2);
        record.area_ha = None;
        assert!(record.normalize().is_none());
    }

    #[test]
    fn test_negative_area_is_skipped() {
        let mut record = raw("Pototan", "Amamaros", "Yellow", 2);
        record.area_ha = Some(Decimal::from(-1));
        assert!(record.normalize().is_none());
    }

    #[test]
    fn test_unknown_stage_is_dropped_not_skipped() {
        let mut record = raw("Pototan", "Amamaros", "Yellow", 2);
        record.growth_stage = Some("germinating".to_string());
        let normalized = record.normalize().unwrap();
        assert_eq!(normalized.stage, None);
    }

    #[test]
    fn test_normalize_batch_skips_only_bad_rows() {
        let records = vec![
            raw("Pototan", "Amamaros", "Yellow", 2),
            ReportRecord::default(),
            raw("Pototan", "Cau-ayan", "White", 1),
        ];
        assert_eq!(normalize(&records).len(), 2);
    }
}
