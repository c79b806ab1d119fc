//! WebAssembly module for the Provincial Agriculture Management Platform
//!
//! Provides client-side computation for:
//! - Municipal report aggregation from already-loaded records
//! - Report cell formatting (blank-zero convention)
//! - Offline data validation

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

use shared::models::{CropClassification, GrowthStage};
use shared::report::{build_report_table, normalize, CellField, ReportRecord};

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Build the corn standing-crop report table from raw records.
///
/// `records_json` is an array of report record objects; the returned string
/// is the formatted display table as JSON (all cells display-ready strings).
#[wasm_bindgen]
pub fn build_corn_standing_crop_table(
    records_json: &str,
    municipality: &str,
) -> Result<String, JsValue> {
    let records: Vec<ReportRecord> = serde_json::from_str(records_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid records JSON: {}", e)))?;

    let normalized = normalize(&records);
    let table = build_report_table(
        &normalized,
        municipality,
        &CropClassification::corn(),
        &GrowthStage::all(),
    );
    let display = table.to_display(&[CellField::Area], false);

    serde_json::to_string(&display)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Build the rice planting report table from raw records
#[wasm_bindgen]
pub fn build_rice_planting_table(
    records_json: &str,
    municipality: &str,
) -> Result<String, JsValue> {
    let records: Vec<ReportRecord> = serde_json::from_str(records_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid records JSON: {}", e)))?;

    let normalized = normalize(&records);
    let table = build_report_table(&normalized, municipality, &CropClassification::rice(), &[]);
    let display = table.to_display(&[CellField::Area], true);

    serde_json::to_string(&display)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Build the rice harvesting report table from raw records
#[wasm_bindgen]
pub fn build_rice_harvesting_table(
    records_json: &str,
    municipality: &str,
) -> Result<String, JsValue> {
    let records: Vec<ReportRecord> = serde_json::from_str(records_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid records JSON: {}", e)))?;

    let normalized = normalize(&records);
    let table = build_report_table(&normalized, municipality, &CropClassification::rice(), &[]);
    let display = table.to_display(
        &[CellField::Area, CellField::Production, CellField::AverageYield],
        true,
    );

    serde_json::to_string(&display)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Format a quantity the way report cells are printed: four decimals, empty
/// string for zero
#[wasm_bindgen]
pub fn format_report_quantity(value: f64) -> String {
    let decimal = Decimal::try_from(value).unwrap_or(Decimal::ZERO);
    shared::report::format_quantity(decimal)
}

/// Calculate average yield in MT/ha from production in kg and area in ha
#[wasm_bindgen]
pub fn calculate_average_yield(production_kg: f64, area_ha: f64) -> f64 {
    if area_ha <= 0.0 {
        return 0.0;
    }
    (production_kg / 1000.0) / area_ha
}

/// Validate an RSBSA registry number
#[wasm_bindgen]
pub fn is_valid_rsbsa_number(number: &str) -> bool {
    shared::validation::validate_rsbsa_number(number).is_ok()
}

/// Validate a Philippine mobile number
#[wasm_bindgen]
pub fn is_valid_mobile_number(number: &str) -> bool {
    shared::validation::validate_philippine_mobile(number).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_report_quantity() {
        assert_eq!(format_report_quantity(2.5), "2.5000");
        assert_eq!(format_report_quantity(0.0), "");
        assert_eq!(format_report_quantity(0.00001), "");
    }

    #[test]
    fn test_calculate_average_yield() {
        let yield_mt = calculate_average_yield(8000.0, 2.0);
        assert!((yield_mt - 4.0).abs() < 0.001);
    }

    #[test]
    fn test_calculate_average_yield_zero_area() {
        assert_eq!(calculate_average_yield(8000.0, 0.0), 0.0);
    }

    #[test]
    fn test_rsbsa_validation() {
        assert!(is_valid_rsbsa_number("06-30-18-014-000001"));
        assert!(!is_valid_rsbsa_number("invalid"));
    }

    #[test]
    fn test_build_table_from_json() {
        let records = r#"[
            {"municipality": "Dingle", "barangay": "Abangay", "classification": "Yellow",
             "growth_stage": "vegetative", "area_ha": "2.5", "production_kg": null, "farmer_id": null},
            {"municipality": "Dingle", "barangay": "Abangay", "classification": "Yellow",
             "growth_stage": "vegetative", "area_ha": "1.5", "production_kg": null, "farmer_id": null}
        ]"#;

        let display_json = build_corn_standing_crop_table(records, "Dingle").unwrap();
        let display: serde_json::Value = serde_json::from_str(&display_json).unwrap();
        // Yellow - Vegetative cell for Abangay sums to 4.0000
        assert_eq!(display["rows"][0]["label"], "Abangay");
        assert_eq!(display["rows"][0]["values"][1], "4.0000");
    }

    #[test]
    fn test_build_table_rejects_bad_json() {
        assert!(build_corn_standing_crop_table("not json", "Dingle").is_err());
    }
}
