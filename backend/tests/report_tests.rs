//! Report aggregation property-based and unit tests
//!
//! Comprehensive tests for:
//! - Summation consistency: barangay cells always sum to the grand total
//! - Blank-zero formatting at the display boundary
//! - Defensive normalization of malformed rows
//! - Purity/idempotence of report construction

use proptest::prelude::*;
use rust_decimal::Decimal;

use shared::models::{CropClassification, GrowthStage};
use shared::report::{
    build_report_table, format_quantity, normalize, AggregateCell, NormalizedRecord, ReportRecord,
};

// ============================================================================
// Property Test Strategies
// ============================================================================

static BARANGAYS: [&str; 5] = ["Abangay", "Cau-ayan", "Lincud", "Matangharon", "Tambunac"];

fn barangay_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(BARANGAYS.as_slice()).prop_map(str::to_string)
}

fn corn_classification_strategy() -> impl Strategy<Value = CropClassification> {
    prop_oneof![
        Just(CropClassification::Yellow),
        Just(CropClassification::White),
    ]
}

fn stage_strategy() -> impl Strategy<Value = GrowthStage> {
    prop::sample::select(GrowthStage::all().to_vec())
}

/// Area in hectares: 0.01 to 100.00
fn area_strategy() -> impl Strategy<Value = Decimal> {
    (1..=10_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn record_strategy() -> impl Strategy<Value = NormalizedRecord> {
    (
        barangay_strategy(),
        corn_classification_strategy(),
        stage_strategy(),
        area_strategy(),
    )
        .prop_map(|(barangay, classification, stage, area)| NormalizedRecord {
            municipality: "Pototan".to_string(),
            barangay,
            classification,
            stage: Some(stage),
            area,
            production_mt: Decimal::ZERO,
            farmer_id: None,
        })
}

fn record_set_strategy() -> impl Strategy<Value = Vec<NormalizedRecord>> {
    prop::collection::vec(record_strategy(), 0..60)
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    /// Barangay-level cells for every classification/stage always sum to the
    /// grand-total cell for that classification/stage
    #[test]
    fn test_barangay_cells_sum_to_grand_total(records in record_set_strategy()) {
        let table = build_report_table(
            &records,
            "Pototan",
            &CropClassification::corn(),
            &GrowthStage::all(),
        );

        for (class_idx, _) in table.classifications.iter().enumerate() {
            for (stage_idx, _) in table.stages.iter().enumerate() {
                let row_sum: Decimal = table
                    .rows
                    .iter()
                    .map(|row| row.cells.blocks[class_idx].stage_cells[stage_idx].area)
                    .sum();
                prop_assert_eq!(
                    row_sum,
                    table.grand_total.blocks[class_idx].stage_cells[stage_idx].area
                );
            }
            let total_sum: Decimal = table
                .rows
                .iter()
                .map(|row| row.cells.blocks[class_idx].total.area)
                .sum();
            prop_assert_eq!(total_sum, table.grand_total.blocks[class_idx].total.area);
        }
    }

    /// The combined column always equals the sum of the classification totals
    #[test]
    fn test_combined_equals_sum_of_classifications(records in record_set_strategy()) {
        let table = build_report_table(
            &records,
            "Pototan",
            &CropClassification::corn(),
            &GrowthStage::all(),
        );

        for row in &table.rows {
            let block_sum: Decimal = row.cells.blocks.iter().map(|b| b.total.area).sum();
            prop_assert_eq!(block_sum, row.cells.combined.area);
        }
        let grand_block_sum: Decimal =
            table.grand_total.blocks.iter().map(|b| b.total.area).sum();
        prop_assert_eq!(grand_block_sum, table.grand_total.combined.area);
    }

    /// Building the same report twice yields byte-identical output
    #[test]
    fn test_report_construction_is_idempotent(records in record_set_strategy()) {
        let first = build_report_table(
            &records,
            "Pototan",
            &CropClassification::corn(),
            &GrowthStage::all(),
        );
        let second = build_report_table(
            &records,
            "Pototan",
            &CropClassification::corn(),
            &GrowthStage::all(),
        );
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    /// Average yield is 0 whenever area is 0, regardless of production
    #[test]
    fn test_yield_zero_area(production in 0..1_000_000i64) {
        let cell = AggregateCell::new(Decimal::ZERO, Decimal::new(production, 3));
        prop_assert_eq!(cell.average_yield, Decimal::ZERO);
    }

    /// Yield is always finite and non-negative for non-negative inputs
    #[test]
    fn test_yield_well_defined(area in 0..10_000i64, production in 0..1_000_000i64) {
        let cell = AggregateCell::new(Decimal::new(area, 2), Decimal::new(production, 3));
        prop_assert!(cell.average_yield >= Decimal::ZERO);
    }

    /// Formatting never produces "0.0000": zero quantities render blank
    #[test]
    fn test_format_never_shows_zero(value in 0..100_000i64) {
        let formatted = format_quantity(Decimal::new(value, 4));
        prop_assert_ne!(formatted.as_str(), "0.0000");
        if value == 0 {
            prop_assert_eq!(formatted.as_str(), "");
        }
    }

    /// Records in other municipalities never leak into the table
    #[test]
    fn test_municipality_isolation(records in record_set_strategy()) {
        let mut all_records = records.clone();
        for record in &records {
            let mut other = record.clone();
            other.municipality = "Dingle".to_string();
            all_records.push(other);
        }

        let from_mixed = build_report_table(
            &all_records,
            "Pototan",
            &CropClassification::corn(),
            &GrowthStage::all(),
        );
        let from_clean = build_report_table(
            &records,
            "Pototan",
            &CropClassification::corn(),
            &GrowthStage::all(),
        );
        prop_assert_eq!(
            serde_json::to_string(&from_mixed).unwrap(),
            serde_json::to_string(&from_clean).unwrap()
        );
    }
}

// ============================================================================
// Unit Tests: Worked Examples
// ============================================================================

#[cfg(test)]
mod worked_examples {
    use super::*;
    use shared::report::CellField;

    fn corn_record(barangay: &str, classification: CropClassification, area: Decimal) -> NormalizedRecord {
        NormalizedRecord {
            municipality: "Pototan".to_string(),
            barangay: barangay.to_string(),
            classification,
            stage: Some(GrowthStage::Vegetative),
            area,
            production_mt: Decimal::ZERO,
            farmer_id: None,
        }
    }

    #[test]
    fn test_two_plantings_sum_to_four_hectares() {
        let records = vec![
            corn_record("A", CropClassification::Yellow, Decimal::new(25, 1)),
            corn_record("A", CropClassification::Yellow, Decimal::new(15, 1)),
        ];
        let table = build_report_table(
            &records,
            "Pototan",
            &CropClassification::corn(),
            &GrowthStage::all(),
        );
        let display = table.to_display(&[CellField::Area], false);

        // Yellow block: seedling, vegetative, reproductive, maturing, total
        assert_eq!(display.rows[0].values[1], "4.0000");
        assert_eq!(display.totals.values[1], "4.0000");
    }

    #[test]
    fn test_cross_classification_grand_total() {
        let records = vec![
            corn_record("A", CropClassification::White, Decimal::ONE),
            corn_record("A", CropClassification::Yellow, Decimal::ONE),
        ];
        let table = build_report_table(
            &records,
            "Pototan",
            &CropClassification::corn(),
            &GrowthStage::all(),
        );
        let display = table.to_display(&[CellField::Area], false);

        // Last value column is the combined grand total across classifications
        assert_eq!(display.rows[0].values.last().unwrap(), "2.0000");
    }

    #[test]
    fn test_empty_record_set_formats_all_blank() {
        let table = build_report_table(
            &[],
            "Pototan",
            &CropClassification::corn(),
            &GrowthStage::all(),
        );
        let display = table.to_display(&[CellField::Area], false);
        assert!(display.rows.is_empty());
        assert!(display.totals.values.iter().all(String::is_empty));
    }

    #[test]
    fn test_formatter_examples() {
        assert_eq!(format_quantity(Decimal::ZERO), "");
        assert_eq!(format_quantity(Decimal::new(1, 5)), ""); // 0.00001
        assert_eq!(format_quantity(Decimal::new(123456, 5)), "1.2346"); // 1.23456
    }
}

// ============================================================================
// Unit Tests: Defensive Normalization
// ============================================================================

#[cfg(test)]
mod normalization_tests {
    use super::*;

    #[test]
    fn test_malformed_rows_are_skipped_silently() {
        let records = vec![
            // Valid
            ReportRecord {
                municipality: Some("Pototan".to_string()),
                barangay: Some("Abangay".to_string()),
                classification: Some("Yellow".to_string()),
                growth_stage: Some("maturing".to_string()),
                area_ha: Some(Decimal::ONE),
                production_kg: None,
                farmer_id: None,
            },
            // Missing barangay
            ReportRecord {
                municipality: Some("Pototan".to_string()),
                barangay: None,
                classification: Some("Yellow".to_string()),
                growth_stage: None,
                area_ha: Some(Decimal::ONE),
                production_kg: None,
                farmer_id: None,
            },
            // Missing area
            ReportRecord {
                municipality: Some("Pototan".to_string()),
                barangay: Some("Abangay".to_string()),
                classification: Some("Yellow".to_string()),
                growth_stage: None,
                area_ha: None,
                production_kg: None,
                farmer_id: None,
            },
            // Negative area
            ReportRecord {
                municipality: Some("Pototan".to_string()),
                barangay: Some("Abangay".to_string()),
                classification: Some("Yellow".to_string()),
                growth_stage: None,
                area_ha: Some(Decimal::from(-3)),
                production_kg: None,
                farmer_id: None,
            },
        ];

        let normalized = normalize(&records);
        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized[0].barangay, "Abangay");
    }

    #[test]
    fn test_aggregation_proceeds_after_skipping() {
        let records = vec![
            ReportRecord {
                municipality: Some("Pototan".to_string()),
                barangay: Some("Abangay".to_string()),
                classification: Some("Yellow".to_string()),
                growth_stage: Some("maturing".to_string()),
                area_ha: Some(Decimal::from(2)),
                production_kg: None,
                farmer_id: None,
            },
            ReportRecord::default(),
        ];

        let normalized = normalize(&records);
        let table = build_report_table(
            &normalized,
            "Pototan",
            &CropClassification::corn(),
            &GrowthStage::all(),
        );
        assert_eq!(table.grand_total.combined.area, Decimal::from(2));
    }
}
