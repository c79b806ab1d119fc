//! Grouping and summation of normalized records into report tables

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{CropClassification, GrowthStage};

use super::record::NormalizedRecord;

/// Summed quantities for one cell of a report.
///
/// `average_yield` is derived from the sums and recomputed on every
/// combination; it is never itself summed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateCell {
    /// Total area in hectares
    pub area: Decimal,
    /// Total production in metric tons
    pub production: Decimal,
    /// Average yield in MT/ha; `0` when no area
    pub average_yield: Decimal,
}

impl AggregateCell {
    pub fn new(area: Decimal, production: Decimal) -> Self {
        let average_yield = if area > Decimal::ZERO {
            production / area
        } else {
            Decimal::ZERO
        };
        Self {
            area,
            production,
            average_yield,
        }
    }

    /// Sum the given records into one cell
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a NormalizedRecord>,
    {
        let mut area = Decimal::ZERO;
        let mut production = Decimal::ZERO;
        for record in records {
            area += record.area;
            production += record.production_mt;
        }
        Self::new(area, production)
    }

    /// Element-wise sum of cells, with the yield recomputed from the sums
    pub fn combine<'a, I>(cells: I) -> Self
    where
        I: IntoIterator<Item = &'a AggregateCell>,
    {
        let mut area = Decimal::ZERO;
        let mut production = Decimal::ZERO;
        for cell in cells {
            area += cell.area;
            production += cell.production;
        }
        Self::new(area, production)
    }

    pub fn is_empty(&self) -> bool {
        self.area.is_zero() && self.production.is_zero()
    }
}

/// Keep only records whose municipality matches exactly (case-sensitive)
pub fn filter_by_municipality<'a>(
    records: &'a [NormalizedRecord],
    municipality: &str,
) -> Vec<&'a NormalizedRecord> {
    records
        .iter()
        .filter(|r| r.municipality == municipality)
        .collect()
}

/// Partition records by barangay name, in name order
pub fn group_by_barangay<'a>(
    records: &[&'a NormalizedRecord],
) -> BTreeMap<String, Vec<&'a NormalizedRecord>> {
    let mut groups: BTreeMap<String, Vec<&NormalizedRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.barangay.clone())
            .or_default()
            .push(record);
    }
    groups
}

/// Sum of `area` over records matching the classification and, when given,
/// the growth stage. `stage = None` matches records regardless of stage.
pub fn sum_area(
    records: &[&NormalizedRecord],
    classification: &CropClassification,
    stage: Option<GrowthStage>,
) -> Decimal {
    records
        .iter()
        .filter(|r| r.classification == *classification)
        .filter(|r| stage.is_none() || r.stage == stage)
        .map(|r| r.area)
        .sum()
}

/// Sum of `area` for a classification ignoring stage
pub fn grand_total(records: &[&NormalizedRecord], classification: &CropClassification) -> Decimal {
    sum_area(records, classification, None)
}

/// Combined cell across classification cells (e.g. Yellow + White)
pub fn combine_classifications(cells: &[AggregateCell]) -> AggregateCell {
    AggregateCell::combine(cells)
}

/// Count of distinct farmers among the records; records without a farmer id
/// do not contribute
pub fn count_distinct_farmers(records: &[&NormalizedRecord]) -> usize {
    records
        .iter()
        .filter_map(|r| r.farmer_id)
        .collect::<BTreeSet<_>>()
        .len()
}

/// One classification's columns within a row: a cell per requested stage
/// plus the stage-independent total
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationBlock {
    pub classification: CropClassification,
    pub stage_cells: Vec<AggregateCell>,
    pub total: AggregateCell,
}

/// The computed cells of one row (or of the grand-total row)
#[derive(Debug, Clone, Serialize)]
pub struct RowCells {
    pub blocks: Vec<ClassificationBlock>,
    /// Combined cell across all classification totals
    pub combined: AggregateCell,
    /// Distinct farmers among the row's records
    pub farmers: usize,
}

impl RowCells {
    fn from_records(
        records: &[&NormalizedRecord],
        classifications: &[CropClassification],
        stages: &[GrowthStage],
    ) -> Self {
        let blocks: Vec<ClassificationBlock> = classifications
            .iter()
            .map(|classification| {
                let stage_cells = stages
                    .iter()
                    .map(|stage| {
                        let matching: Vec<&NormalizedRecord> = records
                            .iter()
                            .copied()
                            .filter(|r| r.classification == *classification)
                            .filter(|r| r.stage == Some(*stage))
                            .collect();
                        AggregateCell::from_records(matching.into_iter())
                    })
                    .collect();
                let total = AggregateCell::from_records(
                    records
                        .iter()
                        .copied()
                        .filter(|r| r.classification == *classification),
                );
                ClassificationBlock {
                    classification: classification.clone(),
                    stage_cells,
                    total,
                }
            })
            .collect();

        let totals: Vec<AggregateCell> = blocks.iter().map(|b| b.total.clone()).collect();
        let combined = combine_classifications(&totals);
        let farmers = count_distinct_farmers(records);

        Self {
            blocks,
            combined,
            farmers,
        }
    }
}

/// One barangay row of a report
#[derive(Debug, Clone, Serialize)]
pub struct BarangayRow {
    pub barangay: String,
    pub cells: RowCells,
}

/// The full nested report table for one municipality.
///
/// Rows are ordered by barangay name so that identical inputs always produce
/// identical tables.
#[derive(Debug, Clone, Serialize)]
pub struct ReportTable {
    pub municipality: String,
    pub classifications: Vec<CropClassification>,
    pub stages: Vec<GrowthStage>,
    pub rows: Vec<BarangayRow>,
    pub grand_total: RowCells,
}

/// Build the report table for one municipality.
///
/// `stages` may be empty for reports without a stage breakdown (planting and
/// harvesting reports); records outside the requested classifications
/// contribute to no cell.
pub fn build_report_table(
    records: &[NormalizedRecord],
    municipality: &str,
    classifications: &[CropClassification],
    stages: &[GrowthStage],
) -> ReportTable {
    let filtered = filter_by_municipality(records, municipality);
    let groups = group_by_barangay(&filtered);

    let rows: Vec<BarangayRow> = groups
        .into_iter()
        .map(|(barangay, group)| BarangayRow {
            cells: RowCells::from_records(&group, classifications, stages),
            barangay,
        })
        .collect();

    let grand_total = RowCells::from_records(&filtered, classifications, stages);

    ReportTable {
        municipality: municipality.to_string(),
        classifications: classifications.to_vec(),
        stages: stages.to_vec(),
        rows,
        grand_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn record(
        barangay: &str,
        classification: CropClassification,
        stage: Option<GrowthStage>,
        area: Decimal,
    ) -> NormalizedRecord {
        NormalizedRecord {
            municipality: "Pototan".to_string(),
            barangay: barangay.to_string(),
            classification,
            stage,
            area,
            production_mt: Decimal::ZERO,
            farmer_id: None,
        }
    }

    #[test]
    fn test_sum_area_by_classification_and_stage() {
        // Two Yellow/vegetative plantings in the same barangay sum to 4.0
        let records = vec![
            record(
                "A",
                CropClassification::Yellow,
                Some(GrowthStage::Vegetative),
                Decimal::new(25, 1),
            ),
            record(
                "A",
                CropClassification::Yellow,
                Some(GrowthStage::Vegetative),
                Decimal::new(15, 1),
            ),
        ];
        let refs: Vec<&NormalizedRecord> = records.iter().collect();
        assert_eq!(
            sum_area(
                &refs,
                &CropClassification::Yellow,
                Some(GrowthStage::Vegetative)
            ),
            Decimal::from(4)
        );
        assert_eq!(
            grand_total(&refs, &CropClassification::Yellow),
            Decimal::from(4)
        );
        assert_eq!(
            sum_area(&refs, &CropClassification::White, None),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_filter_is_exact_match() {
        let mut records = vec![record(
            "A",
            CropClassification::Yellow,
            None,
            Decimal::ONE,
        )];
        records.push(NormalizedRecord {
            municipality: "Pototan Norte".to_string(),
            ..records[0].clone()
        });
        // "Pototan" must not match "Pototan Norte"
        assert_eq!(filter_by_municipality(&records, "Pototan").len(), 1);
        assert_eq!(filter_by_municipality(&records, "pototan").len(), 0);
    }

    #[test]
    fn test_combined_sums_across_classifications() {
        let records = vec![
            record(
                "A",
                CropClassification::White,
                Some(GrowthStage::Maturing),
                Decimal::ONE,
            ),
            record(
                "A",
                CropClassification::Yellow,
                Some(GrowthStage::Maturing),
                Decimal::ONE,
            ),
        ];
        let table = build_report_table(
            &records,
            "Pototan",
            &CropClassification::corn(),
            &GrowthStage::all(),
        );
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].cells.combined.area, Decimal::from(2));
        assert_eq!(table.grand_total.combined.area, Decimal::from(2));
    }

    #[test]
    fn test_barangay_sums_equal_grand_total() {
        let records = vec![
            record(
                "A",
                CropClassification::Yellow,
                Some(GrowthStage::Seedling),
                Decimal::new(12, 1),
            ),
            record(
                "B",
                CropClassification::Yellow,
                Some(GrowthStage::Seedling),
                Decimal::new(33, 1),
            ),
            record(
                "C",
                CropClassification::Yellow,
                Some(GrowthStage::Seedling),
                Decimal::new(5, 1),
            ),
        ];
        let table = build_report_table(
            &records,
            "Pototan",
            &CropClassification::corn(),
            &GrowthStage::all(),
        );
        let row_sum: Decimal = table
            .rows
            .iter()
            .map(|r| r.cells.blocks[0].stage_cells[0].area)
            .sum();
        assert_eq!(row_sum, table.grand_total.blocks[0].stage_cells[0].area);
        assert_eq!(row_sum, Decimal::from(5));
    }

    #[test]
    fn test_empty_records_yield_empty_table() {
        let table = build_report_table(
            &[],
            "Pototan",
            &CropClassification::corn(),
            &GrowthStage::all(),
        );
        assert!(table.rows.is_empty());
        assert!(table.grand_total.combined.is_empty());
    }

    #[test]
    fn test_average_yield_guard() {
        let cell = AggregateCell::new(Decimal::ZERO, Decimal::from(5));
        assert_eq!(cell.average_yield, Decimal::ZERO);

        let cell = AggregateCell::new(Decimal::from(2), Decimal::from(8));
        assert_eq!(cell.average_yield, Decimal::from(4));
    }

    #[test]
    fn test_combine_recomputes_yield() {
        let a = AggregateCell::new(Decimal::from(1), Decimal::from(6));
        let b = AggregateCell::new(Decimal::from(2), Decimal::from(3));
        let combined = AggregateCell::combine([&a, &b]);
        assert_eq!(combined.area, Decimal::from(3));
        assert_eq!(combined.production, Decimal::from(9));
        // 9 / 3, not (6/1 + 3/2)
        assert_eq!(combined.average_yield, Decimal::from(3));
    }

    #[test]
    fn test_distinct_farmer_count() {
        let farmer_a = Uuid::new_v4();
        let farmer_b = Uuid::new_v4();
        let mut records = vec![
            record("A", CropClassification::Hybrid, None, Decimal::ONE),
            record("A", CropClassification::Hybrid, None, Decimal::ONE),
            record("A", CropClassification::Certified, None, Decimal::ONE),
        ];
        records[0].farmer_id = Some(farmer_a);
        records[1].farmer_id = Some(farmer_a);
        records[2].farmer_id = Some(farmer_b);
        let refs: Vec<&NormalizedRecord> = records.iter().collect();
        assert_eq!(count_distinct_farmers(&refs), 2);
    }

    #[test]
    fn test_unstaged_record_counts_in_total_only() {
        let records = vec![record(
            "A",
            CropClassification::Yellow,
            None,
            Decimal::from(2),
        )];
        let table = build_report_table(
            &records,
            "Pototan",
            &CropClassification::corn(),
            &GrowthStage::all(),
        );
        let block = &table.rows[0].cells.blocks[0];
        assert!(block.stage_cells.iter().all(|c| c.area.is_zero()));
        assert_eq!(block.total.area, Decimal::from(2));
    }

    #[test]
    fn test_idempotent_aggregation() {
        let records = vec![
            record(
                "A",
                CropClassification::Yellow,
                Some(GrowthStage::Vegetative),
                Decimal::new(17, 1),
            ),
            record(
                "B",
                CropClassification::White,
                Some(GrowthStage::Maturing),
                Decimal::new(9, 1),
            ),
        ];
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
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
