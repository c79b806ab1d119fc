//! Display formatting for report tables
//!
//! The printed reports leave zero cells visually blank instead of printing a
//! grid of `0.0000`. That rule lives here, at the display boundary; the
//! aggregator itself always returns numeric zeros.

use rust_decimal::Decimal;
use serde::Serialize;

use super::aggregate::{AggregateCell, ReportTable, RowCells};

/// Which values of an [`AggregateCell`] a report displays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellField {
    Area,
    Production,
    AverageYield,
}

impl CellField {
    fn label(&self) -> &'static str {
        match self {
            CellField::Area => "Area (ha)",
            CellField::Production => "Production (MT)",
            CellField::AverageYield => "Ave Yield (MT/ha)",
        }
    }

    fn value(&self, cell: &AggregateCell) -> Decimal {
        match self {
            CellField::Area => cell.area,
            CellField::Production => cell.production,
            CellField::AverageYield => cell.average_yield,
        }
    }
}

/// Format a quantity to four decimal places, blanking zeros.
pub fn format_quantity(value: Decimal) -> String {
    let rounded = value.round_dp(4);
    if rounded.is_zero() {
        String::new()
    } else {
        format!("{:.4}", rounded)
    }
}

/// Format a count, blanking zeros like the quantity cells.
pub fn format_count(value: usize) -> String {
    if value == 0 {
        String::new()
    } else {
        value.to_string()
    }
}

/// A display-ready row: the barangay (or totals) label plus one string per
/// data column
#[derive(Debug, Clone, Serialize)]
pub struct DisplayRow {
    pub label: String,
    pub values: Vec<String>,
}

/// A fully formatted table: every cell is a display-ready string, empty for
/// zero. This is the contract the print renderer and CSV export consume.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayTable {
    pub columns: Vec<String>,
    pub rows: Vec<DisplayRow>,
    pub totals: DisplayRow,
}

impl ReportTable {
    /// Flatten the numeric table into formatted strings.
    ///
    /// Column layout per classification block: one column per requested
    /// growth stage (staged reports carry a single field), followed by the
    /// block total; stage-less reports emit one column per field instead.
    /// A combined column across classifications comes after the blocks, and
    /// optionally a distinct-farmer count.
    pub fn to_display(&self, fields: &[CellField], include_farmer_count: bool) -> DisplayTable {
        let mut columns = vec!["Barangay".to_string()];
        for classification in &self.classifications {
            if self.stages.is_empty() {
                for field in fields {
                    columns.push(format!("{} - {}", classification, field.label()));
                }
            } else {
                for stage in &self.stages {
                    columns.push(format!("{} - {}", classification, stage.label()));
                }
                columns.push(format!("{} - Total", classification));
            }
        }
        if fields.len() == 1 || self.stages.is_empty() {
            for field in fields {
                columns.push(format!("Grand Total - {}", field.label()));
            }
        } else {
            columns.push("Grand Total".to_string());
        }
        if include_farmer_count {
            columns.push("No. of Farmers".to_string());
        }

        let rows = self
            .rows
            .iter()
            .map(|row| DisplayRow {
                label: row.barangay.clone(),
                values: self.format_cells(&row.cells, fields, include_farmer_count),
            })
            .collect();

        let totals = DisplayRow {
            label: "GRAND TOTAL".to_string(),
            values: self.format_cells(&self.grand_total, fields, include_farmer_count),
        };

        DisplayTable {
            columns,
            rows,
            totals,
        }
    }

    fn format_cells(
        &self,
        cells: &RowCells,
        fields: &[CellField],
        include_farmer_count: bool,
    ) -> Vec<String> {
        let mut values = Vec::new();
        for block in &cells.blocks {
            if self.stages.is_empty() {
                for field in fields {
                    values.push(format_quantity(field.value(&block.total)));
                }
            } else {
                for cell in &block.stage_cells {
                    values.push(format_quantity(CellField::Area.value(cell)));
                }
                values.push(format_quantity(CellField::Area.value(&block.total)));
            }
        }
        if self.stages.is_empty() {
            for field in fields {
                values.push(format_quantity(field.value(&cells.combined)));
            }
        } else {
            values.push(format_quantity(CellField::Area.value(&cells.combined)));
        }
        if include_farmer_count {
            values.push(format_count(cells.farmers));
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CropClassification, GrowthStage};
    use crate::report::{build_report_table, NormalizedRecord};

    #[test]
    fn test_format_quantity_rounding() {
        assert_eq!(format_quantity(Decimal::new(123456, 5)), "1.2346");
        assert_eq!(format_quantity(Decimal::from(4)), "4.0000");
    }

    #[test]
    fn test_format_quantity_blanks_zero() {
        assert_eq!(format_quantity(Decimal::ZERO), "");
        // 0.00001 rounds to 0.0000 and is blanked
        assert_eq!(format_quantity(Decimal::new(1, 5)), "");
    }

    #[test]
    fn test_format_count_blanks_zero() {
        assert_eq!(format_count(0), "");
        assert_eq!(format_count(12), "12");
    }

    fn record(barangay: &str, area: Decimal) -> NormalizedRecord {
        NormalizedRecord {
            municipality: "Dingle".to_string(),
            barangay: barangay.to_string(),
            classification: CropClassification::Yellow,
            stage: Some(GrowthStage::Vegetative),
            area,
            production_mt: Decimal::ZERO,
            farmer_id: None,
        }
    }

    #[test]
    fn test_display_blanks_empty_cells() {
        let records = vec![record("Abangay", Decimal::new(25, 1))];
        let table = build_report_table(
            &records,
            "Dingle",
            &CropClassification::corn(),
            &GrowthStage::all(),
        );
        let display = table.to_display(&[CellField::Area], false);

        assert_eq!(display.rows.len(), 1);
        let row = &display.rows[0];
        assert_eq!(row.label, "Abangay");
        // Columns: 4 Yellow stages + total, 4 White stages + total, grand total
        assert_eq!(row.values.len(), 11);
        assert_eq!(row.values[1], "2.5000"); // Yellow - Vegetative
        assert_eq!(row.values[0], ""); // Yellow - Seedling is blank
        assert!(row.values[5..10].iter().all(String::is_empty)); // White block blank
        assert_eq!(display.totals.values[10], "2.5000");
    }

    #[test]
    fn test_empty_table_formats_all_blank() {
        let table = build_report_table(
            &[],
            "Dingle",
            &CropClassification::rice(),
            &[],
        );
        let display = table.to_display(
            &[CellField::Area, CellField::Production, CellField::AverageYield],
            true,
        );
        assert!(display.rows.is_empty());
        assert!(display.totals.values.iter().all(String::is_empty));
    }

    #[test]
    fn test_column_count_matches_row_width() {
        let records = vec![record("Abangay", Decimal::ONE)];
        let table = build_report_table(
            &records,
            "Dingle",
            &CropClassification::corn(),
            &GrowthStage::all(),
        );
        let display = table.to_display(&[CellField::Area], false);
        for row in display.rows.iter().chain(std::iter::once(&display.totals)) {
            // +1 for the barangay label column
            assert_eq!(row.values.len() + 1, display.columns.len());
        }
    }
}
