//! Municipal statistics report core
//!
//! Pure, synchronous aggregation of planting/harvest rows into the nested
//! table shape used by the printable government reports: one row per
//! barangay, one block of columns per crop classification (optionally broken
//! down by growth stage), per-classification totals, a combined column
//! across classifications, and a grand-total row.
//!
//! The pipeline is: fetch joined rows (backend) -> [`normalize`] ->
//! [`build_report_table`] -> [`ReportTable::to_display`] -> render
//! (CSV/HTML). Tables are computed fresh on every request and never
//! persisted. Rows that fail normalization are skipped, not errors: the
//! upstream data entry predates the normalized location tables and cannot be
//! trusted row by row.

mod aggregate;
mod format;
mod record;

pub use aggregate::*;
pub use format::*;
pub use record::*;
