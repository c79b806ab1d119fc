//! Municipal statistics report service
//!
//! Fetches joined planting/harvest rows and feeds them through the pure
//! aggregation core in `shared::report`. Every report is recomputed from the
//! current record set on each request; nothing is cached or persisted.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{CropClassification, GrowthStage};
use shared::report::{
    build_report_table, normalize, CellField, DisplayTable, ReportRecord, ReportTable,
};

/// Report service
#[derive(Clone)]
pub struct ReportService {
    db: PgPool,
}

/// Date-range filter for planting/harvesting reports
#[derive(Debug, Default, Deserialize)]
pub struct ReportFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ReportFilter {
    fn range(&self) -> (NaiveDate, NaiveDate) {
        let start = self
            .start_date
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        let end = self
            .end_date
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(2100, 12, 31).unwrap());
        (start, end)
    }

    fn period_label(&self) -> String {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => format!("{} to {}", start, end),
            (Some(start), None) => format!("from {}", start),
            (None, Some(end)) => format!("through {}", end),
            (None, None) => "all dates".to_string(),
        }
    }
}

/// A fully computed municipal report: the numeric table plus its formatted
/// rendering, ready for JSON, CSV, or print
#[derive(Debug, Serialize)]
pub struct MunicipalReport {
    pub title: String,
    pub municipality: String,
    pub period: String,
    pub table: ReportTable,
    pub display: DisplayTable,
}

/// Raw joined row; outer joins can leave any field NULL
#[derive(Debug, sqlx::FromRow)]
struct ReportRecordRow {
    municipality: Option<String>,
    barangay: Option<String>,
    classification: Option<String>,
    growth_stage: Option<String>,
    area_ha: Option<Decimal>,
    production_kg: Option<Decimal>,
    farmer_id: Option<Uuid>,
}

impl From<ReportRecordRow> for ReportRecord {
    fn from(row: ReportRecordRow) -> Self {
        ReportRecord {
            municipality: row.municipality,
            barangay: row.barangay,
            classification: row.classification,
            growth_stage: row.growth_stage,
            area_ha: row.area_ha,
            production_kg: row.production_kg,
            farmer_id: row.farmer_id,
        }
    }
}

impl ReportService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Corn standing-crop report: standing corn by barangay, kernel color,
    /// and growth stage
    pub async fn corn_standing_crop_report(
        &self,
        municipality_id: Uuid,
    ) -> AppResult<MunicipalReport> {
        let municipality = self.municipality_name(municipality_id).await?;

        let rows = sqlx::query_as::<_, ReportRecordRow>(
            r#"
            SELECT m.name as municipality, b.name as barangay, p.classification,
                   p.growth_stage, p.area_planted_ha as area_ha,
                   NULL::numeric as production_kg, p.farmer_id
            FROM plantings p
            LEFT JOIN barangays b ON b.id = p.barangay_id
            LEFT JOIN municipalities m ON m.id = b.municipality_id
            WHERE p.commodity = 'corn'
              AND p.status = 'standing'
              AND b.municipality_id = $1
            "#,
        )
        .bind(municipality_id)
        .fetch_all(&self.db)
        .await?;

        let records = normalize(&Self::to_records(rows));
        let table = build_report_table(
            &records,
            &municipality,
            &CropClassification::corn(),
            &GrowthStage::all(),
        );
        let display = table.to_display(&[CellField::Area], false);

        Ok(MunicipalReport {
            title: "Corn Standing Crop Report".to_string(),
            municipality,
            period: format!("as of {}", Utc::now().date_naive()),
            table,
            display,
        })
    }

    /// Rice planting report: rice plantings in a date range by barangay and
    /// seed classification
    pub async fn rice_planting_report(
        &self,
        municipality_id: Uuid,
        filter: &ReportFilter,
    ) -> AppResult<MunicipalReport> {
        let municipality = self.municipality_name(municipality_id).await?;
        let (start, end) = filter.range();

        let rows = sqlx::query_as::<_, ReportRecordRow>(
            r#"
            SELECT m.name as municipality, b.name as barangay, p.classification,
                   NULL::text as growth_stage, p.area_planted_ha as area_ha,
                   NULL::numeric as production_kg, p.farmer_id
            FROM plantings p
            LEFT JOIN barangays b ON b.id = p.barangay_id
            LEFT JOIN municipalities m ON m.id = b.municipality_id
            WHERE p.commodity = 'rice'
              AND p.date_planted BETWEEN $2 AND $3
              AND b.municipality_id = $1
            "#,
        )
        .bind(municipality_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.db)
        .await?;

        let records = normalize(&Self::to_records(rows));
        let table = build_report_table(&records, &municipality, &CropClassification::rice(), &[]);
        let display = table.to_display(&[CellField::Area], true);

        Ok(MunicipalReport {
            title: "Rice Planting Report".to_string(),
            municipality,
            period: filter.period_label(),
            table,
            display,
        })
    }

    /// Rice harvesting report: rice harvests in a date range by barangay and
    /// seed classification, with production and average yield
    pub async fn rice_harvesting_report(
        &self,
        municipality_id: Uuid,
        filter: &ReportFilter,
    ) -> AppResult<MunicipalReport> {
        let municipality = self.municipality_name(municipality_id).await?;
        let (start, end) = filter.range();

        let rows = sqlx::query_as::<_, ReportRecordRow>(
            r#"
            SELECT m.name as municipality, b.name as barangay, p.classification,
                   NULL::text as growth_stage, h.area_harvested_ha as area_ha,
                   h.production_kg, h.farmer_id
            FROM harvests h
            JOIN plantings p ON p.id = h.planting_id
            LEFT JOIN barangays b ON b.id = p.barangay_id
            LEFT JOIN municipalities m ON m.id = b.municipality_id
            WHERE p.commodity = 'rice'
              AND h.date_harvested BETWEEN $2 AND $3
              AND b.municipality_id = $1
            "#,
        )
        .bind(municipality_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.db)
        .await?;

        let records = normalize(&Self::to_records(rows));
        let table = build_report_table(&records, &municipality, &CropClassification::rice(), &[]);
        let display = table.to_display(
            &[CellField::Area, CellField::Production, CellField::AverageYield],
            true,
        );

        Ok(MunicipalReport {
            title: "Rice Harvesting Report".to_string(),
            municipality,
            period: filter.period_label(),
            table,
            display,
        })
    }

    /// Export a formatted report table as CSV
    pub fn export_to_csv(display: &DisplayTable) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);

        wtr.write_record(&display.columns)
            .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        for row in display.rows.iter().chain(std::iter::once(&display.totals)) {
            let record: Vec<&str> = std::iter::once(row.label.as_str())
                .chain(row.values.iter().map(String::as_str))
                .collect();
            wtr.write_record(&record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }

        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }

    async fn municipality_name(&self, municipality_id: Uuid) -> AppResult<String> {
        sqlx::query_scalar::<_, String>("SELECT name FROM municipalities WHERE id = $1")
            .bind(municipality_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Municipality".to_string()))
    }

    fn to_records(rows: Vec<ReportRecordRow>) -> Vec<ReportRecord> {
        rows.into_iter().map(ReportRecord::from).collect()
    }
}
