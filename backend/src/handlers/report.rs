//! Report HTTP handlers
//!
//! Every report endpoint serves three renderings of the same computed table:
//! `json` (default), `csv` (download), and `html` (printable document).

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::print::{render_report_html, ReportHeader};
use crate::services::report::{MunicipalReport, ReportFilter, ReportService};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// "json" (default), "csv", or "html"
    pub format: Option<String>,
    pub prepared_by: Option<String>,
    pub certified_by: Option<String>,
    pub noted_by: Option<String>,
}

impl ReportQuery {
    fn filter(&self) -> ReportFilter {
        ReportFilter {
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// Corn standing-crop report for a municipality
pub async fn corn_standing_crop_report(
    State(state): State<AppState>,
    Path(municipality_id): Path<Uuid>,
    Query(query): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ReportService::new(state.db.clone());
    let report = service.corn_standing_crop_report(municipality_id).await?;
    respond(&state, report, &query, "corn_standing_crop.csv")
}

/// Rice planting report for a municipality
pub async fn rice_planting_report(
    State(state): State<AppState>,
    Path(municipality_id): Path<Uuid>,
    Query(query): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ReportService::new(state.db.clone());
    let report = service
        .rice_planting_report(municipality_id, &query.filter())
        .await?;
    respond(&state, report, &query, "rice_planting.csv")
}

/// Rice harvesting report for a municipality
pub async fn rice_harvesting_report(
    State(state): State<AppState>,
    Path(municipality_id): Path<Uuid>,
    Query(query): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ReportService::new(state.db.clone());
    let report = service
        .rice_harvesting_report(municipality_id, &query.filter())
        .await?;
    respond(&state, report, &query, "rice_harvesting.csv")
}

/// Render the computed report in the requested format
fn respond(
    state: &AppState,
    report: MunicipalReport,
    query: &ReportQuery,
    csv_filename: &str,
) -> AppResult<axum::response::Response> {
    match query.format.as_deref() {
        Some("csv") => {
            let csv = ReportService::export_to_csv(&report.display)?;
            let disposition = format!("attachment; filename=\"{}\"", csv_filename);
            Ok((
                [
                    (header::CONTENT_TYPE, "text/csv".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                csv,
            )
                .into_response())
        }
        Some("html") => {
            let report_config = &state.config.report;
            let header = ReportHeader {
                province: report_config.province.clone(),
                office_name: report_config.office_name.clone(),
                prepared_by: query.prepared_by.clone().unwrap_or_default(),
                certified_by: query.certified_by.clone().unwrap_or_default(),
                noted_by: query.noted_by.clone().unwrap_or_default(),
                generated_on: Utc::now().date_naive().to_string(),
            };
            Ok(Html(render_report_html(&report, &header)).into_response())
        }
        _ => Ok(Json(report).into_response()),
    }
}
