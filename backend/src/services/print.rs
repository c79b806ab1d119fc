//! Printable report rendering
//!
//! Serializes a fully formatted report into a standalone HTML document:
//! inline styles, fixed landscape page size, no scripts, no external assets.
//! The browser opens it in a new window and hands it to the print dialog;
//! this module only produces the document string.

use std::fmt::Write as _;

use serde::Deserialize;

use super::report::MunicipalReport;

/// Static header and signature-block fields stamped on every printed report
#[derive(Debug, Clone, Deserialize)]
pub struct ReportHeader {
    pub province: String,
    pub office_name: String,
    pub prepared_by: String,
    pub certified_by: String,
    pub noted_by: String,
    /// Generation date as printed, e.g. `2024-09-30`
    pub generated_on: String,
}

/// Escape text for HTML
fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

const STYLE: &str = r#"
@page { size: A4 landscape; margin: 12mm; }
body { font-family: Arial, Helvetica, sans-serif; font-size: 11px; color: #000; }
header { text-align: center; margin-bottom: 12px; }
header .office { font-size: 13px; font-weight: bold; text-transform: uppercase; }
header .province { font-size: 12px; }
header .title { font-size: 14px; font-weight: bold; margin-top: 8px; text-transform: uppercase; }
header .meta { font-size: 11px; margin-top: 2px; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #000; padding: 3px 5px; }
th { background: #eee; text-align: center; }
td.num { text-align: right; }
td.label { text-align: left; }
tr.totals td { font-weight: bold; }
.signatures { display: flex; justify-content: space-between; margin-top: 36px; }
.signatures div { width: 30%; text-align: center; }
.signatures .line { border-top: 1px solid #000; margin-top: 28px; padding-top: 3px; font-weight: bold; }
.signatures .role { font-size: 10px; }
"#;

/// Render a computed report into a complete printable HTML document.
///
/// Every cell value arrives already formatted (empty string for zero); this
/// function never reformats or re-derives numbers.
pub fn render_report_html(report: &MunicipalReport, header: &ReportHeader) -> String {
    let mut doc = String::with_capacity(16 * 1024);

    let _ = write!(
        doc,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n",
        esc(&report.title),
        STYLE
    );

    // Header block
    let _ = write!(
        doc,
        "<header>\n<div class=\"province\">{}</div>\n<div class=\"office\">{}</div>\n<div class=\"title\">{}</div>\n<div class=\"meta\">Municipality of {} &middot; {}</div>\n</header>\n",
        esc(&header.province),
        esc(&header.office_name),
        esc(&report.title),
        esc(&report.municipality),
        esc(&report.period),
    );

    // Data table
    doc.push_str("<table>\n<thead>\n<tr>");
    for column in &report.display.columns {
        let _ = write!(doc, "<th>{}</th>", esc(column));
    }
    doc.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in &report.display.rows {
        doc.push_str("<tr>");
        let _ = write!(doc, "<td class=\"label\">{}</td>", esc(&row.label));
        for value in &row.values {
            let _ = write!(doc, "<td class=\"num\">{}</td>", esc(value));
        }
        doc.push_str("</tr>\n");
    }

    doc.push_str("<tr class=\"totals\">");
    let _ = write!(
        doc,
        "<td class=\"label\">{}</td>",
        esc(&report.display.totals.label)
    );
    for value in &report.display.totals.values {
        let _ = write!(doc, "<td class=\"num\">{}</td>", esc(value));
    }
    doc.push_str("</tr>\n</tbody>\n</table>\n");

    // Signature block
    let _ = write!(
        doc,
        "<div class=\"signatures\">\n<div><div class=\"role\">Prepared by:</div><div class=\"line\">{}</div></div>\n<div><div class=\"role\">Certified correct:</div><div class=\"line\">{}</div></div>\n<div><div class=\"role\">Noted by:</div><div class=\"line\">{}</div></div>\n</div>\n",
        esc(&header.prepared_by),
        esc(&header.certified_by),
        esc(&header.noted_by),
    );

    let _ = write!(
        doc,
        "<div class=\"meta\">Generated on {}</div>\n</body>\n</html>\n",
        esc(&header.generated_on)
    );

    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::report::{DisplayRow, DisplayTable};

    fn sample_report() -> MunicipalReport {
        use shared::models::CropClassification;
        use shared::report::build_report_table;

        let table = build_report_table(&[], "Dingle", &CropClassification::rice(), &[]);
        let display = DisplayTable {
            columns: vec!["Barangay".to_string(), "Hybrid - Area (ha)".to_string()],
            rows: vec![DisplayRow {
                label: "Abangay <North>".to_string(),
                values: vec!["2.5000".to_string()],
            }],
            totals: DisplayRow {
                label: "GRAND TOTAL".to_string(),
                values: vec![String::new()],
            },
        };
        MunicipalReport {
            title: "Rice Planting Report".to_string(),
            municipality: "Dingle".to_string(),
            period: "2024-09-01 to 2024-09-30".to_string(),
            table,
            display,
        }
    }

    fn sample_header() -> ReportHeader {
        ReportHeader {
            province: "Province of Iloilo".to_string(),
            office_name: "Office of the Provincial Agriculturist".to_string(),
            prepared_by: "Juana Dela Cruz".to_string(),
            certified_by: "Jose Rizal".to_string(),
            noted_by: "Andres Bonifacio".to_string(),
            generated_on: "2024-09-30".to_string(),
        }
    }

    #[test]
    fn test_renders_complete_document() {
        let html = render_report_html(&sample_report(), &sample_header());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.ends_with("</html>\n"));
        assert!(html.contains("Rice Planting Report"));
        assert!(html.contains("Municipality of Dingle"));
        assert!(html.contains("size: A4 landscape"));
    }

    #[test]
    fn test_escapes_cell_content() {
        let html = render_report_html(&sample_report(), &sample_header());
        assert!(html.contains("Abangay &lt;North&gt;"));
        assert!(!html.contains("Abangay <North>"));
    }

    #[test]
    fn test_blank_cells_stay_blank() {
        let html = render_report_html(&sample_report(), &sample_header());
        // The totals cell is empty, not "0.0000"
        assert!(html.contains("<td class=\"num\"></td>"));
        assert!(!html.contains("0.0000</td></tr>\n</tbody>"));
    }

    #[test]
    fn test_signature_block_fields() {
        let html = render_report_html(&sample_report(), &sample_header());
        assert!(html.contains("Juana Dela Cruz"));
        assert!(html.contains("Certified correct:"));
        assert!(html.contains("Generated on 2024-09-30"));
    }
}
