//! pm_report: pure offline exports (JSON/CSV/HTML).
//!
//! Rules:
//! - No I/O here. Callers write the returned strings (atomically, via pm_io).
//! - Stable field order: JSON keys follow struct layout, CSV columns are fixed.
//! - Percentages are shown with two decimals.

#![deny(unsafe_code)]

use serde::Serialize;
use thiserror::Error;

use pm_core::{Ideology, Party, PartyId};

#[cfg(feature = "render_html")]
mod render_html;
#[cfg(feature = "render_html")]
pub use render_html::{render_html, ResultsPage};

/// Default file names for each export.
pub const JSON_EXPORT_FILE: &str = "parliament_simulation.json";
pub const CSV_EXPORT_FILE: &str = "parliament_data.csv";
pub const HTML_EXPORT_FILE: &str = "parliament_results.html";

const CSV_HEADER: &str = "id,name,seats,color,ideology";

// ===== Errors =====
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("json export failed: {0}")]
    Json(String),
    #[error("csv export failed: {0}")]
    Csv(String),
    #[error("template error: {0}")]
    Template(String),
}

// ===== Model =====

/// The exported subset of a party record.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExportParty<'a> {
    pub id: &'a PartyId,
    pub name: &'a str,
    pub seats: u32,
    pub color: &'a str,
    pub ideology: Ideology,
}

impl<'a> From<&'a Party> for ExportParty<'a> {
    fn from(p: &'a Party) -> Self {
        Self { id: &p.id, name: &p.name, seats: p.seats, color: &p.color, ideology: p.ideology }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot<'a> {
    total_seats: u32,
    parties: Vec<ExportParty<'a>>,
}

// ===== Renderers =====

/// `{ "totalSeats", "parties": [{id,name,seats,color,ideology}] }`, pretty-printed.
pub fn render_json(total_seats: u32, parties: &[Party]) -> Result<String, ReportError> {
    let snap = Snapshot { total_seats, parties: parties.iter().map(ExportParty::from).collect() };
    serde_json::to_string_pretty(&snap).map_err(|e| ReportError::Json(e.to_string()))
}

/// Party table as CSV: plain header, text fields always quoted, `seats`
/// bare, CRLF between rows and no trailing line break. No parties → empty string.
pub fn render_csv(parties: &[Party]) -> Result<String, ReportError> {
    if parties.is_empty() {
        return Ok(String::new());
    }
    let mut out = String::from(CSV_HEADER);
    for p in parties {
        out.push_str("\r\n");
        out.push_str(&format!(
            "{},{},{},{},{}",
            quoted(p.id.as_str())?,
            quoted(&p.name)?,
            p.seats,
            quoted(&p.color)?,
            quoted(p.ideology.label())?
        ));
    }
    Ok(out)
}

/// One CSV text field, quoted with embedded quotes doubled.
fn quoted(field: &str) -> Result<String, ReportError> {
    let mut w = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());
    w.write_record([field]).map_err(|e| ReportError::Csv(e.to_string()))?;
    let bytes = w.into_inner().map_err(|e| ReportError::Csv(e.to_string()))?;
    let s = String::from_utf8(bytes).map_err(|e| ReportError::Csv(e.to_string()))?;
    Ok(s.strip_suffix("\r\n").unwrap_or(&s).to_owned())
}

/// Two-decimal percent string, e.g. `45.00`.
pub fn format_pct_2dp(pct: f64) -> String {
    if pct.is_finite() {
        format!("{pct:.2}")
    } else {
        "0.00".to_string()
    }
}
