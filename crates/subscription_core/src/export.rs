//! crates/subscription_core/src/export.rs
//!
//! Renders records as a downloadable CSV table or pretty-printed JSON.

use crate::domain::SubscriptionRecord;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Export buffer error: {0}")]
    Buffer(String),
}

const CSV_HEADER: [&str; 10] = [
    "id",
    "serviceName",
    "category",
    "status",
    "billingCycle",
    "monthlyCost",
    "startDate",
    "renewalDate",
    "usage",
    "notes",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "subscriptions.csv",
            ExportFormat::Json => "subscriptions.json",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }

    pub fn render(&self, records: &[SubscriptionRecord]) -> Result<ExportFile, ExportError> {
        let body = match self {
            ExportFormat::Csv => to_csv(records)?,
            ExportFormat::Json => to_json(records)?,
        };
        Ok(ExportFile {
            file_name: self.file_name(),
            content_type: self.content_type(),
            bytes: body.into_bytes(),
        })
    }
}

/// A rendered export plus the filename a browser should save it under.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: &'static str,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// One unquoted header row, then one fully quoted row per record. Rows are
/// separated by `\n` with no trailing newline.
pub fn to_csv(records: &[SubscriptionRecord]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for r in records {
        writer.write_record([
            r.id.clone(),
            r.service_name.clone(),
            r.category.as_str().to_string(),
            r.status.as_str().to_string(),
            r.billing_cycle.as_str().to_string(),
            r.monthly_cost.to_string(),
            r.start_date.map(|d| d.to_string()).unwrap_or_default(),
            r.renewal_date.map(|d| d.to_string()).unwrap_or_default(),
            r.usage.map(|u| u.to_string()).unwrap_or_default(),
            r.notes.clone().unwrap_or_default(),
        ])?;
    }

    let rows = writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;
    let rows = String::from_utf8(rows).map_err(|e| ExportError::Buffer(e.to_string()))?;

    let mut out = CSV_HEADER.join(",");
    if !rows.is_empty() {
        out.push('\n');
        out.push_str(rows.trim_end_matches('\n'));
    }
    Ok(out)
}

pub fn to_json(records: &[SubscriptionRecord]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(records)?)
}
