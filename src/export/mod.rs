//! Dataset export to CSV and JSON files

pub mod csv;
pub mod dataset;
pub mod json;

pub use dataset::{build_dataset, ExportRow, OrNa, SpeedCategory};
pub use json::{ExportDocument, SummaryMetrics};

use chrono::{DateTime, SecondsFormat, Utc};
use clap::ValueEnum;
use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::entities::Rfp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Dated file name, e.g. `rfp_metrics_dataset_2024-10-14.csv`
    pub fn file_name(&self, exported_at: DateTime<Utc>) -> String {
        let date = exported_at.format("%Y-%m-%d");
        match self {
            ExportFormat::Csv => format!("rfp_metrics_dataset_{}.csv", date),
            ExportFormat::Json => format!("rfp_analytics_{}.json", date),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum ExportError {
    #[error("CSV serialization failed")]
    #[diagnostic(code(rfp::export::csv))]
    Csv(#[from] ::csv::Error),

    #[error("JSON serialization failed")]
    #[diagnostic(code(rfp::export::json))]
    Json(#[from] serde_json::Error),

    #[error("export output is not valid UTF-8: {0}")]
    #[diagnostic(code(rfp::export::encoding))]
    Encoding(String),

    #[error("failed to write {path:?}")]
    #[diagnostic(
        code(rfp::export::io),
        help("check that the output directory exists and is writable")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written { path: PathBuf, records: usize },
    /// The collection was empty; no file was created
    NothingToExport,
}

/// Render the records in `format`, stamping every row with `exported_at`
pub fn render(
    rfps: &[Rfp],
    format: ExportFormat,
    exported_at: DateTime<Utc>,
) -> Result<String, ExportError> {
    let rows = build_dataset(rfps, exported_at);
    match format {
        ExportFormat::Csv => self::csv::render_csv(&rows),
        ExportFormat::Json => json::render_json(
            &rows,
            exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
    }
}

/// Write a dated export file into `dir`, creating it if needed
pub fn export_to_dir(
    rfps: &[Rfp],
    format: ExportFormat,
    dir: &Path,
    exported_at: DateTime<Utc>,
) -> Result<ExportOutcome, ExportError> {
    if rfps.is_empty() {
        info!(%format, "no RFP records to export");
        return Ok(ExportOutcome::NothingToExport);
    }

    let contents = render(rfps, format, exported_at)?;
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| ExportError::Io { path, source }
    };

    std::fs::create_dir_all(dir).map_err(io_err(dir))?;
    let path = dir.join(format.file_name(exported_at));
    std::fs::write(&path, contents).map_err(io_err(&path))?;

    info!(path = %path.display(), records = rfps.len(), %format, "export written");
    Ok(ExportOutcome::Written {
        path,
        records: rfps.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loader::sample_rfps;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 14, 23, 59, 59).unwrap()
    }

    #[test]
    fn test_file_names() {
        assert_eq!(
            ExportFormat::Csv.file_name(at()),
            "rfp_metrics_dataset_2024-10-14.csv"
        );
        assert_eq!(ExportFormat::Json.file_name(at()), "rfp_analytics_2024-10-14.json");
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("exports");
        let rfps = sample_rfps().unwrap();

        let outcome = export_to_dir(&rfps, ExportFormat::Csv, &out, at()).unwrap();
        let expected = out.join("rfp_metrics_dataset_2024-10-14.csv");
        assert_eq!(
            outcome,
            ExportOutcome::Written {
                path: expected.clone(),
                records: 8
            }
        );
        assert_eq!(std::fs::read_to_string(expected).unwrap().lines().count(), 9);
    }

    #[test]
    fn test_empty_collection_writes_nothing() {
        let dir = tempdir().unwrap();
        let outcome = export_to_dir(&[], ExportFormat::Json, dir.path(), at()).unwrap();

        assert_eq!(outcome, ExportOutcome::NothingToExport);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_csv_and_json_agree() {
        let rfps = sample_rfps().unwrap();
        let csv_text = render(&rfps, ExportFormat::Csv, at()).unwrap();
        let doc: serde_json::Value =
            serde_json::from_str(&render(&rfps, ExportFormat::Json, at()).unwrap()).unwrap();

        let mut reader = ::csv::Reader::from_reader(csv_text.as_bytes());
        let records: Vec<::csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        let rows = doc["rfp_data"].as_array().unwrap();
        assert_eq!(records.len(), rows.len());

        for (record, row) in records.iter().zip(rows) {
            for (field, cell) in ExportRow::FIELDS.iter().zip(record.iter()) {
                let expected = match &row[*field] {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                assert_eq!(cell, expected, "field {field} differs");
            }
        }
    }
}
