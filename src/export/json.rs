//! Structured document export

use serde::Serialize;

use super::dataset::{serialize_amount, ExportRow, DATA_VERSION};
use super::ExportError;

pub const DESCRIPTION: &str = "RFP Analytics Dataset - Comprehensive metrics for pipeline analysis";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportMetadata {
    pub export_date: String,
    pub total_records: usize,
    pub data_version: &'static str,
    pub description: &'static str,
}

/// Totals computed over the export rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryMetrics {
    pub total_rfps: usize,
    pub won_rfps: usize,
    pub lost_rfps: usize,
    pub pending_rfps: usize,
    #[serde(serialize_with = "serialize_amount")]
    pub total_value: f64,
    #[serde(serialize_with = "serialize_amount")]
    pub won_value: f64,
    /// Rounded mean of the available cycle times; 0 when none are known
    pub average_cycle_time: i64,
}

impl SummaryMetrics {
    pub fn from_rows(rows: &[ExportRow]) -> Self {
        let cycles: Vec<i64> = rows
            .iter()
            .filter_map(|r| r.total_cycle_time.value().copied())
            .collect();
        let average_cycle_time = if cycles.is_empty() {
            0
        } else {
            (cycles.iter().sum::<i64>() as f64 / cycles.len() as f64).round() as i64
        };

        Self {
            total_rfps: rows.len(),
            won_rfps: rows.iter().filter(|r| r.is_won).count(),
            lost_rfps: rows.iter().filter(|r| r.is_lost).count(),
            pending_rfps: rows.iter().filter(|r| r.is_pending).count(),
            total_value: rows.iter().map(|r| r.estimated_value).sum(),
            won_value: rows.iter().map(|r| r.actual_value).sum(),
            average_cycle_time,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExportDocument<'a> {
    pub metadata: ExportMetadata,
    pub summary_metrics: SummaryMetrics,
    pub rfp_data: &'a [ExportRow],
}

impl<'a> ExportDocument<'a> {
    pub fn new(rows: &'a [ExportRow], export_date: String) -> Self {
        Self {
            metadata: ExportMetadata {
                export_date,
                total_records: rows.len(),
                data_version: DATA_VERSION,
                description: DESCRIPTION,
            },
            summary_metrics: SummaryMetrics::from_rows(rows),
            rfp_data: rows,
        }
    }
}

/// Pretty-printed document; the metadata timestamp is the rows' export date
pub fn render_json(rows: &[ExportRow], export_date: String) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&ExportDocument::new(rows, export_date))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loader::sample_rfps;
    use crate::export::dataset::build_dataset;
    use chrono::{TimeZone, Utc};
    use serde_json::Value;

    const STAMP: &str = "2024-10-14T09:30:00.000Z";

    fn rows() -> Vec<ExportRow> {
        let at = Utc.with_ymd_and_hms(2024, 10, 14, 9, 30, 0).unwrap();
        build_dataset(&sample_rfps().unwrap(), at)
    }

    #[test]
    fn test_sample_summary_metrics() {
        let summary = SummaryMetrics::from_rows(&rows());

        assert_eq!(summary.total_rfps, 8);
        assert_eq!(summary.won_rfps, 3);
        assert_eq!(summary.lost_rfps, 0);
        assert_eq!(summary.pending_rfps, 5);
        assert_eq!(summary.total_value, 143_000.0);
        assert_eq!(summary.won_value, 92_000.0);
        // Cycle times 11, 13 and 13
        assert_eq!(summary.average_cycle_time, 12);
    }

    #[test]
    fn test_empty_summary_is_zeroed() {
        let summary = SummaryMetrics::from_rows(&[]);
        assert_eq!(summary.total_rfps, 0);
        assert_eq!(summary.average_cycle_time, 0);
    }

    #[test]
    fn test_document_shape() {
        let rows = rows();
        let doc: Value = serde_json::from_str(&render_json(&rows, STAMP.into()).unwrap()).unwrap();

        assert_eq!(doc["metadata"]["export_date"], STAMP);
        assert_eq!(doc["metadata"]["total_records"], 8);
        assert_eq!(doc["metadata"]["data_version"], "1.0");
        assert_eq!(doc["metadata"]["description"], DESCRIPTION);
        assert_eq!(doc["summary_metrics"]["total_value"], 143000);
        assert_eq!(
            doc["summary_metrics"]["total_rfps"],
            doc["rfp_data"].as_array().unwrap().len()
        );

        let first = &doc["rfp_data"][0];
        assert_eq!(first["rfp_id"], "RFP001");
        assert_eq!(first["days_to_quote"], 2);
        assert_eq!(first["is_won"], true);
        assert_eq!(doc["rfp_data"][1]["quotation_date"], "N/A");
        assert_eq!(doc["rfp_data"][1]["quote_response_time_category"], "N/A");
    }

    #[test]
    fn test_row_keys_follow_field_order() {
        let rows = rows();
        let json = render_json(&rows, STAMP.into()).unwrap();
        let data = &json[json.find("\"rfp_data\"").unwrap()..];
        let positions: Vec<usize> = ExportRow::FIELDS
            .iter()
            .map(|f| data.find(&format!("\"{}\":", f)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
