//! Flattened per-record export rows

use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::collections::HashMap;

use crate::analytics::{days_between, percentage};
use crate::entities::{Outcome, Rfp, RfpStatus};

/// Version tag carried by every exported row and document
pub const DATA_VERSION: &str = "1.0";

/// Placeholder written for missing dates and day-counts
pub const NOT_AVAILABLE: &str = "N/A";

/// A value that exports as itself, or as "N/A" when absent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrNa<T> {
    Value(T),
    NotAvailable,
}

impl<T> OrNa<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            OrNa::Value(v) => Some(v),
            OrNa::NotAvailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, OrNa::Value(_))
    }
}

impl<T> From<Option<T>> for OrNa<T> {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(OrNa::NotAvailable, OrNa::Value)
    }
}

impl<T: std::fmt::Display> std::fmt::Display for OrNa<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrNa::Value(v) => write!(f, "{}", v),
            OrNa::NotAvailable => write!(f, "{}", NOT_AVAILABLE),
        }
    }
}

impl<T: Serialize> Serialize for OrNa<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            OrNa::Value(v) => v.serialize(serializer),
            OrNa::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

/// Turnaround speed band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpeedCategory {
    Fast,
    Average,
    Slow,
}

impl SpeedCategory {
    /// Quote turnaround: up to 2 days is fast, up to 5 average
    pub fn for_quote(days: i64) -> Self {
        Self::banded(days, 2, 5)
    }

    /// Delivery turnaround: up to 7 days is fast, up to 14 average
    pub fn for_delivery(days: i64) -> Self {
        Self::banded(days, 7, 14)
    }

    fn banded(days: i64, fast: i64, average: i64) -> Self {
        if days <= fast {
            SpeedCategory::Fast
        } else if days <= average {
            SpeedCategory::Average
        } else {
            SpeedCategory::Slow
        }
    }
}

impl std::fmt::Display for SpeedCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpeedCategory::Fast => write!(f, "Fast"),
            SpeedCategory::Average => write!(f, "Average"),
            SpeedCategory::Slow => write!(f, "Slow"),
        }
    }
}

/// Writes whole amounts as integers so exports read `15000`, not `15000.0`
pub(crate) fn serialize_amount<S>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if amount.is_finite() && amount.fract() == 0.0 && amount.abs() < MAX_EXACT {
        serializer.serialize_i64(*amount as i64)
    } else {
        serializer.serialize_f64(*amount)
    }
}

/// One flattened export row
///
/// Field order is the column order of the tabular export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub rfp_id: String,
    pub client_name: String,
    pub product_type: String,
    pub assigned_to: String,
    pub current_status: RfpStatus,

    pub submission_date: NaiveDate,
    pub quotation_date: OrNa<NaiveDate>,
    pub order_date: OrNa<NaiveDate>,
    pub delivery_date: OrNa<NaiveDate>,

    #[serde(serialize_with = "serialize_amount")]
    pub estimated_value: f64,
    /// Value realised; 0 unless the RFP was won
    #[serde(serialize_with = "serialize_amount")]
    pub actual_value: f64,

    pub days_to_quote: OrNa<i64>,
    pub days_to_order: OrNa<i64>,
    pub days_to_deliver: OrNa<i64>,
    pub total_cycle_time: OrNa<i64>,

    pub is_won: bool,
    pub is_lost: bool,
    pub is_pending: bool,
    pub win_probability: u8,

    pub quote_submitted: bool,
    pub order_received: bool,
    pub delivery_completed: bool,

    pub quote_response_time_category: OrNa<SpeedCategory>,
    pub delivery_time_category: OrNa<SpeedCategory>,

    pub quarter: String,
    pub month: String,
    pub week_of_year: u32,

    pub team_workload: usize,
    pub team_success_rate: u32,

    pub export_date: String,
    pub data_version: &'static str,
}

impl ExportRow {
    /// Column names in export order
    pub const FIELDS: [&'static str; 31] = [
        "rfp_id",
        "client_name",
        "product_type",
        "assigned_to",
        "current_status",
        "submission_date",
        "quotation_date",
        "order_date",
        "delivery_date",
        "estimated_value",
        "actual_value",
        "days_to_quote",
        "days_to_order",
        "days_to_deliver",
        "total_cycle_time",
        "is_won",
        "is_lost",
        "is_pending",
        "win_probability",
        "quote_submitted",
        "order_received",
        "delivery_completed",
        "quote_response_time_category",
        "delivery_time_category",
        "quarter",
        "month",
        "week_of_year",
        "team_workload",
        "team_success_rate",
        "export_date",
        "data_version",
    ];
}

/// Workload and win count per team, taken over the whole collection
#[derive(Debug, Default, Clone, Copy)]
struct TeamTally {
    workload: usize,
    won: usize,
}

/// Build one export row per record, in input order
pub fn build_dataset(rfps: &[Rfp], exported_at: DateTime<Utc>) -> Vec<ExportRow> {
    let mut tallies: HashMap<&str, TeamTally> = HashMap::new();
    for rfp in rfps {
        let tally = tallies.entry(rfp.assigned_to.as_str()).or_default();
        tally.workload += 1;
        if rfp.is_won() {
            tally.won += 1;
        }
    }

    let export_date = exported_at.to_rfc3339_opts(SecondsFormat::Millis, true);

    rfps.iter()
        .map(|rfp| {
            let tally = tallies
                .get(rfp.assigned_to.as_str())
                .copied()
                .unwrap_or_default();
            build_row(rfp, tally, &export_date)
        })
        .collect()
}

fn build_row(rfp: &Rfp, tally: TeamTally, export_date: &str) -> ExportRow {
    let span = |from: Option<NaiveDate>, to: Option<NaiveDate>| -> Option<i64> {
        Some(days_between(from?, to?))
    };

    let submitted = Some(rfp.submission_date);
    let days_to_quote = span(submitted, rfp.quotation_date);
    let days_to_order = span(rfp.quotation_date, rfp.order_date);
    let days_to_deliver = span(rfp.order_date, rfp.delivery_date);
    let total_cycle_time = span(submitted, rfp.delivery_date);

    let outcome = rfp.status.outcome();
    let win_probability = match outcome {
        Outcome::Won => 100,
        Outcome::Lost => 0,
        Outcome::Pending => 50,
    };

    let value = rfp.value_or_zero();

    ExportRow {
        rfp_id: rfp.id.clone(),
        client_name: rfp.client_name.clone(),
        product_type: rfp.product_type.clone(),
        assigned_to: rfp.assigned_to.clone(),
        current_status: rfp.status,

        submission_date: rfp.submission_date,
        quotation_date: rfp.quotation_date.into(),
        order_date: rfp.order_date.into(),
        delivery_date: rfp.delivery_date.into(),

        estimated_value: value,
        actual_value: if outcome == Outcome::Won { value } else { 0.0 },

        days_to_quote: days_to_quote.into(),
        days_to_order: days_to_order.into(),
        days_to_deliver: days_to_deliver.into(),
        total_cycle_time: total_cycle_time.into(),

        is_won: outcome == Outcome::Won,
        is_lost: outcome == Outcome::Lost,
        is_pending: outcome == Outcome::Pending,
        win_probability,

        quote_submitted: rfp.is_quoted(),
        order_received: rfp.is_ordered(),
        delivery_completed: rfp.is_delivered(),

        quote_response_time_category: days_to_quote.map(SpeedCategory::for_quote).into(),
        delivery_time_category: days_to_deliver.map(SpeedCategory::for_delivery).into(),

        quarter: quarter_label(rfp.submission_date),
        month: rfp.submission_date.format("%B %Y").to_string(),
        week_of_year: week_of_year(rfp.submission_date),

        team_workload: tally.workload,
        team_success_rate: percentage(tally.won, tally.workload),

        export_date: export_date.to_string(),
        data_version: DATA_VERSION,
    }
}

/// Fiscal quarter label, e.g. "Q4 2024"
pub fn quarter_label(date: NaiveDate) -> String {
    format!("Q{} {}", date.month0() / 3 + 1, date.year())
}

/// Week number counted from January 1st: whole days elapsed divided by 7, rounded up
pub fn week_of_year(date: NaiveDate) -> u32 {
    date.ordinal0().div_ceil(7)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loader::sample_rfps;
    use chrono::TimeZone;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn exported_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 14, 9, 30, 0).unwrap()
    }

    fn row<'a>(rows: &'a [ExportRow], id: &str) -> &'a ExportRow {
        rows.iter().find(|r| r.rfp_id == id).unwrap()
    }

    #[test]
    fn test_row_count_matches_input() {
        let rfps = sample_rfps().unwrap();
        assert_eq!(build_dataset(&rfps, exported_at()).len(), rfps.len());
        assert!(build_dataset(&[], exported_at()).is_empty());
    }

    #[test]
    fn test_fulfilled_row() {
        let rfps = sample_rfps().unwrap();
        let rows = build_dataset(&rfps, exported_at());
        let r = row(&rows, "RFP001");

        assert_eq!(r.current_status, RfpStatus::Fulfilled);
        assert_eq!(r.quotation_date, OrNa::Value(date("2024-10-03")));
        assert_eq!(r.estimated_value, 15_000.0);
        assert_eq!(r.actual_value, 15_000.0);
        assert_eq!(r.days_to_quote, OrNa::Value(2));
        assert_eq!(r.days_to_order, OrNa::Value(3));
        assert_eq!(r.days_to_deliver, OrNa::Value(6));
        assert_eq!(r.total_cycle_time, OrNa::Value(11));
        assert!(r.is_won && !r.is_lost && !r.is_pending);
        assert_eq!(r.win_probability, 100);
        assert!(r.quote_submitted && r.order_received && r.delivery_completed);
        assert_eq!(r.quote_response_time_category, OrNa::Value(SpeedCategory::Fast));
        assert_eq!(r.delivery_time_category, OrNa::Value(SpeedCategory::Fast));
        assert_eq!(r.quarter, "Q4 2024");
        assert_eq!(r.month, "October 2024");
        assert_eq!(r.week_of_year, 40);
        assert_eq!(r.team_workload, 3);
        assert_eq!(r.team_success_rate, 67);
        assert_eq!(r.export_date, "2024-10-14T09:30:00.000Z");
        assert_eq!(r.data_version, "1.0");
    }

    #[test]
    fn test_unquoted_row_uses_placeholders() {
        let rfps = sample_rfps().unwrap();
        let rows = build_dataset(&rfps, exported_at());
        let r = row(&rows, "RFP002");

        assert_eq!(r.quotation_date, OrNa::NotAvailable);
        assert_eq!(r.order_date, OrNa::NotAvailable);
        assert_eq!(r.delivery_date, OrNa::NotAvailable);
        assert_eq!(r.estimated_value, 0.0);
        assert_eq!(r.days_to_quote, OrNa::NotAvailable);
        assert_eq!(r.days_to_order, OrNa::NotAvailable);
        assert_eq!(r.days_to_deliver, OrNa::NotAvailable);
        assert_eq!(r.total_cycle_time, OrNa::NotAvailable);
        assert_eq!(r.quote_response_time_category, OrNa::NotAvailable);
        assert_eq!(r.delivery_time_category, OrNa::NotAvailable);
        assert!(r.is_pending);
        assert_eq!(r.win_probability, 50);
    }

    #[test]
    fn test_pending_row_has_no_actual_value() {
        let rfps = sample_rfps().unwrap();
        let rows = build_dataset(&rfps, exported_at());
        let r = row(&rows, "RFP003");

        assert_eq!(r.estimated_value, 25_000.0);
        assert_eq!(r.actual_value, 0.0);
        assert_eq!(r.days_to_order, OrNa::Value(4));
        assert_eq!(r.days_to_deliver, OrNa::NotAvailable);
        assert_eq!(r.quarter, "Q3 2024");
        assert_eq!(r.month, "September 2024");
    }

    #[test]
    fn test_cancelled_row() {
        let rfp = Rfp::new(
            "RFP020",
            "Lost Deal Ltd",
            "Pumps",
            date("2024-01-01"),
            RfpStatus::Cancelled,
            "Sales_C",
        )
        .with_value(5000.0);
        let rows = build_dataset(&[rfp], exported_at());

        assert!(rows[0].is_lost && !rows[0].is_won && !rows[0].is_pending);
        assert_eq!(rows[0].win_probability, 0);
        assert_eq!(rows[0].actual_value, 0.0);
        assert_eq!(rows[0].week_of_year, 0);
        assert_eq!(rows[0].quarter, "Q1 2024");
        assert_eq!(rows[0].team_success_rate, 0);
    }

    #[test]
    fn test_same_day_quote_counts_as_zero_days() {
        let rfp = Rfp::new(
            "RFP021",
            "Quick Co",
            "Valves",
            date("2024-03-05"),
            RfpStatus::OrderPending,
            "Sales_A",
        )
        .with_quotation_date(date("2024-03-05"));
        let rows = build_dataset(&[rfp], exported_at());

        assert_eq!(rows[0].days_to_quote, OrNa::Value(0));
        assert_eq!(
            rows[0].quote_response_time_category,
            OrNa::Value(SpeedCategory::Fast)
        );
    }

    #[test]
    fn test_speed_category_thresholds() {
        assert_eq!(SpeedCategory::for_quote(2), SpeedCategory::Fast);
        assert_eq!(SpeedCategory::for_quote(3), SpeedCategory::Average);
        assert_eq!(SpeedCategory::for_quote(5), SpeedCategory::Average);
        assert_eq!(SpeedCategory::for_quote(6), SpeedCategory::Slow);
        assert_eq!(SpeedCategory::for_delivery(7), SpeedCategory::Fast);
        assert_eq!(SpeedCategory::for_delivery(14), SpeedCategory::Average);
        assert_eq!(SpeedCategory::for_delivery(15), SpeedCategory::Slow);
    }

    #[test]
    fn test_calendar_buckets() {
        assert_eq!(week_of_year(date("2024-01-01")), 0);
        assert_eq!(week_of_year(date("2024-01-02")), 1);
        assert_eq!(week_of_year(date("2024-01-08")), 1);
        assert_eq!(week_of_year(date("2024-01-09")), 2);
        assert_eq!(quarter_label(date("2024-06-30")), "Q2 2024");
        assert_eq!(quarter_label(date("2024-07-01")), "Q3 2024");
    }

    #[test]
    fn test_or_na_serialization() {
        let missing: OrNa<i64> = None.into();
        assert_eq!(serde_json::to_string(&missing).unwrap(), r#""N/A""#);
        assert_eq!(serde_json::to_string(&OrNa::Value(4)).unwrap(), "4");
        assert_eq!(OrNa::Value(date("2024-10-03")).to_string(), "2024-10-03");
        assert_eq!(missing.to_string(), "N/A");
    }

    #[test]
    fn test_whole_amounts_serialize_as_integers() {
        let rfps = sample_rfps().unwrap();
        let rows = build_dataset(&rfps, exported_at());
        let json = serde_json::to_value(row(&rows, "RFP004")).unwrap();

        assert_eq!(json["estimated_value"], serde_json::json!(35000));
        assert_eq!(json["actual_value"], serde_json::json!(35000));
    }
}
