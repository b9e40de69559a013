//! Delay / cycle-time analysis

use serde::Serialize;

use crate::analytics::days_between;
use crate::entities::{Rfp, RfpStatus};

/// Turnaround for one quoted RFP
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DelayEntry {
    pub id: String,
    pub client_name: String,
    pub days_to_quote: i64,
    /// Present only when both order and delivery dates are recorded
    pub days_to_deliver: Option<i64>,
    pub status: RfpStatus,
}

/// Turnaround entries for every record that has a quotation date
///
/// Unquoted records are left out entirely rather than represented with
/// empty entries.
pub fn delay_analysis(rfps: &[Rfp]) -> Vec<DelayEntry> {
    rfps.iter()
        .filter_map(|rfp| {
            let quoted = rfp.quotation_date?;
            let days_to_deliver = match (rfp.order_date, rfp.delivery_date) {
                (Some(ordered), Some(delivered)) => Some(days_between(ordered, delivered)),
                _ => None,
            };

            Some(DelayEntry {
                id: rfp.id.clone(),
                client_name: rfp.client_name.clone(),
                days_to_quote: days_between(rfp.submission_date, quoted),
                days_to_deliver,
                status: rfp.status,
            })
        })
        .collect()
}
