//! Headline pipeline metrics and dashboard averages

use serde::Serialize;

use crate::analytics::{mean, percentage, DelayEntry};
use crate::entities::{Rfp, RfpStatus};

/// Cross-cutting counts over the full record collection
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PipelineMetrics {
    pub total_rfps: usize,
    pub quotations_pending: usize,
    /// Records with an order date, regardless of status
    pub orders_received: usize,
    /// Records whose status is Delivered or Fulfilled
    pub delivered: usize,
    pub total_value: f64,
    pub conversion_rate: u32,
}

impl PipelineMetrics {
    pub fn compute(rfps: &[Rfp]) -> Self {
        let total_rfps = rfps.len();
        let quotations_pending = rfps
            .iter()
            .filter(|r| r.status == RfpStatus::QuotationPending)
            .count();
        let orders_received = rfps.iter().filter(|r| r.is_ordered()).count();
        let delivered = rfps.iter().filter(|r| r.is_won()).count();
        let total_value = rfps.iter().map(Rfp::value_or_zero).sum();

        Self {
            total_rfps,
            quotations_pending,
            orders_received,
            delivered,
            total_value,
            conversion_rate: percentage(orders_received, total_rfps),
        }
    }
}

/// Average turnaround times shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashboardAverages {
    /// Mean days to quote across all quoted records
    pub avg_quote_time: f64,
    /// Mean days from order to delivery across delivered records
    pub avg_delivery_time: f64,
}

impl DashboardAverages {
    pub fn from_delays(delays: &[DelayEntry]) -> Self {
        Self {
            avg_quote_time: mean(delays.iter().map(|d| d.days_to_quote as f64)),
            avg_delivery_time: mean(
                delays
                    .iter()
                    .filter_map(|d| d.days_to_deliver)
                    .map(|d| d as f64),
            ),
        }
    }
}

/// Record count for one status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: RfpStatus,
    pub count: usize,
}

/// Count of records per status, one entry per status in pipeline order
pub fn status_distribution(rfps: &[Rfp]) -> Vec<StatusCount> {
    RfpStatus::all()
        .iter()
        .map(|&status| StatusCount {
            status,
            count: rfps.iter().filter(|r| r.status == status).count(),
        })
        .collect()
}
