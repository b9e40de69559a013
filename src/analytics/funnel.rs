//! Stage funnel - count of records that reached each pipeline milestone

use serde::{Serialize, Serializer};

use crate::entities::Rfp;

/// Pipeline milestone, in funnel order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Submitted,
    QuotationSent,
    OrderReceived,
    Delivered,
}

impl Stage {
    pub fn all() -> &'static [Stage] {
        &[
            Stage::Submitted,
            Stage::QuotationSent,
            Stage::OrderReceived,
            Stage::Delivered,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Submitted => "RFP Submitted",
            Stage::QuotationSent => "Quotation Sent",
            Stage::OrderReceived => "Order Received",
            Stage::Delivered => "Delivered",
        }
    }

    /// Whether a record has reached this stage
    pub fn reached_by(&self, rfp: &Rfp) -> bool {
        match self {
            Stage::Submitted => true,
            Stage::QuotationSent => rfp.is_quoted(),
            Stage::OrderReceived => rfp.is_ordered(),
            Stage::Delivered => rfp.is_won(),
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for Stage {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageCount {
    #[serde(rename = "name")]
    pub stage: Stage,
    pub count: usize,
}

/// Ordered funnel counts
///
/// Counts are not forced to be non-increasing: a record whose status says
/// delivered but which has no order date still counts in the last stage.
pub fn stage_funnel(rfps: &[Rfp]) -> Vec<StageCount> {
    Stage::all()
        .iter()
        .map(|&stage| StageCount {
            stage,
            count: rfps.iter().filter(|r| stage.reached_by(r)).count(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loader::sample_rfps;
    use crate::entities::RfpStatus;
    use chrono::NaiveDate;

    #[test]
    fn test_sample_funnel() {
        let rfps = sample_rfps().unwrap();
        let funnel = stage_funnel(&rfps);

        let counts: Vec<(&str, usize)> = funnel.iter().map(|s| (s.stage.name(), s.count)).collect();
        assert_eq!(
            counts,
            vec![
                ("RFP Submitted", 8),
                ("Quotation Sent", 6),
                ("Order Received", 5),
                ("Delivered", 3),
            ]
        );
    }

    #[test]
    fn test_funnel_does_not_enforce_monotonicity() {
        let submitted = NaiveDate::from_ymd_opt(2024, 10, 1).unwrap();
        let rfps = vec![Rfp::new(
            "RFP900",
            "Odd Co",
            "Gears",
            submitted,
            RfpStatus::Delivered,
            "Sales_A",
        )];

        let funnel = stage_funnel(&rfps);
        assert_eq!(funnel[2].count, 0);
        assert_eq!(funnel[3].count, 1);
    }

    #[test]
    fn test_stage_serializes_as_name() {
        let json = serde_json::to_string(&StageCount {
            stage: Stage::QuotationSent,
            count: 4,
        })
        .unwrap();
        assert_eq!(json, r#"{"name":"Quotation Sent","count":4}"#);
    }
}
