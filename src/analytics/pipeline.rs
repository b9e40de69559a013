//! Pipeline filtering and the filtered-results summary

use serde::Serialize;

use crate::analytics::percentage;
use crate::entities::{Rfp, RfpStatus};

/// Search / status / team filter over the pipeline
///
/// Unset criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct PipelineFilter {
    /// Case-insensitive substring of client name, id or product type
    pub search: Option<String>,
    pub status: Option<RfpStatus>,
    /// Exact team identifier
    pub team: Option<String>,
}

impl PipelineFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_status(mut self, status: RfpStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    pub fn matches(&self, rfp: &Rfp) -> bool {
        let matches_search = self.search.as_ref().is_none_or(|term| {
            let term = term.to_lowercase();
            rfp.client_name.to_lowercase().contains(&term)
                || rfp.id.to_lowercase().contains(&term)
                || rfp.product_type.to_lowercase().contains(&term)
        });
        let matches_status = self.status.is_none_or(|status| rfp.status == status);
        let matches_team = self
            .team
            .as_ref()
            .is_none_or(|team| &rfp.assigned_to == team);

        matches_search && matches_status && matches_team
    }

    /// Records that pass the filter, in input order
    pub fn apply<'a>(&self, rfps: &'a [Rfp]) -> Vec<&'a Rfp> {
        rfps.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Summary statistics for a filtered view
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PipelineSummary {
    pub showing: usize,
    pub total: usize,
    pub total_value: f64,
    pub conversion_rate: u32,
}

impl PipelineSummary {
    pub fn new(filtered: &[&Rfp], total: usize) -> Self {
        let ordered = filtered.iter().filter(|r| r.is_ordered()).count();
        Self {
            showing: filtered.len(),
            total,
            total_value: filtered.iter().map(|r| r.value_or_zero()).sum(),
            conversion_rate: percentage(ordered, filtered.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loader::sample_rfps;

    fn ids(rfps: &[&Rfp]) -> Vec<String> {
        rfps.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let rfps = sample_rfps().unwrap();
        assert_eq!(PipelineFilter::new().apply(&rfps).len(), rfps.len());
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let rfps = sample_rfps().unwrap();

        let by_product = PipelineFilter::new().with_search("GEARS").apply(&rfps);
        assert_eq!(ids(&by_product), vec!["RFP001", "RFP008"]);

        let by_id = PipelineFilter::new().with_search("rfp00").apply(&rfps);
        assert_eq!(by_id.len(), 8);

        let by_client = PipelineFilter::new().with_search("mega").apply(&rfps);
        assert_eq!(ids(&by_client), vec!["RFP006"]);
    }

    #[test]
    fn test_status_and_team_filters_combine() {
        let rfps = sample_rfps().unwrap();
        let filtered = PipelineFilter::new()
            .with_status(RfpStatus::InProduction)
            .with_team("Sales_B")
            .apply(&rfps);
        assert_eq!(ids(&filtered), vec!["RFP008"]);
    }

    #[test]
    fn test_summary_of_filtered_view() {
        let rfps = sample_rfps().unwrap();
        let filtered = PipelineFilter::new().with_team("Sales_C").apply(&rfps);
        let summary = PipelineSummary::new(&filtered, rfps.len());

        assert_eq!(summary.showing, 2);
        assert_eq!(summary.total, 8);
        assert_eq!(summary.total_value, 35_000.0);
        assert_eq!(summary.conversion_rate, 50);
    }

    #[test]
    fn test_summary_of_empty_view() {
        let summary = PipelineSummary::new(&[], 8);
        assert_eq!(summary.showing, 0);
        assert_eq!(summary.conversion_rate, 0);
    }
}
