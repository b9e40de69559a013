//! Team rollups and the extended team performance view

use serde::Serialize;
use std::collections::HashMap;

use crate::analytics::{delay_analysis, mean, percentage};
use crate::entities::Rfp;

/// Team identifiers used when no roster is configured
pub const DEFAULT_TEAMS: [&str; 3] = ["Sales_A", "Sales_B", "Sales_C"];

/// Per-team rollup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamPerformance {
    pub name: String,
    pub total_rfps: usize,
    /// Records with an order date
    pub converted: usize,
    pub conversion_rate: u32,
    pub total_value: f64,
}

/// Rollup for each team in `teams`, in the given order
///
/// Teams with no records are still reported, with zero counts and a zero
/// conversion rate.
pub fn team_performance<S: AsRef<str>>(rfps: &[Rfp], teams: &[S]) -> Vec<TeamPerformance> {
    teams
        .iter()
        .map(|team| {
            let name = team.as_ref();
            let owned: Vec<&Rfp> = rfps.iter().filter(|r| r.assigned_to == name).collect();
            let converted = owned.iter().filter(|r| r.is_ordered()).count();

            TeamPerformance {
                name: name.to_string(),
                total_rfps: owned.len(),
                converted,
                conversion_rate: percentage(converted, owned.len()),
                total_value: owned.iter().map(|r| r.value_or_zero()).sum(),
            }
        })
        .collect()
}

/// Performance band derived from a conversion rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PerformanceTier {
    Excellent,
    Good,
    NeedsImprovement,
}

impl PerformanceTier {
    pub fn from_rate(conversion_rate: u32) -> Self {
        match conversion_rate {
            70.. => PerformanceTier::Excellent,
            50..=69 => PerformanceTier::Good,
            _ => PerformanceTier::NeedsImprovement,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PerformanceTier::Excellent => "Excellent",
            PerformanceTier::Good => "Good",
            PerformanceTier::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl std::fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Team rollup joined with its average quote turnaround
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSummary {
    #[serde(flatten)]
    pub performance: TeamPerformance,
    /// Mean days to quote, rounded to one decimal
    pub avg_quote_time: f64,
    pub tier: PerformanceTier,
}

/// Everything shown on the team performance view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamReport {
    pub teams: Vec<TeamSummary>,
    /// Highest conversion rate; the first team listed wins ties
    pub top_performer: Option<String>,
    /// Highest total value; the first team listed wins ties
    pub revenue_leader: Option<String>,
}

impl TeamReport {
    pub fn build<S: AsRef<str>>(rfps: &[Rfp], teams: &[S]) -> Self {
        // Delay entries carry the record id; join back to the owning team
        // First record wins on a duplicated id
        let mut owner_by_id: HashMap<&str, &str> = HashMap::new();
        for rfp in rfps {
            owner_by_id
                .entry(rfp.id.as_str())
                .or_insert(rfp.assigned_to.as_str());
        }
        let delays = delay_analysis(rfps);

        let summaries: Vec<TeamSummary> = team_performance(rfps, teams)
            .into_iter()
            .map(|performance| {
                let avg = mean(
                    delays
                        .iter()
                        .filter(|d| owner_by_id.get(d.id.as_str()) == Some(&performance.name.as_str()))
                        .map(|d| d.days_to_quote as f64),
                );
                TeamSummary {
                    tier: PerformanceTier::from_rate(performance.conversion_rate),
                    avg_quote_time: (avg * 10.0).round() / 10.0,
                    performance,
                }
            })
            .collect();

        let top_performer = first_max_by(&summaries, |a, b| {
            a.performance.conversion_rate > b.performance.conversion_rate
        });
        let revenue_leader = first_max_by(&summaries, |a, b| {
            a.performance.total_value > b.performance.total_value
        });

        Self {
            teams: summaries,
            top_performer,
            revenue_leader,
        }
    }
}

/// Name of the first summary not strictly beaten by a later one
fn first_max_by(
    summaries: &[TeamSummary],
    beats: impl Fn(&TeamSummary, &TeamSummary) -> bool,
) -> Option<String> {
    summaries
        .iter()
        .reduce(|top, current| if beats(current, top) { current } else { top })
        .map(|s| s.performance.name.clone())
}
