//! Pipeline analytics derived from a collection of RFP records
//!
//! Every function here is a pure transformation of its input slice. Rates
//! are whole percentages and are defined as 0 whenever the denominator is
//! empty.

pub mod delay;
pub mod funnel;
pub mod metrics;
pub mod pipeline;
pub mod team;

use chrono::NaiveDate;

pub use delay::{delay_analysis, DelayEntry};
pub use funnel::{stage_funnel, Stage, StageCount};
pub use metrics::{status_distribution, DashboardAverages, PipelineMetrics, StatusCount};
pub use pipeline::{PipelineFilter, PipelineSummary};
pub use team::{
    team_performance, PerformanceTier, TeamPerformance, TeamReport, TeamSummary, DEFAULT_TEAMS,
};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Calendar days from `from` to `to`, rounded up
///
/// Computed as the ceiling of the millisecond difference divided by one day,
/// so partial days always count as a full day.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let millis = (to - from).num_milliseconds();
    let days = millis / MILLIS_PER_DAY;
    if millis % MILLIS_PER_DAY > 0 {
        days + 1
    } else {
        days
    }
}

/// Whole percentage of `part` over `whole`, 0 when `whole` is 0
pub fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

/// Arithmetic mean, 0 for an empty input
pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
