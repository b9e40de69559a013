//! `rfp list` command - filtered pipeline view

use console::style;
use miette::Result;
use serde::Serialize;
use tracing::debug;

use crate::analytics::{PipelineFilter, PipelineSummary};
use crate::cli::commands::utils::{print_structured, Workspace};
use crate::cli::helpers::{format_currency, format_date, truncate_str};
use crate::cli::table::Table;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::entities::{Rfp, RfpStatus};

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Case-insensitive search over client, RFP id and product type
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Only RFPs in this status
    #[arg(long, value_enum)]
    pub status: Option<RfpStatus>,

    /// Only RFPs assigned to this team
    #[arg(long, short = 't')]
    pub team: Option<String>,
}

#[derive(Serialize)]
struct ListOutput<'a> {
    rfps: Vec<&'a Rfp>,
    summary: PipelineSummary,
}

pub fn run(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = Workspace::open(global);
    let rfps = workspace.load_rfps()?;
    let format = workspace.format(global);

    let mut filter = PipelineFilter::new();
    if let Some(search) = args.search.filter(|s| !s.trim().is_empty()) {
        filter = filter.with_search(search);
    }
    if let Some(status) = args.status {
        filter = filter.with_status(status);
    }
    if let Some(team) = args.team {
        filter = filter.with_team(team);
    }

    let filtered = filter.apply(&rfps);
    let summary = PipelineSummary::new(&filtered, rfps.len());
    debug!(?filter, showing = summary.showing, "pipeline filtered");

    let output = ListOutput {
        rfps: filtered,
        summary,
    };
    if print_structured(&output, format)? {
        return Ok(());
    }

    let mut table = Table::new(["ID", "CLIENT", "PRODUCT", "STATUS", "VALUE", "TEAM", "SUBMITTED"]);
    for rfp in &output.rfps {
        table.push([
            rfp.id.clone(),
            truncate_str(&rfp.client_name, 24),
            rfp.product_type.clone(),
            rfp.status.label().to_string(),
            rfp.value.map_or_else(|| "-".to_string(), format_currency),
            rfp.assigned_to.clone(),
            format_date(Some(rfp.submission_date)),
        ]);
    }
    print!("{}", table.render(format));

    if format == OutputFormat::Auto && !global.quiet {
        println!(
            "Showing {} of {} RFPs  {} {}  {} {}%",
            style(summary.showing).cyan(),
            summary.total,
            style("Total value").dim(),
            style(format_currency(summary.total_value)).green(),
            style("Conversion").dim(),
            style(summary.conversion_rate).cyan()
        );
    }
    Ok(())
}
