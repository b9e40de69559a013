//! `rfp delays` command - turnaround per quoted RFP

use console::style;
use miette::Result;

use crate::analytics::{delay_analysis, DashboardAverages};
use crate::cli::commands::utils::{print_structured, Workspace};
use crate::cli::table::Table;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::export::SpeedCategory;

#[derive(clap::Args, Debug)]
pub struct DelaysArgs {}

pub fn run(_args: DelaysArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = Workspace::open(global);
    let rfps = workspace.load_rfps()?;
    let format = workspace.format(global);

    let delays = delay_analysis(&rfps);
    if print_structured(&delays, format)? {
        return Ok(());
    }

    let mut table = Table::new([
        "ID",
        "CLIENT",
        "STATUS",
        "DAYS TO QUOTE",
        "QUOTE SPEED",
        "DAYS TO DELIVER",
        "DELIVERY SPEED",
    ]);
    for entry in &delays {
        table.push([
            entry.id.clone(),
            entry.client_name.clone(),
            entry.status.label().to_string(),
            entry.days_to_quote.to_string(),
            SpeedCategory::for_quote(entry.days_to_quote).to_string(),
            entry
                .days_to_deliver
                .map_or_else(|| "-".to_string(), |d| d.to_string()),
            entry
                .days_to_deliver
                .map_or_else(|| "-".to_string(), |d| SpeedCategory::for_delivery(d).to_string()),
        ]);
    }
    print!("{}", table.render(format));

    if format == OutputFormat::Auto && !global.quiet {
        let averages = DashboardAverages::from_delays(&delays);
        println!(
            "{} {:.1} days  {} {:.1} days",
            style("Avg quote:").dim(),
            averages.avg_quote_time,
            style("Avg delivery:").dim(),
            averages.avg_delivery_time
        );
    }
    Ok(())
}
