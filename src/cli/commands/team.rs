//! `rfp team` command - team performance report

use console::style;
use miette::Result;

use crate::analytics::TeamReport;
use crate::cli::commands::utils::{print_structured, Workspace};
use crate::cli::helpers::{format_currency, style_tier};
use crate::cli::table::Table;
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(clap::Args, Debug)]
pub struct TeamArgs {
    /// Teams to report on (default: configured teams)
    #[arg(long = "name", short = 'n', value_delimiter = ',')]
    pub names: Vec<String>,
}

pub fn run(args: TeamArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = Workspace::open(global);
    let rfps = workspace.load_rfps()?;
    let format = workspace.format(global);

    let teams = if args.names.is_empty() {
        workspace.config.teams()
    } else {
        args.names
    };
    let report = TeamReport::build(&rfps, &teams);
    if print_structured(&report, format)? {
        return Ok(());
    }

    let mut table = Table::new([
        "TEAM",
        "RFPS",
        "CONVERTED",
        "CONVERSION",
        "VALUE",
        "AVG QUOTE",
        "TIER",
    ]);
    for team in &report.teams {
        let p = &team.performance;
        table.push([
            p.name.clone(),
            p.total_rfps.to_string(),
            p.converted.to_string(),
            format!("{}%", p.conversion_rate),
            format_currency(p.total_value),
            format!("{:.1} days", team.avg_quote_time),
            team.tier.label().to_string(),
        ]);
    }
    print!("{}", table.render(format));

    if format == OutputFormat::Auto && !global.quiet {
        if let Some(top) = &report.top_performer {
            println!("{} {}", style("Top performer:").dim(), style(top).green().bold());
        }
        if let Some(leader) = &report.revenue_leader {
            println!("{} {}", style("Revenue leader:").dim(), style(leader).green().bold());
        }
        for team in &report.teams {
            println!("  {:<12} {}", team.performance.name, style_tier(team.tier));
        }
    }
    Ok(())
}
