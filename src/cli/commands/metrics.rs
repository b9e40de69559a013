//! `rfp metrics` command - dashboard KPIs

use console::style;
use miette::Result;
use serde::Serialize;

use crate::analytics::{
    delay_analysis, stage_funnel, status_distribution, DashboardAverages, PipelineMetrics,
    StageCount, StatusCount,
};
use crate::cli::commands::utils::{print_structured, Workspace};
use crate::cli::helpers::{format_currency, style_status};
use crate::cli::table::Table;
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(clap::Args, Debug)]
pub struct MetricsArgs {}

#[derive(Serialize)]
struct Dashboard {
    metrics: PipelineMetrics,
    funnel: Vec<StageCount>,
    averages: DashboardAverages,
    status_distribution: Vec<StatusCount>,
}

pub fn run(_args: MetricsArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = Workspace::open(global);
    let rfps = workspace.load_rfps()?;
    let format = workspace.format(global);

    let dashboard = Dashboard {
        metrics: PipelineMetrics::compute(&rfps),
        funnel: stage_funnel(&rfps),
        averages: DashboardAverages::from_delays(&delay_analysis(&rfps)),
        status_distribution: status_distribution(&rfps),
    };
    if print_structured(&dashboard, format)? {
        return Ok(());
    }

    let m = &dashboard.metrics;
    let mut kpis = Table::new(["METRIC", "VALUE"]);
    kpis.push(["Total RFPs".to_string(), m.total_rfps.to_string()]);
    kpis.push(["Quotations Pending".to_string(), m.quotations_pending.to_string()]);
    kpis.push(["Orders Received".to_string(), m.orders_received.to_string()]);
    kpis.push(["Delivered".to_string(), m.delivered.to_string()]);
    kpis.push(["Total Value".to_string(), format_currency(m.total_value)]);
    kpis.push(["Conversion Rate".to_string(), format!("{}%", m.conversion_rate)]);
    kpis.push([
        "Avg Quote Time".to_string(),
        format!("{:.1} days", dashboard.averages.avg_quote_time),
    ]);
    kpis.push([
        "Avg Delivery Time".to_string(),
        format!("{:.1} days", dashboard.averages.avg_delivery_time),
    ]);

    let mut funnel = Table::new(["STAGE", "COUNT"]);
    for stage in &dashboard.funnel {
        funnel.push([stage.stage.name().to_string(), stage.count.to_string()]);
    }

    if format != OutputFormat::Auto {
        print!("{}", kpis.render(format));
        return Ok(());
    }

    println!("{}", style("Pipeline Metrics").bold().underlined());
    print!("{}", kpis.render(format));
    println!();
    println!("{}", style("Stage Funnel").bold().underlined());
    print!("{}", funnel.render(format));

    if !global.quiet {
        println!();
        println!("{}", style("Status Distribution").bold().underlined());
        for entry in &dashboard.status_distribution {
            println!("  {:<20} {}", style_status(entry.status), entry.count);
        }
    }
    Ok(())
}
