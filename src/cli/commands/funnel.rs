//! `rfp funnel` command

use miette::Result;

use crate::analytics::{percentage, stage_funnel};
use crate::cli::commands::utils::{print_structured, Workspace};
use crate::cli::table::Table;
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct FunnelArgs {}

pub fn run(_args: FunnelArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = Workspace::open(global);
    let rfps = workspace.load_rfps()?;
    let format = workspace.format(global);

    let funnel = stage_funnel(&rfps);
    if print_structured(&funnel, format)? {
        return Ok(());
    }

    let mut table = Table::new(["STAGE", "COUNT", "SHARE"]);
    for stage in &funnel {
        table.push([
            stage.stage.name().to_string(),
            stage.count.to_string(),
            format!("{}%", percentage(stage.count, rfps.len())),
        ]);
    }
    print!("{}", table.render(format));
    Ok(())
}
