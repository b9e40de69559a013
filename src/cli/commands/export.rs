//! `rfp export` command - write the analytics dataset

use chrono::Utc;
use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::commands::utils::Workspace;
use crate::cli::GlobalOpts;
use crate::export::{export_to_dir, ExportFormat, ExportOutcome};

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Dataset format
    #[arg(value_enum, value_name = "FORMAT")]
    pub kind: ExportFormat,

    /// Output directory (default: configured export_dir, else current directory)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Print the dataset to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,
}

pub fn run(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = Workspace::open(global);
    let rfps = workspace.load_rfps()?;
    let now = Utc::now();

    if args.stdout {
        if rfps.is_empty() {
            warn_nothing_to_export();
        } else {
            print!("{}", crate::export::render(&rfps, args.kind, now)?);
        }
        return Ok(());
    }

    let dir = args.output.unwrap_or_else(|| workspace.config.export_dir());
    match export_to_dir(&rfps, args.kind, &dir, now)? {
        ExportOutcome::Written { path, records } => {
            if !global.quiet {
                println!(
                    "{} Exported {} RFP records to {}",
                    style("✓").green(),
                    style(records).cyan(),
                    style(path.display()).cyan()
                );
            }
        }
        ExportOutcome::NothingToExport => warn_nothing_to_export(),
    }
    Ok(())
}

fn warn_nothing_to_export() {
    eprintln!("{} No RFP data available for export", style("!").yellow());
}
