//! `rfp init` command - Initialize a new RFP project

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::core::project::{Project, ProjectError};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: std::path::PathBuf,

    /// Overwrite an existing .rfp/ directory
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = if args.path.as_os_str() == "." {
        std::env::current_dir().into_diagnostic()?
    } else {
        args.path.clone()
    };

    if !path.exists() {
        std::fs::create_dir_all(&path).into_diagnostic()?;
        println!(
            "{} Created directory {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }

    let project = if args.force {
        Project::init_force(&path)
    } else {
        Project::init(&path)
    };

    match project {
        Ok(project) => {
            println!(
                "{} Initialized RFP project at {}",
                style("✓").green(),
                style(project.root().display()).cyan()
            );
            println!();
            println!("Created:");
            println!("  .rfp/config.yaml   project configuration");
            println!("  .rfp/rfps.yaml     pipeline data (seeded with sample RFPs)");
            println!();
            println!("Next steps:");
            println!("  {} Review the pipeline", style("rfp list").yellow());
            println!("  {} Pipeline KPIs", style("rfp metrics").yellow());
            println!("  {} Export the dataset", style("rfp export csv").yellow());
            Ok(())
        }
        Err(ProjectError::AlreadyExists(path)) => {
            println!(
                "{} RFP project already exists at {}",
                style("!").yellow(),
                style(path.display()).cyan()
            );
            println!("Use {} to reinitialize", style("rfp init --force").yellow());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
