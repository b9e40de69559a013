//! `rfp config` command - inspect the effective configuration

use clap::Subcommand;
use console::style;
use miette::Result;
use std::collections::BTreeMap;

use crate::cli::commands::utils::{print_structured, Workspace};
use crate::cli::GlobalOpts;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration values
    Show,

    /// Show where configuration and session files live
    Path,
}

pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    let workspace = Workspace::open(global);
    match cmd {
        ConfigCommands::Show => run_show(&workspace, global),
        ConfigCommands::Path => run_path(&workspace),
    }
}

fn run_show(workspace: &Workspace, global: &GlobalOpts) -> Result<()> {
    let format = workspace.format(global);
    let config = &workspace.config;
    let rows = [
        ("data", workspace.source.describe()),
        ("teams", config.teams().join(", ")),
        ("export_dir", config.export_dir().display().to_string()),
        ("session_file", config.session_file().display().to_string()),
        (
            "default_format",
            config.default_format.clone().unwrap_or_else(|| "auto".to_string()),
        ),
    ];

    let map: BTreeMap<&str, &str> = rows.iter().map(|(k, v)| (*k, v.as_str())).collect();
    if print_structured(&map, format)? {
        return Ok(());
    }

    for (key, value) in &rows {
        println!("{:<16} {}", style(key).cyan(), value);
    }
    Ok(())
}

fn run_path(workspace: &Workspace) -> Result<()> {
    match &workspace.project {
        Some(project) => println!("project: {}", project.config_path().display()),
        None => println!("project: {}", style("(no project found)").dim()),
    }
    if let Some(dirs) = directories::ProjectDirs::from("", "", "rfp") {
        println!("global:  {}", dirs.config_dir().join("config.yaml").display());
    }
    println!("session: {}", workspace.config.session_file().display());
    Ok(())
}
