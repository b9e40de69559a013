//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    auth::AuthCommands, chat::ChatArgs, completions::CompletionsArgs, config::ConfigCommands,
    delays::DelaysArgs, export::ExportArgs, funnel::FunnelArgs, init::InitArgs, list::ListArgs,
    metrics::MetricsArgs, team::TeamArgs,
};

#[derive(Parser)]
#[command(name = "rfp")]
#[command(author, version, about = "RFP Pipeline Toolkit")]
#[command(
    long_about = "Track sales RFPs from submission to delivery, report pipeline analytics, and export flat datasets for offline analysis."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// RFP data file or directory (default: project data, else the built-in sample)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new RFP project seeded with sample data
    Init(InitArgs),

    /// List the pipeline with optional search and filters
    List(ListArgs),

    /// Pipeline KPIs, funnel, averages and status distribution
    Metrics(MetricsArgs),

    /// Stage funnel
    Funnel(FunnelArgs),

    /// Team performance report
    Team(TeamArgs),

    /// Quote and delivery turnaround per RFP
    Delays(DelaysArgs),

    /// Export the analytics dataset to CSV or JSON
    Export(ExportArgs),

    /// Sign in, sign up, and manage the local session
    #[command(subcommand)]
    Auth(AuthCommands),

    /// Ask the pipeline assistant
    Chat(ChatArgs),

    /// Show configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable tables
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
}

impl OutputFormat {
    /// Formats that carry the full structured value rather than a table
    pub fn is_structured(&self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Yaml)
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
    }
}
