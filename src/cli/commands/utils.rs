//! Shared utilities for CLI commands

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tracing::debug;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, DataSource, Project};
use crate::entities::Rfp;

/// Project, configuration and data source resolved for one invocation
pub struct Workspace {
    pub project: Option<Project>,
    pub config: Config,
    pub source: DataSource,
}

impl Workspace {
    pub fn open(global: &GlobalOpts) -> Self {
        let project = Project::discover().ok();
        let config = Config::load(project.as_ref());
        let source = config.data_source(global.data.as_deref(), project.as_ref());
        debug!(source = %source.describe(), "resolved data source");
        Self {
            project,
            config,
            source,
        }
    }

    pub fn load_rfps(&self) -> Result<Vec<Rfp>> {
        Ok(self.source.load()?)
    }

    /// Requested format, with the configured default standing in for `auto`
    pub fn format(&self, global: &GlobalOpts) -> OutputFormat {
        if global.format != OutputFormat::Auto {
            return global.format;
        }
        self.config
            .default_format
            .as_deref()
            .and_then(|f| f.parse().ok())
            .unwrap_or(OutputFormat::Auto)
    }
}

/// Print `value` as JSON or YAML; returns false for tabular formats
pub fn print_structured<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<bool> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(value).into_diagnostic()?);
            Ok(true)
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(value).into_diagnostic()?);
            Ok(true)
        }
        _ => Ok(false),
    }
}
