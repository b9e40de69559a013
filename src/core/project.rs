//! Project discovery and layout

use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::loader::{self, LoadError};

/// Directory marking a project root
pub const PROJECT_DIR: &str = ".rfp";

/// Data file created by `rfp init`
pub const DATA_FILE: &str = "rfps.yaml";

/// An RFP project: any directory containing `.rfp/`
#[derive(Debug)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    /// Find project root by walking up from the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let current = std::env::current_dir().map_err(|e| ProjectError::Io(e.to_string()))?;
        Self::discover_from(&current)
    }

    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| ProjectError::Io(e.to_string()))?;

        loop {
            if current.join(PROJECT_DIR).is_dir() {
                return Ok(Self { root: current });
            }
            if !current.pop() {
                return Err(ProjectError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Create `.rfp/` with a default config and the sample data
    pub fn init(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        if root.join(PROJECT_DIR).exists() {
            return Err(ProjectError::AlreadyExists(root));
        }
        Self::write_layout(root)
    }

    /// Like `init`, overwriting an existing `.rfp/`
    pub fn init_force(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        Self::write_layout(root)
    }

    fn write_layout(root: PathBuf) -> Result<Self, ProjectError> {
        let project = Self { root };
        let dir = project.rfp_dir();
        std::fs::create_dir_all(&dir).map_err(|e| ProjectError::Io(e.to_string()))?;

        std::fs::write(dir.join("config.yaml"), Self::default_config())
            .map_err(|e| ProjectError::Io(e.to_string()))?;
        std::fs::write(project.data_file(), loader::sample_source()?)
            .map_err(|e| ProjectError::Io(e.to_string()))?;

        Ok(project)
    }

    fn default_config() -> &'static str {
        r#"# RFP pipeline project configuration

# Data file or directory, relative paths resolve against the project root
# data_file: .rfp/rfps.yaml

# Teams shown in team reports
# teams: [Sales_A, Sales_B, Sales_C]

# Directory export files are written to
# export_dir: exports

# Default output format (auto, yaml, tsv, json, csv, md)
# default_format: auto
"#
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn rfp_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    pub fn config_path(&self) -> PathBuf {
        self.rfp_dir().join("config.yaml")
    }

    pub fn data_file(&self) -> PathBuf {
        self.rfp_dir().join(DATA_FILE)
    }

    /// Resolve a possibly relative path against the project root
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum ProjectError {
    #[error("not an RFP project (searched from {searched_from:?})")]
    #[diagnostic(code(rfp::project::not_found), help("run 'rfp init' to create one"))]
    NotFound { searched_from: PathBuf },

    #[error("RFP project already exists at {0:?}")]
    #[diagnostic(code(rfp::project::exists), help("use 'rfp init --force' to overwrite it"))]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    #[diagnostic(code(rfp::project::io))]
    Io(String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Load(#[from] LoadError),
}
