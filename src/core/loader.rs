//! RFP record loading
//!
//! Records live in YAML files holding a sequence of RFP mappings. The
//! reference sample is compiled into the binary so every command works
//! without a project.

use miette::Diagnostic;
use rust_embed::Embed;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use crate::entities::Rfp;
use crate::yaml::YamlSyntaxError;

/// Name of the embedded reference dataset
pub const SAMPLE_FILE: &str = "sample_rfps.yaml";

#[derive(Embed)]
#[folder = "data/"]
struct EmbeddedData;

/// Errors raised while reading RFP records
#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("failed to read {path:?}")]
    #[diagnostic(code(rfp::load::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] YamlSyntaxError),

    #[error("failed to walk {path:?}")]
    #[diagnostic(code(rfp::load::walk))]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("embedded sample dataset is missing")]
    #[diagnostic(code(rfp::load::sample))]
    MissingSample,
}

/// Raw bytes of the embedded sample, used to seed new projects
pub fn sample_source() -> Result<String, LoadError> {
    let file = EmbeddedData::get(SAMPLE_FILE).ok_or(LoadError::MissingSample)?;
    Ok(String::from_utf8_lossy(&file.data).into_owned())
}

/// The eight reference records
pub fn sample_rfps() -> Result<Vec<Rfp>, LoadError> {
    parse_rfps(&sample_source()?, SAMPLE_FILE)
}

/// Parse a YAML sequence of records; `name` labels diagnostics
pub fn parse_rfps(source: &str, name: &str) -> Result<Vec<Rfp>, LoadError> {
    // An empty or comment-only file is an empty collection
    if source.lines().all(|l| {
        let l = l.trim();
        l.is_empty() || l.starts_with('#')
    }) {
        return Ok(Vec::new());
    }

    serde_yml::from_str::<Vec<Rfp>>(source)
        .map_err(|e| YamlSyntaxError::from_serde_error(&e, source, name).into())
}

pub fn load_from_path(path: &Path) -> Result<Vec<Rfp>, LoadError> {
    let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rfps = parse_rfps(&source, &path.display().to_string())?;
    debug!(path = %path.display(), records = rfps.len(), "loaded RFP file");
    Ok(rfps)
}

/// Load every `*.yaml` / `*.yml` file under `dir`, concatenated in path order
pub fn load_from_dir(dir: &Path) -> Result<Vec<Rfp>, LoadError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|source| LoadError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        let is_yaml = entry
            .path()
            .extension()
            .is_some_and(|ext| ext == "yaml" || ext == "yml");
        if entry.file_type().is_file() && is_yaml {
            files.push(entry.into_path());
        }
    }

    let mut rfps = Vec::new();
    for file in &files {
        rfps.extend(load_from_path(file)?);
    }
    Ok(rfps)
}

/// Where a command reads its records from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// A single data file or a directory of them
    Path(PathBuf),
    Embedded,
}

impl DataSource {
    pub fn load(&self) -> Result<Vec<Rfp>, LoadError> {
        match self {
            DataSource::Path(path) if path.is_dir() => load_from_dir(path),
            DataSource::Path(path) => load_from_path(path),
            DataSource::Embedded => {
                debug!("using embedded sample dataset");
                sample_rfps()
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DataSource::Path(path) => path.display().to_string(),
            DataSource::Embedded => format!("<embedded {}>", SAMPLE_FILE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::RfpStatus;
    use tempfile::tempdir;

    const ONE_RECORD: &str = "\
- id: RFP100
  client_name: Test Co
  product_type: Gears
  submission_date: 2024-01-10
  status: Order Pending
  quotation_date: 2024-01-12
  value: 1200
  assigned_to: Sales_A
";

    #[test]
    fn test_sample_dataset() {
        let rfps = sample_rfps().unwrap();
        assert_eq!(rfps.len(), 8);
        assert_eq!(rfps[0].id, "RFP001");
        assert_eq!(rfps[7].id, "RFP008");
        assert_eq!(rfps[1].status, RfpStatus::QuotationPending);
        assert_eq!(rfps[1].value, None);
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rfps.yaml");
        fs::write(&path, ONE_RECORD).unwrap();

        let rfps = load_from_path(&path).unwrap();
        assert_eq!(rfps.len(), 1);
        assert_eq!(rfps[0].value, Some(1200.0));
    }

    #[test]
    fn test_empty_file_is_empty_collection() {
        assert!(parse_rfps("", "empty.yaml").unwrap().is_empty());
        assert!(parse_rfps("# nothing yet\n", "empty.yaml").unwrap().is_empty());
    }

    #[test]
    fn test_bad_status_is_syntax_error() {
        let source = ONE_RECORD.replace("Order Pending", "Shipped");
        let err = parse_rfps(&source, "bad.yaml").unwrap_err();
        match err {
            LoadError::Syntax(diag) => assert!(diag.message().contains("Unknown RFP status")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_from_path(Path::new("/nonexistent/rfps.yaml")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_load_from_dir_in_path_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.yaml"), ONE_RECORD).unwrap();
        fs::write(
            dir.path().join("a.yml"),
            ONE_RECORD.replace("RFP100", "RFP099"),
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let rfps = load_from_dir(dir.path()).unwrap();
        let ids: Vec<&str> = rfps.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["RFP099", "RFP100"]);
    }

    #[test]
    fn test_data_source_dispatch() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("rfps.yaml"), ONE_RECORD).unwrap();

        assert_eq!(DataSource::Embedded.load().unwrap().len(), 8);
        assert_eq!(
            DataSource::Path(dir.path().to_path_buf()).load().unwrap().len(),
            1
        );
        assert_eq!(
            DataSource::Path(dir.path().join("rfps.yaml"))
                .load()
                .unwrap()
                .len(),
            1
        );
    }
}
