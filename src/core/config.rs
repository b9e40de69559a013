//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::analytics::DEFAULT_TEAMS;
use crate::core::loader::DataSource;
use crate::core::Project;

/// Configuration merged from defaults, global file, project file and environment
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Data file or directory of data files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,

    /// Teams shown in team reports
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teams: Option<Vec<String>>,

    /// Directory export files are written to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,

    /// Where the session is persisted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_file: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load(project: Option<&Project>) -> Self {
        let mut config = Config::default();

        // Global user config (~/.config/rfp/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // Project config (.rfp/config.yaml); relative paths are project-relative
        if let Some(project) = project {
            if let Some(mut local) = Self::read_file(&project.config_path()) {
                local.data_file = local.data_file.map(|p| project.resolve(&p));
                local.export_dir = local.export_dir.map(|p| project.resolve(&p));
                local.session_file = local.session_file.map(|p| project.resolve(&p));
                config.merge(local);
            }
        }

        config.merge(Self::from_env());
        config
    }

    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => {
                debug!(path = %path.display(), "loaded config");
                Some(config)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable config");
                None
            }
        }
    }

    fn from_env() -> Config {
        let path_var = |name: &str| std::env::var_os(name).filter(|v| !v.is_empty()).map(PathBuf::from);
        Config {
            data_file: path_var("RFP_DATA"),
            export_dir: path_var("RFP_EXPORT_DIR"),
            session_file: path_var("RFP_SESSION_FILE"),
            ..Config::default()
        }
    }

    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "rfp").map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.data_file.is_some() {
            self.data_file = other.data_file;
        }
        if other.teams.is_some() {
            self.teams = other.teams;
        }
        if other.export_dir.is_some() {
            self.export_dir = other.export_dir;
        }
        if other.session_file.is_some() {
            self.session_file = other.session_file;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Configured teams, or the default three
    pub fn teams(&self) -> Vec<String> {
        match &self.teams {
            Some(teams) => teams.clone(),
            None => DEFAULT_TEAMS.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Session file, defaulting to the user data directory
    pub fn session_file(&self) -> PathBuf {
        self.session_file
            .clone()
            .or_else(|| {
                directories::ProjectDirs::from("", "", "rfp")
                    .map(|dirs| dirs.data_dir().join("session.json"))
            })
            .unwrap_or_else(|| PathBuf::from(".rfp-session.json"))
    }

    /// Pick the record source: explicit path, configured file, project data, embedded sample
    pub fn data_source(&self, explicit: Option<&Path>, project: Option<&Project>) -> DataSource {
        if let Some(path) = explicit {
            return DataSource::Path(path.to_path_buf());
        }
        if let Some(path) = &self.data_file {
            return DataSource::Path(path.clone());
        }
        if let Some(project) = project {
            let data = project.data_file();
            if data.exists() {
                return DataSource::Path(data);
            }
        }
        DataSource::Embedded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_merge_prefers_other() {
        let mut base = Config {
            teams: Some(vec!["North".into()]),
            export_dir: Some(PathBuf::from("out")),
            ..Config::default()
        };
        base.merge(Config {
            export_dir: Some(PathBuf::from("exports")),
            ..Config::default()
        });

        assert_eq!(base.teams(), vec!["North".to_string()]);
        assert_eq!(base.export_dir(), PathBuf::from("exports"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.teams(), vec!["Sales_A", "Sales_B", "Sales_C"]);
        assert_eq!(config.export_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_project_config_paths_resolve_against_root() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();
        std::fs::write(
            project.config_path(),
            "export_dir: reports\nteams: [Sales_A]\n",
        )
        .unwrap();

        let config = Config::load(Some(&project));
        assert_eq!(config.teams(), vec!["Sales_A".to_string()]);
        if std::env::var_os("RFP_EXPORT_DIR").is_none() {
            assert_eq!(config.export_dir(), project.root().join("reports"));
        }
    }

    #[test]
    fn test_data_source_precedence() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();
        let explicit = PathBuf::from("/data/explicit.yaml");

        let config = Config::default();
        assert_eq!(
            config.data_source(Some(&explicit), Some(&project)),
            DataSource::Path(explicit.clone())
        );
        assert_eq!(
            config.data_source(None, Some(&project)),
            DataSource::Path(project.data_file())
        );
        assert_eq!(config.data_source(None, None), DataSource::Embedded);

        let configured = Config {
            data_file: Some(PathBuf::from("/data/configured.yaml")),
            ..Config::default()
        };
        assert_eq!(
            configured.data_source(None, Some(&project)),
            DataSource::Path(PathBuf::from("/data/configured.yaml"))
        );
    }
}
