use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

pub const STATE_DIR_ENV: &str = "FORMFLOW_STATE_DIR";
const CONFIG_FILE: &str = "config.toml";

/// Optional settings read from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub state_dir: Option<PathBuf>,
    pub questionnaire: Option<PathBuf>,
    pub show_progress: Option<bool>,
}

impl FileConfig {
    pub fn parse(raw: &str) -> Result<Self> {
        toml::from_str(raw).context("invalid formflow config")
    }

    /// Loads the given file, or the platform default one when it exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            return Self::parse(&raw).with_context(|| format!("in {}", path.display()));
        }
        match default_config_path() {
            Some(path) if path.is_file() => {
                let raw = fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                Self::parse(&raw).with_context(|| format!("in {}", path.display()))
            }
            _ => Ok(Self::default()),
        }
    }
}

/// Overrides given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub state_dir: Option<PathBuf>,
    pub questionnaire: Option<PathBuf>,
}

/// Effective settings after layering flags, environment and file config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub state_dir: PathBuf,
    pub questionnaire: Option<PathBuf>,
    pub show_progress: bool,
}

impl Settings {
    pub fn resolve(overrides: Overrides, file: FileConfig) -> Self {
        let state_dir = overrides
            .state_dir
            .or_else(|| env::var_os(STATE_DIR_ENV).map(PathBuf::from))
            .or(file.state_dir)
            .or_else(default_state_dir)
            .unwrap_or_else(|| PathBuf::from(".formflow"));
        Self {
            state_dir,
            questionnaire: overrides.questionnaire.or(file.questionnaire),
            show_progress: file.show_progress.unwrap_or(true),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "formflow")
}

pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

fn default_state_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}
