pub mod check;
pub mod export;
pub mod run;
pub mod schema;
pub mod session;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, bail};
use formflow_spec::{FileStore, Questionnaire, SessionStore, credit_manager_questionnaire};
use tracing::info;

use crate::config::Settings;

/// Everything a command needs: the question graph and where its session lives.
#[derive(Debug, Clone)]
pub struct Context {
    pub questionnaire: Questionnaire,
    pub state_dir: PathBuf,
    pub show_progress: bool,
}

impl Context {
    pub fn new(questionnaire: Questionnaire, state_dir: impl Into<PathBuf>) -> Self {
        Self {
            questionnaire,
            state_dir: state_dir.into(),
            show_progress: true,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let questionnaire = match &settings.questionnaire {
            Some(path) => load_questionnaire(path)?,
            None => credit_manager_questionnaire(),
        };
        let mut ctx = Self::new(questionnaire, settings.state_dir.clone());
        ctx.show_progress = settings.show_progress;
        Ok(ctx)
    }

    pub fn store(&self) -> SessionStore<'_, FileStore> {
        SessionStore::new(&self.questionnaire, FileStore::new(&self.state_dir))
    }

    /// Refuses to drive a session over a graph with structural defects.
    pub fn ensure_well_formed(&self) -> Result<()> {
        let issues = self.questionnaire.check();
        if issues.is_empty() {
            return Ok(());
        }
        let listed = issues
            .iter()
            .map(|issue| format!("  - {issue}"))
            .collect::<Vec<_>>()
            .join("\n");
        bail!(
            "questionnaire '{}' has {} issue(s):\n{}",
            self.questionnaire.id,
            issues.len(),
            listed
        );
    }
}

fn load_questionnaire(path: &Path) -> Result<Questionnaire> {
    let questionnaire = Questionnaire::from_path(path)
        .with_context(|| format!("failed to load questionnaire {}", path.display()))?;
    info!(id = %questionnaire.id, path = %path.display(), "loaded questionnaire");
    Ok(questionnaire)
}
