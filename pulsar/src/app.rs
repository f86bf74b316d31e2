//! Application service object.
//!
//! Each independent piece of state has its own lock: settings and the
//! project list sit behind separate `RwLock`s, and the log tail session is
//! guarded inside [`LogTail`], so tail control never waits on settings or
//! project writes.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::RwLock;
use pulsar_core::{EVENT_SETTINGS_THEME, Project, Settings, is_laravel_project};
use tokio::sync::mpsc;

use crate::config::{
    self, ConfigError, load_projects, load_settings, projects_path, save_projects, save_settings,
    settings_path,
};
use crate::host::Host;
use crate::logs::{self, LogTail};
use crate::paths::pulsar_home_dir;
use crate::tinker::TinkerBridge;

const SELECT_PROJECT_TITLE: &str = "Select Laravel Project";

pub struct App {
    home: PathBuf,
    host: Arc<dyn Host>,
    settings: RwLock<Settings>,
    projects: RwLock<Vec<Project>>,
    tinker: TinkerBridge,
    tail: LogTail,
}

impl App {
    /// Open the app with state stored in the Pulsar home directory.
    pub fn open(host: Arc<dyn Host>) -> config::Result<Self> {
        let home = pulsar_home_dir().map_err(|e| {
            ConfigError::Validation(format!("Could not determine pulsar home directory: {}", e))
        })?;
        Self::open_in(home, host)
    }

    /// Open the app with state stored under `home`.
    pub fn open_in(home: impl Into<PathBuf>, host: Arc<dyn Host>) -> config::Result<Self> {
        let home = home.into();
        let settings = load_settings(&settings_path(&home))?;
        let projects = load_projects(&projects_path(&home));
        tracing::debug!(
            home = %home.display(),
            projects = projects.len(),
            "Loaded pulsar state"
        );

        Ok(Self {
            home,
            tail: LogTail::new(host.clone()),
            host,
            settings: RwLock::new(settings),
            projects: RwLock::new(projects),
            tinker: TinkerBridge::new(),
        })
    }

    pub fn with_tinker(mut self, tinker: TinkerBridge) -> Self {
        self.tinker = tinker;
        self
    }

    pub fn with_log_tail(mut self, tail: LogTail) -> Self {
        self.tail = tail;
        self
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    // Projects

    pub fn projects(&self) -> Vec<Project> {
        self.projects.read().clone()
    }

    /// Look a project up by id, or accept any directory path as-is.
    pub fn project_dir(&self, id_or_path: &str) -> config::Result<PathBuf> {
        if let Some(project) = self.projects.read().iter().find(|p| p.id == id_or_path) {
            return Ok(PathBuf::from(&project.path));
        }
        let path = PathBuf::from(id_or_path);
        if path.is_dir() {
            return Ok(path);
        }
        Err(ConfigError::ProjectNotFound(id_or_path.to_string()))
    }

    pub fn select_directory(&self) -> Option<PathBuf> {
        self.host.pick_directory(SELECT_PROJECT_TITLE)
    }

    /// Save a Laravel project. A blank name falls back to the directory name.
    pub fn add_project(&self, name: &str, path: &Path) -> config::Result<Project> {
        if !is_laravel_project(path) {
            return Err(ConfigError::Validation(
                "not a valid Laravel project: artisan file not found".to_string(),
            ));
        }

        let name = match name.trim() {
            "" => path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string()),
            trimmed => trimmed.to_string(),
        };

        let mut projects = self.projects.write();
        let project = Project::new(next_project_id(), name, path.display().to_string());
        projects.push(project.clone());
        save_projects(&projects_path(&self.home), &projects)?;

        tracing::info!(id = %project.id, path = %project.path, "Added project");
        Ok(project)
    }

    /// Remove a project by id. Returns whether anything was removed.
    pub fn remove_project(&self, id: &str) -> config::Result<bool> {
        let mut projects = self.projects.write();
        let before = projects.len();
        projects.retain(|p| p.id != id);
        let removed = projects.len() != before;
        save_projects(&projects_path(&self.home), &projects)?;

        if removed {
            tracing::info!(id, "Removed project");
        }
        Ok(removed)
    }

    // Settings

    pub fn settings(&self) -> Settings {
        self.settings.read().clone()
    }

    /// Normalize, store and persist settings. Emits `settings:theme` when the
    /// theme changed.
    pub fn update_settings(&self, settings: Settings) -> config::Result<Settings> {
        let settings = settings.normalized();
        let theme_changed = {
            let mut current = self.settings.write();
            let changed = current.theme != settings.theme;
            save_settings(&settings_path(&self.home), &settings)?;
            *current = settings.clone();
            changed
        };

        if theme_changed {
            self.host.emit(EVENT_SETTINGS_THEME, settings.theme.as_str());
        }
        Ok(settings)
    }

    // Tinker

    pub async fn run_tinker(&self, project_dir: &Path, code: &str) -> String {
        let settings = self.settings();
        self.tinker.run(project_dir, code, &settings).await
    }

    pub async fn run_tinker_streaming(
        &self,
        project_dir: &Path,
        code: &str,
        tx: mpsc::Sender<String>,
    ) -> String {
        let settings = self.settings();
        self.tinker
            .run_streaming(project_dir, code, &settings, tx)
            .await
    }

    // Log tail

    pub async fn start_tail(&self, project_dir: &Path) -> logs::Result<String> {
        self.tail.start(project_dir).await
    }

    pub async fn stop_tail(&self) {
        self.tail.stop().await
    }

    pub async fn is_tailing(&self) -> bool {
        self.tail.is_running().await
    }
}

fn next_project_id() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default()
        .to_string()
}
