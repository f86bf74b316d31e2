//! Log tail engine for a project's `storage/logs/laravel.log`.
//!
//! `start` returns the last lines of the file and spawns a follower that
//! polls for appended lines. At most one follower exists per [`LogTail`];
//! starting again signals the previous follower to stop first.

mod follow;
mod snapshot;

pub use snapshot::read_log_tail;

use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use pulsar_core::{PROJECT_LOG_DIR, PROJECT_LOG_FILE};
use thiserror::Error;
use tokio::io::AsyncSeekExt;
use tokio::sync::{Mutex, watch};

use crate::host::Host;

/// Lines returned by [`LogTail::start`] as the initial view.
pub const LOG_TAIL_INITIAL_LINES: usize = 200;

/// Delay between read attempts when the follower is at end of file.
pub const LOG_TAIL_POLL_MS: u64 = 300;

#[derive(Debug, Error)]
pub enum TailError {
    #[error("Project path is empty")]
    EmptyProjectPath,

    #[error("Failed to create log directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to read log file {0}: {1}")]
    Read(PathBuf, std::io::Error),
}

pub type Result<T> = std::result::Result<T, TailError>;

/// Location of the Laravel log for a project.
pub fn project_log_path(project_dir: &Path) -> PathBuf {
    project_dir.join(PROJECT_LOG_DIR).join(PROJECT_LOG_FILE)
}

struct TailSession {
    log_path: PathBuf,
    stop_tx: watch::Sender<bool>,
}

impl TailSession {
    fn cancel(self) {
        tracing::info!(path = %self.log_path.display(), "Stopping log tail");
        let _ = self.stop_tx.send(true);
    }
}

pub struct LogTail {
    host: Arc<dyn Host>,
    poll_interval: Duration,
    session: Mutex<Option<TailSession>>,
}

impl LogTail {
    pub fn new(host: Arc<dyn Host>) -> Self {
        Self {
            host,
            poll_interval: Duration::from_millis(LOG_TAIL_POLL_MS),
            session: Mutex::new(None),
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Begin following the project's log. Returns the last
    /// [`LOG_TAIL_INITIAL_LINES`] lines joined with `\n`.
    pub async fn start(&self, project_dir: &Path) -> Result<String> {
        if project_dir.as_os_str().is_empty() || project_dir.to_string_lossy().trim().is_empty() {
            return Err(TailError::EmptyProjectPath);
        }

        let log_path = project_log_path(project_dir);
        if let Some(dir) = log_path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| TailError::CreateDir(dir.to_path_buf(), e))?;
        }

        let mut session = self.session.lock().await;
        if let Some(previous) = session.take() {
            previous.cancel();
        }

        let snapshot = read_log_tail(&log_path, LOG_TAIL_INITIAL_LINES)
            .await
            .map_err(|e| TailError::Read(log_path.clone(), e))?;

        let mut file = tokio::fs::File::open(&log_path)
            .await
            .map_err(|e| TailError::Read(log_path.clone(), e))?;
        file.seek(SeekFrom::End(0))
            .await
            .map_err(|e| TailError::Read(log_path.clone(), e))?;

        let (stop_tx, stop_rx) = watch::channel(false);
        tokio::spawn(follow::follow_log(
            file,
            self.host.clone(),
            stop_rx,
            self.poll_interval,
        ));

        tracing::info!(
            path = %log_path.display(),
            lines = snapshot.len(),
            "Started log tail"
        );
        *session = Some(TailSession { log_path, stop_tx });

        Ok(snapshot.join("\n"))
    }

    /// Stop the active follower. Does nothing when idle.
    pub async fn stop(&self) {
        if let Some(session) = self.session.lock().await.take() {
            session.cancel();
        }
    }

    pub async fn is_running(&self) -> bool {
        self.session.lock().await.is_some()
    }

    /// Log file of the active session.
    pub async fn log_path(&self) -> Option<PathBuf> {
        self.session
            .lock()
            .await
            .as_ref()
            .map(|session| session.log_path.clone())
    }

    #[cfg(test)]
    async fn subscribe_stop(&self) -> Option<watch::Receiver<bool>> {
        self.session
            .lock()
            .await
            .as_ref()
            .map(|session| session.stop_tx.subscribe())
    }
}
