//! REPL bridge: run a PHP snippet through `php artisan tinker`.
//!
//! Every outcome is rendered as display text. Failures start with `Error`
//! because the consumer is a plain output pane with no error channel.

mod process;
mod transcript;

pub use transcript::{
    BANNER_MARKERS, EMPTY_RESULT, EXIT_COMMAND, PROMPT_MARKERS, TranscriptLine, VALUE_MARKER,
    classify_line, is_streamed_line, parse_transcript,
};

use std::path::{Path, PathBuf};
use std::time::Duration;

use pulsar_core::{Settings, is_laravel_project};
use pulsar_runtime::{ResolveContext, ResolveError, resolve_php_binary, resolve_php_binary_with};
use thiserror::Error;
use tokio::process::{Child, ChildStdin};
use tokio::sync::mpsc;

use process::Completion;

/// Wall-clock limit for one tinker invocation.
pub const TINKER_TIMEOUT: Duration = Duration::from_secs(60);

const PHP_OPEN_TAG: &str = "<?php";

#[derive(Debug, Error)]
pub enum TinkerError {
    #[error("Error: Invalid Laravel project path")]
    InvalidProject,

    #[error("Error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Error starting tinker: {0}")]
    Spawn(std::io::Error),

    #[error("Error: tinker stdin is unavailable")]
    StdinUnavailable,

    #[error("Error: Execution timed out ({0}s limit)")]
    Timeout(u64),
}

/// Strip a leading `<?php` tag and surrounding whitespace; tinker rejects the tag.
pub fn normalize_code(code: &str) -> String {
    let trimmed = code.trim();
    trimmed
        .strip_prefix(PHP_OPEN_TAG)
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}

#[derive(Debug, Clone)]
pub struct TinkerBridge {
    deadline: Duration,
    resolve_context: Option<ResolveContext>,
}

impl Default for TinkerBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl TinkerBridge {
    pub fn new() -> Self {
        Self {
            deadline: TINKER_TIMEOUT,
            resolve_context: None,
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Resolve interpreters against a fixed context instead of the live
    /// process environment.
    pub fn with_resolve_context(mut self, ctx: ResolveContext) -> Self {
        self.resolve_context = Some(ctx);
        self
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Run `code` in the project's REPL and return the cleaned result.
    pub async fn run(&self, project_dir: &Path, code: &str, settings: &Settings) -> String {
        match self.try_run(project_dir, code, settings).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(project = %project_dir.display(), error = %e, "Tinker run failed");
                e.to_string()
            }
        }
    }

    /// Like [`TinkerBridge::run`] but forwards output lines through `tx` as
    /// they arrive. Only raw prompt lines are filtered.
    pub async fn run_streaming(
        &self,
        project_dir: &Path,
        code: &str,
        settings: &Settings,
        tx: mpsc::Sender<String>,
    ) -> String {
        match self.try_run_streaming(project_dir, code, settings, tx).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(project = %project_dir.display(), error = %e, "Streaming tinker run failed");
                e.to_string()
            }
        }
    }

    async fn try_run(
        &self,
        project_dir: &Path,
        code: &str,
        settings: &Settings,
    ) -> Result<String, TinkerError> {
        let (child, stdin) = self.start(project_dir, settings)?;
        let writer = process::feed_input(stdin, normalize_code(code));

        match process::collect_combined(child, self.deadline).await {
            Completion::Finished(transcript) => {
                Ok(parse_transcript(&String::from_utf8_lossy(&transcript)))
            }
            Completion::TimedOut => {
                writer.abort();
                Err(TinkerError::Timeout(self.deadline.as_secs()))
            }
        }
    }

    async fn try_run_streaming(
        &self,
        project_dir: &Path,
        code: &str,
        settings: &Settings,
        tx: mpsc::Sender<String>,
    ) -> Result<String, TinkerError> {
        let (child, stdin) = self.start(project_dir, settings)?;
        let writer = process::feed_input(stdin, normalize_code(code));

        match process::stream_lines(child, self.deadline, tx).await {
            Completion::Finished(collected) => Ok(collected.trim().to_string()),
            Completion::TimedOut => {
                writer.abort();
                Err(TinkerError::Timeout(self.deadline.as_secs()))
            }
        }
    }

    fn resolve_php(&self, project_dir: &Path, settings: &Settings) -> Result<PathBuf, ResolveError> {
        match self.resolve_context.as_ref() {
            Some(ctx) => resolve_php_binary_with(project_dir, settings, ctx),
            None => resolve_php_binary(project_dir, settings),
        }
    }

    fn start(&self, project_dir: &Path, settings: &Settings) -> Result<(Child, ChildStdin), TinkerError> {
        if !is_laravel_project(project_dir) {
            return Err(TinkerError::InvalidProject);
        }

        let php = self.resolve_php(project_dir, settings)?;
        tracing::info!(
            project = %project_dir.display(),
            php = %php.display(),
            "Starting tinker"
        );
        process::spawn_tinker(&php, project_dir)
    }
}
