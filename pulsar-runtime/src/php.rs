use std::path::{Path, PathBuf};

use pulsar_core::Settings;
use thiserror::Error;

/// Environment variable that points at a PHP binary.
pub const PHP_PATH_ENV: &str = "PULSAR_PHP_PATH";

#[cfg(windows)]
pub const PHP_BINARY_NAME: &str = "php.exe";
#[cfg(not(windows))]
pub const PHP_BINARY_NAME: &str = "php";

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(
        "PHP binary not found. Set the PHP path in settings or export PULSAR_PHP_PATH to point at a php executable."
    )]
    InterpreterNotFound,
}

pub type Result<T> = std::result::Result<T, ResolveError>;

/// Process-level inputs consulted during resolution.
///
/// Kept separate from the probing logic so tests can resolve against a fake
/// home directory and PATH.
#[derive(Debug, Clone, Default)]
pub struct ResolveContext {
    pub home_dir: Option<PathBuf>,
    pub env_override: Option<String>,
    pub path_lookup: Option<PathBuf>,
}

impl ResolveContext {
    pub fn from_env() -> Self {
        Self {
            home_dir: dirs::home_dir(),
            env_override: std::env::var(PHP_PATH_ENV).ok(),
            path_lookup: which::which(PHP_BINARY_NAME).ok(),
        }
    }
}

/// Build the ordered list of places a PHP binary may live.
///
/// Order:
/// 1. `<project>/.herd/bin/php`
/// 2. `<project>/.config/herd/bin/php`
/// 3. `<project>/vendor/bin/php`
/// 4. `~/.config/herd/bin/php`
/// 5. Herd's platform install locations
/// 6. `phpPath` from settings
/// 7. `$PULSAR_PHP_PATH`
/// 8. `php` on PATH
pub fn candidate_paths(project_dir: &Path, settings: &Settings, ctx: &ResolveContext) -> Vec<PathBuf> {
    let mut candidates = vec![
        project_dir.join(".herd").join("bin").join(PHP_BINARY_NAME),
        project_dir
            .join(".config")
            .join("herd")
            .join("bin")
            .join(PHP_BINARY_NAME),
        project_dir.join("vendor").join("bin").join(PHP_BINARY_NAME),
    ];

    if let Some(home) = ctx.home_dir.as_deref() {
        candidates.push(home.join(".config").join("herd").join("bin").join(PHP_BINARY_NAME));
    }

    candidates.extend(platform_candidates());

    if let Some(path) = settings.php_path_override() {
        candidates.push(PathBuf::from(path));
    }

    if let Some(value) = ctx.env_override.as_deref()
        && !value.trim().is_empty()
    {
        candidates.push(PathBuf::from(value.trim()));
    }

    if let Some(found) = ctx.path_lookup.as_ref() {
        candidates.push(found.clone());
    }

    candidates
}

#[cfg(target_os = "macos")]
fn platform_candidates() -> Vec<PathBuf> {
    vec![PathBuf::from(
        "/Applications/Herd.app/Contents/Resources/bin/php",
    )]
}

#[cfg(windows)]
fn platform_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Ok(profile) = std::env::var("USERPROFILE")
        && !profile.trim().is_empty()
    {
        candidates.push(
            PathBuf::from(profile)
                .join(".config")
                .join("herd")
                .join("bin")
                .join(PHP_BINARY_NAME),
        );
    }
    candidates.push(PathBuf::from(r"C:\Program Files\Herd\resources\bin\php.exe"));
    candidates
}

#[cfg(not(any(target_os = "macos", windows)))]
fn platform_candidates() -> Vec<PathBuf> {
    Vec::new()
}

/// Resolve the PHP binary for a project using the real process environment.
pub fn resolve_php_binary(project_dir: &Path, settings: &Settings) -> Result<PathBuf> {
    resolve_php_binary_with(project_dir, settings, &ResolveContext::from_env())
}

/// Resolve the PHP binary for a project: first candidate that is an existing
/// non-directory file wins.
pub fn resolve_php_binary_with(
    project_dir: &Path,
    settings: &Settings,
    ctx: &ResolveContext,
) -> Result<PathBuf> {
    for candidate in candidate_paths(project_dir, settings, ctx) {
        match std::fs::metadata(&candidate) {
            Ok(meta) if !meta.is_dir() => {
                tracing::debug!(path = %candidate.display(), "Resolved PHP binary");
                return Ok(candidate);
            }
            _ => continue,
        }
    }

    tracing::warn!(project = %project_dir.display(), "No PHP binary found");
    Err(ResolveError::InterpreterNotFound)
}
