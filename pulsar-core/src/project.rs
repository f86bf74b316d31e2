use serde::{Deserialize, Serialize};
use std::path::Path;

/// File that must exist at the root of every Laravel project.
pub const PROJECT_MARKER_FILE: &str = "artisan";

/// Log file followed by the log tail engine, relative to the project root.
pub const PROJECT_LOG_DIR: &str = "storage/logs";
pub const PROJECT_LOG_FILE: &str = "laravel.log";

/// A saved Laravel project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub path: String,
}

impl Project {
    pub fn new(id: impl Into<String>, name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Whether `dir` looks like a Laravel project root.
pub fn is_laravel_project(dir: &Path) -> bool {
    dir.join(PROJECT_MARKER_FILE).is_file()
}
