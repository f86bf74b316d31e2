use std::fs;
use std::path::{Path, PathBuf};

use pulsar_core::Project;

use super::error::{ConfigError, Result};

pub const PROJECTS_FILE_NAME: &str = "projects.json";

pub fn projects_path(home: &Path) -> PathBuf {
    home.join(PROJECTS_FILE_NAME)
}

/// Load the saved project list. A missing, empty or unreadable file yields
/// an empty list so a corrupt file never blocks startup.
pub fn load_projects(path: &Path) -> Vec<Project> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return Vec::new(),
    };
    if content.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str(&content) {
        Ok(projects) => projects,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable project list");
            Vec::new()
        }
    }
}

pub fn save_projects(path: &Path, projects: &[Project]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ConfigError::FileWrite(parent.to_path_buf(), e))?;
    }
    let content = serde_json::to_string_pretty(projects)?;
    fs::write(path, content).map_err(|e| ConfigError::FileWrite(path.to_path_buf(), e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_empty_list() {
        let temp = TempDir::new().unwrap();
        assert!(load_projects(&projects_path(temp.path())).is_empty());
    }

    #[test]
    fn corrupt_file_is_empty_list() {
        let temp = TempDir::new().unwrap();
        let path = projects_path(temp.path());
        fs::write(&path, "[{").unwrap();
        assert!(load_projects(&path).is_empty());
    }

    #[test]
    fn saved_projects_load_in_order() {
        let temp = TempDir::new().unwrap();
        let path = projects_path(temp.path());
        let projects = vec![
            Project::new("1", "shop", "/srv/shop"),
            Project::new("2", "blog", "/srv/blog"),
        ];

        save_projects(&path, &projects).unwrap();

        assert_eq!(load_projects(&path), projects);
    }
}
