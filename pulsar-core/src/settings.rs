use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// UI colour theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Parse a theme name. Anything that is not `light` falls back to dark.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Theme::from_name).unwrap_or_default())
    }
}

/// Process-wide user settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub theme: Theme,

    /// Explicit PHP binary, consulted after project-local and Herd installs.
    #[serde(default)]
    pub php_path: String,
}

impl Settings {
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    pub fn normalize(&mut self) {
        self.php_path = self.php_path.trim().to_string();
    }

    /// The interpreter override, if one is configured.
    pub fn php_path_override(&self) -> Option<&str> {
        let trimmed = self.php_path.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}
