//! Baton configuration schema and loader
//!
//! Defines the TOML-parseable configuration: the roster, the activity
//! catalog and the display timing. Loaded once at startup.

use std::path::{Path, PathBuf};

use chrono::Duration;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::display::RefreshPolicy;
use crate::models::{Roster, StatusTag, TagCatalog};

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "baton.toml";

/// Environment variable overriding the configuration path
pub const CONFIG_ENV_VAR: &str = "BATON_CONFIG";

/// Configuration loaded from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatonConfig {
    /// Members taking part in the rotation
    pub roster: RosterSection,
    /// Status options offered to members
    #[serde(default)]
    pub status: StatusSection,
    /// Presentation timing
    #[serde(default)]
    pub display: DisplaySection,
}

/// Roster section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterSection {
    /// Member names in display order
    pub members: Vec<String>,
}

/// Status section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSection {
    /// Regular activities that can be combined with holding the baton
    #[serde(default = "default_activities")]
    pub activities: Vec<String>,
}

impl Default for StatusSection {
    fn default() -> Self {
        Self {
            activities: default_activities(),
        }
    }
}

fn default_activities() -> Vec<String> {
    TagCatalog::default_activities()
        .iter()
        .map(|a| a.to_string())
        .collect()
}

/// Display section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    /// How long a pass stays celebrated, in seconds
    pub celebration_secs: u32,
    /// Redraw cadence while celebrating, in seconds
    pub fast_refresh_secs: u32,
    /// Redraw cadence otherwise, in seconds
    pub slow_refresh_secs: u32,
    /// Entries shown in the hold-count leaderboard
    pub leaderboard_size: usize,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            celebration_secs: 10,
            fast_refresh_secs: 2,
            slow_refresh_secs: 5,
            leaderboard_size: 5,
        }
    }
}

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
    #[error("Could not determine config directory")]
    NoConfigDir,
    #[error("Roster is empty")]
    EmptyRoster,
    #[error("Roster entry {0} is blank")]
    BlankMember(usize),
    #[error("Member '{0}' appears more than once in the roster")]
    DuplicateMember(String),
    #[error("Activity '{0}' clashes with a built-in status")]
    ReservedActivity(String),
}

impl BatonConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        tracing::info!(
            path = %path.display(),
            members = config.roster.members.len(),
            "Loaded baton config"
        );
        Ok(config)
    }

    /// Parse and validate configuration from TOML content
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: BatonConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Configuration path: explicit argument, then environment, then the platform config dir
    pub fn resolve_path(explicit: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
        if let Some(path) = explicit {
            return Ok(path);
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Ok(PathBuf::from(path));
        }
        Self::default_path()
    }

    /// `baton.toml` inside the platform config directory
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dirs = ProjectDirs::from("dev", "onyx", "baton").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.roster.members.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }

        for (i, name) in self.roster.members.iter().enumerate() {
            let name = name.trim();
            if name.is_empty() {
                return Err(ConfigError::BlankMember(i + 1));
            }
            let first = self
                .roster
                .members
                .iter()
                .position(|m| m.trim() == name);
            if first != Some(i) {
                return Err(ConfigError::DuplicateMember(name.to_string()));
            }
        }

        for activity in &self.status.activities {
            if !matches!(StatusTag::parse(activity), StatusTag::Activity(_)) {
                return Err(ConfigError::ReservedActivity(activity.clone()));
            }
        }

        Ok(())
    }

    pub fn roster(&self) -> Roster {
        Roster::new(self.roster.members.iter().cloned())
    }

    pub fn catalog(&self) -> TagCatalog {
        TagCatalog::new(self.status.activities.iter().cloned())
    }

    pub fn refresh_policy(&self) -> RefreshPolicy {
        RefreshPolicy {
            celebration_window: Duration::seconds(self.display.celebration_secs.into()),
            fast_refresh: Duration::seconds(self.display.fast_refresh_secs.into()),
            slow_refresh: Duration::seconds(self.display.slow_refresh_secs.into()),
        }
    }

    pub fn leaderboard_size(&self) -> usize {
        self.display.leaderboard_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
[roster]
members = ["Alice", "Bob", "Carol"]
"#;
        let config = BatonConfig::from_toml(toml).unwrap();
        assert_eq!(config.roster().len(), 3);
        assert_eq!(config.status.activities, default_activities());
        assert_eq!(config.display.celebration_secs, 10);
        assert_eq!(config.leaderboard_size(), 5);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[roster]
members = ["Alice", "Bob"]

[status]
activities = ["Meeting", "Support call"]

[display]
celebration_secs = 6
fast_refresh_secs = 1
slow_refresh_secs = 4
leaderboard_size = 3
"#;
        let config = BatonConfig::from_toml(toml).unwrap();
        let catalog = config.catalog();
        assert!(catalog.allows(&StatusTag::Activity("Support call".into())));
        assert!(!catalog.allows(&StatusTag::Activity("HP/Email".into())));

        let policy = config.refresh_policy();
        assert_eq!(policy.celebration_window, Duration::seconds(6));
        assert_eq!(policy.fast_refresh, Duration::seconds(1));
        assert_eq!(policy.slow_refresh, Duration::seconds(4));
        assert_eq!(config.leaderboard_size(), 3);
    }

    #[test]
    fn test_rejects_empty_roster() {
        let err = BatonConfig::from_toml("[roster]\nmembers = []\n").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyRoster));
    }

    #[test]
    fn test_rejects_duplicate_member() {
        let err =
            BatonConfig::from_toml("[roster]\nmembers = [\"Alice\", \" Alice\"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateMember(name) if name == "Alice"));
    }

    #[test]
    fn test_rejects_blank_member() {
        let err = BatonConfig::from_toml("[roster]\nmembers = [\"Alice\", \"  \"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::BlankMember(2)));
    }

    #[test]
    fn test_rejects_reserved_activity() {
        let toml = r#"
[roster]
members = ["Alice"]

[status]
activities = ["Meeting", "Lunch"]
"#;
        let err = BatonConfig::from_toml(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ReservedActivity(name) if name == "Lunch"));
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[roster]\nmembers = [\"Alice\"]\n").unwrap();

        let config = BatonConfig::load(&path).unwrap();
        assert_eq!(config.roster().iter().collect::<Vec<_>>(), vec!["Alice"]);
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.toml");
        assert!(matches!(
            BatonConfig::load(&path),
            Err(ConfigError::NotFound(_))
        ));
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = PathBuf::from("/tmp/custom-baton.toml");
        assert_eq!(BatonConfig::resolve_path(Some(path.clone())).unwrap(), path);
    }
}
