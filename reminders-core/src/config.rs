//! Global reminders configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{RemindersError, RemindersResult};

static DEFAULT_STORE_PATH: &str = "~/reminders";
const DEFAULT_LOCATION_RADIUS: f64 = 100.0;

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

fn default_location_radius() -> f64 {
    DEFAULT_LOCATION_RADIUS
}

/// Configuration at ~/.config/reminders/config.toml
///
/// Every key can also be set from the environment with a `REMINDERS_` prefix,
/// e.g. `REMINDERS_STORE_DIR`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RemindersConfig {
    #[serde(default = "default_store_path")]
    pub store_dir: PathBuf,

    /// Title of the list new reminders go to when none is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_list: Option<String>,

    /// Radius in meters for location alarms
    #[serde(default = "default_location_radius")]
    pub location_radius: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission_timeout_secs: Option<u64>,
}

impl Default for RemindersConfig {
    fn default() -> Self {
        RemindersConfig {
            store_dir: default_store_path(),
            default_list: None,
            location_radius: DEFAULT_LOCATION_RADIUS,
            permission_timeout_secs: None,
        }
    }
}

impl RemindersConfig {
    pub fn config_path() -> RemindersResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| RemindersError::Config("Could not determine config directory".into()))?
            .join("reminders");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user's config, creating a commented-out default file first
    /// if none exists.
    pub fn load() -> RemindersResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load config from `path` (which may be missing) layered with
    /// `REMINDERS_*` environment variables.
    pub fn load_from(path: &Path) -> RemindersResult<Self> {
        tracing::debug!(path = %path.display(), "loading config");

        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("REMINDERS"))
            .build()
            .map_err(|e| RemindersError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| RemindersError::Config(e.to_string()))
    }

    /// The store directory with `~` expanded.
    pub fn store_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.store_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn permission_timeout(&self) -> Option<Duration> {
        self.permission_timeout_secs.map(Duration::from_secs)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> RemindersResult<()> {
        let contents = format!(
            "\
# reminders configuration

# Where your reminder lists live:
# store_dir = \"{}\"

# List used when --calendar is not given:
# default_list = \"Reminders\"

# Radius in meters for location alarms:
# location_radius = {:.1}

# Give up waiting on the store after this many seconds:
# permission_timeout_secs = 30
",
            DEFAULT_STORE_PATH, DEFAULT_LOCATION_RADIUS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                RemindersError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| RemindersError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = RemindersConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.store_dir, PathBuf::from("~/reminders"));
        assert_eq!(config.location_radius, 100.0);
        assert!(config.default_list.is_none());
        assert!(config.permission_timeout().is_none());
    }

    #[test]
    fn default_file_is_all_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");
        RemindersConfig::create_default_config(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.lines().all(|l| l.is_empty() || l.starts_with('#')));

        let config = RemindersConfig::load_from(&path).unwrap();
        assert_eq!(config.store_dir, PathBuf::from("~/reminders"));
    }

    #[test]
    fn reads_values_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "store_dir = \"/tmp/todo\"\ndefault_list = \"Groceries\"\nlocation_radius = 250.0\npermission_timeout_secs = 5\n",
        )
        .unwrap();

        let config = RemindersConfig::load_from(&path).unwrap();
        assert_eq!(config.store_path(), PathBuf::from("/tmp/todo"));
        assert_eq!(config.default_list.as_deref(), Some("Groceries"));
        assert_eq!(config.location_radius, 250.0);
        assert_eq!(config.permission_timeout(), Some(Duration::from_secs(5)));
    }
}
