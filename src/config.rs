//! calgate configuration.
//!
//! A small string-keyed lookup: the consent justification consulted once
//! by the authorization gate, the writer's default-calendar designation
//! and the store binary selection.

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::{Deserialize, Serialize};

use calgate_core::error::{CalGateError, CalGateResult};

/// Configuration at `<config_dir>/calgate/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalGateConfig {
    /// Human-readable justification shown to the user when calendar
    /// access is requested. Required for the authorize flow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendars_usage_description: Option<String>,

    /// Designated default calendar (id or title) for new events. Falls
    /// back to the first writable calendar when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_calendar: Option<String>,

    /// Suffix of the platform store binary (`calgate-store-<name>`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
}

impl CalGateConfig {
    /// Programmatic construction for embedders that carry their own
    /// metadata instead of a config file.
    pub fn with_usage_description(description: &str) -> Self {
        CalGateConfig {
            calendars_usage_description: Some(description.to_string()),
            ..Default::default()
        }
    }

    pub fn config_path() -> CalGateResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalGateError::Config("Could not determine config directory".into()))?
            .join("calgate");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented template on
    /// first use.
    pub fn load() -> CalGateResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> CalGateResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| CalGateError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalGateError::Config(e.to_string()))
    }

    pub fn save_to(&self, path: &Path) -> CalGateResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| CalGateError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalGateError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, content)
            .map_err(|e| CalGateError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalGateResult<()> {
        let contents = "\
# calgate configuration

# Shown to the user when calendar access is requested (required):
# calendars_usage_description = \"Used to show and create your calendar events\"

# Default calendar (id or title) for new events:
# default_calendar = \"Personal\"

# Platform store integration binary, resolved as calgate-store-<name>:
# store = \"macos\"
";

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalGateError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalGateError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = CalGateConfig {
            calendars_usage_description: Some("Shows your agenda".to_string()),
            default_calendar: Some("Personal".to_string()),
            store: None,
        };
        config.save_to(&path).unwrap();

        let loaded = CalGateConfig::load_from(&path).unwrap();
        assert_eq!(
            loaded.calendars_usage_description.as_deref(),
            Some("Shows your agenda")
        );
        assert_eq!(loaded.default_calendar.as_deref(), Some("Personal"));
        assert!(loaded.store.is_none());
    }

    #[test]
    fn test_default_template_loads_with_everything_unset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        CalGateConfig::create_default_config(&path).unwrap();
        let loaded = CalGateConfig::load_from(&path).unwrap();

        assert!(loaded.calendars_usage_description.is_none());
        assert!(loaded.default_calendar.is_none());
        assert!(loaded.store.is_none());
    }
}
