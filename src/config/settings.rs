//! User settings for Fundwise
//!
//! Display preferences and where dashboard data comes from.

use serde::{Deserialize, Serialize};

use super::paths::FundwisePaths;
use crate::error::FundwiseError;

/// Where the dashboard reads its records from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Built-in demo data
    #[default]
    Sample,
    /// JSON files in the data directory
    Local,
}

/// User settings for Fundwise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub data_source: DataSource,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// How many entries the dashboard's recent activity shows
    #[serde(default = "default_recent_activity_limit")]
    pub recent_activity_limit: usize,

    /// How many months the analytics history covers
    #[serde(default = "default_history_months")]
    pub history_months: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_recent_activity_limit() -> usize {
    4
}

fn default_history_months() -> usize {
    6
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            data_source: DataSource::default(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            recent_activity_limit: default_recent_activity_limit(),
            history_months: default_history_months(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &FundwisePaths) -> Result<Self, FundwiseError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                FundwiseError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FundwiseError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            tracing::debug!(path = %settings_path.display(), "loaded settings");
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FundwisePaths) -> Result<(), FundwiseError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            FundwiseError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            FundwiseError::Io(format!("Failed to write settings file: {}", e))
        })?;

        tracing::info!(path = %settings_path.display(), "saved settings");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.data_source, DataSource::Sample);
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.recent_activity_limit, 4);
        assert_eq!(settings.history_months, 6);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FundwisePaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            data_source: DataSource::Local,
            currency_symbol: "€".into(),
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.data_source, DataSource::Local);
        assert_eq!(loaded.currency_symbol, "€");
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let loaded: Settings = serde_json::from_str(r#"{"data_source": "local"}"#).unwrap();
        assert_eq!(loaded.data_source, DataSource::Local);
        assert_eq!(loaded.date_format, "%Y-%m-%d");
        assert_eq!(loaded.schema_version, 1);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FundwisePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, FundwiseError::Config(_)));
    }
}
