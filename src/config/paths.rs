//! Path management for Fundwise
//!
//! ## Path Resolution Order
//!
//! 1. `FUNDWISE_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories`
//!    (`~/.config/fundwise` on Linux, `~/Library/Application Support/fundwise`
//!    on macOS, `%APPDATA%\fundwise\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::FundwiseError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "FUNDWISE_DATA_DIR";

/// Manages all paths used by Fundwise
#[derive(Debug, Clone)]
pub struct FundwisePaths {
    base_dir: PathBuf,
}

impl FundwisePaths {
    /// Resolve paths from the environment or the platform defaults
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, FundwiseError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create FundwisePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding the JSON data files
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Default destination for exported reports
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn records_file(&self) -> PathBuf {
        self.data_dir().join("records.json")
    }

    pub fn goals_file(&self) -> PathBuf {
        self.data_dir().join("goals.json")
    }

    /// Per-category budget limits
    pub fn budgets_file(&self) -> PathBuf {
        self.data_dir().join("budgets.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), FundwiseError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FundwiseError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| FundwiseError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Whether `fundwise init` has been run (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, FundwiseError> {
    ProjectDirs::from("", "", "fundwise")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| FundwiseError::Config("Could not determine home directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FundwisePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.export_dir(), temp_dir.path().join("exports"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FundwisePaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FundwisePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.records_file(),
            temp_dir.path().join("data").join("records.json")
        );
        assert_eq!(
            paths.budgets_file(),
            temp_dir.path().join("data").join("budgets.json")
        );
    }
}
