//! JSON data files
//!
//! Records, goals and budget limits each live in one pretty-printed JSON
//! file. Writes go to a per-process temp file next to the target and are
//! renamed into place, so a crash or a concurrent `fundwise` run never leaves
//! a half-written ledger behind.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::FundwiseError;

fn storage_err(action: &str, path: &Path, e: impl std::fmt::Display) -> FundwiseError {
    FundwiseError::Storage(format!("Failed to {} {}: {}", action, path.display(), e))
}

/// Sibling temp file, unique to this process
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "data".to_string());
    path.with_file_name(format!(".{}.{}.tmp", name, std::process::id()))
}

/// Read a data file; a missing file yields `T::default()`.
///
/// A file that exists but does not parse is an error and is left untouched.
pub fn read_json<T, P>(path: P) -> Result<T, FundwiseError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        tracing::debug!(path = %path.display(), "no data file yet, using defaults");
        return Ok(T::default());
    }

    let file = File::open(path).map_err(|e| storage_err("open", path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "data file is unreadable");
        FundwiseError::Storage(format!(
            "Failed to parse {}: {} (fix or move the file aside to start fresh)",
            path.display(),
            e
        ))
    })
}

/// Replace a data file with `data`, all or nothing
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), FundwiseError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| storage_err("create directory", parent, e))?;
    }

    let temp_path = temp_path_for(path);
    let result = write_temp(&temp_path, data).and_then(|bytes| {
        fs::rename(&temp_path, path)
            .map(|_| bytes)
            .map_err(|e| storage_err("replace", path, e))
    });

    match result {
        Ok(bytes) => {
            tracing::debug!(path = %path.display(), bytes, "wrote data file");
            Ok(())
        }
        Err(e) => {
            let _ = fs::remove_file(&temp_path);
            Err(e)
        }
    }
}

/// Serialize into `temp_path` and sync it; returns the size written
fn write_temp<T: Serialize>(temp_path: &Path, data: &T) -> Result<u64, FundwiseError> {
    let file = File::create(temp_path).map_err(|e| storage_err("create", temp_path, e))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| storage_err("serialize", temp_path, e))?;
    writer
        .write_all(b"\n")
        .and_then(|_| writer.flush())
        .map_err(|e| storage_err("write", temp_path, e))?;

    let file = writer.get_ref();
    file.sync_all().map_err(|e| storage_err("sync", temp_path, e))?;
    Ok(file.metadata().map(|m| m.len()).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetLimit, Category, Money};
    use tempfile::TempDir;

    fn limits() -> Vec<BudgetLimit> {
        vec![
            BudgetLimit::new(Category::FoodDining, Money::from_dollars(300)),
            BudgetLimit::new(Category::Transportation, Money::from_dollars(100)),
        ]
    }

    #[test]
    fn test_missing_file_reads_as_default() {
        let temp_dir = TempDir::new().unwrap();
        let loaded: Vec<BudgetLimit> = read_json(temp_dir.path().join("budgets.json")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budgets.json");

        write_json_atomic(&path, &limits()).unwrap();
        let loaded: Vec<BudgetLimit> = read_json(&path).unwrap();
        assert_eq!(loaded, limits());

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"Food & Dining\""));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_only_the_data_file_remains() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budgets.json");

        write_json_atomic(&path, &limits()).unwrap();
        write_json_atomic(&path, &Vec::<BudgetLimit>::new()).unwrap();

        let names: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, ["budgets.json"]);
        assert!(read_json::<Vec<BudgetLimit>, _>(&path).unwrap().is_empty());
    }

    #[test]
    fn test_write_creates_data_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("home").join("data").join("records.json");

        write_json_atomic(&path, &limits()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_temp_file_is_hidden_sibling() {
        let temp = temp_path_for(Path::new("/tmp/data/goals.json"));
        assert_eq!(temp.parent(), Some(Path::new("/tmp/data")));
        let name = temp.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(".goals.json."));
        assert!(name.ends_with(".tmp"));
    }

    #[test]
    fn test_corrupt_file_is_kept_and_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("goals.json");
        fs::write(&path, "not json at all").unwrap();

        let err = read_json::<Vec<BudgetLimit>, _>(&path).unwrap_err();
        assert!(matches!(err, FundwiseError::Storage(_)));
        assert!(err.to_string().contains("fix or move the file aside"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "not json at all");
    }
}
