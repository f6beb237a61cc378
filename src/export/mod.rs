//! Export module for Fundwise
//!
//! Writes the analytics report or the whole ledger in one of three formats:
//! - CSV: one table, for spreadsheets
//! - JSON: machine-readable, schema-versioned
//! - YAML: the JSON document with a readable header
//!
//! JSON and YAML ledgers can be read back with [`read_ledger`] and merged into
//! a repository with [`import_ledger`].

pub mod csv;
pub mod json;
pub mod yaml;

use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

pub use json::{AnalyticsExport, LedgerExport, LedgerMetadata, EXPORT_SCHEMA_VERSION};

use crate::error::{FundwiseError, FundwiseResult};
use crate::services::AnalyticsReport;
use crate::storage::FinanceRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    Yaml,
}

impl ExportFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = FundwiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(FundwiseError::Export(format!(
                "Unknown export format '{}': use csv, json or yaml",
                other
            ))),
        }
    }
}

pub fn export_analytics<W: Write>(
    report: &AnalyticsReport,
    format: ExportFormat,
    writer: &mut W,
) -> FundwiseResult<()> {
    match format {
        ExportFormat::Csv => csv::export_analytics_csv(report, writer),
        ExportFormat::Json => json::export_analytics_json(report, writer),
        ExportFormat::Yaml => yaml::export_analytics_yaml(report, writer),
    }
}

pub fn export_ledger<W: Write>(
    repo: &dyn FinanceRepository,
    format: ExportFormat,
    writer: &mut W,
) -> FundwiseResult<()> {
    match format {
        ExportFormat::Csv => csv::export_records_csv(&repo.records()?, writer),
        ExportFormat::Json => json::export_ledger_json(repo, writer),
        ExportFormat::Yaml => yaml::export_ledger_yaml(repo, writer),
    }
}

/// Read a JSON or YAML ledger file
pub fn read_ledger(path: &Path, format: ExportFormat) -> FundwiseResult<LedgerExport> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| FundwiseError::Io(format!("Cannot read {}: {}", path.display(), e)))?;
    match format {
        ExportFormat::Json => json::import_ledger_json(&text),
        ExportFormat::Yaml => yaml::import_ledger_yaml(&text),
        ExportFormat::Csv => Err(FundwiseError::Export(
            "CSV exports hold records only; import a JSON or YAML ledger".into(),
        )),
    }
}

/// Outcome of merging a ledger into a repository
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub records: usize,
    pub goals: usize,
    pub budget_limits: usize,
    /// Records and goals whose id is already present
    pub duplicates_skipped: usize,
    /// Entries that failed validation, with the reason
    pub errors: Vec<String>,
}

/// Merge `ledger` into `repo`.
///
/// Records and goals already present (same id) are skipped; budget limits
/// overwrite the current ones. Invalid entries are reported, not fatal.
pub fn import_ledger(
    repo: &dyn FinanceRepository,
    ledger: LedgerExport,
) -> FundwiseResult<ImportSummary> {
    let mut summary = ImportSummary::default();

    let known_records: HashSet<_> = repo.records()?.into_iter().map(|r| r.id).collect();
    for record in ledger.records {
        if known_records.contains(&record.id) {
            summary.duplicates_skipped += 1;
            continue;
        }
        let label = format!("record {}", record);
        match repo.add_record(record) {
            Ok(()) => summary.records += 1,
            Err(e) if e.is_validation() => summary.errors.push(format!("{}: {}", label, e)),
            Err(e) => return Err(e),
        }
    }

    let known_goals: HashSet<_> = repo.goals()?.into_iter().map(|g| g.id).collect();
    for goal in ledger.goals {
        if known_goals.contains(&goal.id) {
            summary.duplicates_skipped += 1;
            continue;
        }
        let label = format!("goal {}", goal.title);
        match repo.add_goal(goal) {
            Ok(()) => summary.goals += 1,
            Err(e) if e.is_validation() => summary.errors.push(format!("{}: {}", label, e)),
            Err(e) => return Err(e),
        }
    }

    for limit in ledger.budget_limits {
        match repo.set_budget_limit(limit.category, limit.limit) {
            Ok(()) => summary.budget_limits += 1,
            Err(e) if e.is_validation() => summary
                .errors
                .push(format!("{} budget: {}", limit.category, e)),
            Err(e) => return Err(e),
        }
    }

    tracing::info!(
        records = summary.records,
        goals = summary.goals,
        skipped = summary.duplicates_skipped,
        errors = summary.errors.len(),
        "imported ledger"
    );
    Ok(summary)
}

/// Create `path` (and its parent directories) and run `write` against it
pub fn write_to_file<F>(path: &Path, write: F) -> FundwiseResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> FundwiseResult<()>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)
        .map_err(|e| FundwiseError::Export(format!("Cannot create {}: {}", path.display(), e)))?;
    let mut writer = BufWriter::new(file);
    write(&mut writer)?;
    writer.flush()?;

    tracing::info!(path = %path.display(), "export written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FundwisePaths;
    use crate::models::{ExpenseRecord, Money};
    use crate::storage::{SampleData, Storage};
    use tempfile::TempDir;

    #[test]
    fn test_format_parsing() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("yml".parse::<ExportFormat>().unwrap(), ExportFormat::Yaml);
        assert!("xml".parse::<ExportFormat>().is_err());
        assert_eq!(
            ExportFormat::from_path(Path::new("out/report.json")),
            Some(ExportFormat::Json)
        );
        assert_eq!(ExportFormat::from_path(Path::new("report")), None);
    }

    #[test]
    fn test_write_ledger_to_nested_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("exports").join("ledger.yaml");

        let sample = SampleData::new();
        write_to_file(&path, |w| export_ledger(&sample, ExportFormat::Yaml, w)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Emergency Fund"));
    }

    #[test]
    fn test_import_ledger_skips_duplicates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");
        let sample = SampleData::new();
        write_to_file(&path, |w| export_ledger(&sample, ExportFormat::Json, w)).unwrap();

        let storage =
            Storage::open(FundwisePaths::with_base_dir(temp_dir.path().join("home"))).unwrap();
        let ledger = read_ledger(&path, ExportFormat::Json).unwrap();
        let summary = import_ledger(&storage, ledger).unwrap();

        let record_count = sample.records().unwrap().len();
        assert_eq!(summary.records, record_count);
        assert_eq!(summary.goals, 4);
        assert_eq!(summary.budget_limits, 4);
        assert_eq!(summary.duplicates_skipped, 0);
        assert!(summary.errors.is_empty());
        assert_eq!(storage.records().unwrap().len(), record_count);
        assert_eq!(storage.find_goal("New Laptop").unwrap().current_amount, Money::from_dollars(800));

        let again = import_ledger(&storage, read_ledger(&path, ExportFormat::Json).unwrap()).unwrap();
        assert_eq!(again.records, 0);
        assert_eq!(again.duplicates_skipped, record_count + 4);
    }

    #[test]
    fn test_import_ledger_reports_invalid_entries() {
        let sample = SampleData::new();
        let mut ledger = LedgerExport::from_repository(&sample).unwrap();
        let today = chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let mut broken = ExpenseRecord::income("Lottery", Money::from_dollars(5), today);
        broken.amount = Money::zero();
        ledger.records = vec![broken];
        ledger.goals.clear();
        ledger.budget_limits.clear();

        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(FundwisePaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let summary = import_ledger(&storage, ledger).unwrap();
        assert_eq!(summary.records, 0);
        assert_eq!(summary.errors.len(), 1);
        assert!(summary.errors[0].contains("Lottery"));
        assert!(storage.records().unwrap().is_empty());
    }

    #[test]
    fn test_csv_ledger_cannot_be_read() {
        let err = read_ledger(Path::new("ledger.csv"), ExportFormat::Csv).unwrap_err();
        assert!(matches!(err, FundwiseError::Export(_)));
    }
}
