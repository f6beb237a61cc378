//! JSON export
//!
//! Two documents: the analytics report for one month, and the full ledger
//! (records, goals, budget limits). Both carry a schema version.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FundwiseError, FundwiseResult};
use crate::models::{BudgetLimit, ExpenseRecord, Goal};
use crate::services::AnalyticsReport;
use crate::storage::FinanceRepository;

pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsExport<'a> {
    pub schema_version: &'static str,
    pub exported_at: DateTime<Utc>,
    pub app_version: &'static str,
    pub report: &'a AnalyticsReport,
}

impl<'a> AnalyticsExport<'a> {
    pub fn new(report: &'a AnalyticsReport) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION"),
            report,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerMetadata {
    pub record_count: usize,
    pub goal_count: usize,
    pub earliest_record: Option<String>,
    pub latest_record: Option<String>,
}

/// Everything a repository holds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub records: Vec<ExpenseRecord>,
    pub goals: Vec<Goal>,
    pub budget_limits: Vec<BudgetLimit>,
    pub metadata: LedgerMetadata,
}

impl LedgerExport {
    pub fn from_repository(repo: &dyn FinanceRepository) -> FundwiseResult<Self> {
        let records = repo.records()?;
        let goals = repo.goals()?;
        let budget_limits = repo.budget_limits()?;

        let metadata = LedgerMetadata {
            record_count: records.len(),
            goal_count: goals.len(),
            earliest_record: records.iter().map(|r| r.date).min().map(|d| d.to_string()),
            latest_record: records.iter().map(|r| r.date).max().map(|d| d.to_string()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            records,
            goals,
            budget_limits,
            metadata,
        })
    }

    /// Reject documents written by an incompatible schema
    pub fn check_schema(&self) -> FundwiseResult<()> {
        let major = |v: &str| v.split('.').next().map(str::to_owned);
        if major(&self.schema_version) != major(EXPORT_SCHEMA_VERSION) {
            return Err(FundwiseError::Export(format!(
                "Unsupported ledger schema {} (expected {})",
                self.schema_version, EXPORT_SCHEMA_VERSION
            )));
        }
        Ok(())
    }
}

pub fn export_analytics_json<W: Write>(report: &AnalyticsReport, writer: &mut W) -> FundwiseResult<()> {
    serde_json::to_writer_pretty(&mut *writer, &AnalyticsExport::new(report))
        .map_err(|e| FundwiseError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| FundwiseError::Export(e.to_string()))
}

pub fn export_ledger_json<W: Write>(repo: &dyn FinanceRepository, writer: &mut W) -> FundwiseResult<()> {
    let export = LedgerExport::from_repository(repo)?;
    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| FundwiseError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| FundwiseError::Export(e.to_string()))
}

/// Parse a ledger previously written by [`export_ledger_json`]
pub fn import_ledger_json(json: &str) -> FundwiseResult<LedgerExport> {
    let ledger: LedgerExport = serde_json::from_str(json)?;
    ledger.check_schema()?;
    Ok(ledger)
}
