//! YAML export
//!
//! Same documents as the JSON export, with a comment header for people
//! reading the file.

use std::io::Write;

use super::json::{AnalyticsExport, LedgerExport};
use crate::error::{FundwiseError, FundwiseResult};
use crate::services::AnalyticsReport;
use crate::storage::FinanceRepository;

fn export_err(e: impl std::fmt::Display) -> FundwiseError {
    FundwiseError::Export(e.to_string())
}

pub fn export_analytics_yaml<W: Write>(report: &AnalyticsReport, writer: &mut W) -> FundwiseResult<()> {
    let export = AnalyticsExport::new(report);

    writeln!(writer, "# Fundwise analytics for {}", report.month).map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# Money amounts are in cents.").map_err(export_err)?;

    serde_yaml::to_writer(writer, &export).map_err(export_err)
}

pub fn export_ledger_yaml<W: Write>(repo: &dyn FinanceRepository, writer: &mut W) -> FundwiseResult<()> {
    let export = LedgerExport::from_repository(repo)?;

    writeln!(writer, "# Fundwise ledger export").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer, "# Money amounts are in cents.").map_err(export_err)?;

    serde_yaml::to_writer(writer, &export).map_err(export_err)
}

/// Parse a ledger previously written by [`export_ledger_yaml`]
pub fn import_ledger_yaml(yaml: &str) -> FundwiseResult<LedgerExport> {
    let ledger: LedgerExport = serde_yaml::from_str(yaml)?;
    ledger.check_schema()?;
    Ok(ledger)
}
