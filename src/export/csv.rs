//! CSV export
//!
//! Spreadsheet-friendly tables: one row per record, or one row per category
//! for the analytics report. Amounts are written in dollars with two decimals.

use std::io::Write;

use crate::error::{FundwiseError, FundwiseResult};
use crate::models::{ExpenseRecord, Money};
use crate::services::AnalyticsReport;

fn dollars(amount: Money) -> String {
    amount.format_with_symbol("")
}

fn pct(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_default()
}

pub fn export_records_csv<W: Write>(records: &[ExpenseRecord], writer: W) -> FundwiseResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["ID", "Date", "Type", "Description", "Category", "Amount", "Notes"])?;

    for record in records {
        csv.write_record([
            record.id.as_uuid().to_string(),
            record.date.to_string(),
            record.kind.to_string(),
            record.description.clone(),
            record.category.label().to_string(),
            dollars(record.amount),
            record.notes.clone(),
        ])?;
    }

    csv.flush().map_err(|e| FundwiseError::Export(e.to_string()))
}

/// One row per category with spend this month or last.
///
/// Ratios that do not apply are left empty.
pub fn export_analytics_csv<W: Write>(report: &AnalyticsReport, writer: W) -> FundwiseResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([
        "Month",
        "Category",
        "This Month",
        "Last Month",
        "Change %",
        "Share %",
    ])?;

    for row in &report.category_trends {
        let share = report
            .breakdown
            .iter()
            .find(|b| b.category == row.trend.category)
            .and_then(|b| b.share);
        csv.write_record([
            report.month.to_string(),
            row.trend.category.label().to_string(),
            dollars(row.trend.this_period),
            dollars(row.trend.last_period),
            pct(row.pct),
            pct(share),
        ])?;
    }

    csv.flush().map_err(|e| FundwiseError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FinanceRepository, SampleData};
    use chrono::NaiveDate;

    #[test]
    fn test_records_csv() {
        let records = SampleData::new().records().unwrap();
        let mut buffer = Vec::new();
        export_records_csv(&records[..2], &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "ID,Date,Type,Description,Category,Amount,Notes");
        assert!(lines[1].contains(",2024-01-15,expense,Coffee Shop,Food & Dining,4.50,"));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_analytics_csv() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let report = AnalyticsReport::generate(&SampleData::new(), today, 6).unwrap();
        let mut buffer = Vec::new();
        export_analytics_csv(&report, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("2024-01,Food & Dining,245.00,198.00,23.74,24.81"));
        // no December gym spend, so no change figure
        assert!(text.contains("2024-01,Health & Fitness,45.00,0.00,,4.56"));
    }
}
