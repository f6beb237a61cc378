//! Record and quick-add tables

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use super::report::{truncate, Formatting};
use crate::models::ExpenseRecord;
use crate::services::Suggestion;

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl RecordRow {
    fn new(record: &ExpenseRecord, fmt: &Formatting) -> Self {
        let sign = if record.is_income() { '+' } else { '-' };
        Self {
            id: record.id.short(),
            date: fmt.date(record.date),
            description: truncate(&record.description, 32),
            category: record.category.label().to_string(),
            amount: format!("{}{}", sign, fmt.money(record.amount)),
        }
    }
}

/// Records as a table, one row each, in the order given
pub fn format_record_table(records: &[ExpenseRecord], fmt: &Formatting) -> String {
    if records.is_empty() {
        return "No records found.\n".to_string();
    }

    let rows: Vec<RecordRow> = records.iter().map(|r| RecordRow::new(r, fmt)).collect();
    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::new(4..)).with(Alignment::right()));
    format!("{}\n", table)
}

/// Compact one-line-per-record list for the dashboard
pub fn format_recent_activity(records: &[ExpenseRecord], fmt: &Formatting) -> String {
    if records.is_empty() {
        return "  No recent activity.\n".to_string();
    }

    let mut output = String::new();
    for record in records {
        let amount = if record.is_income() {
            format!("+{}", fmt.money(record.amount))
        } else {
            format!("-{}", fmt.money(record.amount))
        };
        output.push_str(&format!(
            "  {:<24} {:<18} {:>10} {:>12}\n",
            truncate(&record.description, 24),
            record.category.label(),
            fmt.date(record.date),
            amount
        ));
    }
    output
}

#[derive(Tabled)]
struct SuggestionRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Description")]
    description: &'static str,
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Numbered quick-add suggestions; the number is what `expense add --suggestion` takes
pub fn format_suggestions(suggestions: &[Suggestion], fmt: &Formatting) -> String {
    let rows: Vec<SuggestionRow> = suggestions
        .iter()
        .enumerate()
        .map(|(i, s)| SuggestionRow {
            index: i + 1,
            description: s.description,
            category: s.category.label(),
            amount: fmt.money(s.amount()),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::new(3..)).with(Alignment::right()));
    format!("{}\n", table)
}
