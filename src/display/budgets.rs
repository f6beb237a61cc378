//! Budget tracking table

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use super::report::{format_bar, format_pct, Formatting};
use crate::services::dashboard::BudgetRow;

#[derive(Tabled)]
struct BudgetLine {
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "")]
    bar: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Status column text: "Over by $20.00" or "$55.00 left"
pub fn budget_status(row: &BudgetRow, fmt: &Formatting) -> String {
    if row.is_over_budget() {
        format!("Over by {}", fmt.money(row.variance))
    } else {
        format!("{} left", fmt.money(-row.variance))
    }
}

pub fn format_budget_table(rows: &[BudgetRow], fmt: &Formatting) -> String {
    if rows.is_empty() {
        return "No budgets set. Use 'fundwise budget set <category> <limit>'.\n".to_string();
    }

    let lines: Vec<BudgetLine> = rows
        .iter()
        .map(|row| BudgetLine {
            category: row.budget.category.label(),
            spent: fmt.money(row.budget.spent),
            limit: fmt.money(row.budget.limit),
            used: format_pct(row.utilization),
            bar: format_bar(row.utilization.unwrap_or(0.0), 100.0, 12),
            status: budget_status(row, fmt),
        })
        .collect();

    let mut table = Table::new(lines);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..4)).with(Alignment::right()));
    format!("{}\n", table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, Category, Money};

    fn row(spent: i64, limit: i64) -> BudgetRow {
        BudgetRow::from_budget(Budget::new(
            Category::Transportation,
            Money::from_dollars(spent),
            Money::from_dollars(limit),
        ))
    }

    #[test]
    fn test_status_text() {
        let fmt = Formatting::default();
        assert_eq!(budget_status(&row(120, 100), &fmt), "Over by $20.00");
        assert_eq!(budget_status(&row(95, 150), &fmt), "$55.00 left");
        assert_eq!(budget_status(&row(100, 100), &fmt), "$0.00 left");
    }

    #[test]
    fn test_zero_limit_shows_not_applicable() {
        let output = format_budget_table(&[row(0, 0)], &Formatting::default());
        assert!(output.contains("n/a"));
    }

    #[test]
    fn test_table() {
        let output = format_budget_table(&[row(120, 100)], &Formatting::default());
        assert!(output.contains("Transportation"));
        assert!(output.contains("120.0%"));
        assert!(output.contains("Over by $20.00"));
    }
}
