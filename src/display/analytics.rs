//! Analytics report rendering

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use super::dashboard::format_insights;
use super::report::{format_bar, format_change, format_pct, section, Formatting};
use crate::metrics::TrendDirection;
use crate::services::AnalyticsReport;

#[derive(Tabled)]
struct HistoryLine {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expenses")]
    expenses: String,
    #[tabled(rename = "Savings")]
    savings: String,
}

#[derive(Tabled)]
struct TrendLine {
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "This month")]
    this_month: String,
    #[tabled(rename = "Last month")]
    last_month: String,
    #[tabled(rename = "Change")]
    change: String,
}

fn arrow(direction: Option<TrendDirection>) -> &'static str {
    match direction {
        Some(TrendDirection::Up) => "↑",
        Some(TrendDirection::Down) => "↓",
        Some(TrendDirection::Flat) => "→",
        None => " ",
    }
}

fn right_aligned<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()));
    format!("{}\n", table)
}

pub fn format_analytics(report: &AnalyticsReport, fmt: &Formatting) -> String {
    let mut output = String::new();

    output.push_str(&section(&format!(
        "Analytics: {} {}",
        report.month.abbreviation(),
        report.month.year()
    )));
    output.push_str(&format!(
        "{:<22} {:>12}   {} vs previous {} months\n",
        "Average Monthly Spend",
        fmt.optional_money(report.average_monthly_spend),
        format_change(report.spend_change),
        report.history.len()
    ));
    output.push_str(&format!(
        "{:<22} {:>12}\n",
        "Savings Rate",
        format_pct(report.savings_rate)
    ));
    output.push_str(&format!(
        "{:<22} {:>12}\n",
        "Budget Variance",
        fmt.signed(report.budget_variance)
    ));
    output.push_str(&format!(
        "{:<22} {:>12}   {} expenses, {} per day\n",
        "Spent This Month",
        fmt.money(report.total_spent),
        report.expense_count,
        fmt.optional_money(report.average_per_day)
    ));

    output.push('\n');
    output.push_str(&section("Income vs Expenses"));
    let history: Vec<HistoryLine> = report
        .history
        .iter()
        .map(|m| HistoryLine {
            month: format!("{} {}", m.month.abbreviation(), m.month.year()),
            income: fmt.money(m.income),
            expenses: fmt.money(m.expenses),
            savings: fmt.money(m.savings()),
        })
        .collect();
    output.push_str(&right_aligned(history));

    output.push('\n');
    output.push_str(&section("Category Trends"));
    if report.category_trends.is_empty() {
        output.push_str("  No spending this month.\n");
    } else {
        let trends: Vec<TrendLine> = report
            .category_trends
            .iter()
            .map(|row| TrendLine {
                category: row.trend.category.label(),
                this_month: fmt.money(row.trend.this_period),
                last_month: fmt.money(row.trend.last_period),
                change: format!("{} {}", arrow(row.direction), format_change(row.pct)),
            })
            .collect();
        output.push_str(&right_aligned(trends));
    }

    output.push('\n');
    output.push_str(&section("Spending Breakdown"));
    for row in &report.breakdown {
        output.push_str(&format!(
            "  {:<18} {} {:>6} {:>10}\n",
            row.category.label(),
            format_bar(row.share.unwrap_or(0.0), 100.0, 20),
            format_pct(row.share),
            fmt.money(row.amount)
        ));
    }

    output.push('\n');
    output.push_str(&section("Weekly Spending"));
    let busiest = report
        .weekly
        .iter()
        .map(|w| w.amount.cents())
        .max()
        .unwrap_or(0) as f64;
    for week in &report.weekly {
        output.push_str(&format!(
            "  {:<7} {} {:>10}\n",
            week.label,
            format_bar(week.amount.cents() as f64, busiest, 20),
            fmt.money(week.amount)
        ));
    }

    if !report.insights.is_empty() {
        output.push('\n');
        output.push_str(&section("Insights"));
        output.push_str(&format_insights(&report.insights));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SampleData;
    use chrono::NaiveDate;

    #[test]
    fn test_sample_analytics_renders() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let report = AnalyticsReport::generate(&SampleData::new(), today, 6).unwrap();
        let output = format_analytics(&report, &Formatting::default());

        assert!(output.starts_with("Analytics: Jan 2024"));
        assert!(output.contains("$956.25"));
        assert!(output.contains("17.7%"));
        assert!(output.contains("-$110.00"));
        assert!(output.contains("↑ +23.7%"));
        assert!(output.contains("↓ -18.2%"));
        assert!(output.contains("Aug 2023"));
        assert!(output.contains("Week 5"));
    }
}
