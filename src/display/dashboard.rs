//! Dashboard rendering

use super::budgets::format_budget_table;
use super::records::format_recent_activity;
use super::report::{double_separator, format_change, format_pct, section, Formatting};
use crate::services::{Dashboard, Insight};

pub fn format_insights(insights: &[Insight]) -> String {
    if insights.is_empty() {
        return "  Nothing to report.\n".to_string();
    }
    insights.iter().map(|i| format!("  {}\n", i)).collect()
}

pub fn format_dashboard(dashboard: &Dashboard, fmt: &Formatting) -> String {
    let mut output = String::new();

    let title = format!(
        "Fundwise Dashboard: {} {}",
        dashboard.month.abbreviation(),
        dashboard.month.year()
    );
    output.push_str(&format!("{}\n{}\n", title, double_separator(title.chars().count())));

    output.push_str(&format!("{:<18} {:>12}\n", "Total Balance", fmt.money(dashboard.balance)));
    output.push_str(&format!(
        "{:<18} {:>12}\n",
        "Monthly Income",
        fmt.money(dashboard.month_income)
    ));
    output.push_str(&format!(
        "{:<18} {:>12}   {} vs last month\n",
        "Monthly Expenses",
        fmt.money(dashboard.month_expenses),
        format_change(dashboard.spending_trend)
    ));
    output.push_str(&format!(
        "{:<18} {:>12}\n",
        "Savings Rate",
        format_pct(dashboard.savings_rate)
    ));

    match &dashboard.savings_goal {
        Some(goal) => output.push_str(&format!(
            "{:<18} {:>12}   {} of {} ({})\n",
            "Savings Goal",
            format_pct(goal.progress),
            fmt.money(goal.current),
            fmt.money(goal.target),
            goal.title
        )),
        None => output.push_str(&format!("{:<18} {:>12}\n", "Savings Goal", "none")),
    }

    output.push('\n');
    output.push_str(&section("Budget Tracking"));
    output.push_str(&format_budget_table(&dashboard.budgets, fmt));

    output.push('\n');
    output.push_str(&section("Recent Activity"));
    output.push_str(&format_recent_activity(&dashboard.recent, fmt));

    output.push('\n');
    output.push_str(&section("Insights"));
    output.push_str(&format_insights(&dashboard.insights));

    output
}
