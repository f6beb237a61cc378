//! Goal list and detail views

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use super::dashboard::format_insights;
use super::report::{format_bar, format_pct, section, truncate, Formatting};
use crate::metrics::DeadlineStatus;
use crate::services::{GoalView, GoalsOverview};

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Goal")]
    title: String,
    #[tabled(rename = "Priority")]
    priority: &'static str,
    #[tabled(rename = "Saved")]
    saved: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Days left")]
    days_left: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
}

pub fn format_goal_table(goals: &[GoalView], fmt: &Formatting) -> String {
    if goals.is_empty() {
        return "No goals yet. Use 'fundwise goal add' to create one.\n".to_string();
    }

    let rows: Vec<GoalRow> = goals
        .iter()
        .map(|view| GoalRow {
            id: view.goal.id.short(),
            title: truncate(&view.goal.title, 28),
            priority: view.goal.priority.label(),
            saved: fmt.money(view.goal.current_amount),
            target: fmt.money(view.goal.target_amount),
            progress: format_pct(view.progress),
            days_left: view.deadline_status.to_string(),
            remaining: fmt.money(view.remaining),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::new(3..)).with(Alignment::right()));
    format!("{}\n", table)
}

pub fn format_goals_overview(overview: &GoalsOverview, fmt: &Formatting) -> String {
    let mut output = String::new();
    output.push_str(&section("Financial Goals"));
    output.push_str(&format!(
        "Saved {} of {} ({}) across {} goals, {} completed\n\n",
        fmt.money(overview.total_saved),
        fmt.money(overview.total_target),
        format_pct(overview.overall_progress),
        overview.goals.len(),
        overview.completed
    ));
    output.push_str(&format_goal_table(&overview.goals, fmt));

    if !overview.insights.is_empty() {
        output.push('\n');
        output.push_str(&section("Goal Insights"));
        output.push_str(&format_insights(&overview.insights));
    }
    output
}

pub fn format_goal_details(view: &GoalView, fmt: &Formatting) -> String {
    let goal = &view.goal;
    let mut output = String::new();

    output.push_str(&format!("Goal:        {} ({})\n", goal.title, goal.id.short()));
    if !goal.description.is_empty() {
        output.push_str(&format!("About:       {}\n", goal.description));
    }
    output.push_str(&format!("Category:    {}\n", goal.category));
    output.push_str(&format!("Priority:    {}\n", goal.priority));
    output.push_str(&format!(
        "Progress:    {} {} ({})\n",
        format_bar(view.progress.unwrap_or(0.0), 100.0, 20),
        format_pct(view.progress),
        view.tier.label()
    ));
    output.push_str(&format!(
        "Saved:       {} of {}\n",
        fmt.money(goal.current_amount),
        fmt.money(goal.target_amount)
    ));
    output.push_str(&format!("Remaining:   {}\n", fmt.money(view.remaining)));
    output.push_str(&format!(
        "Deadline:    {} ({})\n",
        fmt.date(goal.deadline),
        match view.deadline_status {
            DeadlineStatus::Remaining(days) => format!("{} days left", days),
            DeadlineStatus::Overdue => "Overdue".to_string(),
        }
    ));
    output.push_str(&format!(
        "Per month:   {}\n",
        fmt.optional_money(view.monthly_needed)
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FinanceRepository, SampleData};
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn test_goal_details() {
        let sample = SampleData::new();
        let view = GoalView::new(sample.find_goal("New Laptop").unwrap(), today());
        let output = format_goal_details(&view, &Formatting::default());

        assert!(output.contains("Goal:        New Laptop (goal-00000002)"));
        assert!(output.contains("32.0%"));
        assert!(output.contains("Remaining:   $1700.00"));
        assert!(output.contains("2024-06-15 (152 days left)"));
        assert!(output.contains("Per month:   $340.00"));
    }

    #[test]
    fn test_overdue_goal_details() {
        let sample = SampleData::new();
        let later = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let view = GoalView::new(sample.find_goal("Reduce Dining Out").unwrap(), later);
        let output = format_goal_details(&view, &Formatting::default());
        assert!(output.contains("(Overdue)"));
        assert!(output.contains("Per month:   n/a"));
    }

    #[test]
    fn test_overview() {
        let overview = GoalsOverview::generate(&SampleData::new(), today()).unwrap();
        let output = format_goals_overview(&overview, &Formatting::default());
        assert!(output.contains("Saved $3995.75 of $8850.00"));
        assert!(output.contains("Emergency Fund"));
        assert!(output.contains("Optimization Tip"));
    }
}
