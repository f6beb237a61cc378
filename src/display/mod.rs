//! Display formatting for terminal output
//!
//! Turns service views into text: tables rendered with `tabled` plus a few
//! hand-aligned panels. Ratios that do not apply are shown as "n/a".

pub mod analytics;
pub mod budgets;
pub mod dashboard;
pub mod goals;
pub mod records;
pub mod report;

pub use analytics::format_analytics;
pub use budgets::format_budget_table;
pub use dashboard::{format_dashboard, format_insights};
pub use goals::{format_goal_details, format_goal_table, format_goals_overview};
pub use records::{format_recent_activity, format_record_table, format_suggestions};
pub use report::{Formatting, NOT_APPLICABLE};
