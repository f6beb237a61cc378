//! Service layer for Fundwise
//!
//! Builds the dashboard, goals and analytics views on top of a
//! [`FinanceRepository`](crate::storage::FinanceRepository), and validates
//! form input before anything reaches storage.

pub mod aggregate;
pub mod analytics;
pub mod dashboard;
pub mod forms;
pub mod goals;
pub mod insights;

pub use analytics::AnalyticsReport;
pub use dashboard::Dashboard;
pub use forms::{ExpenseForm, GoalForm, Suggestion};
pub use goals::{GoalView, GoalsOverview};
pub use insights::{Insight, InsightKind};
