//! Core data models for Fundwise
//!
//! This module contains the data structures of the finance domain: expense
//! and income records, budgets, goals, and period-over-period aggregates.

pub mod budget;
pub mod category;
pub mod goal;
pub mod ids;
pub mod money;
pub mod period;
pub mod record;
pub mod trend;

pub use budget::{Budget, BudgetLimit};
pub use category::Category;
pub use goal::{Goal, Priority};
pub use ids::{GoalId, RecordId};
pub use money::Money;
pub use period::Month;
pub use record::{ExpenseRecord, RecordKind};
pub use trend::{CategoryTrend, MonthlySummary};
