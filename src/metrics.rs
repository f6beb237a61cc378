//! Derived metrics
//!
//! Pure functions that turn records, budgets and goals into display values:
//! progress percentages, budget variance, days remaining, period-over-period
//! change and savings rate.
//!
//! # Division by zero
//!
//! Every ratio returns `Option<f64>`. `None` means "not applicable": the
//! denominator (goal target, previous-period spend, income, budget limit) was
//! zero. No function here ever returns NaN or an infinity, and none panics.
//! Callers render `None` as "n/a".

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::{Budget, CategoryTrend, Goal, Money};

/// `numerator / denominator * 100`, or `None` for a zero denominator
fn percent_of(numerator: Money, denominator: Money) -> Option<f64> {
    if denominator.is_zero() {
        return None;
    }
    Some(numerator.cents() as f64 / denominator.cents() as f64 * 100.0)
}

/// Progress towards a goal as a percentage of its target.
///
/// Not clamped: an over-achieved goal reports more than 100.
/// Returns `None` when the target is zero.
pub fn goal_progress(goal: &Goal) -> Option<f64> {
    percent_of(goal.current_amount, goal.target_amount)
}

/// Whole days from `today` until `deadline`.
///
/// Dates carry no time of day, so the difference is already whole and the
/// ceiling is exact. Negative values mean the deadline has passed.
pub fn days_remaining(deadline: NaiveDate, today: NaiveDate) -> i64 {
    (deadline - today).num_days()
}

/// `spent - limit`. Positive means over budget.
pub fn budget_variance(budget: &Budget) -> Money {
    budget.spent - budget.limit
}

/// Spent as a percentage of the limit; `None` when the limit is zero
pub fn budget_utilization(budget: &Budget) -> Option<f64> {
    percent_of(budget.spent, budget.limit)
}

/// Percentage change from `previous` to `current`, sign preserved.
///
/// Returns `None` when `previous` is zero.
pub fn category_trend_pct(current: Money, previous: Money) -> Option<f64> {
    percent_of(current - previous, previous)
}

/// [`category_trend_pct`] applied to a [`CategoryTrend`]
pub fn trend_pct(trend: &CategoryTrend) -> Option<f64> {
    category_trend_pct(trend.this_period, trend.last_period)
}

/// Share of income left after expenses, as a percentage.
///
/// Negative when expenses exceed income; `None` when income is zero.
pub fn savings_rate(income: Money, expenses: Money) -> Option<f64> {
    percent_of(income - expenses, income)
}

/// Amount still needed to reach the goal (negative once exceeded)
pub fn goal_remaining(goal: &Goal) -> Money {
    goal.target_amount - goal.current_amount
}

/// `amount` as a percentage of `total`; `None` when the total is zero
pub fn category_share(amount: Money, total: Money) -> Option<f64> {
    percent_of(amount, total)
}

/// Average spend per day over `days` days; `None` for a non-positive span
pub fn average_per_day(total: Money, days: i64) -> Option<Money> {
    if days <= 0 {
        return None;
    }
    total.split_even(days)
}

/// Calendar months left until `deadline`, counting a partial month as one.
///
/// Returns zero or less once the deadline month has passed.
pub fn months_until(deadline: NaiveDate, today: NaiveDate) -> i64 {
    let mut months = (deadline.year() - today.year()) as i64 * 12
        + deadline.month() as i64
        - today.month() as i64;
    if deadline.day() > today.day() {
        months += 1;
    }
    months
}

/// How much to put aside each month to hit the goal on time.
///
/// `None` for goals that are already complete or past their deadline.
pub fn required_monthly_saving(goal: &Goal, today: NaiveDate) -> Option<Money> {
    if goal.is_complete() || days_remaining(goal.deadline, today) <= 0 {
        return None;
    }
    let months = months_until(goal.deadline, today).max(1);
    goal_remaining(goal).split_even(months)
}

/// Coarse progress band used for colouring progress bars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressTier {
    /// 80% or more
    OnTrack,
    /// 50% up to 80%
    Halfway,
    /// Below 50%
    Started,
}

impl ProgressTier {
    pub fn label(&self) -> &'static str {
        match self {
            Self::OnTrack => "on track",
            Self::Halfway => "halfway",
            Self::Started => "started",
        }
    }
}

pub fn progress_tier(pct: f64) -> ProgressTier {
    if pct >= 80.0 {
        ProgressTier::OnTrack
    } else if pct >= 50.0 {
        ProgressTier::Halfway
    } else {
        ProgressTier::Started
    }
}

/// What a goal card shows in its "days left" slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineStatus {
    Remaining(i64),
    Overdue,
}

impl DeadlineStatus {
    /// Anything that is not strictly in the future renders as overdue
    pub fn from_days(days: i64) -> Self {
        if days > 0 {
            Self::Remaining(days)
        } else {
            Self::Overdue
        }
    }

    pub fn is_overdue(&self) -> bool {
        matches!(self, Self::Overdue)
    }
}

impl std::fmt::Display for DeadlineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remaining(days) => f.pad(&days.to_string()),
            Self::Overdue => f.pad("Overdue"),
        }
    }
}

/// Direction of a period-over-period change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

impl TrendDirection {
    pub fn of(pct: f64) -> Self {
        if pct > 0.0 {
            Self::Up
        } else if pct < 0.0 {
            Self::Down
        } else {
            Self::Flat
        }
    }
}
