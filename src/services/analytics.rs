//! Spending analytics
//!
//! Month-over-month history, category trends, spending breakdown and weekly
//! buckets for the month containing a given day.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::aggregate;
use super::insights::{Insight, InsightKind};
use crate::error::{FundwiseError, FundwiseResult};
use crate::metrics::{self, TrendDirection};
use crate::models::{Category, CategoryTrend, Money, Month, MonthlySummary};
use crate::storage::FinanceRepository;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendRow {
    pub trend: CategoryTrend,
    /// `None` when the category had no spend last month
    pub pct: Option<f64>,
    pub direction: Option<TrendDirection>,
}

impl TrendRow {
    pub fn from_trend(trend: CategoryTrend) -> Self {
        let pct = metrics::trend_pct(&trend);
        Self {
            trend,
            pct,
            direction: pct.map(TrendDirection::of),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShareRow {
    pub category: Category,
    pub amount: Money,
    pub share: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekRow {
    pub label: String,
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub today: NaiveDate,
    pub month: Month,
    /// Oldest first, ending at `month`
    pub history: Vec<MonthlySummary>,
    pub average_monthly_spend: Option<Money>,
    /// Average monthly spend against the same number of months before the window
    pub spend_change: Option<f64>,
    pub savings_rate: Option<f64>,
    /// Sum of every budget's variance this month; negative means under budget
    pub budget_variance: Money,
    pub category_trends: Vec<TrendRow>,
    /// Largest share first
    pub breakdown: Vec<ShareRow>,
    pub weekly: Vec<WeekRow>,
    pub expense_count: usize,
    pub total_spent: Money,
    pub average_per_day: Option<Money>,
    pub insights: Vec<Insight>,
}

fn average_expenses(history: &[MonthlySummary]) -> Option<Money> {
    let total: Money = history.iter().map(|m| m.expenses).sum();
    total.split_even(history.len() as i64)
}

/// Longest history window a report covers
pub const MAX_HISTORY_MONTHS: usize = 120;

fn months_back(month: Month, count: usize) -> Month {
    (0..count).fold(month, |m, _| m.prev())
}

impl AnalyticsReport {
    pub fn generate(
        repo: &dyn FinanceRepository,
        today: NaiveDate,
        months: usize,
    ) -> FundwiseResult<Self> {
        if !(1..=MAX_HISTORY_MONTHS).contains(&months) {
            return Err(FundwiseError::Validation(format!(
                "months must be between 1 and {} (got {})",
                MAX_HISTORY_MONTHS, months
            )));
        }
        let month = Month::of(today);
        let records = repo.records()?;

        let history = repo.monthly_history(month, months)?;
        let previous = repo.monthly_history(months_back(month, months), months)?;
        let average_monthly_spend = average_expenses(&history);
        let spend_change = match (average_monthly_spend, average_expenses(&previous)) {
            (Some(now), Some(before)) => metrics::category_trend_pct(now, before),
            _ => None,
        };

        let this_month = aggregate::monthly_summary(&records, month);

        let budget_variance: Money = repo
            .budgets(month)?
            .iter()
            .map(metrics::budget_variance)
            .sum();

        let category_trends: Vec<TrendRow> = repo
            .category_trends(month)?
            .into_iter()
            .filter(|t| !t.this_period.is_zero())
            .map(TrendRow::from_trend)
            .collect();

        let spend = aggregate::spend_by_category(&records, month);
        let total_spent = this_month.expenses;
        let mut breakdown: Vec<ShareRow> = spend
            .into_iter()
            .map(|(category, amount)| ShareRow {
                category,
                amount,
                share: metrics::category_share(amount, total_spent),
            })
            .collect();
        breakdown.sort_by(|a, b| b.amount.cmp(&a.amount).then(a.category.cmp(&b.category)));

        let weekly = aggregate::weekly_spending(&records, month)
            .into_iter()
            .map(|(label, amount)| WeekRow { label, amount })
            .collect();

        let expense_count = aggregate::in_month(&records, month)
            .filter(|r| r.is_expense())
            .count();

        let mut report = Self {
            today,
            month,
            history,
            average_monthly_spend,
            spend_change,
            savings_rate: metrics::savings_rate(this_month.income, this_month.expenses),
            budget_variance,
            category_trends,
            breakdown,
            weekly,
            expense_count,
            total_spent,
            average_per_day: metrics::average_per_day(total_spent, i64::from(today.day())),
            insights: Vec::new(),
        };
        report.insights = report.derive_insights();

        tracing::debug!(month = %month, months, "built analytics report");
        Ok(report)
    }

    /// The category whose spend grew the most against last month
    pub fn largest_increase(&self) -> Option<&TrendRow> {
        self.category_trends
            .iter()
            .filter(|t| t.pct.is_some_and(|p| p > 0.0))
            .max_by(|a, b| a.pct.unwrap_or(0.0).total_cmp(&b.pct.unwrap_or(0.0)))
    }

    fn derive_insights(&self) -> Vec<Insight> {
        let mut insights = Vec::new();

        if let Some(row) = self.largest_increase() {
            if let Some(pct) = row.pct {
                insights.push(Insight::new(
                    InsightKind::Warning,
                    "Spending Pattern",
                    format!(
                        "{} expenses increased {:.0}% this month.",
                        row.trend.category.label(),
                        pct
                    ),
                ));
            }
        }

        match self.savings_rate {
            Some(rate) if rate < 0.0 => insights.push(Insight::new(
                InsightKind::Warning,
                "Savings Rate",
                format!("You spent {:.1}% more than you earned this month.", -rate),
            )),
            Some(rate) => insights.push(Insight::new(
                InsightKind::Success,
                "Savings Rate",
                format!("You're keeping {:.1}% of your income this month.", rate),
            )),
            None => {}
        }

        insights
    }
}
