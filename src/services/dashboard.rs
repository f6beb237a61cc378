//! Dashboard overview
//!
//! Balance, this month's income and spending, budget tracking, the primary
//! savings goal and the most recent activity, all derived from a repository.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::aggregate;
use super::insights::{Insight, InsightKind};
use crate::error::FundwiseResult;
use crate::metrics;
use crate::models::{Budget, ExpenseRecord, Goal, Money, Month, Priority};
use crate::storage::FinanceRepository;

/// One row of the budget tracking panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetRow {
    pub budget: Budget,
    pub utilization: Option<f64>,
    /// Positive when over budget
    pub variance: Money,
}

impl BudgetRow {
    pub fn from_budget(budget: Budget) -> Self {
        Self {
            budget,
            utilization: metrics::budget_utilization(&budget),
            variance: metrics::budget_variance(&budget),
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.budget.is_over_budget()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalSnapshot {
    pub title: String,
    pub current: Money,
    pub target: Money,
    pub progress: Option<f64>,
}

impl GoalSnapshot {
    fn of(goal: &Goal) -> Self {
        Self {
            title: goal.title.clone(),
            current: goal.current_amount,
            target: goal.target_amount,
            progress: metrics::goal_progress(goal),
        }
    }
}

/// The goal the savings card tracks: a high-priority savings goal if there
/// is one, then any savings goal, then whatever goal comes first.
pub fn primary_savings_goal(goals: &[Goal]) -> Option<&Goal> {
    let is_savings = |g: &&Goal| g.category.eq_ignore_ascii_case("savings");
    goals
        .iter()
        .filter(is_savings)
        .find(|g| g.priority == Priority::High)
        .or_else(|| goals.iter().find(is_savings))
        .or_else(|| goals.first())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub today: NaiveDate,
    pub month: Month,
    /// Income minus expenses over every record
    pub balance: Money,
    pub month_income: Money,
    pub month_expenses: Money,
    /// This month's spending against last month's
    pub spending_trend: Option<f64>,
    pub savings_rate: Option<f64>,
    pub savings_goal: Option<GoalSnapshot>,
    pub budgets: Vec<BudgetRow>,
    pub recent: Vec<ExpenseRecord>,
    pub insights: Vec<Insight>,
}

impl Dashboard {
    pub fn generate(
        repo: &dyn FinanceRepository,
        today: NaiveDate,
        recent_limit: usize,
    ) -> FundwiseResult<Self> {
        let month = Month::of(today);
        let records = repo.records()?;
        let goals = repo.goals()?;

        let balance: Money = records.iter().map(|r| r.signed_amount()).sum();
        let this_month = aggregate::monthly_summary(&records, month);
        let last_month = aggregate::monthly_summary(&records, month.prev());

        let budgets: Vec<BudgetRow> = repo
            .budgets(month)?
            .into_iter()
            .map(BudgetRow::from_budget)
            .collect();

        let savings_goal = primary_savings_goal(&goals).map(GoalSnapshot::of);

        let mut dashboard = Self {
            today,
            month,
            balance,
            month_income: this_month.income,
            month_expenses: this_month.expenses,
            spending_trend: metrics::category_trend_pct(this_month.expenses, last_month.expenses),
            savings_rate: metrics::savings_rate(this_month.income, this_month.expenses),
            savings_goal,
            budgets,
            recent: records.into_iter().take(recent_limit).collect(),
            insights: Vec::new(),
        };
        dashboard.insights = dashboard.derive_insights();

        tracing::debug!(
            month = %month,
            budgets = dashboard.budgets.len(),
            insights = dashboard.insights.len(),
            "built dashboard"
        );
        Ok(dashboard)
    }

    /// Spending for the whole month if the pace so far continues
    pub fn projected_spending(&self) -> Option<Money> {
        let elapsed = i64::from(self.today.day());
        metrics::average_per_day(self.month_expenses, elapsed)
            .map(|per_day| Money::from_cents(per_day.cents() * self.month.days()))
    }

    pub fn over_budget(&self) -> impl Iterator<Item = &BudgetRow> {
        self.budgets.iter().filter(|b| b.is_over_budget())
    }

    fn derive_insights(&self) -> Vec<Insight> {
        let mut insights: Vec<Insight> = self
            .over_budget()
            .map(|row| {
                Insight::new(
                    InsightKind::Warning,
                    "Budget Alert",
                    format!(
                        "You're over budget in {} by {}.",
                        row.budget.category.label(),
                        row.variance
                    ),
                )
            })
            .collect();

        if i64::from(self.today.day()) < self.month.days() && !self.month_expenses.is_zero() {
            if let Some(projected) = self.projected_spending() {
                insights.push(Insight::new(
                    InsightKind::Tip,
                    "Spending Forecast",
                    format!("At this pace you'll spend about {} this month.", projected),
                ));
            }
        }

        if let Some(goal) = &self.savings_goal {
            if let Some(pct) = goal.progress {
                insights.push(Insight::new(
                    InsightKind::Success,
                    "Goal Progress",
                    format!("You're {:.0}% toward your {} goal!", pct, goal.title),
                ));
            }
        }

        insights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::storage::SampleData;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn sample_dashboard() -> Dashboard {
        Dashboard::generate(&SampleData::new(), today(), 4).unwrap()
    }

    #[test]
    fn test_overview_cards() {
        let dashboard = sample_dashboard();
        assert_eq!(dashboard.balance, Money::from_cents(245075));
        assert_eq!(dashboard.month_income, Money::from_dollars(1200));
        assert_eq!(dashboard.month_expenses, Money::from_cents(98750));

        let goal = dashboard.savings_goal.as_ref().unwrap();
        assert_eq!(goal.title, "Emergency Fund");
        assert_eq!(format!("{:.3}", goal.progress.unwrap()), "49.015");
    }

    #[test]
    fn test_budget_rows() {
        let dashboard = sample_dashboard();
        let over: Vec<_> = dashboard.over_budget().collect();
        assert_eq!(over.len(), 1);
        assert_eq!(over[0].budget.category, Category::Transportation);
        assert_eq!(over[0].variance, Money::from_dollars(20));
        assert_eq!(over[0].utilization, Some(120.0));
    }

    #[test]
    fn test_recent_activity_respects_limit() {
        let dashboard = Dashboard::generate(&SampleData::new(), today(), 2).unwrap();
        assert_eq!(dashboard.recent.len(), 2);
        assert_eq!(dashboard.recent[0].description, "Coffee Shop");
    }

    #[test]
    fn test_insights() {
        let dashboard = sample_dashboard();
        let titles: Vec<_> = dashboard.insights.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["Budget Alert", "Spending Forecast", "Goal Progress"]);
        assert_eq!(
            dashboard.insights[0].message,
            "You're over budget in Transportation by $20.00."
        );
        assert_eq!(
            dashboard.insights[2].message,
            "You're 49% toward your Emergency Fund goal!"
        );
    }

    #[test]
    fn test_spending_trend_against_december() {
        let dashboard = sample_dashboard();
        // 987.50 vs 980.00
        assert_eq!(format!("{:.2}", dashboard.spending_trend.unwrap()), "0.77");
    }

    #[test]
    fn test_primary_goal_fallbacks() {
        let deadline = today();
        let trip = Goal::new("Trip", Money::from_dollars(100), deadline).with_category("Travel");
        let fund = Goal::new("Fund", Money::from_dollars(100), deadline);
        assert_eq!(primary_savings_goal(&[trip.clone(), fund]).unwrap().title, "Fund");
        assert_eq!(primary_savings_goal(&[trip]).unwrap().title, "Trip");
        assert!(primary_savings_goal(&[]).is_none());
    }

    #[test]
    fn test_empty_month_has_no_ratios() {
        let empty_day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let dashboard = Dashboard::generate(&SampleData::new(), empty_day, 4).unwrap();
        assert!(dashboard.month_expenses.is_zero());
        assert!(dashboard.spending_trend.is_none());
        assert!(dashboard.savings_rate.is_none());
        assert!(dashboard.projected_spending().is_some_and(|m| m.is_zero()));
    }
}
