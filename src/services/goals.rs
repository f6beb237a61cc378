//! Goal tracking views
//!
//! Each goal is paired with its derived figures (progress, tier, deadline
//! status, amount remaining, monthly saving needed) for a given day.

use chrono::NaiveDate;
use serde::Serialize;

use super::insights::{Insight, InsightKind};
use crate::error::FundwiseResult;
use crate::metrics::{self, DeadlineStatus, ProgressTier};
use crate::models::{Goal, Money};
use crate::storage::FinanceRepository;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalView {
    pub goal: Goal,
    pub progress: Option<f64>,
    pub tier: ProgressTier,
    pub days_remaining: i64,
    pub deadline_status: DeadlineStatus,
    pub remaining: Money,
    pub monthly_needed: Option<Money>,
}

impl GoalView {
    pub fn new(goal: Goal, today: NaiveDate) -> Self {
        let progress = metrics::goal_progress(&goal);
        let days = metrics::days_remaining(goal.deadline, today);
        Self {
            progress,
            tier: metrics::progress_tier(progress.unwrap_or(0.0)),
            days_remaining: days,
            deadline_status: DeadlineStatus::from_days(days),
            remaining: metrics::goal_remaining(&goal),
            monthly_needed: metrics::required_monthly_saving(&goal, today),
            goal,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.goal.is_complete() && !self.deadline_status.is_overdue()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalsOverview {
    pub today: NaiveDate,
    /// Highest priority first, then earliest deadline
    pub goals: Vec<GoalView>,
    pub total_saved: Money,
    pub total_target: Money,
    pub overall_progress: Option<f64>,
    pub completed: usize,
    pub insights: Vec<Insight>,
}

impl GoalsOverview {
    pub fn generate(repo: &dyn FinanceRepository, today: NaiveDate) -> FundwiseResult<Self> {
        let mut goals: Vec<GoalView> = repo
            .goals()?
            .into_iter()
            .map(|g| GoalView::new(g, today))
            .collect();
        goals.sort_by(|a, b| {
            a.goal
                .priority
                .cmp(&b.goal.priority)
                .then(a.goal.deadline.cmp(&b.goal.deadline))
        });

        let total_saved: Money = goals.iter().map(|g| g.goal.current_amount).sum();
        let total_target: Money = goals.iter().map(|g| g.goal.target_amount).sum();

        let mut overview = Self {
            today,
            total_saved,
            total_target,
            overall_progress: metrics::category_share(total_saved, total_target),
            completed: goals.iter().filter(|g| g.goal.is_complete()).count(),
            goals,
            insights: Vec::new(),
        };
        overview.insights = overview.derive_insights();
        Ok(overview)
    }

    /// The active goal with the highest progress
    pub fn closest_to_completion(&self) -> Option<&GoalView> {
        self.goals
            .iter()
            .filter(|g| g.is_active())
            .max_by(|a, b| a.progress.unwrap_or(0.0).total_cmp(&b.progress.unwrap_or(0.0)))
    }

    /// Among the active goals of the top priority, the one furthest from its target
    pub fn highest_priority(&self) -> Option<&GoalView> {
        let top = self.goals.iter().filter(|g| g.is_active()).map(|g| g.goal.priority).min()?;
        self.goals
            .iter()
            .filter(|g| g.is_active() && g.goal.priority == top)
            .max_by_key(|g| g.remaining)
    }

    /// The active goal that needs the most put aside each month
    pub fn most_demanding(&self) -> Option<&GoalView> {
        self.goals
            .iter()
            .filter(|g| g.is_active())
            .filter(|g| g.monthly_needed.is_some())
            .max_by_key(|g| g.monthly_needed)
    }

    fn derive_insights(&self) -> Vec<Insight> {
        let mut insights = Vec::new();

        if let Some(view) = self.closest_to_completion() {
            if let Some(pct) = view.progress {
                insights.push(Insight::new(
                    InsightKind::Success,
                    "Achievement Alert",
                    format!(
                        "You're {:.0}% towards your {} goal! Keep up the great work.",
                        pct, view.goal.title
                    ),
                ));
            }
        }

        if let Some(view) = self.most_demanding() {
            if let Some(needed) = view.monthly_needed {
                insights.push(Insight::new(
                    InsightKind::Tip,
                    "Optimization Tip",
                    format!(
                        "To reach your {} goal by {}, save {} per month.",
                        view.goal.title,
                        view.goal.deadline.format("%B %-d, %Y"),
                        needed
                    ),
                ));
            }
        }

        if let Some(view) = self.highest_priority() {
            insights.push(Insight::new(
                InsightKind::Tip,
                "Priority Suggestion",
                format!(
                    "Focus on your {} first. It's {} priority and still needs {}.",
                    view.goal.title,
                    view.goal.priority.label().to_lowercase(),
                    view.remaining
                ),
            ));
        }

        insights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SampleData;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn overview() -> GoalsOverview {
        GoalsOverview::generate(&SampleData::new(), today()).unwrap()
    }

    #[test]
    fn test_sorted_by_priority_then_deadline() {
        let titles: Vec<_> = overview().goals.iter().map(|g| g.goal.title.clone()).collect();
        assert_eq!(
            titles,
            ["Reduce Dining Out", "Emergency Fund", "New Laptop", "Spring Break Trip"]
        );
    }

    #[test]
    fn test_goal_view_figures() {
        let overview = overview();
        let trip = overview
            .goals
            .iter()
            .find(|g| g.goal.title == "Spring Break Trip")
            .unwrap();
        assert_eq!(trip.days_remaining, 60);
        assert_eq!(trip.deadline_status, DeadlineStatus::Remaining(60));
        assert_eq!(trip.remaining, Money::from_dollars(550));
        assert_eq!(trip.tier, ProgressTier::Halfway);

        let laptop = overview
            .goals
            .iter()
            .find(|g| g.goal.title == "New Laptop")
            .unwrap();
        assert_eq!(laptop.monthly_needed, Some(Money::from_dollars(340)));
        assert_eq!(laptop.tier, ProgressTier::Started);
    }

    #[test]
    fn test_overdue_goal_is_not_active() {
        let later = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let overview = GoalsOverview::generate(&SampleData::new(), later).unwrap();
        let dining = &overview.goals[0];
        assert_eq!(dining.goal.title, "Reduce Dining Out");
        assert!(dining.deadline_status.is_overdue());
        assert!(dining.monthly_needed.is_none());
        assert!(!dining.is_active());
    }

    #[test]
    fn test_totals() {
        let overview = overview();
        assert_eq!(overview.total_target, Money::from_dollars(8850));
        assert_eq!(overview.total_saved, Money::from_cents(399575));
        assert_eq!(overview.completed, 0);
    }

    #[test]
    fn test_insights() {
        let overview = overview();
        assert_eq!(
            overview.closest_to_completion().unwrap().goal.title,
            "Reduce Dining Out"
        );
        assert_eq!(overview.highest_priority().unwrap().goal.title, "Emergency Fund");
        assert_eq!(overview.most_demanding().unwrap().goal.title, "New Laptop");

        let messages: Vec<_> = overview.insights.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(
            messages[1],
            "To reach your New Laptop goal by June 15, 2024, save $340.00 per month."
        );
        assert!(messages[2].starts_with("Focus on your Emergency Fund first."));
    }

    #[test]
    fn test_no_goals_no_insights() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let paths = crate::config::FundwisePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = crate::storage::Storage::open(paths).unwrap();

        let overview = GoalsOverview::generate(&storage, today()).unwrap();
        assert!(overview.goals.is_empty());
        assert!(overview.overall_progress.is_none());
        assert!(overview.insights.is_empty());
    }
}
