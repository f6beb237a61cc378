//! Savings goal model
//!
//! A goal is a target amount with a deadline. Progress may exceed 100% when a
//! goal is over-achieved; a deadline in the past marks the goal overdue.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::GoalId;
use super::money::Money;

/// How urgent a goal is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" | "h" => Ok(Self::High),
            "medium" | "med" | "m" => Ok(Self::Medium),
            "low" | "l" => Ok(Self::Low),
            other => Err(format!("Unknown priority: '{}'", other)),
        }
    }
}

fn default_goal_category() -> String {
    "Savings".to_string()
}

/// A savings or spending goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Must be greater than zero
    pub target_amount: Money,
    /// Must not be negative
    #[serde(default)]
    pub current_amount: Money,
    pub deadline: NaiveDate,
    /// Free-form grouping such as "Savings", "Travel" or "Education"
    #[serde(default = "default_goal_category")]
    pub category: String,
    #[serde(default)]
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    /// Create a new goal with nothing saved yet
    pub fn new(title: impl Into<String>, target_amount: Money, deadline: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: GoalId::new(),
            title: title.into(),
            description: String::new(),
            target_amount,
            current_amount: Money::zero(),
            deadline,
            category: default_goal_category(),
            priority: Priority::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_current(mut self, current_amount: Money) -> Self {
        self.current_amount = current_amount;
        self
    }

    /// Record a contribution towards the goal
    pub fn add_progress(&mut self, amount: Money) -> Result<(), GoalValidationError> {
        if !amount.is_positive() {
            return Err(GoalValidationError::NonPositiveContribution);
        }
        let current = self.current_amount + amount;
        if current.exceeds_max() {
            return Err(GoalValidationError::AmountTooLarge);
        }
        self.current_amount = current;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Whether the saved amount has reached the target
    pub fn is_complete(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.title.trim().is_empty() {
            return Err(GoalValidationError::EmptyTitle);
        }
        if !self.target_amount.is_positive() {
            return Err(GoalValidationError::NonPositiveTarget);
        }
        if self.current_amount.is_negative() {
            return Err(GoalValidationError::NegativeCurrent);
        }
        if self.target_amount.exceeds_max() || self.current_amount.exceeds_max() {
            return Err(GoalValidationError::AmountTooLarge);
        }
        Ok(())
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} of {}, by {})",
            self.title,
            self.current_amount,
            self.target_amount,
            self.deadline.format("%Y-%m-%d")
        )
    }
}

/// Validation errors for goals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    EmptyTitle,
    NonPositiveTarget,
    NegativeCurrent,
    NonPositiveContribution,
    AmountTooLarge,
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Goal title cannot be empty"),
            Self::NonPositiveTarget => write!(f, "Target amount must be greater than zero"),
            Self::NegativeCurrent => write!(f, "Current amount cannot be negative"),
            Self::NonPositiveContribution => write!(f, "Contribution must be greater than zero"),
            Self::AmountTooLarge => {
                write!(f, "Goal amounts cannot exceed {}", Money::MAX_AMOUNT)
            }
        }
    }
}

impl std::error::Error for GoalValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn deadline() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
    }

    #[test]
    fn test_new_goal_defaults() {
        let goal = Goal::new("Emergency Fund", Money::from_dollars(5000), deadline());
        assert_eq!(goal.category, "Savings");
        assert_eq!(goal.priority, Priority::Medium);
        assert!(goal.current_amount.is_zero());
        assert!(goal.validate().is_ok());
    }

    #[test]
    fn test_add_progress() {
        let mut goal = Goal::new("New Laptop", Money::from_dollars(2500), deadline())
            .with_current(Money::from_dollars(800));
        goal.add_progress(Money::from_dollars(200)).unwrap();
        assert_eq!(goal.current_amount, Money::from_dollars(1000));

        assert_eq!(
            goal.add_progress(Money::zero()),
            Err(GoalValidationError::NonPositiveContribution)
        );

        // a rejected contribution leaves the saved amount alone
        assert_eq!(
            goal.add_progress(Money::MAX_AMOUNT),
            Err(GoalValidationError::AmountTooLarge)
        );
        assert_eq!(goal.current_amount, Money::from_dollars(1000));
    }

    #[test]
    fn test_target_above_max_is_invalid() {
        let goal = Goal::new("Yacht", Money::MAX_AMOUNT + Money::from_cents(1), deadline());
        assert_eq!(goal.validate(), Err(GoalValidationError::AmountTooLarge));
    }

    #[test]
    fn test_over_achievement_is_complete() {
        let goal = Goal::new("Reduce Dining Out", Money::from_dollars(150), deadline())
            .with_current(Money::from_dollars(160));
        assert!(goal.is_complete());
        assert!(goal.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let goal = Goal::new("Trip", Money::zero(), deadline());
        assert_eq!(goal.validate(), Err(GoalValidationError::NonPositiveTarget));

        let goal = Goal::new(" ", Money::from_dollars(1), deadline());
        assert_eq!(goal.validate(), Err(GoalValidationError::EmptyTitle));

        let goal = Goal::new("Trip", Money::from_dollars(1), deadline())
            .with_current(Money::from_cents(-1));
        assert_eq!(goal.validate(), Err(GoalValidationError::NegativeCurrent));
    }

    #[test]
    fn test_priority_parse_and_order() {
        assert_eq!("high".parse::<Priority>(), Ok(Priority::High));
        assert_eq!("Low".parse::<Priority>(), Ok(Priority::Low));
        assert!("urgent".parse::<Priority>().is_err());
        assert!(Priority::High < Priority::Medium);
        assert!(Priority::Medium < Priority::Low);
    }
}
