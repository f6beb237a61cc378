//! Budget model
//!
//! A budget is a per-category spending cap compared against what was actually
//! spent in the period. Limits are what gets stored; the spent side is
//! derived from records when a budget is viewed.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::money::Money;

/// A configured spending cap for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLimit {
    pub category: Category,
    pub limit: Money,
}

impl BudgetLimit {
    pub fn new(category: Category, limit: Money) -> Self {
        Self { category, limit }
    }

    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.limit.is_negative() {
            return Err(BudgetValidationError::NegativeLimit);
        }
        if self.limit.exceeds_max() {
            return Err(BudgetValidationError::LimitTooLarge);
        }
        if self.category == Category::Income {
            return Err(BudgetValidationError::IncomeCategory);
        }
        Ok(())
    }
}

/// Spending against a limit for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub category: Category,
    /// Amount spent in the period (non-negative)
    pub spent: Money,
    /// Spending cap (non-negative)
    pub limit: Money,
}

impl Budget {
    pub fn new(category: Category, spent: Money, limit: Money) -> Self {
        Self {
            category,
            spent,
            limit,
        }
    }

    /// Over budget holds when spent exceeds the limit
    pub fn is_over_budget(&self) -> bool {
        self.spent > self.limit
    }

    /// Amount still available before hitting the limit (zero once over)
    pub fn headroom(&self) -> Money {
        if self.is_over_budget() {
            Money::zero()
        } else {
            self.limit - self.spent
        }
    }

    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.limit.is_negative() {
            return Err(BudgetValidationError::NegativeLimit);
        }
        if self.spent.is_negative() {
            return Err(BudgetValidationError::NegativeSpent);
        }
        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}/{}", self.category, self.spent, self.limit)
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NegativeLimit,
    NegativeSpent,
    LimitTooLarge,
    IncomeCategory,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeLimit => write!(f, "Budget limit cannot be negative"),
            Self::NegativeSpent => write!(f, "Spent amount cannot be negative"),
            Self::LimitTooLarge => write!(f, "Budget limit cannot exceed {}", Money::MAX_AMOUNT),
            Self::IncomeCategory => write!(f, "Income cannot have a spending budget"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}
