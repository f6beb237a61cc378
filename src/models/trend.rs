//! Period-over-period aggregates
//!
//! `CategoryTrend` compares one category's spend against the previous period;
//! `MonthlySummary` is one point of the income vs expenses history.

use serde::{Deserialize, Serialize};

use super::category::Category;
use super::money::Money;
use super::period::Month;

/// Spend in one category this period compared with the last
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTrend {
    pub category: Category,
    pub this_period: Money,
    pub last_period: Money,
}

impl CategoryTrend {
    pub fn new(category: Category, this_period: Money, last_period: Money) -> Self {
        Self {
            category,
            this_period,
            last_period,
        }
    }

    /// Absolute change from last period (positive = spending went up)
    pub fn delta(&self) -> Money {
        self.this_period - self.last_period
    }
}

/// Income and expenses for one month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub month: Month,
    pub income: Money,
    pub expenses: Money,
}

impl MonthlySummary {
    pub fn new(month: Month, income: Money, expenses: Money) -> Self {
        Self {
            month,
            income,
            expenses,
        }
    }

    /// What was left over (negative when spending exceeded income)
    pub fn savings(&self) -> Money {
        self.income - self.expenses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_delta() {
        let food = CategoryTrend::new(
            Category::FoodDining,
            Money::from_dollars(245),
            Money::from_dollars(198),
        );
        assert_eq!(food.delta(), Money::from_dollars(47));

        let education = CategoryTrend::new(
            Category::Education,
            Money::from_dollars(180),
            Money::from_dollars(220),
        );
        assert!(education.delta().is_negative());
    }

    #[test]
    fn test_monthly_savings() {
        let jan = MonthlySummary::new(
            Month::new(2024, 1).unwrap(),
            Money::from_dollars(1200),
            Money::from_dollars(987),
        );
        assert_eq!(jan.savings(), Money::from_dollars(213));
    }
}
