//! Aggregation over raw records
//!
//! Groups expense and income records by month, category and week. These are
//! the inputs the metrics layer turns into percentages.

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::models::{
    Budget, BudgetLimit, Category, CategoryTrend, ExpenseRecord, Money, Month, MonthlySummary,
};

/// Records dated within `month`
pub fn in_month<'a>(
    records: &'a [ExpenseRecord],
    month: Month,
) -> impl Iterator<Item = &'a ExpenseRecord> + 'a {
    records.iter().filter(move |r| month.contains(r.date))
}

/// Sum of expense amounts
pub fn expense_total<'a>(records: impl IntoIterator<Item = &'a ExpenseRecord>) -> Money {
    records
        .into_iter()
        .filter(|r| r.is_expense())
        .map(|r| r.amount)
        .sum()
}

/// Sum of income amounts
pub fn income_total<'a>(records: impl IntoIterator<Item = &'a ExpenseRecord>) -> Money {
    records
        .into_iter()
        .filter(|r| r.is_income())
        .map(|r| r.amount)
        .sum()
}

/// Expense spend per category within `month`
pub fn spend_by_category(records: &[ExpenseRecord], month: Month) -> BTreeMap<Category, Money> {
    let mut spend = BTreeMap::new();
    for record in in_month(records, month).filter(|r| r.is_expense()) {
        *spend.entry(record.category).or_insert_with(Money::zero) += record.amount;
    }
    spend
}

pub fn monthly_summary(records: &[ExpenseRecord], month: Month) -> MonthlySummary {
    MonthlySummary::new(
        month,
        income_total(in_month(records, month)),
        expense_total(in_month(records, month)),
    )
}

/// One summary per month for the `months` months ending at `end`, oldest first
pub fn monthly_history(records: &[ExpenseRecord], end: Month, months: usize) -> Vec<MonthlySummary> {
    end.trailing(months)
        .into_iter()
        .map(|m| monthly_summary(records, m))
        .collect()
}

/// Join configured limits with the month's spend, in limit order
pub fn budgets_from_limits(
    limits: &[BudgetLimit],
    records: &[ExpenseRecord],
    month: Month,
) -> Vec<Budget> {
    let spend = spend_by_category(records, month);
    limits
        .iter()
        .map(|limit| {
            let spent = spend.get(&limit.category).copied().unwrap_or_default();
            Budget::new(limit.category, spent, limit.limit)
        })
        .collect()
}

/// This month vs the previous month for every category with spend in either.
///
/// Sorted by this month's spend, largest first.
pub fn category_trends(records: &[ExpenseRecord], month: Month) -> Vec<CategoryTrend> {
    let current = spend_by_category(records, month);
    let previous = spend_by_category(records, month.prev());

    let mut categories: Vec<Category> = current.keys().chain(previous.keys()).copied().collect();
    categories.sort();
    categories.dedup();

    let mut trends: Vec<CategoryTrend> = categories
        .into_iter()
        .map(|c| {
            CategoryTrend::new(
                c,
                current.get(&c).copied().unwrap_or_default(),
                previous.get(&c).copied().unwrap_or_default(),
            )
        })
        .collect();

    trends.sort_by(|a, b| b.this_period.cmp(&a.this_period).then(a.category.cmp(&b.category)));
    trends
}

/// Expense spend per week of `month`: days 1-7, 8-14, 15-21, 22-28, 29-end
pub fn weekly_spending(records: &[ExpenseRecord], month: Month) -> Vec<(String, Money)> {
    let weeks = ((month.days() + 6) / 7) as usize;
    let mut buckets = vec![Money::zero(); weeks];

    for record in in_month(records, month).filter(|r| r.is_expense()) {
        let index = ((record.date.day() - 1) / 7) as usize;
        if let Some(bucket) = buckets.get_mut(index) {
            *bucket += record.amount;
        }
    }

    buckets
        .into_iter()
        .enumerate()
        .map(|(i, amount)| (format!("Week {}", i + 1), amount))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn jan() -> Month {
        Month::new(2024, 1).unwrap()
    }

    fn records() -> Vec<ExpenseRecord> {
        vec![
            ExpenseRecord::expense("Coffee", Money::from_cents(450), Category::FoodDining, date(2024, 1, 15)),
            ExpenseRecord::expense("Groceries", Money::from_cents(6723), Category::FoodDining, date(2024, 1, 12)),
            ExpenseRecord::expense("Textbook", Money::from_cents(8999), Category::Education, date(2024, 1, 14)),
            ExpenseRecord::income("Job", Money::from_dollars(300), date(2024, 1, 13)),
            ExpenseRecord::expense("Dinner", Money::from_dollars(50), Category::FoodDining, date(2023, 12, 20)),
            ExpenseRecord::expense("Train", Money::from_dollars(30), Category::Transportation, date(2023, 12, 21)),
        ]
    }

    #[test]
    fn test_spend_by_category_ignores_income_and_other_months() {
        let spend = spend_by_category(&records(), jan());
        assert_eq!(spend.get(&Category::FoodDining), Some(&Money::from_cents(7173)));
        assert_eq!(spend.get(&Category::Education), Some(&Money::from_cents(8999)));
        assert!(!spend.contains_key(&Category::Income));
        assert!(!spend.contains_key(&Category::Transportation));
    }

    #[test]
    fn test_monthly_summary() {
        let summary = monthly_summary(&records(), jan());
        assert_eq!(summary.income, Money::from_dollars(300));
        assert_eq!(summary.expenses, Money::from_cents(16172));
    }

    #[test]
    fn test_monthly_history_is_oldest_first() {
        let history = monthly_history(&records(), jan(), 3);
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].month, Month::new(2023, 11).unwrap());
        assert!(history[0].expenses.is_zero());
        assert_eq!(history[1].expenses, Money::from_dollars(80));
        assert_eq!(history[2].month, jan());
    }

    #[test]
    fn test_budgets_from_limits() {
        let limits = [
            BudgetLimit::new(Category::FoodDining, Money::from_dollars(300)),
            BudgetLimit::new(Category::Shopping, Money::from_dollars(50)),
        ];
        let budgets = budgets_from_limits(&limits, &records(), jan());
        assert_eq!(budgets.len(), 2);
        assert_eq!(budgets[0].spent, Money::from_cents(7173));
        assert_eq!(budgets[1].spent, Money::zero());
        assert_eq!(budgets[1].limit, Money::from_dollars(50));
    }

    #[test]
    fn test_category_trends_cover_both_months() {
        let trends = category_trends(&records(), jan());
        let categories: Vec<_> = trends.iter().map(|t| t.category).collect();
        assert_eq!(
            categories,
            [Category::Education, Category::FoodDining, Category::Transportation]
        );
        let transport = trends[2];
        assert!(transport.this_period.is_zero());
        assert_eq!(transport.last_period, Money::from_dollars(30));
    }

    #[test]
    fn test_weekly_spending_buckets() {
        let weeks = weekly_spending(&records(), jan());
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0].0, "Week 1");
        // 12th and 14th fall in week 2, the 15th in week 3
        assert_eq!(weeks[1].1, Money::from_cents(6723 + 8999));
        assert_eq!(weeks[2].1, Money::from_cents(450));
        assert!(weeks[4].1.is_zero());

        let feb_2023 = Month::new(2023, 2).unwrap();
        assert_eq!(weekly_spending(&[], feb_2023).len(), 4);
    }
}
