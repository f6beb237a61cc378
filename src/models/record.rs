//! Expense and income records
//!
//! A record is created once from user input and never mutated afterwards.
//! Amounts are always positive; the `kind` says which way the money moved.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::RecordId;
use super::money::Money;

/// Whether a record is money going out or coming in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    #[default]
    Expense,
    Income,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => f.pad("expense"),
            Self::Income => f.pad("income"),
        }
    }
}

/// A single expense or income entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: RecordId,
    pub description: String,
    /// Always positive
    pub amount: Money,
    pub category: Category,
    pub date: NaiveDate,
    #[serde(rename = "type", default)]
    pub kind: RecordKind,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl ExpenseRecord {
    /// Create a new expense
    pub fn expense(
        description: impl Into<String>,
        amount: Money,
        category: Category,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: RecordId::new(),
            description: description.into(),
            amount,
            category,
            date,
            kind: RecordKind::Expense,
            notes: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Create a new income entry (category is always `Income`)
    pub fn income(description: impl Into<String>, amount: Money, date: NaiveDate) -> Self {
        Self {
            kind: RecordKind::Income,
            ..Self::expense(description, amount, Category::Income, date)
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn is_expense(&self) -> bool {
        self.kind == RecordKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == RecordKind::Income
    }

    /// Amount with sign applied: negative for expenses, positive for income
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            RecordKind::Expense => -self.amount,
            RecordKind::Income => self.amount,
        }
    }

    /// Validate the record
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.description.trim().is_empty() {
            return Err(RecordValidationError::EmptyDescription);
        }

        if !self.amount.is_positive() {
            return Err(RecordValidationError::NonPositiveAmount(self.amount));
        }

        if self.amount.exceeds_max() {
            return Err(RecordValidationError::AmountTooLarge(self.amount));
        }

        if self.is_income() != (self.category == Category::Income) {
            return Err(RecordValidationError::KindCategoryMismatch);
        }

        Ok(())
    }
}

impl fmt::Display for ExpenseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_income() { '+' } else { '-' };
        write!(
            f,
            "{} {} {}{}",
            self.date.format("%Y-%m-%d"),
            self.description,
            sign,
            self.amount
        )
    }
}

/// Validation errors for records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    EmptyDescription,
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    KindCategoryMismatch,
}

impl fmt::Display for RecordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Description cannot be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than zero (got {})", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Amount cannot exceed {} (got {})", Money::MAX_AMOUNT, amount)
            }
            Self::KindCategoryMismatch => {
                write!(f, "Income records must use the Income category, and only they may")
            }
        }
    }
}

impl std::error::Error for RecordValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn test_expense_and_income() {
        let coffee =
            ExpenseRecord::expense("Coffee Shop", Money::from_cents(450), Category::FoodDining, date());
        assert!(coffee.is_expense());
        assert_eq!(coffee.signed_amount().cents(), -450);

        let job = ExpenseRecord::income("Part-time Job", Money::from_dollars(300), date());
        assert!(job.is_income());
        assert_eq!(job.category, Category::Income);
        assert_eq!(job.signed_amount().cents(), 30000);
    }

    #[test]
    fn test_validation() {
        let mut rec =
            ExpenseRecord::expense("Textbook", Money::from_cents(8999), Category::Education, date());
        assert!(rec.validate().is_ok());

        rec.amount = Money::zero();
        assert_eq!(
            rec.validate(),
            Err(RecordValidationError::NonPositiveAmount(Money::zero()))
        );

        rec.amount = Money::MAX_AMOUNT + Money::from_cents(1);
        assert_eq!(
            rec.validate(),
            Err(RecordValidationError::AmountTooLarge(rec.amount))
        );

        rec.amount = Money::from_cents(100);
        rec.description = "   ".into();
        assert_eq!(rec.validate(), Err(RecordValidationError::EmptyDescription));

        rec.description = "Textbook".into();
        rec.category = Category::Income;
        assert_eq!(rec.validate(), Err(RecordValidationError::KindCategoryMismatch));
    }

    #[test]
    fn test_display() {
        let rec =
            ExpenseRecord::expense("Coffee Shop", Money::from_cents(450), Category::FoodDining, date());
        assert_eq!(rec.to_string(), "2024-01-15 Coffee Shop -$4.50");
    }

    #[test]
    fn test_serialization_uses_type_field() {
        let rec = ExpenseRecord::income("Part-time Job", Money::from_dollars(300), date());
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["type"], "income");
        assert_eq!(json["category"], "Income");

        let back: ExpenseRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, rec);
    }
}
