//! Expense and goal entry forms
//!
//! Forms hold raw user input. `submit` turns it into a validated model value
//! or reports what is wrong; the form itself is never modified by a failed
//! submission.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{FundwiseError, FundwiseResult};
use crate::models::{Category, ExpenseRecord, Goal, Money, Priority};

/// Raw input for a new expense or income record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseForm {
    pub description: String,
    pub amount: String,
    pub category: String,
    /// Empty means today
    pub date: String,
    pub notes: String,
    /// "expense" (default) or "income"
    pub kind: String,
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn parse_amount(field: &str, input: &str) -> FundwiseResult<Money> {
    let amount = Money::parse(input)
        .map_err(|e| FundwiseError::Validation(format!("{}: {}", field, e)))?;
    if !amount.is_positive() {
        return Err(FundwiseError::Validation(format!(
            "{} must be greater than zero",
            field
        )));
    }
    if amount.exceeds_max() {
        return Err(FundwiseError::Validation(format!(
            "{} cannot be more than {}",
            field,
            Money::MAX_AMOUNT
        )));
    }
    Ok(amount)
}

fn parse_date(field: &str, input: &str) -> FundwiseResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        FundwiseError::Validation(format!("{}: expected YYYY-MM-DD, got '{}'", field, input.trim()))
    })
}

impl ExpenseForm {
    fn is_income(&self) -> FundwiseResult<bool> {
        match self.kind.trim().to_lowercase().as_str() {
            "" | "expense" => Ok(false),
            "income" => Ok(true),
            other => Err(FundwiseError::Validation(format!(
                "Unknown record type '{}': use expense or income",
                other
            ))),
        }
    }

    /// Validate the input and build a record dated `today` unless a date was given
    pub fn submit(&self, today: NaiveDate) -> FundwiseResult<ExpenseRecord> {
        let income = self.is_income()?;

        let mut missing = Vec::new();
        if is_blank(&self.description) {
            missing.push("description");
        }
        if is_blank(&self.amount) {
            missing.push("amount");
        }
        if is_blank(&self.category) && !income {
            missing.push("category");
        }
        if !missing.is_empty() {
            return Err(FundwiseError::MissingInformation { fields: missing });
        }

        let amount = parse_amount("amount", &self.amount)?;
        let date = if is_blank(&self.date) {
            today
        } else {
            parse_date("date", &self.date)?
        };

        let record = if income {
            ExpenseRecord::income(self.description.trim(), amount, date)
        } else {
            let category: Category = self
                .category
                .parse()
                .map_err(|e| FundwiseError::Validation(format!("{}", e)))?;
            if category == Category::Income {
                return Err(FundwiseError::Validation(
                    "Income category is only for income records".into(),
                ));
            }
            ExpenseRecord::expense(self.description.trim(), amount, category, date)
        };

        Ok(record.with_notes(self.notes.trim()))
    }

    /// Fill description, amount and category from a quick-add suggestion
    pub fn apply(&mut self, suggestion: &Suggestion) {
        self.description = suggestion.description.to_string();
        self.amount = suggestion.amount().format_with_symbol("");
        self.category = suggestion.category.label().to_string();
    }
}

/// Raw input for a new goal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalForm {
    pub title: String,
    pub description: String,
    pub target_amount: String,
    pub deadline: String,
    /// Empty means "Savings"
    pub category: String,
    /// Empty means medium
    pub priority: String,
}

impl GoalForm {
    pub fn submit(&self) -> FundwiseResult<Goal> {
        let mut missing = Vec::new();
        if is_blank(&self.title) {
            missing.push("title");
        }
        if is_blank(&self.target_amount) {
            missing.push("target amount");
        }
        if is_blank(&self.deadline) {
            missing.push("deadline");
        }
        if !missing.is_empty() {
            return Err(FundwiseError::MissingInformation { fields: missing });
        }

        let target = parse_amount("target amount", &self.target_amount)?;
        let deadline = parse_date("deadline", &self.deadline)?;

        let mut goal = Goal::new(self.title.trim(), target, deadline)
            .with_description(self.description.trim());
        if !is_blank(&self.category) {
            goal = goal.with_category(self.category.trim());
        }
        if !is_blank(&self.priority) {
            let priority: Priority = self.priority.parse().map_err(FundwiseError::Validation)?;
            goal = goal.with_priority(priority);
        }
        Ok(goal)
    }
}

/// A canned expense the form can be filled from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub description: &'static str,
    pub cents: i64,
    pub category: Category,
}

impl Suggestion {
    pub fn amount(&self) -> Money {
        Money::from_cents(self.cents)
    }
}

pub const SUGGESTIONS: [Suggestion; 4] = [
    Suggestion {
        description: "Coffee at campus café",
        cents: 450,
        category: Category::FoodDining,
    },
    Suggestion {
        description: "Bus pass monthly",
        cents: 4500,
        category: Category::Transportation,
    },
    Suggestion {
        description: "Textbook rental",
        cents: 8999,
        category: Category::Education,
    },
    Suggestion {
        description: "Movie ticket",
        cents: 1250,
        category: Category::Entertainment,
    },
];

/// Quick-add suggestions in display order
pub fn suggestions() -> &'static [Suggestion] {
    &SUGGESTIONS
}
