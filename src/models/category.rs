//! Spending categories
//!
//! Expense records carry one of a fixed set of category labels. The labels
//! are what the user sees and what gets serialized.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed category labels for expense and income records
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Food & Dining")]
    FoodDining,
    #[serde(rename = "Education")]
    Education,
    #[serde(rename = "Transportation")]
    Transportation,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Health & Fitness")]
    HealthFitness,
    #[serde(rename = "Bills & Utilities")]
    BillsUtilities,
    #[serde(rename = "Income")]
    Income,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    /// Every category, in the order the expense form offers them
    pub const ALL: [Category; 9] = [
        Category::FoodDining,
        Category::Education,
        Category::Transportation,
        Category::Entertainment,
        Category::Shopping,
        Category::HealthFitness,
        Category::BillsUtilities,
        Category::Income,
        Category::Other,
    ];

    /// Categories offered for expenses (everything except `Income`)
    pub fn expense_categories() -> impl Iterator<Item = Category> {
        Self::ALL.into_iter().filter(|c| *c != Category::Income)
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::FoodDining => "Food & Dining",
            Self::Education => "Education",
            Self::Transportation => "Transportation",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::HealthFitness => "Health & Fitness",
            Self::BillsUtilities => "Bills & Utilities",
            Self::Income => "Income",
            Self::Other => "Other",
        }
    }

    /// Short slug accepted on the command line
    pub fn slug(&self) -> &'static str {
        match self {
            Self::FoodDining => "food",
            Self::Education => "education",
            Self::Transportation => "transport",
            Self::Entertainment => "entertainment",
            Self::Shopping => "shopping",
            Self::HealthFitness => "health",
            Self::BillsUtilities => "bills",
            Self::Income => "income",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Collapse a label to lowercase alphanumerics: "Food & Dining" -> "fooddining"
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        if wanted.is_empty() {
            return Err(CategoryParseError(s.to_string()));
        }

        Self::ALL
            .into_iter()
            .find(|c| normalize(c.label()) == wanted || c.slug() == wanted)
            .ok_or_else(|| CategoryParseError(s.to_string()))
    }
}

/// Error returned when a string names no known category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryParseError(pub String);

impl fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown category: '{}'", self.0)
    }
}

impl std::error::Error for CategoryParseError {}
