//! Calendar month periods
//!
//! All dashboard aggregates are computed per calendar month ("this month" vs
//! "last month"). `Month` is always valid: the month number is 1-12.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month such as 2024-01
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Create a month, returning `None` if `month` is not 1-12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The month containing `date`
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month
    pub fn start_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the month (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        self.next().start_date() - Duration::days(1)
    }

    /// Number of days in the month
    pub fn days(&self) -> i64 {
        (self.next().start_date() - self.start_date()).num_days()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The `count` months ending with (and including) this one, oldest first
    pub fn trailing(&self, count: usize) -> Vec<Month> {
        let mut months = Vec::with_capacity(count);
        let mut current = *self;
        for _ in 0..count {
            months.push(current);
            current = current.prev();
        }
        months.reverse();
        months
    }

    /// Short name used in charts: "Jan", "Feb", ...
    pub fn abbreviation(&self) -> &'static str {
        MONTH_ABBREVIATIONS[(self.month - 1) as usize]
    }

    /// Parse "2024-01"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;

        let year: i32 = year
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;

        Self::new(year, month).ok_or(PeriodParseError::InvalidMonth(month))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:04}-{:02}", self.year, self.month))
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.to_string()
    }
}

impl TryFrom<String> for Month {
    type Error = PeriodParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Month::parse(&s)
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid month format (expected YYYY-MM): {}", s),
            Self::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(y: i32, m: u32) -> Month {
        Month::new(y, m).unwrap()
    }

    #[test]
    fn test_bounds() {
        let feb = month(2024, 2);
        assert_eq!(feb.start_date(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(feb.end_date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(feb.days(), 29);
        assert!(feb.contains(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
        assert!(!feb.contains(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
    }

    #[test]
    fn test_navigation_wraps_years() {
        assert_eq!(month(2024, 1).prev(), month(2023, 12));
        assert_eq!(month(2023, 12).next(), month(2024, 1));
    }

    #[test]
    fn test_trailing() {
        let months = month(2024, 1).trailing(6);
        let labels: Vec<_> = months.iter().map(|m| m.abbreviation()).collect();
        assert_eq!(labels, ["Aug", "Sep", "Oct", "Nov", "Dec", "Jan"]);
        assert_eq!(months[0], month(2023, 8));
    }

    #[test]
    fn test_parse() {
        assert_eq!(Month::parse("2024-01"), Ok(month(2024, 1)));
        assert_eq!(Month::parse("2024-13"), Err(PeriodParseError::InvalidMonth(13)));
        assert!(Month::parse("January").is_err());
        assert!(Month::new(2024, 0).is_none());
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&month(2024, 3)).unwrap();
        assert_eq!(json, "\"2024-03\"");
        let back: Month = serde_json::from_str(&json).unwrap();
        assert_eq!(back, month(2024, 3));
    }
}
