//! Formatting helpers shared by the terminal views

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;

use crate::config::Settings;
use crate::models::Money;

/// Currency and date conventions for rendered output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatting {
    pub currency: String,
    pub date_format: String,
}

impl Default for Formatting {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl Formatting {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            currency: settings.currency_symbol.clone(),
            date_format: settings.date_format.clone(),
        }
    }

    pub fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency)
    }

    /// Money with an explicit sign, e.g. "+$20.00"
    pub fn signed(&self, amount: Money) -> String {
        amount.format_signed(&self.currency)
    }

    pub fn optional_money(&self, amount: Option<Money>) -> String {
        amount.map_or_else(|| NOT_APPLICABLE.to_string(), |m| self.money(m))
    }

    /// Falls back to ISO dates when the configured format does not parse
    pub fn date(&self, date: NaiveDate) -> String {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return date.format("%Y-%m-%d").to_string();
        }
        date.format(&self.date_format).to_string()
    }
}

/// How ratios with a zero denominator are shown
pub const NOT_APPLICABLE: &str = "n/a";

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    let magnitude = pct.abs();
    if magnitude < 0.1 && magnitude > 0.0 {
        format!("{:.2}%", pct)
    } else if magnitude < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// A ratio that may not apply, one decimal place
pub fn format_pct(pct: Option<f64>) -> String {
    pct.map_or_else(|| NOT_APPLICABLE.to_string(), |p| format!("{:.1}%", p))
}

/// A change that may not apply, with explicit sign ("+23.7%", "-18.2%")
pub fn format_change(pct: Option<f64>) -> String {
    pct.map_or_else(|| NOT_APPLICABLE.to_string(), |p| format!("{:+.1}%", p))
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Section title underlined to its own width
pub fn section(title: &str) -> String {
    format!("{}\n{}\n", title, separator(title.chars().count()))
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
