//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. Ratios and percentages are computed in `f64` by the metrics layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Largest amount a single record, goal or limit may hold ($1,000,000,000.00).
    /// Keeps sums over stored data far from the i64 range.
    pub const MAX_AMOUNT: Money = Money(100_000_000_000);

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use fundwise::models::Money;
    /// let amount = Money::from_cents(245075); // $2450.75
    /// assert_eq!(amount.dollars(), 2450);
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole dollars
    pub const fn from_dollars(dollars: i64) -> Self {
        Self(dollars * 100)
    }

    /// Create a Money amount from dollars and cents
    pub const fn from_dollars_cents(dollars: i64, cents: i64) -> Self {
        Self(dollars * 100 + cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole dollars portion (truncated toward zero)
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// The amount in currency units as a float, for ratios and exports
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Whether the magnitude is above [`Money::MAX_AMOUNT`]
    pub const fn exceeds_max(&self) -> bool {
        self.0.saturating_abs() > Self::MAX_AMOUNT.0
    }

    /// Divide into `parts` equal shares, rounding half away from zero.
    /// Returns `None` when `parts` is zero.
    pub fn split_even(&self, parts: i64) -> Option<Self> {
        if parts == 0 {
            return None;
        }
        Some(Self((self.0 as f64 / parts as f64).round() as i64))
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "10", "1,250.00"
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s)
        };

        let s = s.strip_prefix('$').unwrap_or(s);
        let cleaned: String = s.chars().filter(|c| *c != ',').collect();
        let s = cleaned.as_str();

        if s.is_empty() {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let cents = if s.contains('.') {
            let parts: Vec<&str> = s.split('.').collect();
            if parts.len() != 2 {
                return Err(MoneyParseError::InvalidFormat(s.to_string()));
            }

            let dollars: i64 = if parts[0].is_empty() {
                0
            } else {
                parts[0]
                    .parse()
                    .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?
            };

            // Pad or truncate cents to 2 digits
            let cents_str = parts[1];
            if !cents_str.chars().all(|c| c.is_ascii_digit()) {
                return Err(MoneyParseError::InvalidFormat(s.to_string()));
            }
            let cents: i64 = match cents_str.len() {
                0 => 0,
                1 => {
                    cents_str
                        .parse::<i64>()
                        .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?
                        * 10
                }
                _ => cents_str[..2]
                    .parse()
                    .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?,
            };

            dollars
                .checked_mul(100)
                .and_then(|d| d.checked_add(cents))
                .ok_or_else(|| MoneyParseError::OutOfRange(s.to_string()))?
        } else {
            s.parse::<i64>()
                .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?
                .checked_mul(100)
                .ok_or_else(|| MoneyParseError::OutOfRange(s.to_string()))?
        };

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!(
                "-{}{}.{:02}",
                symbol,
                self.dollars().abs(),
                self.cents_part()
            )
        } else {
            format!("{}{}.{:02}", symbol, self.dollars(), self.cents_part())
        }
    }

    /// Format with an explicit sign, e.g. "+$20.00" / "-$4.50"
    pub fn format_signed(&self, symbol: &str) -> String {
        if self.is_negative() {
            self.format_with_symbol(symbol)
        } else {
            format!("+{}", self.format_with_symbol(symbol))
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Pad through the formatter so table columns can align
        f.pad(&self.format_with_symbol("$"))
    }
}

// Arithmetic saturates at the i64 bounds rather than overflowing.
impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::OutOfRange(s) => write!(f, "Amount is too large: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(245075);
        assert_eq!(m.cents(), 245075);
        assert_eq!(m.dollars(), 2450);
        assert_eq!(m.cents_part(), 75);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "$10.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
        assert_eq!(format!("{}", Money::from_cents(-450)), "-$4.50");
        assert_eq!(format!("{:>8}", Money::from_cents(5)), "   $0.05");
    }

    #[test]
    fn test_format_signed() {
        assert_eq!(Money::from_dollars(20).format_signed("$"), "+$20.00");
        assert_eq!(Money::from_cents(-8700).format_signed("$"), "-$87.00");
        assert_eq!(Money::from_cents(1050).format_with_symbol("€"), "€10.50");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_dollars(120);
        let b = Money::from_dollars(100);

        assert_eq!((a - b).cents(), 2000);
        assert_eq!((a + b).cents(), 22000);
        assert_eq!((-a).cents(), -12000);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("89.99").unwrap().cents(), 8999);
        assert_eq!(Money::parse("$4.50").unwrap().cents(), 450);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("300").unwrap().cents(), 30000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse(".75").unwrap().cents(), 75);
        assert_eq!(Money::parse("1,250.00").unwrap().cents(), 125000);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("4.x0").is_err());
    }

    #[test]
    fn test_parse_huge_amount_is_an_error() {
        assert_eq!(
            Money::parse("99999999999999999"),
            Err(MoneyParseError::OutOfRange("99999999999999999".into()))
        );
        assert!(matches!(
            Money::parse("92233720368547758.08"),
            Err(MoneyParseError::OutOfRange(_))
        ));
        assert!(matches!(
            Money::parse("99999999999999999999"),
            Err(MoneyParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_exceeds_max() {
        assert!(!Money::MAX_AMOUNT.exceeds_max());
        assert!((Money::MAX_AMOUNT + Money::from_cents(1)).exceeds_max());
        assert!((-Money::MAX_AMOUNT - Money::from_cents(1)).exceeds_max());
        assert!(!Money::from_cents(450).exceeds_max());
    }

    #[test]
    fn test_arithmetic_saturates() {
        let big = Money::from_cents(i64::MAX - 1);
        assert_eq!((big + Money::from_dollars(1)).cents(), i64::MAX);
        let total: Money = [big, big, big].iter().sum();
        assert_eq!(total.cents(), i64::MAX);
        assert_eq!((Money::from_cents(i64::MIN) - big).cents(), i64::MIN);
    }

    #[test]
    fn test_split_even() {
        assert_eq!(
            Money::from_cents(98750).split_even(30),
            Some(Money::from_cents(3292))
        );
        assert_eq!(Money::from_dollars(10).split_even(0), None);
    }

    #[test]
    fn test_sum() {
        let amounts = [
            Money::from_cents(450),
            Money::from_cents(8999),
            Money::from_cents(6723),
        ];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.cents(), 16172);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
