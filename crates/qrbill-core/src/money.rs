//! # Money Module
//!
//! Provides the `Money` type for payment amounts and the `Currency` enum.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  0.1 + 0.2 = 0.30000000000000004  ❌ never acceptable in a payload      │
//! │                                                                         │
//! │  The payload carries the EXACT amount with two decimals:                │
//! │    "1994.75"   →   Money(199475 centimes)   →   "1994.75"               │
//! │                                                                         │
//! │  Parsing and formatting go through integer centimes only.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use qrbill_core::money::Money;
//!
//! let amount = Money::parse_decimal("1'994.75").unwrap();
//! assert_eq!(amount.cents(), 199_475);
//! assert_eq!(amount.to_payload_string(), "1994.75");
//! assert_eq!(amount.format_for_display(), "1 994.75");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{QrBillError, ValidationError, ValidationResult};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (centimes / cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: invoice totals may go negative after credit notes;
///   the payload range check rejects those separately
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serialized as a decimal string** (`"1994.75"`): external input is
///   parsed with [`Money::parse_decimal`], never read as raw centimes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(try_from = "String", into = "String")]
#[ts(export)]
pub struct Money(#[ts(type = "string")] i64);

impl Money {
    /// Creates a Money value from centimes.
    ///
    /// ## Example
    /// ```rust
    /// use qrbill_core::money::Money;
    ///
    /// let price = Money::from_cents(199_475); // 1994.75
    /// assert_eq!(price.cents(), 199_475);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in centimes.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (francs / euros) portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Parses an exact decimal amount.
    ///
    /// ## Accepted Input
    /// ```text
    /// "1994.75"    → 199475
    /// "1994.7"     → 199470
    /// "1994"       → 199400
    /// "1'994.75"   → 199475   (Swiss thousands separator)
    /// "1 994,75"   → 199475   (space grouping, comma decimal)
    /// ```
    ///
    /// Negative values, more than two fractional digits and anything that is
    /// not a digit are rejected.
    pub fn parse_decimal(raw: &str) -> ValidationResult<Self> {
        let invalid = |reason: String| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason,
        };

        let mut cleaned: String = raw
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '\'' && *c != '’')
            .collect();

        if cleaned.contains(',') {
            if cleaned.contains('.') {
                cleaned = cleaned.replace(',', "");
            } else {
                cleaned = cleaned.replace(',', ".");
            }
        }

        if cleaned.is_empty() {
            return Err(ValidationError::Required {
                field: "amount".to_string(),
            });
        }
        if cleaned.starts_with('-') {
            return Err(invalid(format!("negative amount: {cleaned}")));
        }

        let mut split = cleaned.split('.');
        let int_part = split.next().unwrap_or("");
        let dec_part = split.next().unwrap_or("");
        if split.next().is_some() {
            return Err(invalid(format!("too many dots in amount: {cleaned}")));
        }
        if int_part.is_empty() && dec_part.is_empty() {
            return Err(invalid(format!("no digits in amount: {cleaned}")));
        }
        if !int_part.chars().chain(dec_part.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid(format!("not a decimal number: {cleaned}")));
        }

        let major: i64 = if int_part.is_empty() {
            0
        } else {
            int_part
                .parse()
                .map_err(|_| invalid(format!("amount too large: {cleaned}")))?
        };

        let minor: i64 = match dec_part.len() {
            0 => 0,
            1 => dec_part.parse::<i64>().unwrap_or(0) * 10,
            2 => dec_part.parse::<i64>().unwrap_or(0),
            _ => {
                return Err(invalid(format!(
                    "too many fractional digits in amount: {cleaned}"
                )))
            }
        };

        major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .map(Money)
            .ok_or_else(|| invalid(format!("amount too large: {cleaned}")))
    }

    /// Formats the amount as it appears in the payload: digits, a dot and
    /// exactly two decimals, no grouping.
    pub fn to_payload_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.major().unsigned_abs(), self.cents_part())
    }

    /// Formats the amount for the human-readable part of the slip, grouping
    /// thousands with a space: `1 994.75`.
    pub fn format_for_display(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.major().unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(' ');
            }
            grouped.push(ch);
        }
        format!("{}{}.{:02}", sign, grouped, self.cents_part())
    }

    /// Rounds to the nearest 0.05 (round half up), for displaying final totals.
    ///
    /// ## Example
    /// ```rust
    /// use qrbill_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1_002).round_to_five_centimes().cents(), 1_000);
    /// assert_eq!(Money::from_cents(1_003).round_to_five_centimes().cents(), 1_005);
    /// assert_eq!(Money::from_cents(1_007).round_to_five_centimes().cents(), 1_005);
    /// ```
    ///
    /// Never applied to the payload amount, which carries the exact value.
    ///
    /// Saturates at the ends of the `i64` range.
    pub fn round_to_five_centimes(&self) -> Money {
        Money(self.0.saturating_add(2).div_euclid(5).saturating_mul(5))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display uses the payload representation (`1994.75`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_payload_string())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl TryFrom<String> for Money {
    type Error = ValidationError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Money::parse_decimal(&raw)
    }
}

impl From<Money> for String {
    fn from(money: Money) -> Self {
        money.to_payload_string()
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Currency
// =============================================================================

/// The two currencies a QR-bill may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Currency {
    /// Swiss franc.
    #[serde(rename = "CHF")]
    Chf,
    /// Euro.
    #[serde(rename = "EUR")]
    Eur,
}

impl Currency {
    /// Returns the ISO 4217 code written into the payload.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Chf => "CHF",
            Currency::Eur => "EUR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = QrBillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CHF" => Ok(Currency::Chf),
            "EUR" => Ok(Currency::Eur),
            _ => Err(QrBillError::UnsupportedCurrency(s.trim().to_string())),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(199_475);
        assert_eq!(money.cents(), 199_475);
        assert_eq!(money.major(), 1994);
        assert_eq!(money.cents_part(), 75);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Money::parse_decimal("1994.75").unwrap().cents(), 199_475);
        assert_eq!(Money::parse_decimal("1994.7").unwrap().cents(), 199_470);
        assert_eq!(Money::parse_decimal("1994").unwrap().cents(), 199_400);
        assert_eq!(Money::parse_decimal("1'994.75").unwrap().cents(), 199_475);
        assert_eq!(Money::parse_decimal(" 1 994,75 ").unwrap().cents(), 199_475);
        assert_eq!(Money::parse_decimal(".50").unwrap().cents(), 50);
        assert_eq!(
            Money::parse_decimal("999999999.99").unwrap().cents(),
            99_999_999_999
        );
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        assert!(matches!(
            Money::parse_decimal(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(Money::parse_decimal("-5.00").is_err());
        assert!(Money::parse_decimal("1.234").is_err());
        assert!(Money::parse_decimal("1.2.3").is_err());
        assert!(Money::parse_decimal("12a").is_err());
        assert!(Money::parse_decimal(".").is_err());
        assert!(Money::parse_decimal("99999999999999999999").is_err());
    }

    #[test]
    fn test_payload_string() {
        assert_eq!(Money::from_cents(199_475).to_payload_string(), "1994.75");
        assert_eq!(Money::from_cents(1).to_payload_string(), "0.01");
        assert_eq!(Money::from_cents(500).to_payload_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_payload_string(), "-5.50");
        assert_eq!(format!("{}", Money::from_cents(1099)), "10.99");
    }

    #[test]
    fn test_display_grouping() {
        assert_eq!(Money::from_cents(199_475).format_for_display(), "1 994.75");
        assert_eq!(Money::from_cents(99_999_999_999).format_for_display(), "999 999 999.99");
        assert_eq!(Money::from_cents(12_300).format_for_display(), "123.00");
        assert_eq!(Money::from_cents(100_000).format_for_display(), "1 000.00");
    }

    #[test]
    fn test_round_to_five_centimes() {
        let cases = [
            (0, 0),
            (1, 0),
            (2, 0),
            (3, 5),
            (4, 5),
            (5, 5),
            (199_475, 199_475),
            (199_473, 199_475),
            (199_472, 199_470),
            (-3, -5),
            (-2, 0),
        ];
        for (input, expected) in cases {
            assert_eq!(
                Money::from_cents(input).round_to_five_centimes().cents(),
                expected,
                "rounding {input}"
            );
        }
    }

    #[test]
    fn test_sum_of_lines() {
        let total: Money = [1_000, 2_503, 499]
            .into_iter()
            .map(Money::from_cents)
            .sum();
        assert_eq!(total.cents(), 4_002);
        assert_eq!(total.round_to_five_centimes().cents(), 4_000);
    }

    #[test]
    fn test_extreme_values_do_not_panic() {
        assert_eq!(
            Money::from_cents(i64::MIN).to_payload_string(),
            "-92233720368547758.08"
        );
        assert_eq!(
            Money::from_cents(i64::MIN).format_for_display(),
            "-92 233 720 368 547 758.08"
        );
        let high = Money::from_cents(i64::MAX).round_to_five_centimes().cents();
        assert_eq!(high % 5, 0);
        assert!(i64::MAX - high < 5);
        let low = Money::from_cents(i64::MIN).round_to_five_centimes().cents();
        assert!(low <= i64::MIN + 5);
    }

    #[test]
    fn test_serde_uses_decimal_string() {
        let amount: Money = serde_json::from_str(r#""1994.75""#).unwrap();
        assert_eq!(amount.cents(), 199_475);
        assert_eq!(serde_json::to_string(&amount).unwrap(), r#""1994.75""#);

        let whole: Money = serde_json::from_str(r#""1994""#).unwrap();
        assert_eq!(whole.cents(), 199_400);

        // bare JSON numbers are never read as centimes
        assert!(serde_json::from_str::<Money>("1994").is_err());
        assert!(serde_json::from_str::<Money>(r#""1.234""#).is_err());
    }

    #[test]
    fn test_currency_parsing() {
        assert_eq!("CHF".parse::<Currency>().unwrap(), Currency::Chf);
        assert_eq!(" eur ".parse::<Currency>().unwrap(), Currency::Eur);
        assert!(matches!(
            "USD".parse::<Currency>(),
            Err(QrBillError::UnsupportedCurrency(code)) if code == "USD"
        ));
        assert_eq!(Currency::Eur.to_string(), "EUR");
    }
}
