//! # Price Module
//!
//! Provides the `Price` type: a decimal with exactly two fractional digits,
//! stored as an integer count of cents. Parsing and rounding go through
//! `rust_decimal`; only the stored form is an `i64`.
//!
//! ## Why Integer Cents?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌                                  │
//! │                                                                         │
//! │  A price set as 12.5, 12.50 or "12.50" must compare equal after a      │
//! │  round trip through the database. Integer cents make that exact:       │
//! │                                                                         │
//! │    12.5   ──┐                                                           │
//! │    "12.50" ─┼──► ToPrice ──► Price(1250) ──► price_cents = 1250        │
//! │    1250¢  ──┘                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## One Coercion
//! Every input kind goes through [`Price::parse`]. Floats and integers are
//! rendered to their decimal text first, so `12.345_f64` and `"12.345"` land
//! on the same cent. The repository uses the same [`ToPrice`] trait for
//! `find_by_price`, so a query can never drift from what was stored.
//!
//! ## Usage
//! ```rust
//! use catalog_core::price::{Price, ToPrice};
//!
//! let a = 29_i64.to_price().unwrap();
//! let b = "29".to_price().unwrap();
//! let c = 29.0_f64.to_price().unwrap();
//!
//! assert_eq!(a, b);
//! assert_eq!(b, c);
//! assert_eq!(a.cents(), 2900);
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{DataValidationError, ValidationResult};

/// Largest magnitude a price column holds: 14 significant digits, 2 of them
/// after the decimal point.
pub const MAX_PRICE_CENTS: i64 = 99_999_999_999_999;

// =============================================================================
// Price Type
// =============================================================================

/// A catalog price with fixed two-digit precision.
///
/// ## Design Decisions
/// - **i64 cents**: exact equality, no float drift
/// - **Signed**: the catalog does not police sign, only format
/// - **Transparent in SQL**: stored as the INTEGER `price_cents` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct Price(i64);

impl Price {
    /// Creates a price from cents.
    ///
    /// ```rust
    /// use catalog_core::Price;
    ///
    /// let price = Price::from_cents(1250);
    /// assert_eq!(price.to_string(), "12.50");
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Price(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Zero price.
    #[inline]
    pub const fn zero() -> Self {
        Price(0)
    }

    /// Largest representable price, `999999999999.99`.
    pub const MAX: Price = Price(MAX_PRICE_CENTS);

    /// Converts a decimal into a price, rounding to cents half away from zero.
    ///
    /// ```rust
    /// use catalog_core::Price;
    /// use rust_decimal::Decimal;
    ///
    /// let price = Price::from_decimal(Decimal::new(12345, 3)).unwrap();
    /// assert_eq!(price.cents(), 1235);
    /// ```
    pub fn from_decimal(value: Decimal) -> ValidationResult<Self> {
        let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        if rounded.abs() > Price::MAX.as_decimal() {
            return Err(DataValidationError::invalid_price(
                value.to_string(),
                "exceeds 14 digits of precision",
            ));
        }

        (rounded * Decimal::ONE_HUNDRED)
            .to_i64()
            .map(Price)
            .ok_or_else(|| DataValidationError::invalid_price(value.to_string(), "too large"))
    }

    /// Returns the price as a decimal with scale 2.
    #[inline]
    pub fn as_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Parses decimal text into a price.
    ///
    /// ## Rules
    /// - Optional leading `+` or `-`
    /// - Digits with at most one `.`; either side may be empty, not both
    /// - More than two fractional digits are rounded half away from zero
    /// - Magnitude must fit [`MAX_PRICE_CENTS`]
    ///
    /// ## Example
    /// ```rust
    /// use catalog_core::Price;
    ///
    /// assert_eq!(Price::parse("29").unwrap().cents(), 2900);
    /// assert_eq!(Price::parse(" 12.5 ").unwrap().cents(), 1250);
    /// assert_eq!(Price::parse("0.005").unwrap().cents(), 1);
    /// assert!(Price::parse("12,50").is_err());
    /// ```
    pub fn parse(text: &str) -> ValidationResult<Self> {
        let trimmed = text.trim();
        let invalid = |reason: &str| DataValidationError::invalid_price(text, reason);

        let (sign, unsigned) = match trimmed.as_bytes().first() {
            Some(b'-') => ("-", &trimmed[1..]),
            Some(b'+') => ("", &trimmed[1..]),
            Some(_) => ("", trimmed),
            None => return Err(invalid("empty value")),
        };

        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        // stricter than Decimal's parser, which also accepts `_` separators
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("no digits"));
        }
        if !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid("not a decimal number"));
        }

        let canonical = format!(
            "{}{}.{}",
            sign,
            if whole.is_empty() { "0" } else { whole },
            if fraction.is_empty() { "0" } else { fraction },
        );
        let value = Decimal::from_str_exact(&canonical)
            .map_err(|e| invalid(&format!("out of range ({e})")))?;

        Price::from_decimal(value).map_err(|_| invalid("exceeds 14 digits of precision"))
    }
}

// =============================================================================
// Canonical Coercion
// =============================================================================

/// Conversion of any accepted price input into a [`Price`].
///
/// Implemented for `Price` itself, integers, floats and numeric text. All
/// non-`Price` inputs are funnelled through [`Price::parse`].
pub trait ToPrice {
    fn to_price(&self) -> ValidationResult<Price>;
}

impl ToPrice for Price {
    fn to_price(&self) -> ValidationResult<Price> {
        Ok(*self)
    }
}

impl ToPrice for str {
    fn to_price(&self) -> ValidationResult<Price> {
        Price::parse(self)
    }
}

impl ToPrice for String {
    fn to_price(&self) -> ValidationResult<Price> {
        Price::parse(self)
    }
}

impl ToPrice for f64 {
    fn to_price(&self) -> ValidationResult<Price> {
        // f64's Display never uses exponent notation; NaN/inf fail to parse
        Price::parse(&self.to_string())
    }
}

macro_rules! integer_to_price {
    ($($t:ty),*) => {
        $(
            impl ToPrice for $t {
                fn to_price(&self) -> ValidationResult<Price> {
                    Price::parse(&self.to_string())
                }
            }
        )*
    };
}

integer_to_price!(i32, i64, u32, u64);

impl<T: ToPrice + ?Sized> ToPrice for &T {
    fn to_price(&self) -> ValidationResult<Price> {
        (**self).to_price()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders as a plain two-decimal number, e.g. `12.50`, `-5.00`.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_decimal(), f)
    }
}

impl FromStr for Price {
    type Err = DataValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Price::parse(s)
    }
}

/// Serialized as decimal text so no JSON consumer sees a float.
impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Accepts decimal text or a JSON number, through the same coercion.
impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PriceVisitor;

        impl<'de> Visitor<'de> for PriceVisitor {
            type Value = Price;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a decimal price as a number or string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Price, E> {
                v.to_price().map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Price, E> {
                v.to_price().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Price, E> {
                v.to_price().map_err(E::custom)
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Price, E> {
                v.to_price().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(PriceVisitor)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
