//! # Money Module
//!
//! Provides the `Money` type for handling monetary amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The legacy panel computed totals in JavaScript floats:                 │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every amount is an i64 count of the smallest currency unit.          │
//! │    Decimal strings from the UI are converted exactly once, at the       │
//! │    coercion boundary, and rounding happens exactly once, on the         │
//! │    aggregate tax base (never per line).                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use folio_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1099); // 10.99
//!
//! // Arithmetic operations
//! let line = price.times(3);                   // 32.97
//! let total = line + Money::from_cents(500);   // 37.97
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in the smallest currency unit (cents for USD, céntimos
/// for VES).
///
/// ## Design Decisions
/// - **i64 (signed)**: credit notes and corrections can be negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Currency-agnostic**: the currency lives on the document, not on every
///   amount; all amounts inside one document share its currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses a decimal string ("12.34", "-5", " 7.5 ") into Money.
    ///
    /// ## Rules
    /// - Leading/trailing whitespace is ignored
    /// - Fractions beyond two decimals round to the nearest cent
    /// - Anything unparseable returns `None` (callers decide the fallback;
    ///   the line-item coercion layer maps it to zero)
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal_str("12.34"), Some(Money::from_cents(1234)));
    /// assert_eq!(Money::from_decimal_str("7"), Some(Money::from_cents(700)));
    /// assert_eq!(Money::from_decimal_str("abc"), None);
    /// ```
    pub fn from_decimal_str(s: &str) -> Option<Self> {
        let value: f64 = s.trim().parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        Some(Money((value * 100.0).round() as i64))
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (dollars for USD, bolívares for VES).
    #[inline]
    pub const fn major_units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99, sign dropped).
    #[inline]
    pub const fn minor_units(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the amount as a plain decimal number.
    ///
    /// Wire/display use only: the legacy REST backend exchanges decimal
    /// numbers, so the DTO layer converts on the way out. The calculator
    /// itself never touches floats.
    #[inline]
    pub fn as_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies by a quantity, saturating on overflow.
    ///
    /// Quantities come from user input that is floored at 1 but deliberately
    /// never capped ("never block typing"), so the multiplication saturates
    /// instead of wrapping.
    #[inline]
    pub const fn times(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Calculates tax on this amount with a single half-up rounding.
    ///
    /// ## Rounding Contract
    /// The document engine applies this to the **aggregate** taxable base,
    /// not to each line. Rounding once keeps the result identical to the
    /// legacy panel, which summed raw line subtotals and rounded the final
    /// tax figure only.
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::money::Money;
    /// use folio_core::types::TaxRate;
    ///
    /// let base = Money::from_cents(10_000); // 100.00
    /// let tax = base.tax_at(TaxRate::from_bps(1600)); // 16%
    /// assert_eq!(tax.cents(), 1600); // 16.00
    /// ```
    pub fn tax_at(&self, rate: TaxRate) -> Money {
        // i128 intermediate prevents overflow on large documents.
        // Formula: (cents * bps + 5000) / 10000, where the +5000 is the half-up.
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows a plain signed decimal ("-5.50").
///
/// This is for logs and debugging. UI display goes through
/// [`crate::format::format_amount`], which adds the currency symbol and
/// locale grouping.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major_units().abs(), self.minor_units())
    }
}

/// Default money is zero.
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

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
