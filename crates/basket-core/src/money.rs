//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A basket full of 99p items priced as 0.99 drifts a penny at a time.    │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Pence                                            │
//! │    £0.99 is 99 pence, £1.89 is 189 pence                                │
//! │    Sums and quantity products are exact; the only rounding in the       │
//! │    system is `scale_by`, which rounds UP to the next whole penny        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use basket_core::Money;
//!
//! // Create from pence (preferred)
//! let price = Money::from_pence(189); // £1.89
//!
//! // Arithmetic operations
//! let doubled = price * 2;                     // £3.78
//! let total = price + Money::from_pence(99);   // £2.88
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::types::Percentage;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in pence (the smallest currency unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for discount arithmetic
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support, total ordering for price sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from pence.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::Money;
    ///
    /// let price = Money::from_pence(189); // Represents £1.89
    /// assert_eq!(price.pence(), 189);
    /// ```
    #[inline]
    pub const fn from_pence(pence: i64) -> Self {
        Money(pence)
    }

    /// Creates a Money value from major and minor units (pounds and pence).
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::Money;
    ///
    /// let price = Money::from_major_minor(10, 99); // £10.99
    /// assert_eq!(price.pence(), 1099);
    ///
    /// let negative = Money::from_major_minor(-5, 50); // -£5.50
    /// assert_eq!(negative.pence(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -£5.50, not -£4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in pence.
    #[inline]
    pub const fn pence(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (pounds) portion.
    #[inline]
    pub const fn pounds(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (pence) portion (always 0-99).
    #[inline]
    pub const fn pence_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
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

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::Money;
    ///
    /// let unit_price = Money::from_pence(99); // £0.99
    /// let line_total = unit_price.multiply_quantity(4);
    /// assert_eq!(line_total.pence(), 396); // £3.96
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Takes a percentage of this amount, rounding UP to the next penny.
    ///
    /// ## Rounding Rule
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  ROUND UP TO TWO DECIMAL PLACES                                     │
    /// │                                                                     │
    /// │  £1.89 × 25% = £0.4725 → £0.48 (47.25 pence becomes 48)             │
    /// │  £2.01 × 50% = £1.005  → £1.01 (100.5 pence becomes 101)            │
    /// │                                                                     │
    /// │  Any positive fractional remainder bumps the result to the next     │
    /// │  whole penny. This is a ceiling rule, not banker's rounding.        │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Implementation
    /// Integer math on i128 to prevent overflow: `ceil(pence × bps / 10000)`.
    /// Negative amounts truncate toward zero, which is the same ceiling.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::{Money, Percentage};
    ///
    /// let price = Money::from_pence(189); // £1.89
    /// let quarter = Percentage::from_fraction(0.25).unwrap();
    ///
    /// assert_eq!(price.scale_by(quarter).pence(), 48);
    /// ```
    pub fn scale_by(&self, percentage: Percentage) -> Money {
        let raw = self.0 as i128 * percentage.bps() as i128;
        let pence = if raw >= 0 {
            (raw + 9_999) / 10_000
        } else {
            raw / 10_000
        };
        Money::from_pence(pence as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and receipts. Callers needing localization
/// should format from `pence()` themselves.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}£{}.{:02}", sign, self.pounds().abs(), self.pence_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pence() {
        let money = Money::from_pence(1099);
        assert_eq!(money.pence(), 1099);
        assert_eq!(money.pounds(), 10);
        assert_eq!(money.pence_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        let money = Money::from_major_minor(10, 99);
        assert_eq!(money.pence(), 1099);

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.pence(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_pence(1099)), "£10.99");
        assert_eq!(format!("{}", Money::from_pence(500)), "£5.00");
        assert_eq!(format!("{}", Money::from_pence(-550)), "-£5.50");
        assert_eq!(format!("{}", Money::from_pence(0)), "£0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_pence(1000);
        let b = Money::from_pence(500);

        assert_eq!((a + b).pence(), 1500);
        assert_eq!((a - b).pence(), 500);
        let result: Money = a * 3;
        assert_eq!(result.pence(), 3000);
    }

    #[test]
    fn test_scale_by_exact() {
        // £10.00 at 10% = £1.00, no remainder
        let amount = Money::from_pence(1000);
        let pct = Percentage::from_fraction(0.10).unwrap();
        assert_eq!(amount.scale_by(pct).pence(), 100);
    }

    #[test]
    fn test_scale_by_rounds_up() {
        // £1.89 at 25% = 47.25 pence → 48
        let amount = Money::from_pence(189);
        let pct = Percentage::from_fraction(0.25).unwrap();
        assert_eq!(amount.scale_by(pct).pence(), 48);

        // £2.01 at 50% = 100.5 pence → 101 (not banker's rounding)
        let amount = Money::from_pence(201);
        let pct = Percentage::from_fraction(0.50).unwrap();
        assert_eq!(amount.scale_by(pct).pence(), 101);

        // £0.99 at 10% = 9.9 pence → 10
        let amount = Money::from_pence(99);
        let pct = Percentage::from_fraction(0.10).unwrap();
        assert_eq!(amount.scale_by(pct).pence(), 10);
    }

    #[test]
    fn test_scale_by_borders() {
        let amount = Money::from_pence(1234);

        let none = Percentage::from_fraction(0.0).unwrap();
        assert_eq!(amount.scale_by(none).pence(), 0);

        let all = Percentage::from_fraction(1.0).unwrap();
        assert_eq!(amount.scale_by(all).pence(), 1234);
    }

    #[test]
    fn test_scale_by_negative_truncates_toward_zero() {
        // ceil(-47.25) = -47
        let amount = Money::from_pence(-189);
        let pct = Percentage::from_fraction(0.25).unwrap();
        assert_eq!(amount.scale_by(pct).pence(), -47);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_pence(100);
        assert!(!positive.is_zero());
        assert!(positive.is_positive());
        assert!(!positive.is_negative());

        let negative = Money::from_pence(-100);
        assert!(!negative.is_zero());
        assert!(!negative.is_positive());
        assert!(negative.is_negative());
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_pence(99);
        let line_total = unit_price.multiply_quantity(4);
        assert_eq!(line_total.pence(), 396);
    }
}
