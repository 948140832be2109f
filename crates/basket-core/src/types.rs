//! # Domain Types
//!
//! Core domain types used throughout Basket Pricer.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │     Item        │   │   Percentage    │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  name (key)     │   │  bps (u32)      │                             │
//! │  │  price_pence    │   │  2500 = 25%     │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  Items are cheap cloneable values. The catalogue, baskets, and          │
//! │  promotions each hold their own copy; identity flows through the name.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation;

// =============================================================================
// Percentage
// =============================================================================

/// A percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 2500 bps = 25% off
///
/// Storing the rate as an integer keeps every discount calculation in
/// integer math; the float fraction only exists at the construction edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Percentage(u32);

impl Percentage {
    /// Creates a percentage from basis points.
    ///
    /// Fails with [`CoreError::PercentageOutOfRange`] above 10000 (100%).
    pub fn from_bps(bps: u32) -> CoreResult<Self> {
        if bps > 10_000 {
            return Err(CoreError::PercentageOutOfRange {
                value: bps as f64 / 10_000.0,
            });
        }
        Ok(Percentage(bps))
    }

    /// Creates a percentage from a fraction in the closed interval [0, 1].
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::Percentage;
    ///
    /// let quarter = Percentage::from_fraction(0.25).unwrap();
    /// assert_eq!(quarter.bps(), 2500);
    ///
    /// assert!(Percentage::from_fraction(1.01).is_err());
    /// assert!(Percentage::from_fraction(-0.0001).is_err());
    /// ```
    pub fn from_fraction(fraction: f64) -> CoreResult<Self> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(CoreError::PercentageOutOfRange { value: fraction });
        }
        Ok(Percentage((fraction * 10_000.0).round() as u32))
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a fraction (for display only).
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.0 as f64 / 10_000.0
    }

    /// Returns the whole-percent part, used for discount labels ("25%Off").
    #[inline]
    pub const fn percent(&self) -> u32 {
        self.0 / 100
    }

    /// Zero percentage.
    #[inline]
    pub const fn zero() -> Self {
        Percentage(0)
    }

    /// Checks if the percentage is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Percentage::zero()
    }
}

// =============================================================================
// Item
// =============================================================================

/// A purchasable item: a named, priced product.
///
/// ## Identity
/// - Container keys (catalogue, basket lines, promotion sets) use the name
/// - Equality additionally compares the price, so two items with the same
///   name but different prices are distinct values
/// - Hashing uses the name alone; equal items always have equal names, so
///   the `Eq`/`Hash` contract holds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    name: String,
    price_pence: i64,
}

impl Item {
    /// Creates a new item.
    ///
    /// Fails with [`CoreError::NegativePrice`] when the price is negative
    /// and with a validation error when the name is empty or over-long.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::{Item, Money};
    ///
    /// let beans = Item::new("Beans", Money::from_pence(156)).unwrap();
    /// assert_eq!(beans.name(), "Beans");
    /// assert_eq!(beans.price().pence(), 156);
    ///
    /// assert!(Item::new("Salmon", Money::from_pence(-2024)).is_err());
    /// ```
    pub fn new(name: impl Into<String>, price: Money) -> CoreResult<Self> {
        let name = name.into();
        validation::validate_item_name(&name)?;

        if price.is_negative() {
            return Err(CoreError::NegativePrice {
                name,
                pence: price.pence(),
            });
        }

        Ok(Item {
            name,
            price_pence: price.pence(),
        })
    }

    /// Returns the item name (the container key).
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_pence(self.price_pence)
    }
}

/// Equality compares name AND price.
impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.price_pence == other.price_pence
    }
}

impl Eq for Item {}

/// Hashing uses the name only; equal items have equal names.
impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Display shows the item the way it appears on a shelf label.
impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.name, self.price())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_initialised() {
        let beans = Item::new("Beans", Money::from_pence(156)).unwrap();
        assert_eq!(beans.name(), "Beans");
        assert_eq!(beans.price().pence(), 156);
        assert_eq!(format!("{}", beans), "Beans, £1.56");
    }

    #[test]
    fn test_item_negative_price_rejected() {
        let err = Item::new("Salmon", Money::from_pence(-2024)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::NegativePrice { pence: -2024, .. }
        ));
    }

    #[test]
    fn test_item_free_is_allowed() {
        let sample = Item::new("Free sample", Money::zero()).unwrap();
        assert!(sample.price().is_zero());
    }

    #[test]
    fn test_item_empty_name_rejected() {
        assert!(Item::new("", Money::from_pence(100)).is_err());
        assert!(Item::new("   ", Money::from_pence(100)).is_err());
    }

    #[test]
    fn test_item_equality_checks_name_and_price() {
        let a = Item::new("Sardines", Money::from_pence(575)).unwrap();
        let b = Item::new("Sardines", Money::from_pence(575)).unwrap();
        let c = Item::new("Sardines", Money::from_pence(325)).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_item_hashes_by_name() {
        use std::collections::hash_map::DefaultHasher;

        fn hash_of(item: &Item) -> u64 {
            let mut hasher = DefaultHasher::new();
            item.hash(&mut hasher);
            hasher.finish()
        }

        // Same name, different price: unequal values, same bucket
        let a = Item::new("Sardines", Money::from_pence(575)).unwrap();
        let b = Item::new("Sardines", Money::from_pence(325)).unwrap();
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_percentage_from_fraction() {
        let pct = Percentage::from_fraction(0.34).unwrap();
        assert_eq!(pct.bps(), 3400);
        assert_eq!(pct.percent(), 34);

        // Border values are valid
        assert_eq!(Percentage::from_fraction(0.0).unwrap().bps(), 0);
        assert_eq!(Percentage::from_fraction(1.0).unwrap().bps(), 10_000);
    }

    #[test]
    fn test_percentage_out_of_range() {
        assert!(matches!(
            Percentage::from_fraction(1.01),
            Err(CoreError::PercentageOutOfRange { .. })
        ));
        assert!(matches!(
            Percentage::from_fraction(-0.0001),
            Err(CoreError::PercentageOutOfRange { .. })
        ));
        assert!(Percentage::from_fraction(f64::NAN).is_err());
        assert!(Percentage::from_bps(10_001).is_err());
    }

    #[test]
    fn test_percentage_default_is_zero() {
        assert!(Percentage::default().is_zero());
    }
}
