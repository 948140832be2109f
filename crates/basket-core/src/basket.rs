//! # Basket
//!
//! A customer's selected items with quantities, bound to one catalogue,
//! and the subtotal / discount / total arithmetic on top of them.
//!
//! ## Pricing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Basket Pricing Flow                               │
//! │                                                                         │
//! │  add("Baked beans", 4) ──► resolve via catalogue ──► line qty += 4      │
//! │                                                                         │
//! │  subtotal() ─── Σ price × qty over lines                                │
//! │       │                                                                 │
//! │  discount() ── collect discounts attached to items in the basket,       │
//! │       │        sum each rule's amount                                   │
//! │       ▼                                                                 │
//! │  total() ───── subtotal − discount                                      │
//! │                                                                         │
//! │  ┌────────────────────────────────────────────────────────────────┐     │
//! │  │  Baked beans             x4              £3.96                 │     │
//! │  │  Biscuits                x1              £1.20                 │     │
//! │  ├────────────────────────────────────────────────────────────────┤     │
//! │  │  Subtotal                                £5.16                 │     │
//! │  │  Buy2Get1Free                           -£0.99                 │     │
//! │  │  ──────────────────────────────────────────────────            │     │
//! │  │  TOTAL                                   £4.17                 │     │
//! │  └────────────────────────────────────────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalogue::Catalogue;
use crate::discount::{Discount, Promotions};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Item;
use crate::validation;
use crate::{MAX_BASKET_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Basket Line
// =============================================================================

/// One line of a basket: an item and how many of it.
///
/// ## Design Notes
/// The line holds its own copy of the item, frozen at the moment it was
/// added. A catalogue edit after that point does not reprice lines already
/// in a basket.
#[derive(Debug, Clone)]
pub struct BasketLine {
    item: Item,
    quantity: i64,
}

impl BasketLine {
    /// Returns the item on this line.
    #[inline]
    pub fn item(&self) -> &Item {
        &self.item
    }

    /// Returns the quantity on this line (always > 0).
    #[inline]
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.item.price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Basket
// =============================================================================

/// The shopping basket.
///
/// ## Invariants
/// - Lines are unique by item name (adding the same name increases quantity)
/// - Quantity is always > 0 (removal drops the line at zero)
/// - At most [`MAX_BASKET_LINES`] distinct lines, [`MAX_LINE_QUANTITY`] per line
/// - Bound to one catalogue and one promotions registry for its lifetime
///
/// ## Usage
/// ```rust
/// use basket_core::{Basket, Catalogue, Item, Money, Promotions};
///
/// let catalogue = Catalogue::with_items(vec![
///     Item::new("Biscuits", Money::from_pence(120)).unwrap(),
/// ]).unwrap();
/// let promotions = Promotions::new();
///
/// let mut basket = Basket::new(&catalogue, &promotions);
/// basket.add("Biscuits", 2).unwrap();
///
/// assert_eq!(basket.subtotal().pence(), 240);
/// assert_eq!(basket.total().pence(), 240);
/// ```
#[derive(Debug, Clone)]
pub struct Basket<'a> {
    catalogue: &'a Catalogue,
    promotions: &'a Promotions,
    lines: BTreeMap<String, BasketLine>,
}

impl<'a> Basket<'a> {
    /// Creates an empty basket bound to a catalogue and its promotions.
    pub fn new(catalogue: &'a Catalogue, promotions: &'a Promotions) -> Self {
        Basket {
            catalogue,
            promotions,
            lines: BTreeMap::new(),
        }
    }

    /// Adds `quantity` units of the named item.
    ///
    /// The name is resolved against the bound catalogue; the resolved item
    /// is frozen into the line. Fails with [`CoreError::NotInCatalogue`]
    /// when the catalogue cannot resolve the name, and with a validation
    /// error when the quantity is not positive.
    pub fn add(&mut self, name: &str, quantity: i64) -> CoreResult<()> {
        validation::validate_quantity(quantity)?;

        let item = self
            .catalogue
            .get(name)
            .ok_or_else(|| CoreError::NotInCatalogue {
                name: name.to_string(),
            })?;

        let current = self.lines.get(item.name()).map(|l| l.quantity).unwrap_or(0);
        if current == 0 && self.lines.len() >= MAX_BASKET_LINES {
            return Err(CoreError::TooManyLines {
                max: MAX_BASKET_LINES,
            });
        }

        let new_quantity = current + quantity;
        if new_quantity > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: new_quantity,
                max: MAX_LINE_QUANTITY,
            });
        }

        debug!(name = %item.name(), quantity = %quantity, "adding item to basket");
        self.lines
            .entry(item.name().to_string())
            .or_insert_with(|| BasketLine {
                item: item.clone(),
                quantity: 0,
            })
            .quantity = new_quantity;
        Ok(())
    }

    /// Adds a single unit of the named item.
    pub fn add_one(&mut self, name: &str) -> CoreResult<()> {
        self.add(name, 1)
    }

    /// Removes a single unit of the named item, dropping the line when its
    /// quantity reaches zero.
    ///
    /// Fails with [`CoreError::ItemNotFound`] when the basket holds no such
    /// line.
    pub fn remove(&mut self, name: &str) -> CoreResult<()> {
        let line = self
            .lines
            .get_mut(name)
            .ok_or_else(|| CoreError::ItemNotFound {
                name: name.to_string(),
            })?;

        debug!(name = %name, "removing one unit from basket");
        line.quantity -= 1;
        if line.quantity == 0 {
            self.lines.remove(name);
        }
        Ok(())
    }

    /// Clears all lines from the basket.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Returns an iterator over the basket lines, in item-name order.
    pub fn lines(&self) -> impl Iterator<Item = &BasketLine> {
        self.lines.values()
    }

    /// Returns an iterator over the items currently in the basket.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.lines.values().map(|l| l.item())
    }

    /// Returns the quantity of the named item (0 when absent).
    pub fn quantity_of(&self, name: &str) -> i64 {
        self.lines.get(name).map(|l| l.quantity).unwrap_or(0)
    }

    /// Returns the number of distinct lines.
    #[inline]
    pub fn unique_items(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.values().map(|l| l.quantity).sum()
    }

    /// Checks if the basket is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Calculates the sum of all lines, before discounts.
    pub fn subtotal(&self) -> Money {
        self.lines
            .values()
            .fold(Money::zero(), |acc, line| acc + line.line_total())
    }

    /// Returns the deduplicated discounts attached to any item currently
    /// in the basket.
    pub fn applicable_discounts(&self) -> Vec<&'a Discount> {
        let mut seen = BTreeSet::new();
        let mut discounts = Vec::new();
        for name in self.lines.keys() {
            for discount in self.promotions.discounts_for(name) {
                if seen.insert(discount.id()) {
                    discounts.push(discount);
                }
            }
        }
        discounts
    }

    /// Calculates the amount to take off the subtotal: the sum of every
    /// applicable discount's own amount, each rule applied once.
    pub fn discount(&self) -> Money {
        let discounts = self.applicable_discounts();
        let total = discounts
            .iter()
            .fold(Money::zero(), |acc, d| acc + d.amount(self));

        debug!(discount = %total, rules = discounts.len(), "calculated basket discount");
        total
    }

    /// Calculates the sum to pay: subtotal minus discount.
    pub fn total(&self) -> Money {
        self.subtotal() - self.discount()
    }

    /// Produces a priced snapshot of the basket.
    pub fn receipt(&self) -> Receipt {
        let lines = self
            .lines
            .values()
            .map(|line| ReceiptLine {
                name: line.item().name().to_string(),
                unit_price_pence: line.item().price().pence(),
                quantity: line.quantity(),
                line_total_pence: line.line_total().pence(),
            })
            .collect();

        let discounts = self
            .applicable_discounts()
            .iter()
            .map(|d| d.name().to_string())
            .collect();

        Receipt {
            lines,
            discounts,
            subtotal_pence: self.subtotal().pence(),
            discount_pence: self.discount().pence(),
            total_pence: self.total().pence(),
            priced_at: Utc::now(),
        }
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// One priced line on a receipt.
/// Uses the snapshot pattern: the price is frozen at pricing time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub name: String,
    /// Unit price in pence at pricing time (frozen).
    pub unit_price_pence: i64,
    pub quantity: i64,
    /// Line total before discounts (unit price × quantity).
    pub line_total_pence: i64,
}

/// A priced snapshot of a basket.
///
/// The receipt is plain data: serializable, detached from the catalogue
/// and promotions it was priced against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    pub lines: Vec<ReceiptLine>,
    /// Labels of the discounts that were applied.
    pub discounts: Vec<String>,
    pub subtotal_pence: i64,
    pub discount_pence: i64,
    pub total_pence: i64,
    /// When the basket was priced.
    pub priced_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
