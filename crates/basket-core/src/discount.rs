//! # Discounts
//!
//! Promotion rules and their attachment to items.
//!
//! ## How Discounts Hang Together
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Promotions Registry                              │
//! │                                                                         │
//! │   discounts: id ──► Discount { rule, label, item names }                │
//! │   by_item:   item name ──► { discount ids }                             │
//! │                                                                         │
//! │   attach("Baked beans", Buy2Get1Free)                                   │
//! │        │                                                                │
//! │        ├──► discount.items  += "Baked beans"                            │
//! │        └──► by_item["Baked beans"] += id                                │
//! │                                                                         │
//! │   Both directions update in one call, so the basket can ask             │
//! │   "which discounts touch my items?" and a discount can ask              │
//! │   "which basket lines qualify?" without back-pointers.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Discounts follow a dual-key pattern:
//! - `id`: UUID v4 - immutable, used for attachment bookkeeping
//! - `name`: derived business label ("25%Off", "Buy2Get1Free") shown on
//!   receipts

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::basket::Basket;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Item, Percentage};

// =============================================================================
// Discount Identity
// =============================================================================

/// Unique identifier for a registered discount.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct DiscountId(Uuid);

impl DiscountId {
    /// Generates a fresh id.
    pub fn new() -> Self {
        DiscountId(Uuid::new_v4())
    }
}

impl Default for DiscountId {
    fn default() -> Self {
        DiscountId::new()
    }
}

impl fmt::Display for DiscountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Discount Rules
// =============================================================================

/// A pricing rule reducing the payable total.
///
/// ## Variants
/// - `PercentageOff`: a flat percentage off every qualifying unit
/// - `BuyNGetOneFree`: one free unit per full group of n+1 on a single line
/// - `BuyNCheapestFree`: across all qualifying units, the cheapest of every
///   full group of n is free
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountRule {
    PercentageOff(Percentage),
    BuyNGetOneFree { n: u32 },
    BuyNCheapestFree { n: u32 },
}

impl DiscountRule {
    /// A percentage-off rule.
    ///
    /// Fails with [`CoreError::PercentageOutOfRange`] when the fraction is
    /// outside [0, 1].
    pub fn percentage_off(fraction: f64) -> CoreResult<Self> {
        Ok(DiscountRule::PercentageOff(Percentage::from_fraction(
            fraction,
        )?))
    }

    /// A buy-n-get-one-free rule.
    ///
    /// Fails with [`CoreError::InvalidGroupSize`] when n is negative.
    /// n = 0 is accepted and keeps its literal meaning: every full group
    /// of one unit earns a free unit, so every unit is free.
    pub fn buy_n_get_one_free(n: i64) -> CoreResult<Self> {
        if n < 0 || n > u32::MAX as i64 {
            return Err(CoreError::InvalidGroupSize(n));
        }
        Ok(DiscountRule::BuyNGetOneFree { n: n as u32 })
    }

    /// A buy-n-of-a-set-get-the-cheapest-free rule.
    ///
    /// Fails with [`CoreError::InvalidGroupSize`] when n < 1; a group of
    /// zero units has no cheapest member.
    pub fn buy_n_cheapest_free(n: i64) -> CoreResult<Self> {
        if n < 1 || n > u32::MAX as i64 {
            return Err(CoreError::InvalidGroupSize(n));
        }
        Ok(DiscountRule::BuyNCheapestFree { n: n as u32 })
    }

    /// Derives the business label for this rule.
    pub fn label(&self) -> String {
        match self {
            DiscountRule::PercentageOff(pct) => format!("{}%Off", pct.percent()),
            DiscountRule::BuyNGetOneFree { n } => format!("Buy{}Get1Free", n),
            DiscountRule::BuyNCheapestFree { n } => format!("Buy{}OfGetCheapestFree", n),
        }
    }
}

// =============================================================================
// Discount
// =============================================================================

/// A registered discount: a rule plus the set of item names it applies to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discount {
    id: DiscountId,
    name: String,
    rule: DiscountRule,
    items: BTreeSet<String>,
}

impl Discount {
    pub(crate) fn new(rule: DiscountRule) -> Self {
        Discount {
            id: DiscountId::new(),
            name: rule.label(),
            rule,
            items: BTreeSet::new(),
        }
    }

    /// Returns the discount id.
    #[inline]
    pub fn id(&self) -> DiscountId {
        self.id
    }

    /// Returns the derived business label ("25%Off", "Buy2Get1Free").
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the rule.
    #[inline]
    pub fn rule(&self) -> DiscountRule {
        self.rule
    }

    /// Checks whether this discount applies to an item name.
    #[inline]
    pub fn applies_to(&self, name: &str) -> bool {
        self.items.contains(name)
    }

    /// Returns the names of the items this discount applies to.
    pub fn item_names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    /// Returns the number of items attached to this discount.
    #[inline]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Calculates the amount this discount takes off a basket.
    ///
    /// Only basket lines whose item is attached to this discount
    /// participate; everything else in the basket is ignored. The result
    /// is never negative.
    pub fn amount(&self, basket: &Basket<'_>) -> Money {
        match self.rule {
            DiscountRule::PercentageOff(pct) => self.percentage_amount(pct, basket),
            DiscountRule::BuyNGetOneFree { n } => self.group_free_amount(n, basket),
            DiscountRule::BuyNCheapestFree { n } => self.cheapest_free_amount(n, basket),
        }
    }

    /// Per qualifying line: price × percentage × quantity, rounded up to
    /// the next penny, summed across lines.
    fn percentage_amount(&self, pct: Percentage, basket: &Basket<'_>) -> Money {
        let mut discount = Money::zero();
        for line in basket.lines() {
            if self.applies_to(line.item().name()) {
                discount += line.line_total().scale_by(pct);
            }
        }
        discount
    }

    /// Per qualifying line at or above the n-unit threshold: one unit free
    /// for every full group of n+1 units.
    fn group_free_amount(&self, n: u32, basket: &Basket<'_>) -> Money {
        let mut discount = Money::zero();
        for line in basket.lines() {
            if self.applies_to(line.item().name()) && line.quantity() >= n as i64 {
                let free_units = line.quantity() / (n as i64 + 1);
                discount += line.item().price().multiply_quantity(free_units);
            }
        }
        discount
    }

    /// Across all qualifying units: sort prices descending and give away
    /// the last (cheapest) unit of every full group of n.
    ///
    /// Constructors guarantee n ≥ 1.
    fn cheapest_free_amount(&self, n: u32, basket: &Basket<'_>) -> Money {
        let mut units: Vec<Money> = Vec::new();
        for line in basket.lines() {
            if self.applies_to(line.item().name()) {
                for _ in 0..line.quantity() {
                    units.push(line.item().price());
                }
            }
        }
        units.sort_unstable_by(|a, b| b.cmp(a));

        let n = n as usize;
        units
            .iter()
            .skip(n - 1)
            .step_by(n)
            .fold(Money::zero(), |acc, price| acc + *price)
    }
}

// =============================================================================
// Promotions Registry
// =============================================================================

/// The context-owned registry of discounts and their item attachments.
///
/// Item↔discount association is stored as two maps (discount → item names,
/// item name → discount ids); [`attach`] and [`detach`] update both sides
/// in one call, so the relationship never goes out of sync and there are
/// no ownership cycles.
///
/// [`attach`]: Promotions::attach
/// [`detach`]: Promotions::detach
///
/// ## Usage
/// ```rust
/// use basket_core::{DiscountRule, Item, Money, Promotions};
///
/// let beans = Item::new("Baked beans", Money::from_pence(99)).unwrap();
///
/// let mut promotions = Promotions::new();
/// let offer = promotions.add(DiscountRule::buy_n_get_one_free(2).unwrap());
/// promotions.attach(offer, &beans).unwrap();
///
/// assert!(promotions.get(offer).unwrap().applies_to("Baked beans"));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Promotions {
    discounts: BTreeMap<DiscountId, Discount>,
    by_item: BTreeMap<String, BTreeSet<DiscountId>>,
}

impl Promotions {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Promotions {
            discounts: BTreeMap::new(),
            by_item: BTreeMap::new(),
        }
    }

    /// Registers a discount rule and returns its id.
    pub fn add(&mut self, rule: DiscountRule) -> DiscountId {
        let discount = Discount::new(rule);
        let id = discount.id();
        debug!(id = %id, name = %discount.name(), "registering discount");
        self.discounts.insert(id, discount);
        id
    }

    /// Looks up a discount by id.
    #[inline]
    pub fn get(&self, id: DiscountId) -> Option<&Discount> {
        self.discounts.get(&id)
    }

    /// Removes a discount, detaching it from every item.
    ///
    /// Fails with [`CoreError::DiscountNotFound`] for an unknown id.
    pub fn remove(&mut self, id: DiscountId) -> CoreResult<Discount> {
        let discount = self
            .discounts
            .remove(&id)
            .ok_or_else(|| CoreError::DiscountNotFound(id.to_string()))?;

        debug!(id = %id, name = %discount.name(), "removing discount");
        for name in &discount.items {
            if let Some(ids) = self.by_item.get_mut(name) {
                ids.remove(&id);
                if ids.is_empty() {
                    self.by_item.remove(name);
                }
            }
        }
        Ok(discount)
    }

    /// Attaches a discount to an item.
    ///
    /// Registers the item name with the discount and the discount id with
    /// the item name. Fails with [`CoreError::DiscountNotFound`] for an
    /// unknown id and [`CoreError::AlreadyAttached`] for a repeat attach.
    pub fn attach(&mut self, id: DiscountId, item: &Item) -> CoreResult<()> {
        let discount = self
            .discounts
            .get_mut(&id)
            .ok_or_else(|| CoreError::DiscountNotFound(id.to_string()))?;

        if !discount.items.insert(item.name().to_string()) {
            return Err(CoreError::AlreadyAttached {
                item: item.name().to_string(),
                discount: discount.name.clone(),
            });
        }

        debug!(id = %id, name = %discount.name(), item = %item.name(), "attaching discount");
        self.by_item
            .entry(item.name().to_string())
            .or_default()
            .insert(id);
        Ok(())
    }

    /// Detaches a discount from an item.
    ///
    /// Fails with [`CoreError::DiscountNotFound`] for an unknown id and
    /// [`CoreError::NotAttached`] if the pair is not currently linked.
    pub fn detach(&mut self, id: DiscountId, name: &str) -> CoreResult<()> {
        let discount = self
            .discounts
            .get_mut(&id)
            .ok_or_else(|| CoreError::DiscountNotFound(id.to_string()))?;

        if !discount.items.remove(name) {
            return Err(CoreError::NotAttached {
                item: name.to_string(),
                discount: discount.name.clone(),
            });
        }

        debug!(id = %id, name = %discount.name(), item = %name, "detaching discount");
        if let Some(ids) = self.by_item.get_mut(name) {
            ids.remove(&id);
            if ids.is_empty() {
                self.by_item.remove(name);
            }
        }
        Ok(())
    }

    /// Returns the discounts attached to one item name.
    pub fn discounts_for<'s>(&'s self, name: &str) -> impl Iterator<Item = &'s Discount> {
        self.by_item
            .get(name)
            .into_iter()
            .flatten()
            .filter_map(move |id| self.discounts.get(id))
    }

    /// Returns an iterator over all registered discounts.
    pub fn discounts(&self) -> impl Iterator<Item = &Discount> {
        self.discounts.values()
    }

    /// Returns the number of registered discounts.
    #[inline]
    pub fn len(&self) -> usize {
        self.discounts.len()
    }

    /// Checks if the registry is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.discounts.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::Catalogue;

    fn item(name: &str, pence: i64) -> Item {
        Item::new(name, Money::from_pence(pence)).unwrap()
    }

    #[test]
    fn test_rule_labels() {
        assert_eq!(
            DiscountRule::percentage_off(0.34).unwrap().label(),
            "34%Off"
        );
        assert_eq!(DiscountRule::percentage_off(0.0).unwrap().label(), "0%Off");
        assert_eq!(
            DiscountRule::percentage_off(1.0).unwrap().label(),
            "100%Off"
        );
        assert_eq!(
            DiscountRule::buy_n_get_one_free(3).unwrap().label(),
            "Buy3Get1Free"
        );
        assert_eq!(
            DiscountRule::buy_n_cheapest_free(3).unwrap().label(),
            "Buy3OfGetCheapestFree"
        );
    }

    #[test]
    fn test_rule_validation() {
        assert!(matches!(
            DiscountRule::percentage_off(1.01),
            Err(CoreError::PercentageOutOfRange { .. })
        ));
        assert!(matches!(
            DiscountRule::percentage_off(-0.0001),
            Err(CoreError::PercentageOutOfRange { .. })
        ));
        assert!(matches!(
            DiscountRule::buy_n_get_one_free(-12),
            Err(CoreError::InvalidGroupSize(-12))
        ));
        // A group of zero has no cheapest member
        assert!(matches!(
            DiscountRule::buy_n_cheapest_free(0),
            Err(CoreError::InvalidGroupSize(0))
        ));
        // But buy-0-get-1-free keeps its literal (degenerate) meaning
        assert!(DiscountRule::buy_n_get_one_free(0).is_ok());
    }

    #[test]
    fn test_attach_records_both_directions() {
        let nappies = item("Nappies 80", 800);

        let mut promotions = Promotions::new();
        let id = promotions.add(DiscountRule::percentage_off(0.25).unwrap());
        promotions.attach(id, &nappies).unwrap();

        assert_eq!(promotions.get(id).unwrap().item_count(), 1);
        assert!(promotions.get(id).unwrap().applies_to("Nappies 80"));
        assert_eq!(promotions.discounts_for("Nappies 80").count(), 1);
    }

    #[test]
    fn test_attach_twice_fails() {
        let nappies = item("Nappies 80", 800);

        let mut promotions = Promotions::new();
        let id = promotions.add(DiscountRule::percentage_off(0.25).unwrap());
        promotions.attach(id, &nappies).unwrap();

        let err = promotions.attach(id, &nappies).unwrap_err();
        assert!(matches!(err, CoreError::AlreadyAttached { .. }));
    }

    #[test]
    fn test_detach() {
        let nappies = item("Nappies 80", 800);

        let mut promotions = Promotions::new();
        let id = promotions.add(DiscountRule::percentage_off(0.25).unwrap());
        promotions.attach(id, &nappies).unwrap();
        promotions.detach(id, "Nappies 80").unwrap();

        assert_eq!(promotions.get(id).unwrap().item_count(), 0);
        assert_eq!(promotions.discounts_for("Nappies 80").count(), 0);

        let err = promotions.detach(id, "Nappies 80").unwrap_err();
        assert!(matches!(err, CoreError::NotAttached { .. }));
    }

    #[test]
    fn test_unknown_id_fails() {
        let mut promotions = Promotions::new();
        let stray = DiscountId::new();

        assert!(matches!(
            promotions.attach(stray, &item("Beans", 99)),
            Err(CoreError::DiscountNotFound(_))
        ));
        assert!(matches!(
            promotions.detach(stray, "Beans"),
            Err(CoreError::DiscountNotFound(_))
        ));
        assert!(matches!(
            promotions.remove(stray),
            Err(CoreError::DiscountNotFound(_))
        ));
    }

    #[test]
    fn test_remove_detaches_everywhere() {
        let beans = item("Beans", 99);
        let mackerel = item("Mackerel", 360);

        let mut promotions = Promotions::new();
        let id = promotions.add(DiscountRule::percentage_off(0.10).unwrap());
        promotions.attach(id, &beans).unwrap();
        promotions.attach(id, &mackerel).unwrap();

        let removed = promotions.remove(id).unwrap();
        assert_eq!(removed.item_count(), 2);
        assert!(promotions.is_empty());
        assert_eq!(promotions.discounts_for("Beans").count(), 0);
        assert_eq!(promotions.discounts_for("Mackerel").count(), 0);
    }

    #[test]
    fn test_percentage_amount() {
        let swirls = item("Chocolatery swirls", 99);
        let catalogue = Catalogue::with_items(vec![swirls.clone()]).unwrap();

        let mut promotions = Promotions::new();
        let id = promotions.add(DiscountRule::percentage_off(0.10).unwrap());
        promotions.attach(id, &swirls).unwrap();

        let mut basket = Basket::new(&catalogue, &promotions);
        basket.add("Chocolatery swirls", 1).unwrap();

        // 99 × 10% = 9.9 pence, rounded up to 10
        let discount = promotions.get(id).unwrap();
        assert_eq!(discount.amount(&basket).pence(), 10);
    }

    #[test]
    fn test_buy_n_get_one_free_amount() {
        let mackerel = item("Mackerel", 360);
        let catalogue = Catalogue::with_items(vec![mackerel.clone()]).unwrap();

        let mut promotions = Promotions::new();
        let id = promotions.add(DiscountRule::buy_n_get_one_free(2).unwrap());
        promotions.attach(id, &mackerel).unwrap();

        let mut basket = Basket::new(&catalogue, &promotions);
        let discount_amount = |basket: &Basket<'_>| {
            promotions.get(id).unwrap().amount(basket).pence()
        };

        // 3 units: one full group of 3, one free
        basket.add("Mackerel", 3).unwrap();
        assert_eq!(discount_amount(&basket), 360);

        // 5 units: still one full group
        basket.add("Mackerel", 2).unwrap();
        assert_eq!(discount_amount(&basket), 360);

        // 6 units: two full groups
        basket.add("Mackerel", 1).unwrap();
        assert_eq!(discount_amount(&basket), 720);

        // 7 units: still two
        basket.add("Mackerel", 1).unwrap();
        assert_eq!(discount_amount(&basket), 720);
    }

    #[test]
    fn test_buy_n_get_one_free_below_threshold() {
        let beans = item("Baked beans", 99);
        let catalogue = Catalogue::with_items(vec![beans.clone()]).unwrap();

        let mut promotions = Promotions::new();
        let id = promotions.add(DiscountRule::buy_n_get_one_free(2).unwrap());
        promotions.attach(id, &beans).unwrap();

        let mut basket = Basket::new(&catalogue, &promotions);
        basket.add("Baked beans", 1).unwrap();

        assert!(promotions.get(id).unwrap().amount(&basket).is_zero());
    }

    #[test]
    fn test_buy_zero_get_one_free_makes_everything_free() {
        let beans = item("Baked beans", 99);
        let catalogue = Catalogue::with_items(vec![beans.clone()]).unwrap();

        let mut promotions = Promotions::new();
        let id = promotions.add(DiscountRule::buy_n_get_one_free(0).unwrap());
        promotions.attach(id, &beans).unwrap();

        let mut basket = Basket::new(&catalogue, &promotions);
        basket.add("Baked beans", 4).unwrap();

        // floor(4 / 1) = 4 free units
        assert_eq!(promotions.get(id).unwrap().amount(&basket).pence(), 396);
    }

    #[test]
    fn test_cheapest_free_amount() {
        let small = item("Shampoo (Small)", 200);
        let medium = item("Shampoo (Medium)", 250);
        let large = item("Shampoo (Large)", 350);
        let catalogue =
            Catalogue::with_items(vec![small.clone(), medium.clone(), large.clone()]).unwrap();

        let mut promotions = Promotions::new();
        let id = promotions.add(DiscountRule::buy_n_cheapest_free(3).unwrap());
        promotions.attach(id, &small).unwrap();
        promotions.attach(id, &medium).unwrap();
        promotions.attach(id, &large).unwrap();

        let mut basket = Basket::new(&catalogue, &promotions);
        basket.add("Shampoo (Small)", 2).unwrap();
        basket.add("Shampoo (Medium)", 3).unwrap();
        basket.add("Shampoo (Large)", 3).unwrap();

        // Units sorted descending: 350 350 350 | 250 250 250 | 200 200
        // The cheapest of each full group of 3: 350 + 250 = 600
        assert_eq!(promotions.get(id).unwrap().amount(&basket).pence(), 600);
    }

    #[test]
    fn test_discount_ignores_unrelated_lines() {
        let beans = item("Baked beans", 99);
        let biscuits = item("Biscuits", 120);
        let catalogue =
            Catalogue::with_items(vec![beans.clone(), biscuits.clone()]).unwrap();

        let mut promotions = Promotions::new();
        let id = promotions.add(DiscountRule::percentage_off(0.50).unwrap());
        promotions.attach(id, &beans).unwrap();

        let mut basket = Basket::new(&catalogue, &promotions);
        basket.add("Baked beans", 2).unwrap();
        basket.add("Biscuits", 2).unwrap();

        // Only the beans line participates: 198 × 50% = 99
        assert_eq!(promotions.get(id).unwrap().amount(&basket).pence(), 99);
    }
}
