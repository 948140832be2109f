//! # Catalogue
//!
//! The registry of purchasable items, keyed by name.
//!
//! ## Role In The System
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalogue Usage                                    │
//! │                                                                         │
//! │  add_item("Baked beans", £0.99) ──► Catalogue ◄── Basket resolves      │
//! │  add_item("Sardines",    £1.89)       │           names at add time    │
//! │                                       │                                 │
//! │  Every basket is bound to exactly one catalogue; an item can only be    │
//! │  put in a basket if the catalogue can resolve its name.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Items are cloneable values, so the same item may appear in several
//! catalogues; the map below owns its own copies.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::types::Item;

/// A name-keyed collection of items.
///
/// ## Invariants
/// - No duplicate name may be inserted
/// - Iteration order is stable (name order)
///
/// ## Usage
/// ```rust
/// use basket_core::{Catalogue, Item, Money};
///
/// let mut catalogue = Catalogue::new();
/// catalogue.add_item(Item::new("Pepsi 1.5L", Money::from_pence(150)).unwrap()).unwrap();
///
/// assert!(catalogue.contains("Pepsi 1.5L"));
/// assert_eq!(catalogue.len(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalogue {
    items: BTreeMap<String, Item>,
}

impl Catalogue {
    /// Creates an empty catalogue.
    pub fn new() -> Self {
        Catalogue {
            items: BTreeMap::new(),
        }
    }

    /// Creates a catalogue pre-populated with items.
    ///
    /// Insertion stops at the first duplicate name, like [`add_items`].
    ///
    /// [`add_items`]: Catalogue::add_items
    pub fn with_items<I>(items: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = Item>,
    {
        let mut catalogue = Catalogue::new();
        catalogue.add_items(items)?;
        Ok(catalogue)
    }

    /// Adds an item to the catalogue.
    ///
    /// Fails with [`CoreError::DuplicateItem`] if the name is already
    /// present.
    pub fn add_item(&mut self, item: Item) -> CoreResult<()> {
        if self.items.contains_key(item.name()) {
            return Err(CoreError::DuplicateItem {
                name: item.name().to_string(),
            });
        }

        debug!(name = %item.name(), price = %item.price(), "adding item to catalogue");
        self.items.insert(item.name().to_string(), item);
        Ok(())
    }

    /// Adds several items in sequence.
    ///
    /// The first failure aborts the remaining insertions; items added
    /// before the failure stay in the catalogue (no rollback).
    pub fn add_items<I>(&mut self, items: I) -> CoreResult<()>
    where
        I: IntoIterator<Item = Item>,
    {
        for item in items {
            self.add_item(item)?;
        }
        Ok(())
    }

    /// Removes an item by name, returning it.
    ///
    /// Fails with [`CoreError::ItemNotFound`] if the name is absent.
    pub fn remove_item(&mut self, name: &str) -> CoreResult<Item> {
        debug!(name = %name, "removing item from catalogue");
        self.items
            .remove(name)
            .ok_or_else(|| CoreError::ItemNotFound {
                name: name.to_string(),
            })
    }

    /// Checks whether an item name is in the catalogue.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    /// Looks up an item by name.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.get(name)
    }

    /// Returns an iterator over all items, in name order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Returns the number of items in the catalogue.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the catalogue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Display for Catalogue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} products", self.len())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
