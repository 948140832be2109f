//! # basket-core: Pure Pricing Logic for Basket Pricer
//!
//! This crate is the **heart** of Basket Pricer. It computes the price of a
//! shopping basket from a product catalogue and a set of promotion rules,
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Basket Pricer Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 ★ basket-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ catalogue │  │ discount  │  │   │
//! │  │   │   Item    │  │   Money   │  │ Catalogue │  │  Rules    │  │   │
//! │  │   │Percentage │  │  round-up │  │  lookups  │  │Promotions │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └─────┬─────┘  │   │
//! │  │                                                      │        │   │
//! │  │   ┌──────────────────────────────────────────────────▼─────┐  │   │
//! │  │   │  basket: lines + subtotal / discount / total + receipt │  │   │
//! │  │   └────────────────────────────────────────────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, Percentage)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//! - [`catalogue`] - The registry of purchasable items
//! - [`discount`] - Promotion rules and their attachment to items
//! - [`basket`] - Basket lines and the pricing arithmetic
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in pence (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use basket_core::{Basket, Catalogue, DiscountRule, Item, Money, Promotions};
//!
//! // A catalogue of priced items
//! let catalogue = Catalogue::with_items(vec![
//!     Item::new("Baked beans", Money::from_pence(99)).unwrap(),
//!     Item::new("Biscuits", Money::from_pence(120)).unwrap(),
//! ]).unwrap();
//!
//! // Buy two tins of beans, get a third free
//! let mut promotions = Promotions::new();
//! let offer = promotions.add(DiscountRule::buy_n_get_one_free(2).unwrap());
//! promotions.attach(offer, catalogue.get("Baked beans").unwrap()).unwrap();
//!
//! // Fill a basket and price it
//! let mut basket = Basket::new(&catalogue, &promotions);
//! basket.add("Baked beans", 4).unwrap();
//! basket.add("Biscuits", 1).unwrap();
//!
//! assert_eq!(basket.subtotal().pence(), 516); // £5.16
//! assert_eq!(basket.discount().pence(), 99);  // one tin free
//! assert_eq!(basket.total().pence(), 417);    // £4.17
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod basket;
pub mod catalogue;
pub mod discount;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use basket_core::Money` instead of
// `use basket_core::money::Money`

pub use basket::{Basket, BasketLine, Receipt, ReceiptLine};
pub use catalogue::Catalogue;
pub use discount::{Discount, DiscountId, DiscountRule, Promotions};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::{Item, Percentage};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of distinct lines allowed in a single basket
///
/// ## Business Reason
/// Prevents runaway baskets and keeps pricing passes bounded.
pub const MAX_BASKET_LINES: usize = 100;

/// Maximum quantity of a single item on one basket line
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10)
pub const MAX_LINE_QUANTITY: i64 = 999;
