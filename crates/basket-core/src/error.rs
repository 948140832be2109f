//! # Error Types
//!
//! Domain-specific error types for basket-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  basket-core errors (this file)                                        │
//! │  ├── CoreError        - Domain rule violations                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → caller                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item name, discount label, etc.)
//! 3. Errors are enum variants, never String
//! 4. Every failure is immediate and local; nothing is caught or retried
//!    internally, and each operation is a single atomic container mutation

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core pricing errors.
///
/// These errors represent domain rule violations. They surface immediately
/// to the caller; there is no partial state to clean up.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Item constructed with a negative price.
    #[error("Price of '{name}' cannot be negative (got {pence}p)")]
    NegativePrice { name: String, pence: i64 },

    /// Catalogue insertion of a name that is already present.
    #[error("Item '{name}' is already in catalogue")]
    DuplicateItem { name: String },

    /// Removal of an item that is not there.
    ///
    /// ## When This Occurs
    /// - Catalogue removal of an absent name
    /// - Basket removal of a line the basket does not hold
    #[error("Item '{name}' not found")]
    ItemNotFound { name: String },

    /// Basket add of a name the bound catalogue cannot resolve.
    #[error("Item '{name}' is not in catalogue")]
    NotInCatalogue { name: String },

    /// Percentage outside the closed interval [0, 1].
    #[error("Percentage {value} is outside [0, 1]")]
    PercentageOutOfRange { value: f64 },

    /// Invalid group size for a quantity-threshold discount rule.
    ///
    /// ## When This Occurs
    /// - `BuyNGetOneFree` with n < 0
    /// - `BuyNCheapestFree` with n < 1 (a group of zero has no cheapest)
    #[error("Invalid group size for discount rule: {0}")]
    InvalidGroupSize(i64),

    /// Promotions operation on an unknown discount id.
    #[error("Discount {0} not found")]
    DiscountNotFound(String),

    /// Attaching a discount to an item it is already attached to.
    #[error("Discount '{discount}' is already attached to '{item}'")]
    AlreadyAttached { item: String, discount: String },

    /// Detaching a discount from an item it is not attached to.
    #[error("Discount '{discount}' is not attached to '{item}'")]
    NotAttached { item: String, discount: String },

    /// Basket has exceeded the maximum number of distinct lines.
    #[error("Basket cannot have more than {max} lines")]
    TooManyLines { max: usize },

    /// Line quantity exceeds the maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before domain logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
