//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                           Error Types                               │
//! │                                                                     │
//! │  till-core errors (this file)                                      │
//! │  ├── CoreError        - Domain failures (cart, checkout, payment)  │
//! │  └── ValidationError  - Input validation failures                  │
//! │                                                                     │
//! │  Flow: ValidationError ──► CoreError ──► register app ──► stderr   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, amounts, quantities)
//! 3. Errors are enum variants, never String
//! 4. Every failure aborts the whole operation; nothing here is retried

use thiserror::Error;

use crate::catalog::ProductId;
use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations during cart building,
/// checkout, or payment. Every one of them is terminal for the operation
/// that raised it: there is no retry and no partial success.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A product was added to a cart while unavailable or expired.
    ///
    /// ## When This Occurs
    /// - Requested quantity exceeds stock at add time
    /// - The product is perishable and past its expiry date
    #[error("cannot add {name} to cart: product unavailable or expired")]
    InvalidOperation { name: String },

    /// Checkout was attempted on a cart with no lines.
    #[error("cart is empty")]
    EmptyCart,

    /// A cart line refers to a product that is not in the inventory.
    ///
    /// ## When This Occurs
    /// Cart lines reference products by id, not by live reference. If the
    /// cart was built against a different inventory (or the product was
    /// removed out of band), checkout cannot price the line.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// Checkout re-validation failed for a cart line.
    ///
    /// ## User Workflow
    /// ```text
    /// Add to cart (qty: 3, stock: 3)   ──► ok
    /// Add to cart (qty: 1, stock: 3)   ──► ok (lines are independent)
    ///      │
    ///      ▼
    /// checkout() validation pass: 3 + 1 > 3
    ///      │
    ///      ▼
    /// ProductUnavailable { name: "TV", available: 3, requested: 1 }
    /// ```
    #[error("{name} unavailable or expired: available {available}, requested {requested}")]
    ProductUnavailable {
        name: String,
        available: i64,
        requested: i64,
    },

    /// The customer cannot cover the amount due.
    ///
    /// Raised by the checkout funds check and by [`crate::Customer::pay`].
    /// Neither one mutates any state when it fails.
    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: Money, available: Money },

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when input doesn't meet requirements.
/// Used for early validation before business logic runs.
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

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ProductUnavailable {
            name: "TV".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "TV unavailable or expired: available 3, requested 5"
        );

        let err = CoreError::InsufficientFunds {
            required: Money::from_cents(103_000),
            available: Money::from_cents(100_000),
        };
        assert_eq!(
            err.to_string(),
            "insufficient funds: required 1030.00, available 1000.00"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
