//! # Cart Module
//!
//! The shopping cart: an ordered, append-only list of lines.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Cart Operations                              │
//! │                                                                     │
//! │  add(product, qty) ──► availability check ──► lines.push(line)     │
//! │                             │                                       │
//! │                             └── unavailable/expired ──► error      │
//! │                                                                     │
//! │  No remove. No update. No merge of duplicate-product lines.        │
//! │  Insertion order is preserved: it is the receipt display order.    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Add-Time vs Checkout-Time Validation
//! `add` validates availability against the product's stock *at add time*,
//! but nothing is reserved until checkout. Two lines for the same product can
//! each pass `add` while their combined quantity exceeds stock; the checkout
//! validation pass catches that case with a reservation map.

use serde::{Deserialize, Serialize};

use crate::catalog::{Product, ProductId};
use crate::error::{CoreError, CoreResult};
use crate::validation::{validate_cart_size, validate_quantity};
use chrono::{DateTime, Utc};

/// A line in the cart.
///
/// ## Design Notes
/// The line holds a [`ProductId`], not a copy of product state: the inventory
/// stays the single source of truth and checkout prices every line against
/// current product data. Immutable once added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Reference into the inventory map.
    pub product_id: ProductId,

    /// Requested quantity (validated positive at add time).
    pub quantity: i64,
}

/// The shopping cart.
///
/// ## Invariants
/// - Every line passed an availability check at the moment it was added
/// - Line quantities are positive and at most [`crate::MAX_LINE_QUANTITY`]
/// - At most [`crate::MAX_CART_LINES`] lines
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds a product to the cart.
    ///
    /// ## Behavior
    /// - Fails with a validation error if `quantity` is not positive or the
    ///   cart is full
    /// - Fails with [`CoreError::InvalidOperation`] if the product is not
    ///   available for `quantity` units as of `now` (out of stock or expired)
    /// - Otherwise appends a new line; duplicate-product lines are NOT merged
    ///
    /// ## Example
    /// ```rust
    /// use chrono::{Duration, Utc};
    /// use till_core::{Cart, Money, Product};
    ///
    /// let now = Utc::now();
    /// let tv = Product::non_perishable("TV", Money::from_cents(20_000), 3, 10_000, true).unwrap();
    ///
    /// let mut cart = Cart::new();
    /// assert!(cart.add(&tv, 3, now).is_ok());
    /// assert!(cart.add(&tv, 4, now).is_err()); // only 3 in stock
    /// ```
    pub fn add(&mut self, product: &Product, quantity: i64, now: DateTime<Utc>) -> CoreResult<()> {
        validate_quantity(quantity)?;
        validate_cart_size(self.lines.len())?;

        if !product.is_available(quantity, now) {
            return Err(CoreError::InvalidOperation {
                name: product.name.clone(),
            });
        }

        self.lines.push(CartLine {
            product_id: product.id,
            quantity,
        });
        Ok(())
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// The cart lines, in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
