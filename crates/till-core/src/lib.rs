//! # till-core: Pure Business Logic for Till
//!
//! This crate is the **heart** of Till. It contains the whole retail checkout
//! flow as pure functions and values with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Till Architecture                           │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │                  apps/register (binary)                       │ │
//! │  │    logging setup ──► catalog wiring ──► print notice/receipt  │ │
//! │  └─────────────────────────────┬─────────────────────────────────┘ │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐ │
//! │  │                ★ till-core (THIS CRATE) ★                     │ │
//! │  │                                                               │ │
//! │  │  ┌─────────┐ ┌─────────┐ ┌────────┐ ┌──────────┐ ┌────────┐ │ │
//! │  │  │ catalog │ │  cart   │ │ money  │ │ checkout │ │shipping│ │ │
//! │  │  │ Product │ │  Cart   │ │ Money  │ │ Receipt  │ │ Notice │ │ │
//! │  │  │Inventory│ │CartLine │ │ cents  │ │ two-phase│ │ weight │ │ │
//! │  │  └─────────┘ └─────────┘ └────────┘ └──────────┘ └────────┘ │ │
//! │  │                                                               │ │
//! │  │  NO I/O • NO CLOCK READS • NO PRINTING • PURE FUNCTIONS      │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Products (perishable/non-perishable) and the inventory map
//! - [`cart`] - Cart and cart lines (append-only, id-referenced)
//! - [`customer`] - Customer balance and payment
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`shipping`] - Shippable projections and the shipment notice
//! - [`checkout`] - The checkout orchestrator and receipt
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - even expiry checks
//!    take `now` as a parameter instead of reading the clock
//! 2. **No I/O**: Printing, file system and network access are FORBIDDEN here;
//!    checkout returns a [`checkout::Receipt`] value and the caller decides
//!    how to present it
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid
//!    float errors; weights are integer grams for the same reason
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{Duration, Utc};
//! use till_core::{checkout, Cart, Customer, Inventory, Money, Product};
//!
//! let now = Utc::now();
//! let mut inventory = Inventory::new();
//! let cheese = inventory.insert(
//!     Product::perishable("Cheese", Money::from_cents(10_000), 5, 200, now + Duration::days(1))
//!         .unwrap(),
//! );
//!
//! let mut cart = Cart::new();
//! cart.add(inventory.get(&cheese).unwrap(), 2, now).unwrap();
//!
//! let mut customer = Customer::new(Money::from_cents(100_000));
//! let receipt = checkout(&mut inventory, &cart, &mut customer, now).unwrap();
//!
//! // 2 x 100.00 + 30.00 flat shipping (cheese is perishable, so it ships)
//! assert_eq!(receipt.total, Money::from_cents(23_000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod customer;
pub mod error;
pub mod money;
pub mod shipping;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use till_core::Money` instead of
// `use till_core::money::Money`

pub use cart::{Cart, CartLine};
pub use catalog::{Inventory, Product, ProductId, ProductKind};
pub use checkout::{checkout, Receipt, ReceiptLine};
pub use customer::Customer;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use shipping::{ShipmentNotice, ShippableItem};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Flat shipping fee applied when a checkout contains at least one shippable
/// item (30.00 currency units).
///
/// ## Why Flat?
/// The fee is deliberately not proportional to weight or item count; weight
/// only appears on the shipment notice, never in pricing.
pub const FLAT_SHIPPING_FEE: Money = Money::from_cents(3_000);

/// Maximum lines allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable transaction sizes.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single cart line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;
